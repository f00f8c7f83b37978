/// Video registers.

use bitflags::bitflags;
use fixed::types::I24F8;

use crate::constants::video::{VBLANK_MAX, V_MAX};
use crate::render::background::{
    AffineBackgroundData, BackgroundData, BackgroundTypeData, BlendMask, BlendMode, MapLayout,
    TiledBackgroundData, WindowMask,
};
use crate::render::effects::Mosaic;
use crate::utils::{
    bits::{u16, u32, u8},
    bytes,
};

bitflags! {
    #[derive(Default)]
    struct DisplayControl: u16 {
        const DISPLAY_OBJ_WIN = u16::bit(15);
        const DISPLAY_WIN1    = u16::bit(14);
        const DISPLAY_WIN0    = u16::bit(13);
        const DISPLAY_OBJ     = u16::bit(12);
        const DISPLAY_BG3     = u16::bit(11);
        const DISPLAY_BG2     = u16::bit(10);
        const DISPLAY_BG1     = u16::bit(9);
        const DISPLAY_BG0     = u16::bit(8);
        const FORCED_BLANK    = u16::bit(7);
        const OBJ_1D_TILES    = u16::bit(6);
        const HBLANK_INTERVAL = u16::bit(5);
        const FRAME_SELECT    = u16::bit(4);
        const CGB_MODE        = u16::bit(3);
        const MODE            = u16::bits(0, 2);
    }
}

bitflags! {
    #[derive(Default)]
    struct DisplayStatus: u16 {
        const VCOUNT_TARGET = u16::bits(8, 15);
        const VCOUNT_IRQ    = u16::bit(5);
        const HBLANK_IRQ    = u16::bit(4);
        const VBLANK_IRQ    = u16::bit(3);
        const VCOUNT_FLAG   = u16::bit(2);
        const HBLANK_FLAG   = u16::bit(1);
        const VBLANK_FLAG   = u16::bit(0);
    }
}

impl DisplayStatus {
    fn flags(self) -> DisplayStatus {
        self & (DisplayStatus::VCOUNT_FLAG | DisplayStatus::HBLANK_FLAG | DisplayStatus::VBLANK_FLAG)
    }
}

bitflags! {
    #[derive(Default)]
    struct BackgroundControl: u16 {
        const SCREEN_SIZE = u16::bits(14, 15);
        const OVERFLOW    = u16::bit(13);
        const MAP_BASE    = u16::bits(8, 12);
        const USE_8_BPP   = u16::bit(7);
        const MOSAIC      = u16::bit(6);
        const CHAR_BASE   = u16::bits(2, 3);
        const PRIORITY    = u16::bits(0, 1);
    }
}

impl BackgroundControl {
    fn priority(self) -> u8 {
        (self & BackgroundControl::PRIORITY).bits() as u8
    }

    fn is_mosaic(self) -> bool {
        self.contains(BackgroundControl::MOSAIC)
    }

    fn use_8bpp(self) -> bool {
        self.contains(BackgroundControl::USE_8_BPP)
    }

    fn layout(self) -> MapLayout {
        match (self & BackgroundControl::SCREEN_SIZE).bits() >> 14 {
            0 => MapLayout::Small,
            1 => MapLayout::Wide,
            2 => MapLayout::Tall,
            _ => MapLayout::Large,
        }
    }

    /// Side length of an affine background in texels.
    fn affine_size(self) -> u32 {
        128 << ((self & BackgroundControl::SCREEN_SIZE).bits() >> 14)
    }
}

bitflags! {
    #[derive(Default)]
    struct WindowControl: u8 {
        const EFFECT    = u8::bit(5);
        const OBJ       = u8::bit(4);
        const BG_LAYERS = 0xF;
    }
}

impl WindowControl {
    fn bg_enabled(self, bg: usize) -> bool {
        (self.bits() >> bg) & 1 != 0
    }

    fn obj_enabled(self) -> bool {
        self.contains(WindowControl::OBJ)
    }
}

bitflags! {
    #[derive(Default)]
    struct BlendControl: u16 {
        const SECOND_TARGET = u16::bits(8, 13);
        const EFFECT        = u16::bits(6, 7);
        const FIRST_TARGET  = u16::bits(0, 5);
    }
}

impl BlendControl {
    fn mode(self) -> BlendMode {
        match (self & BlendControl::EFFECT).bits() >> 6 {
            0 => BlendMode::None,
            1 => BlendMode::Alpha,
            2 => BlendMode::Brighten,
            _ => BlendMode::Darken,
        }
    }
}

/// Affine transform state for one background: an 8.8 coefficient
/// matrix plus a 20.8 reference point.
#[derive(Clone, Copy, Default)]
pub struct AffineParams {
    pub pa:    I24F8,
    pub pb:    I24F8,
    pub pc:    I24F8,
    pub pd:    I24F8,
    pub ref_x: I24F8,
    pub ref_y: I24F8,
}

/// The full decoded register file, including the line counter and the
/// live status flags it feeds.
pub struct VideoRegisters {
    display_control: DisplayControl,
    display_status:  DisplayStatus,
    v_count:         u8,

    bg_control:  [BackgroundControl; 4],
    bg_x_offset: [u16; 4],
    bg_y_offset: [u16; 4],
    bg_affine:   [AffineParams; 2],

    win_x_left:   [u8; 2],
    win_x_right:  [u8; 2],
    win_y_top:    [u8; 2],
    win_y_bottom: [u8; 2],
    win_inside:   [WindowControl; 2],
    win_outside:  WindowControl,

    mosaic:           Mosaic,
    blend_control:    BlendControl,
    blend_alpha:      u16,
    blend_brightness: u8,
}

impl VideoRegisters {
    pub fn new() -> Self {
        Self {
            display_control: DisplayControl::default(),
            display_status:  DisplayStatus::default(),
            v_count:         0,

            bg_control:  [BackgroundControl::default(); 4],
            bg_x_offset: [0; 4],
            bg_y_offset: [0; 4],
            bg_affine:   [AffineParams::default(); 2],

            win_x_left:   [0; 2],
            win_x_right:  [0; 2],
            win_y_top:    [0; 2],
            win_y_bottom: [0; 2],
            win_inside:   [WindowControl::default(); 2],
            win_outside:  WindowControl::default(),

            mosaic:           Mosaic::new(),
            blend_control:    BlendControl::default(),
            blend_alpha:      0,
            blend_brightness: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

// Register frontend.
impl VideoRegisters {
    pub fn set_display_control(&mut self, data: u16) {
        log::trace!("display control write: {:04X} (mode {})", data, data & 0x7);
        self.display_control = DisplayControl::from_bits_truncate(data);
    }

    pub fn display_control(&self) -> u16 {
        self.display_control.bits()
    }

    /// Write the display status register. The live flag bits are
    /// read-only and survive the write.
    pub fn set_display_status(&mut self, data: u16) {
        let old_flags = self.display_status.flags();
        self.display_status = DisplayStatus::from_bits_truncate(data & 0xFFF8) | old_flags;
    }

    /// Read the display status register: live flags composed with the
    /// stored interrupt enables and line compare target.
    pub fn display_status(&self) -> u16 {
        self.display_status.bits()
    }

    pub fn set_bg_control(&mut self, bg: usize, data: u16) {
        match self.bg_control.get_mut(bg) {
            Some(control) => *control = BackgroundControl::from_bits_truncate(data),
            None => log::debug!("control write for invalid background {}", bg),
        }
    }

    pub fn bg_control(&self, bg: usize) -> u16 {
        self.bg_control.get(bg).map(|c| c.bits()).unwrap_or(0)
    }

    pub fn set_bg_x_offset(&mut self, bg: usize, data: u16) {
        match self.bg_x_offset.get_mut(bg) {
            Some(offset) => *offset = data,
            None => log::debug!("scroll write for invalid background {}", bg),
        }
    }

    pub fn set_bg_y_offset(&mut self, bg: usize, data: u16) {
        match self.bg_y_offset.get_mut(bg) {
            Some(offset) => *offset = data,
            None => log::debug!("scroll write for invalid background {}", bg),
        }
    }

    pub fn set_bg_matrix_a(&mut self, bg: usize, data: u16) {
        if let Some(params) = self.affine_mut(bg) {
            params.pa = I24F8::from_bits((data as i16) as i32);
        }
    }

    pub fn set_bg_matrix_b(&mut self, bg: usize, data: u16) {
        if let Some(params) = self.affine_mut(bg) {
            params.pb = I24F8::from_bits((data as i16) as i32);
        }
    }

    pub fn set_bg_matrix_c(&mut self, bg: usize, data: u16) {
        if let Some(params) = self.affine_mut(bg) {
            params.pc = I24F8::from_bits((data as i16) as i32);
        }
    }

    pub fn set_bg_matrix_d(&mut self, bg: usize, data: u16) {
        if let Some(params) = self.affine_mut(bg) {
            params.pd = I24F8::from_bits((data as i16) as i32);
        }
    }

    pub fn set_bg_ref_x(&mut self, bg: usize, data: u32) {
        if let Some(params) = self.affine_mut(bg) {
            params.ref_x = I24F8::from_bits(sign_extend_28bit(data) as i32);
        }
    }

    pub fn set_bg_ref_y(&mut self, bg: usize, data: u32) {
        if let Some(params) = self.affine_mut(bg) {
            params.ref_y = I24F8::from_bits(sign_extend_28bit(data) as i32);
        }
    }

    /// Horizontal bounds of a window: left edge in the high byte,
    /// one-past-right edge in the low byte.
    pub fn set_win_h(&mut self, win: usize, data: u16) {
        if win < 2 {
            self.win_x_left[win] = bytes::u16::hi(data);
            self.win_x_right[win] = bytes::u16::lo(data);
        } else {
            log::debug!("bounds write for invalid window {}", win);
        }
    }

    /// Vertical bounds of a window: top edge in the high byte,
    /// one-past-bottom edge in the low byte.
    pub fn set_win_v(&mut self, win: usize, data: u16) {
        if win < 2 {
            self.win_y_top[win] = bytes::u16::hi(data);
            self.win_y_bottom[win] = bytes::u16::lo(data);
        } else {
            log::debug!("bounds write for invalid window {}", win);
        }
    }

    /// Layer masks inside window 0 (low byte) and window 1 (high byte).
    pub fn set_win_in(&mut self, data: u16) {
        self.win_inside[0] = WindowControl::from_bits_truncate(bytes::u16::lo(data));
        self.win_inside[1] = WindowControl::from_bits_truncate(bytes::u16::hi(data));
    }

    /// Layer mask outside all windows (low byte).
    pub fn set_win_out(&mut self, data: u16) {
        self.win_outside = WindowControl::from_bits_truncate(bytes::u16::lo(data));
    }

    pub fn set_mosaic(&mut self, data: u16) {
        self.mosaic.set(data);
    }

    pub fn set_blend_control(&mut self, data: u16) {
        self.blend_control = BlendControl::from_bits_truncate(data);
    }

    /// Alpha coefficients: EVA in bits 0-4, EVB in bits 8-12.
    pub fn set_blend_alpha(&mut self, data: u16) {
        self.blend_alpha = data;
    }

    /// Brightness coefficient EVY in bits 0-4.
    pub fn set_blend_brightness(&mut self, data: u16) {
        self.blend_brightness = bytes::u16::lo(data);
    }
}

// Timing interface.
impl VideoRegisters {
    pub fn v_count(&self) -> u8 {
        self.v_count
    }

    /// Advance the line counter, wrapping at the end of v-blank, and
    /// refresh the line compare and v-blank flags.
    pub fn inc_v_count(&mut self) {
        self.v_count = if self.v_count >= VBLANK_MAX {
            0
        } else {
            self.v_count + 1
        };
        let matched = self.v_count == bytes::u16::hi(self.display_status.bits());
        self.display_status.set(DisplayStatus::VCOUNT_FLAG, matched);
        self.display_status.set(DisplayStatus::VBLANK_FLAG, self.v_count > V_MAX);
    }

    pub fn set_h_blank(&mut self, blanking: bool) {
        self.display_status.set(DisplayStatus::HBLANK_FLAG, blanking);
    }

    pub fn in_v_blank(&self) -> bool {
        self.display_status.contains(DisplayStatus::VBLANK_FLAG)
    }

    pub fn in_h_blank(&self) -> bool {
        self.display_status.contains(DisplayStatus::HBLANK_FLAG)
    }

    pub fn v_blank_irq(&self) -> bool {
        self.display_status.contains(DisplayStatus::VBLANK_IRQ)
    }

    pub fn h_blank_irq(&self) -> bool {
        self.display_status.contains(DisplayStatus::HBLANK_IRQ)
    }

    pub fn v_count_irq(&self) -> bool {
        self.display_status
            .contains(DisplayStatus::VCOUNT_IRQ | DisplayStatus::VCOUNT_FLAG)
    }
}

// Render-side interface.
impl VideoRegisters {
    pub fn mode(&self) -> u16 {
        (self.display_control & DisplayControl::MODE).bits()
    }

    pub fn in_forced_blank(&self) -> bool {
        self.display_control.contains(DisplayControl::FORCED_BLANK)
    }

    pub fn is_obj_enabled(&self) -> bool {
        self.display_control.contains(DisplayControl::DISPLAY_OBJ)
    }

    pub fn obj_1d_tiles(&self) -> bool {
        self.display_control.contains(DisplayControl::OBJ_1D_TILES)
    }

    /// The mode 4 page selected for display.
    pub fn frame_page(&self) -> usize {
        self.display_control.contains(DisplayControl::FRAME_SELECT) as usize
    }

    pub fn windows_enabled(&self) -> bool {
        self.display_control
            .intersects(DisplayControl::DISPLAY_WIN0 | DisplayControl::DISPLAY_WIN1)
    }

    pub fn window_0_enabled(&self) -> bool {
        self.display_control.contains(DisplayControl::DISPLAY_WIN0)
    }

    pub fn window_1_enabled(&self) -> bool {
        self.display_control.contains(DisplayControl::DISPLAY_WIN1)
    }

    pub fn x_inside_window(&self, win: usize, x: u8) -> bool {
        x >= self.win_x_left[win] && x < self.win_x_right[win]
    }

    pub fn y_inside_window(&self, win: usize, y: u8) -> bool {
        y >= self.win_y_top[win] && y < self.win_y_bottom[win]
    }

    pub fn mosaic(&self) -> &Mosaic {
        &self.mosaic
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_control.mode()
    }

    /// EVA and EVB, each clamped to 16.
    pub fn alpha_coeffs(&self) -> (u16, u16) {
        (
            (self.blend_alpha & 0x1F).min(0x10),
            ((self.blend_alpha >> 8) & 0x1F).min(0x10),
        )
    }

    /// EVY, clamped to 16.
    pub fn brightness_coeff(&self) -> u16 {
        ((self.blend_brightness & 0x1F) as u16).min(0x10)
    }

    pub fn obj_window_mask(&self) -> WindowMask {
        WindowMask::make(
            self.win_inside[0].obj_enabled(),
            self.win_inside[1].obj_enabled(),
            self.win_outside.obj_enabled(),
        )
    }

    pub fn obj_blend_mask(&self) -> BlendMask {
        let bits = self.blend_control.bits();
        BlendMask::make(u16::test_bit(bits, 4), u16::test_bit(bits, 12))
    }

    pub fn backdrop_blend_mask(&self) -> BlendMask {
        let bits = self.blend_control.bits();
        BlendMask::make(u16::test_bit(bits, 5), u16::test_bit(bits, 13))
    }

    /// Gather the enabled backgrounds of the current mode, front to
    /// back: ascending priority, ties broken by background index.
    pub fn bg_data_for_mode(&self) -> Vec<BackgroundData> {
        let mut backgrounds = Vec::<BackgroundData>::new();
        let mut insert = |bg: Option<BackgroundData>| {
            if let Some(bg_data) = bg {
                for i in 0..backgrounds.len() {
                    if bg_data.priority < backgrounds[i].priority {
                        backgrounds.insert(i, bg_data);
                        return;
                    }
                }
                backgrounds.push(bg_data);
            }
        };

        match self.mode() {
            0 => {
                for bg in 0..4 {
                    insert(self.tiled_bg_data(bg));
                }
            }
            1 => {
                insert(self.tiled_bg_data(0));
                insert(self.tiled_bg_data(1));
                insert(self.affine_bg_data(2, true));
            }
            2 => {
                insert(self.affine_bg_data(2, false));
                insert(self.affine_bg_data(3, false));
            }
            _ => {}
        }
        backgrounds
    }

    fn bg_enabled(&self, bg: usize) -> bool {
        u16::test_bit(self.display_control.bits(), 8 + bg)
    }

    fn bg_window_mask(&self, bg: usize) -> WindowMask {
        WindowMask::make(
            self.win_inside[0].bg_enabled(bg),
            self.win_inside[1].bg_enabled(bg),
            self.win_outside.bg_enabled(bg),
        )
    }

    fn bg_blend_mask(&self, bg: usize) -> BlendMask {
        let bits = self.blend_control.bits();
        BlendMask::make(u16::test_bit(bits, bg), u16::test_bit(bits, bg + 8))
    }

    fn tiled_bg_data(&self, bg: usize) -> Option<BackgroundData> {
        if !self.bg_enabled(bg) {
            return None;
        }
        let control = self.bg_control[bg];
        Some(BackgroundData {
            index:       bg,
            priority:    control.priority(),
            window_mask: self.bg_window_mask(bg),
            blend_mask:  self.bg_blend_mask(bg),
            mosaic:      control.is_mosaic(),
            type_data:   BackgroundTypeData::Tiled(TiledBackgroundData {
                scroll_x: self.bg_x_offset[bg],
                scroll_y: self.bg_y_offset[bg],
                layout:   control.layout(),
                use_8bpp: control.use_8bpp(),
            }),
        })
    }

    fn affine_bg_data(&self, bg: usize, wrap: bool) -> Option<BackgroundData> {
        if !self.bg_enabled(bg) {
            return None;
        }
        let control = self.bg_control[bg];
        Some(BackgroundData {
            index:       bg,
            priority:    control.priority(),
            window_mask: self.bg_window_mask(bg),
            blend_mask:  self.bg_blend_mask(bg),
            mosaic:      control.is_mosaic(),
            type_data:   BackgroundTypeData::Affine(AffineBackgroundData {
                params: self.bg_affine[bg - 2],
                wrap,
                size: control.affine_size(),
            }),
        })
    }

    fn affine_mut(&mut self, bg: usize) -> Option<&mut AffineParams> {
        match bg {
            2 => Some(&mut self.bg_affine[0]),
            3 => Some(&mut self.bg_affine[1]),
            _ => {
                log::debug!("affine write for invalid background {}", bg);
                None
            }
        }
    }
}

#[inline]
const fn sign_extend_28bit(val: u32) -> u32 {
    let val = val & 0x0FFF_FFFF;
    if u32::test_bit(val, 27) {
        val | 0xF000_0000
    } else {
        val
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_control_reads_back_verbatim() {
        let mut regs = VideoRegisters::new();
        regs.set_display_control(0xFFFF);
        assert_eq!(regs.display_control(), 0xFFFF);
        regs.set_display_control(0x1403);
        assert_eq!(regs.display_control(), 0x1403);
        assert_eq!(regs.mode(), 3);
    }

    #[test]
    fn display_status_write_preserves_live_flags() {
        let mut regs = VideoRegisters::new();
        // Run into v-blank so the flag is live.
        for _ in 0..160 {
            regs.inc_v_count();
        }
        assert!(regs.in_v_blank());
        regs.set_display_status(0x0000);
        assert!(regs.in_v_blank());
        // Target, enables and the undefined bits 6-7 behave as stored
        // state; the low three bits stay live.
        regs.set_display_status(0xFFFF);
        assert_eq!(regs.display_status(), 0xFF39);
    }

    #[test]
    fn line_counter_wraps_and_tracks_blanking() {
        let mut regs = VideoRegisters::new();
        assert!(!regs.in_v_blank());
        for expected in 1..228_usize {
            regs.inc_v_count();
            assert_eq!(regs.v_count() as usize, expected);
            assert_eq!(regs.in_v_blank(), expected >= 160);
        }
        regs.inc_v_count();
        assert_eq!(regs.v_count(), 0);
        assert!(!regs.in_v_blank());
    }

    #[test]
    fn line_compare_follows_the_stored_target() {
        let mut regs = VideoRegisters::new();
        regs.set_display_status(42 << 8);
        for _ in 0..42 {
            regs.inc_v_count();
        }
        assert_eq!(regs.display_status() & 0x0004, 0x0004);
        regs.inc_v_count();
        assert_eq!(regs.display_status() & 0x0004, 0);
    }

    #[test]
    fn backgrounds_order_by_priority_then_index() {
        let mut regs = VideoRegisters::new();
        regs.set_display_control(0x0F00); // mode 0, all four backgrounds
        regs.set_bg_control(0, 1);
        regs.set_bg_control(1, 0);
        regs.set_bg_control(2, 0);
        regs.set_bg_control(3, 3);
        let order: Vec<usize> = regs.bg_data_for_mode().iter().map(|bg| bg.index).collect();
        assert_eq!(order, vec![1, 2, 0, 3]);
    }

    #[test]
    fn modes_gather_their_own_backgrounds() {
        let mut regs = VideoRegisters::new();
        regs.set_display_control(0x0F01); // mode 1, all enable bits set
        let data = regs.bg_data_for_mode();
        assert_eq!(data.len(), 3);
        assert!(data
            .iter()
            .any(|bg| matches!(bg.type_data, BackgroundTypeData::Affine(_)) && bg.index == 2));

        regs.set_display_control(0x0F02); // mode 2
        let data = regs.bg_data_for_mode();
        assert_eq!(data.len(), 2);
        assert!(data
            .iter()
            .all(|bg| matches!(bg.type_data, BackgroundTypeData::Affine(_))));
    }

    #[test]
    fn window_bounds_are_half_open() {
        let mut regs = VideoRegisters::new();
        regs.set_win_h(0, bytes::u16::make(0x10, 0x20));
        regs.set_win_v(0, bytes::u16::make(0x00, 0x40));
        assert!(!regs.x_inside_window(0, 0x0F));
        assert!(regs.x_inside_window(0, 0x10));
        assert!(regs.x_inside_window(0, 0x1F));
        assert!(!regs.x_inside_window(0, 0x20));
        assert!(regs.y_inside_window(0, 0x00));
        assert!(!regs.y_inside_window(0, 0x40));
    }

    #[test]
    fn blend_coefficients_clamp_to_sixteen() {
        let mut regs = VideoRegisters::new();
        regs.set_blend_alpha(0x1F1F);
        assert_eq!(regs.alpha_coeffs(), (16, 16));
        regs.set_blend_alpha(0x0408);
        assert_eq!(regs.alpha_coeffs(), (8, 4));
        regs.set_blend_brightness(0x001F);
        assert_eq!(regs.brightness_coeff(), 16);
    }

    #[test]
    fn blend_control_decodes_targets_and_mode() {
        let mut regs = VideoRegisters::new();
        // Alpha mode, first target BG0 + OBJ, second target BG1 + backdrop.
        regs.set_blend_control((1 << 6) | 0x0011 | (0x22 << 8));
        assert_eq!(regs.blend_mode(), BlendMode::Alpha);
        assert_eq!(regs.obj_blend_mask(), BlendMask::make(true, false));
        assert_eq!(regs.backdrop_blend_mask(), BlendMask::make(false, true));
    }

    #[test]
    fn invalid_background_indices_are_ignored() {
        let mut regs = VideoRegisters::new();
        regs.set_bg_control(4, 0xFFFF);
        regs.set_bg_x_offset(9, 5);
        regs.set_bg_matrix_a(0, 0x0100);
        regs.set_bg_ref_x(5, 0x100);
        assert_eq!(regs.bg_control(4), 0);
    }

    #[test]
    fn mode_switches_keep_background_state() {
        let mut regs = VideoRegisters::new();
        regs.set_bg_control(0, 0x4307);
        regs.set_display_control(0x0002);
        regs.set_display_control(0x0100);
        assert_eq!(regs.bg_control(0), 0x4307);
    }

    #[test]
    fn reference_points_sign_extend_28_bits() {
        let mut regs = VideoRegisters::new();
        regs.set_display_control(0x0402); // mode 2, BG2 on
        regs.set_bg_ref_x(2, 0x0FFF_F600);
        regs.set_bg_matrix_a(2, 0x0100);
        regs.set_bg_matrix_d(2, 0x0100);
        let data = regs.bg_data_for_mode();
        match &data[0].type_data {
            BackgroundTypeData::Affine(affine) => {
                assert_eq!(affine.params.ref_x, I24F8::from_num(-10));
                assert_eq!(affine.params.pa, I24F8::from_num(1));
            }
            _ => panic!("expected an affine background"),
        }
    }
}
