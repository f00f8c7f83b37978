/// Object attribute memory.

use bitflags::bitflags;
use fixed::types::I24F8;

use crate::constants::video::{H_RES, NUM_OBJECTS, OBJ_BYTES, V_RES};
use crate::utils::{bits::u16, bytes};

/// Affine transform parameters for an object, fetched from a
/// parameter group interleaved through the attribute table.
pub struct ObjAffineParams {
    pub pa: I24F8,
    pub pb: I24F8,
    pub pc: I24F8,
    pub pd: I24F8,
}

/// The object attribute table: 128 decoded entries.
///
/// The table is replaced wholesale from a raw byte buffer. A buffer
/// shorter than the full table leaves the remaining entries unchanged.
pub struct OAM {
    objects: Vec<ObjAttrs>,
}

impl OAM {
    pub fn new() -> Self {
        Self {
            objects: vec![ObjAttrs::new(); NUM_OBJECTS],
        }
    }

    pub fn reset(&mut self) {
        for object in &mut self.objects {
            *object = ObjAttrs::new();
        }
    }

    /// Re-parse the whole table from raw attribute bytes, low byte
    /// first within each halfword.
    pub fn load(&mut self, data: &[u8]) {
        for (object, raw) in self.objects.iter_mut().zip(data.chunks_exact(OBJ_BYTES)) {
            object.attrs_0 = ObjAttr0::from_bits_truncate(bytes::u16::make(raw[1], raw[0]));
            object.attrs_1 = ObjAttr1::from_bits_truncate(bytes::u16::make(raw[3], raw[2]));
            object.attrs_2 = ObjAttr2::from_bits_truncate(bytes::u16::make(raw[5], raw[4]));
            object.affine_param = bytes::u16::make(raw[7], raw[6]);
        }
    }

    pub fn ref_objects(&self) -> &[ObjAttrs] {
        &self.objects
    }

    /// Fetch affine parameter group n. Group words are stored in the
    /// fourth attribute slot of four consecutive entries.
    pub fn affine_params(&self, param_num: u16) -> ObjAffineParams {
        let offset = (param_num as usize) * 4;
        ObjAffineParams {
            pa: I24F8::from_bits((self.objects[offset].affine_param as i16) as i32),
            pb: I24F8::from_bits((self.objects[offset + 1].affine_param as i16) as i32),
            pc: I24F8::from_bits((self.objects[offset + 2].affine_param as i16) as i32),
            pd: I24F8::from_bits((self.objects[offset + 3].affine_param as i16) as i32),
        }
    }
}

bitflags! {
    #[derive(Default)]
    struct ObjAttr0: u16 {
        const SHAPE       = u16::bits(14, 15);
        const USE_8_BPP   = u16::bit(13);
        const MOSAIC      = u16::bit(12);
        const OBJ_MODE    = u16::bits(10, 11);
        const DISABLE     = u16::bit(9);
        const DOUBLE_CLIP = u16::bit(9);
        const AFFINE      = u16::bit(8);
        const Y_COORD     = u16::bits(0, 7);
    }
}

bitflags! {
    #[derive(Default)]
    struct ObjAttr1: u16 {
        const SIZE          = u16::bits(14, 15);
        const V_FLIP        = u16::bit(13);
        const H_FLIP        = u16::bit(12);
        const AFFINE_PARAMS = u16::bits(9, 13);
        const X_COORD       = u16::bits(0, 8);
    }
}

bitflags! {
    #[derive(Default)]
    struct ObjAttr2: u16 {
        const PALETTE  = u16::bits(12, 15);
        const PRIORITY = u16::bits(10, 11);
        const TILE_NUM = u16::bits(0, 9);
    }
}

const SHAPE_SQUARE: u16 = 0 << 14;
const SHAPE_HORIZONTAL: u16 = 1 << 14;
const SHAPE_VERTICAL: u16 = 2 << 14;

/// A single decoded object.
#[derive(Clone)]
pub struct ObjAttrs {
    attrs_0:      ObjAttr0,
    attrs_1:      ObjAttr1,
    attrs_2:      ObjAttr2,
    affine_param: u16,
}

impl ObjAttrs {
    fn new() -> Self {
        Self {
            attrs_0:      ObjAttr0::default(),
            attrs_1:      ObjAttr1::default(),
            attrs_2:      ObjAttr2::default(),
            affine_param: 0,
        }
    }

    /// An object draws if it is affine or not explicitly disabled.
    pub fn is_enabled(&self) -> bool {
        self.attrs_0.contains(ObjAttr0::AFFINE) || !self.attrs_0.contains(ObjAttr0::DISABLE)
    }

    /// Check whether the clip rectangle intersects the screen at all.
    pub fn is_visible(&self) -> bool {
        let (x, y) = self.coords();
        let (width, height) = self.size();
        x > -width && x < (H_RES as i16) && y > -height && y < (V_RES as i16)
    }

    /// The affine parameter group used by this object, if it is affine.
    pub fn affine_param_num(&self) -> Option<u16> {
        if self.attrs_0.contains(ObjAttr0::AFFINE) {
            Some((self.attrs_1 & ObjAttr1::AFFINE_PARAMS).bits() >> 9)
        } else {
            None
        }
    }

    pub fn h_flip(&self) -> bool {
        self.attrs_1.contains(ObjAttr1::H_FLIP)
    }

    pub fn v_flip(&self) -> bool {
        self.attrs_1.contains(ObjAttr1::V_FLIP)
    }

    pub fn is_mosaic(&self) -> bool {
        self.attrs_0.contains(ObjAttr0::MOSAIC)
    }

    pub fn use_8bpp(&self) -> bool {
        self.attrs_0.contains(ObjAttr0::USE_8_BPP)
    }

    pub fn priority(&self) -> u8 {
        ((self.attrs_2 & ObjAttr2::PRIORITY).bits() >> 10) as u8
    }

    pub fn palette_bank(&self) -> u8 {
        ((self.attrs_2 & ObjAttr2::PALETTE).bits() >> 12) as u8
    }

    pub fn tile_num(&self) -> u32 {
        (self.attrs_2 & ObjAttr2::TILE_NUM).bits() as u32
    }

    /// Top-left corner of the clip rectangle. X is 9-bit signed,
    /// Y is 8-bit signed.
    pub fn coords(&self) -> (i16, i16) {
        let mut x = (self.attrs_1 & ObjAttr1::X_COORD).bits();
        if u16::test_bit(x, 8) {
            x |= 0xFE00;
        }
        let y = ((self.attrs_0 & ObjAttr0::Y_COORD).bits() as u8) as i8;
        (x as i16, y as i16)
    }

    /// Size of the source image in texels.
    pub fn source_size(&self) -> (u8, u8) {
        let shape = (self.attrs_0 & ObjAttr0::SHAPE).bits();
        let size = (self.attrs_1 & ObjAttr1::SIZE).bits() >> 14;
        match shape {
            SHAPE_SQUARE => match size {
                0 => (8, 8),
                1 => (16, 16),
                2 => (32, 32),
                _ => (64, 64),
            },
            SHAPE_HORIZONTAL => match size {
                0 => (16, 8),
                1 => (32, 8),
                2 => (32, 16),
                _ => (64, 32),
            },
            SHAPE_VERTICAL => match size {
                0 => (8, 16),
                1 => (8, 32),
                2 => (16, 32),
                _ => (32, 64),
            },
            _ => (0, 0),
        }
    }

    /// Size of the clip rectangle on screen. Double that of the
    /// source image when the affine double-clip bit is set.
    pub fn size(&self) -> (i16, i16) {
        let (width, height) = self.source_size();
        let double = ObjAttr0::AFFINE | ObjAttr0::DOUBLE_CLIP;
        if self.attrs_0.contains(double) {
            ((width as i16) * 2, (height as i16) * 2)
        } else {
            (width as i16, height as i16)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oam_bytes(entries: &[(u16, u16, u16, u16)]) -> Vec<u8> {
        let mut data = Vec::new();
        for (a0, a1, a2, param) in entries {
            data.extend_from_slice(&a0.to_le_bytes());
            data.extend_from_slice(&a1.to_le_bytes());
            data.extend_from_slice(&a2.to_le_bytes());
            data.extend_from_slice(&param.to_le_bytes());
        }
        data
    }

    #[test]
    fn attributes_decode_from_raw_bytes() {
        let mut oam = OAM::new();
        // 32x16 object at (40, 12), tile 0x41, palette bank 3, priority 2,
        // h-flipped, 256 colours.
        let a0 = (1 << 14) | (1 << 13) | 12;
        let a1 = (2 << 14) | (1 << 12) | 40;
        let a2 = (3 << 12) | (2 << 10) | 0x41;
        oam.load(&oam_bytes(&[(a0, a1, a2, 0)]));

        let object = &oam.ref_objects()[0];
        assert_eq!(object.coords(), (40, 12));
        assert_eq!(object.source_size(), (32, 16));
        assert_eq!(object.size(), (32, 16));
        assert_eq!(object.tile_num(), 0x41);
        assert_eq!(object.palette_bank(), 3);
        assert_eq!(object.priority(), 2);
        assert!(object.h_flip());
        assert!(!object.v_flip());
        assert!(object.use_8bpp());
        assert!(object.is_enabled());
    }

    #[test]
    fn coordinates_sign_extend() {
        let mut oam = OAM::new();
        let x = (-3_i16 as u16) & 0x1FF;
        let y = (-5_i8 as u8) as u16;
        oam.load(&oam_bytes(&[(y, x, 0, 0)]));
        assert_eq!(oam.ref_objects()[0].coords(), (-3, -5));
    }

    #[test]
    fn visibility_uses_strict_bounds() {
        let mut oam = OAM::new();
        // 16x16 square objects straddling each screen edge.
        let entry = |x: i16, y: i16| {
            let a0 = (y as u8) as u16;
            let a1 = (1 << 14) | ((x as u16) & 0x1FF);
            (a0, a1, 0, 0)
        };
        oam.load(&oam_bytes(&[
            entry(-16, 0),
            entry(-15, 0),
            entry(239, 0),
            entry(240, 0),
            entry(0, -16),
            entry(0, -15),
        ]));
        let objects = oam.ref_objects();
        assert!(!objects[0].is_visible());
        assert!(objects[1].is_visible());
        assert!(objects[2].is_visible());
        assert!(!objects[3].is_visible());
        assert!(!objects[4].is_visible());
        assert!(objects[5].is_visible());
    }

    #[test]
    fn disable_bit_is_double_clip_for_affine_objects() {
        let mut oam = OAM::new();
        oam.load(&oam_bytes(&[
            (1 << 9, 0, 0, 0),             // plain, disabled
            ((1 << 8) | (1 << 9), 0, 0, 0), // affine, double clip
        ]));
        let objects = oam.ref_objects();
        assert!(!objects[0].is_enabled());
        assert_eq!(objects[0].size(), (8, 8));
        assert!(objects[1].is_enabled());
        assert_eq!(objects[1].size(), (16, 16));
    }

    #[test]
    fn affine_params_come_from_interleaved_slots() {
        let mut oam = OAM::new();
        // Group 1 lives in the fourth words of entries 4..8.
        let mut entries = vec![(0, 0, 0, 0); 8];
        entries[4].3 = 0x0100;
        entries[5].3 = 0x0080;
        entries[6].3 = (-0x0100_i16) as u16;
        entries[7].3 = 0x0200;
        oam.load(&oam_bytes(&entries));

        let params = oam.affine_params(1);
        assert_eq!(params.pa, I24F8::from_num(1));
        assert_eq!(params.pb, I24F8::from_num(0.5));
        assert_eq!(params.pc, I24F8::from_num(-1));
        assert_eq!(params.pd, I24F8::from_num(2));
    }

    #[test]
    fn affine_group_number_decodes_only_when_affine() {
        let mut oam = OAM::new();
        oam.load(&oam_bytes(&[
            ((1 << 8), 5 << 9, 0, 0),
            (0, 5 << 9, 0, 0),
        ]));
        assert_eq!(oam.ref_objects()[0].affine_param_num(), Some(5));
        assert_eq!(oam.ref_objects()[1].affine_param_num(), None);
    }

    #[test]
    fn short_buffers_leave_the_tail_untouched() {
        let mut oam = OAM::new();
        oam.load(&oam_bytes(&[(0, 0, 0x41, 0); 128]));
        oam.load(&oam_bytes(&[(0, 0, 0x99, 0)]));
        assert_eq!(oam.ref_objects()[0].tile_num(), 0x99);
        assert_eq!(oam.ref_objects()[1].tile_num(), 0x41);
        assert_eq!(oam.ref_objects()[127].tile_num(), 0x41);
    }
}
