/// The video unit: line-stepped timing around the register file,
/// memory and renderer.

use crate::interrupt::Interrupts;
use crate::memory::VideoMemory;
use crate::render::Renderer;

/// Where in the line period a step ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// The line finished and entered horizontal blanking.
    HBlank,
    /// The last visible line finished; the frame is complete.
    VBlank,
}

/// A picture processing unit stepped one line at a time.
///
/// Each `step` renders the current line if it is visible, enters
/// h-blank, and advances the line counter through the 228-line frame.
pub struct Ppu<R: Renderer> {
    mem:      VideoMemory,
    renderer: R,
}

impl<R: Renderer> Ppu<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            mem: VideoMemory::new(),
            renderer,
        }
    }

    /// Advance one line period. Returns the phase signal plus any
    /// interrupts the line raised.
    pub fn step(&mut self) -> (Signal, Interrupts) {
        self.mem.registers.set_h_blank(false);
        if !self.mem.registers.in_v_blank() {
            let line = self.mem.registers.v_count();
            self.renderer.render_line(&self.mem, line);
        }
        self.mem.registers.set_h_blank(true);

        let was_blanking = self.mem.registers.in_v_blank();
        self.mem.registers.inc_v_count();

        if !was_blanking && self.mem.registers.in_v_blank() {
            self.renderer.finish_frame();
            let irq = self.h_blank_irq() | self.v_count_irq() | self.v_blank_irq();
            (Signal::VBlank, irq)
        } else {
            if self.mem.registers.v_count() == 0 {
                self.renderer.start_frame();
            }
            (Signal::HBlank, self.h_blank_irq() | self.v_count_irq())
        }
    }

    /// Return every register, palette and buffer to its power-on state.
    pub fn reset(&mut self) {
        self.mem.reset();
    }
}

// Internal: interrupt line checks.
impl<R: Renderer> Ppu<R> {
    #[inline]
    fn v_count_irq(&self) -> Interrupts {
        if self.mem.registers.v_count_irq() {
            Interrupts::V_COUNTER
        } else {
            Interrupts::empty()
        }
    }

    #[inline]
    fn h_blank_irq(&self) -> Interrupts {
        if self.mem.registers.h_blank_irq() {
            Interrupts::H_BLANK
        } else {
            Interrupts::empty()
        }
    }

    #[inline]
    fn v_blank_irq(&self) -> Interrupts {
        if self.mem.registers.v_blank_irq() {
            Interrupts::V_BLANK
        } else {
            Interrupts::empty()
        }
    }
}

// Register frontend. Each setter matches one hardware register write.
impl<R: Renderer> Ppu<R> {
    pub fn set_display_control(&mut self, data: u16) {
        self.mem.registers.set_display_control(data);
    }

    pub fn display_control(&self) -> u16 {
        self.mem.registers.display_control()
    }

    pub fn set_display_status(&mut self, data: u16) {
        self.mem.registers.set_display_status(data);
    }

    pub fn display_status(&self) -> u16 {
        self.mem.registers.display_status()
    }

    pub fn v_count(&self) -> u8 {
        self.mem.registers.v_count()
    }

    pub fn in_v_blank(&self) -> bool {
        self.mem.registers.in_v_blank()
    }

    pub fn in_h_blank(&self) -> bool {
        self.mem.registers.in_h_blank()
    }

    pub fn set_bg_control(&mut self, bg: usize, data: u16) {
        self.mem.registers.set_bg_control(bg, data);
    }

    pub fn bg_control(&self, bg: usize) -> u16 {
        self.mem.registers.bg_control(bg)
    }

    pub fn set_bg_x_offset(&mut self, bg: usize, data: u16) {
        self.mem.registers.set_bg_x_offset(bg, data);
    }

    pub fn set_bg_y_offset(&mut self, bg: usize, data: u16) {
        self.mem.registers.set_bg_y_offset(bg, data);
    }

    pub fn set_bg_matrix_a(&mut self, bg: usize, data: u16) {
        self.mem.registers.set_bg_matrix_a(bg, data);
    }

    pub fn set_bg_matrix_b(&mut self, bg: usize, data: u16) {
        self.mem.registers.set_bg_matrix_b(bg, data);
    }

    pub fn set_bg_matrix_c(&mut self, bg: usize, data: u16) {
        self.mem.registers.set_bg_matrix_c(bg, data);
    }

    pub fn set_bg_matrix_d(&mut self, bg: usize, data: u16) {
        self.mem.registers.set_bg_matrix_d(bg, data);
    }

    pub fn set_bg_ref_x(&mut self, bg: usize, data: u32) {
        self.mem.registers.set_bg_ref_x(bg, data);
    }

    pub fn set_bg_ref_y(&mut self, bg: usize, data: u32) {
        self.mem.registers.set_bg_ref_y(bg, data);
    }

    pub fn set_win_h(&mut self, win: usize, data: u16) {
        self.mem.registers.set_win_h(win, data);
    }

    pub fn set_win_v(&mut self, win: usize, data: u16) {
        self.mem.registers.set_win_v(win, data);
    }

    pub fn set_win_in(&mut self, data: u16) {
        self.mem.registers.set_win_in(data);
    }

    pub fn set_win_out(&mut self, data: u16) {
        self.mem.registers.set_win_out(data);
    }

    pub fn set_mosaic(&mut self, data: u16) {
        self.mem.registers.set_mosaic(data);
    }

    pub fn set_blend_control(&mut self, data: u16) {
        self.mem.registers.set_blend_control(data);
    }

    pub fn set_blend_alpha(&mut self, data: u16) {
        self.mem.registers.set_blend_alpha(data);
    }

    pub fn set_blend_brightness(&mut self, data: u16) {
        self.mem.registers.set_blend_brightness(data);
    }
}

// Memory frontend. Buffers are pushed wholesale.
impl<R: Renderer> Ppu<R> {
    pub fn set_bg_palette(&mut self, index: usize, colour: u16) {
        self.mem.palette.set_bg(index, colour);
    }

    pub fn bg_palette(&self, index: usize) -> u16 {
        self.mem.palette.get_bg(index)
    }

    pub fn set_obj_palette(&mut self, index: usize, colour: u16) {
        self.mem.palette.set_obj(index, colour);
    }

    pub fn obj_palette(&self, index: usize) -> u16 {
        self.mem.palette.get_obj(index)
    }

    pub fn load_oam(&mut self, data: &[u8]) {
        self.mem.oam.load(data);
    }

    pub fn load_bg_tiles(&mut self, bg: usize, data: &[u16]) {
        self.mem.vram.load_bg_tiles(bg, data);
    }

    pub fn load_bg_map(&mut self, bg: usize, data: &[u16]) {
        self.mem.vram.load_bg_map(bg, data);
    }

    pub fn load_obj_tiles(&mut self, data: &[u16]) {
        self.mem.vram.load_obj_tiles(data);
    }

    pub fn set_bitmap_pixel(&mut self, x: usize, y: usize, colour: u16) {
        self.mem.vram.set_pixel(x, y, colour);
    }

    pub fn bitmap_pixel(&self, x: usize, y: usize) -> u16 {
        self.mem.vram.pixel(x, y)
    }

    pub fn load_bitmap(&mut self, data: &[u16]) {
        self.mem.vram.load_mode3(data);
    }

    pub fn load_mode4_page(&mut self, page: usize, data: &[u8]) {
        self.mem.vram.load_mode4_page(page, data);
    }

    pub fn load_mode5_page(&mut self, page: usize, data: &[u16]) {
        self.mem.vram.load_mode5_page(page, data);
    }

    pub fn flip_mode5_page(&mut self) {
        self.mem.vram.flip_mode5_page();
    }
}
