/// Video memory: registers, palettes, object attributes and pixel data.

mod oam;
mod palette;
mod registers;
mod vram;

pub use oam::{ObjAffineParams, ObjAttrs, OAM};
pub use palette::PaletteRAM;
pub use registers::{AffineParams, VideoRegisters};
pub use vram::{TileMap, TileMapAttrs, TileSet, VRAM};

/// Everything the renderer reads and the register frontend writes.
pub struct VideoMemory {
    pub registers: VideoRegisters,
    pub palette:   PaletteRAM,
    pub oam:       OAM,
    pub vram:      VRAM,
}

impl VideoMemory {
    pub fn new() -> Self {
        Self {
            registers: VideoRegisters::new(),
            palette:   PaletteRAM::new(),
            oam:       OAM::new(),
            vram:      VRAM::new(),
        }
    }

    pub fn reset(&mut self) {
        self.registers.reset();
        self.palette.reset();
        self.oam.reset();
        self.vram.reset();
    }
}
