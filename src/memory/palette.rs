/// Palette memory.

use crate::constants::video::PALETTE_SIZE;

/// Background and object colour palettes.
///
/// Each palette holds 256 RGB555 entries. Entry 0 of the background
/// palette doubles as the backdrop colour; entry 0 of any layer marks
/// transparency and is never drawn from.
pub struct PaletteRAM {
    bg:     [u16; PALETTE_SIZE],
    obj:    [u16; PALETTE_SIZE],
}

impl PaletteRAM {
    pub fn new() -> Self {
        Self {
            bg:     [0; PALETTE_SIZE],
            obj:    [0; PALETTE_SIZE],
        }
    }

    pub fn reset(&mut self) {
        self.bg = [0; PALETTE_SIZE];
        self.obj = [0; PALETTE_SIZE];
    }

    /// Write a background palette entry. Out-of-range indices are ignored.
    pub fn set_bg(&mut self, index: usize, colour: u16) {
        if let Some(entry) = self.bg.get_mut(index) {
            *entry = colour;
        }
    }

    /// Read a background palette entry. Out-of-range indices read as 0.
    pub fn get_bg(&self, index: usize) -> u16 {
        self.bg.get(index).copied().unwrap_or(0)
    }

    /// Write an object palette entry. Out-of-range indices are ignored.
    pub fn set_obj(&mut self, index: usize, colour: u16) {
        if let Some(entry) = self.obj.get_mut(index) {
            *entry = colour;
        }
    }

    /// Read an object palette entry. Out-of-range indices read as 0.
    pub fn get_obj(&self, index: usize) -> u16 {
        self.obj.get(index).copied().unwrap_or(0)
    }

    /// The colour shown wherever no layer produced a pixel.
    pub fn backdrop(&self) -> u16 {
        self.bg[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_read_back_what_was_written() {
        let mut palette = PaletteRAM::new();
        for i in 0..PALETTE_SIZE {
            let colour = (i as u16) | 0x4000;
            palette.set_bg(i, colour);
            palette.set_obj(i, !colour & 0x7FFF);
        }
        for i in 0..PALETTE_SIZE {
            let colour = (i as u16) | 0x4000;
            assert_eq!(palette.get_bg(i), colour);
            assert_eq!(palette.get_obj(i), !colour & 0x7FFF);
        }
    }

    #[test]
    fn out_of_range_entries_are_inert() {
        let mut palette = PaletteRAM::new();
        palette.set_bg(255, 0x1234);
        palette.set_bg(256, 0x7FFF);
        palette.set_obj(1000, 0x7FFF);
        assert_eq!(palette.get_bg(256), 0);
        assert_eq!(palette.get_obj(1000), 0);
        // Neighbouring entries are untouched.
        assert_eq!(palette.get_bg(255), 0x1234);
    }

    #[test]
    fn backdrop_is_background_entry_zero() {
        let mut palette = PaletteRAM::new();
        assert_eq!(palette.backdrop(), 0);
        palette.set_bg(0, 0x03E0);
        assert_eq!(palette.backdrop(), 0x03E0);
    }
}
