/// Colour effects: mosaic coordinate snapping and blending arithmetic.

const RED_MASK: u16 = 0x001F;
const GREEN_MASK: u16 = 0x03E0;
const BLUE_MASK: u16 = 0x7C00;

/// Mosaic state: the raw register value plus coordinate snap tables,
/// rebuilt whenever the register is written. Snapping a coordinate
/// maps it onto the first coordinate of its mosaic block.
pub struct Mosaic {
    raw:   u16,
    bg_x:  [u8; 256],
    bg_y:  [u8; 256],
    obj_x: [u8; 256],
    obj_y: [u8; 256],
}

impl Mosaic {
    pub fn new() -> Self {
        let mut mosaic = Self {
            raw:   0,
            bg_x:  [0; 256],
            bg_y:  [0; 256],
            obj_x: [0; 256],
            obj_y: [0; 256],
        };
        mosaic.set(0);
        mosaic
    }

    /// Write the mosaic register. Each nibble is a block size less one.
    pub fn set(&mut self, data: u16) {
        self.raw = data;
        fill_snap_table(&mut self.bg_x, ((data & 0xF) + 1) as u8);
        fill_snap_table(&mut self.bg_y, (((data >> 4) & 0xF) + 1) as u8);
        fill_snap_table(&mut self.obj_x, (((data >> 8) & 0xF) + 1) as u8);
        fill_snap_table(&mut self.obj_y, (((data >> 12) & 0xF) + 1) as u8);
    }

    pub fn bits(&self) -> u16 {
        self.raw
    }

    #[inline]
    pub fn snap_bg_x(&self, x: u8) -> u8 {
        self.bg_x[x as usize]
    }

    #[inline]
    pub fn snap_bg_y(&self, y: u8) -> u8 {
        self.bg_y[y as usize]
    }

    #[inline]
    pub fn snap_obj_x(&self, x: u8) -> u8 {
        self.obj_x[x as usize]
    }

    #[inline]
    pub fn snap_obj_y(&self, y: u8) -> u8 {
        self.obj_y[y as usize]
    }
}

fn fill_snap_table(table: &mut [u8; 256], size: u8) {
    for (i, entry) in table.iter_mut().enumerate() {
        let i = i as u8;
        *entry = i - (i % size);
    }
}

/// Blend two colours. Each channel is weighted in place under its
/// mask and capped at the mask value.
pub fn alpha_blend(eva: u16, evb: u16, top: u16, bottom: u16) -> u16 {
    let mut out = 0;
    for mask in [RED_MASK, GREEN_MASK, BLUE_MASK] {
        let mixed = ((top & mask) as u32) * (eva as u32) + ((bottom & mask) as u32) * (evb as u32);
        out |= (mixed >> 4).min(mask as u32) as u16;
    }
    out
}

/// Brighten a colour towards white.
pub fn brighten(evy: u16, colour: u16) -> u16 {
    let colour = colour as i32;
    (colour + (((31 - colour) * (evy as i32)) >> 4)) as u16
}

/// Darken a colour towards black.
pub fn darken(evy: u16, colour: u16) -> u16 {
    (((colour as u32) * ((16 - evy) as u32)) >> 4) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_mosaic_is_identity() {
        let mosaic = Mosaic::new();
        for x in 0..=255_u8 {
            assert_eq!(mosaic.snap_bg_x(x), x);
            assert_eq!(mosaic.snap_obj_y(x), x);
        }
    }

    #[test]
    fn mosaic_snaps_runs_to_their_first_pixel() {
        let mut mosaic = Mosaic::new();
        // Background 4x1, object 1x3.
        mosaic.set(0x2000 | 0x0003);
        let line: Vec<u16> = (0..240).collect();
        let snapped: Vec<u16> = (0..240).map(|x| line[mosaic.snap_bg_x(x as u8) as usize]).collect();
        for x in 0..240 {
            assert_eq!(snapped[x], (x - x % 4) as u16);
        }
        assert_eq!(mosaic.snap_obj_y(7), 6);
        assert_eq!(mosaic.snap_bg_y(7), 7);
    }

    #[test]
    fn mosaic_register_reads_back() {
        let mut mosaic = Mosaic::new();
        mosaic.set(0xABCD);
        assert_eq!(mosaic.bits(), 0xABCD);
    }

    #[test]
    fn alpha_blend_half_and_half() {
        assert_eq!(alpha_blend(8, 8, 0x7FFF, 0x0000), 0x3FFF);
    }

    #[test]
    fn alpha_blend_of_identical_colours_is_identity() {
        for colour in [0x0000, 0x001F, 0x2345, 0x7FFF] {
            assert_eq!(alpha_blend(8, 8, colour, colour), colour);
        }
    }

    #[test]
    fn alpha_blend_saturates_per_channel() {
        // Full weight on both sides doubles each channel, capped.
        assert_eq!(alpha_blend(16, 16, 0x7FFF, 0x7FFF), 0x7FFF);
    }

    #[test]
    fn brighten_raises_towards_white() {
        assert_eq!(brighten(8, 0x000F), 0x0017);
        assert_eq!(brighten(0, 0x000F), 0x000F);
    }

    #[test]
    fn darken_lowers_towards_black() {
        assert_eq!(darken(8, 0x001F), 0x000F);
        assert_eq!(darken(0, 0x001F), 0x001F);
        assert_eq!(darken(16, 0x7FFF), 0);
    }
}
