/// Constants for video timing and sizes.

pub mod video {
    /// Visible horizontal resolution.
    pub const H_RES: usize = 240;
    /// Visible vertical resolution.
    pub const V_RES: usize = 160;

    /// Last visible line before v-blank begins.
    pub const V_MAX: u8 = 159;
    /// Last line of the frame.
    pub const VBLANK_MAX: u8 = 227;
    /// Line periods in a whole frame, v-blank included.
    pub const LINES_PER_FRAME: usize = 228;

    /// Pixels in a whole visible frame.
    pub const FRAME_PIXELS: usize = H_RES * V_RES;

    /// Width of the half-size bitmap used by mode 5.
    pub const SMALL_BITMAP_WIDTH: usize = 160;
    /// Height of the half-size bitmap used by mode 5.
    pub const SMALL_BITMAP_HEIGHT: usize = 128;

    /// Entries in each of the two colour palettes.
    pub const PALETTE_SIZE: usize = 256;
    /// Object attribute entries.
    pub const NUM_OBJECTS: usize = 128;
    /// Bytes per object attribute entry.
    pub const OBJ_BYTES: usize = 8;
}
