/// Byte manipulation for unsigned integers.

pub mod u16 {
    /// Get the low byte.
    pub const fn lo(val: u16) -> u8 {
        val as u8
    }

    /// Get the high byte.
    pub const fn hi(val: u16) -> u8 {
        (val >> 8) as u8
    }

    /// Construct a value from two bytes.
    pub const fn make(hi: u8, lo: u8) -> u16 {
        ((hi as u16) << 8) | (lo as u16)
    }
}
