/// Bit manipulation for unsigned integers.

pub mod u8 {
    /// Set the nth bit.
    pub const fn bit(n: usize) -> u8 {
        1 << n
    }
}

pub mod u16 {
    /// Set the nth bit.
    pub const fn bit(n: usize) -> u16 {
        1 << n
    }

    /// Set all bits between bottom and top (inclusive).
    pub const fn bits(mut bottom: usize, top: usize) -> u16 {
        let mut out = 0;
        while bottom <= top {
            out |= bit(bottom);
            bottom += 1;
        }
        out
    }

    /// Check if the nth bit is set.
    pub const fn test_bit(val: u16, n: usize) -> bool {
        (val & bit(n)) != 0
    }
}

pub mod u32 {
    /// Set the nth bit.
    pub const fn bit(n: usize) -> u32 {
        1 << n
    }

    /// Check if the nth bit is set.
    pub const fn test_bit(val: u32, n: usize) -> bool {
        (val & bit(n)) != 0
    }
}
