/// Interrupt lines raised by the video unit.

use bitflags::bitflags;

use crate::utils::bits::u16;

bitflags! {
    #[derive(Default)]
    pub struct Interrupts: u16 {
        const V_COUNTER = u16::bit(2);
        const H_BLANK   = u16::bit(1);
        const V_BLANK   = u16::bit(0);
    }
}
