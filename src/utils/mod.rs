pub mod bits;
pub mod bytes;
