//! Common tools

/// Single-bit manipulation on byte-sized registers
pub trait BitOps {
    /// Set the bit at `pos` and return the new value
    fn set_bit(&mut self, pos: u8) -> Self;
    /// Clear the bit at `pos` and return the new value
    fn clear_bit(&mut self, pos: u8) -> Self;
    /// Whether the bit at `pos` is 1
    fn bit_is_set(&self, pos: u8) -> bool;
}

impl BitOps for u8 {
    fn set_bit(&mut self, pos: u8) -> Self {
        assert!(pos <= 7, "bit offset larger than 7");
        *self |= 1u8 << pos;
        *self
    }

    fn clear_bit(&mut self, pos: u8) -> Self {
        assert!(pos <= 7, "bit offset larger than 7");
        *self &= !(1u8 << pos);
        *self
    }

    fn bit_is_set(&self, pos: u8) -> bool {
        assert!(pos <= 7, "bit offset larger than 7");
        (*self >> pos) & 1 == 1
    }
}
