//! RK number encoding.
//!
//! RK values pack a number into 4 bytes:
//! - Bit 0: if 1, the decoded number should be divided by 100
//! - Bit 1: if 1, bits 2..31 hold a signed 30-bit integer;
//!   if 0, bits 2..31 are the upper 30 bits of an IEEE 754 double

/// Smallest integer representable as an RK integer.
pub const RK_INT_MIN: i64 = -(1 << 29);
/// Largest integer representable as an RK integer.
pub const RK_INT_MAX: i64 = (1 << 29) - 1;

/// Encode an integral number as an RK value.
///
/// Only whole numbers in the signed 30-bit range qualify; everything else
/// returns `None` and must be written as a full NUMBER record.
pub fn encode_rk_integer(value: f64) -> Option<u32> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < RK_INT_MIN as f64 || value > RK_INT_MAX as f64 {
        return None;
    }
    let int = value as i32;
    Some(((int << 2) as u32) | 0x02)
}
