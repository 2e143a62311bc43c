//! 20.12 fixed-point numbers
//!
//! Used wherever a fractional multiplier scales an integer frame count, so the result is
//! identical on every platform.

use std::fmt;
use std::ops::{Add, Sub};

/// A signed fixed-point value with 12 fractional bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed(i32);

impl Fixed {
    pub const SCALE: u32 = 12;
    pub const ONE: Fixed = Fixed(1 << Self::SCALE);
    pub const ZERO: Fixed = Fixed(0);

    const FRAC_MASK: i32 = (1 << Self::SCALE) - 1;

    pub const fn from_raw(raw: i32) -> Self {
        Fixed(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    pub const fn from_int(x: i32) -> Self {
        Fixed(x << Self::SCALE)
    }

    /// Integer part, rounding toward negative infinity.
    pub const fn to_int(self) -> i32 {
        self.0 >> Self::SCALE
    }

    /// Fractional bits only.
    pub const fn frac(self) -> i32 {
        self.0 & Self::FRAC_MASK
    }

    pub fn mul(self, rhs: Fixed) -> Fixed {
        Fixed(((self.0 as i64 * rhs.0 as i64) >> Self::SCALE) as i32)
    }

    /// Divide, or `None` when `rhs` is zero.
    pub fn checked_div(self, rhs: Fixed) -> Option<Fixed> {
        if rhs.0 == 0 {
            return None;
        }
        Some(Fixed((((self.0 as i64) << Self::SCALE) / rhs.0 as i64) as i32))
    }
}

impl Add for Fixed {
    type Output = Fixed;

    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_sub(rhs.0))
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = (self.frac() as i64 * 1000) >> Self::SCALE;
        write!(f, "{}.{:03}", self.to_int(), millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_conversion() {
        assert_eq!(Fixed::from_int(30).raw(), 30 * 4096);
        assert_eq!(Fixed::from_int(30).to_int(), 30);
        assert_eq!(Fixed::from_int(-3).to_int(), -3);
        assert_eq!(Fixed::ONE.raw(), 4096);
    }

    #[test]
    fn to_int_floors_negative_fractions() {
        assert_eq!(Fixed::from_raw(-1).to_int(), -1);
        assert_eq!(Fixed::from_raw(4095).to_int(), 0);
    }

    #[test]
    fn multiply_and_divide() {
        let multi = Fixed::from_raw(4506);
        // 1.10 * 1.10 = 1.21 (truncated)
        assert_eq!(multi.mul(multi).raw(), (4506 * 4506) >> 12);

        let thirty = Fixed::from_int(30);
        assert_eq!(thirty.checked_div(multi).map(Fixed::to_int), Some(27));
        assert_eq!(thirty.checked_div(Fixed::ZERO), None);
    }

    #[test]
    fn frac_and_display() {
        let half = Fixed::from_raw(2048);
        assert_eq!(half.frac(), 2048);
        assert_eq!((Fixed::from_int(2) + half).to_string(), "2.500");
    }
}
