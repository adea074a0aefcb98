//! Packed 4-state bit vectors used for literal defaults and drive values.

use crate::logic::Logic;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logic values stored per `u64` word (2 bits each).
const LANES: u32 = 32;

/// A fixed-width vector of [`Logic`] values, index 0 being the LSB.
///
/// Every value carries its exact width: drive values in the IR always match
/// the width of the signal they target, and literal widths are what the
/// width checks compare against.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicVec {
    width: u32,
    words: Vec<u64>,
}

impl LogicVec {
    /// An all-`0` vector of `width` bits.
    pub fn zeros(width: u32) -> Self {
        Self {
            width,
            words: vec![0; width.div_ceil(LANES) as usize],
        }
    }

    /// A vector of `width` bits, all set to `value`.
    pub fn filled(width: u32, value: Logic) -> Self {
        let mut v = Self::zeros(width);
        if value != Logic::Zero {
            for i in 0..width {
                v.set(i, value);
            }
        }
        v
    }

    /// Builds a vector from the low `width` bits of `value`.
    pub fn from_u64(value: u64, width: u32) -> Self {
        let mut v = Self::zeros(width);
        for i in 0..width.min(64) {
            if (value >> i) & 1 == 1 {
                v.set(i, Logic::One);
            }
        }
        v
    }

    /// Parses MSB-first digits (`"10xz"`). `_` separators are skipped.
    /// Returns `None` on any other character or an empty digit string.
    pub fn from_binary_str(digits: &str) -> Option<Self> {
        let bits: Vec<Logic> = digits
            .chars()
            .filter(|&c| c != '_')
            .map(Logic::from_char)
            .collect::<Option<_>>()?;
        if bits.is_empty() {
            return None;
        }
        let mut v = Self::zeros(bits.len() as u32);
        for (i, bit) in bits.into_iter().rev().enumerate() {
            v.set(i as u32, bit);
        }
        Some(v)
    }

    /// Number of bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn get(&self, index: u32) -> Logic {
        assert!(index < self.width, "bit {index} out of range for width {}", self.width);
        let word = self.words[(index / LANES) as usize];
        Logic::from_bits(word >> ((index % LANES) * 2))
    }

    /// Overwrites bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn set(&mut self, index: u32, value: Logic) {
        assert!(index < self.width, "bit {index} out of range for width {}", self.width);
        let shift = (index % LANES) * 2;
        let word = &mut self.words[(index / LANES) as usize];
        *word = (*word & !(0b11 << shift)) | ((value as u64) << shift);
    }

    /// Iterates bits from LSB to MSB.
    pub fn bits(&self) -> impl Iterator<Item = Logic> + '_ {
        (0..self.width).map(move |i| self.get(i))
    }

    /// Returns the value as an unsigned integer when every bit is `0`/`1`
    /// and the width is at most 64.
    pub fn to_u64(&self) -> Option<u64> {
        if self.width > 64 {
            return None;
        }
        self.bits().enumerate().try_fold(0u64, |acc, (i, bit)| match bit {
            Logic::Zero => Some(acc),
            Logic::One => Some(acc | (1 << i)),
            Logic::X | Logic::Z => None,
        })
    }

    /// Returns `true` if every bit is `0`. An empty vector counts as zero.
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Returns `true` if any bit is `X` or `Z`.
    pub fn has_unknown(&self) -> bool {
        self.bits().any(|b| !b.is_known())
    }

    /// Returns a copy widened to `width` bits with zero fill in the new MSBs.
    ///
    /// # Panics
    ///
    /// Panics if `width` is smaller than the current width.
    pub fn zero_extend(&self, width: u32) -> Self {
        assert!(width >= self.width, "cannot zero-extend {} bits to {width}", self.width);
        let mut v = Self::zeros(width);
        for (i, bit) in self.bits().enumerate() {
            v.set(i as u32, bit);
        }
        v
    }

    /// Concatenates `self` (upper bits) with `low` (lower bits), as in `{self, low}`.
    pub fn concat(&self, low: &LogicVec) -> Self {
        let mut v = Self::zeros(self.width + low.width);
        for (i, bit) in low.bits().chain(self.bits()).enumerate() {
            v.set(i as u32, bit);
        }
        v
    }

    /// Applies `op` bitwise after zero-extending both operands to the wider width.
    pub fn zip_with(&self, other: &LogicVec, op: impl Fn(Logic, Logic) -> Logic) -> Self {
        let width = self.width.max(other.width);
        let (a, b) = (self.zero_extend(width), other.zero_extend(width));
        let mut v = Self::zeros(width);
        for i in 0..width {
            v.set(i, op(a.get(i), b.get(i)));
        }
        v
    }

    /// Bitwise complement at the current width.
    pub fn complement(&self) -> Self {
        let mut v = Self::zeros(self.width);
        for (i, bit) in self.bits().enumerate() {
            v.set(i as u32, !bit);
        }
        v
    }
}

impl fmt::Display for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.width).rev() {
            write!(f, "{}", self.get(i))?;
        }
        Ok(())
    }
}

impl fmt::Debug for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'b{self}", self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_has_requested_width() {
        let v = LogicVec::zeros(70);
        assert_eq!(v.width(), 70);
        assert!(v.is_zero());
        assert_eq!(v.bits().count(), 70);
    }

    #[test]
    fn set_and_get_across_word_boundary() {
        let mut v = LogicVec::zeros(66);
        v.set(31, Logic::Z);
        v.set(32, Logic::One);
        v.set(65, Logic::X);
        assert_eq!(v.get(31), Logic::Z);
        assert_eq!(v.get(32), Logic::One);
        assert_eq!(v.get(65), Logic::X);
        assert_eq!(v.get(33), Logic::Zero);
    }

    #[test]
    fn binary_digits_are_msb_first() {
        let v = LogicVec::from_binary_str("1_0xz").unwrap();
        assert_eq!(v.width(), 4);
        assert_eq!(v.get(3), Logic::One);
        assert_eq!(v.get(0), Logic::Z);
        assert_eq!(v.to_string(), "10XZ");
        assert!(v.has_unknown());
    }

    #[test]
    fn rejects_bad_binary_digits() {
        assert!(LogicVec::from_binary_str("102").is_none());
        assert!(LogicVec::from_binary_str("__").is_none());
    }

    #[test]
    fn u64_conversion() {
        let v = LogicVec::from_u64(0b1011, 4);
        assert_eq!(v.to_u64(), Some(11));
        assert_eq!(LogicVec::from_u64(0xff, 4).to_u64(), Some(0xf));
        assert_eq!(LogicVec::filled(2, Logic::X).to_u64(), None);
        assert_eq!(LogicVec::zeros(65).to_u64(), None);
    }

    #[test]
    fn zero_extension_keeps_value() {
        let v = LogicVec::from_u64(5, 3).zero_extend(8);
        assert_eq!(v.width(), 8);
        assert_eq!(v.to_string(), "00000101");
    }

    #[test]
    fn concat_places_self_on_top() {
        let hi = LogicVec::from_binary_str("11").unwrap();
        let lo = LogicVec::from_binary_str("0x").unwrap();
        assert_eq!(hi.concat(&lo).to_string(), "110X");
    }

    #[test]
    fn zip_with_extends_narrow_operand() {
        let a = LogicVec::from_binary_str("1100").unwrap();
        let b = LogicVec::from_binary_str("11").unwrap();
        assert_eq!(a.zip_with(&b, |x, y| x | y).to_string(), "1111");
        assert_eq!(a.zip_with(&b, |x, y| x & y).to_string(), "0000");
    }

    #[test]
    fn complement_keeps_width() {
        let v = LogicVec::from_binary_str("10z").unwrap().complement();
        assert_eq!(v.to_string(), "01X");
    }

    #[test]
    fn debug_shows_width() {
        let v = LogicVec::from_u64(1, 2);
        assert_eq!(format!("{v:?}"), "2'b01");
    }

    #[test]
    fn serde_roundtrip() {
        let v = LogicVec::from_binary_str("10xz0110").unwrap();
        let json = serde_json::to_string(&v).unwrap();
        let back: LogicVec = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
