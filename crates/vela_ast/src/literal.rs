//! Numeric literals as they appear in port initializers.

use serde::{Deserialize, Serialize};
use vela_common::{Logic, LogicVec};

/// A literal initializer value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    /// Plain decimal such as `1` or `42`. Its width is the number of bits
    /// needed to hold the value (at least one).
    Unsized(u64),
    /// A literal with an explicit bit pattern and width: `4'b10x1`, `8'hff`,
    /// or an unsized based literal such as `'b101` (three bits).
    Sized(LogicVec),
    /// `'0`, `'1`, `'x`, `'z`: every bit of the target gets this value.
    Fill(Logic),
}

impl Literal {
    /// Width of the literal, `None` for fill literals which adapt to the target.
    pub fn width(&self) -> Option<u32> {
        match self {
            Literal::Unsized(v) => Some(minimal_width(*v)),
            Literal::Sized(bits) => Some(bits.width()),
            Literal::Fill(_) => None,
        }
    }

    /// Parses literal source text.
    ///
    /// Accepts plain decimal (`12`), sized and unsized based literals with
    /// bases `b`, `o`, `d`, `h` (`4'b1010`, `8'hF0`, `'o17`, `16'sd5`), fill
    /// literals (`'1`) and `_` separators. `x`/`z`/`?` digits are allowed in
    /// binary, octal and hex. Digits that do not fit the declared size are
    /// rejected unless they are leading zeros.
    pub fn parse(text: &str) -> Option<Self> {
        let text: String = text.chars().filter(|&c| c != '_').collect();
        let Some((size, rest)) = text.split_once('\'') else {
            return text.parse().ok().map(Literal::Unsized);
        };

        if size.is_empty() && rest.chars().count() == 1 {
            return rest.chars().next().and_then(Logic::from_char).map(Literal::Fill);
        }

        let size = match size {
            "" => None,
            s => Some(s.parse::<u32>().ok().filter(|&w| w > 0)?),
        };
        let rest = rest.strip_prefix(['s', 'S']).unwrap_or(rest);
        let mut chars = rest.chars();
        let base = chars.next()?.to_ascii_lowercase();
        let digits = chars.as_str();
        if digits.is_empty() {
            return None;
        }

        let bits = match base {
            'b' => expand_digits(digits, 1)?,
            'o' => expand_digits(digits, 3)?,
            'h' => expand_digits(digits, 4)?,
            'd' => {
                let value: u64 = digits.parse().ok()?;
                let width = size.unwrap_or_else(|| minimal_width(value));
                if minimal_width(value) > width {
                    return None;
                }
                return Some(Literal::Sized(LogicVec::from_u64(value, width)));
            }
            _ => return None,
        };
        Some(Literal::Sized(fit(bits, size)?))
    }
}

impl From<u64> for Literal {
    fn from(value: u64) -> Self {
        Literal::Unsized(value)
    }
}

/// Bits needed to represent `value`; zero still takes one bit.
pub fn minimal_width(value: u64) -> u32 {
    (u64::BITS - value.leading_zeros()).max(1)
}

/// Expands each digit into `bits_per_digit` logic values, MSB first.
fn expand_digits(digits: &str, bits_per_digit: u32) -> Option<Vec<Logic>> {
    let mut out = Vec::with_capacity(digits.len() * bits_per_digit as usize);
    for c in digits.chars() {
        if let Some(special) = Logic::from_char(c).filter(|l| !l.is_known()) {
            out.extend(std::iter::repeat(special).take(bits_per_digit as usize));
            continue;
        }
        let value = c.to_digit(1 << bits_per_digit)?;
        out.extend((0..bits_per_digit).rev().map(|i| Logic::from((value >> i) & 1 == 1)));
    }
    Some(out)
}

/// Sizes an MSB-first bit list to `size`.
///
/// Extra leading bits must be zero. Short lists are padded with zeros, or
/// with `X`/`Z` when the leftmost digit is `X`/`Z`.
fn fit(mut bits: Vec<Logic>, size: Option<u32>) -> Option<LogicVec> {
    if let Some(size) = size.map(|s| s as usize) {
        if bits.len() > size {
            let excess = bits.len() - size;
            if bits[..excess].iter().any(|&b| b != Logic::Zero) {
                return None;
            }
            bits.drain(..excess);
        } else if bits.len() < size {
            let pad = match bits.first() {
                Some(&b) if !b.is_known() => b,
                _ => Logic::Zero,
            };
            let mut padded = vec![pad; size - bits.len()];
            padded.append(&mut bits);
            bits = padded;
        }
    }
    let mut v = LogicVec::zeros(bits.len() as u32);
    for (i, bit) in bits.into_iter().rev().enumerate() {
        v.set(i as u32, bit);
    }
    Some(v)
}
