//! The textual notation used on exercise and answer sheets
//!
//! Whole numbers are written as decimal digits, values between zero and one as
//! `n/d`, and larger values as a mixed number `w'n/d`. Parsing accepts exactly
//! these three shapes, so anything [`Display`](fmt::Display) writes for a
//! non-negative value parses back to the same value.

use crate::{Problem, Rational};
use core::fmt;
use num::{BigInt, BigUint};

/// Separates the whole part of a mixed number from its fraction
pub const MIXED_SEPARATOR: char = '\'';

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            let int = self.numerator().to_string();
            return f.pad_integral(!self.is_negative(), "", &int);
        }

        if self.is_negative() {
            f.write_str("-")?;
        }
        let magnitude = self.abs();
        let whole = magnitude.trunc();
        let part = magnitude.fract();
        if whole.is_zero() {
            write!(f, "{}/{}", part.numerator(), part.denominator())
        } else {
            write!(
                f,
                "{}{MIXED_SEPARATOR}{}/{}",
                whole.numerator(),
                part.numerator(),
                part.denominator()
            )
        }
    }
}

// Only ASCII digits, BigUint would otherwise also take '+' and '_'
fn digits(s: &str) -> Result<BigUint, Problem> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Problem::MalformedNumber);
    }
    BigUint::parse_bytes(s.as_bytes(), 10).ok_or(Problem::MalformedNumber)
}

fn fraction(s: &str) -> Result<Rational, Problem> {
    let (n, d) = s.split_once('/').ok_or(Problem::MalformedNumber)?;
    let numerator = digits(n)?;
    let denominator = digits(d)?;
    Rational::from_bigint_fraction(BigInt::from(numerator), denominator)
        .map_err(|_| Problem::MalformedNumber)
}

impl std::str::FromStr for Rational {
    type Err = Problem;

    fn from_str(s: &str) -> Result<Self, Problem> {
        if let Some((whole, rest)) = s.split_once(MIXED_SEPARATOR) {
            let whole = Rational::from(digits(whole)?);
            Ok(whole + fraction(rest)?)
        } else if s.contains('/') {
            fraction(s)
        } else {
            Ok(Rational::from(digits(s)?))
        }
    }
}
