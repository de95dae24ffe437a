use crate::Problem;
use num::bigint::Sign::{self, *};
use num::{BigInt, BigUint, Integer};
use num::{One, Zero};
use std::cmp::Ordering;

pub(crate) mod convert;
pub(crate) mod notation;

/// Ratio of two integers, always held in lowest terms
///
/// This type is functionally a [`Sign`] with a ratio between two [`BigUint`]
/// (the numerator and denominator). The denominator is never zero and shares no
/// factor with the numerator, zero is always `0/1` with no sign, so two values
/// are equal exactly when their fields are.
///
/// Every operation reduces its result straight away and no floating point value
/// is ever involved.
///
/// # Examples
///
/// Parsing the notation used on exercise sheets
/// ```
/// use fraction_drill::Rational;
/// let half: Rational = "1/2".parse().unwrap();
/// let mixed: Rational = "2'3/8".parse().unwrap();
/// assert_eq!(mixed, Rational::fraction(19, 8).unwrap());
/// ```
///
/// Simple arithmetic
/// ```
/// use fraction_drill::Rational;
/// let quarter = Rational::fraction(1, 4).unwrap();
/// let eighteen = Rational::new(18);
/// let two = Rational::one() + Rational::one();
/// let sixteen = eighteen - two;
/// let four = quarter * sixteen;
/// assert_eq!(four, Rational::new(4));
/// ```

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rational {
    sign: Sign,
    numerator: BigUint,
    denominator: BigUint,
}

impl Rational {
    /// Zero, the additive identity
    pub fn zero() -> Self {
        Self {
            sign: NoSign,
            numerator: BigUint::ZERO,
            denominator: BigUint::one(),
        }
    }

    /// One, the multiplicative identity
    pub fn one() -> Self {
        Self {
            sign: Plus,
            numerator: BigUint::one(),
            denominator: BigUint::one(),
        }
    }

    /// The Rational corresponding to the provided [`i64`]
    pub fn new(n: i64) -> Self {
        Self::from_bigint(BigInt::from(n))
    }

    /// The Rational corresponding to the provided [`BigInt`]
    pub fn from_bigint(n: BigInt) -> Self {
        let (sign, numerator) = n.into_parts();
        Self {
            sign,
            numerator,
            denominator: BigUint::one(),
        }
    }

    /// The Rational corresponding to the provided [`i64`]
    /// numerator and [`u64`] denominator as a fraction
    pub fn fraction(n: i64, d: u64) -> Result<Self, Problem> {
        Self::from_bigint_fraction(BigInt::from(n), BigUint::from(d))
    }

    /// The Rational corresponding to the provided [`BigInt`]
    /// numerator and [`BigUint`] denominator as a fraction
    pub fn from_bigint_fraction(n: BigInt, denominator: BigUint) -> Result<Self, Problem> {
        if denominator.is_zero() {
            return Err(Problem::DivideByZero);
        }
        let (sign, numerator) = n.into_parts();
        Ok(Self::reduce(Self {
            sign,
            numerator,
            denominator,
        }))
    }

    fn reduce(self) -> Self {
        if self.numerator.is_zero() {
            return Self::zero();
        }
        if self.denominator.is_one() {
            return self;
        }

        let divisor = self.numerator.gcd(&self.denominator);
        if divisor.is_one() {
            self
        } else {
            Self {
                sign: self.sign,
                numerator: self.numerator / &divisor,
                denominator: self.denominator / &divisor,
            }
        }
    }

    /// The inverse of this Rational, or [`Problem::DivideByZero`] for zero
    ///
    /// # Example
    ///
    /// ```
    /// use fraction_drill::Rational;
    /// let five = Rational::new(5);
    /// let a_fifth = Rational::fraction(1, 5).unwrap();
    /// assert_eq!(five.clone().inverse(), Ok(a_fifth.clone()));
    /// assert_eq!(a_fifth.inverse(), Ok(five));
    /// assert!(Rational::zero().inverse().is_err());
    /// ```
    pub fn inverse(self) -> Result<Self, Problem> {
        if self.sign == NoSign {
            return Err(Problem::DivideByZero);
        }
        Ok(Self {
            sign: self.sign,
            numerator: self.denominator,
            denominator: self.numerator,
        })
    }

    /// Divide by `other`, failing rather than producing an undefined value
    ///
    /// # Example
    ///
    /// ```
    /// use fraction_drill::{Problem, Rational};
    /// let three = Rational::new(3);
    /// let six = Rational::new(6);
    /// assert_eq!(three.clone().checked_div(six), Rational::fraction(1, 2));
    /// assert_eq!(three.checked_div(Rational::zero()), Err(Problem::DivideByZero));
    /// ```
    pub fn checked_div(self, other: Self) -> Result<Self, Problem> {
        Ok(self * other.inverse()?)
    }

    /// Checks if the value is an integer
    ///
    /// # Example
    ///
    /// ```
    /// use fraction_drill::Rational;
    /// assert!(Rational::new(5).is_integer());
    /// assert!(Rational::fraction(16, 4).unwrap().is_integer());
    /// assert!(!Rational::fraction(5, 4).unwrap().is_integer());
    /// ```
    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    pub fn is_zero(&self) -> bool {
        self.sign == NoSign
    }

    pub fn is_negative(&self) -> bool {
        self.sign == Minus
    }

    /// The integer part of this Rational
    ///
    /// Non integer rationals will thus be truncated towards zero, which for
    /// the non-negative values on exercise sheets is the floor.
    ///
    /// # Example
    ///
    /// ```
    /// use fraction_drill::Rational;
    /// let approx_pi = Rational::fraction(22, 7).unwrap();
    /// assert_eq!(approx_pi.trunc(), Rational::new(3));
    /// ```
    pub fn trunc(&self) -> Self {
        if self.is_integer() {
            return self.clone();
        }
        Self::from_bigint(BigInt::from_biguint(
            self.sign,
            &self.numerator / &self.denominator,
        ))
    }

    /// The fractional part of this Rational
    ///
    /// If the rational was negative, this fraction will also be negative
    ///
    /// # Example
    ///
    /// ```
    /// use fraction_drill::Rational;
    /// let approx_pi = Rational::fraction(22, 7).unwrap();
    /// let a_seventh = Rational::fraction(1, 7).unwrap();
    /// assert_eq!(approx_pi.fract(), a_seventh);
    /// ```
    pub fn fract(&self) -> Self {
        if self.is_integer() {
            return Self::zero();
        }
        // Already coprime with the denominator, no reduction needed
        Self {
            sign: self.sign,
            numerator: &self.numerator % &self.denominator,
            denominator: self.denominator.clone(),
        }
    }

    /// The absolute value
    pub fn abs(&self) -> Self {
        match self.sign {
            Minus => -self.clone(),
            _ => self.clone(),
        }
    }

    pub fn numerator(&self) -> &BigUint {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigUint {
        &self.denominator
    }

}

use core::ops::*;

impl Add for Rational {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let denominator = &self.denominator * &other.denominator;
        let a = self.numerator * other.denominator;
        let b = other.numerator * self.denominator;
        let (sign, numerator) = match (self.sign, other.sign) {
            (any, NoSign) => (any, a),
            (NoSign, any) => (any, b),
            (Plus, Plus) => (Plus, a + b),
            (Minus, Minus) => (Minus, a + b),
            (x, y) => match a.cmp(&b) {
                Ordering::Greater => (x, a - b),
                Ordering::Equal => {
                    return Self::zero();
                }
                Ordering::Less => (y, b - a),
            },
        };
        Self::reduce(Self {
            sign,
            numerator,
            denominator,
        })
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            sign: -self.sign,
            ..self
        }
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + -other
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let sign = self.sign * other.sign;
        let numerator = self.numerator * other.numerator;
        let denominator = self.denominator * other.denominator;
        Self::reduce(Self {
            sign,
            numerator,
            denominator,
        })
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Ordering::Equal => (),
            unequal => return unequal,
        }
        let (left, right) = if self.denominator == other.denominator {
            (self.numerator.clone(), other.numerator.clone())
        } else {
            (
                &self.numerator * &other.denominator,
                &other.numerator * &self.denominator,
            )
        };
        match self.sign {
            Plus => left.cmp(&right),
            Minus => right.cmp(&left),
            NoSign => Ordering::Equal,
        }
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
