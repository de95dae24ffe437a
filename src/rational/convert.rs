use crate::Rational;
use num::{BigInt, BigUint};

impl From<u64> for Rational {
    fn from(n: u64) -> Rational {
        Rational::from_bigint(BigInt::from(n))
    }
}

impl From<BigUint> for Rational {
    fn from(n: BigUint) -> Rational {
        Rational::from_bigint(BigInt::from(n))
    }
}
