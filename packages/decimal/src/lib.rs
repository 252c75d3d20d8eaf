// A lot of this code is taken from the cosmwasm-std crate, which is licensed under the Apache
// License 2.0 - https://github.com/CosmWasm/cosmwasm.

use core::{
    cmp::Ordering,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub},
};

mod text;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecimalError {
    #[error("denominator must not be zero")]
    DivideByZero,
    #[error("decimal arithmetic overflow")]
    Overflow,
    #[error("invalid decimal string: {0:?}")]
    Parse(String),
}

/// Signed fixed-point decimal with 18 fractional digits, backed by `i128` atomics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(i128);

impl Decimal {
    const DECIMAL_FRACTIONAL: i128 = 1_000_000_000_000_000_000; // 1*10**18
    /// The number of decimal places. Since decimal types are fixed-point rather than
    /// floating-point, this is a constant.
    pub const DECIMAL_PLACES: u32 = 18;

    pub const MAX: Self = Self(i128::MAX);
    pub const MIN: Self = Self(i128::MIN);

    /// Wraps raw atomics, i.e. `raw(1)` is `0.000000000000000001`.
    pub const fn raw(value: i128) -> Self {
        Self(value)
    }

    /// Create a 1.0 Decimal
    #[inline]
    pub const fn one() -> Self {
        Self(Self::DECIMAL_FRACTIONAL)
    }

    /// Create a 0.0 Decimal
    #[inline]
    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn from_int(value: i64) -> Self {
        Self(value as i128 * Self::DECIMAL_FRACTIONAL)
    }

    /// Convert x% into Decimal
    pub const fn percent(x: u64) -> Self {
        Self(x as i128 * 10_000_000_000_000_000)
    }

    /// Convert x‰ into Decimal
    pub const fn permille(x: u64) -> Self {
        Self(x as i128 * 1_000_000_000_000_000)
    }

    /// Convert basis points (x/10000) into Decimal
    pub const fn bps(x: u64) -> Self {
        Self(x as i128 * 100_000_000_000_000)
    }

    /// Converts an integer amount expressed in `decimal_places` fractional digits,
    /// e.g. token smallest units, into a Decimal. Digits beyond 18 places are truncated.
    ///
    /// ```
    /// use mlm_decimal::Decimal;
    /// // 1.5 tokens of an 18-decimals token
    /// let a = Decimal::from_atomics(1_500_000_000_000_000_000, 18).unwrap();
    /// assert_eq!(a, Decimal::percent(150));
    ///
    /// // 2.5 USDC (6 decimals)
    /// let b = Decimal::from_atomics(2_500_000, 6).unwrap();
    /// assert_eq!(b.to_string(), "2.5");
    /// ```
    pub fn from_atomics(atomics: u128, decimal_places: u32) -> Option<Self> {
        let atomics = i128::try_from(atomics).ok()?;
        match decimal_places.cmp(&Self::DECIMAL_PLACES) {
            Ordering::Less => {
                let factor = 10i128.checked_pow(Self::DECIMAL_PLACES - decimal_places)?;
                atomics.checked_mul(factor).map(Self)
            }
            Ordering::Equal => Some(Self(atomics)),
            Ordering::Greater => {
                // 10^39 no longer fits, everything truncates to zero
                let digits = decimal_places - Self::DECIMAL_PLACES;
                Some(
                    10i128
                        .checked_pow(digits)
                        .map_or(Self::zero(), |factor| Self(atomics / factor)),
                )
            }
        }
    }

    /// Returns `numerator / denominator`.
    ///
    /// Panics if the denominator is zero or the result does not fit.
    pub fn from_ratio(numerator: impl Into<i128>, denominator: impl Into<i128>) -> Self {
        match Decimal::checked_from_ratio(numerator, denominator) {
            Ok(ratio) => ratio,
            Err(DecimalError::DivideByZero) => panic!("Denominator must not be zero"),
            Err(_) => panic!("Multiplication overflow"),
        }
    }

    pub fn checked_from_ratio(
        numerator: impl Into<i128>,
        denominator: impl Into<i128>,
    ) -> Result<Self, DecimalError> {
        let numerator = numerator.into();
        let denominator = denominator.into();

        if denominator == 0 {
            return Err(DecimalError::DivideByZero);
        }

        numerator
            .checked_mul(Self::DECIMAL_FRACTIONAL)
            .map(|scaled| Self(scaled / denominator))
            .ok_or(DecimalError::Overflow)
    }

    /// The number of decimal places. This is a constant value for now
    /// but this could potentially change as the type evolves.
    ///
    /// See also [`Decimal::atomics()`].
    #[must_use]
    #[inline]
    pub const fn decimal_places(&self) -> u32 {
        Self::DECIMAL_PLACES
    }

    /// A decimal is an integer of atomic units plus a number that specifies the
    /// position of the decimal dot. So any decimal can be expressed as two numbers.
    ///
    /// ## Examples
    ///
    /// ```
    /// use mlm_decimal::Decimal;
    /// // Value with whole and fractional part
    /// let a = Decimal::percent(123);
    /// assert_eq!(a.decimal_places(), 18);
    /// assert_eq!(a.atomics(), 1230000000000000000);
    ///
    /// // Smallest possible value
    /// let b = Decimal::raw(1);
    /// assert_eq!(b.decimal_places(), 18);
    /// assert_eq!(b.atomics(), 1);
    /// ```
    #[must_use]
    #[inline]
    pub const fn atomics(&self) -> i128 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    pub fn abs_diff(self, other: Self) -> Self {
        if self > other {
            self - other
        } else {
            other - self
        }
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Fixed-point product, rounded toward zero. Returns `None` when the result
    /// does not fit.
    pub fn checked_mul(self, other: Self) -> Option<Self> {
        let negative = self.is_negative() != other.is_negative();
        let product = mul_floor(self.0.unsigned_abs(), other.0.unsigned_abs())?;
        let product = i128::try_from(product).ok()?;

        Some(Self(if negative { -product } else { product }))
    }

    /// Multiplies by a whole number.
    pub fn checked_mul_int(self, rhs: u64) -> Option<Self> {
        self.0.checked_mul(i128::from(rhs)).map(Self)
    }

    /// Returns `self * numerator / denominator`, rounded toward zero. The intermediate
    /// product is split on the denominator so it never exceeds the result's magnitude
    /// by more than `numerator`.
    pub fn multiply_ratio(self, numerator: u64, denominator: u64) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let numerator = i128::from(numerator);
        let denominator = i128::from(denominator);

        let quotient = self.0 / denominator;
        let remainder = self.0 % denominator;

        quotient
            .checked_mul(numerator)?
            .checked_add(remainder.checked_mul(numerator)? / denominator)
            .map(Self)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn saturating_mul(self, other: Self) -> Self {
        self.checked_mul(other).unwrap_or_else(|| {
            if self.is_negative() != other.is_negative() {
                Self::MIN
            } else {
                Self::MAX
            }
        })
    }
}

/// `a * b / 10^18` over unsigned atomics, split into 10^18 limbs so the intermediate
/// product never needs more than 128 bits.
fn mul_floor(a: u128, b: u128) -> Option<u128> {
    const FRACTIONAL: u128 = Decimal::DECIMAL_FRACTIONAL as u128;

    let (a_whole, a_fraction) = (a / FRACTIONAL, a % FRACTIONAL);
    let (b_whole, b_fraction) = (b / FRACTIONAL, b % FRACTIONAL);

    a_whole
        .checked_mul(b_whole)?
        .checked_mul(FRACTIONAL)?
        .checked_add(a_whole.checked_mul(b_fraction)?)?
        .checked_add(a_fraction.checked_mul(b_whole)?)?
        // both fractions are below 10^18, their product fits in u128
        .checked_add(a_fraction * b_fraction / FRACTIONAL)
}

impl Add for Decimal {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Decimal(self.0 + other.0)
    }
}

impl Sub for Decimal {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Decimal(self.0 - other.0)
    }
}

impl Mul for Decimal {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        match self.checked_mul(other) {
            Some(product) => product,
            None => panic!("attempt to multiply with overflow"),
        }
    }
}

impl Neg for Decimal {
    type Output = Self;

    fn neg(self) -> Self {
        Decimal(-self.0)
    }
}

impl Sum for Decimal {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Decimal::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Decimal> for Decimal {
    fn sum<I: Iterator<Item = &'a Decimal>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
