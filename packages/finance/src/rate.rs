use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use sdk::{
    cosmwasm_std::{Decimal256, OverflowError, Uint128, Uint256},
    schemars::{self, JsonSchema},
};

use crate::{
    coin::Amount,
    error::{Error, Result},
    percent::{Percent, Units},
    zero::Zero,
};

const ATOMICS_PER_BPS: u128 = 100_000_000_000_000;

/// A non-negative fraction with 18 decimal places
///
/// Interest rates are expressed as the fraction accrued per block unit.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(transparent)]
pub struct Rate(Decimal256);

impl Rate {
    pub const ZERO: Self = Self(Decimal256::zero());
    pub const ONE: Self = Self(Decimal256::one());

    pub const fn from_bps(bps: Units) -> Self {
        Self(Decimal256::raw(bps as u128 * ATOMICS_PER_BPS))
    }

    pub const fn from_atomics(atomics: Uint256) -> Self {
        Self(Decimal256::new(atomics))
    }

    pub fn from_ratio(numerator: Amount, denominator: Amount) -> Result<Self> {
        if denominator.is_zero() {
            Err(Error::division_by_zero("rate_from_ratio", numerator))
        } else {
            Decimal256::checked_from_ratio(numerator, denominator)
                .map(Self)
                .map_err(|_| Error::overflow("rate_from_ratio", numerator, denominator))
        }
    }

    pub const fn atomics(&self) -> Uint256 {
        self.0.atomics()
    }

    pub const fn decimal(&self) -> Decimal256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: Self) -> Result<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .map_err(|_| Error::overflow("rate_add", self, other))
    }

    pub fn checked_mul(self, other: Self) -> Result<Self> {
        self.0
            .checked_mul(other.0)
            .map(Self)
            .map_err(|_| Error::overflow("rate_mul", self, other))
    }

    pub fn checked_div(self, other: Self) -> Result<Self> {
        if other.is_zero() {
            Err(Error::division_by_zero("rate_div", self))
        } else {
            self.0
                .checked_div(other.0)
                .map(Self)
                .map_err(|_| Error::overflow("rate_div", self, other))
        }
    }

    /// Compute `self * numerator / denominator` in a single step, truncating the result
    pub fn checked_mul_ratio(self, numerator: Uint256, denominator: Uint256) -> Result<Self> {
        if denominator.is_zero() {
            Err(Error::division_by_zero("rate_mul_ratio", self))
        } else {
            self.atomics()
                .checked_multiply_ratio(numerator, denominator)
                .map(Self::from_atomics)
                .map_err(|_| Error::overflow("rate_mul_ratio", self, numerator))
        }
    }

    /// Compute `(1 + self) ^ periods`, by squaring
    ///
    /// Every product is checked, so a growth beyond the decimal range is an overflow.
    pub fn compound(self, periods: u64) -> Result<Decimal256> {
        let overflow = |_: OverflowError| Error::overflow("compound", self, periods);
        let mul = |lhs: Decimal256, rhs: Decimal256| lhs.checked_mul(rhs).map_err(overflow);

        if periods == 0 {
            return Ok(Decimal256::one());
        }

        let mut base = Decimal256::one().checked_add(self.0).map_err(overflow)?;
        let mut acc = Decimal256::one();
        let mut exp = periods;
        while exp > 1 {
            if exp % 2 == 1 {
                acc = mul(base, acc)?;
            }
            base = mul(base, base)?;
            exp /= 2;
        }
        mul(base, acc)
    }

    /// The rate in basis points, truncated
    pub fn to_bps(&self) -> Result<Units> {
        Uint128::try_from(self.atomics() / Uint256::from(ATOMICS_PER_BPS))
            .ok()
            .and_then(|bps| Units::try_from(bps.u128()).ok())
            .ok_or_else(|| Error::overflow("to_bps", self, ATOMICS_PER_BPS))
    }
}

impl Zero for Rate {
    const ZERO: Self = Self::ZERO;
}

impl From<Percent> for Rate {
    fn from(percent: Percent) -> Self {
        percent.to_rate()
    }
}

impl Display for Rate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}
