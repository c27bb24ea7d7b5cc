use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use sdk::{
    cosmwasm_std::{Decimal256, Uint128, Uint256},
    schemars::{self, JsonSchema},
};

use crate::{
    coin::Amount,
    error::{Error, Result},
    rate::Rate,
};

/// A cumulative multiplicative interest factor
///
/// Starts at one and only grows as interest compounds over time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Index(Decimal256);

impl Index {
    pub const ONE: Self = Self(Decimal256::one());

    pub fn compound(self, rate: Rate, periods: u64) -> Result<Self> {
        rate.compound(periods).and_then(|growth| {
            self.0
                .checked_mul(growth)
                .map(Self)
                .map_err(|_| Error::overflow("index_compound", self, growth))
        })
    }

    /// Project `amount`, last accrued at `since`, to this index
    ///
    /// The result is `amount * self / since`, truncated.
    pub fn grow(&self, amount: Amount, since: Self) -> Result<Amount> {
        if since.0.is_zero() {
            return Err(Error::division_by_zero("index_grow", amount));
        }

        Uint256::from(amount)
            .checked_multiply_ratio(self.0.atomics(), since.0.atomics())
            .ok()
            .and_then(|grown| Uint128::try_from(grown).ok())
            .ok_or_else(|| Error::overflow("index_grow", amount, self))
    }

    pub const fn decimal(&self) -> Decimal256 {
        self.0
    }
}

impl Default for Index {
    fn default() -> Self {
        Self::ONE
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}
