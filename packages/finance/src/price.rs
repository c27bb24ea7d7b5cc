use serde::{Deserialize, Serialize};

use sdk::schemars::{self, JsonSchema};

use crate::{
    coin::Amount,
    error::{Error, Result},
};

/// The value of one unit of an asset, in base currency units
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Price(Amount);

impl Price {
    pub const fn new(value: Amount) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> Amount {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The base value of `amount` units
    pub fn total(&self, amount: Amount) -> Result<Amount> {
        amount
            .checked_mul(self.0)
            .map_err(|_| Error::overflow("price_total", amount, self))
    }

    /// Convert `amount` units priced at `self` into units priced at `to`
    ///
    /// The multiplication is carried out in 256 bits before the truncating division.
    pub fn convert(&self, amount: Amount, to: Self) -> Result<Amount> {
        if to.is_zero() {
            Err(Error::division_by_zero("price_convert", amount))
        } else {
            amount
                .checked_multiply_ratio(self.0, to.0)
                .map_err(|_| Error::overflow("price_convert", amount, self))
        }
    }
}
