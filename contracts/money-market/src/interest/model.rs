use std::result::Result as StdResult;

use serde::{Deserialize, Serialize};

use finance::{
    coin::{self, Amount},
    percent::Percent,
    rate::Rate,
};
use sdk::schemars::{self, JsonSchema};

use crate::{error::Result, interest::Rates};

/// A kinked utilization curve
///
/// The borrow rate grows linearly with the borrow-to-cash factor up to the optimal
/// utilization and stays flat beyond it. The suppliers earn the borrow interest
/// spread over the whole pool, less the reserve.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "UncheckedInterestModel", rename_all = "snake_case")]
pub struct InterestModel {
    base_rate: Percent,
    utilization_optimal: Percent,
    addon_optimal_rate: Percent,
    reserve_factor: Percent,
}

impl InterestModel {
    pub fn new(
        base_rate: Percent,
        utilization_optimal: Percent,
        addon_optimal_rate: Percent,
        reserve_factor: Percent,
    ) -> Option<Self> {
        let value = Self {
            base_rate,
            utilization_optimal,
            addon_optimal_rate,
            reserve_factor,
        };

        value.validate().then_some(value)
    }

    pub const fn base_rate(&self) -> Percent {
        self.base_rate
    }

    pub const fn utilization_optimal(&self) -> Percent {
        self.utilization_optimal
    }

    pub const fn addon_optimal_rate(&self) -> Percent {
        self.addon_optimal_rate
    }

    pub const fn reserve_factor(&self) -> Percent {
        self.reserve_factor
    }

    pub fn rates(&self, cash: Amount, borrow: Amount) -> Result<Rates> {
        self.borrow_rate(cash, borrow).and_then(|borrow_rate| {
            self.supply_rate_impl(cash, borrow, borrow_rate)
                .map(|supply| Rates {
                    supply,
                    borrow: borrow_rate,
                })
        })
    }

    pub fn borrow_rate(&self, cash: Amount, borrow: Amount) -> Result<Rate> {
        if borrow.is_zero() {
            return Ok(Rate::ZERO);
        }

        let factor_max = Percent::HUNDRED
            .checked_sub(self.utilization_optimal)
            .ok_or_else(|| {
                finance::error::Error::overflow(
                    "utilization_complement",
                    Percent::HUNDRED,
                    self.utilization_optimal,
                )
            })
            .and_then(|complement| {
                Rate::from_ratio(
                    self.utilization_optimal.units().into(),
                    complement.units().into(),
                )
            })?;

        let factor = if cash.is_zero() {
            factor_max
        } else {
            Rate::from_ratio(borrow, cash)?.min(factor_max)
        };

        factor
            .checked_mul_ratio(
                self.addon_optimal_rate.units().into(),
                self.utilization_optimal.units().into(),
            )
            .and_then(|addon| addon.checked_add(self.base_rate.to_rate()))
            .map_err(Into::into)
    }

    pub fn supply_rate(&self, cash: Amount, borrow: Amount) -> Result<Rate> {
        self.borrow_rate(cash, borrow)
            .and_then(|borrow_rate| self.supply_rate_impl(cash, borrow, borrow_rate))
    }

    fn supply_rate_impl(&self, cash: Amount, borrow: Amount, borrow_rate: Rate) -> Result<Rate> {
        if borrow.is_zero() {
            return Ok(Rate::ZERO);
        }

        let supplied_share = Percent::HUNDRED
            .checked_sub(self.reserve_factor)
            .unwrap_or(Percent::ZERO);

        coin::checked_add(cash, borrow)
            .and_then(|pool| {
                borrow_rate.checked_mul_ratio(
                    borrow.full_mul(supplied_share.units()),
                    pool.full_mul(Percent::HUNDRED.units()),
                )
            })
            .map_err(Into::into)
    }

    fn validate(&self) -> bool {
        self.utilization_optimal > Percent::ZERO
            && self.utilization_optimal < Percent::HUNDRED
            && self.reserve_factor <= Percent::HUNDRED
    }
}

impl TryFrom<UncheckedInterestModel> for InterestModel {
    type Error = &'static str;

    fn try_from(value: UncheckedInterestModel) -> StdResult<Self, Self::Error> {
        Self::new(
            value.base_rate,
            value.utilization_optimal,
            value.addon_optimal_rate,
            value.reserve_factor,
        )
        .ok_or("The optimal utilization should be within (0%, 100%) and the reserve factor at most 100%!")
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
struct UncheckedInterestModel {
    base_rate: Percent,
    utilization_optimal: Percent,
    addon_optimal_rate: Percent,
    reserve_factor: Percent,
}
