use currency::Asset;
use finance::coin::{self, Amount};
use sdk::cosmwasm_std::{Addr, Storage};

use crate::{
    error::{ContractError, Result},
    interest,
    ledger::{BalanceSheet, Category, Position},
    oracle,
    state::Config,
};

/// The base value of a customer's positions, interest included
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct Valuation {
    supplied: Amount,
    borrowed: Amount,
}

impl Valuation {
    fn value_equivalent(&self) -> Amount {
        self.supplied.saturating_sub(self.borrowed)
    }

    fn add(self, category: Category, value: Amount) -> Result<Self> {
        let added = if category == Category::Borrow {
            coin::checked_add(self.borrowed, value).map(|borrowed| Self { borrowed, ..self })
        } else {
            coin::checked_add(self.supplied, value).map(|supplied| Self { supplied, ..self })
        };
        added.map_err(Into::into)
    }

    fn max_borrow(&self, config: &Config) -> Result<Amount> {
        config
            .minimum_collateral_ratio()
            .of(self.value_equivalent())
            .map_err(Into::into)
    }
}

/// The supplied value less the borrowed value, floored at zero
pub fn value_equivalent(storage: &dyn Storage, customer: &Addr, height: u64) -> Result<Amount> {
    Config::load(storage)
        .and_then(|config| valuation(storage, customer, &config, height))
        .map(|valuation| valuation.value_equivalent())
}

/// The value equivalent scaled by the minimum collateral ratio
pub fn max_borrow_available(
    storage: &dyn Storage,
    customer: &Addr,
    height: u64,
) -> Result<Amount> {
    Config::load(storage).and_then(|config| {
        valuation(storage, customer, &config, height)
            .and_then(|valuation| valuation.max_borrow(&config))
    })
}

pub(super) fn check(
    storage: &dyn Storage,
    customer: &Addr,
    config: &Config,
    height: u64,
) -> Result<()> {
    let valuation = valuation(storage, customer, config, height)?;
    let max_borrow_value = valuation.max_borrow(config)?;

    if valuation.borrowed <= max_borrow_value {
        Ok(())
    } else {
        Err(ContractError::InsufficientCollateral {
            borrowed_value: valuation.borrowed,
            max_borrow_value,
            ratio: config.minimum_collateral_ratio(),
        })
    }
}

fn valuation(
    storage: &dyn Storage,
    customer: &Addr,
    config: &Config,
    height: u64,
) -> Result<Valuation> {
    let block_unit = config.block_unit(height);

    BalanceSheet::positions(storage, customer)?
        .into_iter()
        .filter(|(_, _, position)| !position.is_empty())
        .try_fold(Valuation::default(), |valuation, (asset, category, position)| {
            projected_value(storage, &asset, category, &position, block_unit)
                .and_then(|value| valuation.add(category, value))
        })
}

fn projected_value(
    storage: &dyn Storage,
    asset: &Asset,
    category: Category,
    position: &Position,
    block_unit: u64,
) -> Result<Amount> {
    let indices = interest::storage::compounded_index(storage, asset, block_unit)?;
    let index = if category == Category::Borrow {
        indices.borrow
    } else {
        indices.supply
    };

    let projected = match position.checkpoint {
        Some(checkpoint) => index.grow(position.amount, checkpoint.index)?,
        None => position.amount,
    };
    oracle::asset_value(storage, asset, projected)
}
