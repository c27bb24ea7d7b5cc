use std::mem;

use serde::{Deserialize, Serialize};

use finance::percent::Percent;
use sdk::{
    cosmwasm_std::Storage,
    cw_storage_plus::Item,
    schemars::{self, JsonSchema},
};

use crate::{
    error::{ContractError, Result},
    interest::{self, InterestModel},
};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Eq, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    minimum_collateral_ratio: Percent,
    block_unit_scale: u64,
    interest_model: InterestModel,
}

impl Config {
    const STORAGE: Item<Config> = Item::new("config");

    pub fn try_new(
        minimum_collateral_ratio: Percent,
        block_unit_scale: u64,
        interest_model: InterestModel,
    ) -> Result<Self> {
        check_collateral_ratio(minimum_collateral_ratio)?;
        if block_unit_scale == 0 {
            return Err(ContractError::InvalidBlockUnitScale(block_unit_scale));
        }

        Ok(Self {
            minimum_collateral_ratio,
            block_unit_scale,
            interest_model,
        })
    }

    pub const fn minimum_collateral_ratio(&self) -> Percent {
        self.minimum_collateral_ratio
    }

    pub const fn block_unit_scale(&self) -> u64 {
        self.block_unit_scale
    }

    pub const fn interest_model(&self) -> &InterestModel {
        &self.interest_model
    }

    pub const fn block_unit(&self, height: u64) -> u64 {
        interest::block_unit(height, self.block_unit_scale)
    }

    pub fn store(&self, storage: &mut dyn Storage) -> Result<()> {
        Self::STORAGE.save(storage, self).map_err(Into::into)
    }

    pub fn load(storage: &dyn Storage) -> Result<Self> {
        Self::STORAGE.load(storage).map_err(Into::into)
    }

    /// Return the previous ratio
    pub fn update_minimum_collateral_ratio(
        storage: &mut dyn Storage,
        ratio: Percent,
    ) -> Result<Percent> {
        check_collateral_ratio(ratio)?;

        let previous = Self::load(storage)?.minimum_collateral_ratio;
        Self::update_field(storage, |config| Self {
            minimum_collateral_ratio: ratio,
            ..config
        })
        .map(|()| previous)
    }

    pub fn update_interest_model(storage: &mut dyn Storage, model: InterestModel) -> Result<()> {
        Self::update_field(storage, |config| Self {
            interest_model: model,
            ..config
        })
    }

    fn update_field<F>(storage: &mut dyn Storage, f: F) -> Result<()>
    where
        F: FnOnce(Self) -> Self,
    {
        Self::STORAGE
            .update(storage, |config| Ok::<_, ContractError>(f(config)))
            .map(mem::drop)
    }
}

fn check_collateral_ratio(ratio: Percent) -> Result<()> {
    if ratio < Percent::HUNDRED {
        Err(ContractError::InvalidCollateralRatio(ratio))
    } else {
        Ok(())
    }
}
