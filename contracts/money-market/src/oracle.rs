use serde::{Deserialize, Serialize};

use currency::Asset;
use finance::{coin::Amount, price::Price};
use sdk::{
    cosmwasm_std::{Order, StdResult, Storage},
    cw_storage_plus::Map,
    schemars::{self, JsonSchema},
};

use crate::error::{ContractError, Result};

const PRICES: Map<&Asset, PriceEntry> = Map::new("oracle_prices");

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct PriceEntry {
    pub value: Price,
    pub last_updated: u64,
}

/// Set the price of `asset` as observed at `height`
///
/// Return whether the asset has been priced for the first time.
pub fn set_asset_value(
    storage: &mut dyn Storage,
    asset: &Asset,
    value: Price,
    height: u64,
) -> Result<bool> {
    if value.is_zero() {
        return Err(ContractError::ZeroPrice(asset.clone()));
    }

    let listed = PRICES.has(storage, asset);
    PRICES
        .save(
            storage,
            asset,
            &PriceEntry {
                value,
                last_updated: height,
            },
        )
        .map(|()| !listed)
        .map_err(Into::into)
}

pub fn price(storage: &dyn Storage, asset: &Asset) -> Result<Option<PriceEntry>> {
    PRICES.may_load(storage, asset).map_err(Into::into)
}

/// The base value of `amount` units of `asset`, zero if not priced
pub fn asset_value(storage: &dyn Storage, asset: &Asset, amount: Amount) -> Result<Amount> {
    price(storage, asset).and_then(|entry| {
        entry.map_or(Ok(Amount::zero()), |entry| {
            entry.value.total(amount).map_err(Into::into)
        })
    })
}

/// The amount of `dst` worth `amount` units of `src`, zero if either is not priced
pub fn converted_asset_value(
    storage: &dyn Storage,
    src: &Asset,
    amount: Amount,
    dst: &Asset,
) -> Result<Amount> {
    match (price(storage, src)?, price(storage, dst)?) {
        (Some(src), Some(dst)) => src.value.convert(amount, dst.value).map_err(Into::into),
        _ => Ok(Amount::zero()),
    }
}

/// Every asset ever priced, in ascending order
pub fn supported_assets(storage: &dyn Storage) -> Result<Vec<Asset>> {
    PRICES
        .keys(storage, None, None, Order::Ascending)
        .collect::<StdResult<_>>()
        .map_err(Into::into)
}
