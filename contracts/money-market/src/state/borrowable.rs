use currency::Asset;
use sdk::{
    cosmwasm_std::{Order, StdResult, Storage},
    cw_storage_plus::Map,
};

use crate::error::Result;

const BORROWABLE: Map<&Asset, ()> = Map::new("borrowable_assets");

/// Return whether the asset has been newly added
pub fn add(storage: &mut dyn Storage, asset: &Asset) -> Result<bool> {
    if BORROWABLE.has(storage, asset) {
        Ok(false)
    } else {
        BORROWABLE
            .save(storage, asset, &())
            .map(|()| true)
            .map_err(Into::into)
    }
}

pub fn contains(storage: &dyn Storage, asset: &Asset) -> bool {
    BORROWABLE.has(storage, asset)
}

pub fn assets(storage: &dyn Storage) -> Result<Vec<Asset>> {
    BORROWABLE
        .keys(storage, None, None, Order::Ascending)
        .collect::<StdResult<_>>()
        .map_err(Into::into)
}
