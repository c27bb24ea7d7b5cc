use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use currency::Asset;
use finance::index::Index;
use sdk::{
    cosmwasm_std::{Order, Storage},
    cw_storage_plus::{Bound, Map},
    schemars::{self, JsonSchema},
};

use crate::{
    error::{ContractError, Result},
    interest::Rates,
};

const SNAPSHOTS: Map<(&Asset, u64), Snapshot> = Map::new("interest_snapshots");

/// The bucket a block height falls in
pub const fn block_unit(height: u64, scale: u64) -> u64 {
    match height.checked_div(scale) {
        Some(unit) => unit,
        None => height,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct Indices {
    pub supply: Index,
    pub borrow: Index,
}

impl Indices {
    pub const IDENTITY: Self = Self {
        supply: Index::ONE,
        borrow: Index::ONE,
    };

    fn compound(&self, rates: &Rates, periods: u64) -> Result<Self> {
        Ok(Self {
            supply: self.supply.compound(rates.supply, periods)?,
            borrow: self.borrow.compound(rates.borrow, periods)?,
        })
    }
}

impl Default for Indices {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct Snapshot {
    pub rates: Rates,
    /// The compounding indices at the opening of the bucket
    pub indices: Indices,
}

/// The outcome of a rate snapshot
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SnapshotUpdate {
    pub block_unit: u64,
    pub snapshot: Snapshot,
    pub rates_changed: bool,
}

/// Record `rates` as the current rates of `asset` in `block_unit`
///
/// Opening a bucket compounds the indices of the latest bucket over the gap,
/// each at its own rate. Within an open bucket only the rates are overwritten.
pub fn snapshot_current_rate(
    storage: &mut dyn Storage,
    asset: &Asset,
    rates: Rates,
    block_unit: u64,
) -> Result<SnapshotUpdate> {
    let (previous_rates, indices) = match latest(storage, asset)? {
        None => (Rates::default(), Indices::IDENTITY),
        Some((latest_unit, latest)) => match latest_unit.cmp(&block_unit) {
            Ordering::Equal => (latest.rates, latest.indices),
            Ordering::Less => (
                latest.rates,
                latest
                    .indices
                    .compound(&latest.rates, block_unit - latest_unit)?,
            ),
            Ordering::Greater => {
                return Err(ContractError::ClosedBucket {
                    asset: asset.clone(),
                    bucket: block_unit,
                    latest: latest_unit,
                })
            }
        },
    };

    let snapshot = Snapshot { rates, indices };
    let stored = SNAPSHOTS.may_load(storage, (asset, block_unit))?;
    if stored != Some(snapshot) {
        SNAPSHOTS.save(storage, (asset, block_unit), &snapshot)?;
    }

    Ok(SnapshotUpdate {
        block_unit,
        snapshot,
        rates_changed: previous_rates != rates,
    })
}

/// The most recent bucket of `asset`
pub fn latest(storage: &dyn Storage, asset: &Asset) -> Result<Option<(u64, Snapshot)>> {
    SNAPSHOTS
        .prefix(asset)
        .range(storage, None, None, Order::Descending)
        .next()
        .transpose()
        .map_err(Into::into)
}

/// The compounding indices of `asset` at `block_unit`
///
/// Taken from the latest bucket at or before `block_unit`, projected forward at
/// that bucket's rates. The identity if no bucket exists yet.
pub fn compounded_index(storage: &dyn Storage, asset: &Asset, block_unit: u64) -> Result<Indices> {
    SNAPSHOTS
        .prefix(asset)
        .range(
            storage,
            None,
            Some(Bound::inclusive(block_unit)),
            Order::Descending,
        )
        .next()
        .transpose()
        .map_err(ContractError::from)
        .and_then(|found| {
            found.map_or(Ok(Indices::IDENTITY), |(unit, snapshot)| {
                snapshot
                    .indices
                    .compound(&snapshot.rates, block_unit - unit)
            })
        })
}
