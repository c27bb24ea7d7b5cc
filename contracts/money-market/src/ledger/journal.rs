use serde::{Deserialize, Serialize};

use currency::Asset;
use finance::{coin::Amount, percent::Units};
use sdk::{
    cosmwasm_std::{Addr, Order, StdResult, Storage},
    cw_storage_plus::{Bound, Item, Map},
    schemars::{self, JsonSchema},
};

use crate::{
    error::Result,
    ledger::{Category, Direction},
};

const ENTRIES: Map<u64, LedgerEntry> = Map::new("ledger_entries");
const LAST_ENTRY_ID: Item<u64> = Item::new("ledger_last_entry_id");

const DEFAULT_PAGE_LIMIT: u32 = 30;
const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    CustomerSupply,
    CustomerWithdrawal,
    CustomerBorrow,
    CustomerRepay,
    Interest,
}

impl Reason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CustomerSupply => "customer_supply",
            Self::CustomerWithdrawal => "customer_withdrawal",
            Self::CustomerBorrow => "customer_borrow",
            Self::CustomerRepay => "customer_repay",
            Self::Interest => "interest",
        }
    }
}

/// An immutable record of one side of a balanced move
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct LedgerEntry {
    pub id: u64,
    pub reason: Reason,
    pub direction: Direction,
    pub category: Category,
    pub customer: Addr,
    pub asset: Asset,
    pub amount: Amount,
    /// The balance of the affected account after this entry
    ///
    /// That is the customer position for customer-tracked categories, and the
    /// asset total otherwise.
    pub balance: Amount,
    /// The rate in effect before the move changed the utilization
    pub interest_rate_bps: Units,
    pub next_payment_height: Option<u64>,
    pub height: u64,
}

pub(super) fn next_id(storage: &dyn Storage) -> Result<u64> {
    LAST_ENTRY_ID
        .may_load(storage)
        .map(|last| last.map_or(0, |id| id + 1))
        .map_err(Into::into)
}

pub(super) fn record(storage: &mut dyn Storage, entry: &LedgerEntry) -> Result<()> {
    debug_assert_eq!(Ok(entry.id), next_id(storage));

    ENTRIES
        .save(storage, entry.id, entry)
        .and_then(|()| LAST_ENTRY_ID.save(storage, &entry.id))
        .map_err(Into::into)
}

pub fn entries(
    storage: &dyn Storage,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> Result<Vec<LedgerEntry>> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT);

    ENTRIES
        .range(
            storage,
            start_after.map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .take(limit as usize)
        .map(|record| record.map(|(_, entry)| entry))
        .collect::<StdResult<_>>()
        .map_err(Into::into)
}
