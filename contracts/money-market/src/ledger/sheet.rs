use serde::{Deserialize, Serialize};

use currency::Asset;
use finance::{coin::Amount, index::Index, percent::Units};
use sdk::{
    cosmwasm_std::{Addr, Order, StdError, Storage},
    cw_storage_plus::Map,
    schemars::{self, JsonSchema},
};

use crate::{
    error::{ContractError, Result},
    ledger::{journal, Category, Direction, LedgerEntry, Reason},
};

const TOTALS: Map<(&Asset, u8), Amount> = Map::new("ledger_totals");
const POSITIONS: Map<(&Addr, &Asset, u8), Position> = Map::new("ledger_positions");

/// The height and the compounding index at which a position was last accrued
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct Checkpoint {
    pub height: u64,
    pub index: Index,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct Position {
    pub amount: Amount,
    pub checkpoint: Option<Checkpoint>,
}

/// A balanced move of `amount` from the `credit` into the `debit` account
pub struct Posting<'a> {
    pub reason: Reason,
    pub customer: &'a Addr,
    pub asset: &'a Asset,
    pub amount: Amount,
    pub debit: Category,
    pub credit: Category,
    pub interest_rate_bps: Units,
    pub next_payment_height: Option<u64>,
}

pub struct BalanceSheet<'storage> {
    storage: &'storage mut dyn Storage,
    height: u64,
}

impl<'storage> BalanceSheet<'storage> {
    pub fn new(storage: &'storage mut dyn Storage, height: u64) -> Self {
        Self { storage, height }
    }

    pub fn total(storage: &dyn Storage, asset: &Asset, category: Category) -> Result<Amount> {
        TOTALS
            .may_load(storage, (asset, category.code()))
            .map(Option::unwrap_or_default)
            .map_err(Into::into)
    }

    pub fn position(
        storage: &dyn Storage,
        customer: &Addr,
        asset: &Asset,
        category: Category,
    ) -> Result<Position> {
        debug_assert!(category.is_customer_tracked());

        POSITIONS
            .may_load(storage, (customer, asset, category.code()))
            .map(Option::unwrap_or_default)
            .map_err(Into::into)
    }

    /// All positions of a customer, ordered by asset and category
    pub fn positions(
        storage: &dyn Storage,
        customer: &Addr,
    ) -> Result<Vec<(Asset, Category, Position)>> {
        POSITIONS
            .sub_prefix(customer)
            .range(storage, None, None, Order::Ascending)
            .map(|record| {
                record.map_err(Into::into).and_then(|((asset, code), position)| {
                    Category::from_code(code)
                        .map(|category| (asset, category, position))
                        .ok_or_else(|| {
                            ContractError::Std(StdError::generic_err(format!(
                                "Invalid ledger category code {code}"
                            )))
                        })
                })
            })
            .collect()
    }

    pub fn save_checkpoint(
        &mut self,
        customer: &Addr,
        asset: &Asset,
        category: Category,
        checkpoint: Checkpoint,
    ) -> Result<()> {
        Self::position(self.storage, customer, asset, category).and_then(|position| {
            POSITIONS
                .save(
                    self.storage,
                    (customer, asset, category.code()),
                    &Position {
                        checkpoint: Some(checkpoint),
                        ..position
                    },
                )
                .map_err(Into::into)
        })
    }

    /// Apply both sides of the posting and record them in the journal
    ///
    /// Either both sides are applied or, on a failed checked operation, none.
    pub fn post(&mut self, posting: Posting<'_>) -> Result<[LedgerEntry; 2]> {
        debug_assert_ne!(posting.debit, posting.credit);

        let debit = self.prepare(&posting, Direction::Debit, posting.debit)?;
        let credit = self.prepare(&posting, Direction::Credit, posting.credit)?;

        let first_id = journal::next_id(self.storage)?;
        let debit = self.apply(&posting, debit, first_id)?;
        let credit = self.apply(&posting, credit, first_id + 1)?;
        Ok([debit, credit])
    }

    fn prepare(
        &self,
        posting: &Posting<'_>,
        direction: Direction,
        category: Category,
    ) -> Result<Side> {
        let total = Self::total(self.storage, posting.asset, category)
            .and_then(|total| change(posting.asset, category, direction, total, posting.amount))?;

        let position = if category.is_customer_tracked() {
            Self::position(self.storage, posting.customer, posting.asset, category)
                .and_then(|position| {
                    change(
                        posting.asset,
                        category,
                        direction,
                        position.amount,
                        posting.amount,
                    )
                    .map(|amount| Position { amount, ..position })
                })
                .map(Some)?
        } else {
            None
        };

        Ok(Side {
            direction,
            category,
            total,
            position,
        })
    }

    fn apply(&mut self, posting: &Posting<'_>, side: Side, id: u64) -> Result<LedgerEntry> {
        TOTALS.save(
            self.storage,
            (posting.asset, side.category.code()),
            &side.total,
        )?;

        let balance = if let Some(position) = side.position {
            POSITIONS.save(
                self.storage,
                (posting.customer, posting.asset, side.category.code()),
                &position,
            )?;
            position.amount
        } else {
            side.total
        };

        let entry = LedgerEntry {
            id,
            reason: posting.reason,
            direction: side.direction,
            category: side.category,
            customer: posting.customer.clone(),
            asset: posting.asset.clone(),
            amount: posting.amount,
            balance,
            interest_rate_bps: posting.interest_rate_bps,
            next_payment_height: posting.next_payment_height,
            height: self.height,
        };
        journal::record(self.storage, &entry).map(|()| entry)
    }
}

struct Side {
    direction: Direction,
    category: Category,
    total: Amount,
    position: Option<Position>,
}

fn change(
    asset: &Asset,
    category: Category,
    direction: Direction,
    balance: Amount,
    amount: Amount,
) -> Result<Amount> {
    if category.increased_by(direction) {
        increase(asset, category, balance, amount)
    } else {
        decrease(asset, category, balance, amount)
    }
}

fn increase(
    asset: &Asset,
    category: Category,
    balance: Amount,
    amount: Amount,
) -> Result<Amount> {
    balance
        .checked_add(amount)
        .map_err(|_| ContractError::BalanceOverflow {
            asset: asset.clone(),
            category,
            balance,
            amount,
        })
}

fn decrease(
    asset: &Asset,
    category: Category,
    balance: Amount,
    amount: Amount,
) -> Result<Amount> {
    balance
        .checked_sub(amount)
        .map_err(|_| ContractError::BalanceUnderflow {
            asset: asset.clone(),
            category,
            balance,
            amount,
        })
}

impl Position {
    pub fn is_empty(&self) -> bool {
        self.amount.is_zero()
    }
}
