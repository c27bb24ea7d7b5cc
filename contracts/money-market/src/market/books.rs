use currency::Asset;
use finance::{
    coin::{self, Amount},
    index::Index,
};
use platform::batch::Emitter;
use sdk::cosmwasm_std::{Addr, Env, Storage};

use crate::{
    error::Result,
    event,
    interest::{self, Rates, Snapshot, SnapshotUpdate},
    ledger::{BalanceSheet, Category, Checkpoint, Posting, Reason},
    market::collateral,
    state::Config,
};

/// The bookkeeping context of a single market operation
pub(super) struct Books<'storage, 'env> {
    storage: &'storage mut dyn Storage,
    env: &'env Env,
    config: Config,
    events: Vec<Emitter>,
}

impl<'storage, 'env> Books<'storage, 'env> {
    pub fn load(storage: &'storage mut dyn Storage, env: &'env Env) -> Result<Self> {
        Config::load(storage).map(|config| Self {
            storage,
            env,
            config,
            events: vec![],
        })
    }

    pub fn balance(&self, customer: &Addr, asset: &Asset, category: Category) -> Result<Amount> {
        BalanceSheet::position(&*self.storage, customer, asset, category)
            .map(|position| position.amount)
    }

    /// Post the interest accrued on the customer positions in `asset` since their checkpoints
    ///
    /// The borrow side is accrued first. Return the rates in effect.
    pub fn accrue(&mut self, customer: &Addr, asset: &Asset) -> Result<Rates> {
        let Snapshot { rates, indices } = self.snapshot(asset)?.snapshot;

        self.accrue_position(
            customer,
            asset,
            (Category::Borrow, Category::InterestIncome),
            indices.borrow,
            &rates,
        )?;
        self.accrue_position(
            customer,
            asset,
            (Category::InterestExpense, Category::Supply),
            indices.supply,
            &rates,
        )?;

        Ok(rates)
    }

    /// Post a balanced move tagged with `rates`, the rates before the move
    pub fn post(
        &mut self,
        reason: Reason,
        customer: &Addr,
        asset: &Asset,
        amount: Amount,
        (debit, credit): (Category, Category),
        rates: &Rates,
    ) -> Result<()> {
        let borrow_side = debit == Category::Borrow || credit == Category::Borrow;
        let (rate, next_payment_height) = if borrow_side {
            (rates.borrow, self.next_payment_height())
        } else {
            (rates.supply, None)
        };

        let entries = BalanceSheet::new(self.storage, self.env.block.height).post(Posting {
            reason,
            customer,
            asset,
            amount,
            debit,
            credit,
            interest_rate_bps: rate.to_bps()?,
            next_payment_height,
        })?;

        entries.iter().for_each(|entry| {
            self.events.push(event::emit_ledger_entry(self.env, entry));
            self.events.push(event::emit_balance_change(self.env, entry));
        });
        Ok(())
    }

    /// Re-snapshot the rates of `asset` after a change of its utilization
    pub fn refresh_rates(&mut self, asset: &Asset) -> Result<()> {
        self.snapshot(asset).map(|_| ())
    }

    pub fn check_collateral(&self, customer: &Addr) -> Result<()> {
        collateral::check(&*self.storage, customer, &self.config, self.env.block.height)
    }

    pub fn into_events(self) -> Vec<Emitter> {
        self.events
    }

    fn snapshot(&mut self, asset: &Asset) -> Result<SnapshotUpdate> {
        let rates = self.config.interest_model().rates(
            BalanceSheet::total(&*self.storage, asset, Category::Cash)?,
            BalanceSheet::total(&*self.storage, asset, Category::Borrow)?,
        )?;

        interest::storage::snapshot_current_rate(
            self.storage,
            asset,
            rates,
            self.config.block_unit(self.env.block.height),
        )
        .inspect(|update| {
            if update.rates_changed {
                self.events
                    .push(event::emit_interest_rate_change(self.env, asset, update));
            }
        })
    }

    /// Accrue the tracked position among `accounts`, debit first
    fn accrue_position(
        &mut self,
        customer: &Addr,
        asset: &Asset,
        accounts: (Category, Category),
        index: Index,
        rates: &Rates,
    ) -> Result<()> {
        let category = if accounts.0.is_customer_tracked() {
            accounts.0
        } else {
            accounts.1
        };
        let position = BalanceSheet::position(&*self.storage, customer, asset, category)?;

        if let Some(checkpoint) = position.checkpoint {
            let interest = index
                .grow(position.amount, checkpoint.index)
                .and_then(|grown| coin::checked_sub(grown, position.amount))?;

            if !interest.is_zero() {
                self.post(Reason::Interest, customer, asset, interest, accounts, rates)?;
            }
        }

        BalanceSheet::new(self.storage, self.env.block.height).save_checkpoint(
            customer,
            asset,
            category,
            Checkpoint {
                height: self.env.block.height,
                index,
            },
        )
    }

    fn next_payment_height(&self) -> Option<u64> {
        self.config
            .block_unit(self.env.block.height)
            .checked_add(1)
            .and_then(|next_unit| next_unit.checked_mul(self.config.block_unit_scale()))
    }
}
