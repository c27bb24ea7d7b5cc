use std::collections::BTreeMap;

use currency::Asset;
use finance::coin::Amount;
use sdk::cosmwasm_std::{Addr, Coin as CwCoin, QuerierWrapper};

use crate::{
    batch::Batch,
    error::{Error, Result},
};

/// Token custody of the underlying assets
pub trait Custody {
    /// The amount of `asset` held and not yet scheduled for sending out
    fn balance_of(&self, asset: &Asset) -> Result<Amount>;

    fn transfer_in(&mut self, from: &Addr, asset: &Asset, amount: Amount) -> Result<()>;

    fn transfer_out(&mut self, to: &Addr, asset: &Asset, amount: Amount) -> Result<()>;
}

/// Custody through the native bank module
///
/// Incoming transfers settle the funds attached to the executed message. Outgoing
/// transfers are scheduled as bank sends and dispatched only with a successful response.
pub struct BankCustody<'a> {
    account: Addr,
    sender: Addr,
    querier: QuerierWrapper<'a>,
    received: Vec<CwCoin>,
    pending_out: BTreeMap<String, Amount>,
    batch: Batch,
}

impl<'a> BankCustody<'a> {
    pub fn new(
        account: Addr,
        sender: Addr,
        received: Vec<CwCoin>,
        querier: QuerierWrapper<'a>,
    ) -> Self {
        Self {
            account,
            sender,
            querier,
            received,
            pending_out: BTreeMap::new(),
            batch: Batch::default(),
        }
    }

    /// Release the scheduled transfers
    ///
    /// Fails if some of the received funds were not settled by an incoming transfer.
    pub fn finish(self) -> Result<Batch> {
        if self.received.is_empty() {
            Ok(self.batch)
        } else {
            Err(Error::UnexpectedFunds(
                self.received
                    .iter()
                    .map(|coin| coin.denom.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            ))
        }
    }

    fn pending_out(&self, asset: &Asset) -> Amount {
        self.pending_out
            .get(asset.denom())
            .copied()
            .unwrap_or_default()
    }
}

impl Custody for BankCustody<'_> {
    fn balance_of(&self, asset: &Asset) -> Result<Amount> {
        self.querier
            .query_balance(&self.account, asset.denom())
            .map_err(Error::CosmWasmQueryBalance)
            .map(|balance| balance.amount.saturating_sub(self.pending_out(asset)))
    }

    fn transfer_in(&mut self, from: &Addr, asset: &Asset, amount: Amount) -> Result<()> {
        if from != &self.sender {
            return Err(Error::ForeignTransfer(from.to_string()));
        }

        let position = self
            .received
            .iter()
            .position(|coin| coin.denom == asset.denom())
            .ok_or_else(|| Error::NoFunds(asset.to_string()))?;

        let received = self.received[position].amount;
        if received == amount {
            self.received.remove(position);
            Ok(())
        } else {
            Err(Error::FundsMismatch {
                denom: asset.to_string(),
                expected: amount,
                received,
            })
        }
    }

    fn transfer_out(&mut self, to: &Addr, asset: &Asset, amount: Amount) -> Result<()> {
        let available = self.balance_of(asset)?;
        if available < amount {
            return Err(Error::InsufficientFunds {
                denom: asset.to_string(),
                available,
                requested: amount,
            });
        }

        *self.pending_out.entry(asset.denom().into()).or_default() += amount;
        self.batch = std::mem::take(&mut self.batch).schedule_bank_send(to, asset, amount);
        Ok(())
    }
}
