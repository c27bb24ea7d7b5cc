use std::vec;

use sdk::{
    cosmwasm_ext::{CosmosMsg, SubMsg},
    cosmwasm_std::{Addr, BankMsg, Coin as CwCoin},
};

use currency::Asset;
use finance::coin::Amount;

pub use crate::emit::{Emit, Emitter};

#[must_use]
#[derive(Default)]
#[cfg_attr(any(debug_assertions, test), derive(Debug, PartialEq, Eq))]
pub struct Batch {
    msgs: Vec<SubMsg>,
}

impl Batch {
    pub fn schedule_execute_no_reply<M>(self, msg: M) -> Self
    where
        M: Into<CosmosMsg>,
    {
        self.schedule_msg(SubMsg::new(msg))
    }

    pub fn schedule_bank_send(self, to: &Addr, asset: &Asset, amount: Amount) -> Self {
        self.schedule_execute_no_reply(BankMsg::Send {
            to_address: to.to_string(),
            amount: vec![CwCoin::new(amount, asset.denom())],
        })
    }

    pub fn len(&self) -> usize {
        self.msgs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.msgs.is_empty()
    }

    #[inline]
    fn schedule_msg(mut self, msg: SubMsg) -> Self {
        self.msgs.push(msg);
        self
    }
}

impl IntoIterator for Batch {
    type Item = SubMsg;

    type IntoIter = vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.msgs.into_iter()
    }
}
