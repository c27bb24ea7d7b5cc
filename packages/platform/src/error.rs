use std::fmt::Debug;

use thiserror::Error;

use finance::coin::Amount;
use sdk::cosmwasm_std::{Api, StdError};

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("[Platform] Expecting funds of {0} but found none")]
    NoFunds(String),

    #[error("[Platform] Received funds of {0} that no operation consumed")]
    UnexpectedFunds(String),

    #[error("[Platform] Expecting {expected}{denom} but received {received}{denom}")]
    FundsMismatch {
        denom: String,
        expected: Amount,
        received: Amount,
    },

    #[error("[Platform] Funds can only be received from the message sender, not from {0}")]
    ForeignTransfer(String),

    #[error("[Platform] Insufficient funds, available {available}{denom}, requested {requested}{denom}")]
    InsufficientFunds {
        denom: String,
        available: Amount,
        requested: Amount,
    },

    #[error("[Platform] [Std] An error occured while querying a currency balance: {0}")]
    CosmWasmQueryBalance(StdError),
}

pub type Result<T> = core::result::Result<T, Error>;

pub fn log<Err>(api: &dyn Api) -> impl FnOnce(&Err) + '_
where
    Err: Debug,
{
    |err| api.debug(&format!("{:?}", err))
}
