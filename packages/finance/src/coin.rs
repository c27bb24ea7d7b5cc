use sdk::cosmwasm_std::Uint128;

use crate::error::{Error, Result};

/// An unsigned magnitude of some asset
pub type Amount = Uint128;

pub fn checked_add(lhs: Amount, rhs: Amount) -> Result<Amount> {
    lhs.checked_add(rhs)
        .map_err(|_| Error::overflow("checked_add", lhs, rhs))
}

pub fn checked_sub(lhs: Amount, rhs: Amount) -> Result<Amount> {
    lhs.checked_sub(rhs)
        .map_err(|_| Error::overflow("checked_sub", lhs, rhs))
}
