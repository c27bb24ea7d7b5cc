#[cfg(feature = "contract")]
pub mod contract;
pub mod error;
mod event;
pub mod interest;
pub mod ledger;
pub mod market;
pub mod msg;
pub mod oracle;
pub mod state;
