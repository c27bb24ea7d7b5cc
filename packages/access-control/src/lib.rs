pub use self::{
    allow_list::AllowList,
    contract_owner::ContractOwnerAccess,
    policy::{AccessPolicy, StoredAccess},
};

mod allow_list;
mod contract_owner;
pub mod error;
mod policy;
