use serde::{Deserialize, Serialize};

use currency::Asset;
use finance::{coin::Amount, percent::Percent};
use sdk::{
    cosmwasm_std::Addr,
    schemars::{self, JsonSchema},
};

use crate::{interest::InterestModel, ledger::Category, market::Settlement};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct InstantiateMsg {
    pub minimum_collateral_ratio: Percent,
    /// The number of blocks per interest rate bucket
    pub block_unit_scale: u64,
    pub interest_model: InterestModel,
    pub allowed: Vec<Addr>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Deposit the attached funds
    Supply {
        asset: Asset,
        amount: Amount,
    },
    /// Withdraw from the supply balance, to the sender if `to` is not set
    Withdraw {
        asset: Asset,
        amount: Amount,
        to: Option<Addr>,
    },
    /// Borrow against the collateral, into the supply balance if `settlement` is not set
    Borrow {
        asset: Asset,
        amount: Amount,
        settlement: Option<Settlement>,
    },
    /// Repay with the attached funds if `settlement` is not set
    Repay {
        asset: Asset,
        amount: Amount,
        settlement: Option<Settlement>,
    },
    SnapshotCurrentRate {
        asset: Asset,
    },
    SetAssetValue {
        asset: Asset,
        value: Amount,
    },
    AddBorrowableAsset {
        asset: Asset,
    },
    SetMinimumCollateralRatio {
        ratio: Percent,
    },
    SetInterestModel {
        model: InterestModel,
    },
    Allow {
        principal: Addr,
    },
    Disallow {
        principal: Addr,
    },
    TransferOwnership {
        new_owner: Addr,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub enum QueryMsg {
    /// Return [`crate::state::Config`]
    Config(),
    /// Return [`Addr`]
    Owner(),
    /// Return bool
    IsAllowed { principal: Addr },
    /// Return [`crate::ledger::Position`]
    Balance {
        customer: Addr,
        asset: Asset,
        category: Category,
    },
    /// Return [`Amount`]
    TotalBalance { asset: Asset, category: Category },
    /// Return [`Option<crate::oracle::PriceEntry>`]
    Price { asset: Asset },
    /// Return [`Vec<Asset>`]
    SupportedAssets(),
    /// Return [`Vec<Asset>`]
    BorrowableAssets(),
    /// Return [`Amount`]
    AssetValue { asset: Asset, amount: Amount },
    /// Return [`Amount`]
    ConvertedAssetValue {
        src: Asset,
        amount: Amount,
        dst: Asset,
    },
    /// Return [`Amount`]
    MaxBorrowAvailable { customer: Addr },
    /// Return [`Amount`]
    ValueEquivalent { customer: Addr },
    /// Return [`Option<InterestRatesResponse>`]
    InterestRates { asset: Asset },
    /// Return [`crate::interest::Indices`] at `height`, the current one if not set
    CompoundedIndex { asset: Asset, height: Option<u64> },
    /// Return [`Vec<crate::ledger::LedgerEntry>`]
    LedgerEntries {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct InterestRatesResponse {
    pub block_unit: u64,
    pub snapshot: crate::interest::Snapshot,
}
