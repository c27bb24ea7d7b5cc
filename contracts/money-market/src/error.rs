use thiserror::Error;

use currency::Asset;
use finance::{coin::Amount, percent::Percent};
use sdk::cosmwasm_std::{Addr, StdError};

use crate::ledger::Category;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("[Money Market] [Std] {0}")]
    Std(#[from] StdError),

    #[error("[Money Market] Failed to convert query response to binary! Cause: {0}")]
    ConvertToBinary(StdError),

    #[error("[Money Market] {0}")]
    AccessControl(#[from] access_control::error::Error),

    #[error("[Money Market] The principal '{0}' is not authorized to perform the operation")]
    Unauthorized(Addr),

    #[error("[Money Market] {0}")]
    InvalidAsset(#[from] currency::error::Error),

    #[error("[Money Market] {0}")]
    Finance(#[from] finance::error::Error),

    #[error("[Money Market] {0}")]
    Transfer(#[from] platform::error::Error),

    #[error(
        "[Money Market] The {category:?} balance of {balance}{asset} cannot grow by {amount}"
    )]
    BalanceOverflow {
        asset: Asset,
        category: Category,
        balance: Amount,
        amount: Amount,
    },

    #[error(
        "[Money Market] The {category:?} balance of {balance}{asset} cannot shrink by {amount}"
    )]
    BalanceUnderflow {
        asset: Asset,
        category: Category,
        balance: Amount,
        amount: Amount,
    },

    #[error("[Money Market] Insufficient balance, available {balance}{asset}, requested {amount}{asset}")]
    InsufficientBalance {
        asset: Asset,
        balance: Amount,
        amount: Amount,
    },

    #[error("[Money Market] The asset '{0}' is not borrowable")]
    AssetNotBorrowable(Asset),

    #[error("[Money Market] The asset '{0}' has no price and cannot be valued against collateral")]
    UnpricedAsset(Asset),

    #[error("[Money Market] Insufficient collateral, the borrowed value {borrowed_value} exceeds the maximum of {max_borrow_value} at {ratio} collateral ratio")]
    InsufficientCollateral {
        borrowed_value: Amount,
        max_borrow_value: Amount,
        ratio: Percent,
    },

    #[error("[Money Market] The repayment of {amount}{asset} exceeds the outstanding borrow of {outstanding}{asset}")]
    ExcessiveRepayment {
        asset: Asset,
        outstanding: Amount,
        amount: Amount,
    },

    #[error("[Money Market] Zero amount")]
    ZeroAmount,

    #[error("[Money Market] Zero price of '{0}'")]
    ZeroPrice(Asset),

    #[error("[Money Market] The minimum collateral ratio should be at least 100%, got {0}")]
    InvalidCollateralRatio(Percent),

    #[error("[Money Market] The block unit scale should be at least one block, got {0}")]
    InvalidBlockUnitScale(u64),

    #[error("[Money Market] The interest rate bucket {bucket} of '{asset}' is closed, the latest is {latest}")]
    ClosedBucket {
        asset: Asset,
        bucket: u64,
        latest: u64,
    },
}

/// The class of a failure
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Authorization,
    Arithmetic,
    Domain,
    Transfer,
    /// An internal consistency fault or a setup bug
    Fatal,
}

/// A stable failure code along with the operands that led to it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    pub kind: ErrorKind,
    pub code: &'static str,
    pub context: Vec<(&'static str, String)>,
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized(_) => ErrorKind::Authorization,
            Self::AccessControl(access_control::error::Error::Unauthorized {}) => {
                ErrorKind::Authorization
            }
            Self::BalanceOverflow { .. }
            | Self::BalanceUnderflow { .. }
            | Self::InsufficientBalance { .. }
            | Self::Finance(_) => ErrorKind::Arithmetic,
            Self::AssetNotBorrowable(_)
            | Self::UnpricedAsset(_)
            | Self::InsufficientCollateral { .. }
            | Self::ExcessiveRepayment { .. }
            | Self::ZeroAmount
            | Self::ZeroPrice(_)
            | Self::InvalidCollateralRatio(_)
            | Self::InvalidBlockUnitScale(_)
            | Self::InvalidAsset(_) => ErrorKind::Domain,
            Self::Transfer(_) => ErrorKind::Transfer,
            Self::Std(_)
            | Self::ConvertToBinary(_)
            | Self::AccessControl(_)
            | Self::ClosedBucket { .. } => ErrorKind::Fatal,
        }
    }

    pub fn failure(&self) -> Failure {
        let (code, context) = match self {
            Self::Std(err) => ("std", vec![("cause", err.to_string())]),
            Self::ConvertToBinary(err) => ("convert_to_binary", vec![("cause", err.to_string())]),
            Self::AccessControl(err) => ("access_control", vec![("cause", err.to_string())]),
            Self::Unauthorized(principal) => {
                ("unauthorized", vec![("principal", principal.to_string())])
            }
            Self::InvalidAsset(err) => ("invalid_asset", vec![("cause", err.to_string())]),
            Self::Finance(err) => ("finance", vec![("cause", err.to_string())]),
            Self::Transfer(err) => ("transfer", vec![("cause", err.to_string())]),
            Self::BalanceOverflow {
                asset,
                category,
                balance,
                amount,
            } => (
                "balance_overflow",
                balance_context(asset, *category, *balance, *amount),
            ),
            Self::BalanceUnderflow {
                asset,
                category,
                balance,
                amount,
            } => (
                "balance_underflow",
                balance_context(asset, *category, *balance, *amount),
            ),
            Self::InsufficientBalance {
                asset,
                balance,
                amount,
            } => (
                "insufficient_balance",
                vec![
                    ("asset", asset.to_string()),
                    ("balance", balance.to_string()),
                    ("amount", amount.to_string()),
                ],
            ),
            Self::AssetNotBorrowable(asset) => {
                ("asset_not_borrowable", vec![("asset", asset.to_string())])
            }
            Self::UnpricedAsset(asset) => ("unpriced_asset", vec![("asset", asset.to_string())]),
            Self::InsufficientCollateral {
                borrowed_value,
                max_borrow_value,
                ratio,
            } => (
                "insufficient_collateral",
                vec![
                    ("borrowed_value", borrowed_value.to_string()),
                    ("max_borrow_value", max_borrow_value.to_string()),
                    ("ratio", ratio.units().to_string()),
                ],
            ),
            Self::ExcessiveRepayment {
                asset,
                outstanding,
                amount,
            } => (
                "excessive_repayment",
                vec![
                    ("asset", asset.to_string()),
                    ("outstanding", outstanding.to_string()),
                    ("amount", amount.to_string()),
                ],
            ),
            Self::ZeroAmount => ("zero_amount", vec![]),
            Self::ZeroPrice(asset) => ("zero_price", vec![("asset", asset.to_string())]),
            Self::InvalidCollateralRatio(ratio) => (
                "invalid_collateral_ratio",
                vec![("ratio", ratio.units().to_string())],
            ),
            Self::InvalidBlockUnitScale(scale) => {
                ("invalid_block_unit_scale", vec![("scale", scale.to_string())])
            }
            Self::ClosedBucket {
                asset,
                bucket,
                latest,
            } => (
                "closed_bucket",
                vec![
                    ("asset", asset.to_string()),
                    ("bucket", bucket.to_string()),
                    ("latest", latest.to_string()),
                ],
            ),
        };

        Failure {
            kind: self.kind(),
            code,
            context,
        }
    }
}

fn balance_context(
    asset: &Asset,
    category: Category,
    balance: Amount,
    amount: Amount,
) -> Vec<(&'static str, String)> {
    vec![
        ("asset", asset.to_string()),
        ("category", category.as_str().into()),
        ("balance", balance.to_string()),
        ("amount", amount.to_string()),
    ]
}

pub type Result<T> = std::result::Result<T, ContractError>;
