use currency::Asset;
use finance::{percent::Percent, price::Price};
use platform::batch::{Emit, Emitter};
use sdk::cosmwasm_std::{Addr, Env};

use crate::{
    interest::{InterestModel, SnapshotUpdate},
    ledger::LedgerEntry,
};

pub(crate) enum Type {
    LedgerEntry,
    BalanceIncrease,
    BalanceDecrease,
    InterestRateChange,
    AssetValueUpdate,
    NewAsset,
    NewBorrowableAsset,
    MinimumCollateralRatioChange,
    InterestModelChange,
    Allow,
    Disallow,
    OwnershipTransfer,
}

impl Type {
    /// 'wasm-' is always prepended by the runtime
    const fn as_str(&self) -> &'static str {
        match self {
            Self::LedgerEntry => "ledger-entry",
            Self::BalanceIncrease => "balance-increase",
            Self::BalanceDecrease => "balance-decrease",
            Self::InterestRateChange => "interest-rate-change",
            Self::AssetValueUpdate => "asset-value-update",
            Self::NewAsset => "new-asset",
            Self::NewBorrowableAsset => "new-borrowable-asset",
            Self::MinimumCollateralRatioChange => "minimum-collateral-ratio-change",
            Self::InterestModelChange => "interest-model-change",
            Self::Allow => "allow",
            Self::Disallow => "disallow",
            Self::OwnershipTransfer => "ownership-transfer",
        }
    }
}

impl From<Type> for String {
    fn from(ty: Type) -> Self {
        String::from(ty.as_str())
    }
}

pub(crate) fn emit_ledger_entry(env: &Env, entry: &LedgerEntry) -> Emitter {
    let emitter = Emitter::of_type(Type::LedgerEntry)
        .emit_tx_info(env)
        .emit_to_string_value("id", entry.id)
        .emit("reason", entry.reason.as_str())
        .emit("direction", entry.direction.as_str())
        .emit("category", entry.category.as_str())
        .emit("customer", &entry.customer)
        .emit_asset("asset", &entry.asset)
        .emit_amount("amount", entry.amount)
        .emit_amount("balance", entry.balance)
        .emit_to_string_value("interest-rate-bps", entry.interest_rate_bps);

    match entry.next_payment_height {
        Some(height) => emitter.emit_to_string_value("next-payment-height", height),
        None => emitter,
    }
}

pub(crate) fn emit_balance_change(env: &Env, entry: &LedgerEntry) -> Emitter {
    let ty = if entry.category.increased_by(entry.direction) {
        Type::BalanceIncrease
    } else {
        Type::BalanceDecrease
    };

    Emitter::of_type(ty)
        .emit_tx_info(env)
        .emit("category", entry.category.as_str())
        .emit("customer", &entry.customer)
        .emit_asset("asset", &entry.asset)
        .emit_amount("amount", entry.amount)
        .emit_amount("balance", entry.balance)
}

pub(crate) fn emit_interest_rate_change(
    env: &Env,
    asset: &Asset,
    update: &SnapshotUpdate,
) -> Emitter {
    Emitter::of_type(Type::InterestRateChange)
        .emit_tx_info(env)
        .emit_asset("asset", asset)
        .emit_to_string_value("block-unit", update.block_unit)
        .emit_to_string_value("supply-rate", update.snapshot.rates.supply)
        .emit_to_string_value("borrow-rate", update.snapshot.rates.borrow)
        .emit_to_string_value("supply-index", update.snapshot.indices.supply)
        .emit_to_string_value("borrow-index", update.snapshot.indices.borrow)
}

pub(crate) fn emit_asset_value_update(env: &Env, asset: &Asset, value: Price) -> Emitter {
    Emitter::of_type(Type::AssetValueUpdate)
        .emit_tx_info(env)
        .emit_asset("asset", asset)
        .emit_amount("value", value.value())
}

pub(crate) fn emit_new_asset(env: &Env, asset: &Asset) -> Emitter {
    Emitter::of_type(Type::NewAsset)
        .emit_tx_info(env)
        .emit_asset("asset", asset)
}

pub(crate) fn emit_new_borrowable_asset(env: &Env, asset: &Asset) -> Emitter {
    Emitter::of_type(Type::NewBorrowableAsset)
        .emit_tx_info(env)
        .emit_asset("asset", asset)
}

pub(crate) fn emit_minimum_collateral_ratio_change(
    env: &Env,
    previous: Percent,
    current: Percent,
) -> Emitter {
    Emitter::of_type(Type::MinimumCollateralRatioChange)
        .emit_tx_info(env)
        .emit_percent_amount("previous", previous)
        .emit_percent_amount("current", current)
}

pub(crate) fn emit_interest_model_change(env: &Env, model: &InterestModel) -> Emitter {
    Emitter::of_type(Type::InterestModelChange)
        .emit_tx_info(env)
        .emit_percent_amount("base-rate", model.base_rate())
        .emit_percent_amount("utilization-optimal", model.utilization_optimal())
        .emit_percent_amount("addon-optimal-rate", model.addon_optimal_rate())
        .emit_percent_amount("reserve-factor", model.reserve_factor())
}

pub(crate) fn emit_allow(env: &Env, principal: &Addr) -> Emitter {
    Emitter::of_type(Type::Allow)
        .emit_tx_info(env)
        .emit("principal", principal)
}

pub(crate) fn emit_disallow(env: &Env, principal: &Addr) -> Emitter {
    Emitter::of_type(Type::Disallow)
        .emit_tx_info(env)
        .emit("principal", principal)
}

pub(crate) fn emit_ownership_transfer(env: &Env, from: &Addr, to: &Addr) -> Emitter {
    Emitter::of_type(Type::OwnershipTransfer)
        .emit_tx_info(env)
        .emit("from", from)
        .emit("to", to)
}
