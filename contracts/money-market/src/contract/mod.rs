use std::ops::DerefMut as _;

use serde::Serialize;

use access_control::{AllowList, ContractOwnerAccess, StoredAccess};
use platform::{
    bank::BankCustody, error as platform_error, message::Response as MessageResponse, response,
};
use sdk::{
    cosmwasm_ext::Response as CwResponse,
    cosmwasm_std::{entry_point, Addr, Api, Binary, Deps, DepsMut, Env, MessageInfo},
};

use crate::{
    error::{ContractError, Result},
    interest,
    ledger::{self, BalanceSheet},
    market::{self, Market},
    msg::{ExecuteMsg, InstantiateMsg, InterestRatesResponse, QueryMsg},
    oracle,
    state::{borrowable, Config},
};

#[entry_point]
pub fn instantiate(
    mut deps: DepsMut<'_>,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<CwResponse> {
    Config::try_new(
        msg.minimum_collateral_ratio,
        msg.block_unit_scale,
        msg.interest_model,
    )
    .and_then(|config| config.store(deps.storage))
    .and_then(|()| {
        ContractOwnerAccess::new(deps.storage.deref_mut())
            .grant_to(&info.sender)
            .map_err(Into::into)
    })
    .and_then(|()| {
        msg.allowed.iter().try_for_each(|principal| {
            validate(deps.api, principal).and_then(|principal| {
                AllowList::new(deps.storage.deref_mut())
                    .allow(&principal)
                    .map_err(Into::into)
            })
        })
    })
    .map(|()| response::empty_response())
    .inspect_err(log(deps.api))
}

#[entry_point]
pub fn execute(
    deps: DepsMut<'_>,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<CwResponse> {
    let api = deps.api;
    let mut custody = BankCustody::new(
        env.contract.address.clone(),
        info.sender.clone(),
        info.funds,
        deps.querier,
    );
    let caller = &info.sender;

    let mut market = Market::new(deps.storage, &env, &StoredAccess, &mut custody);
    let events = match msg {
        ExecuteMsg::Supply { asset, amount } => market.supply(caller, &asset, amount),
        ExecuteMsg::Withdraw { asset, amount, to } => to
            .map(|to| validate(api, &to))
            .transpose()
            .and_then(|to| market.withdraw(caller, &asset, amount, to.as_ref())),
        ExecuteMsg::Borrow {
            asset,
            amount,
            settlement,
        } => market.borrow(caller, &asset, amount, settlement),
        ExecuteMsg::Repay {
            asset,
            amount,
            settlement,
        } => market.repay(caller, &asset, amount, settlement),
        ExecuteMsg::SnapshotCurrentRate { asset } => market.snapshot_current_rate(caller, &asset),
        ExecuteMsg::SetAssetValue { asset, value } => {
            market.set_asset_value(caller, &asset, value)
        }
        ExecuteMsg::AddBorrowableAsset { asset } => market.add_borrowable_asset(caller, &asset),
        ExecuteMsg::SetMinimumCollateralRatio { ratio } => {
            market.set_minimum_collateral_ratio(caller, ratio)
        }
        ExecuteMsg::SetInterestModel { model } => market.set_interest_model(caller, model),
        ExecuteMsg::Allow { principal } => validate(api, &principal)
            .and_then(|principal| market.allow(caller, &principal)),
        ExecuteMsg::Disallow { principal } => market.disallow(caller, &principal),
        ExecuteMsg::TransferOwnership { new_owner } => validate(api, &new_owner)
            .and_then(|new_owner| market.transfer_ownership(caller, &new_owner)),
    };

    events
        .and_then(|events| {
            custody
                .finish()
                .map(|batch| MessageResponse::messages_with_events(batch, events))
                .map_err(Into::into)
        })
        .map(response::response_only_messages)
        .inspect_err(log(api))
}

#[entry_point]
pub fn query(deps: Deps<'_>, env: Env, msg: QueryMsg) -> Result<Binary> {
    let height = env.block.height;

    match msg {
        QueryMsg::Config() => Config::load(deps.storage).and_then(|ref resp| to_json_binary(resp)),
        QueryMsg::Owner() => ContractOwnerAccess::new(deps.storage)
            .owner()
            .map_err(Into::into)
            .and_then(|ref owner| to_json_binary(owner)),
        QueryMsg::IsAllowed { principal } => {
            to_json_binary(&AllowList::new(deps.storage).contains(&principal))
        }
        QueryMsg::Balance {
            customer,
            asset,
            category,
        } => BalanceSheet::position(deps.storage, &customer, &asset, category)
            .and_then(|ref position| to_json_binary(position)),
        QueryMsg::TotalBalance { asset, category } => {
            BalanceSheet::total(deps.storage, &asset, category)
                .and_then(|ref total| to_json_binary(total))
        }
        QueryMsg::Price { asset } => {
            oracle::price(deps.storage, &asset).and_then(|ref price| to_json_binary(price))
        }
        QueryMsg::SupportedAssets() => oracle::supported_assets(deps.storage)
            .and_then(|ref assets| to_json_binary(assets)),
        QueryMsg::BorrowableAssets() => {
            borrowable::assets(deps.storage).and_then(|ref assets| to_json_binary(assets))
        }
        QueryMsg::AssetValue { asset, amount } => {
            oracle::asset_value(deps.storage, &asset, amount)
                .and_then(|ref value| to_json_binary(value))
        }
        QueryMsg::ConvertedAssetValue { src, amount, dst } => {
            oracle::converted_asset_value(deps.storage, &src, amount, &dst)
                .and_then(|ref value| to_json_binary(value))
        }
        QueryMsg::MaxBorrowAvailable { customer } => {
            market::max_borrow_available(deps.storage, &customer, height)
                .and_then(|ref value| to_json_binary(value))
        }
        QueryMsg::ValueEquivalent { customer } => {
            market::value_equivalent(deps.storage, &customer, height)
                .and_then(|ref value| to_json_binary(value))
        }
        QueryMsg::InterestRates { asset } => interest::storage::latest(deps.storage, &asset)
            .map(|latest| {
                latest.map(|(block_unit, snapshot)| InterestRatesResponse {
                    block_unit,
                    snapshot,
                })
            })
            .and_then(|ref resp| to_json_binary(resp)),
        QueryMsg::CompoundedIndex {
            asset,
            height: at_height,
        } => Config::load(deps.storage)
            .map(|config| config.block_unit(at_height.unwrap_or(height)))
            .and_then(|block_unit| {
                interest::storage::compounded_index(deps.storage, &asset, block_unit)
            })
            .and_then(|ref indices| to_json_binary(indices)),
        QueryMsg::LedgerEntries { start_after, limit } => {
            ledger::entries(deps.storage, start_after, limit)
                .and_then(|ref entries| to_json_binary(entries))
        }
    }
    .inspect_err(log(deps.api))
}

/// Log the stable failure code along with its context
fn log(api: &dyn Api) -> impl FnOnce(&ContractError) + '_ {
    move |err| platform_error::log(api)(&err.failure())
}

fn validate(api: &dyn Api, addr: &Addr) -> Result<Addr> {
    api.addr_validate(addr.as_str()).map_err(Into::into)
}

fn to_json_binary<T>(data: &T) -> Result<Binary>
where
    T: Serialize,
{
    sdk::cosmwasm_std::to_json_binary(data).map_err(ContractError::ConvertToBinary)
}
