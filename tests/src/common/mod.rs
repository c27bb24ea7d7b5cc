use currency::Asset;
use finance::{coin::Amount, percent::Percent};
use money_market::{
    contract::{execute, instantiate, query},
    error::ContractError,
    interest::InterestModel,
    msg::{ExecuteMsg, InstantiateMsg, QueryMsg},
};
use sdk::{
    cosmwasm_std::{coins, testing::MockApi, Addr, Coin as CwCoin},
    testing::{self, App, AppResponse, ContractWrapper, Executor},
};
use serde::de::DeserializeOwned;

pub const USDC: &str = "uusdc";
pub const ATOM: &str = "uatom";

pub const BLOCK_UNIT_SCALE: u64 = 10;

pub fn addr(name: &str) -> Addr {
    MockApi::default().addr_make(name)
}

pub fn owner() -> Addr {
    addr("owner")
}

pub fn alice() -> Addr {
    addr("alice")
}

pub fn bob() -> Addr {
    addr("bob")
}

pub fn carol() -> Addr {
    addr("carol")
}

pub fn asset(denom: &str) -> Asset {
    Asset::try_new(denom).unwrap()
}

pub fn cwcoins(amount: u128, denom: &str) -> Vec<CwCoin> {
    coins(amount, denom)
}

pub fn interest_model() -> InterestModel {
    InterestModel::new(
        Percent::from_bps(100),
        Percent::from_percent(50),
        Percent::from_bps(200),
        Percent::from_percent(10),
    )
    .unwrap()
}

/// A deployed market with `uusdc` borrowable and priced at 1, and `uatom` priced at 10
pub struct Market {
    pub app: App,
    pub addr: Addr,
}

impl Market {
    #[track_caller]
    pub fn new() -> Self {
        let (alice, bob, carol) = (alice(), bob(), carol());
        let mut app = testing::new_app([
            (&alice, cwcoins(1_000, USDC)),
            (&bob, [cwcoins(100, ATOM), cwcoins(25, USDC)].concat()),
            (&carol, cwcoins(1_000, USDC)),
        ]);

        let code_id = app.store_code(Box::new(ContractWrapper::new(execute, instantiate, query)));
        let addr = app
            .instantiate_contract(
                code_id,
                owner(),
                &InstantiateMsg {
                    minimum_collateral_ratio: Percent::from_percent(200),
                    block_unit_scale: BLOCK_UNIT_SCALE,
                    interest_model: interest_model(),
                    allowed: vec![alice, bob],
                },
                &[],
                "money-market",
                None,
            )
            .unwrap();

        let mut market = Self { app, addr };
        market
            .execute(
                &owner(),
                &ExecuteMsg::SetAssetValue {
                    asset: asset(USDC),
                    value: Amount::new(1),
                },
                &[],
            )
            .unwrap();
        market
            .execute(
                &owner(),
                &ExecuteMsg::SetAssetValue {
                    asset: asset(ATOM),
                    value: Amount::new(10),
                },
                &[],
            )
            .unwrap();
        market
            .execute(
                &owner(),
                &ExecuteMsg::AddBorrowableAsset { asset: asset(USDC) },
                &[],
            )
            .unwrap();
        market
    }

    pub fn execute(
        &mut self,
        sender: &Addr,
        msg: &ExecuteMsg,
        funds: &[CwCoin],
    ) -> anyhow::Result<AppResponse> {
        self.app
            .execute_contract(sender.clone(), self.addr.clone(), msg, funds)
    }

    pub fn query<T>(&self, msg: &QueryMsg) -> T
    where
        T: DeserializeOwned,
    {
        self.app
            .wrap()
            .query_wasm_smart(self.addr.clone(), msg)
            .unwrap()
    }

    pub fn bank_balance(&self, account: &Addr, denom: &str) -> u128 {
        self.app
            .wrap()
            .query_balance(account, denom)
            .unwrap()
            .amount
            .u128()
    }

    pub fn advance_blocks(&mut self, blocks: u64) {
        self.app.update_block(|block| {
            block.height += blocks;
            block.time = block.time.plus_seconds(5 * blocks);
        });
    }
}

/// The contract failure surfaces as the root cause, rendered to text
#[track_caller]
pub fn assert_contract_error(err: &anyhow::Error, expected: &ContractError) {
    assert_eq!(expected.to_string(), err.root_cause().to_string());
}

pub fn count_events(response: &AppResponse, ty: &str) -> usize {
    let ty = format!("wasm-{ty}");
    response
        .events
        .iter()
        .filter(|event| event.ty == ty)
        .count()
}
