use cosmwasm_std::{Addr, Coin, Empty};
use cw_multi_test::{App as CwApp, AppBuilder};
pub use cw_multi_test::{AppResponse, ContractWrapper, Executor};

pub type App = CwApp;

pub type Contract = dyn cw_multi_test::Contract<Empty>;

/// Build an application with the given accounts funded
pub fn new_app<'a, I>(funds: I) -> App
where
    I: IntoIterator<Item = (&'a Addr, Vec<Coin>)>,
{
    AppBuilder::new().build(|router, _api, storage| {
        funds.into_iter().for_each(|(account, coins)| {
            router
                .bank
                .init_balance(storage, account, coins)
                .expect("account funded")
        })
    })
}
