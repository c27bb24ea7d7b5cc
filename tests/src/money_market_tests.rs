use currency::Asset;
use finance::{coin::Amount, index::Index, percent::Percent};
use money_market::{
    contract::{execute, instantiate, query},
    error::ContractError,
    interest::Indices,
    ledger::{Category, LedgerEntry, Position, Reason},
    market::Settlement,
    msg::{ExecuteMsg, InstantiateMsg, InterestRatesResponse, QueryMsg},
    oracle::PriceEntry,
    state::Config,
};
use platform::error::Error as PlatformError;
use sdk::{
    cosmwasm_std::Addr,
    testing::{self, ContractWrapper, Executor},
};

use crate::common::{
    alice, assert_contract_error, asset, bob, carol, count_events, cwcoins, interest_model, owner,
    Market, ATOM, BLOCK_UNIT_SCALE, USDC,
};

fn supply(market: &mut Market, customer: &Addr, amount: u128, denom: &str) {
    market
        .execute(
            customer,
            &ExecuteMsg::Supply {
                asset: asset(denom),
                amount: Amount::new(amount),
            },
            &cwcoins(amount, denom),
        )
        .unwrap();
}

fn position(market: &Market, customer: &Addr, denom: &str, category: Category) -> Amount {
    market
        .query::<Position>(&QueryMsg::Balance {
            customer: customer.clone(),
            asset: asset(denom),
            category,
        })
        .amount
}

fn total(market: &Market, denom: &str, category: Category) -> Amount {
    market.query(&QueryMsg::TotalBalance {
        asset: asset(denom),
        category,
    })
}

fn entries(market: &Market) -> Vec<LedgerEntry> {
    market.query(&QueryMsg::LedgerEntries {
        start_after: None,
        limit: Some(100),
    })
}

#[test]
fn instantiate_validates_config() {
    let owner = owner();
    let mut app = testing::new_app([(&owner, vec![])]);
    let code_id = app.store_code(Box::new(ContractWrapper::new(execute, instantiate, query)));

    let err = app
        .instantiate_contract(
            code_id,
            owner,
            &InstantiateMsg {
                minimum_collateral_ratio: Percent::from_percent(99),
                block_unit_scale: BLOCK_UNIT_SCALE,
                interest_model: interest_model(),
                allowed: vec![],
            },
            &[],
            "money-market",
            None,
        )
        .unwrap_err();
    assert_contract_error(
        &err,
        &ContractError::InvalidCollateralRatio(Percent::from_percent(99)),
    );
}

#[test]
fn instantiate_sets_up_access() {
    let market = Market::new();

    assert_eq!(owner(), market.query::<Addr>(&QueryMsg::Owner()));
    assert!(market.query::<bool>(&QueryMsg::IsAllowed { principal: alice() }));
    assert!(market.query::<bool>(&QueryMsg::IsAllowed { principal: bob() }));
    assert!(!market.query::<bool>(&QueryMsg::IsAllowed { principal: carol() }));
    assert!(!market.query::<bool>(&QueryMsg::IsAllowed { principal: owner() }));

    let config: Config = market.query(&QueryMsg::Config());
    assert_eq!(Percent::from_percent(200), config.minimum_collateral_ratio());
    assert_eq!(BLOCK_UNIT_SCALE, config.block_unit_scale());
    assert_eq!(&interest_model(), config.interest_model());
}

#[test]
fn supply_takes_custody() {
    let mut market = Market::new();

    let response = market
        .execute(
            &alice(),
            &ExecuteMsg::Supply {
                asset: asset(USDC),
                amount: Amount::new(400),
            },
            &cwcoins(400, USDC),
        )
        .unwrap();

    assert_eq!(2, count_events(&response, "ledger-entry"));
    assert_eq!(2, count_events(&response, "balance-increase"));
    assert_eq!(600, market.bank_balance(&alice(), USDC));
    assert_eq!(400, market.bank_balance(&market.addr, USDC));
    assert_eq!(
        Amount::new(400),
        position(&market, &alice(), USDC, Category::Supply)
    );
    assert_eq!(Amount::new(400), total(&market, USDC, Category::Cash));

    let entries = entries(&market);
    assert_eq!(2, entries.len());
    assert!(entries
        .iter()
        .all(|entry| entry.reason == Reason::CustomerSupply && entry.amount == Amount::new(400)));
}

#[test]
fn supply_funds_mismatch() {
    let mut market = Market::new();

    let err = market
        .execute(
            &alice(),
            &ExecuteMsg::Supply {
                asset: asset(USDC),
                amount: Amount::new(100),
            },
            &cwcoins(50, USDC),
        )
        .unwrap_err();
    assert_contract_error(
        &err,
        &ContractError::Transfer(PlatformError::FundsMismatch {
            denom: USDC.into(),
            expected: Amount::new(100),
            received: Amount::new(50),
        }),
    );
    assert_eq!(1_000, market.bank_balance(&alice(), USDC));
    assert!(entries(&market).is_empty());
}

#[test]
fn unexpected_funds() {
    let mut market = Market::new();

    let err = market
        .execute(
            &alice(),
            &ExecuteMsg::SnapshotCurrentRate { asset: asset(USDC) },
            &cwcoins(10, USDC),
        )
        .unwrap_err();
    assert_contract_error(
        &err,
        &ContractError::Transfer(PlatformError::UnexpectedFunds(
            USDC.into()
        )),
    );
    assert_eq!(1_000, market.bank_balance(&alice(), USDC));
}

#[test]
fn borrow_transfer_then_repay_with_interest() {
    let mut market = Market::new();
    supply(&mut market, &alice(), 1_000, USDC);
    supply(&mut market, &bob(), 100, ATOM);

    market
        .execute(
            &bob(),
            &ExecuteMsg::Borrow {
                asset: asset(USDC),
                amount: Amount::new(500),
                settlement: Some(Settlement::Transfer),
            },
            &[],
        )
        .unwrap();
    assert_eq!(525, market.bank_balance(&bob(), USDC));
    assert_eq!(500, market.bank_balance(&market.addr, USDC));
    assert_eq!(
        Amount::new(500),
        position(&market, &bob(), USDC, Category::Borrow)
    );

    let rates: Option<InterestRatesResponse> =
        market.query(&QueryMsg::InterestRates { asset: asset(USDC) });
    let rates = rates.unwrap();
    assert_eq!(market.app.block_info().height / BLOCK_UNIT_SCALE, rates.block_unit);
    assert!(rates.snapshot.rates.borrow > rates.snapshot.rates.supply);

    market.advance_blocks(BLOCK_UNIT_SCALE);

    let indices: Indices = market.query(&QueryMsg::CompoundedIndex {
        asset: asset(USDC),
        height: None,
    });
    assert!(indices.borrow > indices.supply);
    assert!(indices.supply > Index::ONE);

    // 500 at 5% per block unit
    let err = market
        .execute(
            &bob(),
            &ExecuteMsg::Repay {
                asset: asset(USDC),
                amount: Amount::new(526),
                settlement: Some(Settlement::Supply),
            },
            &[],
        )
        .unwrap_err();
    assert_contract_error(
        &err,
        &ContractError::ExcessiveRepayment {
            asset: asset(USDC),
            outstanding: Amount::new(525),
            amount: Amount::new(526),
        },
    );

    market
        .execute(
            &bob(),
            &ExecuteMsg::Repay {
                asset: asset(USDC),
                amount: Amount::new(525),
                settlement: None,
            },
            &cwcoins(525, USDC),
        )
        .unwrap();
    assert_eq!(0, market.bank_balance(&bob(), USDC));
    assert_eq!(1_025, market.bank_balance(&market.addr, USDC));
    assert_eq!(Amount::zero(), position(&market, &bob(), USDC, Category::Borrow));
    assert_eq!(
        Amount::new(25),
        total(&market, USDC, Category::InterestIncome)
    );

    // 1000 at 2.25% per block unit, truncated
    market
        .execute(
            &alice(),
            &ExecuteMsg::Withdraw {
                asset: asset(USDC),
                amount: Amount::new(1_022),
                to: None,
            },
            &[],
        )
        .unwrap();
    assert_eq!(1_022, market.bank_balance(&alice(), USDC));
    assert_eq!(3, market.bank_balance(&market.addr, USDC));
    assert_eq!(
        Amount::zero(),
        position(&market, &alice(), USDC, Category::Supply)
    );
    assert_eq!(
        Amount::new(22),
        total(&market, USDC, Category::InterestExpense)
    );
}

#[test]
fn failed_borrow_leaves_no_trace() {
    let mut market = Market::new();
    supply(&mut market, &alice(), 1_000, USDC);
    supply(&mut market, &bob(), 100, ATOM);
    let recorded = entries(&market).len();

    assert_eq!(
        Amount::new(2_000),
        market.query::<Amount>(&QueryMsg::MaxBorrowAvailable { customer: bob() })
    );

    // the supply settlement adds to the collateral as much as to the borrow
    let err = market
        .execute(
            &bob(),
            &ExecuteMsg::Borrow {
                asset: asset(USDC),
                amount: Amount::new(2_001),
                settlement: None,
            },
            &[],
        )
        .unwrap_err();
    assert_contract_error(
        &err,
        &ContractError::InsufficientCollateral {
            borrowed_value: Amount::new(2_001),
            max_borrow_value: Amount::new(2_000),
            ratio: Percent::from_percent(200),
        },
    );

    assert_eq!(recorded, entries(&market).len());
    assert_eq!(Amount::zero(), total(&market, USDC, Category::Borrow));
    assert_eq!(
        Amount::zero(),
        position(&market, &bob(), USDC, Category::Supply)
    );

    market
        .execute(
            &bob(),
            &ExecuteMsg::Borrow {
                asset: asset(USDC),
                amount: Amount::new(2_000),
                settlement: None,
            },
            &[],
        )
        .unwrap();
    assert_eq!(
        Amount::new(2_000),
        position(&market, &bob(), USDC, Category::Supply)
    );
    assert_eq!(25, market.bank_balance(&bob(), USDC));
}

#[test]
fn borrow_of_non_borrowable() {
    let mut market = Market::new();
    supply(&mut market, &bob(), 100, ATOM);

    let err = market
        .execute(
            &bob(),
            &ExecuteMsg::Borrow {
                asset: asset(ATOM),
                amount: Amount::new(10),
                settlement: None,
            },
            &[],
        )
        .unwrap_err();
    assert_contract_error(
        &err,
        &ContractError::AssetNotBorrowable(asset(ATOM)),
    );
}

#[test]
fn withdraw_to_another_account() {
    let mut market = Market::new();
    supply(&mut market, &alice(), 300, USDC);

    market
        .execute(
            &alice(),
            &ExecuteMsg::Withdraw {
                asset: asset(USDC),
                amount: Amount::new(100),
                to: Some(carol()),
            },
            &[],
        )
        .unwrap();
    assert_eq!(1_100, market.bank_balance(&carol(), USDC));
    assert_eq!(700, market.bank_balance(&alice(), USDC));
    assert_eq!(
        Amount::new(200),
        position(&market, &alice(), USDC, Category::Supply)
    );

    let err = market
        .execute(
            &alice(),
            &ExecuteMsg::Withdraw {
                asset: asset(USDC),
                amount: Amount::new(100),
                to: Some(Addr::unchecked("invalid")),
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().starts_with("[Money Market] [Std]"));
}

#[test]
fn customers_must_be_allowed() {
    let mut market = Market::new();

    let supply_msg = ExecuteMsg::Supply {
        asset: asset(USDC),
        amount: Amount::new(100),
    };
    let err = market
        .execute(&carol(), &supply_msg, &cwcoins(100, USDC))
        .unwrap_err();
    assert_contract_error(
        &err,
        &ContractError::Unauthorized(carol()),
    );
    assert_eq!(1_000, market.bank_balance(&carol(), USDC));

    let response = market
        .execute(&owner(), &ExecuteMsg::Allow { principal: carol() }, &[])
        .unwrap();
    assert_eq!(1, count_events(&response, "allow"));
    market
        .execute(&carol(), &supply_msg, &cwcoins(100, USDC))
        .unwrap();

    market
        .execute(&owner(), &ExecuteMsg::Disallow { principal: carol() }, &[])
        .unwrap();
    let err = market
        .execute(&carol(), &supply_msg, &cwcoins(100, USDC))
        .unwrap_err();
    assert_contract_error(
        &err,
        &ContractError::Unauthorized(carol()),
    );
    assert_eq!(
        Amount::new(100),
        position(&market, &carol(), USDC, Category::Supply)
    );
}

#[test]
fn ownership_transfer() {
    let mut market = Market::new();

    let err = market
        .execute(
            &alice(),
            &ExecuteMsg::TransferOwnership {
                new_owner: alice(),
            },
            &[],
        )
        .unwrap_err();
    assert_contract_error(
        &err,
        &ContractError::Unauthorized(alice()),
    );

    market
        .execute(
            &owner(),
            &ExecuteMsg::TransferOwnership {
                new_owner: alice(),
            },
            &[],
        )
        .unwrap();
    assert_eq!(alice(), market.query::<Addr>(&QueryMsg::Owner()));

    let set_ratio = ExecuteMsg::SetMinimumCollateralRatio {
        ratio: Percent::from_percent(150),
    };
    let err = market.execute(&owner(), &set_ratio, &[]).unwrap_err();
    assert_contract_error(
        &err,
        &ContractError::Unauthorized(owner()),
    );

    let response = market.execute(&alice(), &set_ratio, &[]).unwrap();
    assert_eq!(1, count_events(&response, "minimum-collateral-ratio-change"));
    assert_eq!(
        Percent::from_percent(150),
        market
            .query::<Config>(&QueryMsg::Config())
            .minimum_collateral_ratio()
    );
}

#[test]
fn asset_queries() {
    let mut market = Market::new();

    let price: Option<PriceEntry> = market.query(&QueryMsg::Price { asset: asset(ATOM) });
    assert_eq!(Amount::new(10), price.unwrap().value.value());
    assert_eq!(
        None,
        market.query::<Option<PriceEntry>>(&QueryMsg::Price {
            asset: asset("uosmo")
        })
    );
    assert_eq!(
        vec![asset(ATOM), asset(USDC)],
        market.query::<Vec<Asset>>(&QueryMsg::SupportedAssets())
    );
    assert_eq!(
        vec![asset(USDC)],
        market.query::<Vec<Asset>>(&QueryMsg::BorrowableAssets())
    );
    assert_eq!(
        Amount::new(50),
        market.query::<Amount>(&QueryMsg::AssetValue {
            asset: asset(ATOM),
            amount: Amount::new(5),
        })
    );
    assert_eq!(
        Amount::zero(),
        market.query::<Amount>(&QueryMsg::AssetValue {
            asset: asset("uosmo"),
            amount: Amount::new(5),
        })
    );
    assert_eq!(
        Amount::new(50),
        market.query::<Amount>(&QueryMsg::ConvertedAssetValue {
            src: asset(ATOM),
            amount: Amount::new(5),
            dst: asset(USDC),
        })
    );
    assert_eq!(
        None,
        market.query::<Option<InterestRatesResponse>>(&QueryMsg::InterestRates {
            asset: asset(USDC)
        })
    );

    let response = market
        .execute(
            &owner(),
            &ExecuteMsg::SetAssetValue {
                asset: asset("uosmo"),
                value: Amount::new(2),
            },
            &[],
        )
        .unwrap();
    assert_eq!(1, count_events(&response, "new-asset"));
    assert_eq!(1, count_events(&response, "asset-value-update"));

    let err = market
        .execute(
            &owner(),
            &ExecuteMsg::SetAssetValue {
                asset: asset("uosmo"),
                value: Amount::zero(),
            },
            &[],
        )
        .unwrap_err();
    assert_contract_error(
        &err,
        &ContractError::ZeroPrice(asset("uosmo")),
    );
}

#[test]
fn value_equivalent_tracks_positions() {
    let mut market = Market::new();
    supply(&mut market, &alice(), 1_000, USDC);
    supply(&mut market, &bob(), 100, ATOM);

    market
        .execute(
            &bob(),
            &ExecuteMsg::Borrow {
                asset: asset(USDC),
                amount: Amount::new(200),
                settlement: Some(Settlement::Transfer),
            },
            &[],
        )
        .unwrap();

    assert_eq!(
        Amount::new(800),
        market.query::<Amount>(&QueryMsg::ValueEquivalent { customer: bob() })
    );
    assert_eq!(
        Amount::new(1_600),
        market.query::<Amount>(&QueryMsg::MaxBorrowAvailable { customer: bob() })
    );
    assert_eq!(
        Amount::zero(),
        market.query::<Amount>(&QueryMsg::ValueEquivalent { customer: carol() })
    );
}
