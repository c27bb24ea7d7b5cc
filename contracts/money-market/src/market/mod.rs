use serde::{Deserialize, Serialize};

use access_control::{AccessPolicy, AllowList, ContractOwnerAccess};
use currency::Asset;
use finance::{coin::Amount, percent::Percent, price::Price};
use platform::{bank::Custody, batch::Emitter};
use sdk::{
    cosmwasm_ext::transaction,
    cosmwasm_std::{Addr, Env, Storage},
    schemars::{self, JsonSchema},
};

use crate::{
    error::{ContractError, Result},
    event,
    interest::InterestModel,
    ledger::{Category, Reason},
    oracle,
    state::{borrowable, Config},
};

use self::books::Books;

pub use self::collateral::{max_borrow_available, value_equivalent};

mod books;
mod collateral;

/// How the borrowed or repaid amount changes hands
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Settlement {
    /// Through the customer's supply balance
    Supply,
    /// Through a transfer of the underlying asset
    Transfer,
}

/// The money market state machine
///
/// Each operation is authorized first and then runs in a storage transaction,
/// leaving the storage intact on failure. Return the events to emit.
pub struct Market<'a, P, C> {
    storage: &'a mut dyn Storage,
    env: &'a Env,
    policy: &'a P,
    custody: &'a mut C,
}

impl<'a, P, C> Market<'a, P, C>
where
    P: AccessPolicy,
    C: Custody,
{
    pub fn new(
        storage: &'a mut dyn Storage,
        env: &'a Env,
        policy: &'a P,
        custody: &'a mut C,
    ) -> Self {
        Self {
            storage,
            env,
            policy,
            custody,
        }
    }

    pub fn supply(&mut self, caller: &Addr, asset: &Asset, amount: Amount) -> Result<Vec<Emitter>> {
        self.authorize_customer(caller)?;
        non_zero(amount)?;

        let env = self.env;
        let custody = &mut *self.custody;
        transaction::atomic(self.storage, |storage| {
            custody.transfer_in(caller, asset, amount)?;

            let mut books = Books::load(storage, env)?;
            let rates = books.accrue(caller, asset)?;
            books.post(
                Reason::CustomerSupply,
                caller,
                asset,
                amount,
                (Category::Cash, Category::Supply),
                &rates,
            )?;
            books.refresh_rates(asset)?;

            Ok(books.into_events())
        })
    }

    pub fn withdraw(
        &mut self,
        caller: &Addr,
        asset: &Asset,
        amount: Amount,
        to: Option<&Addr>,
    ) -> Result<Vec<Emitter>> {
        self.authorize_customer(caller)?;
        non_zero(amount)?;

        let env = self.env;
        let custody = &mut *self.custody;
        transaction::atomic(self.storage, |storage| {
            let mut books = Books::load(storage, env)?;
            let rates = books.accrue(caller, asset)?;

            let supplied = books.balance(caller, asset, Category::Supply)?;
            if supplied < amount {
                return Err(ContractError::InsufficientBalance {
                    asset: asset.clone(),
                    balance: supplied,
                    amount,
                });
            }

            books.post(
                Reason::CustomerWithdrawal,
                caller,
                asset,
                amount,
                (Category::Supply, Category::Cash),
                &rates,
            )?;
            books.refresh_rates(asset)?;
            books.check_collateral(caller)?;

            custody.transfer_out(to.unwrap_or(caller), asset, amount)?;

            Ok(books.into_events())
        })
    }

    /// Borrow `amount` of `asset`, settled into the supply balance by default
    pub fn borrow(
        &mut self,
        caller: &Addr,
        asset: &Asset,
        amount: Amount,
        settlement: Option<Settlement>,
    ) -> Result<Vec<Emitter>> {
        self.authorize_customer(caller)?;
        non_zero(amount)?;

        let settlement = settlement.unwrap_or(Settlement::Supply);
        let env = self.env;
        let custody = &mut *self.custody;
        transaction::atomic(self.storage, |storage| {
            if !borrowable::contains(storage, asset) {
                return Err(ContractError::AssetNotBorrowable(asset.clone()));
            }
            if oracle::price(storage, asset)?.is_none() {
                return Err(ContractError::UnpricedAsset(asset.clone()));
            }

            let mut books = Books::load(storage, env)?;
            let rates = books.accrue(caller, asset)?;

            let credit = match settlement {
                Settlement::Supply => Category::Supply,
                Settlement::Transfer => Category::Cash,
            };
            books.post(
                Reason::CustomerBorrow,
                caller,
                asset,
                amount,
                (Category::Borrow, credit),
                &rates,
            )?;
            books.refresh_rates(asset)?;
            books.check_collateral(caller)?;

            if settlement == Settlement::Transfer {
                custody.transfer_out(caller, asset, amount)?;
            }

            Ok(books.into_events())
        })
    }

    /// Repay up to the outstanding borrow, with a transfer by default
    ///
    /// The interest is accrued before the repayment is applied.
    pub fn repay(
        &mut self,
        caller: &Addr,
        asset: &Asset,
        amount: Amount,
        settlement: Option<Settlement>,
    ) -> Result<Vec<Emitter>> {
        self.authorize_customer(caller)?;
        non_zero(amount)?;

        let settlement = settlement.unwrap_or(Settlement::Transfer);
        let env = self.env;
        let custody = &mut *self.custody;
        transaction::atomic(self.storage, |storage| {
            let mut books = Books::load(storage, env)?;
            let rates = books.accrue(caller, asset)?;

            let outstanding = books.balance(caller, asset, Category::Borrow)?;
            if amount > outstanding {
                return Err(ContractError::ExcessiveRepayment {
                    asset: asset.clone(),
                    outstanding,
                    amount,
                });
            }

            let debit = match settlement {
                Settlement::Transfer => {
                    custody.transfer_in(caller, asset, amount)?;
                    Category::Cash
                }
                Settlement::Supply => {
                    let supplied = books.balance(caller, asset, Category::Supply)?;
                    if supplied < amount {
                        return Err(ContractError::InsufficientBalance {
                            asset: asset.clone(),
                            balance: supplied,
                            amount,
                        });
                    }
                    Category::Supply
                }
            };
            books.post(
                Reason::CustomerRepay,
                caller,
                asset,
                amount,
                (debit, Category::Borrow),
                &rates,
            )?;
            books.refresh_rates(asset)?;

            Ok(books.into_events())
        })
    }

    pub fn snapshot_current_rate(&mut self, caller: &Addr, asset: &Asset) -> Result<Vec<Emitter>> {
        self.authorize_customer(caller)?;

        let env = self.env;
        transaction::atomic(self.storage, |storage| {
            let mut books = Books::load(storage, env)?;
            books.refresh_rates(asset)?;

            Ok(books.into_events())
        })
    }

    pub fn set_asset_value(
        &mut self,
        caller: &Addr,
        asset: &Asset,
        value: Amount,
    ) -> Result<Vec<Emitter>> {
        self.authorize_owner(caller)?;

        let env = self.env;
        let price = Price::new(value);
        transaction::atomic(self.storage, |storage| {
            oracle::set_asset_value(storage, asset, price, env.block.height).map(|listed| {
                let update = event::emit_asset_value_update(env, asset, price);
                if listed {
                    vec![event::emit_new_asset(env, asset), update]
                } else {
                    vec![update]
                }
            })
        })
    }

    pub fn add_borrowable_asset(&mut self, caller: &Addr, asset: &Asset) -> Result<Vec<Emitter>> {
        self.authorize_owner(caller)?;

        let env = self.env;
        transaction::atomic(self.storage, |storage| {
            borrowable::add(storage, asset).map(|added| {
                if added {
                    vec![event::emit_new_borrowable_asset(env, asset)]
                } else {
                    vec![]
                }
            })
        })
    }

    pub fn set_minimum_collateral_ratio(
        &mut self,
        caller: &Addr,
        ratio: Percent,
    ) -> Result<Vec<Emitter>> {
        self.authorize_owner(caller)?;

        let env = self.env;
        transaction::atomic(self.storage, |storage| {
            Config::update_minimum_collateral_ratio(storage, ratio).map(|previous| {
                vec![event::emit_minimum_collateral_ratio_change(
                    env, previous, ratio,
                )]
            })
        })
    }

    pub fn set_interest_model(
        &mut self,
        caller: &Addr,
        model: InterestModel,
    ) -> Result<Vec<Emitter>> {
        self.authorize_owner(caller)?;

        let env = self.env;
        transaction::atomic(self.storage, |storage| {
            Config::update_interest_model(storage, model)
                .map(|()| vec![event::emit_interest_model_change(env, &model)])
        })
    }

    pub fn allow(&mut self, caller: &Addr, principal: &Addr) -> Result<Vec<Emitter>> {
        self.authorize_owner(caller)?;

        let env = self.env;
        transaction::atomic(self.storage, |storage| {
            AllowList::new(storage)
                .allow(principal)
                .map(|()| vec![event::emit_allow(env, principal)])
                .map_err(Into::into)
        })
    }

    pub fn disallow(&mut self, caller: &Addr, principal: &Addr) -> Result<Vec<Emitter>> {
        self.authorize_owner(caller)?;

        let env = self.env;
        transaction::atomic(self.storage, |storage| {
            AllowList::new(storage).disallow(principal);
            Ok(vec![event::emit_disallow(env, principal)])
        })
    }

    pub fn transfer_ownership(&mut self, caller: &Addr, new_owner: &Addr) -> Result<Vec<Emitter>> {
        self.authorize_owner(caller)?;

        let env = self.env;
        transaction::atomic(self.storage, |storage| {
            ContractOwnerAccess::new(storage)
                .grant_to(new_owner)
                .map(|()| vec![event::emit_ownership_transfer(env, caller, new_owner)])
                .map_err(Into::into)
        })
    }

    fn authorize_customer(&self, caller: &Addr) -> Result<()> {
        self.policy
            .is_allowed(&*self.storage, caller)
            .map_err(Into::into)
            .and_then(|allowed| authorized(allowed, caller))
    }

    fn authorize_owner(&self, caller: &Addr) -> Result<()> {
        self.policy
            .is_owner(&*self.storage, caller)
            .map_err(Into::into)
            .and_then(|owner| authorized(owner, caller))
    }
}

fn authorized(granted: bool, caller: &Addr) -> Result<()> {
    if granted {
        Ok(())
    } else {
        Err(ContractError::Unauthorized(caller.clone()))
    }
}

fn non_zero(amount: Amount) -> Result<()> {
    if amount.is_zero() {
        Err(ContractError::ZeroAmount)
    } else {
        Ok(())
    }
}
