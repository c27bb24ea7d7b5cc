use std::{
    marker::PhantomData,
    ops::{Deref, DerefMut},
};

use sdk::{
    cosmwasm_std::{Addr, Storage},
    cw_storage_plus::Item,
};

use crate::error::{Error, Result};

const OWNER: Item<Addr> = Item::new("contract_owner");

/// The single principal permitted to administer the contract
pub struct ContractOwnerAccess<'storage, S>
where
    S: Deref<Target = dyn Storage + 'storage>,
{
    storage: S,
    _storage_lifetime: PhantomData<&'storage ()>,
}

impl<'storage, S> ContractOwnerAccess<'storage, S>
where
    S: Deref<Target = dyn Storage + 'storage>,
{
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            _storage_lifetime: PhantomData,
        }
    }

    /// Fail if no owner has been granted yet
    pub fn owner(&self) -> Result<Addr> {
        OWNER.load(self.storage.deref()).map_err(Into::into)
    }

    pub fn is_owner(&self, principal: &Addr) -> Result<bool> {
        self.owner().map(|owner| &owner == principal)
    }

    pub fn check(&self, principal: &Addr) -> Result {
        self.is_owner(principal).and_then(|owner| {
            if owner {
                Ok(())
            } else {
                Err(Error::Unauthorized {})
            }
        })
    }
}

impl<'storage, S> ContractOwnerAccess<'storage, S>
where
    S: Deref<Target = dyn Storage + 'storage> + DerefMut,
{
    /// Replace the current owner, if any
    pub fn grant_to(&mut self, principal: &Addr) -> Result {
        OWNER
            .save(self.storage.deref_mut(), principal)
            .map_err(Into::into)
    }
}
