use std::{
    marker::PhantomData,
    ops::{Deref, DerefMut},
};

use sdk::{
    cosmwasm_std::{Addr, Storage},
    cw_storage_plus::Map,
};

use crate::error::{Error, Result};

const ALLOWED: Map<&Addr, ()> = Map::new("allowed_principals");

/// A set of principals permitted to act as customers
pub struct AllowList<'storage, S>
where
    S: Deref<Target = dyn Storage + 'storage>,
{
    storage: S,
    _storage_lifetime: PhantomData<&'storage ()>,
}

impl<'storage, S> AllowList<'storage, S>
where
    S: Deref<Target = dyn Storage + 'storage>,
{
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            _storage_lifetime: PhantomData,
        }
    }

    pub fn contains(&self, principal: &Addr) -> bool {
        ALLOWED.has(self.storage.deref(), principal)
    }

    pub fn check(&self, principal: &Addr) -> Result {
        if self.contains(principal) {
            Ok(())
        } else {
            Err(Error::Unauthorized {})
        }
    }
}

impl<'storage, S> AllowList<'storage, S>
where
    S: Deref<Target = dyn Storage + 'storage> + DerefMut,
{
    pub fn allow(&mut self, principal: &Addr) -> Result {
        ALLOWED
            .save(self.storage.deref_mut(), principal, &())
            .map_err(Into::into)
    }

    pub fn disallow(&mut self, principal: &Addr) {
        ALLOWED.remove(self.storage.deref_mut(), principal)
    }
}
