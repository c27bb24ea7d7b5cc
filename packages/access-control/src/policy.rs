use sdk::cosmwasm_std::{Addr, Storage};

use crate::{error::Result, AllowList, ContractOwnerAccess};

/// Authorization decisions about principals
pub trait AccessPolicy {
    fn is_owner(&self, storage: &dyn Storage, principal: &Addr) -> Result<bool>;

    fn is_allowed(&self, storage: &dyn Storage, principal: &Addr) -> Result<bool>;
}

/// The policy backed by the stored owner and allow-list
///
/// The owner is not implicitly allowed.
#[derive(Debug, Default, Clone, Copy)]
pub struct StoredAccess;

impl AccessPolicy for StoredAccess {
    fn is_owner(&self, storage: &dyn Storage, principal: &Addr) -> Result<bool> {
        ContractOwnerAccess::new(storage).is_owner(principal)
    }

    fn is_allowed(&self, storage: &dyn Storage, principal: &Addr) -> Result<bool> {
        Ok(AllowList::new(storage).contains(principal))
    }
}

#[cfg(test)]
mod tests {
    use sdk::cosmwasm_std::{testing::MockStorage, Addr, Storage};

    use crate::{AccessPolicy, AllowList, ContractOwnerAccess, StoredAccess};

    #[test]
    fn owner_not_implicitly_allowed() {
        let mut storage = MockStorage::new();
        let owner = Addr::unchecked("owner");
        let customer = Addr::unchecked("customer");
        {
            let storage_ref: &mut dyn Storage = &mut storage;
            ContractOwnerAccess::new(storage_ref)
                .grant_to(&owner)
                .unwrap();
        }
        {
            let storage_ref: &mut dyn Storage = &mut storage;
            AllowList::new(storage_ref).allow(&customer).unwrap();
        }

        assert_eq!(Ok(true), StoredAccess.is_owner(&storage, &owner));
        assert_eq!(Ok(false), StoredAccess.is_allowed(&storage, &owner));
        assert_eq!(Ok(false), StoredAccess.is_owner(&storage, &customer));
        assert_eq!(Ok(true), StoredAccess.is_allowed(&storage, &customer));
    }

    #[test]
    fn no_owner() {
        let storage = MockStorage::new();

        assert!(StoredAccess
            .is_owner(&storage, &Addr::unchecked("anyone"))
            .is_err());
    }
}
