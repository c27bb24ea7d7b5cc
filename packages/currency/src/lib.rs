use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use sdk::{
    cosmwasm_std::StdResult,
    cw_storage_plus::{Key, KeyDeserialize, Prefixer, PrimaryKey},
    schemars::{self, JsonSchema},
};

use crate::error::{Error, Result};

pub mod error;

/// An opaque identifier of a fungible asset
///
/// The identifier is the bank denomination the asset is custodied in.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String", into = "String")]
pub struct Asset(String);

impl Asset {
    pub fn try_new<D>(denom: D) -> Result<Self>
    where
        D: Into<String>,
    {
        let denom = denom.into();

        if denom.is_empty() {
            Err(Error::EmptyDenom)
        } else if !denom.chars().all(valid_denom_char) {
            Err(Error::InvalidDenom(denom))
        } else {
            Ok(Self(denom))
        }
    }

    pub fn denom(&self) -> &str {
        &self.0
    }
}

fn valid_denom_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-')
}

impl TryFrom<String> for Asset {
    type Error = Error;

    fn try_from(denom: String) -> Result<Self> {
        Self::try_new(denom)
    }
}

impl TryFrom<&str> for Asset {
    type Error = Error;

    fn try_from(denom: &str) -> Result<Self> {
        Self::try_new(denom)
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> Self {
        asset.0
    }
}

impl AsRef<str> for Asset {
    fn as_ref(&self) -> &str {
        self.denom()
    }
}

impl Display for Asset {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl<'a> PrimaryKey<'a> for &'a Asset {
    type Prefix = ();
    type SubPrefix = ();
    type Suffix = Self;
    type SuperSuffix = Self;

    fn key(&self) -> Vec<Key> {
        vec![Key::Ref(self.0.as_bytes())]
    }
}

impl<'a> Prefixer<'a> for &'a Asset {
    fn prefix(&self) -> Vec<Key> {
        vec![Key::Ref(self.0.as_bytes())]
    }
}

impl KeyDeserialize for Asset {
    type Output = Asset;

    const KEY_ELEMS: u16 = 1;

    fn from_vec(value: Vec<u8>) -> StdResult<Self::Output> {
        <String as KeyDeserialize>::from_vec(value).map(Self)
    }
}

impl KeyDeserialize for &Asset {
    type Output = Asset;

    const KEY_ELEMS: u16 = 1;

    fn from_vec(value: Vec<u8>) -> StdResult<Self::Output> {
        <Asset as KeyDeserialize>::from_vec(value)
    }
}
