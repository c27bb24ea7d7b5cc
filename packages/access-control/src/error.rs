use thiserror::Error;

use sdk::cosmwasm_std::StdError;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("[Access Control] Unauthorized access!")]
    Unauthorized {},

    #[error("[Access Control] [Std] {0}")]
    Std(String),
}

impl From<StdError> for Error {
    fn from(error: StdError) -> Self {
        Self::Std(error.to_string())
    }
}

pub type Result<T = ()> = std::result::Result<T, Error>;
