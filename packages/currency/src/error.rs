use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("[Currency] Empty asset denomination")]
    EmptyDenom,

    #[error("[Currency] The asset denomination '{0}' contains invalid characters")]
    InvalidDenom(String),
}

pub type Result<T> = std::result::Result<T, Error>;
