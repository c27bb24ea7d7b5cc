use std::fmt::Debug;

use thiserror::Error;

use crate::percent::Units;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("[Finance] Arithmetic overflow when evaluating `{details}`")]
    Overflow { details: String },

    #[error("[Finance] Division by zero when evaluating `{details}`")]
    DivisionByZero { details: String },

    #[error(
        "[Finance] [Percent] Upper bound has been crossed! Upper bound is: {bound}, but got: {value}!"
    )]
    UpperBoundCrossed { bound: Units, value: Units },
}

impl Error {
    pub fn overflow<L, R>(operation: &str, lhs: L, rhs: R) -> Self
    where
        L: Debug,
        R: Debug,
    {
        Self::Overflow {
            details: format!("{operation}({lhs:?}, {rhs:?})"),
        }
    }

    pub fn division_by_zero<L>(operation: &str, lhs: L) -> Self
    where
        L: Debug,
    {
        Self::DivisionByZero {
            details: format!("{operation}({lhs:?}, 0)"),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::Error;

    #[test]
    fn overflow_details() {
        let err = Error::overflow("checked_mul", 3u8, 200u8);
        assert_eq!(
            "[Finance] Arithmetic overflow when evaluating `checked_mul(3, 200)`",
            err.to_string()
        );
    }

    #[test]
    fn division_by_zero_details() {
        assert_eq!(
            Error::DivisionByZero {
                details: "convert(12, 0)".into(),
            },
            Error::division_by_zero("convert", 12)
        );
    }
}
