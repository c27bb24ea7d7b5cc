use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use sdk::schemars::{self, JsonSchema};

use crate::{
    coin::Amount,
    error::{Error, Result},
    rate::Rate,
    zero::Zero,
};

/// Basis points, one hundredth of a percent
pub type Units = u32;

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(transparent)]
pub struct Percent(Units);

impl Percent {
    pub const ZERO: Self = Self::from_bps(0);
    pub const HUNDRED: Self = Self::from_bps(10_000);

    pub const fn from_bps(bps: Units) -> Self {
        Self(bps)
    }

    pub const fn from_percent(percent: u16) -> Self {
        Self(percent as Units * 100)
    }

    pub const fn units(&self) -> Units {
        self.0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Ensure the value does not exceed `bound`
    pub fn bounded_by(self, bound: Self) -> Result<Self> {
        if self <= bound {
            Ok(self)
        } else {
            Err(Error::UpperBoundCrossed {
                bound: bound.units(),
                value: self.units(),
            })
        }
    }

    /// The part of `whole` this percent represents, truncated
    pub fn of(&self, whole: Amount) -> Result<Amount> {
        whole
            .checked_multiply_ratio(self.0, Self::HUNDRED.0)
            .map_err(|_| Error::overflow("percent_of", whole, self))
    }

    pub fn to_rate(self) -> Rate {
        Rate::from_bps(self.0)
    }
}

impl Zero for Percent {
    const ZERO: Self = Self::ZERO;
}

impl Display for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        const BPS_PER_PERCENT: Units = 100;

        let whole = self.0 / BPS_PER_PERCENT;
        let fractional = self.0 % BPS_PER_PERCENT;
        if fractional == 0 {
            write!(f, "{whole}%")
        } else if fractional % 10 == 0 {
            write!(f, "{whole}.{}%", fractional / 10)
        } else {
            write!(f, "{whole}.{fractional:02}%")
        }
    }
}

#[cfg(test)]
mod test {
    use sdk::cosmwasm_std::{from_json, to_json_vec};

    use crate::{coin::Amount, error::Error, percent::Percent};

    #[test]
    fn constants() {
        assert_eq!(10_000, Percent::HUNDRED.units());
        assert_eq!(Percent::from_bps(1_500), Percent::from_percent(15));
        assert_eq!(Percent::HUNDRED, Percent::from_percent(100));
    }

    #[test]
    fn add_sub() {
        assert_eq!(
            Some(Percent::from_bps(40)),
            Percent::from_bps(25).checked_add(Percent::from_bps(15))
        );
        assert_eq!(
            Some(Percent::from_percent(90)),
            Percent::HUNDRED.checked_sub(Percent::from_percent(10))
        );
        assert_eq!(None, Percent::from_bps(34).checked_sub(Percent::from_bps(35)));
    }

    #[test]
    fn bounded_by() {
        assert_eq!(
            Ok(Percent::HUNDRED),
            Percent::HUNDRED.bounded_by(Percent::HUNDRED)
        );
        assert_eq!(
            Err(Error::UpperBoundCrossed {
                bound: 10_000,
                value: 10_001
            }),
            Percent::from_bps(10_001).bounded_by(Percent::HUNDRED)
        );
    }

    #[test]
    fn of() {
        assert_eq!(
            Amount::new(160),
            Percent::from_percent(200).of(Amount::new(80)).unwrap()
        );
        assert_eq!(
            Amount::new(1),
            Percent::from_bps(1_999).of(Amount::new(10)).unwrap()
        );
        assert_eq!(Amount::zero(), Percent::ZERO.of(Amount::new(1_000)).unwrap());
        assert!(Percent::from_percent(200).of(Amount::MAX).is_err());
    }

    #[test]
    fn display() {
        assert_eq!("0%", Percent::ZERO.to_string());
        assert_eq!("0.01%", Percent::from_bps(1).to_string());
        assert_eq!("1.5%", Percent::from_bps(150).to_string());
        assert_eq!("12.34%", Percent::from_bps(1_234).to_string());
        assert_eq!("100%", Percent::HUNDRED.to_string());
    }

    #[test]
    fn serde() {
        assert_eq!(b"150".to_vec(), to_json_vec(&Percent::from_bps(150)).unwrap());
        assert_eq!(Percent::from_bps(7), from_json::<Percent>(b"7").unwrap());
    }
}
