use sdk::cosmwasm_std::{Decimal256, Uint128, Uint256};

pub trait Zero {
    const ZERO: Self;
}

macro_rules! impl_cw_zero {
    ($($type: ty),+ $(,)?) => {
        $(
            impl Zero for $type {
                const ZERO: Self = Self::zero();
            }
        )+
    };
}

impl_cw_zero!(Uint128, Uint256);

impl Zero for Decimal256 {
    const ZERO: Self = Self::zero();
}
