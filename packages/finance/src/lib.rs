pub mod coin;
pub mod error;
pub mod index;
pub mod percent;
pub mod price;
pub mod rate;
pub mod zero;
