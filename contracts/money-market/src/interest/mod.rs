use serde::{Deserialize, Serialize};

use finance::rate::Rate;
use sdk::schemars::{self, JsonSchema};

pub use self::{
    model::InterestModel,
    storage::{block_unit, Indices, Snapshot, SnapshotUpdate},
};

mod model;
pub mod storage;

/// Interest rates per block unit
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct Rates {
    pub supply: Rate,
    pub borrow: Rate,
}
