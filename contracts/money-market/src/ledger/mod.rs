pub use self::{
    category::{Category, Direction},
    journal::{entries, LedgerEntry, Reason},
    sheet::{BalanceSheet, Checkpoint, Position, Posting},
};

mod category;
mod journal;
mod sheet;
