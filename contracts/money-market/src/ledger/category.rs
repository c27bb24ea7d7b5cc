use serde::{Deserialize, Serialize};

use sdk::schemars::{self, JsonSchema};

/// A ledger account category
///
/// Cash, Borrow and InterestExpense are debit-normal, a debit increases them.
/// Supply, InterestIncome and Trading are credit-normal, a credit increases them.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cash,
    Borrow,
    Supply,
    InterestExpense,
    InterestIncome,
    Trading,
}

impl Category {
    const ALL: [Self; 6] = [
        Self::Cash,
        Self::Borrow,
        Self::Supply,
        Self::InterestExpense,
        Self::InterestIncome,
        Self::Trading,
    ];

    pub(super) const fn code(self) -> u8 {
        match self {
            Self::Cash => 0,
            Self::Borrow => 1,
            Self::Supply => 2,
            Self::InterestExpense => 3,
            Self::InterestIncome => 4,
            Self::Trading => 5,
        }
    }

    pub(super) fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.code() == code)
    }

    pub const fn is_debit_normal(self) -> bool {
        matches!(self, Self::Cash | Self::Borrow | Self::InterestExpense)
    }

    /// Whether balances in this category are kept per customer as well
    pub const fn is_customer_tracked(self) -> bool {
        matches!(self, Self::Supply | Self::Borrow)
    }

    pub const fn increased_by(self, direction: Direction) -> bool {
        match direction {
            Direction::Debit => self.is_debit_normal(),
            Direction::Credit => !self.is_debit_normal(),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Borrow => "borrow",
            Self::Supply => "supply",
            Self::InterestExpense => "interest_expense",
            Self::InterestIncome => "interest_income",
            Self::Trading => "trading",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}
