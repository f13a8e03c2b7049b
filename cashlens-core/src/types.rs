//! Record types produced by the classifier

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extract::NO_DATE;

/// A single classified narration.
///
/// Absence is always carried by a sentinel (`"--"` date, `"Unknown"`
/// merchant, `Direction::Unknown`) except for the amount, which is `None`
/// so that "no amount" and zero stay distinguishable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    /// `DD/MM/YYYY` as found in the text, or `"--"`
    pub date: String,
    /// Positive amount; sign semantics live in `direction`
    pub amount: Option<f64>,
    /// Title-cased counterparty name, or `"Unknown"`
    pub merchant: String,
    pub category: Category,
    pub sub_category: String,
    pub direction: Direction,
}

impl TransactionRecord {
    /// Parse the date into a calendar date.
    ///
    /// Returns `None` for the `--` sentinel and for dates that only match
    /// syntactically (e.g. `32/13/2024`).
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        if self.date == NO_DATE {
            return None;
        }
        NaiveDate::parse_from_str(&self.date, "%d/%m/%Y").ok()
    }

    /// Amount with the direction applied: debits negative, credits positive.
    pub fn signed_amount(&self) -> Option<f64> {
        let amount = self.amount?;
        match self.direction {
            Direction::Credit => Some(amount),
            Direction::Debit => Some(-amount),
            Direction::Unknown => None,
        }
    }
}

/// Money-in vs money-out
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Credit,
    Debit,
    Unknown,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Credit => "Credit",
            Direction::Debit => "Debit",
            Direction::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse transaction categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "Food")]
    Food,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Transport")]
    Transport,
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Cash Withdrawal")]
    CashWithdrawal,
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Bills")]
    Bills,
    #[serde(rename = "Loans/EMI")]
    LoansEmi,
    #[serde(rename = "Expense")]
    Expense,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Display label, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Shopping => "Shopping",
            Category::Transport => "Transport",
            Category::Upi => "UPI",
            Category::CashWithdrawal => "Cash Withdrawal",
            Category::Income => "Income",
            Category::Bills => "Bills",
            Category::LoansEmi => "Loans/EMI",
            Category::Expense => "Expense",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
