//! Field extractors: amount, date and direction.
//!
//! Each extractor owns its compiled pattern and scans the raw narration
//! independently. None of them fail on odd input; they fall back to a
//! sentinel instead.

use regex::Regex;

use crate::error::Result;
use crate::types::Direction;

/// Date sentinel used when no `DD/MM/YYYY` token is present
pub const NO_DATE: &str = "--";

/// First currency amount in the text (`Rs. 1,250.50`, `INR 500`, `₹99`).
#[derive(Debug, Clone)]
pub struct AmountExtractor {
    re: Regex,
}

impl AmountExtractor {
    pub fn new() -> Result<Self> {
        let re = Regex::new(r"(?i)(?:rs\.?|inr|₹)\s*₹?\s*(?P<amt>[0-9,]+\.?[0-9]*)")?;
        Ok(Self { re })
    }

    /// `None` when no marked amount exists; zero is a real amount.
    pub fn extract(&self, text: &str) -> Option<f64> {
        let caps = self.re.captures(text)?;
        let digits = caps["amt"].replace(',', "");
        let digits = digits.strip_suffix('.').unwrap_or(&digits);
        digits.parse().ok()
    }
}

/// First `DD/MM/YYYY` token, without calendar validation.
#[derive(Debug, Clone)]
pub struct DateExtractor {
    re: Regex,
}

impl DateExtractor {
    pub fn new() -> Result<Self> {
        let re = Regex::new(r"[0-9]{2}/[0-9]{2}/[0-9]{4}")?;
        Ok(Self { re })
    }

    pub fn extract(&self, text: &str) -> String {
        self.re
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| NO_DATE.to_string())
    }
}

/// Whole-word debit/credit vocabulary scan. Debit wins when both match.
#[derive(Debug, Clone)]
pub struct DirectionClassifier {
    debit_re: Regex,
    credit_re: Regex,
}

impl DirectionClassifier {
    pub fn new() -> Result<Self> {
        let debit_re =
            Regex::new(r"(?i)\b(?:debit|debited|spent|withdrawn|paid|payment|purchase|pos)\b")?;
        let credit_re =
            Regex::new(r"(?i)\b(?:credit|credited|received|salary|cashback|deposit)\b")?;
        Ok(Self {
            debit_re,
            credit_re,
        })
    }

    pub fn classify(&self, text: &str) -> Direction {
        if self.debit_re.is_match(text) {
            Direction::Debit
        } else if self.credit_re.is_match(text) {
            Direction::Credit
        } else {
            Direction::Unknown
        }
    }
}
