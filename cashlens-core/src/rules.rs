//! Rule tables driving merchant and category inference.
//!
//! Tables are plain owned data built once (from the built-in defaults or a
//! TOML file) and then only read. Ordered tables keep declaration order
//! because the scans over them are first-match-wins.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Category;

/// Known merchant token with its coarse category hint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantRule {
    pub token: String,
    pub category: Category,
}

/// Keyword or phrase mapped to a sub-category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub sub_category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTables {
    /// Merchant token → category hint, scanned in order
    pub merchants: Vec<MerchantRule>,
    /// Keyword → sub-category, scanned longest key first
    pub keywords: Vec<KeywordRule>,
    /// Sub-category → category; missing entries mean `Other`
    pub sub_categories: BTreeMap<String, Category>,
    /// Sub-category → synthetic merchant name
    pub fallback_merchants: BTreeMap<String, String>,
    /// Merchant token → sub-category, consulted after the keyword table misses
    pub merchant_fallbacks: BTreeMap<String, String>,
}

impl RuleTables {
    /// Parse tables from a TOML document, normalizing and validating keys.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut tables: RuleTables = toml::from_str(s)?;
        tables.normalize()?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&s)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Category for a sub-category label (`Other` when unmapped)
    pub fn category_for(&self, sub_category: &str) -> Category {
        self.sub_categories
            .get(sub_category)
            .copied()
            .unwrap_or(Category::Other)
    }

    /// Exact keyword lookup (no substring matching)
    pub fn keyword(&self, key: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| k.keyword == key)
            .map(|k| k.sub_category.as_str())
    }

    pub fn fallback_merchant(&self, sub_category: &str) -> Option<&str> {
        self.fallback_merchants.get(sub_category).map(String::as_str)
    }

    pub fn merchant_fallback(&self, token: &str) -> Option<&str> {
        self.merchant_fallbacks.get(token).map(String::as_str)
    }

    /// Keyword rules ordered for scanning: longest key first, ties keep
    /// declaration order.
    pub fn keywords_longest_first(&self) -> Vec<&KeywordRule> {
        let mut ordered: Vec<&KeywordRule> = self.keywords.iter().collect();
        ordered.sort_by(|a, b| b.keyword.chars().count().cmp(&a.keyword.chars().count()));
        ordered
    }

    /// Lowercase and trim every key that is matched against narration text.
    ///
    /// Fails when two `merchant_fallbacks` keys collapse onto the same
    /// normalized key, since the map cannot hold both.
    pub fn normalize(&mut self) -> Result<()> {
        for m in &mut self.merchants {
            m.token = m.token.trim().to_lowercase();
        }
        for k in &mut self.keywords {
            k.keyword = k.keyword.trim().to_lowercase();
        }
        let mut fallbacks = BTreeMap::new();
        for (k, v) in std::mem::take(&mut self.merchant_fallbacks) {
            let key = k.trim().to_lowercase();
            if fallbacks.contains_key(&key) {
                return Err(invalid("merchant_fallbacks", format!("duplicate key `{key}`")));
            }
            fallbacks.insert(key, v);
        }
        self.merchant_fallbacks = fallbacks;
        Ok(())
    }

    /// Reject empty keys and keys declared twice in an ordered table.
    pub fn validate(&self) -> Result<()> {
        check_keys("merchants", self.merchants.iter().map(|m| m.token.as_str()))?;
        check_keys("keywords", self.keywords.iter().map(|k| k.keyword.as_str()))?;
        if self.merchant_fallbacks.keys().any(|k| k.is_empty()) {
            return Err(invalid("merchant_fallbacks", "empty key".to_string()));
        }
        if self.sub_categories.keys().any(|k| k.is_empty()) {
            return Err(invalid("sub_categories", "empty sub-category label".to_string()));
        }
        if self.fallback_merchants.keys().any(|k| k.is_empty()) {
            return Err(invalid("fallback_merchants", "empty sub-category label".to_string()));
        }
        Ok(())
    }
}

fn check_keys<'a>(table: &'static str, keys: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for key in keys {
        if key.is_empty() {
            return Err(invalid(table, "empty key".to_string()));
        }
        if !seen.insert(key) {
            return Err(invalid(table, format!("duplicate key `{key}`")));
        }
    }
    Ok(())
}

fn invalid(table: &'static str, reason: String) -> Error {
    Error::InvalidRule { table, reason }
}

impl Default for RuleTables {
    fn default() -> Self {
        let merchants = [
            ("zomato", Category::Food),
            ("swiggy", Category::Food),
            ("dominos", Category::Food),
            ("amazon", Category::Shopping),
            ("flipkart", Category::Shopping),
            ("myntra", Category::Shopping),
            ("uber", Category::Transport),
            ("ola", Category::Transport),
            ("paytm", Category::Upi),
            ("gpay", Category::Upi),
            ("googlepay", Category::Upi),
            ("phonepe", Category::Upi),
            ("atm", Category::CashWithdrawal),
            ("salary", Category::Income),
            ("neft", Category::Income),
            ("rahul", Category::Upi),
        ]
        .into_iter()
        .map(|(token, category)| MerchantRule {
            token: token.to_string(),
            category,
        })
        .collect();

        let keywords = [
            ("electricity bill", "Electricity"),
            ("electricity", "Electricity"),
            ("water bill", "Water"),
            ("water", "Water"),
            ("rent", "Rent"),
            ("gas", "Gas"),
            ("internet", "Internet"),
            ("mobile", "Mobile"),
            ("subscription", "Subscription"),
            ("netflix", "Subscription"),
            ("emi", "EMI"),
            ("loan", "Loan"),
            ("salary", "Salary"),
            ("cashback", "Cashback"),
            ("fashion", "Fashion"),
            ("food", "Dining"),
            ("pizza", "Dining"),
            ("dominos", "Dining"),
            ("myntra", "Fashion"),
            ("flipkart", "E-commerce"),
            ("amazon", "E-commerce"),
            ("zomato", "Dining"),
            ("uber", "Ride Sharing"),
            ("atm", "ATM Withdrawal"),
            ("phonepe", "UPI Payment"),
            ("paytm", "UPI Payment"),
            ("gpay", "UPI Payment"),
            ("googlepay", "UPI Payment"),
            ("neft", "NEFT Transfer"),
            ("rahul", "UPI Transfer"),
        ]
        .into_iter()
        .map(|(keyword, sub)| KeywordRule {
            keyword: keyword.to_string(),
            sub_category: sub.to_string(),
        })
        .collect();

        let sub_categories = [
            ("Electricity", Category::Bills),
            ("Water", Category::Bills),
            ("Rent", Category::Bills),
            ("Gas", Category::Bills),
            ("Internet", Category::Bills),
            ("Mobile", Category::Bills),
            ("Subscription", Category::Bills),
            ("Fashion", Category::Shopping),
            ("Dining", Category::Food),
            ("E-commerce", Category::Shopping),
            ("Ride Sharing", Category::Transport),
            ("EMI", Category::LoansEmi),
            ("Loan", Category::LoansEmi),
            ("Salary", Category::Income),
            ("Cashback", Category::Income),
            ("NEFT Transfer", Category::Income),
            ("ATM Withdrawal", Category::CashWithdrawal),
            ("UPI Transfer", Category::Upi),
            ("UPI Payment", Category::Upi),
        ]
        .into_iter()
        .map(|(sub, cat)| (sub.to_string(), cat))
        .collect();

        RuleTables {
            merchants,
            keywords,
            sub_categories,
            fallback_merchants: string_map(&[
                ("Rent", "Landlord"),
                ("Electricity", "Electricity Board"),
                ("Internet", "ISP Provider"),
                ("Water", "Water Department"),
                ("Gas", "Gas Provider"),
                ("Mobile", "Mobile Operator"),
                ("Subscription", "Subscription Service"),
                ("EMI", "EMI Provider"),
                ("Loan", "Loan Provider"),
                ("UPI Payment", "UPI Payment"),
                ("UPI Transfer", "UPI Transfer"),
                ("ATM Withdrawal", "ATM"),
                ("Salary", "Employer"),
                ("Cashback", "Cashback Source"),
                ("NEFT Transfer", "Bank Transfer"),
                ("Dining", "Restaurant"),
                ("Fashion", "Fashion Store"),
                ("E-commerce", "Online Store"),
                ("General Expense", "Expense"),
                ("General Income", "Income"),
            ]),
            merchant_fallbacks: string_map(&[
                ("atm", "ATM Withdrawal"),
                ("uber", "Ride Sharing"),
                ("amazon", "E-commerce"),
                ("flipkart", "E-commerce"),
                ("zomato", "Dining"),
                ("dominos", "Dining"),
                ("myntra", "Fashion"),
                ("salary", "Salary"),
                ("neft", "NEFT Transfer"),
                ("rahul", "UPI Transfer"),
            ]),
        }
    }
}

fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
