//! Classification pipeline: one narration in, one record out.

use crate::category::CategoryResolver;
use crate::error::Result;
use crate::extract::{AmountExtractor, DateExtractor, DirectionClassifier};
use crate::merchant::MerchantResolver;
use crate::rules::RuleTables;
use crate::types::TransactionRecord;

/// Owns the rule tables and every compiled pattern.
///
/// Construction compiles once; `classify` is read-only, so a single
/// `Classifier` can be shared across threads.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: RuleTables,
    amount: AmountExtractor,
    date: DateExtractor,
    direction: DirectionClassifier,
    merchant: MerchantResolver,
    category: CategoryResolver,
}

impl Classifier {
    /// Classifier over the built-in rule tables
    pub fn new() -> Result<Self> {
        Self::with_rules(RuleTables::default())
    }

    /// Classifier over custom tables. Keys are normalized before the
    /// patterns are compiled, so mixed-case tables built in code still match.
    pub fn with_rules(mut rules: RuleTables) -> Result<Self> {
        rules.normalize()?;
        rules.validate()?;
        Ok(Self {
            amount: AmountExtractor::new()?,
            date: DateExtractor::new()?,
            direction: DirectionClassifier::new()?,
            merchant: MerchantResolver::new(&rules)?,
            category: CategoryResolver::new(&rules),
            rules,
        })
    }

    pub fn rules(&self) -> &RuleTables {
        &self.rules
    }

    pub fn classify(&self, text: &str) -> TransactionRecord {
        let amount = self.amount.extract(text);
        let date = self.date.extract(text);
        let direction = self.direction.classify(text);

        // First pass: text-only merchant, used to seed category resolution
        let initial_merchant = self.merchant.resolve(text, None, &self.rules);
        let (category, sub_category) =
            self.category
                .resolve(text, &initial_merchant, direction, &self.rules);

        // Second pass may fall back to the sub-category's synthetic merchant
        let merchant = self.merchant.resolve(text, Some(sub_category.as_str()), &self.rules);

        TransactionRecord {
            date,
            amount,
            merchant,
            category,
            sub_category,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{KeywordRule, MerchantRule};
    use crate::types::{Category, Direction};

    #[test]
    fn test_rent_gets_landlord() {
        let c = Classifier::new().unwrap();
        let r = c.classify("Monthly rent debited 01/05/2024");
        assert_eq!(r.category, Category::Bills);
        assert_eq!(r.sub_category, "Rent");
        assert_eq!(r.merchant, "Landlord");
        assert_eq!(r.direction, Direction::Debit);
        assert_eq!(r.date, "01/05/2024");
        assert_eq!(r.amount, None);
    }

    #[test]
    fn test_general_expense_merchant() {
        let c = Classifier::new().unwrap();
        let r = c.classify("POS 4411 swipe");
        assert_eq!(r.category, Category::Expense);
        assert_eq!(r.sub_category, "General Expense");
        assert_eq!(r.merchant, "Expense");
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let mut rules = RuleTables::default();
        rules.merchants[1].token = "zomato".to_string();
        assert!(Classifier::with_rules(rules).is_err());
    }

    #[test]
    fn test_mixed_case_rules_built_in_code() {
        let mut rules = RuleTables::default();
        rules.merchants.push(MerchantRule {
            token: "BigBasket".to_string(),
            category: Category::Shopping,
        });
        rules.keywords.push(KeywordRule {
            keyword: "Grocery".to_string(),
            sub_category: "Groceries".to_string(),
        });
        rules.sub_categories.insert("Groceries".to_string(), Category::Shopping);

        let c = Classifier::with_rules(rules).unwrap();
        assert_eq!(c.rules().merchants.last().unwrap().token, "bigbasket");

        let r = c.classify("BigBasket grocery order debited");
        assert_eq!(r.merchant, "Bigbasket");
        assert_eq!(r.sub_category, "Groceries");
        assert_eq!(r.category, Category::Shopping);
        assert_eq!(r.direction, Direction::Debit);
    }

    #[test]
    fn test_shorter_keyword_declared_first_loses() {
        // "gas" is declared before "amazon"; the longer key must still win
        let c = Classifier::new().unwrap();
        let r = c.classify("amazon gas voucher");
        assert_eq!(r.sub_category, "E-commerce");
        assert_eq!(r.category, Category::Shopping);
        assert_eq!(r.merchant, "Amazon");
    }

    #[test]
    fn test_classifier_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Classifier>();
    }
}
