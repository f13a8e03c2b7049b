//! Category / sub-category resolution.
//!
//! Priority: keyword in the text > resolved merchant as a keyword >
//! merchant fallback table > direction default.

use crate::rules::RuleTables;
use crate::types::{Category, Direction};

/// Resolves `(category, sub_category)` for a narration.
#[derive(Debug, Clone)]
pub struct CategoryResolver {
    /// `(keyword, sub_category)` sorted longest keyword first
    scan_order: Vec<(String, String)>,
}

impl CategoryResolver {
    pub fn new(rules: &RuleTables) -> Self {
        let scan_order = rules
            .keywords_longest_first()
            .into_iter()
            .map(|k| (k.keyword.clone(), k.sub_category.clone()))
            .collect();
        Self { scan_order }
    }

    pub fn resolve(
        &self,
        text: &str,
        merchant: &str,
        direction: Direction,
        rules: &RuleTables,
    ) -> (Category, String) {
        if let Some(sub) = self.keyword_in_text(text) {
            return (rules.category_for(sub), sub.to_string());
        }

        let merchant = merchant.to_lowercase();
        if let Some(sub) = rules.keyword(&merchant) {
            return (rules.category_for(sub), sub.to_string());
        }

        if let Some(sub) = rules.merchant_fallback(&merchant) {
            return (rules.category_for(sub), sub.to_string());
        }

        direction_default(direction)
    }

    /// Substring scan, longest key first.
    fn keyword_in_text(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.scan_order
            .iter()
            .find(|(keyword, _)| lower.contains(keyword.as_str()))
            .map(|(_, sub)| sub.as_str())
    }
}

fn direction_default(direction: Direction) -> (Category, String) {
    match direction {
        Direction::Credit => (Category::Income, "General Income".to_string()),
        Direction::Debit => (Category::Expense, "General Expense".to_string()),
        Direction::Unknown => (Category::Other, "General".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::KeywordRule;

    fn resolve(text: &str, merchant: &str, direction: Direction) -> (Category, String) {
        let rules = RuleTables::default();
        CategoryResolver::new(&rules).resolve(text, merchant, direction, &rules)
    }

    #[test]
    fn test_electricity_bill_any_direction() {
        for d in [Direction::Credit, Direction::Debit, Direction::Unknown] {
            let (cat, sub) = resolve("Electricity Bill paid", "Unknown", d);
            assert_eq!(cat, Category::Bills);
            assert_eq!(sub, "Electricity");
        }
    }

    #[test]
    fn test_longest_key_wins() {
        let (cat, sub) = resolve("zomato food order", "Zomato", Direction::Debit);
        assert_eq!((cat, sub.as_str()), (Category::Food, "Dining"));

        // "water bill" (10) outranks "emi" (3) even though both are present
        let (cat, sub) = resolve("water bill premium", "Unknown", Direction::Debit);
        assert_eq!((cat, sub.as_str()), (Category::Bills, "Water"));
    }

    #[test]
    fn test_longer_key_declared_later_wins() {
        // declaration order would pick "gas"
        let (cat, sub) = resolve("amazon gas voucher", "Unknown", Direction::Debit);
        assert_eq!((cat, sub.as_str()), (Category::Shopping, "E-commerce"));

        // "subscription" (declared 9th) beats "mobile" (8th) and "emi"
        let (cat, sub) = resolve("mobile premium subscription", "Unknown", Direction::Debit);
        assert_eq!((cat, sub.as_str()), (Category::Bills, "Subscription"));
    }

    #[test]
    fn test_substring_match_inside_words() {
        // "rent" inside "current" still counts
        let (cat, sub) = resolve("current account fee", "Unknown", Direction::Debit);
        assert_eq!((cat, sub.as_str()), (Category::Bills, "Rent"));
    }

    #[test]
    fn test_merchant_as_keyword() {
        let (cat, sub) = resolve("order 7781", "Amazon", Direction::Debit);
        assert_eq!((cat, sub.as_str()), (Category::Shopping, "E-commerce"));
    }

    #[test]
    fn test_merchant_fallback_table() {
        let mut rules = RuleTables::default();
        rules.keywords.retain(|k| k.keyword != "uber");
        let resolver = CategoryResolver::new(&rules);
        let (cat, sub) = resolver.resolve("trip 42", "Uber", Direction::Debit, &rules);
        assert_eq!((cat, sub.as_str()), (Category::Transport, "Ride Sharing"));
    }

    #[test]
    fn test_unmapped_sub_category_is_other() {
        let mut rules = RuleTables::default();
        rules.keywords.push(KeywordRule {
            keyword: "grocery".to_string(),
            sub_category: "Groceries".to_string(),
        });
        let resolver = CategoryResolver::new(&rules);
        let (cat, sub) = resolver.resolve("grocery run", "Unknown", Direction::Debit, &rules);
        assert_eq!((cat, sub.as_str()), (Category::Other, "Groceries"));
    }

    #[test]
    fn test_direction_defaults() {
        let (cat, sub) = resolve("ref 0099", "Unknown", Direction::Credit);
        assert_eq!((cat, sub.as_str()), (Category::Income, "General Income"));
        let (cat, sub) = resolve("ref 0099", "Unknown", Direction::Debit);
        assert_eq!((cat, sub.as_str()), (Category::Expense, "General Expense"));
        let (cat, sub) = resolve("ref 0099", "Unknown", Direction::Unknown);
        assert_eq!((cat, sub.as_str()), (Category::Other, "General"));
    }
}
