//! cashlens-core: narration classifier turning bank-transaction text into
//! dated, directed, categorized records.

pub mod category;
pub mod classifier;
pub mod error;
pub mod extract;
pub mod merchant;
pub mod rules;
pub mod types;

pub use category::CategoryResolver;
pub use classifier::Classifier;
pub use error::{Error, Result};
pub use extract::{AmountExtractor, DateExtractor, DirectionClassifier, NO_DATE};
pub use merchant::{MerchantResolver, UNKNOWN_MERCHANT};
pub use rules::{KeywordRule, MerchantRule, RuleTables};
pub use types::{Category, Direction, TransactionRecord};
