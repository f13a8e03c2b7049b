//! Error types for cashlens-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid rule in table `{table}`: {reason}")]
    InvalidRule { table: &'static str, reason: String },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Rule table parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Rule table serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
