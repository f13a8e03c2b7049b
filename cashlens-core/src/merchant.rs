//! Merchant resolution.
//!
//! Precedence, first hit wins:
//! 1. a known merchant token as a whole word
//! 2. the name following a preposition cue (`at`, `to`, `via`, `from`, `on`)
//! 3. the synthetic merchant for an already-resolved sub-category
//! 4. `"Unknown"`

use regex::Regex;

use crate::error::Result;
use crate::rules::RuleTables;

pub const UNKNOWN_MERCHANT: &str = "Unknown";

/// Resolves a counterparty name from narration text.
#[derive(Debug, Clone)]
pub struct MerchantResolver {
    /// One whole-word pattern per merchant token, in table order
    known: Vec<(Regex, String)>,
    cue_re: Regex,
}

impl MerchantResolver {
    pub fn new(rules: &RuleTables) -> Result<Self> {
        let known = rules
            .merchants
            .iter()
            .map(|m| -> Result<(Regex, String)> {
                let re = Regex::new(&format!(r"\b{}\b", regex::escape(&m.token)))?;
                Ok((re, capitalize(&m.token)))
            })
            .collect::<Result<Vec<_>>>()?;

        let cue_re = Regex::new(
            r"(?i)\b(?:at|to|via|from|on)\s+(?P<name>[A-Za-z][A-Za-z&.\-\s]{1,30})",
        )?;

        Ok(Self { known, cue_re })
    }

    /// Resolve a merchant. `sub_category` only matters when the text itself
    /// yields nothing.
    pub fn resolve(&self, text: &str, sub_category: Option<&str>, rules: &RuleTables) -> String {
        if let Some(name) = self.known_merchant(text) {
            return name.to_string();
        }

        if let Some(name) = self.cue_merchant(text) {
            return name;
        }

        sub_category
            .and_then(|sub| rules.fallback_merchant(sub))
            .unwrap_or(UNKNOWN_MERCHANT)
            .to_string()
    }

    fn known_merchant(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.known
            .iter()
            .find(|(re, _)| re.is_match(&lower))
            .map(|(_, name)| name.as_str())
    }

    fn cue_merchant(&self, text: &str) -> Option<String> {
        let caps = self.cue_re.captures(text)?;
        let words: Vec<&str> = caps["name"]
            .split_whitespace()
            .filter(|w| !w.chars().all(|c| c.is_ascii_digit()))
            .take(2)
            .collect();
        if words.is_empty() {
            return None;
        }
        Some(title_case(&words.join(" ")))
    }
}

/// First character uppercased, the rest lowercased.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Uppercase letters that start a word (follow a non-letter), lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
