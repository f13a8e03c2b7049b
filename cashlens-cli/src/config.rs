use anyhow::{Context, Result};
use cashlens_core::RuleTables;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_cashlens_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: RulesSection,
    pub batch: BatchSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesSection {
    /// TOML rule-table file replacing the built-in tables
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSection {
    pub text_column: String,
    pub parallel: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub preview_rows: usize,
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            text_column: "text".to_string(),
            parallel: true,
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self { preview_rows: 10 }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_cashlens_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

/// Rule tables from `--rules`, else `[rules] path`, else the built-ins.
pub fn load_rules(cfg: &Config, override_path: Option<&Path>) -> Result<RuleTables> {
    let path = override_path
        .map(Path::to_path_buf)
        .or_else(|| cfg.rules.path.as_ref().map(PathBuf::from));

    match path {
        Some(p) => RuleTables::load(&p).with_context(|| format!("loading rules {}", p.display())),
        None => Ok(RuleTables::default()),
    }
}
