use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn cashlens_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".cashlens"))
}

pub fn ensure_cashlens_home() -> Result<PathBuf> {
    let dir = cashlens_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
