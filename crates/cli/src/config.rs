// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI configuration
//!
//! Looked up in order: `--config`, `$LAB_CONFIG`, then
//! `<user config dir>/lab/config.toml`. A missing default file means
//! defaults; a missing explicit file is an error.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const ENV_CONFIG: &str = "LAB_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default job output location when `--output-dir` is absent
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Default log filter when neither LAB_LOG nor RUST_LOG is set
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        if let Some(path) = std::env::var_os(ENV_CONFIG) {
            return Self::read(Path::new(&path));
        }
        match default_path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

fn default_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("lab").join("config.toml"))
}
