//! CLI configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first, if present.
//!
//! ## Optional Variables
//!
//! - `DOSECALC_DB` - State database path (default: `dosecalc.db`)
//! - `DOSECALC_LOCALE` - Decimal separator: `dot` or `comma` (default: `dot`)
//! - `DOSECALC_DECIMALS` - Fractional digits shown (default: 3, max: 6)
//! - `RUST_LOG` - Log filter (default: `warn`)
//!
//! Command-line flags take precedence over all of these.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Result};
use peptide_dose_core::format::DEFAULT_DECIMALS;
use peptide_dose_core::NumberLocale;

/// Upper bound on displayed fractional digits.
pub const MAX_DECIMALS: usize = 6;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub locale: NumberLocale,
    pub decimals: usize,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("dosecalc.db"),
            locale: NumberLocale::Dot,
            decimals: DEFAULT_DECIMALS,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DOSECALC_LOCALE` names an unknown convention.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let db_path = lookup("DOSECALC_DB")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let locale = match lookup("DOSECALC_LOCALE") {
            Some(value) => parse_locale(&value)?,
            None => defaults.locale,
        };

        let decimals = lookup("DOSECALC_DECIMALS")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(defaults.decimals)
            .min(MAX_DECIMALS);

        let log_level = lookup("RUST_LOG").unwrap_or(defaults.log_level);

        Ok(Self {
            db_path,
            locale,
            decimals,
            log_level,
        })
    }
}

/// Parse a decimal-separator convention name.
pub fn parse_locale(value: &str) -> Result<NumberLocale> {
    match value.trim().to_lowercase().as_str() {
        "dot" | "en" | "en-us" | "en-gb" => Ok(NumberLocale::Dot),
        "comma" | "es" | "es-es" => Ok(NumberLocale::Comma),
        other => bail!("unknown locale '{}' (expected 'dot' or 'comma')", other),
    }
}
