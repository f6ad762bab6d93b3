//! Parsing of unit and mode names.
//!
//! Handles:
//! - Case-insensitive aliases (µg→mcg, ui→iu, cc→ml)
//! - Suggestions for misspelled names

use std::str::FromStr;

use strsim::{jaro_winkler, normalized_levenshtein};
use thiserror::Error;

use crate::models::{DisplayMode, DoseUnit, PotencyUnit, ReadingKind, RoundingPrecision};

/// Minimum similarity for a suggestion to be offered.
const SUGGESTION_THRESHOLD: f64 = 0.6;

/// Unknown unit or mode name.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitParseError {
    #[error("unknown {kind} '{input}', did you mean '{suggestion}'?")]
    UnknownWithSuggestion {
        kind: &'static str,
        input: String,
        suggestion: String,
    },

    #[error("unknown {kind} '{input}' (expected one of: {expected})")]
    Unknown {
        kind: &'static str,
        input: String,
        expected: String,
    },
}

const DOSE_UNIT_ALIASES: &[(&str, DoseUnit)] = &[
    ("mg", DoseUnit::Mg),
    ("milligram", DoseUnit::Mg),
    ("milligrams", DoseUnit::Mg),
    ("mcg", DoseUnit::Mcg),
    ("µg", DoseUnit::Mcg),
    ("μg", DoseUnit::Mcg),
    ("ug", DoseUnit::Mcg),
    ("microgram", DoseUnit::Mcg),
    ("micrograms", DoseUnit::Mcg),
];

const POTENCY_UNIT_ALIASES: &[(&str, PotencyUnit)] = &[
    ("iu", PotencyUnit::Iu),
    ("ui", PotencyUnit::Iu),
    ("units", PotencyUnit::Iu),
    ("mg", PotencyUnit::Mg),
    ("milligram", PotencyUnit::Mg),
    ("milligrams", PotencyUnit::Mg),
];

const READING_KIND_ALIASES: &[(&str, ReadingKind)] = &[
    ("ml", ReadingKind::Ml),
    ("cc", ReadingKind::Ml),
    ("units", ReadingKind::Units),
    ("unit", ReadingKind::Units),
    ("u", ReadingKind::Units),
    ("u100", ReadingKind::Units),
    ("u-100", ReadingKind::Units),
];

const ROUNDING_ALIASES: &[(&str, RoundingPrecision)] = &[
    ("none", RoundingPrecision::None),
    ("off", RoundingPrecision::None),
    ("1", RoundingPrecision::One),
    ("1.0", RoundingPrecision::One),
    ("0.5", RoundingPrecision::Half),
    (".5", RoundingPrecision::Half),
    ("half", RoundingPrecision::Half),
];

const DISPLAY_MODE_ALIASES: &[(&str, DisplayMode)] = &[
    ("ml", DisplayMode::Ml),
    ("u100", DisplayMode::U100),
    ("u-100", DisplayMode::U100),
    ("units", DisplayMode::U100),
    ("both", DisplayMode::Both),
];

/// Look up `input` in an alias table, suggesting the closest alias on a miss.
fn lookup<T: Copy>(
    kind: &'static str,
    input: &str,
    table: &[(&str, T)],
) -> Result<T, UnitParseError> {
    let needle = input.trim().to_lowercase();
    if let Some((_, value)) = table.iter().find(|(alias, _)| *alias == needle) {
        return Ok(*value);
    }

    let best = table
        .iter()
        .map(|(alias, _)| (*alias, similarity(&needle, alias)))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    match best {
        Some((alias, score)) if score >= SUGGESTION_THRESHOLD => {
            Err(UnitParseError::UnknownWithSuggestion {
                kind,
                input: input.to_string(),
                suggestion: alias.to_string(),
            })
        }
        _ => {
            let mut expected: Vec<&str> = table.iter().map(|(alias, _)| *alias).collect();
            expected.dedup();
            Err(UnitParseError::Unknown {
                kind,
                input: input.to_string(),
                expected: expected.join(", "),
            })
        }
    }
}

/// Combined string similarity in [0, 1].
fn similarity(a: &str, b: &str) -> f64 {
    jaro_winkler(a, b) * 0.6 + normalized_levenshtein(a, b) * 0.4
}

impl FromStr for DoseUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("dose unit", s, DOSE_UNIT_ALIASES)
    }
}

impl FromStr for PotencyUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("potency unit", s, POTENCY_UNIT_ALIASES)
    }
}

impl FromStr for ReadingKind {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("reading type", s, READING_KIND_ALIASES)
    }
}

impl FromStr for RoundingPrecision {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("rounding precision", s, ROUNDING_ALIASES)
    }
}

impl FromStr for DisplayMode {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("display mode", s, DISPLAY_MODE_ALIASES)
    }
}
