//! Key-value store for last-used calculator inputs.
//!
//! Callers load once at start and save on every change; a save whose
//! content matches the stored digest is skipped.

use rusqlite::{params, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use sha2::{Digest, Sha256};

use super::{Database, DbError, DbResult};
use crate::models::CalculatorInputs;

/// Key under which the syringe calculator inputs are stored.
pub const INPUTS_KEY: &str = "vial-calculator-state";

/// A stored value with its bookkeeping columns.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRecord {
    pub key: String,
    pub value: String,
    pub digest: String,
    pub updated_at: String,
}

/// SHA-256 hex digest of a stored value.
pub fn content_digest(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

impl Database {
    /// Store `value` under `key`.
    ///
    /// Returns `false` when the stored content was already identical.
    pub fn save_state<T: Serialize>(&self, key: &str, value: &T) -> DbResult<bool> {
        let json = serde_json::to_string(value)?;
        let digest = content_digest(&json);

        if self.state_digest(key)?.as_deref() == Some(digest.as_str()) {
            tracing::debug!(key, "state unchanged, skipping write");
            return Ok(false);
        }

        self.conn.execute(
            "INSERT OR REPLACE INTO calculator_state (key, value, digest, updated_at) VALUES (?1, ?2, ?3, ?4)",
            params![key, json, digest, chrono::Utc::now().to_rfc3339()],
        )?;
        tracing::debug!(key, %digest, "state saved");
        Ok(true)
    }

    /// Load and deserialize the value stored under `key`.
    pub fn load_state<T: DeserializeOwned>(&self, key: &str) -> DbResult<Option<T>> {
        let Some(record) = self.get_state_record(key)? else {
            return Ok(None);
        };

        if content_digest(&record.value) != record.digest {
            return Err(DbError::Corrupt {
                key: key.to_string(),
                reason: "digest mismatch".into(),
            });
        }

        Ok(Some(serde_json::from_str(&record.value)?))
    }

    /// Get the raw record stored under `key`.
    pub fn get_state_record(&self, key: &str) -> DbResult<Option<StateRecord>> {
        self.conn
            .query_row(
                "SELECT key, value, digest, updated_at FROM calculator_state WHERE key = ?",
                [key],
                |row| {
                    Ok(StateRecord {
                        key: row.get(0)?,
                        value: row.get(1)?,
                        digest: row.get(2)?,
                        updated_at: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// Remove the value stored under `key`.
    pub fn delete_state(&self, key: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM calculator_state WHERE key = ?", [key])?;
        Ok(rows_affected > 0)
    }

    fn state_digest(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT digest FROM calculator_state WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    // =========================================================================
    // Calculator inputs
    // =========================================================================

    /// Save the calculator inputs. Returns whether anything was written.
    pub fn save_inputs(&self, inputs: &CalculatorInputs) -> DbResult<bool> {
        self.save_state(INPUTS_KEY, inputs)
    }

    /// Load the last-used inputs, falling back to defaults.
    ///
    /// An unreadable stored value is treated like a missing one.
    pub fn load_inputs(&self) -> DbResult<CalculatorInputs> {
        match self.load_state::<CalculatorInputs>(INPUTS_KEY) {
            Ok(Some(inputs)) => Ok(inputs),
            Ok(None) => Ok(CalculatorInputs::default()),
            Err(e @ (DbError::Json(_) | DbError::Corrupt { .. })) => {
                tracing::warn!(error = %e, "discarding unreadable calculator state");
                Ok(CalculatorInputs::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Forget the saved inputs.
    pub fn clear_inputs(&self) -> DbResult<bool> {
        self.delete_state(INPUTS_KEY)
    }
}
