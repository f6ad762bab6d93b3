//! SQLite schema definition.

/// Complete database schema for the calculator state store.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Calculator State (last-used inputs, one row per key)
-- ============================================================================

CREATE TABLE IF NOT EXISTS calculator_state (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,                          -- JSON object
    digest TEXT NOT NULL,                         -- SHA-256 hex of value
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
