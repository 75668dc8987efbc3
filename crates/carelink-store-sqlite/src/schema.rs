//! SQL schema for the CareLink SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS accounts (
    account_id  TEXT PRIMARY KEY,
    name        TEXT,
    fcm_token   TEXT,            -- NULL when no device is registered
    updated_at  TEXT NOT NULL    -- ISO 8601 UTC
);

-- Reverse-lookup set: one row per (account, subscribed senior).
CREATE TABLE IF NOT EXISTS account_subscriptions (
    account_id  TEXT NOT NULL REFERENCES accounts(account_id) ON DELETE CASCADE,
    senior_id   TEXT NOT NULL,
    PRIMARY KEY (account_id, senior_id)
);

CREATE INDEX IF NOT EXISTS subscriptions_senior_idx
    ON account_subscriptions(senior_id);

PRAGMA user_version = 1;
";
