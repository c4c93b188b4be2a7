//! SQL schema for the PSC SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per notification id. `document` holds both partitions.
CREATE TABLE IF NOT EXISTS psc_records (
    notification_id TEXT PRIMARY KEY,
    company_number  TEXT NOT NULL,
    kind            TEXT NOT NULL,
    delta_at        TEXT NOT NULL,   -- yyyyMMddHHmmssSSSSSS, UTC
    created_at      TEXT NOT NULL,   -- RFC 3339; first applied delta
    updated_at      TEXT NOT NULL,   -- RFC 3339; latest applied delta
    document        TEXT NOT NULL    -- extended JSON
);

CREATE INDEX IF NOT EXISTS psc_records_company_idx ON psc_records(company_number);

PRAGMA user_version = 1;
";
