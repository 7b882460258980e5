//! SQL schema for the Flock SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS volunteers (
    volunteer_id   TEXT PRIMARY KEY,
    roster_id      TEXT UNIQUE,     -- external roster id; NULL = manually created
    first_name     TEXT NOT NULL,
    last_name      TEXT NOT NULL,
    email          TEXT,
    phone          TEXT,
    address        TEXT,
    notes          TEXT,            -- locally curated; sync never writes this
    teams          TEXT NOT NULL DEFAULT '[]',  -- JSON array of team names
    last_synced_at TEXT,            -- ISO 8601 UTC; NULL until first sync
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS team_members (
    member_id  TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name  TEXT NOT NULL,
    email      TEXT NOT NULL,
    role       TEXT NOT NULL DEFAULT 'member',  -- 'admin' | 'member'
    active     INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS interactions (
    interaction_id          TEXT PRIMARY KEY,
    volunteer_id            TEXT NOT NULL
                              REFERENCES volunteers(volunteer_id)
                              ON DELETE CASCADE,
    member_id               TEXT
                              REFERENCES team_members(member_id)
                              ON DELETE SET NULL,
    interaction_date        TEXT NOT NULL,  -- YYYY-MM-DD
    discussion_notes        TEXT NOT NULL,
    topics                  TEXT NOT NULL DEFAULT '[]',  -- JSON array
    needs_followup          INTEGER NOT NULL DEFAULT 0,
    followup_date           TEXT,
    followup_notes          TEXT,
    followup_completed      INTEGER NOT NULL DEFAULT 0,
    followup_completed_date TEXT,
    created_at              TEXT NOT NULL,
    updated_at              TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS volunteers_roster_idx ON volunteers(roster_id);
CREATE INDEX IF NOT EXISTS volunteers_name_idx   ON volunteers(last_name, first_name);
CREATE INDEX IF NOT EXISTS interactions_volunteer_idx ON interactions(volunteer_id);
CREATE INDEX IF NOT EXISTS interactions_member_idx    ON interactions(member_id);
CREATE INDEX IF NOT EXISTS interactions_date_idx      ON interactions(interaction_date);
CREATE INDEX IF NOT EXISTS interactions_followup_idx  ON interactions(needs_followup, followup_completed);

PRAGMA user_version = 1;
";
