use crate::error::Result;

/// Version string recorded in the `meta` table so that readers can detect a
/// database created by an older build. The persisted layout is not a
/// cross-version compatibility contract; the schema may be rebuilt on bump.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// `meta` key under which [`SCHEMA_VERSION`] is stored.
pub const META_SCHEMA_VERSION: &str = "schema_version";

/// `meta` key marking that the lemma table has been seeded from the lexicon.
pub const META_LEMMAS_INITIALIZED: &str = "lemmas_initialized";

// ---------------------------------------------------------------------------
// DDL
// ---------------------------------------------------------------------------

/// Full DDL for every table and index in the LexiRead SQLite schema.
///
/// All tables use `CREATE TABLE IF NOT EXISTS` so that `run_migrations` is
/// idempotent and safe to call on an already-initialised database.
pub const CREATE_TABLES: &str = "
-- -------------------------------------------------------------------------
-- agents
-- -------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS agents (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    name      TEXT    NOT NULL,
    kind      TEXT    NOT NULL,
    alias_of  INTEGER          REFERENCES agents(id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS idx_agents_name
    ON agents (name COLLATE NOCASE);

-- -------------------------------------------------------------------------
-- lemmas
-- -------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS lemmas (
    key                TEXT    NOT NULL PRIMARY KEY,
    word               TEXT    NOT NULL,
    lemma              TEXT    NOT NULL,
    lem_rank           INTEGER NOT NULL,
    part_of_speech     TEXT    NOT NULL,
    last_practiced_at  TEXT,
    repetition_count   INTEGER NOT NULL DEFAULT 0,
    interval_index     INTEGER NOT NULL DEFAULT 0,
    interval_days      INTEGER NOT NULL DEFAULT 0,
    next_review_at     TEXT
);

CREATE INDEX IF NOT EXISTS idx_lemmas_next_review_at
    ON lemmas (next_review_at);

-- -------------------------------------------------------------------------
-- meta
-- -------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS meta (
    key    TEXT NOT NULL PRIMARY KEY,
    value  TEXT NOT NULL
);
";

// ---------------------------------------------------------------------------
// Migration runner
// ---------------------------------------------------------------------------

/// Initialise (or upgrade) the database schema.
///
/// This function is **idempotent**: it is safe to call on a database that has
/// already been initialised.
pub fn run_migrations(conn: &rusqlite::Connection) -> Result<()> {
    // WAL mode gives better read/write concurrency and is safe for the
    // single-writer, multiple-reader pattern used by the connection pool.
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;

    // SQLite does not enforce foreign keys by default; every connection must
    // opt in.
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    conn.execute_batch(CREATE_TABLES)?;

    conn.execute(
        "INSERT OR IGNORE INTO meta (key, value) VALUES (?1, ?2)",
        rusqlite::params![META_SCHEMA_VERSION, SCHEMA_VERSION],
    )?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
