use chrono::{DateTime, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

use crate::agent::{Agent, AgentKind};
use crate::error::{LexError, Result};
use crate::practice::LemmaPracticeRecord;
use crate::schema::{run_migrations, META_LEMMAS_INITIALIZED};

// ---------------------------------------------------------------------------
// Pool type alias
// ---------------------------------------------------------------------------

pub type DbPool = Pool<SqliteConnectionManager>;

// ---------------------------------------------------------------------------
// Pool constructors
// ---------------------------------------------------------------------------

/// Open a connection pool backed by a file-based SQLite database.
pub fn create_pool(db_path: &str) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL;")?;
        Ok(())
    });

    let pool = Pool::builder()
        .max_size(16)
        .build(manager)
        .map_err(|e| LexError::Internal(e.to_string()))?;

    let conn = pool.get().map_err(|e| LexError::Internal(e.to_string()))?;
    run_migrations(&conn)?;

    Ok(pool)
}

/// Open a connection pool backed by an in-memory SQLite database.
///
/// Every `:memory:` connection is its own database, so the pool is capped
/// at a single connection; all checkouts see the same data.
pub fn create_memory_pool() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory().with_init(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    });

    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| LexError::Internal(e.to_string()))?;

    let conn = pool.get().map_err(|e| LexError::Internal(e.to_string()))?;
    run_migrations(&conn)?;

    Ok(pool)
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Outcome of registering an agent.
///
/// `duplicates` counts pre-existing agents with the same trimmed,
/// case-insensitive name and the same kind. Duplicates are surfaced as a
/// non-blocking warning; the registration itself always proceeds.
#[derive(Debug, Clone)]
pub struct Registration {
    pub agent: Agent,
    pub duplicates: usize,
}

// ---------------------------------------------------------------------------
// AgentStore trait
// ---------------------------------------------------------------------------

/// Persistence interface for registered named entities.
pub trait AgentStore: Send + Sync {
    /// Validate and insert a new agent, returning the stored record with its
    /// assigned id plus the pre-existing duplicate count.
    ///
    /// An alias must name a resolvable target: `alias_of` is required for
    /// `AgentKind::Alias` and must reference an existing agent id, checked
    /// before anything is written.
    fn register(&self, name: &str, kind: AgentKind, alias_of: Option<i64>) -> Result<Registration>;

    fn get(&self, id: i64) -> Result<Agent>;
    fn get_all(&self) -> Result<Vec<Agent>>;

    /// Case-insensitive substring search over agent names. Alias records are
    /// excluded so that searching surfaces only canonical entities.
    fn search_by_name(&self, query: &str) -> Result<Vec<Agent>>;

    /// Count agents whose trimmed, lowercased name and kind both match.
    fn count_exact(&self, name: &str, kind: AgentKind) -> Result<usize>;
}

// ---------------------------------------------------------------------------
// LemmaStore trait
// ---------------------------------------------------------------------------

/// Persistence interface for per-lemma practice records.
pub trait LemmaStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<LemmaPracticeRecord>>;
    fn put(&self, record: &LemmaPracticeRecord) -> Result<()>;

    /// Insert or replace all `records` inside one transaction.
    fn seed_all(&self, records: &[LemmaPracticeRecord]) -> Result<()>;

    /// Whether the lemma table has already been seeded from the lexicon.
    fn is_initialized(&self) -> Result<bool>;
    fn mark_initialized(&self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Row helpers
// ---------------------------------------------------------------------------

fn row_to_agent(row: &rusqlite::Row<'_>) -> rusqlite::Result<Agent> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let kind_str: String = row.get(2)?;
    let alias_of: Option<i64> = row.get(3)?;

    Ok(Agent {
        id,
        name,
        kind: AgentKind::from(kind_str.as_str()),
        alias_of,
    })
}

fn parse_timestamp(column: usize, value: Option<String>) -> rusqlite::Result<Option<DateTime<Utc>>> {
    value
        .map(|s| {
            s.parse::<DateTime<Utc>>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    column,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })
        })
        .transpose()
}

fn row_to_lemma(row: &rusqlite::Row<'_>) -> rusqlite::Result<LemmaPracticeRecord> {
    let key: String = row.get(0)?;
    let word: String = row.get(1)?;
    let lemma: String = row.get(2)?;
    let lem_rank: i64 = row.get(3)?;
    let part_of_speech: String = row.get(4)?;
    let last_practiced_at: Option<String> = row.get(5)?;
    let repetition_count: i64 = row.get(6)?;
    let interval_index: i64 = row.get(7)?;
    let interval_days: i64 = row.get(8)?;
    let next_review_at: Option<String> = row.get(9)?;

    Ok(LemmaPracticeRecord {
        key,
        word,
        lemma,
        lem_rank: lem_rank as u32,
        part_of_speech,
        last_practiced_at: parse_timestamp(5, last_practiced_at)?,
        repetition_count: repetition_count as u32,
        interval_index: interval_index as usize,
        interval_days: interval_days as u32,
        next_review_at: parse_timestamp(9, next_review_at)?,
    })
}

/// Point-read one practice record on an existing connection.
///
/// Exposed so that the practice engine can wrap the read, mutation, and
/// write of one record in a single transaction.
pub fn get_lemma_in(conn: &rusqlite::Connection, key: &str) -> Result<Option<LemmaPracticeRecord>> {
    let result = conn.query_row(
        "SELECT key, word, lemma, lem_rank, part_of_speech, last_practiced_at,
                repetition_count, interval_index, interval_days, next_review_at
           FROM lemmas
          WHERE key = ?1",
        params![key],
        row_to_lemma,
    );

    match result {
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(LexError::Database(e)),
        Ok(record) => Ok(Some(record)),
    }
}

/// Insert or replace one practice record on an existing connection.
pub fn put_lemma_in(conn: &rusqlite::Connection, record: &LemmaPracticeRecord) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO lemmas
            (key, word, lemma, lem_rank, part_of_speech, last_practiced_at,
             repetition_count, interval_index, interval_days, next_review_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            record.key,
            record.word,
            record.lemma,
            record.lem_rank as i64,
            record.part_of_speech,
            record.last_practiced_at.map(|t| t.to_rfc3339()),
            record.repetition_count as i64,
            record.interval_index as i64,
            record.interval_days as i64,
            record.next_review_at.map(|t| t.to_rfc3339()),
        ],
    )?;
    Ok(())
}

/// Read a `meta` value on an existing connection.
pub fn get_meta_in(conn: &rusqlite::Connection, key: &str) -> Result<Option<String>> {
    let result = conn.query_row(
        "SELECT value FROM meta WHERE key = ?1",
        params![key],
        |row| row.get::<_, String>(0),
    );
    match result {
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(LexError::Database(e)),
        Ok(value) => Ok(Some(value)),
    }
}

/// Write a `meta` value on an existing connection.
pub fn set_meta_in(conn: &rusqlite::Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO meta (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

fn count_exact_in(conn: &rusqlite::Connection, name: &str, kind: AgentKind) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM agents
          WHERE lower(trim(name)) = lower(trim(?1)) AND kind = ?2",
        params![name, kind.as_str()],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

// ---------------------------------------------------------------------------
// SqliteAgentStore
// ---------------------------------------------------------------------------

pub struct SqliteAgentStore {
    pool: DbPool,
}

impl SqliteAgentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| LexError::Internal(e.to_string()))
    }
}

impl AgentStore for SqliteAgentStore {
    fn register(&self, name: &str, kind: AgentKind, alias_of: Option<i64>) -> Result<Registration> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LexError::InvalidInput("agent name is empty".into()));
        }

        let conn = self.conn()?;

        // Alias validation happens before any write.
        let alias_of = match (kind, alias_of) {
            (AgentKind::Alias, None) => {
                return Err(LexError::InvalidInput(
                    "alias registration requires a target agent id".into(),
                ));
            }
            (AgentKind::Alias, Some(target)) => {
                let exists: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM agents WHERE id = ?1",
                    params![target],
                    |row| row.get(0),
                )?;
                if exists == 0 {
                    return Err(LexError::InvalidAliasTarget(target));
                }
                Some(target)
            }
            (_, Some(_)) => {
                return Err(LexError::InvalidInput(
                    "alias_of is only valid for alias agents".into(),
                ));
            }
            (_, None) => None,
        };

        let duplicates = count_exact_in(&conn, name, kind)?;

        conn.execute(
            "INSERT INTO agents (name, kind, alias_of) VALUES (?1, ?2, ?3)",
            params![name, kind.as_str(), alias_of],
        )?;
        let id = conn.last_insert_rowid();

        Ok(Registration {
            agent: Agent {
                id,
                name: name.to_string(),
                kind,
                alias_of,
            },
            duplicates,
        })
    }

    fn get(&self, id: i64) -> Result<Agent> {
        let conn = self.conn()?;
        let result = conn.query_row(
            "SELECT id, name, kind, alias_of FROM agents WHERE id = ?1",
            params![id],
            row_to_agent,
        );
        match result {
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(LexError::NotFound(format!("agent {id}")))
            }
            Err(e) => Err(LexError::Database(e)),
            Ok(agent) => Ok(agent),
        }
    }

    fn get_all(&self) -> Result<Vec<Agent>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, kind, alias_of FROM agents ORDER BY id ASC")?;
        let agents = stmt
            .query_map([], row_to_agent)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(agents)
    }

    fn search_by_name(&self, query: &str) -> Result<Vec<Agent>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, kind, alias_of
               FROM agents
              WHERE kind != 'alias'
                AND instr(lower(name), lower(?1)) > 0
              ORDER BY id ASC",
        )?;
        let agents = stmt
            .query_map(params![query], row_to_agent)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(agents)
    }

    fn count_exact(&self, name: &str, kind: AgentKind) -> Result<usize> {
        let conn = self.conn()?;
        count_exact_in(&conn, name, kind)
    }
}

// ---------------------------------------------------------------------------
// SqliteLemmaStore
// ---------------------------------------------------------------------------

pub struct SqliteLemmaStore {
    pool: DbPool,
}

impl SqliteLemmaStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| LexError::Internal(e.to_string()))
    }
}

impl LemmaStore for SqliteLemmaStore {
    fn get(&self, key: &str) -> Result<Option<LemmaPracticeRecord>> {
        let conn = self.conn()?;
        get_lemma_in(&conn, key)
    }

    fn put(&self, record: &LemmaPracticeRecord) -> Result<()> {
        let conn = self.conn()?;
        put_lemma_in(&conn, record)
    }

    fn seed_all(&self, records: &[LemmaPracticeRecord]) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        for record in records {
            put_lemma_in(&tx, record)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn is_initialized(&self) -> Result<bool> {
        let conn = self.conn()?;
        Ok(get_meta_in(&conn, META_LEMMAS_INITIALIZED)?.as_deref() == Some("true"))
    }

    fn mark_initialized(&self) -> Result<()> {
        let conn = self.conn()?;
        set_meta_in(&conn, META_LEMMAS_INITIALIZED, "true")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
