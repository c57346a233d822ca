//! In-memory session journal.
//!
//! RULE: only journal.rs talks to the database. The engine calls journal
//! methods — nothing else executes SQL.
//!
//! The journal is an in-memory SQLite database holding the session's event
//! log and periodic account snapshots. Nothing is ever written to disk and
//! the journal dies with the session; it exists so tests, the runner
//! summary, and tooling can query what happened.

use rusqlite::{params, Connection};
use crate::{
    error::MeterResult,
    event::EventLogEntry,
    types::Tick,
};

pub struct SessionJournal {
    conn: Connection,
}

impl SessionJournal {
    /// Open a fresh in-memory journal.
    pub fn in_memory() -> MeterResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply the schema.
    pub fn migrate(&self) -> MeterResult<()> {
        self.conn.execute_batch(include_str!("../../migrations/001_session.sql"))?;
        Ok(())
    }

    // ── Session ────────────────────────────────────────────────

    pub fn insert_session(&self, session_id: &str, seed: u64, version: &str) -> MeterResult<()> {
        self.conn.execute(
            "INSERT INTO session (session_id, seed, version, started_at) VALUES (?1, ?2, ?3, ?4)",
            params![session_id, seed as i64, version, chrono::Utc::now().timestamp()],
        )?;
        Ok(())
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> MeterResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (session_id, tick, source, event_type, payload)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.session_id,
                entry.tick as i64,
                entry.source,
                entry.event_type,
                entry.payload,
            ],
        )?;
        Ok(())
    }

    pub fn events_for_tick(&self, session_id: &str, tick: Tick) -> MeterResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, tick, source, event_type, payload
             FROM event_log WHERE session_id = ?1 AND tick = ?2
             ORDER BY id ASC"
        )?;
        let entries = stmt.query_map(params![session_id, tick as i64], |row| {
            Ok(EventLogEntry {
                id:         Some(row.get(0)?),
                session_id: row.get(1)?,
                tick:       row.get::<_, i64>(2)? as u64,
                source:     row.get(3)?,
                event_type: row.get(4)?,
                payload:    row.get(5)?,
            })
        })?.collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Count events of a given type over the whole session.
    pub fn count_events_of_type(&self, session_id: &str, event_type: &str) -> MeterResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM event_log WHERE session_id = ?1 AND event_type = ?2",
            params![session_id, event_type],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ── Snapshot ───────────────────────────────────────────────

    pub fn save_snapshot(&self, session_id: &str, tick: Tick, state_json: &str) -> MeterResult<()> {
        self.conn.execute(
            "INSERT INTO snapshot (session_id, tick, state_json) VALUES (?1, ?2, ?3)",
            params![session_id, tick as i64, state_json],
        )?;
        Ok(())
    }

    pub fn latest_snapshot_before(
        &self, session_id: &str, tick: Tick,
    ) -> MeterResult<Option<(Tick, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT tick, state_json FROM snapshot
             WHERE session_id = ?1 AND tick <= ?2
             ORDER BY tick DESC LIMIT 1"
        )?;
        let result = stmt.query_row(params![session_id, tick as i64], |row| {
            Ok((row.get::<_, i64>(0)? as u64, row.get::<_, String>(1)?))
        }).ok();
        Ok(result)
    }
}
