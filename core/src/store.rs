//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! The engine calls store methods — it never executes SQL directly.
//! The store is an append-only audit trail; the live state stays in memory.
//! Settlements and snapshots are keyed by (run, day) and never overwritten.

use rusqlite::{params, Connection, OptionalExtension};
use crate::{
    error::SimResult,
    event::EventLogEntry,
    ledger::DailySummary,
    types::Day,
};

pub struct SimStore {
    conn: Connection,
}

impl SimStore {
    /// Open (or create) the simulation database at `path`.
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only sticks for real files; in-memory databases ignore it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> SimResult<()> {
        self.conn.execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        self.conn.execute_batch(include_str!("../../migrations/002_settlement.sql"))?;
        Ok(())
    }

    // ── Run ────────────────────────────────────────────────────

    pub fn insert_run(&self, run_id: &str, seed: u64, version: &str) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO run (run_id, seed, version, started_at) VALUES (?1, ?2, ?3, ?4)",
            params![run_id, seed as i64, version, 0i64],
        )?;
        Ok(())
    }

    pub fn has_run(&self, run_id: &str) -> SimResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM run WHERE run_id = ?1",
                params![run_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (run_id, day, frame, event_type, payload)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.run_id,
                entry.day,
                entry.frame as i64,
                entry.event_type,
                entry.payload,
            ],
        )?;
        Ok(())
    }

    pub fn events_for_day(&self, run_id: &str, day: Day) -> SimResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, run_id, day, frame, event_type, payload
             FROM event_log WHERE run_id = ?1 AND day = ?2
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![run_id, day], |row| {
                Ok(EventLogEntry {
                    id:         Some(row.get(0)?),
                    run_id:     row.get(1)?,
                    day:        row.get(2)?,
                    frame:      row.get::<_, i64>(3)? as u64,
                    event_type: row.get(4)?,
                    payload:    row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn event_count(&self, run_id: &str, event_type: &str) -> SimResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM event_log WHERE run_id = ?1 AND event_type = ?2",
            params![run_id, event_type],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ── Settlement ─────────────────────────────────────────────

    pub fn save_settlement(&self, run_id: &str, summary: &DailySummary) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO settlement
                (run_id, day, revenue, shelf_cost, wage_cost, total, rent, money_after)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                run_id,
                summary.day,
                summary.revenue,
                summary.shelf_cost,
                summary.wage_cost,
                summary.total,
                summary.rent,
                summary.money_after,
            ],
        )?;
        Ok(())
    }

    pub fn settlements(&self, run_id: &str) -> SimResult<Vec<DailySummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT day, revenue, shelf_cost, wage_cost, total, rent, money_after
             FROM settlement WHERE run_id = ?1 ORDER BY day ASC",
        )?;
        let rows = stmt
            .query_map(params![run_id], |row| {
                Ok(DailySummary {
                    day:         row.get(0)?,
                    revenue:     row.get(1)?,
                    shelf_cost:  row.get(2)?,
                    wage_cost:   row.get(3)?,
                    total:       row.get(4)?,
                    rent:        row.get(5)?,
                    money_after: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    // ── Snapshot ───────────────────────────────────────────────

    pub fn save_snapshot(&self, run_id: &str, day: Day, state_json: &str) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO snapshot (run_id, day, state_json) VALUES (?1, ?2, ?3)",
            params![run_id, day, state_json],
        )?;
        Ok(())
    }

    pub fn snapshot_for_day(&self, run_id: &str, day: Day) -> SimResult<Option<String>> {
        let json = self
            .conn
            .query_row(
                "SELECT state_json FROM snapshot WHERE run_id = ?1 AND day = ?2",
                params![run_id, day],
                |row| row.get(0),
            )
            .optional()?;
        Ok(json)
    }
}
