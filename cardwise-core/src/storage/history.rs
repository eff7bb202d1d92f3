// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Merge history storage operations.

use rusqlite::{params, Connection};

use super::StorageError;
use crate::merge::MergeHistoryEntry;

/// Reads the merge history, oldest first.
pub(super) fn read_history(conn: &Connection) -> Result<Vec<MergeHistoryEntry>, StorageError> {
    let mut stmt = conn.prepare("SELECT entry_json FROM merge_history ORDER BY seq")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(serde_json::from_str(&row?)?);
    }
    Ok(entries)
}

/// Appends an entry to the history.
pub(super) fn insert_history_entry(
    conn: &Connection,
    entry: &MergeHistoryEntry,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(entry)?;
    conn.execute(
        "INSERT INTO merge_history (id, merged_at, primary_id, entry_json)
         VALUES (?1, ?2, ?3, ?4)",
        params![entry.id(), entry.merged_at() as i64, entry.primary_id(), json],
    )?;
    Ok(())
}

/// Removes and returns the most recent entry.
pub(super) fn delete_last_history_entry(
    conn: &Connection,
) -> Result<Option<MergeHistoryEntry>, StorageError> {
    let result = conn.query_row(
        "SELECT seq, entry_json FROM merge_history ORDER BY seq DESC LIMIT 1",
        [],
        |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
    );

    let (seq, json) = match result {
        Ok(row) => row,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
        Err(e) => return Err(StorageError::Database(e)),
    };

    let entry: MergeHistoryEntry = serde_json::from_str(&json)?;
    conn.execute("DELETE FROM merge_history WHERE seq = ?1", params![seq])?;
    Ok(Some(entry))
}
