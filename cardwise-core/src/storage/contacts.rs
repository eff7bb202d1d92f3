// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact storage operations.

use rusqlite::{params, Connection};

use super::{Storage, StorageError};
use crate::contact::Contact;

/// Reads the whole contact collection in collection order.
pub(super) fn read_all_contacts(conn: &Connection) -> Result<Vec<Contact>, StorageError> {
    let mut stmt = conn.prepare("SELECT contact_json FROM contacts ORDER BY position, id")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut contacts = Vec::new();
    for row in rows {
        contacts.push(serde_json::from_str(&row?)?);
    }
    Ok(contacts)
}

/// Replaces the whole contact collection.
///
/// Callers run this inside a transaction.
pub(super) fn write_all_contacts(conn: &Connection, contacts: &[Contact]) -> Result<(), StorageError> {
    conn.execute("DELETE FROM contacts", [])?;

    let mut stmt = conn.prepare(
        "INSERT INTO contacts (id, position, display_name, contact_json)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    for (position, contact) in contacts.iter().enumerate() {
        let json = serde_json::to_string(contact)?;
        stmt.execute(params![
            contact.id(),
            position as i64,
            contact.display_name(),
            json
        ])?;
    }
    Ok(())
}

impl Storage {
    // === Contact Operations ===

    /// Saves a single contact.
    ///
    /// An existing contact keeps its position; a new one goes to the end.
    pub fn save_contact(&self, contact: &Contact) -> Result<(), StorageError> {
        let json = serde_json::to_string(contact)?;

        self.conn.execute(
            "INSERT INTO contacts (id, position, display_name, contact_json)
             VALUES (?1, (SELECT COALESCE(MAX(position) + 1, 0) FROM contacts), ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                display_name = excluded.display_name,
                contact_json = excluded.contact_json",
            params![contact.id(), contact.display_name(), json],
        )?;

        Ok(())
    }

    /// Loads a contact by ID.
    pub fn load_contact(&self, id: &str) -> Result<Option<Contact>, StorageError> {
        let result = self.conn.query_row(
            "SELECT contact_json FROM contacts WHERE id = ?1",
            params![id],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::Database(e)),
        }
    }

    /// Lists all contacts in collection order.
    pub fn list_contacts(&self) -> Result<Vec<Contact>, StorageError> {
        read_all_contacts(&self.conn)
    }

    /// Deletes a contact by ID.
    pub fn delete_contact(&self, id: &str) -> Result<bool, StorageError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1", params![id])?;
        Ok(rows_affected > 0)
    }

    /// Returns the number of stored contacts.
    pub fn contact_count(&self) -> Result<usize, StorageError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
