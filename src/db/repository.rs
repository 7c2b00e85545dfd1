//! Key-value record store — the persistence gateway for app records.
//!
//! The onboarding record is JSON under the single fixed key
//! `config::ONBOARDING_RECORD_KEY`. The raw `put/get/delete` trio is the
//! storage contract; the typed wrappers below own (de)serialization.

use rusqlite::{params, Connection};

use crate::config;
use crate::db::StorageError;
use crate::formatter::OnboardingRecord;

/// Set a record value (upsert).
pub fn put_value(conn: &Connection, key: &str, value: &str) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO app_records (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

/// Get a record value by key. Returns None if not set.
pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>, StorageError> {
    let mut stmt = conn.prepare("SELECT value FROM app_records WHERE key = ?1")?;
    match stmt.query_row([key], |row| row.get::<_, String>(0)) {
        Ok(val) => Ok(Some(val)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(StorageError::from(e)),
    }
}

/// Delete a record.
pub fn delete_value(conn: &Connection, key: &str) -> Result<(), StorageError> {
    conn.execute("DELETE FROM app_records WHERE key = ?1", [key])?;
    Ok(())
}

/// Persist the formatted onboarding record under its fixed key.
pub fn save_onboarding_record(
    conn: &Connection,
    record: &OnboardingRecord,
) -> Result<(), StorageError> {
    let payload = serde_json::to_string(record)?;
    put_value(conn, config::ONBOARDING_RECORD_KEY, &payload)
}

/// Read the onboarding record back.
///
/// Malformed persisted data is treated as absent: the read path logs and
/// proceeds without restoring prior answers.
pub fn load_onboarding_record(conn: &Connection) -> Result<Option<OnboardingRecord>, StorageError> {
    let Some(raw) = get_value(conn, config::ONBOARDING_RECORD_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            tracing::warn!("Discarding malformed onboarding record: {e}");
            Ok(None)
        }
    }
}
