// src/repositories/sequences.rs
//
// Store-assigned sequence numbers
//
// Each named sequence keeps its last issued value in `sequences`. Values
// only grow: deleting the owner of a number never frees it.

use rusqlite::{params, Connection};

/// Sequence backing `builds.number`
pub(crate) const BUILD_NUMBERS: &str = "builds";

/// Sequence backing `feedback.number`
pub(crate) const FEEDBACK_NUMBERS: &str = "feedback";

/// Issue the next value of `name`, starting at 1.
///
/// Call inside the transaction that inserts the numbered row so a failed
/// insert rolls the counter back too.
pub(crate) fn next_value(conn: &Connection, name: &str) -> rusqlite::Result<i64> {
    conn.query_row(
        "INSERT INTO sequences (name, value) VALUES (?1, 1)
         ON CONFLICT(name) DO UPDATE SET value = sequences.value + 1
         RETURNING value",
        params![name],
        |row| row.get(0),
    )
}
