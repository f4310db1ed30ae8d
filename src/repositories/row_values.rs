// src/repositories/row_values.rs
//
// Column conversions shared by the SQLite repositories
//
// Ids are UUID text, timestamps RFC 3339 text, status the uppercase name.
// Conversion failures surface as rusqlite errors so row mappers stay
// usable with `query_row` and `query_map`.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::Row;
use uuid::Uuid;

use crate::domain::ContentStatus;

fn conversion_failure<E>(row: &Row, column: &str, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    let index = row.as_ref().column_index(column).unwrap_or_default();
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
}

pub(crate) fn uuid_column(row: &Row, column: &str) -> rusqlite::Result<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|e| conversion_failure(row, column, e))
}

pub(crate) fn opt_uuid_column(row: &Row, column: &str) -> rusqlite::Result<Option<Uuid>> {
    let text: Option<String> = row.get(column)?;
    text.map(|t| Uuid::parse_str(&t).map_err(|e| conversion_failure(row, column, e)))
        .transpose()
}

pub(crate) fn datetime_column(row: &Row, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(column)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_failure(row, column, e))
}

pub(crate) fn status_column(row: &Row, column: &str) -> rusqlite::Result<ContentStatus> {
    let text: String = row.get(column)?;
    text.parse().map_err(|e| conversion_failure(row, column, e))
}

pub(crate) fn opt_uuid_param(id: Option<Uuid>) -> Option<String> {
    id.map(|id| id.to_string())
}

/// Fixed-width UTC text, so `ORDER BY` on timestamp columns is chronological
pub(crate) fn timestamp_param(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}
