// src/repositories/json_columns.rs
//
// Structured-field codec
//
// Coordinate lists and itemized lists live in TEXT columns as JSON.
// Encoding `None` stores NULL; decoding NULL yields the type's default
// (an empty sequence). Text that does not decode is reported as
// `MalformedStoredData`, never replaced by an empty value.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Encode a structured value for a TEXT column.
pub fn encode_field<T>(value: Option<&T>) -> AppResult<Option<String>>
where
    T: Serialize + ?Sized,
{
    value
        .map(serde_json::to_string)
        .transpose()
        .map_err(AppError::Serialization)
}

/// Decode a TEXT column written by `encode_field`.
pub fn decode_field<T>(column: &'static str, raw: Option<&str>) -> AppResult<T>
where
    T: DeserializeOwned + Default,
{
    match raw {
        None => Ok(T::default()),
        Some(text) => {
            serde_json::from_str(text).map_err(|source| AppError::malformed(column, source))
        }
    }
}
