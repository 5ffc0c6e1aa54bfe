// Delimited value parsing
//
// Turns one comma-delimited raw value into an ordered collection of typed elements.
// Decision: Empty segments (",,", leading or trailing commas) are discarded, not rejected
// Decision: All-or-nothing - the first failing segment aborts the whole conversion

use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Separator between values in a delimited query parameter.
pub const DELIMITER: char = ',';

/// A segment that could not be converted to the declared element type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("segment {position} ('{segment}') could not be converted: {reason}")]
pub struct ConversionError {
    /// Zero-based position among the non-empty segments.
    pub position: usize,
    /// The trimmed segment text.
    pub segment: String,
    /// Error reported by the element type's `FromStr` implementation.
    pub reason: String,
}

/// Split a raw value into trimmed, non-empty segments, in input order.
pub fn segments(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

/// Parse a delimited raw value into a collection of `T`.
///
/// Absent, empty and whitespace-only input yields an empty collection.
/// Elements keep the order of their segments; nothing is deduplicated.
/// If any segment fails to convert the collection is dropped and the
/// error for that segment is returned.
pub fn parse_delimited<T, C>(raw: Option<&str>) -> Result<C, ConversionError>
where
    T: FromStr,
    T::Err: Display,
    C: FromIterator<T>,
{
    let raw = raw.unwrap_or_default();

    segments(raw)
        .enumerate()
        .map(|(position, segment)| {
            segment.parse::<T>().map_err(|e| ConversionError {
                position,
                segment: segment.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Join values into the delimited form accepted by [`parse_delimited`].
pub fn join_delimited<T, I>(values: I) -> String
where
    T: Display,
    I: IntoIterator<Item = T>,
{
    values
        .into_iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}
