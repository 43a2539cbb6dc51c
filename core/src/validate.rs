use crate::error::EntryError;
use crate::models::CanonicalTimestamp;

/// Validate raw form text and normalize it into a storable `(key, level)`.
///
/// The level is checked before the date and time, so a form that is wrong
/// in both places reports the level.
pub fn validate_entry(
    date: &str,
    time: &str,
    level: &str,
) -> Result<(CanonicalTimestamp, f64), EntryError> {
    let level = parse_level(level)?;

    let (date, time) = (date.trim(), time.trim());
    let timestamp =
        CanonicalTimestamp::from_parts(date, time).map_err(|source| EntryError::Format {
            input: format!("{date} {time}"),
            source,
        })?;

    Ok((timestamp, level))
}

pub fn parse_level(level: &str) -> Result<f64, EntryError> {
    let trimmed = level.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(EntryError::Numeric {
            input: trimmed.to_string(),
        }),
    }
}
