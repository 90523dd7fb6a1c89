//! Serde helpers for optional CSV cells.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Empty or whitespace-only cells become `None`.
pub(crate) fn deserialize_optional_decimal<'de, D>(
    deserializer: D
) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Trims the cell; empty cells become `None`.
pub(crate) fn deserialize_optional_text<'de, D>(
    deserializer: D
) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// Parses a yes/no cell. Empty means no.
pub(crate) fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => Some(false),
        Some("true" | "yes" | "y" | "1") => Some(true),
        Some("false" | "no" | "n" | "0") => Some(false),
        Some(_) => None,
    }
}
