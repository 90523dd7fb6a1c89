//! TOML loader for jurisdiction tax tables.
//!
//! Quote fractional values so they are read as exact decimals:
//!
//! ```toml
//! jurisdiction = "Ontario"
//! tax_year = 2023
//!
//! [[federal]]
//! threshold = "0"
//! rate = "0.15"
//!
//! [[federal]]
//! threshold = "53359"
//! rate = "0.205"
//!
//! [[provincial]]
//! threshold = "0"
//! rate = "0.0505"
//!
//! [pension]
//! rate = "0.0595"
//! exemption = "3500"
//! annual_maximum = "3754.45"
//!
//! [insurance]
//! rate = "0.0163"
//! annual_maximum = "1002.45"
//! ```

use std::path::{Path, PathBuf};

use shift_core::{JurisdictionTable, PayError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum JurisdictionLoadError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid jurisdiction table: {0}")]
    Invalid(#[from] PayError),
}

/// Parses and validates a jurisdiction table from TOML text.
pub fn parse_jurisdiction_table(input: &str) -> Result<JurisdictionTable, JurisdictionLoadError> {
    let table: JurisdictionTable = toml::from_str(input)?;
    table.validate()?;
    Ok(table)
}

/// Reads a TOML file and delegates to [`parse_jurisdiction_table`].
pub fn load_jurisdiction_table(path: &Path) -> Result<JurisdictionTable, JurisdictionLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| JurisdictionLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_jurisdiction_table(&contents)?;

    info!(
        jurisdiction = %table.jurisdiction,
        tax_year = table.tax_year,
        path = %path.display(),
        "loaded jurisdiction table"
    );
    Ok(table)
}
