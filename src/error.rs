//! Crate-level error types.

use std::fmt;
use std::path::PathBuf;

use crate::api::ApiError;
use crate::model::Mode;

/// Errors produced by the pdbimg crate.
#[derive(Debug)]
pub enum Error {
    /// Metadata gateway failure that is not a "not found" condition.
    Api(ApiError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Caption record or manifest (de)serialization failure.
    Json(serde_json::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A noun-forms specification with more than two `|` separators.
    InvalidNounSpec(String),
    /// A warning raised while `fail_on_warning` is enabled.
    WarningAsError(String),
    /// An image type that does not exist for the selected mode.
    UnknownImageType {
        /// Mode the request was made for.
        mode: Mode,
        /// The offending type name.
        name: String,
    },
    /// An entry id that cannot name files (empty or containing separators).
    InvalidEntryId(String),
    /// Expected output files that are absent or empty after generation.
    MissingOutputFiles {
        /// Number of absent or empty files.
        count: usize,
        /// Path of the expected-file list to consult.
        listing: PathBuf,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "metadata API error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidNounSpec(spec) => write!(
                f,
                "invalid noun specification {spec:?} (at most two '|' allowed)"
            ),
            Self::WarningAsError(msg) => {
                write!(f, "warning treated as error: {msg}")
            }
            Self::UnknownImageType { mode, name } => write!(
                f,
                "unknown image type {name:?} for mode {}",
                mode.as_str()
            ),
            Self::InvalidEntryId(id) => write!(f, "invalid entry id {id:?}"),
            Self::MissingOutputFiles { count, listing } => write!(
                f,
                "{count} expected output file(s) missing or empty, see {}",
                listing.display()
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ApiError> for Error {
    fn from(e: ApiError) -> Self {
        Self::Api(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::OptionsParse(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Self::OptionsParse(e.to_string())
    }
}
