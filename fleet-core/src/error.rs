//! Core error handling module
//!
//! The query engine itself never fails: bad data degrades to "does not
//! match". Errors only come from the ambient surfaces around it (config
//! files, record fixtures, name parsing at the UI boundary, logger setup).
use std::{
    io::{self, ErrorKind},
    path::Path,
};

use compact_str::CompactString;
use smallvec::{SmallVec, smallvec};
use thiserror::Error;
use tracing::{Level, event};

/// Convenient alias carrying our unified error type
pub type FleetResult<T> = Result<T, FleetError>;

/// Primary error enumeration (grouped by concern)
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum FleetError {
    // ────────────────────────────────────────────────────────────
    // Name parsing at the UI boundary
    // ────────────────────────────────────────────────────────────
    #[error("Unknown facet: {0}")]
    UnknownFacet(CompactString),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(CompactString),

    #[error("Unknown sort order: {0}")]
    UnknownSortOrder(CompactString),

    #[error("Unknown view mode: {0}")]
    UnknownViewMode(CompactString),

    // ────────────────────────────────────────────────────────────
    // Configuration
    // ────────────────────────────────────────────────────────────
    #[error("Failed to read config file {path}: {kind:?}")]
    ConfigIo {
        path: CompactString,
        kind: ErrorKind,
        #[source]
        source: Box<io::Error>,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    ConfigDirUnavailable,

    // ────────────────────────────────────────────────────────────
    // Record fixtures
    // ────────────────────────────────────────────────────────────
    #[error("Failed to read records from {path}: {kind:?}")]
    RecordIo {
        path: CompactString,
        kind: ErrorKind,
        #[source]
        source: Box<io::Error>,
    },

    #[error("Record parse error at line {line}, column {column}: {message}")]
    RecordParse {
        line: usize,
        column: usize,
        message: CompactString,
    },

    // ────────────────────────────────────────────────────────────
    // Logging
    // ────────────────────────────────────────────────────────────
    #[error("Logger setup failed: {0}")]
    Logging(CompactString),
}

impl FleetError {
    /// Errors the host can shrug off and continue with defaults
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnknownFacet(_)
                | Self::UnknownSortKey(_)
                | Self::UnknownSortOrder(_)
                | Self::UnknownViewMode(_)
                | Self::ConfigDirUnavailable
        )
    }

    #[inline]
    #[must_use]
    pub const fn operation_type(&self) -> &'static str {
        match self {
            Self::UnknownFacet(_)
            | Self::UnknownSortKey(_)
            | Self::UnknownSortOrder(_)
            | Self::UnknownViewMode(_) => "name_parsing",

            Self::ConfigIo { .. }
            | Self::ConfigParse(_)
            | Self::ConfigSerialize(_)
            | Self::ConfigDirUnavailable => "configuration",

            Self::RecordIo { .. } | Self::RecordParse { .. } => "record_loading",

            Self::Logging(_) => "logging",
        }
    }

    // SmallVec avoids heap for the handful of fields we attach
    #[must_use]
    pub fn extract_trace_fields(&self) -> SmallVec<[(&'static str, CompactString); 4]> {
        match self {
            Self::UnknownFacet(name) => smallvec![("facet", name.clone())],

            Self::UnknownSortKey(name) => smallvec![("sort_key", name.clone())],

            Self::ConfigIo { path, kind, .. } | Self::RecordIo { path, kind, .. } => smallvec![
                ("path", path.clone()),
                ("error_kind", CompactString::from(format!("{kind:?}"))),
            ],

            Self::RecordParse { line, column, .. } => smallvec![
                ("line", CompactString::from(line.to_string())),
                ("column", CompactString::from(column.to_string())),
            ],

            _ => smallvec![],
        }
    }

    /// Emit one structured `tracing` event and hand the error back
    #[must_use]
    pub fn trace(self) -> Self {
        let extra = self.extract_trace_fields();

        event!(
            Level::ERROR,
            op_type = self.operation_type(),
            error = %self,
            recoverable = self.is_recoverable(),
            extra = ?extra,
        );

        self
    }

    #[inline]
    #[must_use]
    pub fn unknown_facet(name: &str) -> Self {
        Self::UnknownFacet(CompactString::new(name))
    }

    #[inline]
    #[must_use]
    pub fn config_io(path: &Path, err: io::Error) -> Self {
        Self::ConfigIo {
            path: CompactString::from(path.to_string_lossy()),
            kind: err.kind(),
            source: Box::new(err),
        }
    }

    #[inline]
    #[must_use]
    pub fn record_io(path: &Path, err: io::Error) -> Self {
        Self::RecordIo {
            path: CompactString::from(path.to_string_lossy()),
            kind: err.kind(),
            source: Box::new(err),
        }
    }
}

impl From<serde_json::Error> for FleetError {
    fn from(err: serde_json::Error) -> Self {
        Self::RecordParse {
            line: err.line(),
            column: err.column(),
            message: CompactString::from(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_are_recoverable() {
        assert!(FleetError::unknown_facet("colour").is_recoverable());
        assert!(FleetError::UnknownSortKey("price".into()).is_recoverable());
        assert!(!FleetError::Logging("boom".into()).is_recoverable());
    }

    #[test]
    fn json_errors_keep_their_position() {
        let err: FleetError = serde_json::from_str::<Vec<u32>>("[1,\n 2,,]")
            .map_err(FleetError::from)
            .unwrap_err();

        match err {
            FleetError::RecordParse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn config_io_captures_path_and_kind() {
        let err = FleetError::config_io(
            Path::new("/nope/config.toml"),
            io::Error::new(ErrorKind::NotFound, "missing"),
        );

        let fields = err.extract_trace_fields();
        assert_eq!(fields[0], ("path", CompactString::new("/nope/config.toml")));
        assert_eq!(err.operation_type(), "configuration");
    }
}
