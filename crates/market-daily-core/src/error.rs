use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Validation errors raised while parsing domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown category '{value}', expected one of equity, commodities, crypto, fx")]
    UnknownCategory { value: String },

    #[error("date must be formatted as YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
}

/// Operator-facing failure classes. Every fatal [`PipelineError`] maps to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    NotFound,
    Malformed,
    PermissionDenied,
    Unexpected,
}

impl FailureCause {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Malformed => "malformed",
            Self::PermissionDenied => "permission_denied",
            Self::Unexpected => "unexpected",
        }
    }
}

impl Display for FailureCause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal errors for both pipeline stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("source file not found: {}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse source file {}: {source}", .path.display())]
    SourceMalformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("data conversion failed at line {line}: field '{field}' is not a finite number: '{value}'")]
    DataConversion {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("snapshot file not found: {}", .path.display())]
    SnapshotUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse snapshot file {}: {source}", .path.display())]
    SnapshotMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("permission denied: {}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unexpected I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode snapshot: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    /// Classifies an I/O failure while reading the tabular source.
    pub fn source_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Self::SourceUnavailable { path, source },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Io { path, source },
        }
    }

    /// Classifies an I/O failure while reading a persisted snapshot.
    pub fn snapshot_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Self::SnapshotUnavailable { path, source },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Io { path, source },
        }
    }

    /// Classifies an I/O failure while writing an output file.
    pub fn write_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Io { path, source },
        }
    }

    pub const fn cause(&self) -> FailureCause {
        match self {
            Self::SourceUnavailable { .. } | Self::SnapshotUnavailable { .. } => {
                FailureCause::NotFound
            }
            Self::SourceMalformed { .. }
            | Self::DataConversion { .. }
            | Self::SnapshotMalformed { .. } => FailureCause::Malformed,
            Self::PermissionDenied { .. } => FailureCause::PermissionDenied,
            Self::Io { .. } | Self::Serialization(_) => FailureCause::Unexpected,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::SourceUnavailable { .. } => "source.unavailable",
            Self::SourceMalformed { .. } => "source.malformed",
            Self::DataConversion { .. } => "data.conversion",
            Self::SnapshotUnavailable { .. } => "snapshot.unavailable",
            Self::SnapshotMalformed { .. } => "snapshot.malformed",
            Self::PermissionDenied { .. } => "io.permission_denied",
            Self::Io { .. } => "io.unexpected",
            Self::Serialization(_) => "snapshot.encode",
        }
    }
}

/// Reasons the exchange-rate feed produced no quote. Never fatal to a run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("no API key configured")]
    MissingCredential,

    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("response is not valid JSON: {0}")]
    InvalidBody(String),

    #[error("upstream rejected the request: {0}")]
    Rejected(String),

    #[error("response is missing the exchange rate field")]
    MissingRate,

    #[error("exchange rate is not a finite number: '{0}'")]
    InvalidRate(String),
}
