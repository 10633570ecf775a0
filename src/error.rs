// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of pipeline failures, one per stage concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Download,
    Extraction,
    Parse,
    Persistence,
    Io,
    Task,
}

impl ErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorKind::Download => "download",
            ErrorKind::Extraction => "extraction",
            ErrorKind::Parse => "parse",
            ErrorKind::Persistence => "persistence",
            ErrorKind::Io => "io",
            ErrorKind::Task => "task",
        }
    }
}

/// Errors raised by the fetch → extract → transform → load pipeline.
#[derive(Debug, Error)]
pub enum EtlError {
    /// The HTTP request or the body stream failed.
    #[error("download of {url} failed")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Writing the downloaded bytes to disk failed.
    #[error("writing download to {path} failed")]
    DownloadWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("extraction destination {path} does not exist")]
    MissingDestination { path: PathBuf },

    /// Gzip or tar decoding failed.
    #[error("extracting {path} failed")]
    Extraction {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: missing required column `{column}`")]
    MissingColumn { file: PathBuf, column: &'static str },

    /// The CSV file could not be opened or its structure is malformed.
    #[error("parsing {file} failed")]
    Csv {
        file: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("database operation on `{table}` failed")]
    Persistence {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A blocking stage task panicked or was cancelled.
    #[error("background task failed")]
    Task(#[from] tokio::task::JoinError),
}

impl EtlError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Download { .. } | Self::DownloadWrite { .. } => ErrorKind::Download,
            Self::MissingDestination { .. } | Self::Extraction { .. } => ErrorKind::Extraction,
            Self::MissingColumn { .. } | Self::Csv { .. } => ErrorKind::Parse,
            Self::Persistence { .. } => ErrorKind::Persistence,
            Self::Io { .. } => ErrorKind::Io,
            Self::Task(_) => ErrorKind::Task,
        }
    }

    pub(crate) fn persistence(table: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Persistence {
            table: table.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = EtlError> = std::result::Result<T, E>;
