use std::path::PathBuf;

use thiserror::Error;

use crate::types::DocRef;

/// Failures that abort the whole run.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Please specify the input folder path for indexing")]
    MissingRoot,

    #[error("Root folder {path} is not accessible: {source}")]
    RootNotAccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not create index location next to {near}: {source}")]
    IndexLocation {
        near: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Index engine failure: {0}")]
    Engine(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A single file could not be turned into a record. The walk continues.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Error reading file: {path}, error: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("{path} has no summary element and its body is only {len} characters (need {required})")]
    SummaryTooShort {
        path: PathBuf,
        len: usize,
        required: usize,
    },
}

impl ExtractionError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::SummaryTooShort { path, .. } => path,
        }
    }
}

/// The engine rejected one document.
#[derive(Debug, Error)]
#[error("{path} could not be added. Error: {reason}")]
pub struct IndexWriteError {
    pub path: PathBuf,
    pub reason: String,
}

/// A ranked result can no longer be resolved to its stored fields.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Document with id - {0} no longer exists")]
    NotFound(DocRef),

    #[error("Document with id - {doc} is unreadable: {reason}")]
    Corrupt { doc: DocRef, reason: String },
}

impl LookupError {
    pub fn doc(&self) -> DocRef {
        match self {
            Self::NotFound(doc) | Self::Corrupt { doc, .. } => *doc,
        }
    }
}

/// The engine failed while executing an otherwise valid query.
#[derive(Debug, Error)]
#[error("Search failed: {0}")]
pub struct SearchError(pub String);
