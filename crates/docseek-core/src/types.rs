//! Domain types shared by the walker, the extractor and the engines.

use chrono::{DateTime, Local};
use std::fmt;
use std::path::{Path, PathBuf};

/// File types the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Html,
    Text,
}

impl DocumentKind {
    /// Default extension table. Matching is case-insensitive.
    pub const TABLE: &'static [(&'static str, DocumentKind)] = &[("html", DocumentKind::Html), ("txt", DocumentKind::Text)];

    pub fn from_path_with<'a, I>(table: I, path: &Path) -> Option<Self>
    where
        I: IntoIterator<Item = (&'a str, DocumentKind)>,
    {
        let ext = path.extension()?.to_str()?;
        table
            .into_iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(ext))
            .map(|(_, kind)| kind)
    }
}

/// Extracted fields. Title and summary only exist for HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentContent {
    Text { body: String },
    Html { title: String, summary: String, body: String },
}

impl DocumentContent {
    pub fn body(&self) -> &str {
        match self {
            Self::Text { body } | Self::Html { body, .. } => body,
        }
    }
}

/// The unit of indexing.
///
/// - `path`: absolute path of the source file
/// - `id`: random process-unique identifier, never shown to users
/// - `captured_at`: last-modified time read once at extraction
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    pub path: PathBuf,
    pub id: String,
    pub captured_at: DateTime<Local>,
    pub content: DocumentContent,
}

/// Engine-internal address of an indexed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocRef {
    pub segment: u32,
    pub doc: u32,
}

impl fmt::Display for DocRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.segment, self.doc)
    }
}

/// Retrievable fields of an indexed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub path: String,
    pub id: String,
    pub date: String,
    pub title: Option<String>,
    pub summary: Option<String>,
}

/// One ranked hit. `rank` is 1-based and follows descending score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryResult {
    pub doc: DocRef,
    pub score: f32,
    pub rank: usize,
}

/// Number of matching documents, counted up to the hits threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalHits {
    Exact(usize),
    AtLeast(usize),
}

impl fmt::Display for TotalHits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{}", n),
            Self::AtLeast(n) => write!(f, "{}+", n),
        }
    }
}

/// Result of a single query.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Ranked { results: Vec<QueryResult>, total_hits: TotalHits },
    /// The query text does not follow the engine grammar.
    Rejected { reason: String },
}

impl SearchOutcome {
    pub fn results(&self) -> &[QueryResult] {
        match self {
            Self::Ranked { results, .. } => results,
            Self::Rejected { .. } => &[],
        }
    }
}
