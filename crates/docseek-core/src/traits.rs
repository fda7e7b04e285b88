use crate::error::{IndexWriteError, LookupError, SearchError};
use crate::types::{DocRef, DocumentRecord, SearchOutcome, StoredDocument};

/// Write side of the index engine. Open for the indexing phase only.
pub trait DocumentSink {
    fn add(&mut self, record: &DocumentRecord) -> Result<(), IndexWriteError>;
}

/// Ranked multi-field query execution.
pub trait RankedSearch {
    fn search(&self, query: &str) -> Result<SearchOutcome, SearchError>;
}

/// Resolve a ranked hit back to its stored fields.
pub trait DocumentLookup {
    fn fetch(&self, doc: DocRef) -> Result<StoredDocument, LookupError>;
}

/// Structural HTML parsing.
pub trait MarkupParser {
    fn parse(&self, bytes: &[u8]) -> Result<ParsedMarkup, String>;
}

/// What the extractor needs from a parsed HTML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMarkup {
    pub title: String,
    /// `None` when the document has no summary element at all.
    pub summary: Option<String>,
    pub body: String,
}
