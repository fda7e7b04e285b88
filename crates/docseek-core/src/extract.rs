use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::error::ExtractionError;
use crate::traits::MarkupParser;
use crate::types::{DocumentContent, DocumentKind, DocumentRecord};

/// Turns one file into a [`DocumentRecord`].
pub struct DocumentExtractor<P> {
    parser: P,
    summary_chars: usize,
}

impl<P: MarkupParser> DocumentExtractor<P> {
    pub fn new(parser: P, summary_chars: usize) -> Self {
        Self { parser, summary_chars }
    }

    pub fn extract(&self, path: &Path, kind: DocumentKind) -> Result<DocumentRecord, ExtractionError> {
        let read_err = |source| ExtractionError::Read { path: path.to_path_buf(), source };
        let captured_at: DateTime<Local> = fs::metadata(path).and_then(|m| m.modified()).map_err(read_err)?.into();
        let bytes = fs::read(path).map_err(read_err)?;

        let content = match kind {
            DocumentKind::Text => DocumentContent::Text { body: decode_text(bytes) },
            DocumentKind::Html => self.html_content(path, &bytes)?,
        };

        Ok(DocumentRecord { path: path.to_path_buf(), id: Uuid::new_v4().to_string(), captured_at, content })
    }

    fn html_content(&self, path: &Path, bytes: &[u8]) -> Result<DocumentContent, ExtractionError> {
        let parsed = self
            .parser
            .parse(bytes)
            .map_err(|reason| ExtractionError::Parse { path: path.to_path_buf(), reason })?;
        let summary = match parsed.summary {
            Some(summary) => summary,
            None => leading_chars(&parsed.body, self.summary_chars).ok_or_else(|| ExtractionError::SummaryTooShort {
                path: path.to_path_buf(),
                len: parsed.body.chars().count(),
                required: self.summary_chars,
            })?,
        };
        Ok(DocumentContent::Html { title: parsed.title, summary, body: parsed.body })
    }
}

fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// First `n` characters, or `None` if the text is shorter.
fn leading_chars(text: &str, n: usize) -> Option<String> {
    let end = match text.char_indices().nth(n) {
        Some((idx, _)) => idx,
        None if text.chars().count() == n => text.len(),
        None => return None,
    };
    Some(text[..end].to_string())
}
