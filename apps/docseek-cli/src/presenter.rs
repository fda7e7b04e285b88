use std::fmt::{self, Write};
use std::path::Path;

use chrono::{DateTime, Local};

use docseek_core::traits::DocumentLookup;
use docseek_core::types::{DocumentKind, QueryResult, TotalHits};
use docseek_core::walker::CorpusWalker;

const RULE: &str = "-------------------------------------------------------------------";
const HEADER: &str = "-------------------------- SearchResults --------------------------";

/// Last-modified date as `DD MMM YYYY`, read from the file system now.
pub fn modified_date(path: &Path) -> Option<String> {
    let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DateTime::<Local>::from(modified).format("%d %b %Y").to_string())
}

/// Render ranked results for the console.
///
/// `kinds` is the classifier used at indexing time; it decides which entries
/// carry a title and summary.
pub fn present<L: DocumentLookup>(
    results: &[QueryResult],
    total_hits: Option<TotalHits>,
    query: &str,
    lookup: &L,
    kinds: &CorpusWalker,
) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_report(&mut out, results, total_hits, query, lookup, kinds);
    out
}

fn write_report<L: DocumentLookup>(
    out: &mut String,
    results: &[QueryResult],
    total_hits: Option<TotalHits>,
    query: &str,
    lookup: &L,
    kinds: &CorpusWalker,
) -> fmt::Result {
    if results.is_empty() {
        return writeln!(out, "No documents found for the query: {}", query);
    }

    writeln!(out, "{}", HEADER)?;
    match total_hits {
        Some(total) => writeln!(out, "{} documents found ({} matching)", results.len(), total)?,
        None => writeln!(out, "{} documents found", results.len())?,
    }
    writeln!(out, "{}", RULE)?;

    for result in results {
        let stored = match lookup.fetch(result.doc) {
            Ok(stored) => stored,
            Err(err) => {
                writeln!(out, "Document with id - {} no longer exists", err.doc())?;
                continue;
            }
        };
        let path = Path::new(&stored.path);
        let filename = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_else(|| stored.path.clone());
        writeln!(out, "Document Name: {}", filename)?;
        writeln!(out, "Rank: {}", result.rank)?;
        writeln!(out, "Path: {}", stored.path)?;
        writeln!(out, "Last Modified Date: {}", modified_date(path).unwrap_or_else(|| "unavailable".to_string()))?;
        writeln!(out, "Relevance Score: {}", result.score)?;
        if kinds.classify(path) == Some(DocumentKind::Html) {
            writeln!(out, "Title: {}", stored.title.as_deref().unwrap_or(""))?;
            writeln!(out, "Summary: {}", stored.summary.as_deref().unwrap_or(""))?;
        }
        writeln!(out, "{}", RULE)?;
    }
    Ok(())
}
