use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::SetupError;
use crate::extract::DocumentExtractor;
use crate::traits::{DocumentSink, MarkupParser};
use crate::walker::{CorpusWalker, WalkEntry};

/// Per-run indexing tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub indexed: usize,
    pub unsupported: usize,
    pub inaccessible: usize,
    pub extraction_failures: usize,
    pub write_failures: usize,
}

/// Walk `root`, extract each supported file and hand it to `sink`.
///
/// Only a missing or unreadable root is an error; everything else is logged and skipped.
pub fn ingest<P, S>(root: &Path, walker: &CorpusWalker, extractor: &DocumentExtractor<P>, sink: &mut S) -> Result<IngestReport, SetupError>
where
    P: MarkupParser,
    S: DocumentSink,
{
    let mut report = IngestReport::default();
    walker.walk(root, |entry| match entry {
        WalkEntry::Document { path, kind } => {
            let record = match extractor.extract(&path, kind) {
                Ok(record) => record,
                Err(err) => {
                    warn!(path = %err.path().display(), "{}", err);
                    report.extraction_failures += 1;
                    return;
                }
            };
            match sink.add(&record) {
                Ok(()) => {
                    debug!(id = %record.id, ?kind, "added document");
                    info!("{} indexed successfully", path.display());
                    report.indexed += 1;
                }
                Err(err) => {
                    warn!("{}", err);
                    report.write_failures += 1;
                }
            }
        }
        WalkEntry::Unsupported { path } => {
            warn!("{} is not supported for indexing. Error: Unsupported file format", path.display());
            report.unsupported += 1;
        }
        WalkEntry::Inaccessible { path, reason } => {
            match path {
                Some(path) => warn!("{} skipped: {}", path.display(), reason),
                None => warn!("entry skipped: {}", reason),
            }
            report.inaccessible += 1;
        }
    })?;
    info!(
        indexed = report.indexed,
        unsupported = report.unsupported,
        failed = report.extraction_failures + report.write_failures + report.inaccessible,
        "corpus walk finished"
    );
    Ok(report)
}
