use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::info;

use docseek_core::config::{expand_path, Settings};
use docseek_core::error::SetupError;
use docseek_core::extract::DocumentExtractor;
use docseek_core::html::ScraperParser;
use docseek_core::ingest::{ingest, IngestReport};
use docseek_core::walker::CorpusWalker;
use docseek_text::{CommittedIndex, Normalizer, TantivyIndexer, TantivySearchEngine};

/// Everything a run shares: settings, the normalizer, the file classifier, the
/// corpus root and the process-scoped index directory (removed when the context is dropped).
pub struct RunContext {
    pub settings: Settings,
    pub normalizer: Normalizer,
    pub walker: CorpusWalker,
    root: PathBuf,
    index_dir: TempDir,
}

impl RunContext {
    /// Resolve the root argument and create a fresh index directory next to it.
    pub fn prepare(root_arg: &str, settings: Settings) -> Result<Self, SetupError> {
        if root_arg.trim().is_empty() {
            return Err(SetupError::MissingRoot);
        }
        settings.validate()?;
        let expanded = expand_path(root_arg);
        let root = std::fs::canonicalize(&expanded).map_err(|source| SetupError::RootNotAccessible { path: expanded, source })?;
        let near = root.parent().map(Path::to_path_buf).unwrap_or_else(std::env::temp_dir);
        let index_dir = tempfile::Builder::new()
            .prefix(&settings.index.dir_prefix)
            .tempdir_in(&near)
            .map_err(|source| SetupError::IndexLocation { near, source })?;
        info!(root = %root.display(), index = %index_dir.path().display(), "prepared run");
        Ok(Self { settings, normalizer: Normalizer::english(), walker: CorpusWalker::new(), root, index_dir })
    }

    pub fn index_location(&self) -> &Path { self.index_dir.path() }

    /// Indexing phase: walk, extract, add, commit. The writer is released on return.
    pub fn build_index(&self) -> Result<(IngestReport, CommittedIndex), SetupError> {
        let mut indexer = TantivyIndexer::create(self.index_location(), &self.normalizer, self.settings.index.writer_heap_bytes)?;
        let parser = ScraperParser::new().map_err(SetupError::Engine)?;
        let extractor = DocumentExtractor::new(parser, self.settings.extract.summary_chars);
        let report = ingest(&self.root, &self.walker, &extractor, &mut indexer)?;
        let committed = indexer.commit()?;
        Ok((report, committed))
    }

    /// Query phase. Requires the committed index of this run.
    pub fn open_engine(&self, committed: &CommittedIndex) -> Result<TantivySearchEngine, SetupError> {
        TantivySearchEngine::open(committed, &self.normalizer, &self.settings.search)
    }
}
