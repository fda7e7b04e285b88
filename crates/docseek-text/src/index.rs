use std::path::{Path, PathBuf};

use tantivy::{Index, IndexWriter, TantivyDocument};
use tracing::debug;

use docseek_core::error::{IndexWriteError, SetupError};
use docseek_core::traits::DocumentSink;
use docseek_core::types::{DocumentContent, DocumentRecord};

use crate::normalizer::Normalizer;
use crate::tantivy_utils::{build_schema, IndexFields, DATE_FORMAT};

fn engine_err(e: tantivy::TantivyError) -> SetupError { SetupError::Engine(e.to_string()) }

/// Write side of the index. Lives for the indexing phase only: [`TantivyIndexer::commit`]
/// consumes it, and a reader can only be opened from the [`CommittedIndex`] it returns.
pub struct TantivyIndexer {
	writer: IndexWriter,
	fields: IndexFields,
	location: PathBuf,
	added: usize,
}

/// Proof that the writer has committed and been released.
#[derive(Debug)]
pub struct CommittedIndex {
	location: PathBuf,
	documents: usize,
}

impl CommittedIndex {
	pub fn location(&self) -> &Path { &self.location }
	pub fn documents(&self) -> usize { self.documents }
}

impl TantivyIndexer {
	/// Create a fresh index in `location`, which must be an empty directory.
	pub fn create(location: &Path, normalizer: &Normalizer, writer_heap_bytes: usize) -> Result<Self, SetupError> {
		let schema = build_schema();
		let index = Index::create_in_dir(location, schema.clone()).map_err(engine_err)?;
		normalizer.register(&index);
		let fields = IndexFields::from_schema(&schema).map_err(engine_err)?;
		let writer = index.writer_with_num_threads(1, writer_heap_bytes).map_err(engine_err)?;
		debug!(location = %location.display(), "created index writer");
		Ok(Self { writer, fields, location: location.to_path_buf(), added: 0 })
	}

	fn to_document(&self, record: &DocumentRecord) -> TantivyDocument {
		let mut doc = TantivyDocument::default();
		doc.add_text(self.fields.path, record.path.to_string_lossy());
		doc.add_text(self.fields.id, &record.id);
		doc.add_text(self.fields.date, record.captured_at.format(DATE_FORMAT).to_string());
		match &record.content {
			DocumentContent::Text { body } => {
				doc.add_text(self.fields.body, body);
			}
			DocumentContent::Html { title, summary, body } => {
				doc.add_text(self.fields.title, title);
				doc.add_text(self.fields.summary, summary);
				doc.add_text(self.fields.body, body);
			}
		}
		doc
	}

	/// Commit, wait for merges and release the writer.
	pub fn commit(mut self) -> Result<CommittedIndex, SetupError> {
		self.writer.commit().map_err(engine_err)?;
		self.writer.wait_merging_threads().map_err(engine_err)?;
		debug!(documents = self.added, "index committed");
		Ok(CommittedIndex { location: self.location, documents: self.added })
	}
}

impl DocumentSink for TantivyIndexer {
	fn add(&mut self, record: &DocumentRecord) -> Result<(), IndexWriteError> {
		if record.path.as_os_str().is_empty() {
			return Err(IndexWriteError { path: record.path.clone(), reason: "empty path".to_string() });
		}
		let doc = self.to_document(record);
		self.writer
			.add_document(doc)
			.map_err(|e| IndexWriteError { path: record.path.clone(), reason: e.to_string() })?;
		self.added += 1;
		Ok(())
	}
}
