use tantivy::collector::{Collector, SegmentCollector, TopDocs};
use tantivy::query::QueryParser;
use tantivy::schema::Value;
use tantivy::{DocAddress, DocId, Index, IndexReader, Score, SegmentReader, TantivyDocument};
use tracing::{debug, warn};

use docseek_core::config::SearchSettings;
use docseek_core::error::{LookupError, SearchError, SetupError};
use docseek_core::traits::{DocumentLookup, RankedSearch};
use docseek_core::types::{DocRef, QueryResult, SearchOutcome, StoredDocument, TotalHits};

use crate::index::CommittedIndex;
use crate::normalizer::Normalizer;
use crate::tantivy_utils::IndexFields;

/// Read side of the index: multi-field conjunctive queries, top-K by score.
pub struct TantivySearchEngine {
	reader: IndexReader,
	fields: IndexFields,
	query_parser: QueryParser,
	top_k: usize,
	hits_threshold: usize,
}

impl TantivySearchEngine {
	pub fn open(committed: &CommittedIndex, normalizer: &Normalizer, settings: &SearchSettings) -> Result<Self, SetupError> {
		let engine_err = |e: tantivy::TantivyError| SetupError::Engine(format!("{} ({})", e, committed.location().display()));
		let index = Index::open_in_dir(committed.location()).map_err(engine_err)?;
		normalizer.register(&index);
		let fields = IndexFields::from_schema(&index.schema()).map_err(engine_err)?;
		let mut query_parser = QueryParser::for_index(&index, fields.query_fields());
		query_parser.set_conjunction_by_default();
		let reader = index.reader().map_err(engine_err)?;
		debug!(documents = reader.searcher().num_docs(), "opened index reader");
		Ok(Self { reader, fields, query_parser, top_k: settings.top_k, hits_threshold: settings.hits_threshold })
	}

	pub fn num_docs(&self) -> u64 { self.reader.searcher().num_docs() }
}

impl RankedSearch for TantivySearchEngine {
	fn search(&self, query: &str) -> Result<SearchOutcome, SearchError> {
		let parsed = match self.query_parser.parse_query(query) {
			Ok(parsed) => parsed,
			Err(e) => {
				warn!(query, "query rejected: {}", e);
				return Ok(SearchOutcome::Rejected { reason: e.to_string() });
			}
		};
		let searcher = self.reader.searcher();
		let collector = (TopDocs::with_limit(self.top_k), BoundedCount::new(self.hits_threshold));
		let (top_docs, counted) = searcher.search(&parsed, &collector).map_err(|e| SearchError(e.to_string()))?;

		let results = top_docs
			.into_iter()
			.enumerate()
			.map(|(i, (score, addr))| QueryResult { doc: DocRef { segment: addr.segment_ord, doc: addr.doc_id }, score, rank: i + 1 })
			.collect();
		let total_hits = if counted >= self.hits_threshold { TotalHits::AtLeast(self.hits_threshold) } else { TotalHits::Exact(counted) };
		Ok(SearchOutcome::Ranked { results, total_hits })
	}
}

impl DocumentLookup for TantivySearchEngine {
	fn fetch(&self, doc: DocRef) -> Result<StoredDocument, LookupError> {
		let searcher = self.reader.searcher();
		let in_range = searcher
			.segment_readers()
			.get(doc.segment as usize)
			.is_some_and(|segment| doc.doc < segment.max_doc());
		if !in_range {
			return Err(LookupError::NotFound(doc));
		}
		let stored: TantivyDocument = searcher
			.doc(DocAddress::new(doc.segment, doc.doc))
			.map_err(|e| LookupError::Corrupt { doc, reason: e.to_string() })?;
		let text = |field| stored.get_first(field).and_then(|v| v.as_str()).map(str::to_string);
		let path = text(self.fields.path).ok_or(LookupError::NotFound(doc))?;
		Ok(StoredDocument {
			path,
			id: text(self.fields.id).unwrap_or_default(),
			date: text(self.fields.date).unwrap_or_default(),
			title: text(self.fields.title),
			summary: text(self.fields.summary),
		})
	}
}

/// Counts matching documents, but stops counting at `threshold`.
pub struct BoundedCount {
	threshold: usize,
}

impl BoundedCount {
	pub fn new(threshold: usize) -> Self { Self { threshold } }
}

impl Collector for BoundedCount {
	type Fruit = usize;
	type Child = SegmentBoundedCount;

	fn for_segment(&self, _segment_local_id: u32, _segment: &SegmentReader) -> tantivy::Result<SegmentBoundedCount> {
		Ok(SegmentBoundedCount { threshold: self.threshold, count: 0 })
	}

	fn requires_scoring(&self) -> bool { false }

	fn merge_fruits(&self, segment_counts: Vec<usize>) -> tantivy::Result<usize> {
		Ok(segment_counts.into_iter().sum::<usize>().min(self.threshold))
	}
}

pub struct SegmentBoundedCount {
	threshold: usize,
	count: usize,
}

impl SegmentCollector for SegmentBoundedCount {
	type Fruit = usize;

	fn collect(&mut self, _doc: DocId, _score: Score) {
		if self.count < self.threshold { self.count += 1; }
	}

	fn harvest(self) -> usize { self.count }
}
