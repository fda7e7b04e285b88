use tantivy::schema::{Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED, STRING};

use crate::normalizer::NORMALIZER_NAME;

pub const PATH: &str = "path";
pub const ID: &str = "id";
pub const DATE: &str = "date";
pub const TITLE: &str = "title";
pub const SUMMARY: &str = "summary";
pub const BODY: &str = "body";

/// Rendering of the capture time stored in the `date` field.
pub const DATE_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

pub fn build_schema() -> Schema {
	let mut schema_builder = Schema::builder();
	let normalized = TextFieldIndexing::default().set_tokenizer(NORMALIZER_NAME).set_index_option(IndexRecordOption::WithFreqsAndPositions);
	let stored_text = TextOptions::default().set_indexing_options(normalized.clone()).set_stored();
	let searchable_only = TextOptions::default().set_indexing_options(normalized);
	schema_builder.add_text_field(PATH, STRING | STORED);
	schema_builder.add_text_field(ID, STRING | STORED);
	schema_builder.add_text_field(DATE, stored_text.clone());
	schema_builder.add_text_field(TITLE, stored_text.clone());
	schema_builder.add_text_field(SUMMARY, stored_text);
	schema_builder.add_text_field(BODY, searchable_only);
	schema_builder.build()
}

#[derive(Debug, Clone, Copy)]
pub struct IndexFields {
	pub path: Field,
	pub id: Field,
	pub date: Field,
	pub title: Field,
	pub summary: Field,
	pub body: Field,
}

impl IndexFields {
	pub fn from_schema(schema: &Schema) -> tantivy::Result<Self> {
		Ok(Self {
			path: schema.get_field(PATH)?,
			id: schema.get_field(ID)?,
			date: schema.get_field(DATE)?,
			title: schema.get_field(TITLE)?,
			summary: schema.get_field(SUMMARY)?,
			body: schema.get_field(BODY)?,
		})
	}

	/// Fields a free-text query is matched against.
	pub fn query_fields(&self) -> Vec<Field> {
		vec![self.body, self.title, self.date]
	}
}
