//! docseek-text
//!
//! Tantivy-backed index engine: the shared [`Normalizer`], the single-writer
//! [`TantivyIndexer`] and the [`TantivySearchEngine`] opened after commit.

pub mod index;
pub mod normalizer;
pub mod search;
pub mod tantivy_utils;

pub use index::{CommittedIndex, TantivyIndexer};
pub use normalizer::Normalizer;
pub use search::TantivySearchEngine;
