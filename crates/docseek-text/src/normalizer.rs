//! Text normalization shared by the index writer and the query parser.
//!
//! Stages run in a fixed order: segment on word boundaries (runs capped at
//! [`MAX_TOKEN_LEN`] characters), lower-case, Snowball English stem. The same
//! analyzer is registered under [`NORMALIZER_NAME`] for every text field, so a
//! string normalizes identically whether it is indexed or queried.

use tantivy::tokenizer::{Language, LowerCaser, Stemmer, TextAnalyzer, Token, TokenStream, Tokenizer};
use tantivy::Index;

pub const NORMALIZER_NAME: &str = "docseek_en";
pub const MAX_TOKEN_LEN: usize = 255;

#[derive(Clone)]
pub struct Normalizer {
	analyzer: TextAnalyzer,
}

impl Default for Normalizer {
	fn default() -> Self { Self::english() }
}

impl Normalizer {
	pub fn english() -> Self {
		let analyzer = TextAnalyzer::builder(WordSegmenter::new(MAX_TOKEN_LEN))
			.filter(LowerCaser)
			.filter(Stemmer::new(Language::English))
			.build();
		Self { analyzer }
	}

	pub fn normalize(&self, text: &str) -> Vec<String> {
		let mut analyzer = self.analyzer.clone();
		let mut stream = analyzer.token_stream(text);
		let mut tokens = Vec::new();
		while stream.advance() {
			tokens.push(stream.token().text.clone());
		}
		tokens
	}

	pub fn register(&self, index: &Index) {
		index.tokenizers().register(NORMALIZER_NAME, self.analyzer.clone());
	}
}

/// Splits text into maximal alphanumeric runs. A run longer than `max_chars`
/// is cut into consecutive pieces of at most `max_chars` characters.
#[derive(Clone, Debug)]
pub struct WordSegmenter {
	max_chars: usize,
}

impl WordSegmenter {
	pub fn new(max_chars: usize) -> Self {
		Self { max_chars: max_chars.max(1) }
	}

	fn segment(&self, text: &str) -> Vec<Token> {
		let mut tokens = Vec::new();
		let mut start: Option<usize> = None;
		let mut run_chars = 0;
		for (idx, c) in text.char_indices() {
			if c.is_alphanumeric() {
				if run_chars == self.max_chars {
					if let Some(from) = start.take() { push_token(&mut tokens, text, from, idx); }
					run_chars = 0;
				}
				start.get_or_insert(idx);
				run_chars += 1;
			} else {
				if let Some(from) = start.take() { push_token(&mut tokens, text, from, idx); }
				run_chars = 0;
			}
		}
		if let Some(from) = start { push_token(&mut tokens, text, from, text.len()); }
		tokens
	}
}

fn push_token(tokens: &mut Vec<Token>, text: &str, from: usize, to: usize) {
	let position = tokens.len();
	tokens.push(Token { offset_from: from, offset_to: to, position, text: text[from..to].to_string(), position_length: 1 });
}

impl Tokenizer for WordSegmenter {
	type TokenStream<'a> = SegmentStream;

	fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
		SegmentStream { tokens: self.segment(text), next: 0 }
	}
}

pub struct SegmentStream {
	tokens: Vec<Token>,
	next: usize,
}

impl TokenStream for SegmentStream {
	fn advance(&mut self) -> bool {
		if self.next < self.tokens.len() {
			self.next += 1;
			true
		} else {
			false
		}
	}

	fn token(&self) -> &Token {
		&self.tokens[self.next - 1]
	}

	fn token_mut(&mut self) -> &mut Token {
		&mut self.tokens[self.next - 1]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lowercases_and_stems() {
		let n = Normalizer::english();
		assert_eq!(n.normalize("Running Jumps CONNECTION"), vec!["run", "jump", "connect"]);
	}

	#[test]
	fn segments_on_punctuation() {
		let n = Normalizer::english();
		assert_eq!(n.normalize("alpha,beta;gamma-delta"), vec!["alpha", "beta", "gamma", "delta"]);
		assert!(n.normalize("  ... !!! ").is_empty());
	}

	#[test]
	fn deterministic_across_calls_and_clones() {
		let n = Normalizer::english();
		let text = "Searching the indexed documents, again and again.";
		assert_eq!(n.normalize(text), n.normalize(text));
		assert_eq!(n.clone().normalize(text), Normalizer::default().normalize(text));
	}

	#[test]
	fn long_runs_are_split_at_cap() {
		let long = "z".repeat(MAX_TOKEN_LEN + 45);
		let segments = WordSegmenter::new(MAX_TOKEN_LEN).segment(&long);
		assert_eq!(segments.len(), 2);
		assert_eq!(segments[0].text.chars().count(), MAX_TOKEN_LEN);
		assert_eq!(segments[1].text.chars().count(), 45);
		assert_eq!(segments[1].offset_from, MAX_TOKEN_LEN);
		assert_eq!(segments[1].position, 1);

		let tokens = Normalizer::english().normalize(&long);
		assert_eq!(tokens.len(), 2);
		assert!(tokens.iter().all(|t| t.chars().count() <= MAX_TOKEN_LEN));
	}

	#[test]
	fn multibyte_runs_keep_char_boundaries() {
		let segments = WordSegmenter::new(2).segment("éàü ok");
		let texts: Vec<_> = segments.iter().map(|t| t.text.as_str()).collect();
		assert_eq!(texts, vec!["éà", "ü", "ok"]);
	}
}
