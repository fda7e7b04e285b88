use std::cell::RefCell;
use std::fs;
use std::io::Cursor;

use tempfile::TempDir;

use docseek_cli::presenter::{modified_date, present};
use docseek_cli::session::{is_quit, PROMPT};
use docseek_cli::{run_session, RunContext};
use docseek_core::config::Settings;
use docseek_core::error::{LookupError, SearchError, SetupError};
use docseek_core::traits::{DocumentLookup, RankedSearch};
use docseek_core::types::{DocRef, DocumentKind, QueryResult, SearchOutcome, StoredDocument, TotalHits};
use docseek_core::walker::CorpusWalker;

/// Canned engine: records queries, serves stored documents by segment number.
#[derive(Default)]
struct FakeEngine {
    queries: RefCell<Vec<String>>,
    docs: Vec<StoredDocument>,
}

impl RankedSearch for FakeEngine {
    fn search(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        self.queries.borrow_mut().push(query.to_string());
        if query.contains(':') {
            return Ok(SearchOutcome::Rejected { reason: "bad field".to_string() });
        }
        let results = (0..self.docs.len() as u32)
            .map(|i| QueryResult { doc: DocRef { segment: i, doc: 0 }, score: 1.0 / (i as f32 + 1.0), rank: i as usize + 1 })
            .collect::<Vec<_>>();
        let total_hits = TotalHits::Exact(results.len());
        Ok(SearchOutcome::Ranked { results, total_hits })
    }
}

impl DocumentLookup for FakeEngine {
    fn fetch(&self, doc: DocRef) -> Result<StoredDocument, LookupError> {
        self.docs.get(doc.segment as usize).cloned().ok_or(LookupError::NotFound(doc))
    }
}

fn stored(path: &str, title: Option<&str>, summary: Option<&str>) -> StoredDocument {
    StoredDocument {
        path: path.to_string(),
        id: "id".to_string(),
        date: "Sun Oct 18 09:30:00 2026".to_string(),
        title: title.map(str::to_string),
        summary: summary.map(str::to_string),
    }
}

fn session(engine: &FakeEngine, input: &[u8]) -> (usize, String) {
    let mut out = Vec::new();
    let executed = run_session(engine, &CorpusWalker::new(), Cursor::new(input.to_vec()), &mut out).expect("session");
    (executed, String::from_utf8(out).unwrap())
}

#[test]
fn quit_is_case_insensitive_and_exact() {
    assert!(is_quit("q"));
    assert!(is_quit("Q"));
    assert!(!is_quit("q "));
    assert!(!is_quit("quit"));
    assert!(!is_quit(""));
}

#[test]
fn quit_exits_without_searching() {
    for input in [&b"q\n"[..], b"Q\n", b"Q\r\n"] {
        let engine = FakeEngine::default();
        let (executed, out) = session(&engine, input);
        assert_eq!(executed, 0);
        assert!(engine.queries.borrow().is_empty());
        assert_eq!(out.matches(PROMPT).count(), 1);
    }
}

#[test]
fn queries_run_verbatim_until_quit() {
    let engine = FakeEngine::default();
    let (executed, out) = session(&engine, b"  Alpha  Beta \n\nq\nnever\n");
    assert_eq!(executed, 2);
    assert_eq!(*engine.queries.borrow(), vec!["  Alpha  Beta ".to_string(), String::new()]);
    assert!(out.contains("No documents found for the query:   Alpha  Beta "));
    assert_eq!(out.matches(PROMPT).count(), 3);
}

#[test]
fn end_of_input_ends_session() {
    let engine = FakeEngine::default();
    let (executed, _) = session(&engine, b"alpha");
    assert_eq!(executed, 1);
    assert_eq!(*engine.queries.borrow(), vec!["alpha".to_string()]);
}

#[test]
fn rejected_query_reports_no_results_and_continues() {
    let engine = FakeEngine { docs: vec![stored("/tmp/a.txt", None, None)], ..Default::default() };
    let (executed, out) = session(&engine, b"title:\nalpha\nq\n");
    assert_eq!(executed, 2);
    assert!(out.contains("No documents found for the query: title:"));
    assert!(out.contains("Document Name: a.txt"));
}

#[test]
fn undecodable_line_is_searched_lossily_and_session_continues() {
    let engine = FakeEngine::default();
    let (executed, out) = session(&engine, b"caf\xe9\nalpha\nq\n");
    assert_eq!(executed, 2);
    assert_eq!(*engine.queries.borrow(), vec!["caf\u{FFFD}".to_string(), "alpha".to_string()]);
    assert!(out.contains("No documents found for the query: alpha"));
}

#[test]
fn present_follows_registered_kinds() {
    let engine = FakeEngine { docs: vec![stored("/corpus/old.htm", Some("Old"), Some("Legacy page"))], ..Default::default() };
    let SearchOutcome::Ranked { results, total_hits } = engine.search("alpha").unwrap() else { panic!("ranked") };

    let plain = present(&results, Some(total_hits), "alpha", &engine, &CorpusWalker::new());
    assert!(!plain.contains("Title:"));

    let kinds = CorpusWalker::new().with_kind("htm", DocumentKind::Html);
    let out = present(&results, Some(total_hits), "alpha", &engine, &kinds);
    assert!(out.contains("Title: Old\nSummary: Legacy page\n"));
}

#[test]
fn present_empty_results() {
    let engine = FakeEngine::default();
    assert_eq!(present(&[], None, "zebra", &engine, &CorpusWalker::new()), "No documents found for the query: zebra\n");
}

#[test]
fn present_shows_html_fields_only_for_html_files() {
    let engine = FakeEngine {
        docs: vec![stored("/corpus/notes.HTML", Some("Notes"), Some("Team memo")), stored("/corpus/report.txt", None, None)],
        ..Default::default()
    };
    let SearchOutcome::Ranked { results, total_hits } = engine.search("alpha").unwrap() else { panic!("ranked") };
    let out = present(&results, Some(total_hits), "alpha", &engine, &CorpusWalker::new());

    assert!(out.contains("2 documents found (2 matching)"));
    let notes = out.find("Document Name: notes.HTML").expect("notes entry");
    let report = out.find("Document Name: report.txt").expect("report entry");
    assert!(notes < report);
    assert!(out.contains("Rank: 1\nPath: /corpus/notes.HTML\n"));
    assert!(out.contains("Rank: 2\nPath: /corpus/report.txt\n"));
    assert!(out.contains("Relevance Score: 1\n"));
    assert!(out.contains("Relevance Score: 0.5\n"));
    assert!(out.contains("Last Modified Date: unavailable"));
    assert_eq!(out.matches("Title: Notes").count(), 1);
    assert_eq!(out.matches("Summary: Team memo").count(), 1);
    assert_eq!(out.matches("Title:").count(), 1);
}

#[test]
fn present_reports_missing_documents_inline() {
    let engine = FakeEngine { docs: vec![stored("/corpus/a.txt", None, None)], ..Default::default() };
    let results = vec![
        QueryResult { doc: DocRef { segment: 7, doc: 3 }, score: 2.0, rank: 1 },
        QueryResult { doc: DocRef { segment: 0, doc: 0 }, score: 1.0, rank: 2 },
    ];
    let out = present(&results, Some(TotalHits::AtLeast(10)), "alpha", &engine, &CorpusWalker::new());
    assert!(out.contains("2 documents found (10+ matching)"));
    assert!(out.contains("Document with id - 7:3 no longer exists"));
    assert!(out.contains("Document Name: a.txt"));
}

#[test]
fn modified_date_is_day_month_year() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("a.txt");
    fs::write(&path, "x").unwrap();
    let expected = chrono::Local::now().format("%d %b %Y").to_string();
    assert_eq!(modified_date(&path).as_deref(), Some(expected.as_str()));
    assert_eq!(modified_date(&tmp.path().join("missing.txt")), None);
}

#[test]
fn empty_root_argument_is_fatal() {
    assert!(matches!(RunContext::prepare("", Settings::default()), Err(SetupError::MissingRoot)));
    assert!(matches!(RunContext::prepare("   ", Settings::default()), Err(SetupError::MissingRoot)));
}

#[test]
fn missing_root_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("does-not-exist");
    let result = RunContext::prepare(missing.to_str().unwrap(), Settings::default());
    assert!(matches!(result, Err(SetupError::RootNotAccessible { .. })));
}

#[test]
fn full_run_indexes_then_answers_queries() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("corpus");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("report.txt"), "alpha beta gamma").unwrap();
    fs::write(
        root.join("sub/notes.html"),
        "<html><head><title>Notes</title></head><body><summary>Team memo</summary>alpha only</body></html>",
    )
    .unwrap();
    fs::write(root.join("paper.pdf"), "alpha beta").unwrap();

    let context = RunContext::prepare(root.to_str().unwrap(), Settings::default()).expect("prepare");
    let location = context.index_location().to_path_buf();
    assert!(location.starts_with(tmp.path().canonicalize().unwrap()));
    assert!(location.file_name().unwrap().to_string_lossy().starts_with("index"));

    let (report, committed) = context.build_index().expect("index");
    assert_eq!(report.indexed, 2);
    assert_eq!(report.unsupported, 1);
    let engine = context.open_engine(&committed).expect("engine");

    let mut out = Vec::new();
    let executed = run_session(&engine, &context.walker, Cursor::new(b"alpha\nalpha beta\nQ\n".to_vec()), &mut out).expect("session");
    let out = String::from_utf8(out).unwrap();
    assert_eq!(executed, 2);
    assert!(out.contains("2 documents found (2 matching)"));
    assert!(out.contains("1 documents found (1 matching)"));
    assert!(out.contains("Title: Notes"));
    assert!(out.contains("Summary: Team memo"));
    assert!(!out.contains("paper.pdf"));

    drop(engine);
    drop(context);
    assert!(!location.exists());
}
