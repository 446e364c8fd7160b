use searchlite_cli::{DirSource, DocKind, Session};
use searchlite_core::{Analyzer, Feedback, InvertedIndex, DEFAULT_MAX_PHRASES};
use std::fs;
use std::io::Cursor;
use tempfile::tempdir;

fn build_dir_index(stem: bool) -> (tempfile::TempDir, InvertedIndex) {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("cats.txt"), "the cat sat on the mat").unwrap();
    fs::write(dir.path().join("dogs.txt"), "a dog ran in the park").unwrap();
    fs::write(dir.path().join("both.txt"), "the cat chased a dog").unwrap();
    let analyzer = Analyzer::new(stem);
    let source = DirSource::new(dir.path(), DocKind::Text, analyzer);
    let mut index = InvertedIndex::new();
    index.build(&source, DEFAULT_MAX_PHRASES).unwrap();
    (dir, index)
}

fn run_session(index: &InvertedIndex, feedback: Option<Feedback>, script: &str) -> String {
    let session = Session::new(index, Analyzer::new(false), feedback, 10);
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut output = Vec::new();
    session.run(&mut input, &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn empty_query_ends_the_session() {
    let (_dir, index) = build_dir_index(false);
    let out = run_session(&index, None, "\n");
    assert!(out.contains("Session ended."));
    assert!(!out.contains("matching documents"));
}

#[test]
fn single_word_query_lists_matching_files() {
    let (_dir, index) = build_dir_index(false);
    let out = run_session(&index, None, "cat\n\n");
    assert!(out.contains("cats.txt"));
    assert!(out.contains("both.txt"));
    assert!(!out.contains("dogs.txt"));
}

#[test]
fn phrase_query_matches_adjacent_pairs_only() {
    let (_dir, index) = build_dir_index(false);
    let out = run_session(&index, None, "the cat\n\n");
    assert!(out.contains("cats.txt"));
    assert!(out.contains("both.txt"));
    assert!(!out.contains("dogs.txt"));
}

#[test]
fn unmatched_query_reports_no_documents() {
    let (_dir, index) = build_dir_index(false);
    let out = run_session(&index, None, "zebra\n\n");
    assert!(out.contains("No matching documents."));
}

#[test]
fn feedback_prompt_accepts_judgments_and_reretrieves() {
    let (_dir, index) = build_dir_index(false);
    // Query "cat", mark the top hit relevant, then finish the round and
    // the session.
    let out = run_session(&index, Some(Feedback::default()), "cat\n+1\n\n\n");
    let prompts = out.matches("Feedback (").count();
    assert!(prompts >= 2, "expected a re-retrieval after judgment:\n{out}");
    assert!(out.contains("Session ended."));
}

#[test]
fn eof_ends_the_session_cleanly() {
    let (_dir, index) = build_dir_index(false);
    let out = run_session(&index, None, "");
    assert!(out.contains("Session ended."));
}
