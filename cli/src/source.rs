use anyhow::{Context, Result};
use scraper::Html;
use searchlite_core::{Analyzer, Document, DocumentSource};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Text,
    /// Strip HTML markup before tokenizing.
    Html,
}

/// Restartable document source over a directory tree.
///
/// Files are walked and sorted by path, so document ids are assigned in a
/// deterministic order and both indexing passes see the same corpus.
pub struct DirSource {
    root: PathBuf,
    kind: DocKind,
    analyzer: Analyzer,
}

impl DirSource {
    pub fn new(root: impl AsRef<Path>, kind: DocKind, analyzer: Analyzer) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            kind,
            analyzer,
        }
    }

    fn files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry.with_context(|| format!("walking {}", self.root.display()))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }

    fn load(&self, path: &Path) -> Result<Document> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let text = match self.kind {
            DocKind::Text => raw,
            DocKind::Html => strip_html(&raw),
        };
        let name = path
            .strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();
        let mut doc = Document::new(name, self.analyzer.tokenize(&text));
        doc.origin = Some(path.to_string_lossy().into_owned());
        Ok(doc)
    }
}

impl DocumentSource for DirSource {
    fn stream(&self) -> Result<Box<dyn Iterator<Item = Result<Document>> + '_>> {
        let files = self.files()?;
        Ok(Box::new(files.into_iter().map(move |p| self.load(&p))))
    }
}

fn strip_html(html: &str) -> String {
    let parsed = Html::parse_document(html);
    parsed
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn collect(source: &DirSource) -> Vec<Document> {
        source
            .stream()
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn streams_files_in_sorted_order_and_restarts_identically() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "beta text").unwrap();
        fs::write(dir.path().join("a.txt"), "alpha text").unwrap();
        let source = DirSource::new(dir.path(), DocKind::Text, Analyzer::new(false));

        let first = collect(&source);
        let second = collect(&source);
        let names: Vec<_> = first.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert_eq!(
            names,
            second.iter().map(|d| d.name.as_str()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn html_mode_strips_markup() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("page.html"),
            "<html><body><h1>Solar power</h1><p>panel <b>wiring</b></p></body></html>",
        )
        .unwrap();
        let source = DirSource::new(dir.path(), DocKind::Html, Analyzer::new(false));
        let docs = collect(&source);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].tokens, vec!["solar", "power", "panel", "wiring"]);
        assert!(!docs[0].tokens.iter().any(|t| t.contains("html")));
    }

    #[test]
    fn text_mode_does_not_strip_markup() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("note.txt"), "plain <b>note</b>").unwrap();
        let source = DirSource::new(dir.path(), DocKind::Text, Analyzer::new(false));
        let docs = collect(&source);
        assert_eq!(docs[0].tokens, vec!["plain", "b", "note", "b"]);
        assert_eq!(
            docs[0].origin.as_deref().unwrap(),
            dir.path().join("note.txt").to_string_lossy()
        );
    }
}
