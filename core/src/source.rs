use anyhow::Result;

/// One document as the engine sees it: reference metadata plus the
/// already-normalized token sequence.
#[derive(Debug, Clone)]
pub struct Document {
    /// Display name, unique within one corpus.
    pub name: String,
    /// Where the document came from (file path, URL, ...).
    pub origin: Option<String>,
    pub tokens: Vec<String>,
}

impl Document {
    pub fn new(name: impl Into<String>, tokens: Vec<String>) -> Self {
        Self {
            name: name.into(),
            origin: None,
            tokens,
        }
    }
}

/// A finite, restartable stream of documents.
///
/// The two-pass build calls `stream` twice and requires the same document
/// set both times (order may differ). A failed item aborts the whole build;
/// the engine never indexes a partial corpus.
pub trait DocumentSource {
    fn stream(&self) -> Result<Box<dyn Iterator<Item = Result<Document>> + '_>>;
}

/// In-memory corpus, used by tests and benches.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    docs: Vec<Document>,
}

impl MemoryCorpus {
    pub fn new(docs: Vec<Document>) -> Self {
        Self { docs }
    }
}

impl DocumentSource for MemoryCorpus {
    fn stream(&self) -> Result<Box<dyn Iterator<Item = Result<Document>> + '_>> {
        Ok(Box::new(self.docs.iter().cloned().map(Ok)))
    }
}
