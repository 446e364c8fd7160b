use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use crate::error::{EngineError, Result};
use crate::source::DocumentSource;
use crate::vector::{select_top, Bigrams, TermExtractor, TermVector, Unigrams};

pub type DocId = u32;

/// Cap on the frozen phrase vocabulary.
pub const DEFAULT_MAX_PHRASES: usize = 1000;

#[derive(Debug, Clone, Serialize)]
pub struct DocMeta {
    pub name: String,
    pub origin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Posting {
    pub doc: DocId,
    /// Raw term frequency. The tf-idf weight is `tf * idf(term)`.
    pub tf: f64,
}

#[derive(Debug, Default)]
struct TermEntry {
    /// ln(N / df), 0.0 until weighting runs.
    idf: f64,
    postings: Vec<Posting>,
}

#[derive(Debug)]
struct DocEntry {
    meta: DocMeta,
    /// Raw term vector as indexed, kept for feedback reconstruction.
    vector: TermVector,
    /// Euclidean norm of the weighted vector, defined once weighting runs.
    length: f64,
}

/// Index lifecycle. The engine is strictly single-use per corpus: it builds
/// once, weights once, and is read-only afterwards. Every public operation
/// names the states it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexState {
    #[default]
    Empty,
    Indexed,
    Weighted,
}

/// Inverted index over unigram and frequent-bigram terms.
///
/// Built with the two-pass protocol: the first pass aggregates every bigram
/// in the corpus, the vocabulary is frozen to the most frequent
/// `max_phrases`, and the second pass indexes unigrams plus in-vocabulary
/// bigrams. A single pass cannot work here: the vocabulary depends on
/// corpus-global counts that are unknown until every document has been seen.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    terms: HashMap<String, TermEntry>,
    docs: Vec<DocEntry>,
    names: HashMap<String, DocId>,
    vocab: HashSet<String>,
    state: IndexState,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> IndexState {
        self.state
    }

    pub fn num_docs(&self) -> usize {
        self.docs.len()
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// The frozen phrase vocabulary. Empty before `build`.
    pub fn vocab(&self) -> &HashSet<String> {
        &self.vocab
    }

    pub fn doc_meta(&self, doc: DocId) -> Option<&DocMeta> {
        self.docs.get(doc as usize).map(|d| &d.meta)
    }

    pub fn doc_length(&self, doc: DocId) -> f64 {
        self.docs.get(doc as usize).map_or(0.0, |d| d.length)
    }

    pub fn idf(&self, term: &str) -> f64 {
        self.terms.get(term).map_or(0.0, |t| t.idf)
    }

    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.terms.get(term).map(|t| t.postings.as_slice())
    }

    /// Build the index from a restartable document source and compute
    /// weights. Requires the `Empty` state: a second corpus is never merged
    /// into an existing instance.
    pub fn build(&mut self, source: &dyn DocumentSource, max_phrases: usize) -> Result<()> {
        if self.state != IndexState::Empty {
            return Err(EngineError::InvalidState(
                "cannot build into an index that already holds documents",
            ));
        }

        // Pass 1: aggregate every bigram in the corpus.
        let mut aggregate = TermVector::new();
        let mut pass1_docs = 0usize;
        for item in source.stream()? {
            let doc = item?;
            debug!(doc = %doc.name, "scanning");
            Bigrams::all().extract(&doc.tokens).merge_into(&mut aggregate);
            pass1_docs += 1;
        }
        self.vocab = select_top(&aggregate, max_phrases);
        info!(
            docs = pass1_docs,
            candidates = aggregate.len(),
            vocab = self.vocab.len(),
            "phrase vocabulary frozen"
        );

        // Pass 2: index unigrams plus in-vocabulary bigrams.
        for item in source.stream()? {
            let doc = item?;
            debug!(doc = %doc.name, "indexing");
            let mut vector = Unigrams.extract(&doc.tokens);
            Bigrams::restricted(&self.vocab)
                .extract(&doc.tokens)
                .merge_into(&mut vector);
            let meta = DocMeta {
                name: doc.name,
                origin: doc.origin,
            };
            self.index_document(meta, vector)?;
        }

        self.compute_weights()?;
        info!(
            docs = self.num_docs(),
            terms = self.num_terms(),
            "index built"
        );
        Ok(())
    }

    /// Register one document's term vector: one posting per (term, count).
    /// Accepts the `Empty` and `Indexed` states; a weighted index is
    /// read-only.
    pub fn index_document(&mut self, meta: DocMeta, vector: TermVector) -> Result<DocId> {
        if self.state == IndexState::Weighted {
            return Err(EngineError::InvalidState(
                "cannot index a document after weighting has run",
            ));
        }
        if self.names.contains_key(&meta.name) {
            return Err(EngineError::DuplicateDocument(meta.name));
        }
        let doc = self.docs.len() as DocId;
        for (term, tf) in vector.iter() {
            self.terms
                .entry(term.to_string())
                .or_default()
                .postings
                .push(Posting { doc, tf });
        }
        self.names.insert(meta.name.clone(), doc);
        self.docs.push(DocEntry {
            meta,
            vector,
            length: 0.0,
        });
        self.state = IndexState::Indexed;
        Ok(doc)
    }

    /// Compute idf per term and the Euclidean length of every weighted
    /// document vector. Runs exactly once, after indexing and before the
    /// first retrieval; retrieval reads the stored lengths.
    pub fn compute_weights(&mut self) -> Result<()> {
        match self.state {
            IndexState::Indexed => {}
            IndexState::Empty => {
                return Err(EngineError::InvalidState(
                    "cannot compute weights on an empty index",
                ))
            }
            IndexState::Weighted => {
                return Err(EngineError::InvalidState(
                    "weights have already been computed",
                ))
            }
        }
        let n = self.docs.len() as f64;
        for entry in self.terms.values_mut() {
            // df >= 1 by construction: a term exists only via a posting.
            let df = entry.postings.len() as f64;
            entry.idf = (n / df).ln();
        }
        for doc in self.docs.iter_mut() {
            let sum: f64 = doc
                .vector
                .iter()
                .map(|(term, tf)| {
                    let w = tf * self.terms[term].idf;
                    w * w
                })
                .sum();
            doc.length = sum.sqrt();
        }
        self.state = IndexState::Weighted;
        Ok(())
    }

    /// The raw term vector a document was indexed with. Feedback adds these
    /// into the query vector; the idf table weights everything once, at
    /// retrieval. Requires `Weighted`.
    pub fn doc_vector(&self, doc: DocId) -> Result<&TermVector> {
        if self.state != IndexState::Weighted {
            return Err(EngineError::InvalidState(
                "document vectors are not served before weighting",
            ));
        }
        self.docs
            .get(doc as usize)
            .map(|d| &d.vector)
            .ok_or(EngineError::UnknownDocument(doc))
    }
}
