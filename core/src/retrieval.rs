use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::{EngineError, Result};
use crate::index::{DocId, IndexState, InvertedIndex};
use crate::tokenizer::Analyzer;
use crate::vector::{Bigrams, TermExtractor, TermVector, Unigrams};

/// How a raw query is vectorized. Chosen once from the query's shape; a
/// query is scored against exactly one term shape, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QueryMode {
    Single,
    Phrase,
}

impl QueryMode {
    /// Internal whitespace means the user is searching for a phrase.
    pub fn of(raw: &str) -> Self {
        if raw.trim().split_whitespace().count() > 1 {
            QueryMode::Phrase
        } else {
            QueryMode::Single
        }
    }
}

/// Build the query vector for a raw query string.
pub fn build_query_vector(raw: &str, analyzer: Analyzer) -> (QueryMode, TermVector) {
    let mode = QueryMode::of(raw);
    let tokens = analyzer.tokenize(raw);
    let vector = match mode {
        QueryMode::Single => Unigrams.extract(&tokens),
        QueryMode::Phrase => Bigrams::all().extract(&tokens),
    };
    (mode, vector)
}

#[derive(Debug, Clone, Serialize)]
pub struct Retrieval {
    pub doc: DocId,
    pub name: String,
    pub score: f64,
}

/// Rank documents by cosine similarity against `query`.
///
/// The query is weighted with the corpus idf table; terms unseen in the
/// corpus (and ubiquitous, zero-idf terms) cannot discriminate and are
/// skipped. Candidates come from posting-list lookups only, so a document
/// sharing no term with the query is excluded rather than scored as zero.
/// Output is sorted score-descending, ties broken by ascending document id.
pub fn retrieve(index: &InvertedIndex, query: &TermVector) -> Result<Vec<Retrieval>> {
    if index.state() != IndexState::Weighted {
        return Err(EngineError::InvalidState(
            "cannot retrieve before the index is built and weighted",
        ));
    }

    let mut weights: Vec<(&str, f64, f64)> = Vec::with_capacity(query.len());
    let mut query_length = 0.0f64;
    for (term, tf) in query.iter() {
        let idf = index.idf(term);
        let w = tf * idf;
        if w > 0.0 {
            query_length += w * w;
            weights.push((term, w, idf));
        }
    }
    let query_length = query_length.sqrt();
    if query_length == 0.0 {
        return Ok(Vec::new());
    }

    let mut dots: HashMap<DocId, f64> = HashMap::new();
    for (term, q_w, idf) in &weights {
        if let Some(postings) = index.postings(term) {
            for posting in postings {
                *dots.entry(posting.doc).or_insert(0.0) += q_w * posting.tf * idf;
            }
        }
    }

    let mut results: Vec<Retrieval> = dots
        .into_iter()
        .map(|(doc, dot)| {
            // Every candidate shares a positive-idf term with the query, so
            // its stored length is strictly positive.
            let score = dot / (query_length * index.doc_length(doc));
            let name = index
                .doc_meta(doc)
                .map(|m| m.name.clone())
                .unwrap_or_default();
            Retrieval { doc, name, score }
        })
        .collect();
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.doc.cmp(&b.doc))
    });
    Ok(results)
}
