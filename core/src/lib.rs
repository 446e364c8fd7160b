//! Single-node vector-space retrieval engine.
//!
//! Builds a TF-IDF inverted index over unigram and frequent-bigram terms
//! with a two-pass protocol, ranks documents by cosine similarity, and
//! supports Ide-style relevance feedback. The index is single-use: built
//! once, weighted once, read-only afterwards.

pub mod error;
pub mod feedback;
pub mod index;
pub mod retrieval;
pub mod source;
pub mod tokenizer;
pub mod vector;

pub use error::{EngineError, Result};
pub use feedback::Feedback;
pub use index::{DocId, DocMeta, IndexState, InvertedIndex, Posting, DEFAULT_MAX_PHRASES};
pub use retrieval::{build_query_vector, retrieve, QueryMode, Retrieval};
pub use source::{Document, DocumentSource, MemoryCorpus};
pub use tokenizer::Analyzer;
pub use vector::{bigram_key, select_top, Bigrams, TermExtractor, TermVector, Unigrams};
