use crate::error::Result;
use crate::index::{DocId, InvertedIndex};
use crate::vector::TermVector;

/// Ide-regular additive relevance feedback.
///
/// The updated query is `alpha * q + beta * sum(relevant docs) -
/// gamma * sum(non-relevant docs)` over raw term vectors; negative term
/// weights are clamped out, since they are meaningless for cosine scoring.
/// The constants are tunables, not fixed law; 1.0 across the board is the
/// Ide-regular choice and makes the zero-judgment round an exact identity.
#[derive(Debug, Clone, Copy)]
pub struct Feedback {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Default for Feedback {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
            gamma: 1.0,
        }
    }
}

impl Feedback {
    /// Produce the adjusted query vector for one feedback round. Each round
    /// is stateless beyond the query vector passed in; the caller re-runs
    /// retrieval with the result.
    pub fn apply(
        &self,
        index: &InvertedIndex,
        query: &TermVector,
        relevant: &[DocId],
        nonrelevant: &[DocId],
    ) -> Result<TermVector> {
        let mut updated = TermVector::new();
        updated.add_scaled(query, self.alpha);
        for &doc in relevant {
            updated.add_scaled(index.doc_vector(doc)?, self.beta);
        }
        for &doc in nonrelevant {
            updated.add_scaled(index.doc_vector(doc)?, -self.gamma);
        }
        Ok(updated)
    }
}
