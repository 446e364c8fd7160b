use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Sparse term vector: raw counts during indexing, weights at query time.
///
/// Invariant: no stored entry is <= 0. Updates that drive an entry to zero or
/// below remove it instead of persisting it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    entries: HashMap<String, f64>,
}

impl TermVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, term: &str) -> f64 {
        self.entries.get(term).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(t, &v)| (t.as_str(), v))
    }

    pub fn increment(&mut self, term: &str) {
        *self.entries.entry(term.to_string()).or_insert(0.0) += 1.0;
    }

    pub fn set(&mut self, term: &str, value: f64) {
        if value > 0.0 {
            self.entries.insert(term.to_string(), value);
        } else {
            self.entries.remove(term);
        }
    }

    /// Add `factor * other` into this vector. A negative `factor` subtracts;
    /// entries clamped to <= 0 are removed, not stored.
    pub fn add_scaled(&mut self, other: &TermVector, factor: f64) {
        for (term, value) in other.iter() {
            let updated = self.get(term) + factor * value;
            self.set(term, updated);
        }
    }

    /// Merge this vector's counts into a running aggregate. Addition is
    /// commutative and associative, so the aggregate is independent of
    /// document processing order.
    pub fn merge_into(&self, aggregate: &mut TermVector) {
        aggregate.add_scaled(self, 1.0);
    }

    /// Euclidean norm of the vector.
    pub fn length(&self) -> f64 {
        self.entries
            .values()
            .map(|v| v * v)
            .sum::<f64>()
            .sqrt()
    }
}

/// Term key for two adjacent tokens. Order is significant:
/// "war crimes" and "crimes war" are distinct terms.
pub fn bigram_key(first: &str, second: &str) -> String {
    format!("{first} {second}")
}

/// Turns a token sequence into the term vector a document or query is
/// represented by. The engine is parameterized over this seam instead of
/// subclassing an index per term shape.
pub trait TermExtractor {
    fn extract(&self, tokens: &[String]) -> TermVector;
}

pub struct Unigrams;

impl TermExtractor for Unigrams {
    fn extract(&self, tokens: &[String]) -> TermVector {
        let mut vector = TermVector::new();
        for token in tokens {
            vector.increment(token);
        }
        vector
    }
}

/// Adjacent-pair extractor, optionally restricted to a frozen vocabulary.
pub struct Bigrams<'a> {
    vocab: Option<&'a HashSet<String>>,
}

impl<'a> Bigrams<'a> {
    pub fn all() -> Bigrams<'static> {
        Bigrams { vocab: None }
    }

    pub fn restricted(vocab: &'a HashSet<String>) -> Self {
        Bigrams { vocab: Some(vocab) }
    }
}

impl TermExtractor for Bigrams<'_> {
    fn extract(&self, tokens: &[String]) -> TermVector {
        let mut vector = TermVector::new();
        for pair in tokens.windows(2) {
            let key = bigram_key(&pair[0], &pair[1]);
            if self.vocab.map_or(true, |v| v.contains(&key)) {
                vector.increment(&key);
            }
        }
        vector
    }
}

/// Select the `k` highest-count bigrams from a corpus aggregate.
///
/// Ties break on the bigram string itself so two runs over the same corpus
/// freeze the identical vocabulary regardless of document order. Fewer than
/// `k` distinct bigrams selects them all.
pub fn select_top(aggregate: &TermVector, k: usize) -> HashSet<String> {
    let mut pairs: Vec<(&str, f64)> = aggregate.iter().collect();
    pairs.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    pairs
        .into_iter()
        .take(k)
        .map(|(term, _)| term.to_string())
        .collect()
}
