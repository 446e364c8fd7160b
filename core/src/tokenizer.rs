use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// Normalizes raw text into the token stream the engine indexes and queries with.
///
/// The same analyzer must be applied to every document on both indexing passes
/// and to every query, otherwise term identities diverge. No stopword removal:
/// closed-class words are legitimate members of phrase terms ("the cat").
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    pub stem: bool,
}

impl Analyzer {
    pub fn new(stem: bool) -> Self {
        Self { stem }
    }

    /// Tokenize with NFKC normalization and lowercasing, stemming if enabled.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        RE.find_iter(&normalized)
            .map(|mat| {
                let token = mat.as_str();
                if self.stem {
                    STEMMER.stem(token).to_string()
                } else {
                    token.to_string()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unstemmed_keeps_inflections() {
        let t = Analyzer::new(false).tokenize("Running, runner's run!");
        assert_eq!(t, vec!["running", "runner's", "run"]);
    }

    #[test]
    fn stemmed_collapses_inflections() {
        let t = Analyzer::new(true).tokenize("Running runners run");
        assert!(t.iter().all(|w| w.starts_with("run")));
        assert!(t.contains(&"run".to_string()));
    }

    #[test]
    fn keeps_closed_class_words() {
        let t = Analyzer::new(false).tokenize("The cat and the dog");
        assert_eq!(t, vec!["the", "cat", "and", "the", "dog"]);
    }
}
