//! # Similarity Matcher
//!
//! File: cli/src/bot/similarity.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Scores a query against every knowledge base question with TF-IDF vectors
//! and cosine similarity.
//!
//! ## Architecture
//!
//! - `TfidfVectorizer`: learns a vocabulary and smoothed IDF weights from the
//!   knowledge questions, then maps token lists to L2-normalised vectors.
//!   IDF is `ln((1 + n) / (1 + df)) + 1` where `n` is the number of
//!   documents and `df` the number containing the term.
//! - `cosine_similarity`: dot product over the product of norms.
//! - `SimilarityMatcher`: normalises questions and queries with the same
//!   `Normalizer`, caches the question vectors and picks the best entry.
//!   A question made only of stopwords (e.g. "what do you do") is indexed
//!   on its plain tokens instead. Queries are never widened that way, so a
//!   stopword-only query scores zero against every question.
//!
//! The vectors are dense; the vocabulary is as small as the knowledge base.
//!
use crate::bot::knowledge::KnowledgeBase;
use crate::bot::normalize::{tokenize, Normalizer};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, trace};

/// Vocabulary plus IDF weights learned from a set of token lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learns the vocabulary (sorted, so column order is stable) and the
    /// smoothed IDF of every term.
    pub fn fit(documents: &[Vec<String>]) -> Self {
        let terms: std::collections::BTreeSet<&str> = documents
            .iter()
            .flat_map(|doc| doc.iter().map(String::as_str))
            .collect();
        let vocabulary: BTreeMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(column, term)| (term.to_string(), column))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for doc in documents {
            let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
            for term in unique {
                if let Some(&column) = vocabulary.get(term) {
                    document_frequency[column] += 1;
                }
            }
        }

        let n = documents.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Self { vocabulary, idf }
    }

    /// Term counts weighted by IDF, L2-normalised. Tokens outside the
    /// vocabulary are ignored; a vector with no known terms stays all zero.
    pub fn transform(&self, tokens: &[String]) -> Vec<f64> {
        let mut vector = vec![0.0; self.vocabulary.len()];
        for token in tokens {
            if let Some(&column) = self.vocabulary.get(token) {
                vector[column] += 1.0;
            }
        }
        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }
        let norm = l2_norm(&vector);
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    #[cfg(test)]
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&column| self.idf[column])
    }
}

/// Normalised tokens of a knowledge question, or its plain lowercase tokens
/// when normalising leaves nothing.
fn question_tokens(normalizer: &Normalizer, text: &str) -> Vec<String> {
    let tokens = normalizer.normalize(text);
    if tokens.is_empty() {
        trace!("Question '{}' is all stopwords, using plain tokens", text);
        tokenize(text)
    } else {
        tokens
    }
}

fn l2_norm(vector: &[f64]) -> f64 {
    vector.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Cosine of the angle between `a` and `b`; 0.0 if either is a zero vector.
/// Vectors of different lengths are compared over the shorter prefix.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    dot / (norm_a * norm_b)
}

/// Best-scoring knowledge entry for a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMatch {
    pub index: usize,
    pub score: f64,
}

pub struct SimilarityMatcher {
    normalizer: Normalizer,
    vectorizer: TfidfVectorizer,
    question_vectors: Vec<Vec<f64>>,
}

impl SimilarityMatcher {
    /// Vectorises every question of `knowledge`.
    pub fn new(knowledge: &KnowledgeBase) -> Self {
        let normalizer = Normalizer::new();
        let documents: Vec<Vec<String>> = knowledge
            .questions()
            .map(|question| question_tokens(&normalizer, question))
            .collect();
        let vectorizer = TfidfVectorizer::fit(&documents);
        let question_vectors = documents.iter().map(|doc| vectorizer.transform(doc)).collect();
        debug!(
            "Similarity index built: {} questions, {} terms",
            documents.len(),
            vectorizer.vocabulary_len()
        );
        Self {
            normalizer,
            vectorizer,
            question_vectors,
        }
    }

    /// Similarity of `query` to each question, in knowledge base order.
    /// A query that normalises to nothing scores 0.0 everywhere.
    pub fn scores(&self, query: &str) -> Vec<f64> {
        let tokens = self.normalizer.normalize(query);
        let query_vector = self.vectorizer.transform(&tokens);
        trace!("Query tokens {:?}", tokens);
        self.question_vectors
            .iter()
            .map(|question| cosine_similarity(&query_vector, question))
            .collect()
    }

    /// Highest scoring question; the earliest one on ties. `None` only when
    /// the knowledge base is empty.
    pub fn best_match(&self, query: &str) -> Option<ScoredMatch> {
        self.scores(query)
            .into_iter()
            .enumerate()
            .fold(None, |best: Option<ScoredMatch>, (index, score)| match best {
                Some(b) if b.score >= score => Some(b),
                _ => Some(ScoredMatch { index, score }),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|doc| doc.iter().map(|t| t.to_string()).collect())
            .collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_smoothed_idf() {
        let v = TfidfVectorizer::fit(&docs(&[&["a", "b"], &["a"], &["c"]]));
        // n = 3; df(a) = 2, df(b) = 1
        assert!(approx(v.idf("a").unwrap(), (4.0f64 / 3.0).ln() + 1.0));
        assert!(approx(v.idf("b").unwrap(), 2.0f64.ln() + 1.0));
        assert_eq!(v.idf("zzz"), None);
        assert_eq!(v.vocabulary_len(), 3);
    }

    #[test]
    fn test_transform_is_unit_length_and_ignores_unknown_terms() {
        let v = TfidfVectorizer::fit(&docs(&[&["a", "b"], &["c"]]));
        let vector = v.transform(&["a".to_string(), "a".to_string(), "zzz".to_string()]);
        assert!(approx(l2_norm(&vector), 1.0));

        let unknown = v.transform(&["zzz".to_string()]);
        assert!(unknown.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_cosine_similarity() {
        assert!(approx(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]), 1.0));
        assert!(approx(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0));
        assert!(approx(cosine_similarity(&[1.0, 1.0], &[1.0, 0.0]), 1.0 / 2.0f64.sqrt()));
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_exact_question_scores_one() {
        let matcher = SimilarityMatcher::new(&KnowledgeBase::defaults());
        let best = matcher.best_match("services").unwrap();
        assert_eq!(best.index, 4);
        assert!(approx(best.score, 1.0));
    }

    #[test]
    fn test_located_and_location_tie_goes_to_first() {
        // Both stem to "locat", so they score the same.
        let matcher = SimilarityMatcher::new(&KnowledgeBase::defaults());
        let best = matcher.best_match("office location").unwrap();
        assert_eq!(best.index, 1);
        assert!(best.score > 0.5);
    }

    #[test]
    fn test_stopword_question_indexed_on_plain_tokens() {
        let kb = KnowledgeBase::defaults();
        let normalizer = Normalizer::new();
        assert_eq!(
            question_tokens(&normalizer, &kb.entries()[3].question),
            vec!["what", "do", "you", "do"]
        );
        assert_eq!(question_tokens(&normalizer, "services"), vec!["servic"]);
    }

    #[test]
    fn test_stopword_only_query_scores_zero() {
        let matcher = SimilarityMatcher::new(&KnowledgeBase::defaults());
        for query in ["What do you do?", "Can you do it?", "do you?"] {
            let scores = matcher.scores(query);
            assert!(scores.iter().all(|s| *s == 0.0), "{query}: {scores:?}");
        }
    }

    #[test]
    fn test_content_words_do_not_fall_back_to_plain_tokens() {
        let matcher = SimilarityMatcher::new(&KnowledgeBase::defaults());
        // "think" survives normalisation, so "what"/"do"/"you" are dropped.
        let scores = matcher.scores("what do you think");
        assert!(scores.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_unrelated_query_scores_zero() {
        let matcher = SimilarityMatcher::new(&KnowledgeBase::defaults());
        let best = matcher.best_match("tell me a joke").unwrap();
        assert_eq!(best.index, 0);
        assert_eq!(best.score, 0.0);
    }

    #[test]
    fn test_empty_knowledge_base() {
        let matcher = SimilarityMatcher::new(&KnowledgeBase::new());
        assert!(matcher.best_match("hours").is_none());
        assert!(matcher.scores("hours").is_empty());
    }
}
