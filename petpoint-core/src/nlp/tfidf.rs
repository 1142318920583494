//! TF-IDF vectors and cosine similarity over a fixed corpus

use super::text::tokenize;
use std::collections::HashMap;

/// Sparse L2-normalised vector as `(term index, weight)` pairs
type SparseVector = Vec<(usize, f64)>;

/// Term-weighted index over a corpus of cleaned documents.
///
/// Weights are raw term counts scaled by a smoothed inverse document
/// frequency, `ln((1 + n) / (1 + df)) + 1`, and every row is L2-normalised so
/// a dot product is the cosine similarity.
#[derive(Debug, Clone, Default)]
pub struct TfidfIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVector>,
}

impl TfidfIndex {
    /// Build an index from already-cleaned documents
    pub fn build<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut counts: Vec<HashMap<usize, usize>> = Vec::new();

        for document in documents {
            let mut row: HashMap<usize, usize> = HashMap::new();
            for token in tokenize(document.as_ref()) {
                let next = vocabulary.len();
                let term = *vocabulary.entry(token.to_string()).or_insert(next);
                *row.entry(term).or_insert(0) += 1;
            }
            counts.push(row);
        }

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for row in &counts {
            for term in row.keys() {
                document_frequency[*term] += 1;
            }
        }

        let n = counts.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|df| ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .iter()
            .map(|row| weigh(row.iter().map(|(term, count)| (*term, *count)), &idf))
            .collect();

        Self {
            vocabulary,
            idf,
            rows,
        }
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Cosine similarity of `text` against every document, in corpus order.
    /// Terms unseen at build time are ignored.
    pub fn similarities(&self, text: &str) -> Vec<f64> {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for token in tokenize(text) {
            if let Some(term) = self.vocabulary.get(token) {
                *counts.entry(*term).or_insert(0) += 1;
            }
        }
        let query: HashMap<usize, f64> = weigh(counts.into_iter(), &self.idf)
            .into_iter()
            .collect();

        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .filter_map(|(term, weight)| query.get(term).map(|q| q * weight))
                    .sum()
            })
            .collect()
    }

    /// Index and score of the most similar document; the first one wins ties.
    /// `None` only for an empty index.
    pub fn best_match(&self, text: &str) -> Option<(usize, f64)> {
        self.similarities(text)
            .into_iter()
            .enumerate()
            .fold(None, |best, (idx, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((idx, score)),
            })
    }
}

fn weigh(counts: impl Iterator<Item = (usize, usize)>, idf: &[f64]) -> SparseVector {
    let mut vector: SparseVector = counts
        .map(|(term, count)| (term, count as f64 * idf[term]))
        .collect();
    let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, weight) in &mut vector {
            *weight /= norm;
        }
    }
    vector.sort_by_key(|(term, _)| *term);
    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> TfidfIndex {
        TfidfIndex::build([
            "halo selamat pagi",
            "kucing saya tidak mau makan",
            "berapa harga vaksin anjing",
        ])
    }

    #[test]
    fn test_identical_document_scores_one() {
        let index = corpus();
        let (idx, score) = index.best_match("kucing saya tidak mau makan").unwrap();
        assert_eq!(idx, 1);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_overlap_ranks_best_document() {
        let index = corpus();
        let (idx, score) = index.best_match("harga vaksin kucing").unwrap();
        assert_eq!(idx, 2);
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn test_unknown_terms_score_zero() {
        let index = corpus();
        let scores = index.similarities("zebra jerapah");
        assert_eq!(scores, vec![0.0, 0.0, 0.0]);
        assert_eq!(index.best_match("zebra jerapah"), Some((0, 0.0)));
    }

    #[test]
    fn test_empty_index() {
        let index = TfidfIndex::build(Vec::<String>::new());
        assert!(index.is_empty());
        assert!(index.best_match("halo").is_none());
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        let index = TfidfIndex::build(["kucing makan", "kucing tidur", "kucing main"]);
        assert_eq!(index.vocabulary_size(), 4);
        // "makan" is rarer than "kucing", so the first row wins clearly
        let scores = index.similarities("makan");
        assert!(scores[0] > 0.8);
        assert_eq!(scores[1], 0.0);
    }
}
