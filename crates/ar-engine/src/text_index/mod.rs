pub mod stopwords;
pub mod tokenizer;

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::Assessment;

/// Terms present in more than this share of documents are dropped from
/// the vocabulary.
const MAX_DOC_FREQ_RATIO: f64 = 0.9;

/// Searchable document for one assessment: name, description, type and
/// category joined with single spaces, absent fields skipped.
pub fn document(assessment: &Assessment) -> String {
    [
        assessment.name.as_str(),
        assessment.description.as_deref().unwrap_or(""),
        assessment.assessment_type.as_deref().unwrap_or(""),
        assessment.category.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" ")
    .trim()
    .to_string()
}

/// IDF-weighted term-vector space over the catalogue documents. Built
/// once at engine construction, read-only afterwards; rebuilt only by
/// constructing a new engine. Never persisted apart from the catalogue
/// it was fit on.
#[derive(Debug, Clone, Default)]
pub struct TextIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    doc_vectors: Vec<Vec<(usize, f64)>>,
}

impl TextIndex {
    /// Fit the vector space over `documents`. An empty corpus leaves the
    /// index unbuilt; queries against it degrade to empty results.
    pub fn build(documents: &[String]) -> Self {
        if documents.is_empty() {
            return Self::default();
        }

        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenizer::terms(d)).collect();

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for terms in &tokenized {
            let unique: HashSet<&str> = terms.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let total_docs = documents.len();
        let cutoff = MAX_DOC_FREQ_RATIO * total_docs as f64;
        let mut kept: Vec<(&str, usize)> = doc_freq
            .iter()
            .filter(|(_, &freq)| freq as f64 <= cutoff)
            .map(|(term, &freq)| (*term, freq))
            .collect();
        // Sorted vocabulary keeps term ids independent of hash order.
        kept.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut vocabulary = HashMap::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (term_id, (term, freq)) in kept.iter().enumerate() {
            vocabulary.insert((*term).to_string(), term_id);
            idf.push(((1 + total_docs) as f64 / (1 + freq) as f64).ln() + 1.0);
        }

        let doc_vectors = tokenized
            .iter()
            .map(|terms| vectorize(terms, &vocabulary, &idf))
            .collect();

        debug!(
            documents = total_docs,
            terms = vocabulary.len(),
            "text index built"
        );

        Self {
            vocabulary,
            idf,
            doc_vectors,
        }
    }

    pub fn is_built(&self) -> bool {
        !self.doc_vectors.is_empty()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Cosine similarity of `text` against every indexed document, in
    /// document order, each value in [0, 1]. Empty or whitespace-only
    /// text and an unbuilt index yield an empty vector, never an error;
    /// out-of-vocabulary query terms are dropped.
    pub fn similarities(&self, text: &str) -> Vec<f64> {
        if text.trim().is_empty() || !self.is_built() {
            return Vec::new();
        }

        let query = vectorize(&tokenizer::terms(text), &self.vocabulary, &self.idf);
        self.doc_vectors
            .iter()
            .map(|doc| sparse_dot(&query, doc))
            .collect()
    }
}

/// TF x IDF over the vocabulary, L2-normalised, sorted by term id.
fn vectorize(
    terms: &[String],
    vocabulary: &HashMap<String, usize>,
    idf: &[f64],
) -> Vec<(usize, f64)> {
    let mut counts: HashMap<usize, f64> = HashMap::new();
    for term in terms {
        if let Some(&term_id) = vocabulary.get(term.as_str()) {
            *counts.entry(term_id).or_insert(0.0) += 1.0;
        }
    }

    let mut vector: Vec<(usize, f64)> = counts
        .into_iter()
        .map(|(term_id, tf)| (term_id, tf * idf[term_id]))
        .collect();
    vector.sort_unstable_by_key(|&(term_id, _)| term_id);

    let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, weight) in &mut vector {
            *weight /= norm;
        }
    }
    vector
}

/// Dot product of two sorted sparse vectors. Both sides are
/// L2-normalised with non-negative weights, so the result is cosine
/// similarity in [0, 1].
fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let mut dot = 0.0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot.clamp(0.0, 1.0)
}
