//! Benchmark baseline: a flat list of terms, queried by intersecting an
//! n-gram stream of the text against the list. O(q·m) per query.

use crate::tokenizer;

pub struct NaiveListMatcher {
    terms: Vec<String>,
    max_len: usize,
}

impl NaiveListMatcher {
    pub(super) fn new() -> Self {
        NaiveListMatcher { terms: Vec::new(), max_len: 3 }
    }

    pub(super) fn add_term(&mut self, term: &str) {
        let len = tokenizer::tokenize(term).len().max(1);
        self.max_len = self.max_len.max(len);
        self.terms.push(term.to_string());
    }

    pub(super) fn query(&self, text: &str) -> std::collections::HashSet<String> {
        let grams = tokenizer::ngrams(text, self.max_len);
        let mut results = std::collections::HashSet::new();
        for gram in &grams {
            if self.terms.iter().any(|t| t == gram) {
                results.insert(gram.clone());
            }
        }
        results
    }
}
