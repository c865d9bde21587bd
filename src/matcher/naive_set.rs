//! Benchmark baseline: same occurrence predicate as the naive list, but
//! backed by a hash set so `query` is a set intersection. O(q) per query.

use crate::tokenizer;
use std::collections::HashSet;

pub struct NaiveSetMatcher {
    terms: HashSet<String>,
    max_len: usize,
}

impl NaiveSetMatcher {
    pub(super) fn new() -> Self {
        NaiveSetMatcher { terms: HashSet::new(), max_len: 3 }
    }

    pub(super) fn add_term(&mut self, term: &str) {
        let len = tokenizer::tokenize(term).len().max(1);
        self.max_len = self.max_len.max(len);
        self.terms.insert(term.to_string());
    }

    pub(super) fn query(&self, text: &str) -> HashSet<String> {
        let grams: HashSet<String> = tokenizer::ngrams(text, self.max_len).into_iter().collect();
        grams.intersection(&self.terms).cloned().collect()
    }
}
