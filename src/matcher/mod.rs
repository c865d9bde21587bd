//! The matcher family: four implementations of the same `query(text) →
//! set<term>` contract. Aho-Corasick is the throughput-critical one; the
//! other three are benchmark baselines sharing its interface.
//!
//! The set of algorithms is closed at compile time, so dispatch is a plain
//! `enum` rather than a trait object — no virtual call overhead on the hot
//! path, and `UnknownAlgo` is a config-parsing concern (see
//! [`crate::config::TermsetAlgo`]), not a runtime one here.

mod naive_list;
mod naive_set;
mod trie;

use naive_list::NaiveListMatcher;
use naive_set::NaiveSetMatcher;
use std::collections::HashSet;
use trie::WordTrie;

/// Contract every matcher implements. `build()` is idempotent in result
/// but must be called before any `query()`; `add_term()` after `build()`
/// is a construction-order bug, not a recoverable error.
pub trait TermMatcher {
    fn add_term(&mut self, term: &str);
    fn build(&mut self);
    fn query(&self, text: &str) -> HashSet<String>;
}

pub struct TrieMatcher {
    trie: WordTrie,
    built: bool,
}

impl TrieMatcher {
    pub fn new() -> Self {
        TrieMatcher { trie: WordTrie::new(), built: false }
    }
}

impl Default for TrieMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TermMatcher for TrieMatcher {
    fn add_term(&mut self, term: &str) {
        debug_assert!(!self.built, "add_term called after build: construction-order bug");
        self.trie.add_term(term);
    }

    fn build(&mut self) {
        self.built = true;
    }

    fn query(&self, text: &str) -> HashSet<String> {
        debug_assert!(self.built, "query called before build: construction-order bug");
        let words = crate::tokenizer::tokenize(text);
        self.trie.query_trie(&words)
    }
}

pub struct AhoCorasickMatcher {
    trie: WordTrie,
    built: bool,
}

impl AhoCorasickMatcher {
    pub fn new() -> Self {
        AhoCorasickMatcher { trie: WordTrie::new(), built: false }
    }
}

impl Default for AhoCorasickMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TermMatcher for AhoCorasickMatcher {
    fn add_term(&mut self, term: &str) {
        debug_assert!(!self.built, "add_term called after build: construction-order bug");
        self.trie.add_term(term);
    }

    fn build(&mut self) {
        self.trie.compile_fail_links();
        self.built = true;
    }

    fn query(&self, text: &str) -> HashSet<String> {
        debug_assert!(self.built, "query called before build: construction-order bug");
        let words = crate::tokenizer::tokenize(text);
        self.trie.query_aho_corasick(&words)
    }
}

/// Sealed dispatch over the four matcher variants, selected by
/// [`crate::config::TermsetAlgo`] at pipeline construction time.
pub enum Matcher {
    NaiveList(NaiveListMatcher),
    NaiveSet(NaiveSetMatcher),
    Trie(TrieMatcher),
    AhoCorasick(AhoCorasickMatcher),
}

impl Matcher {
    pub fn new_naive_list() -> Self {
        Matcher::NaiveList(NaiveListMatcher::new())
    }

    pub fn new_naive_set() -> Self {
        Matcher::NaiveSet(NaiveSetMatcher::new())
    }

    pub fn new_trie() -> Self {
        Matcher::Trie(TrieMatcher::new())
    }

    pub fn new_aho_corasick() -> Self {
        Matcher::AhoCorasick(AhoCorasickMatcher::new())
    }

    pub fn add_term(&mut self, term: &str) {
        match self {
            Matcher::NaiveList(m) => m.add_term(term),
            Matcher::NaiveSet(m) => m.add_term(term),
            Matcher::Trie(m) => m.add_term(term),
            Matcher::AhoCorasick(m) => m.add_term(term),
        }
    }

    pub fn build(&mut self) {
        match self {
            Matcher::NaiveList(_) | Matcher::NaiveSet(_) => {}
            Matcher::Trie(m) => m.build(),
            Matcher::AhoCorasick(m) => m.build(),
        }
    }

    pub fn query(&self, text: &str) -> HashSet<String> {
        match self {
            Matcher::NaiveList(m) => m.query(text),
            Matcher::NaiveSet(m) => m.query(text),
            Matcher::Trie(m) => m.query(text),
            Matcher::AhoCorasick(m) => m.query(text),
        }
    }

    pub fn add_terms<I: IntoIterator<Item = S>, S: AsRef<str>>(&mut self, terms: I) -> &mut Self {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_algos() -> Vec<Matcher> {
        vec![
            Matcher::new_naive_list(),
            Matcher::new_naive_set(),
            Matcher::new_trie(),
            Matcher::new_aho_corasick(),
        ]
    }

    fn built_with(terms: &[&str]) -> Vec<Matcher> {
        all_algos()
            .into_iter()
            .map(|mut m| {
                m.add_terms(terms.iter().copied());
                m.build();
                m
            })
            .collect()
    }

    #[test]
    fn basic_match() {
        for m in built_with(&["reminder", "espn+"]) {
            let results = m.query(
                "@haarrrisson You're all set! We'll send you a reminder on 4/13 to stream #UFC236 LIVE on ESPN+ #ItsBoutTime",
            );
            assert_eq!(results, ["reminder", "espn+"].into_iter().map(String::from).collect());
        }
    }

    #[test]
    fn empty_termset_yields_empty_set() {
        for m in built_with(&[]) {
            for text in ["", " ", "hello"] {
                assert!(m.query(text).is_empty());
            }
        }
    }

    // "aa" never appears as a whole word even though it's a substring of "aaa"/"aaaa".
    #[test]
    fn worst_case_overlap() {
        for m in built_with(&["a", "aa", "aaa", "aaaa", "a aaa aaaa"]) {
            let results = m.query("a aaa aaaa");
            let expected: HashSet<String> =
                ["a", "aaa", "aaaa", "a aaa aaaa"].into_iter().map(String::from).collect();
            assert_eq!(results, expected);
        }
    }

    #[test]
    fn multi_phrase_overlap() {
        let terms = [
            "cell phones",
            "problematic cell phone",
            "tickets",
            "white sox",
            "red sox",
            "sox home opener",
            "home opener tickets",
        ];
        for m in built_with(&terms) {
            let results = m.query(
                "sox fan using a problematic cell phone to order home opener tickets for the red sox opener",
            );
            let expected: HashSet<String> = [
                "problematic cell phone",
                "tickets",
                "red sox",
                "home opener tickets",
            ]
            .into_iter()
            .map(String::from)
            .collect();
            assert_eq!(results, expected);
        }
    }

    #[test]
    fn query_results_are_always_a_subset_of_the_termset() {
        let terms = ["red sox", "tickets", "law"];
        for m in built_with(&terms) {
            let results = m.query("the red sox won tickets under new law today");
            for r in &results {
                assert!(terms.contains(&r.as_str()));
            }
        }
    }

    // For already-lowercased, whitespace-normalized terms, NaiveSet and
    // AhoCorasick agree on every text.
    #[test]
    fn naive_set_and_aho_corasick_agree() {
        let terms = ["red sox", "home opener tickets", "law", "lawmakers"];
        let text = "florida lawmakers passed a law about the red sox home opener tickets";
        let mut naive = Matcher::new_naive_set();
        naive.add_terms(terms.iter().copied());
        naive.build();
        let mut ac = Matcher::new_aho_corasick();
        ac.add_terms(terms.iter().copied());
        ac.build();
        assert_eq!(naive.query(text), ac.query(text));
    }

    #[test]
    fn query_is_idempotent_on_frozen_matcher() {
        for m in built_with(&["tickets", "law"]) {
            let text = "buy tickets before the new law passes";
            assert_eq!(m.query(text), m.query(text));
        }
    }

    #[test]
    fn a_superset_of_terms_never_reports_fewer_matches() {
        let small = built_with(&["law"]);
        let big = built_with(&["law", "lawmakers", "unrelated phrase"]);
        let text = "florida lawmakers wrote a new law";
        for (s, b) in small.into_iter().zip(big) {
            assert!(s.query(text).is_subset(&b.query(text)));
        }
    }

    #[test]
    fn aho_corasick_fail_graph_structural_invariants() {
        let mut ac = AhoCorasickMatcher::new();
        for term in ["cell phone", "phone booth", "booth"] {
            ac.add_term(term);
        }
        ac.build();
        let root = ac.trie.root_id();
        assert_eq!(ac.trie.fail_of(root), root);

        let phone = ac.trie.child(root, "phone");
        if let Some(phone) = phone {
            assert_ne!(ac.trie.fail_of(phone), phone);
            let fail = ac.trie.fail_of(phone);
            let fail_outputs = ac.trie.outputs_of(fail).clone();
            assert!(fail_outputs.is_subset(ac.trie.outputs_of(phone)));
        }
        assert!(ac.trie.node_count() > 1);
    }

    #[test]
    fn term_filter_fanout_returns_exactly_the_matched_terms() {
        let terms = ["florida lawmakers", "lawmakers", "law"];
        for m in built_with(&terms) {
            let results = m.query(
                "Florida lawmakers have introduced a law that requires physicians to obtain consent.",
            );
            let expected: HashSet<String> = terms.into_iter().map(String::from).collect();
            assert_eq!(results, expected);
        }
    }
}
