//! Shared arena-backed node store for the word-trie and Aho-Corasick
//! matchers. Parent nodes own children exclusively; `fail` is a
//! back-reference expressed as an index into the same arena, never an
//! owning pointer, so there is no cyclic ownership to unwind.

use std::collections::{HashMap, HashSet, VecDeque};

const ROOT: usize = 0;

pub(super) struct Node {
    children: HashMap<String, usize>,
    outputs: HashSet<String>,
    fail: usize,
}

impl Node {
    fn new() -> Self {
        Node { children: HashMap::new(), outputs: HashSet::new(), fail: ROOT }
    }
}

/// A trie over word tokens, optionally augmented with Aho-Corasick fail
/// links. `add_term` always just builds the trie; `compile_fail_links`
/// performs the BFS pass that the Aho-Corasick matcher needs and the plain
/// trie matcher does not.
pub(super) struct WordTrie {
    nodes: Vec<Node>,
}

impl WordTrie {
    pub(super) fn new() -> Self {
        WordTrie { nodes: vec![Node::new()] }
    }

    pub(super) fn add_term(&mut self, term: &str) {
        let mut node = ROOT;
        for word in crate::tokenizer::tokenize(term) {
            node = match self.nodes[node].children.get(&word) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::new());
                    self.nodes[node].children.insert(word, child);
                    child
                }
            };
        }
        self.nodes[node].outputs.insert(term.to_string());
    }

    /// Fills `fail` links and hoists outputs along them, per the
    /// Aho-Corasick build algorithm: root's children fail to root, then a
    /// breadth-first pass computes every other node's fail edge as the
    /// longest proper suffix reachable through its parent's fail chain.
    pub(super) fn compile_fail_links(&mut self) {
        self.nodes[ROOT].fail = ROOT;

        let mut queue = VecDeque::new();
        let root_children: Vec<(String, usize)> = self.nodes[ROOT]
            .children
            .iter()
            .map(|(w, &c)| (w.clone(), c))
            .collect();
        for (_, child) in &root_children {
            self.nodes[*child].fail = ROOT;
            queue.push_back(*child);
        }

        while let Some(node) = queue.pop_front() {
            let children: Vec<(String, usize)> =
                self.nodes[node].children.iter().map(|(w, &c)| (w.clone(), c)).collect();
            for (word, child) in children {
                let node_fail = self.nodes[node].fail;
                let fail = self.nodes[node_fail]
                    .children
                    .get(&word)
                    .copied()
                    .or_else(|| self.nodes[ROOT].children.get(&word).copied())
                    .unwrap_or(ROOT);
                self.nodes[child].fail = fail;
                let hoisted: Vec<String> = self.nodes[fail].outputs.iter().cloned().collect();
                self.nodes[child].outputs.extend(hoisted);
                queue.push_back(child);
            }
        }
    }

    /// Word-trie query: for every start index, descend as far as tokens
    /// match, collecting outputs at every visited node. No fail links are
    /// followed — a mismatch simply ends that start index.
    pub(super) fn query_trie(&self, words: &[String]) -> HashSet<String> {
        let mut results = HashSet::new();
        for start in 0..words.len() {
            let mut node = ROOT;
            for word in &words[start..] {
                match self.nodes[node].children.get(word) {
                    Some(&child) => {
                        node = child;
                        results.extend(self.nodes[node].outputs.iter().cloned());
                    }
                    None => break,
                }
            }
        }
        results
    }

    /// Aho-Corasick query: a single O(|words|) pass, one fail-transition
    /// per token when no direct edge exists, never more.
    pub(super) fn query_aho_corasick(&self, words: &[String]) -> HashSet<String> {
        let mut results = HashSet::new();
        let mut node = ROOT;
        for word in words {
            node = self.nodes[node]
                .children
                .get(word)
                .copied()
                .or_else(|| self.nodes[self.nodes[node].fail].children.get(word).copied())
                .unwrap_or(ROOT);
            results.extend(self.nodes[node].outputs.iter().cloned());
        }
        results
    }

    #[cfg(test)]
    pub(super) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub(super) fn fail_of(&self, id: usize) -> usize {
        self.nodes[id].fail
    }

    #[cfg(test)]
    pub(super) fn outputs_of(&self, id: usize) -> &HashSet<String> {
        &self.nodes[id].outputs
    }

    #[cfg(test)]
    pub(super) fn root_id(&self) -> usize {
        ROOT
    }

    #[cfg(test)]
    pub(super) fn child(&self, id: usize, word: &str) -> Option<usize> {
        self.nodes[id].children.get(word).copied()
    }
}
