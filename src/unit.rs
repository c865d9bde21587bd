//! A unit is `(UserSet, Matcher)`: an author allow-list paired with a term
//! dictionary. A pipeline run evaluates every message against every
//! configured unit independently.

use crate::matcher::Matcher;
use std::collections::HashSet;
use std::path::Path;

/// Author allow-list; membership test only.
pub struct UserSet(HashSet<String>);

impl UserSet {
    pub fn from_lines<I: IntoIterator<Item = String>>(lines: I) -> Self {
        UserSet(lines.into_iter().collect())
    }

    pub fn from_file(path: &Path) -> eyre::Result<Self> {
        Ok(UserSet::from_lines(crate::util::read_nonblank_lines(path)?))
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.0.contains(node_id)
    }
}

pub struct Unit {
    pub userset: UserSet,
    pub matcher: Matcher,
}

impl Unit {
    pub fn new(userset: UserSet, matcher: Matcher) -> Self {
        Unit { userset, matcher }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn userset_admits_known_author_and_drops_others() {
        let admitting = UserSet::from_lines(["14511951".to_string()]);
        let dropping = UserSet::from_lines(["1234".to_string()]);
        assert!(admitting.contains("14511951"));
        assert!(!dropping.contains("14511951"));
    }
}
