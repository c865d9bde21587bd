//! Word tokenization: the atomic unit every matcher operates on is the
//! lowercase whitespace-delimited token, never a character.

/// Breaks a string into lowercase, whitespace-delimited word tokens.
///
/// Punctuation is retained verbatim (`espn+`, `#ufc236`, `https://...`) —
/// this is whitespace splitting, not word-boundary segmentation.
pub fn tokenize(text: &str) -> Vec<String> {
    text.trim().to_lowercase().split_whitespace().map(str::to_owned).collect()
}

/// Produces every contiguous word n-gram of length `1..=max_len`, space
/// joined, ordered by (length, start position) — the same enumeration
/// order as `nltk.util.everygrams`.
pub fn ngrams(text: &str, max_len: usize) -> Vec<String> {
    let words = tokenize(text);
    let mut out = Vec::new();
    for len in 1..=max_len.max(1) {
        if len > words.len() {
            break;
        }
        for start in 0..=(words.len() - len) {
            out.push(words[start..start + len].join(" "));
        }
    }
    out
}
