use crate::params::SearchParams;

/// Filler words that carry no search signal.
const STOP_WORDS: [&str; 15] = [
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "find", "show", "get",
    "all",
];

const MAX_TERMS: usize = 5;

/// Keyword-only search parameters derived from the prompt alone.
///
/// This is the degraded path taken whenever AI interpretation fails. Pure
/// function, no network, cannot fail: lowercase the prompt, drop stop words
/// and tokens of two characters or fewer, keep the first five survivors in
/// their original order.
pub fn fallback_params(prompt: &str) -> SearchParams {
    let lowered = prompt.to_lowercase();
    let search_terms = lowered
        .split_whitespace()
        .filter(|w| w.len() > 2 && !STOP_WORDS.contains(w))
        .take(MAX_TERMS)
        .map(str::to_string)
        .collect();

    SearchParams {
        search_terms,
        ..SearchParams::default()
    }
}
