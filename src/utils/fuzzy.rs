//! Fuzzy matching utilities for search
//!
//! Jaro-Winkler similarity tuned for artist, album and song names, plus
//! ranking helpers used by library searches.
//!
//! Both inputs are lowercased and NFD-decomposed before comparison. Combining
//! marks are not stripped, so "beyoncé" and "beyonce" still differ by one
//! character.

use super::name_key::key_for;
use unicode_normalization::UnicodeNormalization;

/// Upper bound of the per-character prefix bonus
const SCALING_FACTOR: f64 = 0.1;

/// Jaro scores below this get no prefix bonus
const WINKLER_THRESHOLD: f64 = 0.7;

/// Result of a fuzzy match with the matched value and score
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    pub value: String,
    pub score: f64,
}

/// Counts gathered while matching two prepared strings
#[derive(Debug, Clone, Copy, PartialEq)]
struct MatchStats {
    matches: usize,
    transpositions: usize,
    prefix: usize,
    longer_len: usize,
}

impl MatchStats {
    fn jaro(&self, first_len: usize, second_len: usize) -> f64 {
        let m = self.matches as f64;
        (m / first_len as f64 + m / second_len as f64 + (m - self.transpositions as f64) / m) / 3.0
    }
}

fn prepare(text: &str) -> Vec<char> {
    text.to_lowercase().nfd().collect()
}

/// For each char of `shorter`, the position in `longer` it matched, if any.
///
/// Each position of `longer` is consumed at most once.
fn match_window_indexes(longer: &[char], shorter: &[char]) -> Vec<Option<usize>> {
    let range = (longer.len() / 2).saturating_sub(1);
    let mut consumed = vec![false; longer.len()];
    let mut indexes = vec![None; shorter.len()];

    for (i, &c) in shorter.iter().enumerate() {
        let start = i.saturating_sub(range);
        let end = (i + range + 1).min(longer.len());

        for j in start..end {
            if !consumed[j] && longer[j] == c {
                consumed[j] = true;
                indexes[i] = Some(j);
                break;
            }
        }
    }

    indexes
}

/// Which positions of the longer string were matched.
fn matched_flags(longer_len: usize, indexes: &[Option<usize>]) -> Vec<bool> {
    let mut flags = vec![false; longer_len];
    for j in indexes.iter().flatten() {
        flags[*j] = true;
    }
    flags
}

fn chars_at_indexes(source: &[char], indexes: &[Option<usize>]) -> Vec<char> {
    source
        .iter()
        .zip(indexes)
        .filter(|(_, idx)| idx.is_some())
        .map(|(c, _)| *c)
        .collect()
}

fn chars_at_flags(source: &[char], flags: &[bool]) -> Vec<char> {
    source
        .iter()
        .zip(flags)
        .filter(|(_, flag)| **flag)
        .map(|(c, _)| *c)
        .collect()
}

fn matching_prefix(first: &[char], second: &[char]) -> usize {
    first
        .iter()
        .zip(second)
        .take_while(|(a, b)| a == b)
        .count()
}

/// Returns None when the strings share no characters within the match window.
fn match_stats(first: &[char], second: &[char]) -> Option<MatchStats> {
    let (longer, shorter) = if first.len() > second.len() {
        (first, second)
    } else {
        (second, first)
    };

    let indexes = match_window_indexes(longer, shorter);
    let flags = matched_flags(longer.len(), &indexes);

    let matched_shorter = chars_at_indexes(shorter, &indexes);
    let matched_longer = chars_at_flags(longer, &flags);
    if matched_shorter.is_empty() {
        return None;
    }

    let mismatches = matched_shorter
        .iter()
        .zip(&matched_longer)
        .filter(|(a, b)| a != b)
        .count();

    Some(MatchStats {
        matches: matched_shorter.len(),
        transpositions: mismatches / 2,
        prefix: matching_prefix(first, second),
        longer_len: longer.len(),
    })
}

/// Unrounded Jaro similarity of the prepared strings, without the prefix bonus.
pub fn jaro(first: &str, second: &str) -> f64 {
    if first.is_empty() || second.is_empty() {
        return 0.0;
    }
    let first = prepare(first);
    let second = prepare(second);

    match match_stats(&first, &second) {
        Some(stats) => stats.jaro(first.len(), second.len()),
        None => 0.0,
    }
}

/// Jaro-Winkler similarity between two strings, rounded to two decimals.
///
/// Returns 0.0 if either string is empty. The common prefix is not capped at
/// four characters; its weight is at most `1 / longer length`, which keeps the
/// bonus within `1 - jaro`.
pub fn similarity(first: &str, second: &str) -> f64 {
    if first.is_empty() || second.is_empty() {
        return 0.0;
    }
    let first = prepare(first);
    let second = prepare(second);

    let Some(stats) = match_stats(&first, &second) else {
        return 0.0;
    };

    let jaro = stats.jaro(first.len(), second.len());
    let score = if jaro < WINKLER_THRESHOLD {
        jaro
    } else {
        let weight = SCALING_FACTOR.min(1.0 / stats.longer_len as f64);
        jaro + weight * stats.prefix as f64 * (1.0 - jaro)
    };

    (score * 100.0).round() / 100.0
}

/// Split on every single whitespace char, dropping trailing empty pieces.
///
/// A leading separator still yields an empty first piece, so " Radiohead"
/// splits into `["", "Radiohead"]`.
fn split_words(text: &str) -> Vec<&str> {
    let mut words: Vec<&str> = text
        .split(|c: char| c.is_ascii_whitespace() || c == '\u{0B}')
        .collect();
    while words.last().is_some_and(|w| w.is_empty()) {
        words.pop();
    }
    words
}

/// Best similarity between `second` and either `first` or one of its words.
///
/// Lets "Stones" match "The Rolling Stones" strongly. The whole-string score
/// is always considered too.
pub fn adjusted_similarity(first: Option<&str>, second: Option<&str>) -> f64 {
    let (Some(first), Some(second)) = (first, second) else {
        return 0.0;
    };
    if first.is_empty() || second.is_empty() {
        return 0.0;
    }

    let words = split_words(first);
    if words.len() > 1 {
        let best_word = words
            .iter()
            .map(|word| similarity(word, second))
            .fold(0.0, f64::max);
        best_word.max(similarity(first, second))
    } else {
        similarity(first, second)
    }
}

/// True if `haystack` contains `needle`, ignoring case.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Find matches in a list of candidates
///
/// Candidates with the same name key as `search_term` score 1.0 and come
/// first. The rest are scored with [`adjusted_similarity`]. Returns up to `n`
/// matches scoring at least `cutoff`, best first.
pub fn find_matches(
    search_term: &str,
    candidates: &[String],
    n: usize,
    cutoff: f64,
) -> Vec<FuzzyMatch> {
    let search_key = key_for(Some(search_term));

    let mut matches: Vec<FuzzyMatch> = Vec::new();

    // 1. Same key ("The Beatles" vs "beatles")
    if !search_key.is_empty() {
        for candidate in candidates {
            if key_for(Some(candidate)) == search_key {
                matches.push(FuzzyMatch {
                    value: candidate.clone(),
                    score: 1.0,
                });
            }
        }
    }

    // 2. Fuzzy
    for candidate in candidates {
        if matches.iter().any(|m| m.value == *candidate) {
            continue;
        }

        let score = adjusted_similarity(Some(candidate), Some(search_term));
        if score >= cutoff {
            matches.push(FuzzyMatch {
                value: candidate.clone(),
                score,
            });
        }
    }

    // 3. Best first, stable for ties
    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    matches.truncate(n);

    matches
}

/// Find the best match above a minimum score
///
/// Returns None if no match meets the cutoff
pub fn find_best_match(
    search_term: &str,
    candidates: &[String],
    cutoff: f64,
) -> Option<FuzzyMatch> {
    find_matches(search_term, candidates, 1, cutoff)
        .into_iter()
        .next()
}
