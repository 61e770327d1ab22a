//! Utility modules

pub mod fuzzy;
pub mod name_key;
pub mod numbers;

pub use fuzzy::{
    adjusted_similarity, contains_ignore_case, find_best_match, find_matches, jaro, similarity,
    FuzzyMatch,
};
pub use name_key::key_for;
pub use numbers::{parse_int, PARSE_FAILED};
