//! Songkey Library
//!
//! Name keys, fuzzy matching, labels and voice search for music libraries.

pub mod config;
pub mod error;
pub mod labels;
pub mod library;
pub mod utils;
pub mod voice_search;
