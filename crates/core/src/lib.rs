//! Anaphones: words whose pronunciations are anagrams of each other.
//!
//! A pronunciation dictionary is normalized into phoneme sequences, indexed
//! by sorted phoneme multiset, and published as three views: all anaphone
//! groups, groups with homophones collapsed, and groups restricted to words
//! with a genuinely different-sounding partner.

pub mod anagram;
pub mod dictionary;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod types;

pub use anagram::NormalizeConfig;
pub use dictionary::{DictFormat, PronunciationDict};
pub use error::{DictionaryError, SkipReason};
pub use output::OutputLayout;
pub use pipeline::{run, AnaphoneViews, ViewCounts};
pub use types::{AnaphoneGroup, CanonicalKey, Notation, PronunciationEntry, Transcription};
