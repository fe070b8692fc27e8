//! Error types for dictionary loading and per-entry rejection.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Fatal errors that abort a run before any output is produced.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in dictionary")]
    Json(#[from] serde_json::Error),

    #[error("language '{requested}' not found in dictionary (available: {available})")]
    MissingLanguage { requested: String, available: String },

    #[error("dictionary contains several languages ({0}); pick one with --language")]
    AmbiguousLanguage(String),

    #[error("unexpected dictionary structure: {0}")]
    InvalidShape(String),

    #[error("unknown dictionary format '{0}' (expected ipa-dict or cmudict)")]
    UnknownFormat(String),
}

/// Why a single dictionary entry was skipped. Never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    #[error("word is empty")]
    EmptyWord,
    #[error("transcription has no phonemes")]
    EmptyTranscription,
    #[error("pronunciation value is not a string")]
    NotAString,
    #[error("word has no pronunciation")]
    MissingPronunciation,
}
