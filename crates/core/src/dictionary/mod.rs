//! Pronunciation dictionary loading.

pub mod cmudict;
pub mod ipa_dict;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DictionaryError;
use crate::types::{Notation, RawEntry, SkippedEntry};

/// Supported dictionary file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DictFormat {
    /// ipa-dict JSON, IPA transcriptions
    IpaDict,
    /// CMU Pronouncing Dictionary text, ARPABET transcriptions
    Cmudict,
}

impl DictFormat {
    /// Guess the format from a file extension: `.json` is ipa-dict, anything else CMU.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DictFormat::IpaDict,
            _ => DictFormat::Cmudict,
        }
    }

    pub fn notation(self) -> Notation {
        match self {
            DictFormat::IpaDict => Notation::Ipa,
            DictFormat::Cmudict => Notation::Arpabet,
        }
    }
}

impl FromStr for DictFormat {
    type Err = DictionaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ipa-dict" | "ipa" | "json" => Ok(DictFormat::IpaDict),
            "cmudict" | "cmu" | "arpabet" => Ok(DictFormat::Cmudict),
            other => Err(DictionaryError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for DictFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DictFormat::IpaDict => "ipa-dict",
            DictFormat::Cmudict => "cmudict",
        })
    }
}

/// A loaded dictionary: raw (word, pronunciation) pairs plus anything the
/// parser had to reject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PronunciationDict {
    pub format: DictFormat,
    /// Language key for ipa-dict files, `None` for CMU.
    pub language: Option<String>,
    pub entries: Vec<RawEntry>,
    pub skipped: Vec<SkippedEntry>,
}

impl PronunciationDict {
    /// Parse dictionary text that is already in memory.
    pub fn parse(text: &str, format: DictFormat, language: Option<&str>) -> Result<Self, DictionaryError> {
        let dict = match format {
            DictFormat::IpaDict => {
                let (lang, entries, skipped) = ipa_dict::parse(text, language)?;
                PronunciationDict {
                    format,
                    language: Some(lang),
                    entries,
                    skipped,
                }
            }
            DictFormat::Cmudict => {
                let (entries, skipped) = cmudict::parse(text);
                PronunciationDict {
                    format,
                    language: None,
                    entries,
                    skipped,
                }
            }
        };
        for s in &dict.skipped {
            log::warn!("Skipping '{}': {}", s.word, s.reason);
        }
        Ok(dict)
    }

    pub fn notation(&self) -> Notation {
        self.format.notation()
    }

    /// Number of distinct words with at least one pronunciation.
    pub fn word_count(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.word.as_str())
            .collect::<std::collections::BTreeSet<_>>()
            .len()
    }
}

/// Read and parse a dictionary file.
///
/// `format = None` detects the format from the file extension.
pub fn load(
    path: &Path,
    format: Option<DictFormat>,
    language: Option<&str>,
) -> Result<PronunciationDict, DictionaryError> {
    let format = format.unwrap_or_else(|| DictFormat::detect(path));
    log::info!("Loading {} dictionary: {}", format, path.display());
    let text = std::fs::read_to_string(path).map_err(|source| DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dict = PronunciationDict::parse(&text, format, language)?;
    log::info!(
        "Loaded {} pronunciations for {} words ({} skipped)",
        dict.entries.len(),
        dict.word_count(),
        dict.skipped.len()
    );
    Ok(dict)
}
