//! Transcription normalization: raw pronunciation strings → phoneme symbols.
//!
//! One policy applies to every entry in a run. By default stress marks are
//! stripped, so "səˈlɑːmi" and "səlɑːmi" are the same transcription both for
//! homophone detection and for the anagram key.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::SkipReason;
use crate::types::{Notation, Transcription};

lazy_static::lazy_static! {
    /// IPA characters that never count as phonemes.
    static ref IGNORED_MARKS: HashSet<char> = ['.', '-', '"', '\'', '/', '[', ']'].into_iter().collect();

    /// IPA primary and secondary stress.
    static ref STRESS_MARKS: HashSet<char> = ['ˈ', 'ˌ'].into_iter().collect();

    /// IPA length marks, optionally bound to the preceding symbol.
    static ref LENGTH_MARKS: HashSet<char> = ['ː', 'ˑ'].into_iter().collect();
}

/// Global normalization policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Keep stress marks as phoneme symbols instead of stripping them.
    #[serde(default)]
    pub keep_stress: bool,
    /// Attach IPA length marks to the preceding symbol ("ɑː" is one phoneme).
    #[serde(default)]
    pub bind_length_marks: bool,
}

/// Strip trailing stress digits (0, 1, 2) from an ARPABET symbol.
pub fn strip_stress(symbol: &str) -> &str {
    symbol.trim_end_matches(|c: char| c.is_ascii_digit())
}

/// Normalize one raw pronunciation.
///
/// Returns `SkipReason::EmptyTranscription` when nothing phonemic remains.
pub fn normalize(
    raw: &str,
    notation: Notation,
    config: &NormalizeConfig,
) -> Result<Transcription, SkipReason> {
    let symbols = match notation {
        Notation::Ipa => ipa_symbols(raw, config),
        Notation::Arpabet => arpabet_symbols(raw, config),
    };
    if symbols.is_empty() {
        return Err(SkipReason::EmptyTranscription);
    }
    Ok(Transcription::new(symbols, notation))
}

fn ipa_symbols(raw: &str, config: &NormalizeConfig) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for c in raw.trim().trim_matches('/').chars() {
        if IGNORED_MARKS.contains(&c) || !c.is_alphabetic() {
            continue;
        }
        if STRESS_MARKS.contains(&c) {
            if config.keep_stress {
                symbols.push(c.to_string());
            }
            continue;
        }
        if config.bind_length_marks && LENGTH_MARKS.contains(&c) {
            if let Some(prev) = symbols.last_mut() {
                prev.push(c);
                continue;
            }
        }
        symbols.push(c.to_string());
    }
    symbols
}

fn arpabet_symbols(raw: &str, config: &NormalizeConfig) -> Vec<String> {
    raw.split_whitespace()
        .filter(|tok| tok.starts_with(|c: char| c.is_ascii_alphabetic()))
        .map(|tok| {
            let tok = tok.to_uppercase();
            if config.keep_stress {
                tok
            } else {
                strip_stress(&tok).to_string()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ipa(raw: &str) -> Vec<String> {
        normalize(raw, Notation::Ipa, &NormalizeConfig::default())
            .unwrap()
            .symbols
    }

    #[test]
    fn test_ipa_strips_slashes_and_stress() {
        assert_eq!(ipa("/səˈlɑːmi/"), vec!["s", "ə", "l", "ɑ", "ː", "m", "i"]);
    }

    #[test]
    fn test_ipa_strips_syllable_dots_and_hyphens() {
        assert_eq!(ipa("/ˌkæ.tə-ˈlɔɡ/"), ipa("/kætəlɔɡ/"));
    }

    #[test]
    fn test_ipa_drops_combining_diacritics() {
        // U+0329 syllabic mark is not alphabetic
        assert_eq!(ipa("/bʌtn\u{0329}/"), vec!["b", "ʌ", "t", "n"]);
    }

    #[test]
    fn test_ipa_keep_stress() {
        let config = NormalizeConfig {
            keep_stress: true,
            ..Default::default()
        };
        let t = normalize("/əˈtɑːri/", Notation::Ipa, &config).unwrap();
        assert_eq!(t.symbols, vec!["ə", "ˈ", "t", "ɑ", "ː", "r", "i"]);
    }

    #[test]
    fn test_ipa_bind_length_marks() {
        let config = NormalizeConfig {
            bind_length_marks: true,
            ..Default::default()
        };
        let t = normalize("/ˈɑːsəmli/", Notation::Ipa, &config).unwrap();
        assert_eq!(t.symbols, vec!["ɑː", "s", "ə", "m", "l", "i"]);
    }

    #[test]
    fn test_ipa_leading_length_mark_stands_alone() {
        let config = NormalizeConfig {
            bind_length_marks: true,
            ..Default::default()
        };
        let t = normalize("/ːa/", Notation::Ipa, &config).unwrap();
        assert_eq!(t.symbols, vec!["ː", "a"]);
    }

    #[test]
    fn test_ipa_empty_is_skipped() {
        let result = normalize("/ˈ./", Notation::Ipa, &NormalizeConfig::default());
        assert_eq!(result, Err(SkipReason::EmptyTranscription));
        let result = normalize("", Notation::Ipa, &NormalizeConfig::default());
        assert_eq!(result, Err(SkipReason::EmptyTranscription));
    }

    #[test]
    fn test_arpabet_strips_stress() {
        let t = normalize("S AH0 L AA1 M IY0", Notation::Arpabet, &NormalizeConfig::default())
            .unwrap();
        assert_eq!(t.symbols, vec!["S", "AH", "L", "AA", "M", "IY"]);
        assert_eq!(t.to_string(), "S AH L AA M IY");
    }

    #[test]
    fn test_arpabet_keep_stress() {
        let config = NormalizeConfig {
            keep_stress: true,
            ..Default::default()
        };
        let t = normalize("k ae1 t", Notation::Arpabet, &config).unwrap();
        assert_eq!(t.symbols, vec!["K", "AE1", "T"]);
    }

    #[test]
    fn test_arpabet_drops_punctuation_tokens() {
        let t = normalize("K , AE1 T", Notation::Arpabet, &NormalizeConfig::default()).unwrap();
        assert_eq!(t.symbols, vec!["K", "AE", "T"]);
    }

    #[test]
    fn test_arpabet_empty_is_skipped() {
        let result = normalize("   ", Notation::Arpabet, &NormalizeConfig::default());
        assert_eq!(result, Err(SkipReason::EmptyTranscription));
    }

    #[test]
    fn test_strip_stress() {
        assert_eq!(strip_stress("AE1"), "AE");
        assert_eq!(strip_stress("IY0"), "IY");
        assert_eq!(strip_stress("K"), "K");
    }
}
