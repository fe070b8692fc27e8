//! CMU Pronouncing Dictionary text format.
//!
//! Format: one word per line, "WORD  PH1 PH2 PH3 ...". Variants are written
//! "WORD(2)  ...". Lines starting with ";;;" are comments, and newer releases
//! append "# comment" to some entries.

use crate::error::SkipReason;
use crate::types::{RawEntry, SkippedEntry};

/// Parse CMU dict text into raw entries. Words are lower-cased.
pub fn parse(text: &str) -> (Vec<RawEntry>, Vec<SkippedEntry>) {
    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for line in text.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() || line.starts_with(";;;") {
            continue;
        }

        let (word_raw, phonemes) = match line.split_once(char::is_whitespace) {
            Some((w, rest)) => (w, rest.trim()),
            None => (line, ""),
        };

        // Strip variant marker: WORD(2) -> WORD
        let word = word_raw
            .split('(')
            .next()
            .unwrap_or(word_raw)
            .to_lowercase();

        if word.is_empty() {
            skipped.push(SkippedEntry::new(word_raw, phonemes, SkipReason::EmptyWord));
            continue;
        }
        if phonemes.is_empty() {
            skipped.push(SkippedEntry::new(word, "", SkipReason::MissingPronunciation));
            continue;
        }

        entries.push(RawEntry::new(word, phonemes));
    }

    (entries, skipped)
}
