//! Full anaphone pipeline: dictionary → three published views.

use serde::{Deserialize, Serialize};

use crate::anagram::{
    build_index, dedupe, extract_groups, filter_nontrivial, normalize, AnagramIndex, NormalizeConfig,
};
use crate::dictionary::PronunciationDict;
use crate::types::{AnaphoneGroup, PronunciationEntry, SkippedEntry};

/// Group counts per view, plus input statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCounts {
    pub entries: usize,
    pub keys: usize,
    pub skipped: usize,
    pub anaphones: usize,
    pub unique_pronunciation: usize,
    pub nontrivial_unique_pronunciation: usize,
}

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct AnaphoneViews {
    pub index: AnagramIndex,
    /// Every group, homophones included.
    pub anaphones: Vec<AnaphoneGroup>,
    /// One representative per distinct transcription.
    pub unique_pronunciation: Vec<AnaphoneGroup>,
    /// Representatives with a differently-ordered anaphone partner.
    pub nontrivial_unique_pronunciation: Vec<AnaphoneGroup>,
    /// Entries rejected by the loader or the normalizer.
    pub skipped: Vec<SkippedEntry>,
}

/// Groups containing a word, per view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordMatches<'a> {
    pub anaphones: Vec<&'a AnaphoneGroup>,
    pub unique_pronunciation: Vec<&'a AnaphoneGroup>,
    pub nontrivial_unique_pronunciation: Vec<&'a AnaphoneGroup>,
}

impl WordMatches<'_> {
    pub fn is_empty(&self) -> bool {
        self.anaphones.is_empty()
    }
}

impl AnaphoneViews {
    pub fn counts(&self) -> ViewCounts {
        ViewCounts {
            entries: self.index.entry_count(),
            keys: self.index.bucket_count(),
            skipped: self.skipped.len(),
            anaphones: self.anaphones.len(),
            unique_pronunciation: self.unique_pronunciation.len(),
            nontrivial_unique_pronunciation: self.nontrivial_unique_pronunciation.len(),
        }
    }

    /// Look up every group `word` belongs to in each view.
    pub fn groups_containing(&self, word: &str) -> WordMatches<'_> {
        WordMatches {
            anaphones: groups_with(&self.anaphones, word),
            unique_pronunciation: groups_with(&self.unique_pronunciation, word),
            nontrivial_unique_pronunciation: groups_with(&self.nontrivial_unique_pronunciation, word),
        }
    }
}

fn groups_with<'a>(groups: &'a [AnaphoneGroup], word: &str) -> Vec<&'a AnaphoneGroup> {
    groups.iter().filter(|g| g.contains_word(word)).collect()
}

/// Normalize every raw entry, collecting the ones that fail.
pub fn normalize_entries(
    dict: &PronunciationDict,
    config: &NormalizeConfig,
) -> (Vec<PronunciationEntry>, Vec<SkippedEntry>) {
    let notation = dict.notation();
    let mut entries = Vec::with_capacity(dict.entries.len());
    let mut skipped = Vec::new();
    for raw in &dict.entries {
        match normalize(&raw.pronunciation, notation, config) {
            Ok(transcription) => entries.push(PronunciationEntry::new(raw.word.clone(), transcription)),
            Err(reason) => {
                log::warn!("Skipping '{}' {:?}: {}", raw.word, raw.pronunciation, reason);
                skipped.push(SkippedEntry::new(raw.word.clone(), raw.pronunciation.clone(), reason));
            }
        }
    }
    (entries, skipped)
}

/// Run every stage over a loaded dictionary.
pub fn run(dict: &PronunciationDict, config: &NormalizeConfig) -> AnaphoneViews {
    let (entries, normalize_skipped) = normalize_entries(dict, config);
    let mut skipped = dict.skipped.clone();
    skipped.extend(normalize_skipped);

    let index = build_index(entries);
    log::info!(
        "Indexed {} pronunciations under {} phoneme multisets",
        index.entry_count(),
        index.bucket_count()
    );

    let anaphones = extract_groups(&index);
    log::info!("Found {} anaphone groups", anaphones.len());

    let unique_pronunciation = dedupe(&anaphones);
    log::info!("{} groups after homophone dedup", unique_pronunciation.len());

    let nontrivial_unique_pronunciation = filter_nontrivial(&unique_pronunciation);
    log::info!("{} nontrivial groups", nontrivial_unique_pronunciation.len());

    if !skipped.is_empty() {
        log::warn!("Skipped {} malformed entries", skipped.len());
    }

    AnaphoneViews {
        index,
        anaphones,
        unique_pronunciation,
        nontrivial_unique_pronunciation,
        skipped,
    }
}
