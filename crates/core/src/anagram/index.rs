//! Anagram-key index: canonical key → entries sharing that phoneme multiset.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{CanonicalKey, PronunciationEntry, Transcription};

/// Bucket items by the sorted form of a symbol sequence.
///
/// Items sharing a bucket are anagrams of each other under `key`. Bucket
/// order follows the key, item order within a bucket follows input order.
pub fn find_anagrams<T, I, F>(items: I, key: F) -> BTreeMap<CanonicalKey, Vec<T>>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> &[String],
{
    let mut buckets: BTreeMap<CanonicalKey, Vec<T>> = BTreeMap::new();
    for item in items {
        let k = CanonicalKey::from_symbols(key(&item));
        buckets.entry(k).or_default().push(item);
    }
    buckets
}

/// Every dictionary entry filed under its canonical key.
#[derive(Debug, Clone, Default)]
pub struct AnagramIndex {
    buckets: BTreeMap<CanonicalKey, BTreeSet<PronunciationEntry>>,
}

impl AnagramIndex {
    pub fn buckets(&self) -> impl Iterator<Item = (&CanonicalKey, &BTreeSet<PronunciationEntry>)> {
        self.buckets.iter()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of distinct (word, transcription) pairs indexed.
    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(|b| b.len()).sum()
    }

    pub fn get(&self, key: &CanonicalKey) -> Option<&BTreeSet<PronunciationEntry>> {
        self.buckets.get(key)
    }

    /// All indexed entries whose phonemes are an anagram of `transcription`.
    ///
    /// The transcription itself does not need to be in the dictionary.
    pub fn anaphones_of(&self, transcription: &Transcription) -> Option<&BTreeSet<PronunciationEntry>> {
        self.buckets.get(&transcription.canonical_key())
    }

    /// All indexed pronunciations of `word`.
    pub fn entries_for_word<'a>(&'a self, word: &'a str) -> impl Iterator<Item = &'a PronunciationEntry> + 'a {
        self.buckets
            .values()
            .flat_map(|b| b.iter())
            .filter(move |e| e.word == word)
    }
}

/// Build the index from normalized entries. Duplicate entries collapse.
pub fn build_index<I>(entries: I) -> AnagramIndex
where
    I: IntoIterator<Item = PronunciationEntry>,
{
    let buckets = find_anagrams(entries, |e: &PronunciationEntry| e.transcription.symbols.as_slice())
        .into_iter()
        .map(|(k, v)| (k, v.into_iter().collect::<BTreeSet<_>>()))
        .collect();
    AnagramIndex { buckets }
}
