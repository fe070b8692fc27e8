use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SkipReason;

/// Phonemic alphabet a dictionary is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    /// One character per phoneme, e.g. "səlɑːmi"
    Ipa,
    /// Whitespace-separated CMU symbols, e.g. "S AH L AA M IY"
    Arpabet,
}

impl Notation {
    /// Separator used when joining symbols for display.
    pub fn separator(self) -> &'static str {
        match self {
            Notation::Ipa => "",
            Notation::Arpabet => " ",
        }
    }
}

/// A normalized, ordered phoneme sequence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Transcription {
    pub symbols: Vec<String>,
    pub notation: Notation,
}

impl Transcription {
    pub fn new(symbols: Vec<String>, notation: Notation) -> Self {
        Self { symbols, notation }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Sorted multiset of this transcription's symbols.
    pub fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::from_symbols(&self.symbols)
    }

    /// True if both transcriptions use the same phonemes in any order.
    pub fn is_anagram_of(&self, other: &Transcription) -> bool {
        self.canonical_key() == other.canonical_key()
    }
}

impl fmt::Display for Transcription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbols.join(self.notation.separator()))
    }
}

/// Grouping key for phoneme anagrams: the transcription's symbols in sorted order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CanonicalKey(Vec<String>);

impl CanonicalKey {
    pub fn from_symbols(symbols: &[String]) -> Self {
        let mut sorted = symbols.to_vec();
        sorted.sort();
        CanonicalKey(sorted)
    }

    pub fn symbols(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// One pronunciation of one word. Ordered by word, then transcription.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PronunciationEntry {
    pub word: String,
    pub transcription: Transcription,
}

impl PronunciationEntry {
    pub fn new(word: impl Into<String>, transcription: Transcription) -> Self {
        Self {
            word: word.into(),
            transcription,
        }
    }

    /// True if the two entries sound identical (sequence-equal transcriptions).
    pub fn is_homophone_of(&self, other: &PronunciationEntry) -> bool {
        self.transcription == other.transcription
    }
}

impl fmt::Display for PronunciationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.word, self.transcription)
    }
}

/// Entries sharing one canonical key.
///
/// Members are kept sorted by (word, transcription) and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnaphoneGroup {
    pub key: CanonicalKey,
    pub members: Vec<PronunciationEntry>,
}

impl AnaphoneGroup {
    pub fn new(key: CanonicalKey, members: impl IntoIterator<Item = PronunciationEntry>) -> Self {
        let members: BTreeSet<PronunciationEntry> = members.into_iter().collect();
        Self {
            key,
            members: members.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of distinct orthographic words among the members.
    pub fn distinct_words(&self) -> usize {
        self.words().len()
    }

    pub fn words(&self) -> BTreeSet<&str> {
        self.members.iter().map(|m| m.word.as_str()).collect()
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.members.iter().any(|m| m.word == word)
    }

    /// A group only relates words to each other if it spans at least two words.
    pub fn is_anaphone_group(&self) -> bool {
        self.distinct_words() >= 2
    }
}

/// A dictionary line before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub word: String,
    pub pronunciation: String,
}

impl RawEntry {
    pub fn new(word: impl Into<String>, pronunciation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            pronunciation: pronunciation.into(),
        }
    }
}

/// An input entry that could not be used, with the reason why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub word: String,
    pub pronunciation: String,
    pub reason: SkipReason,
}

impl SkippedEntry {
    pub fn new(word: impl Into<String>, pronunciation: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            word: word.into(),
            pronunciation: pronunciation.into(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ipa(symbols: &[&str]) -> Transcription {
        Transcription::new(symbols.iter().map(|s| s.to_string()).collect(), Notation::Ipa)
    }

    #[test]
    fn test_canonical_key_sorts_symbols() {
        let key = ipa(&["t", "æ", "k"]).canonical_key();
        assert_eq!(key.symbols(), &["k", "t", "æ"]);
        assert_eq!(key.to_string(), "k t æ");
    }

    #[test]
    fn test_canonical_key_keeps_multiplicity() {
        let a = ipa(&["m", "ɑ", "m"]).canonical_key();
        let b = ipa(&["m", "ɑ"]).canonical_key();
        assert_ne!(a, b);
    }

    #[test]
    fn test_transcription_display() {
        assert_eq!(ipa(&["k", "æ", "t"]).to_string(), "kæt");
        let arpa = Transcription::new(
            vec!["K".into(), "AE".into(), "T".into()],
            Notation::Arpabet,
        );
        assert_eq!(arpa.to_string(), "K AE T");
    }

    #[test]
    fn test_is_anagram_of() {
        assert!(ipa(&["t", "æ", "k"]).is_anagram_of(&ipa(&["k", "æ", "t"])));
        assert!(!ipa(&["t", "æ", "k"]).is_anagram_of(&ipa(&["k", "æ", "p"])));
    }

    #[test]
    fn test_entry_display() {
        let e = PronunciationEntry::new("cat", ipa(&["k", "æ", "t"]));
        assert_eq!(e.to_string(), "cat:kæt");
    }

    #[test]
    fn test_group_sorts_and_dedupes_members() {
        let t = ipa(&["ð", "ɛ", "r"]);
        let group = AnaphoneGroup::new(
            t.canonical_key(),
            vec![
                PronunciationEntry::new("there", t.clone()),
                PronunciationEntry::new("their", t.clone()),
                PronunciationEntry::new("there", t.clone()),
            ],
        );
        assert_eq!(group.len(), 2);
        assert_eq!(group.members[0].word, "their");
        assert_eq!(group.members[1].word, "there");
        assert!(group.is_anaphone_group());
    }

    #[test]
    fn test_group_single_word_is_not_anaphone() {
        let a = ipa(&["a", "b"]);
        let b = ipa(&["b", "a"]);
        let group = AnaphoneGroup::new(
            a.canonical_key(),
            vec![PronunciationEntry::new("x", a), PronunciationEntry::new("x", b)],
        );
        assert_eq!(group.len(), 2);
        assert_eq!(group.distinct_words(), 1);
        assert!(!group.is_anaphone_group());
    }

    #[test]
    fn test_entry_serde_roundtrip() {
        let e = PronunciationEntry::new("cat", ipa(&["k", "æ", "t"]));
        let json = serde_json::to_string(&e).unwrap();
        let e2: PronunciationEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(e, e2);
    }
}
