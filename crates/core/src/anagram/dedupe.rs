//! Collapse homophones within each anaphone group.

use std::collections::BTreeMap;

use crate::types::{AnaphoneGroup, PronunciationEntry, Transcription};

/// Members of one group that share an exact transcription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomophoneClass<'a> {
    pub transcription: &'a Transcription,
    /// Sorted by word.
    pub members: Vec<&'a PronunciationEntry>,
}

impl<'a> HomophoneClass<'a> {
    /// The lexicographically smallest word in the class.
    pub fn representative(&self) -> &'a PronunciationEntry {
        // members is never empty: classes are only built from existing entries
        self.members[0]
    }
}

/// Partition a group's members by exact transcription, in transcription order.
pub fn homophone_classes(group: &AnaphoneGroup) -> Vec<HomophoneClass<'_>> {
    let mut classes: BTreeMap<&Transcription, Vec<&PronunciationEntry>> = BTreeMap::new();
    for member in &group.members {
        classes.entry(&member.transcription).or_default().push(member);
    }
    classes
        .into_iter()
        .map(|(transcription, mut members)| {
            members.sort_by(|a, b| a.word.cmp(&b.word));
            HomophoneClass {
                transcription,
                members,
            }
        })
        .collect()
}

/// One representative per distinct transcription.
///
/// A group survives iff it keeps at least two representatives. One word may
/// represent two classes when it has two anagram pronunciations.
pub fn dedupe(groups: &[AnaphoneGroup]) -> Vec<AnaphoneGroup> {
    groups
        .iter()
        .filter_map(|group| {
            let reps = homophone_classes(group)
                .iter()
                .map(|class| class.representative().clone())
                .collect::<Vec<_>>();
            let deduped = AnaphoneGroup::new(group.key.clone(), reps);
            if deduped.len() >= 2 {
                Some(deduped)
            } else {
                log::debug!("Group '{}' has fewer than two representatives", group.key);
                None
            }
        })
        .collect()
}
