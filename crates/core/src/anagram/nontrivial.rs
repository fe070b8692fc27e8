//! Keep only representatives with a genuinely different-sounding anaphone.

use crate::types::{AnaphoneGroup, PronunciationEntry};

/// True if some other member of `group` has a different exact transcription.
pub fn has_nontrivial_partner(entry: &PronunciationEntry, group: &AnaphoneGroup) -> bool {
    group
        .members
        .iter()
        .any(|other| other != entry && !other.is_homophone_of(entry))
}

/// Drop representatives whose only partners are homophones, then drop
/// groups left with fewer than two members.
///
/// Input is expected to be deduplicated already; the per-member check is
/// repeated here so the view holds even if upstream normalization lets
/// homophones through.
pub fn filter_nontrivial(groups: &[AnaphoneGroup]) -> Vec<AnaphoneGroup> {
    groups
        .iter()
        .filter_map(|group| {
            let kept: Vec<PronunciationEntry> = group
                .members
                .iter()
                .filter(|m| has_nontrivial_partner(m, group))
                .cloned()
                .collect();
            if kept.len() < group.len() {
                log::debug!(
                    "Group '{}': dropped {} trivial member(s)",
                    group.key,
                    group.len() - kept.len()
                );
            }
            let filtered = AnaphoneGroup::new(group.key.clone(), kept);
            (filtered.len() >= 2).then_some(filtered)
        })
        .collect()
}
