//! Turn index buckets into anaphone groups.

use crate::anagram::index::AnagramIndex;
use crate::types::AnaphoneGroup;

/// Emit one group per bucket that relates at least two distinct words.
///
/// Groups come out in canonical-key order with members sorted by
/// (word, transcription). Two pronunciations of the same word alone do not
/// form a group.
pub fn extract_groups(index: &AnagramIndex) -> Vec<AnaphoneGroup> {
    index
        .buckets()
        .map(|(key, entries)| AnaphoneGroup::new(key.clone(), entries.iter().cloned()))
        .filter(AnaphoneGroup::is_anaphone_group)
        .collect()
}
