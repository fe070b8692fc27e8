//! Phoneme-anagram grouping: normalize → index → group → dedupe → filter.

pub mod dedupe;
pub mod groups;
pub mod index;
pub mod nontrivial;
pub mod normalize;

pub use dedupe::{dedupe, homophone_classes, HomophoneClass};
pub use groups::extract_groups;
pub use index::{build_index, find_anagrams, AnagramIndex};
pub use nontrivial::filter_nontrivial;
pub use normalize::{normalize, NormalizeConfig};
