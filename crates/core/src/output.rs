//! Deterministic JSON serialization of the anaphone views.
//!
//! Every file is an object with sorted keys, tab indentation and unescaped
//! non-ASCII text, so regenerating from the same dictionary gives
//! byte-identical output.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::anagram::NormalizeConfig;
use crate::dictionary::{DictFormat, PronunciationDict};
use crate::pipeline::{AnaphoneViews, ViewCounts};
use crate::types::{AnaphoneGroup, CanonicalKey, SkippedEntry};

pub const ANAPHONES_FILE: &str = "anaphones.json";
pub const UNIQUE_PRONUNCIATION_FILE: &str = "anaphones_unique_pronunciation.json";
pub const NONTRIVIAL_FILE: &str = "anaphones_nontrivial_unique_pronunciation.json";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Shape of the published view files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputLayout {
    /// `{"<canonical key>": [{"word": .., "pronunciation": ..}, ..]}`
    #[default]
    Groups,
    /// `{"word:pron": "word:pron, other:pron"}`, one key per pronunciation
    /// in the unfiltered group
    ByWord,
}

impl FromStr for OutputLayout {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "groups" => Ok(OutputLayout::Groups),
            "by-word" => Ok(OutputLayout::ByWord),
            other => bail!("unknown layout '{}' (expected groups or by-word)", other),
        }
    }
}

impl fmt::Display for OutputLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputLayout::Groups => "groups",
            OutputLayout::ByWord => "by-word",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct MemberRecord {
    word: String,
    pronunciation: String,
}

fn groups_layout(groups: &[AnaphoneGroup]) -> BTreeMap<String, Vec<MemberRecord>> {
    groups
        .iter()
        .map(|g| {
            let members = g
                .members
                .iter()
                .map(|m| MemberRecord {
                    word: m.word.clone(),
                    pronunciation: m.transcription.to_string(),
                })
                .collect();
            (g.key.to_string(), members)
        })
        .collect()
}

/// Every pronunciation of a raw group maps to the filtered group sharing its
/// key, including homophones that dedupe dropped.
fn by_word_layout(view: &[AnaphoneGroup], raw: &[AnaphoneGroup]) -> BTreeMap<String, String> {
    let raw_by_key: BTreeMap<&CanonicalKey, &AnaphoneGroup> = raw.iter().map(|g| (&g.key, g)).collect();
    let mut out = BTreeMap::new();
    for g in view {
        let joined = g
            .members
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let keyed = raw_by_key.get(&g.key).copied().unwrap_or(g);
        for m in keyed.members.iter().chain(&g.members) {
            out.insert(m.to_string(), joined.clone());
        }
    }
    out
}

/// Serialize with tab indentation and a trailing newline.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(String::from_utf8(buf)?)
}

/// Render one view in the given layout, keyed by its own members.
pub fn render(groups: &[AnaphoneGroup], layout: OutputLayout) -> Result<String> {
    render_view(groups, groups, layout)
}

/// Render a filtered view; `raw` supplies the by-word keys.
pub fn render_view(view: &[AnaphoneGroup], raw: &[AnaphoneGroup], layout: OutputLayout) -> Result<String> {
    match layout {
        OutputLayout::Groups => to_pretty_json(&groups_layout(view)),
        OutputLayout::ByWord => to_pretty_json(&by_word_layout(view, raw)),
    }
}

/// Provenance for a set of generated view files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Input file name (without directories, so the manifest is machine independent)
    pub input: String,
    pub input_sha256: String,
    pub format: DictFormat,
    pub language: Option<String>,
    pub normalize: NormalizeConfig,
    pub layout: OutputLayout,
    pub counts: ViewCounts,
    pub skipped: Vec<SkippedEntry>,
}

impl Manifest {
    pub fn new(
        input: &Path,
        dict: &PronunciationDict,
        views: &AnaphoneViews,
        normalize: NormalizeConfig,
        layout: OutputLayout,
    ) -> Result<Self> {
        Ok(Self {
            input: input
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            input_sha256: file_hash(input)?,
            format: dict.format,
            language: dict.language.clone(),
            normalize,
            layout,
            counts: views.counts(),
            skipped: views.skipped.clone(),
        })
    }
}

/// Compute SHA-256 hash of a file's contents.
///
/// Returns a 64-character hex string.
pub fn file_hash(path: &Path) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open file for hashing: {}", path.display()))?;
    std::io::copy(&mut file, &mut hasher)?;
    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}

/// Atomically write data to a file via temp file + rename.
fn atomic_write(target: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = target.with_extension("tmp");
    std::fs::write(&tmp_path, data)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, target)
        .with_context(|| format!("Failed to move {} into place", target.display()))?;
    Ok(())
}

/// Write the three view files and the manifest into `dir`.
///
/// Everything is rendered before the first file is touched, so a
/// serialization failure leaves the directory unchanged.
pub fn write_views(
    dir: &Path,
    views: &AnaphoneViews,
    layout: OutputLayout,
    manifest: &Manifest,
) -> Result<Vec<PathBuf>> {
    let rendered = [
        (ANAPHONES_FILE, render(&views.anaphones, layout)?),
        (
            UNIQUE_PRONUNCIATION_FILE,
            render_view(&views.unique_pronunciation, &views.anaphones, layout)?,
        ),
        (
            NONTRIVIAL_FILE,
            render_view(&views.nontrivial_unique_pronunciation, &views.anaphones, layout)?,
        ),
        (MANIFEST_FILE, to_pretty_json(manifest)?),
    ];

    let mut written = Vec::new();
    for (name, contents) in rendered {
        let path = dir.join(name);
        log::info!("Writing {}", path.display());
        atomic_write(&path, contents.as_bytes())?;
        written.push(path);
    }
    Ok(written)
}
