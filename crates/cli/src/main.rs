//! Anaphones CLI — find words whose pronunciations are anagrams.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use anaphones_core::anagram::normalize;
use anaphones_core::dictionary::{self, DictFormat, PronunciationDict};
use anaphones_core::output::{write_views, Manifest, OutputLayout};
use anaphones_core::pipeline::{self, AnaphoneViews};
use anaphones_core::{AnaphoneGroup, NormalizeConfig};

// ─── Top-level CLI ───────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "anaphones",
    about = "Find words whose phonemes are anagrams of each other",
    version,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the three anaphone views for a dictionary
    Generate(GenerateArgs),
    /// Show the anaphones of individual words or pronunciations
    Lookup(LookupArgs),
}

// ─── Shared arguments (embedded in each subcommand) ──────────────

#[derive(Parser, Debug)]
struct SharedArgs {
    /// Pronunciation dictionary (ipa-dict JSON or CMU dict text)
    dictionary: PathBuf,

    /// Dictionary format (auto: .json is ipa-dict, anything else cmudict)
    #[arg(long, default_value = "auto", value_parser = ["auto", "ipa-dict", "cmudict"])]
    format: String,

    /// Language key inside an ipa-dict file (default: the only one present)
    #[arg(long)]
    language: Option<String>,

    /// Treat stress marks as phonemes instead of stripping them
    #[arg(long, default_value_t = false)]
    keep_stress: bool,

    /// Attach IPA length marks to the preceding phoneme
    #[arg(long, default_value_t = false)]
    bind_length_marks: bool,

    /// Show verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl SharedArgs {
    fn normalize_config(&self) -> NormalizeConfig {
        NormalizeConfig {
            keep_stress: self.keep_stress,
            bind_length_marks: self.bind_length_marks,
        }
    }

    fn dict_format(&self) -> Result<Option<DictFormat>> {
        match self.format.as_str() {
            "auto" => Ok(None),
            other => Ok(Some(other.parse()?)),
        }
    }
}

// ─── Generate ────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Generate anaphones.json and its filtered views")]
struct GenerateArgs {
    #[command(flatten)]
    shared: SharedArgs,

    /// Output directory
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Output file layout
    #[arg(long, default_value = "groups", value_parser = ["groups", "by-word"])]
    layout: String,
}

// ─── Lookup ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Print the anaphone groups of the given words")]
struct LookupArgs {
    #[command(flatten)]
    shared: SharedArgs,

    /// Words to look up (or pronunciations with --pronunciation)
    #[arg(required = true)]
    queries: Vec<String>,

    /// Treat queries as transcriptions in the dictionary's notation
    #[arg(long, default_value_t = false)]
    pronunciation: bool,
}

// ─── Main ────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    // Init logging
    let log_level = match &cli.command {
        Command::Generate(a) if a.shared.verbose => "debug",
        Command::Lookup(a) if a.shared.verbose => "debug",
        _ => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Lookup(args) => run_lookup(args),
    };

    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

// ─── Helpers ─────────────────────────────────────────────────────

/// Validate the dictionary path and load it.
fn load_dictionary(shared: &SharedArgs) -> Result<PronunciationDict> {
    if !shared.dictionary.exists() {
        bail!("File not found: {}", shared.dictionary.display());
    }
    let dict = dictionary::load(
        &shared.dictionary,
        shared.dict_format()?,
        shared.language.as_deref(),
    )
    .with_context(|| format!("Failed to load {}", shared.dictionary.display()))?;
    Ok(dict)
}

fn print_group(label: &str, group: &AnaphoneGroup) {
    let members: Vec<String> = group.members.iter().map(|m| m.to_string()).collect();
    println!("  {:<11} [{}] {}", label, group.key, members.join(", "));
}

fn print_view(label: &str, groups: &[&AnaphoneGroup]) {
    if groups.is_empty() {
        println!("  {:<11} -", label);
    }
    for g in groups {
        print_group(label, g);
    }
}

// ─── Generate runner ─────────────────────────────────────────────

fn run_generate(args: GenerateArgs) -> Result<()> {
    let layout: OutputLayout = args.layout.parse()?;
    let config = args.shared.normalize_config();
    let dict = load_dictionary(&args.shared)?;

    let views = pipeline::run(&dict, &config);
    let manifest = Manifest::new(&args.shared.dictionary, &dict, &views, config, layout)?;
    let written = write_views(&args.output_dir, &views, layout, &manifest)
        .with_context(|| format!("Failed to write views to {}", args.output_dir.display()))?;

    let counts = views.counts();
    println!(
        "{} pronunciations, {} phoneme multisets, {} skipped",
        counts.entries, counts.keys, counts.skipped
    );
    println!(
        "{} anaphone groups, {} with unique pronunciations, {} nontrivial",
        counts.anaphones, counts.unique_pronunciation, counts.nontrivial_unique_pronunciation
    );
    for path in &written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

// ─── Lookup runner ───────────────────────────────────────────────

fn run_lookup(args: LookupArgs) -> Result<()> {
    let config = args.shared.normalize_config();
    let dict = load_dictionary(&args.shared)?;
    let views = pipeline::run(&dict, &config);

    for query in &args.queries {
        if args.pronunciation {
            lookup_pronunciation(&views, &dict, query, &config);
        } else {
            lookup_word(&views, query);
        }
    }
    Ok(())
}

fn lookup_word(views: &AnaphoneViews, word: &str) {
    let prons: Vec<String> = views
        .index
        .entries_for_word(word)
        .map(|e| e.transcription.to_string())
        .collect();
    if prons.is_empty() {
        println!("{}: not in dictionary", word);
        return;
    }
    println!("{} ({})", word, prons.join(", "));

    let matches = views.groups_containing(word);
    if matches.is_empty() {
        println!("  no anaphones");
        return;
    }
    print_view("all", &matches.anaphones);
    print_view("unique", &matches.unique_pronunciation);
    print_view("nontrivial", &matches.nontrivial_unique_pronunciation);
}

fn lookup_pronunciation(views: &AnaphoneViews, dict: &PronunciationDict, raw: &str, config: &NormalizeConfig) {
    let transcription = match normalize(raw, dict.notation(), config) {
        Ok(t) => t,
        Err(reason) => {
            println!("{}: {}", raw, reason);
            return;
        }
    };
    println!("{} [{}]", transcription, transcription.canonical_key());
    match views.index.anaphones_of(&transcription) {
        Some(entries) => {
            for e in entries {
                let marker = if e.transcription == transcription { "=" } else { "~" };
                println!("  {} {}", marker, e);
            }
        }
        None => println!("  no dictionary words share these phonemes"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "anaphones",
            "generate",
            "ipa-dict-en_US.json",
            "--layout",
            "by-word",
            "--keep-stress",
        ])
        .unwrap();
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.layout, "by-word");
                assert!(args.shared.keep_stress);
                assert!(!args.shared.bind_length_marks);
                assert_eq!(args.output_dir, PathBuf::from("."));
                assert_eq!(args.shared.dict_format().unwrap(), None);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_layout() {
        let result = Cli::try_parse_from(["anaphones", "generate", "d.json", "--layout", "csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_lookup() {
        let cli = Cli::try_parse_from([
            "anaphones",
            "lookup",
            "cmudict.dict",
            "--format",
            "cmudict",
            "cat",
            "tack",
        ])
        .unwrap();
        match cli.command {
            Command::Lookup(args) => {
                assert_eq!(args.queries, vec!["cat", "tack"]);
                assert!(!args.pronunciation);
                assert_eq!(args.shared.dict_format().unwrap(), Some(DictFormat::Cmudict));
            }
            _ => panic!("expected lookup"),
        }
    }

    #[test]
    fn test_lookup_requires_query() {
        assert!(Cli::try_parse_from(["anaphones", "lookup", "d.json"]).is_err());
    }

    #[test]
    fn test_generate_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("en.json");
        std::fs::write(
            &input,
            r#"{"en_US": [{"salami": "/səˈlɑːmi/", "awesomely": "/ˈɑːsəmli/", "there": "/ðɛr/", "their": "/ðɛr/"}]}"#,
        )
        .unwrap();
        let out = dir.path().join("out");
        let cli = Cli::try_parse_from([
            "anaphones",
            "generate",
            input.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
        ])
        .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        run_generate(args).unwrap();

        let all: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.join("anaphones.json")).unwrap()).unwrap();
        assert_eq!(all.as_object().unwrap().len(), 2);
        let nontrivial = std::fs::read_to_string(out.join("anaphones_nontrivial_unique_pronunciation.json")).unwrap();
        assert!(nontrivial.contains("salami"));
        assert!(!nontrivial.contains("there"));
    }

    #[test]
    fn test_generate_missing_file() {
        let cli = Cli::try_parse_from(["anaphones", "generate", "/nonexistent/dict.json"]).unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let err = run_generate(args).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
