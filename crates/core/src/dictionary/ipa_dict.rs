//! ipa-dict JSON format.
//!
//! Layout: `{"en_US": [{"word": "/pron1/, /pron2/", ...}]}`. Each language maps
//! to an array of word objects (usually a single one).

use serde_json::{Map, Value};

use crate::error::{DictionaryError, SkipReason};
use crate::types::{RawEntry, SkippedEntry};

/// Parse ipa-dict JSON for one language.
///
/// With `language = None` the file must contain exactly one language.
pub fn parse(
    text: &str,
    language: Option<&str>,
) -> Result<(String, Vec<RawEntry>, Vec<SkippedEntry>), DictionaryError> {
    let root: Value = serde_json::from_str(text)?;
    let languages = root
        .as_object()
        .ok_or_else(|| DictionaryError::InvalidShape("top level is not an object".into()))?;

    let (lang, words_value) = select_language(languages, language)?;

    let word_maps: Vec<&Map<String, Value>> = match words_value {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_object().ok_or_else(|| {
                    DictionaryError::InvalidShape(format!(
                        "'{}' array must contain objects",
                        lang
                    ))
                })
            })
            .collect::<Result<_, _>>()?,
        Value::Object(map) => vec![map],
        _ => {
            return Err(DictionaryError::InvalidShape(format!(
                "'{}' must be an array of objects",
                lang
            )))
        }
    };

    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for map in word_maps {
        for (word_raw, value) in map {
            let word = word_raw.trim();
            let Some(prons) = value.as_str() else {
                skipped.push(SkippedEntry::new(word, value.to_string(), SkipReason::NotAString));
                continue;
            };
            if word.is_empty() {
                skipped.push(SkippedEntry::new(word_raw.as_str(), prons, SkipReason::EmptyWord));
                continue;
            }
            let mut any = false;
            for pron in prons.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                entries.push(RawEntry::new(word, pron));
                any = true;
            }
            if !any {
                skipped.push(SkippedEntry::new(word, prons, SkipReason::MissingPronunciation));
            }
        }
    }

    Ok((lang.to_string(), entries, skipped))
}

fn select_language<'a>(
    languages: &'a Map<String, Value>,
    requested: Option<&str>,
) -> Result<(&'a str, &'a Value), DictionaryError> {
    let available = || languages.keys().cloned().collect::<Vec<_>>().join(", ");
    match requested {
        Some(lang) => languages
            .iter()
            .find(|(k, _)| k.as_str() == lang)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| DictionaryError::MissingLanguage {
                requested: lang.to_string(),
                available: available(),
            }),
        None => {
            let mut iter = languages.iter();
            match (iter.next(), iter.next()) {
                (Some((k, v)), None) => Ok((k.as_str(), v)),
                (None, _) => Err(DictionaryError::InvalidShape("no languages in dictionary".into())),
                _ => Err(DictionaryError::AmbiguousLanguage(available())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_language() {
        let text = r#"{"en_US": [{"salami": "/səˈlɑmi/", "the": "/ðə/, /ði/"}]}"#;
        let (lang, entries, skipped) = parse(text, None).unwrap();
        assert_eq!(lang, "en_US");
        assert!(skipped.is_empty());
        assert_eq!(entries.len(), 3);
        assert!(entries.contains(&RawEntry::new("the", "/ði/")));
    }

    #[test]
    fn test_parse_selects_requested_language() {
        let text = r#"{"en_US": [{"a": "/ə/"}], "en_UK": [{"b": "/biː/"}]}"#;
        let (lang, entries, _) = parse(text, Some("en_UK")).unwrap();
        assert_eq!(lang, "en_UK");
        assert_eq!(entries, vec![RawEntry::new("b", "/biː/")]);
    }

    #[test]
    fn test_parse_missing_language() {
        let text = r#"{"en_US": [{"a": "/ə/"}]}"#;
        let err = parse(text, Some("fr_FR")).unwrap_err();
        assert!(matches!(err, DictionaryError::MissingLanguage { .. }));
        assert!(err.to_string().contains("en_US"));
    }

    #[test]
    fn test_parse_ambiguous_language() {
        let text = r#"{"en_US": [{"a": "/ə/"}], "en_UK": [{"b": "/biː/"}]}"#;
        assert!(matches!(parse(text, None), Err(DictionaryError::AmbiguousLanguage(_))));
    }

    #[test]
    fn test_parse_bare_object_language() {
        let text = r#"{"en_US": {"cat": "/kæt/"}}"#;
        let (_, entries, _) = parse(text, None).unwrap();
        assert_eq!(entries, vec![RawEntry::new("cat", "/kæt/")]);
    }

    #[test]
    fn test_parse_non_string_value_skipped() {
        let text = r#"{"en_US": [{"cat": "/kæt/", "bad": 42}]}"#;
        let (_, entries, skipped) = parse(text, None).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].reason, SkipReason::NotAString);
    }

    #[test]
    fn test_parse_empty_pronunciation_skipped() {
        let text = r#"{"en_US": [{"cat": " , "}]}"#;
        let (_, entries, skipped) = parse(text, None).unwrap();
        assert!(entries.is_empty());
        assert_eq!(skipped[0].reason, SkipReason::MissingPronunciation);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(parse("{not json", None), Err(DictionaryError::Json(_))));
    }

    #[test]
    fn test_parse_wrong_shape() {
        assert!(matches!(parse("[1, 2]", None), Err(DictionaryError::InvalidShape(_))));
        assert!(matches!(
            parse(r#"{"en_US": "nope"}"#, None),
            Err(DictionaryError::InvalidShape(_))
        ));
    }
}
