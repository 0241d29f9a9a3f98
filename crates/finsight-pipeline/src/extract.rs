//! Company name extraction from free-form conversation text

use crate::error::{PipelineError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Outcome of scanning one transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// The scanned text, verbatim
    pub raw_text: String,
    /// Length of the scanned text in bytes
    pub length: usize,
    /// Matched vocabulary entries, in vocabulary order
    pub mentioned_companies: Vec<String>,
}

/// Scans text against a fixed company vocabulary
///
/// Matching is case-insensitive and whole-word: a vocabulary entry matches
/// only when it is not embedded in a longer token, so "Apple" is found in
/// "Apple announced earnings" but not in "Applebee's", and "Target" never
/// matches inside "Targeting". Patterns are compiled once at construction;
/// extraction itself is a pure function of the text.
#[derive(Debug, Clone)]
pub struct CompanyExtractor {
    entries: Vec<(String, Regex)>,
}

impl CompanyExtractor {
    /// Compile one matcher per vocabulary entry
    ///
    /// Duplicate entries are collapsed, keeping the first occurrence so the
    /// vocabulary order stays meaningful.
    pub fn new(vocabulary: &[String]) -> Result<Self> {
        let mut entries = Vec::with_capacity(vocabulary.len());

        for name in vocabulary {
            if entries.iter().any(|(seen, _)| seen == name) {
                continue;
            }
            let pattern = format!(r"(?i)\b{}\b", regex::escape(name));
            let matcher = Regex::new(&pattern).map_err(|source| PipelineError::Pattern {
                name: name.clone(),
                source,
            })?;
            entries.push((name.clone(), matcher));
        }

        Ok(Self { entries })
    }

    /// Return the vocabulary entries mentioned in `text`
    ///
    /// The result is a duplicate-free subsequence of the vocabulary: order
    /// follows the vocabulary, not first appearance in the text, and a name
    /// appears at most once however often the text repeats it.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, matcher)| matcher.is_match(text))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Scan `text` and package the outcome
    pub fn scan(&self, text: &str) -> ExtractionResult {
        ExtractionResult {
            raw_text: text.to_string(),
            length: text.len(),
            mentioned_companies: self.extract(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_extract_preserves_vocabulary_order() {
        let extractor =
            CompanyExtractor::new(&vocabulary(&["Apple", "Microsoft", "Tesla"])).unwrap();

        // Mention order in the text is reversed on purpose
        let found = extractor.extract("Tesla dipped while Apple rallied");
        assert_eq!(found, vocabulary(&["Apple", "Tesla"]));
    }

    #[test]
    fn test_extract_is_case_insensitive() {
        let extractor = CompanyExtractor::new(&vocabulary(&["Nvidia"])).unwrap();
        assert_eq!(
            extractor.extract("NVIDIA and nvidia and NvIdIa"),
            vocabulary(&["Nvidia"])
        );
    }

    #[test]
    fn test_extract_whole_words_only() {
        let extractor =
            CompanyExtractor::new(&vocabulary(&["Apple", "Applebee's", "Target"])).unwrap();

        assert_eq!(
            extractor.extract("Apple announced earnings"),
            vocabulary(&["Apple"])
        );
        assert_eq!(
            extractor.extract("dinner at Applebee's tonight"),
            vocabulary(&["Applebee's"])
        );
        assert_eq!(extractor.extract("Targeting new customers"), Vec::<String>::new());
    }

    #[test]
    fn test_extract_deduplicates_repeated_mentions() {
        let extractor = CompanyExtractor::new(&vocabulary(&["Tesla"])).unwrap();
        assert_eq!(
            extractor.extract("Tesla, Tesla and more Tesla"),
            vocabulary(&["Tesla"])
        );
    }

    #[test]
    fn test_extract_empty_text_and_vocabulary() {
        let extractor = CompanyExtractor::new(&vocabulary(&["Apple"])).unwrap();
        assert!(extractor.extract("").is_empty());

        let empty = CompanyExtractor::new(&[]).unwrap();
        assert!(empty.extract("Apple everywhere").is_empty());
    }

    #[test]
    fn test_overlapping_names_match_independently() {
        let extractor = CompanyExtractor::new(&vocabulary(&["Google", "Alphabet"])).unwrap();
        assert_eq!(
            extractor.extract("Alphabet, the parent of Google"),
            vocabulary(&["Google", "Alphabet"])
        );
    }

    #[test]
    fn test_duplicate_vocabulary_entries_collapse() {
        let extractor = CompanyExtractor::new(&vocabulary(&["Apple", "Apple"])).unwrap();
        assert_eq!(extractor.extract("Apple"), vocabulary(&["Apple"]));
    }

    #[test]
    fn test_punctuated_names() {
        let extractor =
            CompanyExtractor::new(&vocabulary(&["Coca-Cola", "McDonald's"])).unwrap();
        assert_eq!(
            extractor.extract("lunch at McDonald's with a Coca-Cola"),
            vocabulary(&["Coca-Cola", "McDonald's"])
        );
    }

    #[test]
    fn test_scan_reports_text_and_length() {
        let extractor = CompanyExtractor::new(&vocabulary(&["Apple"])).unwrap();
        let result = extractor.scan("Apple at the open");

        assert_eq!(result.raw_text, "Apple at the open");
        assert_eq!(result.length, 17);
        assert_eq!(result.mentioned_companies, vocabulary(&["Apple"]));
    }
}
