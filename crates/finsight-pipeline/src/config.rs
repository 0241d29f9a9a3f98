//! Configuration for the conversation pipeline

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Company names recognized out of the box
///
/// Callers with a different universe supply their own list via the builder or
/// a vocabulary file; the extractor itself never hardcodes names.
pub const DEFAULT_COMPANY_VOCABULARY: &[&str] = &[
    "Apple",
    "Microsoft",
    "Amazon",
    "Google",
    "Facebook",
    "Meta",
    "Tesla",
    "Netflix",
    "Nvidia",
    "Intel",
    "AMD",
    "IBM",
    "Oracle",
    "Salesforce",
    "Adobe",
    "PayPal",
    "Uber",
    "Airbnb",
    "Twitter",
    "Snapchat",
    "Spotify",
    "Disney",
    "Walmart",
    "Target",
    "Costco",
    "Nike",
    "Coca-Cola",
    "Pepsi",
    "McDonald's",
    "Starbucks",
];

/// Configuration for the conversation pipeline and its snapshot files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding the transcript and snapshot files
    pub data_dir: PathBuf,

    /// Transcript file name inside `data_dir`
    pub conversation_file: String,

    /// Snapshot file the periodic pipeline writes
    pub stock_snapshot_file: String,

    /// Snapshot file the one-shot customer builder writes
    pub customer_snapshot_file: String,

    /// Static customer record file
    pub customer_file: String,

    /// Delay between the end of one tick and the start of the next
    pub tick_interval: Duration,

    /// Ordered company vocabulary the extractor matches against
    pub vocabulary: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            conversation_file: "conversation.txt".to_string(),
            stock_snapshot_file: "mentioned_stock.json".to_string(),
            customer_snapshot_file: "customer_stocks.json".to_string(),
            customer_file: "customer.json".to_string(),
            tick_interval: Duration::from_secs(5),
            vocabulary: DEFAULT_COMPANY_VOCABULARY
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval.is_zero() {
            return Err(PipelineError::Config(
                "tick interval must be non-zero".to_string(),
            ));
        }

        for (label, name) in [
            ("conversation_file", &self.conversation_file),
            ("stock_snapshot_file", &self.stock_snapshot_file),
            ("customer_snapshot_file", &self.customer_snapshot_file),
            ("customer_file", &self.customer_file),
        ] {
            if name.is_empty() {
                return Err(PipelineError::Config(format!("{label} must not be empty")));
            }
        }

        Ok(())
    }

    /// Load the vocabulary from a JSON file holding an array of strings
    pub fn load_vocabulary(path: &Path) -> Result<Vec<String>> {
        let raw = std::fs::read(path)?;
        Ok(serde_json::from_slice(&raw)?)
    }

    /// Path of the transcript file
    pub fn conversation_path(&self) -> PathBuf {
        self.data_dir.join(&self.conversation_file)
    }

    /// Path of the mentioned-stock snapshot
    pub fn stock_snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.stock_snapshot_file)
    }

    /// Path of the customer-stocks snapshot
    pub fn customer_snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.customer_snapshot_file)
    }

    /// Path of the static customer record file
    pub fn customer_path(&self) -> PathBuf {
        self.data_dir.join(&self.customer_file)
    }
}

/// Builder for PipelineConfig
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    data_dir: Option<PathBuf>,
    conversation_file: Option<String>,
    stock_snapshot_file: Option<String>,
    customer_snapshot_file: Option<String>,
    customer_file: Option<String>,
    tick_interval: Option<Duration>,
    vocabulary: Option<Vec<String>>,
}

impl PipelineConfigBuilder {
    /// Set the data directory
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Set the transcript file name
    pub fn conversation_file(mut self, name: impl Into<String>) -> Self {
        self.conversation_file = Some(name.into());
        self
    }

    /// Set the mentioned-stock snapshot file name
    pub fn stock_snapshot_file(mut self, name: impl Into<String>) -> Self {
        self.stock_snapshot_file = Some(name.into());
        self
    }

    /// Set the customer-stocks snapshot file name
    pub fn customer_snapshot_file(mut self, name: impl Into<String>) -> Self {
        self.customer_snapshot_file = Some(name.into());
        self
    }

    /// Set the customer record file name
    pub fn customer_file(mut self, name: impl Into<String>) -> Self {
        self.customer_file = Some(name.into());
        self
    }

    /// Set the inter-tick interval
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = Some(interval);
        self
    }

    /// Set the company vocabulary
    pub fn vocabulary(mut self, vocabulary: Vec<String>) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    /// Load the company vocabulary from a JSON file
    pub fn vocabulary_file(mut self, path: &Path) -> Result<Self> {
        self.vocabulary = Some(PipelineConfig::load_vocabulary(path)?);
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<PipelineConfig> {
        let defaults = PipelineConfig::default();

        let config = PipelineConfig {
            data_dir: self.data_dir.unwrap_or(defaults.data_dir),
            conversation_file: self.conversation_file.unwrap_or(defaults.conversation_file),
            stock_snapshot_file: self
                .stock_snapshot_file
                .unwrap_or(defaults.stock_snapshot_file),
            customer_snapshot_file: self
                .customer_snapshot_file
                .unwrap_or(defaults.customer_snapshot_file),
            customer_file: self.customer_file.unwrap_or(defaults.customer_file),
            tick_interval: self.tick_interval.unwrap_or(defaults.tick_interval),
            vocabulary: self.vocabulary.unwrap_or(defaults.vocabulary),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.tick_interval, Duration::from_secs(5));
        assert_eq!(config.vocabulary.len(), DEFAULT_COMPANY_VOCABULARY.len());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = PipelineConfig::builder()
            .data_dir("/tmp/finsight")
            .tick_interval(Duration::from_secs(1))
            .vocabulary(vec!["Apple".to_string()])
            .build()
            .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/finsight"));
        assert_eq!(config.vocabulary, vec!["Apple".to_string()]);
        assert_eq!(
            config.conversation_path(),
            PathBuf::from("/tmp/finsight/conversation.txt")
        );
    }

    #[test]
    fn test_validation_rejects_zero_interval() {
        let result = PipelineConfig::builder()
            .tick_interval(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_empty_file_name() {
        let result = PipelineConfig::builder().conversation_file("").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_vocabulary_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["Apple", "Nestle"]"#).unwrap();

        let config = PipelineConfig::builder()
            .vocabulary_file(file.path())
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            config.vocabulary,
            vec!["Apple".to_string(), "Nestle".to_string()]
        );
    }
}
