//! Configuration for the outline service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming a TOML config file
pub const CONFIG_PATH_ENV: &str = "ARTICLE_OUTLINE_CONFIG";
/// Environment override for the bind host
pub const HOST_ENV: &str = "ARTICLE_OUTLINE_HOST";
/// Environment override for the bind port
pub const PORT_ENV: &str = "ARTICLE_OUTLINE_PORT";

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutlineConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Header/point classification thresholds
    #[serde(default)]
    pub heuristics: HeuristicsConfig,
    /// Sentence boundary model
    #[serde(default)]
    pub sentence_model: SentenceModelConfig,
    /// Batch processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,
}

impl OutlineConfig {
    /// Load configuration.
    ///
    /// Resolution order for the file: `path`, then `$ARTICLE_OUTLINE_CONFIG`,
    /// then `<config dir>/article-outline/config.toml` if it exists. Without a
    /// file the defaults are used. Host/port environment overrides are applied
    /// last and the result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&raw)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var(HOST_ENV) {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var(PORT_ENV) {
            self.server.port = port
                .parse()
                .map_err(|e| Error::config(format!("Invalid {}: {}", PORT_ENV, e)))?;
        }
        Ok(())
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        self.heuristics.validate()?;
        if self.processing.document_timeout_secs == 0 {
            return Err(Error::config("processing.document_timeout_secs must be > 0"));
        }
        if self.processing.parallel_documents == Some(0) {
            return Err(Error::config("processing.parallel_documents must be > 0"));
        }
        if self.server.max_upload_size == 0 {
            return Err(Error::config("server.max_upload_size must be > 0"));
        }
        Ok(())
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("article-outline").join("config.toml"))
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 16MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            enable_cors: true,
            max_upload_size: 16 * 1024 * 1024, // 16MB
        }
    }
}

/// Structural thresholds of the extraction heuristics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicsConfig {
    /// A header has at most this many words
    pub max_header_words: usize,
    /// A header has strictly fewer characters than this
    pub max_header_chars: usize,
    /// Body lines shorter than this are residue
    pub min_line_chars: usize,
    /// A point needs strictly more words than this
    pub min_point_words: usize,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            max_header_words: 5,
            max_header_chars: 50,
            min_line_chars: 10,
            min_point_words: 3,
        }
    }
}

impl HeuristicsConfig {
    /// Thresholds must be non-zero
    pub fn validate(&self) -> Result<()> {
        if self.max_header_words == 0 {
            return Err(Error::config("heuristics.max_header_words must be > 0"));
        }
        if self.max_header_chars == 0 {
            return Err(Error::config("heuristics.max_header_chars must be > 0"));
        }
        Ok(())
    }
}

/// Sentence boundary model configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentenceModelConfig {
    /// Model identifier (default: english)
    pub model: String,
    /// Optional file with extra abbreviations, one per line
    pub abbreviations_path: Option<PathBuf>,
}

impl Default for SentenceModelConfig {
    fn default() -> Self {
        Self {
            model: "english".to_string(),
            abbreviations_path: None,
        }
    }
}

/// Batch processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Deadline for a single document in seconds (default: 30)
    pub document_timeout_secs: u64,
    /// Number of documents processed concurrently (default: CPU count, max 8)
    pub parallel_documents: Option<usize>,
    /// Accepted upload extensions, lowercase without the dot
    pub allowed_extensions: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            document_timeout_secs: 30,
            parallel_documents: None, // Auto-detect from CPU count
            allowed_extensions: vec!["txt".to_string()],
        }
    }
}

impl ProcessingConfig {
    /// Effective concurrency for batch processing
    pub fn parallelism(&self) -> usize {
        self.parallel_documents
            .unwrap_or_else(|| num_cpus::get().min(8))
            .max(1)
    }

    /// Whether a filename has an accepted extension
    pub fn accepts(&self, filename: &str) -> bool {
        let Some((_, ext)) = filename.rsplit_once('.') else {
            return false;
        };
        let ext = ext.to_lowercase();
        self.allowed_extensions.iter().any(|allowed| *allowed == ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = OutlineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.heuristics.max_header_words, 5);
        assert_eq!(config.heuristics.max_header_chars, 50);
        assert_eq!(config.heuristics.min_line_chars, 10);
        assert_eq!(config.heuristics.min_point_words, 3);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 8088\n\n[heuristics]\nmax_header_words = 7").unwrap();

        let config = OutlineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.heuristics.max_header_words, 7);
        assert_eq!(config.heuristics.max_header_chars, 50);
        assert_eq!(config.sentence_model.model, "english");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = OutlineConfig::from_file(Path::new("/nonexistent/outline.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        assert!(matches!(
            OutlineConfig::from_file(file.path()),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn test_zero_thresholds_rejected() {
        let mut config = OutlineConfig::default();
        config.heuristics.max_header_words = 0;
        assert!(config.validate().is_err());

        let mut config = OutlineConfig::default();
        config.processing.parallel_documents = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extension_filter() {
        let processing = ProcessingConfig::default();
        assert!(processing.accepts("article.txt"));
        assert!(processing.accepts("ARTICLE.TXT"));
        assert!(!processing.accepts("article.pdf"));
        assert!(!processing.accepts("txt"));
        assert!(!processing.accepts(""));
    }
}
