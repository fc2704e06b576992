//! Configuration system for scribe.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use scribe_extractors::{
    DocumentExtractionConfig, DEFAULT_MIN_DIRECT_TEXT_CHARS, DEFAULT_RASTER_SCALE,
};

use crate::error::{ScribeError, ScribeResult};
use crate::traits::{DocumentStoreConfig, DocumentStoreProvider, EmbedderConfig, EmbedderProvider};

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Origins allowed by CORS; empty allows any origin.
    pub cors_origins: Vec<String>,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["http://localhost:3000".to_string()],
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

/// Extraction tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Pages whose trimmed text layer is longer than this skip OCR.
    pub min_direct_text_chars: usize,
    /// Linear scale used when rasterizing pages for OCR.
    pub raster_scale: f32,
    /// Root for per-request scratch directories; the system temp dir when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,
    /// Directory holding the PDFium shared library; the system library when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdfium_library_dir: Option<PathBuf>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_direct_text_chars: DEFAULT_MIN_DIRECT_TEXT_CHARS,
            raster_scale: DEFAULT_RASTER_SCALE,
            scratch_dir: None,
            pdfium_library_dir: None,
        }
    }
}

impl ExtractionConfig {
    /// Settings for the document extractor.
    pub fn document_config(&self) -> DocumentExtractionConfig {
        DocumentExtractionConfig {
            min_direct_text_chars: self.min_direct_text_chars,
            raster_scale: self.raster_scale,
            scratch_dir: self.scratch_dir.clone(),
        }
    }
}

/// Main scribe configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScribeConfig {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Extraction configuration.
    pub extraction: ExtractionConfig,
    /// Embedding model configuration.
    pub embedding: EmbedderConfig,
    /// Document store configuration.
    pub store: DocumentStoreConfig,
}

impl ScribeConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ScribeResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        let config: Self = match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| ScribeError::Configuration(e.to_string()))?
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| ScribeError::Configuration(e.to_string()))?,
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| ScribeError::Configuration(e.to_string()))?,
            _ => {
                return Err(ScribeError::Configuration(
                    "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
                ))
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> ScribeResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from a variable lookup (`from_env` uses the process environment).
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> ScribeResult<Self> {
        let mut config = Self::default();

        // Server configuration
        if let Some(host) = var("SCRIBE_HOST") {
            config.server.host = host;
        }
        if let Some(port) = var("SCRIBE_PORT").or_else(|| var("BACKEND_PORT")) {
            config.server.port = parse_var("SCRIBE_PORT", &port)?;
        }
        if let Some(origins) = var("SCRIBE_CORS_ORIGINS") {
            config.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(limit) = var("SCRIBE_MAX_UPLOAD_BYTES") {
            config.server.max_upload_bytes = parse_var("SCRIBE_MAX_UPLOAD_BYTES", &limit)?;
        }

        // Extraction configuration
        if let Some(chars) = var("SCRIBE_MIN_DIRECT_TEXT_CHARS") {
            config.extraction.min_direct_text_chars =
                parse_var("SCRIBE_MIN_DIRECT_TEXT_CHARS", &chars)?;
        }
        if let Some(scale) = var("SCRIBE_RASTER_SCALE") {
            config.extraction.raster_scale = parse_var("SCRIBE_RASTER_SCALE", &scale)?;
        }
        if let Some(dir) = var("SCRIBE_SCRATCH_DIR") {
            config.extraction.scratch_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = var("SCRIBE_PDFIUM_DIR") {
            config.extraction.pdfium_library_dir = Some(PathBuf::from(dir));
        }

        // Embedding configuration
        if let Some(provider) = var("SCRIBE_EMBEDDING_PROVIDER") {
            config.embedding.provider = match provider.to_lowercase().as_str() {
                "ollama" => EmbedderProvider::Ollama,
                "none" | "" => EmbedderProvider::None,
                other => {
                    return Err(ScribeError::Configuration(format!(
                        "Unknown embedding provider: {}",
                        other
                    )))
                }
            };
        }
        if let Some(model) = var("SCRIBE_EMBEDDING_MODEL") {
            config.embedding.model = model;
        }
        if let Some(url) = var("SCRIBE_EMBEDDING_URL") {
            config.embedding.base_url = Some(url);
        }

        // Store configuration; a bare MONGODB_URI also enables MongoDB
        if let Some(uri) = var("MONGODB_URI").filter(|u| !u.is_empty()) {
            config.store.provider = DocumentStoreProvider::MongoDB;
            config.store.url = uri;
        }
        if let Some(provider) = var("SCRIBE_STORE_PROVIDER") {
            config.store.provider = match provider.to_lowercase().as_str() {
                "mongodb" | "mongo" => DocumentStoreProvider::MongoDB,
                "memory" => DocumentStoreProvider::Memory,
                "none" | "" => DocumentStoreProvider::None,
                other => {
                    return Err(ScribeError::Configuration(format!(
                        "Unknown store provider: {}",
                        other
                    )))
                }
            };
        }
        if let Some(url) = var("SCRIBE_STORE_URL") {
            config.store.url = url;
        }
        if let Some(database) = var("SCRIBE_STORE_DATABASE") {
            config.store.database = database;
        }
        if let Some(collection) = var("SCRIBE_STORE_COLLECTION") {
            config.store.collection = collection;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings no component can work with.
    pub fn validate(&self) -> ScribeResult<()> {
        if !(self.extraction.raster_scale > 0.0) {
            return Err(ScribeError::Configuration(format!(
                "raster_scale must be positive, got {}",
                self.extraction.raster_scale
            )));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(ScribeError::Configuration(
                "max_upload_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> ScribeConfigBuilder {
        ScribeConfigBuilder::default()
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> ScribeResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ScribeError::Configuration(format!("Invalid {}='{}': {}", key, value, e)))
}

/// Builder for ScribeConfig.
#[derive(Default)]
pub struct ScribeConfigBuilder {
    config: ScribeConfig,
}

impl ScribeConfigBuilder {
    /// Set server configuration.
    pub fn server(mut self, config: ServerConfig) -> Self {
        self.config.server = config;
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    /// Set extraction configuration.
    pub fn extraction(mut self, config: ExtractionConfig) -> Self {
        self.config.extraction = config;
        self
    }

    /// Set embedding configuration.
    pub fn embedding(mut self, config: EmbedderConfig) -> Self {
        self.config.embedding = config;
        self
    }

    /// Set document store configuration.
    pub fn store(mut self, config: DocumentStoreConfig) -> Self {
        self.config.store = config;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ScribeResult<ScribeConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
