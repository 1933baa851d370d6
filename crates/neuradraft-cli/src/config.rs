//! Configuration settings
//!
//! Loaded from `neuradraft.toml`. Every table is optional.
//!
//! ```toml
//! [provider]
//! model = "gemini-2.5-flash"
//! api_key_env = "GEMINI_API_KEY"
//! temperature = 0.7
//!
//! [output]
//! directory = "drafts"
//! formats = ["pdf", "docx"]
//!
//! [pdf]
//! fonts = ["fonts/DejaVuSans.ttf"]
//!
//! [docx]
//! template = "corporate.dotx"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use neuradraft_ast::OutputFormat;
use serde::{Deserialize, Serialize};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "neuradraft.toml";

/// Models known to work with the generateContent endpoint
pub const KNOWN_MODELS: &[&str] = &["gemini-pro", "gemini-pro-vision", "gemini-2.5-flash"];

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub provider: ProviderSettings,
    pub output: OutputSettings,
    pub pdf: PdfSettings,
    pub docx: DocxSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load settings from `path`, or from `neuradraft.toml` in the working
    /// directory when present, or fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let local = PathBuf::from(CONFIG_FILE_NAME);
                if !local.exists() {
                    tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                    return Ok(Self::default());
                }
                local
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let settings = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        settings.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(settings)
    }

    /// Reject settings that cannot work
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            anyhow::bail!(
                "provider.temperature must be between 0.0 and 2.0, got {}",
                self.provider.temperature
            );
        }
        if self.provider.timeout_secs == 0 {
            anyhow::bail!("provider.timeout_secs must be positive");
        }
        if self.output.formats.is_empty() {
            anyhow::bail!("output.formats must name at least one format");
        }
        if !KNOWN_MODELS.contains(&self.provider.model.as_str()) {
            tracing::warn!("Unknown model '{}', sending it anyway", self.provider.model);
        }
        Ok(())
    }
}

/// Model provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderSettings {
    /// Model name
    pub model: String,
    /// Base URL of the generative language API
    pub endpoint: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            temperature: 0.7,
            timeout_secs: 120,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory receiving rendered files
    pub directory: PathBuf,
    /// Formats to render, in order
    pub formats: Vec<OutputFormat>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            formats: OutputFormat::all().to_vec(),
        }
    }
}

/// PDF configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PdfSettings {
    /// Font files to embed
    pub fonts: Vec<PathBuf>,
}

/// DOCX configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DocxSettings {
    /// Word template supplying styles and page setup
    pub template: Option<PathBuf>,
}
