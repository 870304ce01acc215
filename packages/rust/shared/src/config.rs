//! Application configuration for docbinder.
//!
//! User config lives at `~/.docbinder/docbinder.toml`.
//! A `--config` path overrides the default location; missing fields fall back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocbinderError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "docbinder.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".docbinder";

// ---------------------------------------------------------------------------
// Config structs (matching docbinder.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// External converter programs.
    #[serde(default)]
    pub converters: ConvertersConfig,

    /// HTML-to-PDF rendering options.
    #[serde(default)]
    pub pdf: PdfConfig,

    /// Scratch directory placement for the pre-render pipelines.
    #[serde(default)]
    pub scratch: ScratchConfig,
}

/// `[converters]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertersConfig {
    /// Markdown-to-HTML converter program.
    #[serde(default = "default_pandoc")]
    pub pandoc: String,

    /// Extra arguments appended to every pandoc invocation.
    #[serde(default)]
    pub pandoc_args: Vec<String>,

    /// HTML-to-PDF renderer program.
    #[serde(default = "default_wkhtmltopdf")]
    pub wkhtmltopdf: String,
}

impl Default for ConvertersConfig {
    fn default() -> Self {
        Self {
            pandoc: default_pandoc(),
            pandoc_args: Vec::new(),
            wkhtmltopdf: default_wkhtmltopdf(),
        }
    }
}

fn default_pandoc() -> String {
    "pandoc".into()
}
fn default_wkhtmltopdf() -> String {
    "wkhtmltopdf".into()
}

/// `[pdf]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfConfig {
    /// Allow the renderer to read local files (images, stylesheets).
    #[serde(default = "default_true")]
    pub enable_local_file_access: bool,

    /// Handling of page load errors: "abort", "ignore" or "skip".
    #[serde(default = "default_error_handling")]
    pub load_error_handling: String,

    /// Handling of media load errors: "abort", "ignore" or "skip".
    #[serde(default = "default_error_handling")]
    pub load_media_error_handling: String,

    /// Load images.
    #[serde(default = "default_true")]
    pub images: bool,

    /// Extra arguments passed before the input and output paths.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            enable_local_file_access: true,
            load_error_handling: default_error_handling(),
            load_media_error_handling: default_error_handling(),
            images: true,
            extra_args: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_error_handling() -> String {
    "skip".into()
}

/// `[scratch]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScratchConfig {
    /// Parent directory for per-run scratch directories (system temp dir when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.docbinder/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DocbinderError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.docbinder/docbinder.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocbinderError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        DocbinderError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DocbinderError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    write_default_config(&path)?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Serialize the default config to `path`, overwriting any existing file.
pub fn write_default_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| DocbinderError::config(e.to_string()))?;
    std::fs::write(path, content).map_err(|e| DocbinderError::io(path, e))
}
