use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Archive configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ArchiveConfig {
    /// Directory holding one markdown file per recipe
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    /// File extension (without the dot) recognized as a recipe
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            extension: default_extension(),
        }
    }
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content").join("recipes")
}

fn default_extension() -> String {
    "md".to_string()
}

impl ArchiveConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPES__ prefix
    /// 2. recipes.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPES__CONTENT_DIR
    pub fn load() -> Result<Self, ConfigError> {
        load_config("recipes")
    }
}

/// Load configuration from the named file (extension optional) and the environment
pub fn load_config(file_name: &str) -> Result<ArchiveConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(file_name).required(false))
        .add_source(
            Environment::with_prefix("RECIPES")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}
