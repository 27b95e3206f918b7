use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Settings for the `recipe-box` command line tool
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Where recipe files live
    #[serde(default)]
    pub library: LibraryConfig,
    /// Web page import behaviour
    #[serde(default)]
    pub import: ImportConfig,
}

/// Configuration for the recipe folder
#[derive(Debug, Deserialize, Clone)]
pub struct LibraryConfig {
    /// Folder scanned by `recipe-box list`
    #[serde(default = "default_library_dir")]
    pub dir: PathBuf,
    /// File extension of recipe files, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            dir: default_library_dir(),
            extension: default_extension(),
        }
    }
}

/// Configuration for JSON-LD imports
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Text of the step that collects every imported ingredient
    #[serde(default = "default_gather_step")]
    pub gather_step: String,
    /// Largest denominator used when turning decimals into fractions
    #[serde(default = "default_max_denominator")]
    pub max_denominator: u32,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            gather_step: default_gather_step(),
            max_denominator: default_max_denominator(),
        }
    }
}

// Default value functions
fn default_library_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_extension() -> String {
    "txt".to_string()
}

fn default_gather_step() -> String {
    "Gather all ingredients".to_string()
}

fn default_max_denominator() -> u32 {
    16
}

impl Settings {
    /// Load settings from file and environment variables
    ///
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_BOX__ prefix
    /// 2. recipe-box.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_BOX__LIBRARY__DIR
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("recipe-box").required(false))
            // Use double underscore for nested: RECIPE_BOX__IMPORT__MAX_DENOMINATOR
            .add_source(
                Environment::with_prefix("RECIPE_BOX")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
