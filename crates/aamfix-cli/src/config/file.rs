use crate::error::{CliError, Result};
use crate::output::OutputFormat;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileExtractionConfig {
    #[serde(rename = "augmentation-depth")]
    pub augmentation_depth: Option<usize>,
    #[serde(rename = "strict-product-pairing")]
    pub strict_product_pairing: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileOutputConfig {
    pub format: Option<OutputFormat>,
}

/// Shape of an `aamfix` TOML configuration file. Every key is optional.
///
/// ```toml
/// [extraction]
/// augmentation-depth = 2
/// strict-product-pairing = false
///
/// [output]
/// format = "json"
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub extraction: Option<FileExtractionConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
