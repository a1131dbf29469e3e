use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_AUGMENTATION_DEPTH: usize = 1;
pub const MAX_AUGMENTATION_DEPTH: usize = 8;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Augmentation depth {0} exceeds the maximum of {MAX_AUGMENTATION_DEPTH}")]
    DepthOutOfRange(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractionConfig {
    /// Number of bonds by which reaction centers are widened before projection.
    pub augmentation_depth: usize,
    /// Require product molecules of both mappings to correspond position by
    /// position; when off, products are paired by position unchecked.
    pub strict_product_pairing: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            augmentation_depth: DEFAULT_AUGMENTATION_DEPTH,
            strict_product_pairing: true,
        }
    }
}

#[derive(Default)]
pub struct ExtractionConfigBuilder {
    augmentation_depth: Option<usize>,
    strict_product_pairing: Option<bool>,
}

impl ExtractionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn augmentation_depth(mut self, depth: usize) -> Self {
        self.augmentation_depth = Some(depth);
        self
    }
    pub fn strict_product_pairing(mut self, strict: bool) -> Self {
        self.strict_product_pairing = Some(strict);
        self
    }

    pub fn build(self) -> Result<ExtractionConfig, ConfigError> {
        let defaults = ExtractionConfig::default();
        let augmentation_depth = self
            .augmentation_depth
            .unwrap_or(defaults.augmentation_depth);
        if augmentation_depth > MAX_AUGMENTATION_DEPTH {
            return Err(ConfigError::DepthOutOfRange(augmentation_depth));
        }
        Ok(ExtractionConfig {
            augmentation_depth,
            strict_product_pairing: self
                .strict_product_pairing
                .unwrap_or(defaults.strict_product_pairing),
        })
    }
}
