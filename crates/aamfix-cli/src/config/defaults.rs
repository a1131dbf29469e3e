use crate::output::OutputFormat;
use aamfix::engine::config::DEFAULT_AUGMENTATION_DEPTH;

pub struct DefaultsConfig {
    pub augmentation_depth: usize,
    pub strict_product_pairing: bool,
    pub format: OutputFormat,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            augmentation_depth: DEFAULT_AUGMENTATION_DEPTH,
            strict_product_pairing: true,
            format: OutputFormat::Text,
        }
    }
}
