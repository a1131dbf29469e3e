use crate::output::OutputFormat;
use aamfix::engine::config::ExtractionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub extraction: ExtractionConfig,
    pub format: OutputFormat,
}
