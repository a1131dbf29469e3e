use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::ExtractionArgs;
use crate::error::{CliError, Result};
use crate::output::OutputFormat;
use aamfix::engine::config::ExtractionConfigBuilder;
use clap::ValueEnum;

pub fn build_config(args: &ExtractionArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let extraction_file = file_config.extraction.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();

    let augmentation_depth = args
        .depth
        .or(extraction_file.augmentation_depth)
        .unwrap_or(defaults.augmentation_depth);
    let strict_product_pairing = if args.lenient_products {
        false
    } else {
        extraction_file
            .strict_product_pairing
            .unwrap_or(defaults.strict_product_pairing)
    };

    let extraction = ExtractionConfigBuilder::new()
        .augmentation_depth(augmentation_depth)
        .strict_product_pairing(strict_product_pairing)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let format = args
        .format
        .or(output_file.format)
        .unwrap_or(defaults.format);

    Ok(AppConfig { extraction, format })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "extraction.augmentation-depth" => {
                config
                    .extraction
                    .get_or_insert_with(Default::default)
                    .augmentation_depth = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
                })?);
            }
            "extraction.strict-product-pairing" => {
                config
                    .extraction
                    .get_or_insert_with(Default::default)
                    .strict_product_pairing = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid boolean value for {}: {}", key, value_str))
                })?);
            }
            "output.format" => {
                config.output.get_or_insert_with(Default::default).format =
                    Some(<OutputFormat as ValueEnum>::from_str(value_str, true).map_err(|_| {
                        CliError::Config(format!("Invalid format for {}: {}", key, value_str))
                    })?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
