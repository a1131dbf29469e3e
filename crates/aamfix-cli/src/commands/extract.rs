use crate::cli::ExtractArgs;
use crate::config::{AppConfig, build_config};
use crate::error::{CliError, Result};
use crate::output;
use crate::utils::input;
use crate::utils::progress::CliProgressHandler;
use aamfix::core::io::smiles::parse_reaction;
use aamfix::engine::extractor::RuleExtractor;
use aamfix::engine::progress::ProgressReporter;
use aamfix::workflows::review::extract_rules;
use std::path::Path;
use tracing::info;

pub fn run(args: ExtractArgs) -> Result<()> {
    let config = build_config(&args.extraction)?;

    let rendered = match (&args.batch, &args.bad, &args.good) {
        (Some(batch), _, _) => run_batch(batch, &config)?,
        (None, Some(bad), Some(good)) => {
            let bad = parse_reaction(bad)?;
            let good = parse_reaction(good)?;
            info!("Extracting a rule from one reaction pair.");
            let rule = RuleExtractor::new(config.extraction).extract(&bad, &good)?;
            output::render_rule(&rule, None, config.format)?
        }
        _ => {
            return Err(CliError::Argument(
                "Provide either --batch or both --bad and --good.".to_string(),
            ));
        }
    };

    output::emit(&rendered, args.extraction.output.as_deref())
}

fn run_batch(path: &Path, config: &AppConfig) -> Result<String> {
    let pairs = input::read_batch(path)?;
    info!("Loaded {} reaction pair(s) from {:?}", pairs.len(), path);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let rules = extract_rules(&pairs, &config.extraction, &reporter)?;

    output::render_rules(&rules, config.format)
}
