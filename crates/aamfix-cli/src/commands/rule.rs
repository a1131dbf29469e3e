use crate::cli::RuleArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::output;
use crate::utils::{input, parser};
use aamfix::workflows::review::generate_rule;
use tracing::{info, warn};

pub fn run(args: RuleArgs) -> Result<()> {
    let config = build_config(&args.extraction)?;
    let reaction = input::read_reaction(&args.reaction)?;
    let (bad, good) =
        parser::parse_pairs(&args.pairs).map_err(|e| CliError::Argument(e.to_string()))?;

    info!(
        depth = config.extraction.augmentation_depth,
        "Learning a rule from {} reviewer pair(s).",
        bad.len()
    );
    let outcome = generate_rule(&reaction, &bad, &good, &config.extraction)?;
    if outcome.rule.is_noop() {
        warn!("The correction does not change the mapping; the rule is empty.");
    }

    let rendered = output::render_rule(&outcome.rule, Some(&outcome.correction), config.format)?;
    output::emit(&rendered, args.extraction.output.as_deref())
}
