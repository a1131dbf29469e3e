use crate::cli::FixArgs;
use crate::error::{CliError, Result};
use crate::output;
use crate::utils::{input, parser};
use aamfix::workflows::review::correct_mapping;
use tracing::info;

pub fn run(args: FixArgs) -> Result<()> {
    let reaction = input::read_reaction(&args.reaction)?;
    let (bad, good) =
        parser::parse_pairs(&args.pairs).map_err(|e| CliError::Argument(e.to_string()))?;

    info!("Applying {} reviewer pair(s) to the product mapping.", bad.len());
    let correction = correct_mapping(&reaction, &bad, &good)?;

    output::emit(&output::render_correction(&correction, args.format)?, None)
}
