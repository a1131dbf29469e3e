use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "aamfix - correct atom-to-atom mappings of chemical reactions and learn remapping rules from the corrections.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the canonical form, reaction center and atom sets of a mapped reaction.
    Inspect(InspectArgs),
    /// Apply reviewer-entered atom pairs to the products of a mapped reaction.
    Fix(FixArgs),
    /// Correct a reaction from atom pairs and learn the remapping rule of the correction.
    Rule(RuleArgs),
    /// Learn remapping rules from explicit bad/good mappings of the same reaction.
    Extract(ExtractArgs),
}

/// Where a single mapped reaction is read from.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ReactionInput {
    /// Mapped reaction SMILES, e.g. '[CH3:1][OH:2]>>[CH2:1]=[O:2]'.
    #[arg(short, long, value_name = "SMILES")]
    pub reaction: Option<String>,

    /// File whose first non-empty, non-comment line is a mapped reaction SMILES.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,
}

/// Options that shape rule extraction.
#[derive(Args, Debug, Clone, Default)]
pub struct ExtractionArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of bonds by which reaction centers are widened.
    #[arg(short, long, value_name = "INT")]
    pub depth: Option<usize>,

    /// Pair product molecules positionally without checking that they match.
    #[arg(long)]
    pub lenient_products: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S extraction.augmentation-depth=2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,

    /// Output format; defaults to the config file value, then to text.
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the result to a file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub reaction: ReactionInput,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the `fix` subcommand.
#[derive(Args, Debug)]
pub struct FixArgs {
    #[command(flatten)]
    pub reaction: ReactionInput,

    /// Atom pair 'BAD:GOOD' entered by the reviewer. Repeat in entry order.
    #[arg(short, long = "pair", value_name = "BAD:GOOD")]
    pub pairs: Vec<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the `rule` subcommand.
#[derive(Args, Debug)]
pub struct RuleArgs {
    #[command(flatten)]
    pub reaction: ReactionInput,

    /// Atom pair 'BAD:GOOD' entered by the reviewer. Repeat in entry order.
    #[arg(short, long = "pair", value_name = "BAD:GOOD", required = true)]
    pub pairs: Vec<String>,

    #[command(flatten)]
    pub extraction: ExtractionArgs,
}

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Reaction SMILES carrying the erroneous mapping.
    #[arg(long, value_name = "SMILES", requires = "good", conflicts_with = "batch")]
    pub bad: Option<String>,

    /// Reaction SMILES carrying the corrected mapping.
    #[arg(long, value_name = "SMILES", requires = "bad")]
    pub good: Option<String>,

    /// Tab-separated file with one 'BAD<TAB>GOOD' reaction pair per line.
    #[arg(short, long, value_name = "PATH", required_unless_present = "bad")]
    pub batch: Option<PathBuf>,

    #[command(flatten)]
    pub extraction: ExtractionArgs,
}
