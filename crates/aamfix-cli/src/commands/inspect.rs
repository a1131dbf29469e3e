use crate::cli::InspectArgs;
use crate::error::Result;
use crate::output::{self, Inspection};
use crate::utils::input;
use aamfix::core::cgr::condense;
use aamfix::engine::error::RuleError;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    let reaction = input::read_reaction(&args.reaction)?;
    let graph = condense(&reaction).map_err(RuleError::from)?;

    let reactant_atoms = reaction.reactant_atoms();
    let product_atoms = reaction.product_atoms();
    let inspection = Inspection {
        reaction: reaction.to_string(),
        canonical_form: reaction.canonical_form(),
        center_atoms: graph.center_atoms(),
        unmapped_reactant_atoms: reactant_atoms.difference(&product_atoms).copied().collect(),
        unmapped_product_atoms: product_atoms.difference(&reactant_atoms).copied().collect(),
        reactant_atoms,
        product_atoms,
    };
    info!(
        center = inspection.center_atoms.len(),
        "Inspected reaction with {} mapped atoms.",
        graph.atom_count()
    );

    output::emit(&output::render_inspection(&inspection, args.format)?, None)
}
