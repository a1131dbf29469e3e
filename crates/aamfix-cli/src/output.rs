use crate::error::Result;
use aamfix::core::models::atom::AtomIndex;
use aamfix::engine::rule::{Remap, Rule};
use aamfix::workflows::review::Correction;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Summary of a mapped reaction as printed by `inspect`.
#[derive(Debug, Serialize)]
pub struct Inspection {
    pub reaction: String,
    pub canonical_form: String,
    pub center_atoms: BTreeSet<AtomIndex>,
    pub reactant_atoms: BTreeSet<AtomIndex>,
    pub product_atoms: BTreeSet<AtomIndex>,
    /// Reactant atoms that do not reappear among the products.
    pub unmapped_reactant_atoms: BTreeSet<AtomIndex>,
    /// Product atoms without a reactant counterpart.
    pub unmapped_product_atoms: BTreeSet<AtomIndex>,
}

#[derive(Serialize)]
struct CorrectionView<'a> {
    remap: &'a Remap,
    reaction: String,
}

#[derive(Serialize)]
struct RuleView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    corrected_reaction: Option<String>,
    #[serde(flatten)]
    rule: &'a Rule,
}

fn join_indices<'a>(indices: impl IntoIterator<Item = &'a AtomIndex>) -> String {
    let parts: Vec<String> = indices.into_iter().map(ToString::to_string).collect();
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(", ")
    }
}

fn join_remap(remap: &Remap) -> String {
    if remap.is_empty() {
        return "-".to_string();
    }
    remap
        .iter()
        .map(|(from, to)| format!("{from}->{to}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_inspection(inspection: &Inspection, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(inspection)?),
        OutputFormat::Text => {
            let mut out = String::new();
            let _ = writeln!(out, "reaction:          {}", inspection.reaction);
            let _ = writeln!(out, "canonical form:    {}", inspection.canonical_form);
            let _ = writeln!(out, "center atoms:      {}", join_indices(&inspection.center_atoms));
            let _ = writeln!(out, "reactant atoms:    {}", join_indices(&inspection.reactant_atoms));
            let _ = writeln!(out, "product atoms:     {}", join_indices(&inspection.product_atoms));
            let _ = writeln!(
                out,
                "reactant-only:     {}",
                join_indices(&inspection.unmapped_reactant_atoms)
            );
            let _ = write!(
                out,
                "product-only:      {}",
                join_indices(&inspection.unmapped_product_atoms)
            );
            Ok(out)
        }
    }
}

pub fn render_correction(correction: &Correction, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&CorrectionView {
            remap: &correction.remap,
            reaction: correction.reaction.to_string(),
        })?),
        OutputFormat::Text => Ok(correction.reaction.to_string()),
    }
}

fn rule_text(rule: &Rule) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "bad query:  {}", rule.bad_query());
    let _ = writeln!(out, "good query: {}", rule.good_query());
    let _ = writeln!(out, "remap:      {}", join_remap(rule.remap()));
    let _ = writeln!(out, "valid:      {}", join_indices(rule.valid_atoms()));
    let _ = writeln!(out, "relevant:   {}", join_indices(rule.relevant_atoms()));
    let _ = write!(out, "strange:    {}", join_indices(rule.strange_atoms()));
    out
}

/// Renders one rule, optionally preceded by the corrected reaction it was
/// learned from.
pub fn render_rule(
    rule: &Rule,
    corrected: Option<&Correction>,
    format: OutputFormat,
) -> Result<String> {
    let corrected_reaction = corrected.map(|c| c.reaction.to_string());
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&RuleView {
            corrected_reaction,
            rule,
        })?),
        OutputFormat::Text => {
            let mut out = String::new();
            if let Some(reaction) = corrected_reaction {
                let _ = writeln!(out, "corrected:  {reaction}");
            }
            out.push_str(&rule_text(rule));
            Ok(out)
        }
    }
}

pub fn render_rules(rules: &[Rule], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rules)?),
        OutputFormat::Text => Ok(rules
            .iter()
            .enumerate()
            .map(|(i, rule)| format!("# rule {}\n{}", i + 1, rule_text(rule)))
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}

/// Prints `content` to standard output, or writes it to `path` when given.
pub fn emit(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{content}\n"))?;
            info!("Wrote output to {:?}", path);
            println!("Output written to: {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}
