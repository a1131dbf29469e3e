use crate::core::models::atom::AtomIndex;
use crate::core::models::reaction::Reaction;
use crate::engine::config::ExtractionConfig;
use crate::engine::corrector::{apply_remap, build_remap};
use crate::engine::error::RuleError;
use crate::engine::extractor::RuleExtractor;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::rule::{Remap, Rule};
use tracing::{info, instrument, warn};

/// A reaction after reviewer-entered index pairs were applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub remap: Remap,
    pub reaction: Reaction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    pub correction: Correction,
    pub rule: Rule,
}

/// Builds the remap from paired index lists and applies it to the products.
#[instrument(skip_all, name = "mapping_correction")]
pub fn correct_mapping(
    reaction: &Reaction,
    bad_indices: &[AtomIndex],
    good_indices: &[AtomIndex],
) -> Result<Correction, RuleError> {
    let remap = build_remap(bad_indices, good_indices)?;
    if remap.is_empty() {
        warn!("No atom pairs given; the mapping is left unchanged.");
    }
    let corrected = apply_remap(reaction, &remap)?;
    info!(pairs = remap.len(), "Corrected product mapping.");
    Ok(Correction {
        remap,
        reaction: corrected,
    })
}

/// Corrects `reaction` and learns the rule that maps the original mapping
/// onto the corrected one.
#[instrument(skip_all, name = "rule_generation")]
pub fn generate_rule(
    reaction: &Reaction,
    bad_indices: &[AtomIndex],
    good_indices: &[AtomIndex],
    config: &ExtractionConfig,
) -> Result<ReviewOutcome, RuleError> {
    let correction = correct_mapping(reaction, bad_indices, good_indices)?;
    let rule = RuleExtractor::new(*config).extract(reaction, &correction.reaction)?;
    info!(
        remapped = rule.remap().len(),
        valid = rule.valid_atoms().len(),
        "Generated remapping rule."
    );
    Ok(ReviewOutcome { correction, rule })
}

/// Extracts one rule per `(bad, good)` pair. The first failure aborts the
/// batch and is returned; no partial result is produced.
#[instrument(skip_all, name = "batch_extraction", fields(pairs = pairs.len()))]
pub fn extract_rules(
    pairs: &[(Reaction, Reaction)],
    config: &ExtractionConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<Rule>, RuleError> {
    let extractor = RuleExtractor::new(*config);
    reporter.report(Progress::BatchStart { total: pairs.len() });

    let mut rules = Vec::with_capacity(pairs.len());
    for (index, (bad, good)) in pairs.iter().enumerate() {
        let rule = extractor.extract(bad, good).inspect_err(|e| {
            reporter.report(Progress::Message(format!("Pair {index} failed: {e}")));
        })?;
        reporter.report(Progress::PairDone {
            index,
            remapped: rule.remap().len(),
        });
        rules.push(rule);
    }

    reporter.report(Progress::BatchFinish);
    info!(rules = rules.len(), "Batch extraction finished.");
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::smiles::parse_reaction;
    use std::collections::BTreeSet;
    use std::sync::Mutex;

    fn original() -> Reaction {
        parse_reaction("[CH3:1][OH:2].[OH2:3]>>[CH3:1][OH:2].[OH2:3]").unwrap()
    }

    #[test]
    fn correct_mapping_applies_reviewer_pairs() {
        let correction = correct_mapping(&original(), &[2, 3], &[3, 2]).unwrap();
        assert_eq!(correction.remap, Remap::from([(2, 3), (3, 2)]));
        assert_eq!(
            correction.reaction.to_string(),
            "[CH3:1][OH:2].[OH2:3]>>[CH3:1][OH:3].[OH2:2]"
        );
    }

    #[test]
    fn correct_mapping_rejects_unpaired_entries() {
        assert_eq!(
            correct_mapping(&original(), &[2, 3], &[3]),
            Err(RuleError::LengthMismatch { bad: 2, good: 1 })
        );
    }

    #[test]
    fn generate_rule_learns_from_the_correction() {
        let outcome =
            generate_rule(&original(), &[2, 3], &[3, 2], &ExtractionConfig::default()).unwrap();
        assert_eq!(outcome.rule.remap(), &outcome.correction.remap);
        assert_eq!(outcome.rule.valid_atoms(), &BTreeSet::from([2, 3]));
    }

    #[test]
    fn generate_rule_without_pairs_is_a_noop() {
        let outcome = generate_rule(&original(), &[], &[], &ExtractionConfig::default()).unwrap();
        assert_eq!(outcome.correction.reaction, original());
        assert!(outcome.rule.is_noop());
    }

    #[test]
    fn extract_rules_reports_progress_per_pair() {
        let good = correct_mapping(&original(), &[2, 3], &[3, 2]).unwrap().reaction;
        let pairs = vec![(original(), good.clone()), (good.clone(), good)];
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));

        let rules = extract_rules(&pairs, &ExtractionConfig::default(), &reporter).unwrap();
        drop(reporter);

        assert_eq!(rules.len(), 2);
        assert!(rules[1].is_noop());
        assert_eq!(
            events.into_inner().unwrap(),
            vec![
                Progress::BatchStart { total: 2 },
                Progress::PairDone { index: 0, remapped: 2 },
                Progress::PairDone { index: 1, remapped: 0 },
                Progress::BatchFinish,
            ]
        );
    }

    #[test]
    fn extract_rules_stops_at_first_failure() {
        let other = parse_reaction("[CH3:1][OH:2]>>[CH2:1]=[O:2]").unwrap();
        let pairs = vec![(original(), original()), (original(), other)];
        let result = extract_rules(&pairs, &ExtractionConfig::default(), &ProgressReporter::new());
        assert!(matches!(result, Err(RuleError::StructuralMismatch { .. })));
    }
}
