//! Derivation of remapping rules from a reviewed pair of mappings.
//!
//! Both mappings of the reaction are condensed, their reaction centers are
//! widened by the configured number of bonds, and the union of the two
//! neighborhoods, together with the atoms the bad mapping drops or invents
//! on the product side, becomes the relevant atom set. Both condensed graphs
//! are projected onto that set, and positional pairing of the product atoms
//! yields the remap restricted to it.

use super::config::ExtractionConfig;
use super::error::RuleError;
use super::rule::{Remap, Rule};
use crate::core::canonical::molecule_signature;
use crate::core::cgr::condense;
use crate::core::models::atom::{AtomIndex, AtomIndexed};
use crate::core::models::molecule::Molecule;
use crate::core::models::reaction::Reaction;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Extracts a rule with the default configuration.
///
/// # Errors
///
/// See [`RuleExtractor::extract`].
pub fn extract_rule(bad: &Reaction, good: &Reaction) -> Result<Rule, RuleError> {
    RuleExtractor::default().extract(bad, good)
}

#[derive(Debug, Clone, Default)]
pub struct RuleExtractor {
    config: ExtractionConfig,
}

impl RuleExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Derives the rule that rewrites the `bad` mapping into the `good` one.
    ///
    /// The result depends only on the two reactions and the configuration,
    /// so extracting twice yields identical rules.
    ///
    /// # Errors
    ///
    /// - [`RuleError::StructuralMismatch`] if the two reactions differ once
    ///   mapping is ignored.
    /// - [`RuleError::ProductMismatch`] if strict product pairing is on and
    ///   the molecules at some product position differ. Product counts
    ///   always agree once the structural check has passed.
    /// - [`RuleError::Model`] if either mapping pairs atoms of different
    ///   elements.
    #[instrument(skip_all, name = "rule_extraction")]
    pub fn extract(&self, bad: &Reaction, good: &Reaction) -> Result<Rule, RuleError> {
        let bad_form = bad.canonical_form();
        let good_form = good.canonical_form();
        if bad_form != good_form {
            return Err(RuleError::StructuralMismatch {
                bad: bad.to_string(),
                good: good.to_string(),
            });
        }
        let product_pairs = self.pair_products(bad, good)?;

        let cgr_good = condense(good)?;
        let cgr_bad = condense(bad)?;
        let depth = self.config.augmentation_depth;
        let good_center = cgr_good.augmented_atoms(&cgr_good.center_atoms(), depth);
        let bad_center = cgr_bad.augmented_atoms(&cgr_bad.center_atoms(), depth);

        let mut atoms: BTreeSet<AtomIndex> = bad_center.union(&good_center).copied().collect();

        let reactants_bad = bad.reactant_atoms();
        let products_bad = bad.product_atoms();
        let products_good = good.product_atoms();

        // Reactant atoms the bad mapping drops although the good one keeps them.
        atoms.extend(
            reactants_bad
                .difference(&products_bad)
                .filter(|index| products_good.contains(index)),
        );
        let strange_atoms: BTreeSet<AtomIndex> =
            products_bad.difference(&products_good).copied().collect();
        atoms.extend(&strange_atoms);

        let bad_atoms: BTreeSet<AtomIndex> =
            atoms.intersection(&cgr_bad.atom_indices()).copied().collect();
        let good_atoms: BTreeSet<AtomIndex> =
            atoms.intersection(&cgr_good.atom_indices()).copied().collect();
        let bad_query = cgr_bad.substructure_query(&bad_atoms);
        let good_query = cgr_good.substructure_query(&good_atoms);

        let mut remap = Remap::new();
        for (bad_mol, good_mol) in product_pairs {
            for (from, to) in bad_mol.indices().zip(good_mol.indices()) {
                if from != to && atoms.contains(&from) {
                    remap.insert(from, to);
                }
            }
        }

        debug!(
            bad_center = ?bad_center,
            good_center = ?good_center,
            relevant = ?atoms,
            strange = ?strange_atoms,
            remap = ?remap,
            "Derived rule atom sets."
        );

        Ok(Rule::new(bad_query, good_query, remap, atoms, strange_atoms))
    }

    fn pair_products<'r>(
        &self,
        bad: &'r Reaction,
        good: &'r Reaction,
    ) -> Result<Vec<(&'r Molecule, &'r Molecule)>, RuleError> {
        let (bad_products, good_products) = (bad.products(), good.products());
        if self.config.strict_product_pairing {
            for (position, (b, g)) in bad_products.iter().zip(good_products).enumerate() {
                if molecule_signature(b) != molecule_signature(g) {
                    return Err(RuleError::ProductMismatch { position });
                }
            }
        }
        Ok(bad_products.iter().zip(good_products).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::smiles::parse_reaction;
    use crate::core::models::error::ModelError;
    use crate::engine::config::ExtractionConfigBuilder;

    const REACTANTS: &str = "[CH3:1][OH:2].[OH2:3]";

    fn rxn(products: &str) -> Reaction {
        parse_reaction(&format!("{REACTANTS}>>{products}")).unwrap()
    }

    #[test]
    fn swapped_atoms_yield_symmetric_remap() {
        let bad = rxn("[CH3:1][OH:2].[OH2:3]");
        let good = rxn("[CH3:1][OH:3].[OH2:2]");
        let rule = extract_rule(&bad, &good).unwrap();

        assert_eq!(rule.remap(), &Remap::from([(2, 3), (3, 2)]));
        assert_eq!(rule.valid_atoms(), &BTreeSet::from([2, 3]));
        assert!(rule.strange_atoms().is_empty());
        // Atoms 2 and 3 plus the carbon one bond away.
        assert_eq!(rule.relevant_atoms(), &BTreeSet::from([1, 2, 3]));
        assert_eq!(rule.bad_query().atom_indices(), BTreeSet::from([1, 2, 3]));
        assert_eq!(rule.good_query().atom_indices(), BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn queries_describe_each_mapping() {
        let bad = rxn("[CH3:1][OH:2].[OH2:3]");
        let good = rxn("[CH3:1][OH:3].[OH2:2]");
        let rule = extract_rule(&bad, &good).unwrap();

        // The bad mapping keeps the C-O bond; the good one moves it to atom 3.
        assert_eq!(
            rule.bad_query().to_string(),
            "C1[+0/1>+0/1] O2[+0/1>+0/1] O3[+0/0>+0/0] | 1-2[->-]"
        );
        assert_eq!(
            rule.good_query().to_string(),
            "C1[+0/1>+0/1] O2[+0/1>+0/0] O3[+0/0>+0/1] | 1-2[->.] 1-3[.>-]"
        );
    }

    #[test]
    fn identical_mappings_give_an_empty_rule() {
        let bad = rxn("[CH3:1][OH:3].[OH2:2]");
        let rule = extract_rule(&bad, &bad.clone()).unwrap();
        assert!(rule.is_noop());
        assert!(rule.valid_atoms().is_empty());
    }

    #[test]
    fn extraction_is_repeatable() {
        let bad = rxn("[CH3:1][OH:2].[OH2:3]");
        let good = rxn("[CH3:1][OH:3].[OH2:2]");
        let first = extract_rule(&bad, &good).unwrap();
        let second = extract_rule(&bad, &good).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn remap_is_restricted_to_relevant_atoms() {
        let bad = parse_reaction("[CH3:1][CH2:2][OH:3].[OH2:4]>>[CH3:1][CH2:2][OH:3].[OH2:4]").unwrap();
        let good = parse_reaction("[CH3:1][CH2:2][OH:3].[OH2:4]>>[CH3:1][CH2:2][OH:4].[OH2:3]").unwrap();
        let config = ExtractionConfigBuilder::new().augmentation_depth(0).build().unwrap();
        let rule = RuleExtractor::new(config).extract(&bad, &good).unwrap();

        assert!(rule.remap().keys().all(|k| rule.relevant_atoms().contains(k)));
        let expected: BTreeSet<AtomIndex> = rule
            .remap()
            .keys()
            .copied()
            .filter(|k| !rule.strange_atoms().contains(k))
            .collect();
        assert_eq!(rule.valid_atoms(), &expected);
        // With no widening only the atoms whose bonds change are relevant.
        assert_eq!(rule.relevant_atoms(), &BTreeSet::from([2, 3, 4]));
        assert_eq!(rule.remap(), &Remap::from([(3, 4), (4, 3)]));
    }

    #[test]
    fn invented_product_atoms_are_strange() {
        let bad = parse_reaction("[CH3:1][OH:2]>>[CH3:1][OH:5]").unwrap();
        let good = parse_reaction("[CH3:1][OH:2]>>[CH3:1][OH:2]").unwrap();
        let rule = extract_rule(&bad, &good).unwrap();

        assert_eq!(rule.strange_atoms(), &BTreeSet::from([5]));
        assert_eq!(rule.relevant_atoms(), &BTreeSet::from([1, 2, 5]));
        assert_eq!(rule.remap(), &Remap::from([(5, 2)]));
        assert!(rule.valid_atoms().is_empty());
        assert_eq!(rule.good_query().atom_indices(), BTreeSet::from([1, 2]));
        assert_eq!(rule.bad_query().atom_indices(), BTreeSet::from([1, 2, 5]));
    }

    #[test]
    fn different_structures_are_rejected() {
        let bad = parse_reaction("[CH3:1][OH:2]>>[CH2:1]=[O:2]").unwrap();
        let good = parse_reaction("[CH3:1][OH:2]>>[CH3:1][OH:2]").unwrap();
        assert!(matches!(
            extract_rule(&bad, &good),
            Err(RuleError::StructuralMismatch { .. })
        ));
    }

    #[test]
    fn reordered_products_violate_strict_pairing() {
        let bad = rxn("[CH3:1][OH:3].[OH2:2]");
        let good = rxn("[OH2:3].[CH3:1][OH:2]");
        assert_eq!(
            extract_rule(&bad, &good),
            Err(RuleError::ProductMismatch { position: 0 })
        );

        let lenient = ExtractionConfigBuilder::new()
            .strict_product_pairing(false)
            .build()
            .unwrap();
        let rule = RuleExtractor::new(lenient).extract(&bad, &good).unwrap();
        // Positional pairing zips [1, 3] with [3] and [2] with [1, 2].
        assert_eq!(rule.remap(), &Remap::from([(1, 3), (2, 1)]));
        assert_eq!(rule.valid_atoms(), &BTreeSet::from([1, 2]));
        assert_eq!(rule.relevant_atoms(), &BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn ring_systems_of_different_sizes_are_rejected() {
        let decalin = parse_reaction("C1CCC2CCCCC2C1>>C1CCC2CCCCC2C1").unwrap();
        let bicyclopentyl = parse_reaction("C1CCC(C1)C1CCCC1>>C1CCC(C1)C1CCCC1").unwrap();
        assert!(matches!(
            extract_rule(&decalin, &bicyclopentyl),
            Err(RuleError::StructuralMismatch { .. })
        ));
    }

    #[test]
    fn element_changes_surface_as_model_errors() {
        // Same structures, but the bad mapping turns carbon 1 into an oxygen.
        let bad = parse_reaction("[CH4:1].[OH2:2]>>[CH4:2].[OH2:1]").unwrap();
        let good = parse_reaction("[CH4:1].[OH2:2]>>[CH4:1].[OH2:2]").unwrap();
        assert!(matches!(
            extract_rule(&bad, &good),
            Err(RuleError::Model(ModelError::ElementMismatch { .. }))
        ));
    }
}
