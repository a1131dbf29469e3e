//! Turning reviewer-entered atom pairs into a remap and applying it.

use super::error::RuleError;
use super::rule::Remap;
use crate::core::models::atom::AtomIndex;
use crate::core::models::reaction::Reaction;
use tracing::debug;

/// Pairs `bad[i]` with `good[i]`. A repeated bad index keeps its last
/// partner.
///
/// # Errors
///
/// Returns [`RuleError::LengthMismatch`] if the lists differ in length.
pub fn build_remap(bad: &[AtomIndex], good: &[AtomIndex]) -> Result<Remap, RuleError> {
    if bad.len() != good.len() {
        return Err(RuleError::LengthMismatch {
            bad: bad.len(),
            good: good.len(),
        });
    }
    Ok(bad.iter().copied().zip(good.iter().copied()).collect())
}

/// Returns a copy of `reaction` whose product atom indices are rewritten
/// through `remap`. Reactants are untouched.
///
/// # Errors
///
/// Propagates the model error when the rewrite would give two product atoms
/// the same index.
pub fn apply_remap(reaction: &Reaction, remap: &Remap) -> Result<Reaction, RuleError> {
    debug!(pairs = remap.len(), "Applying remap to products.");
    Ok(reaction.with_remapped_products(remap)?)
}

/// Inverse of an injective remap, or `None` if two keys share a target.
pub fn invert_remap(remap: &Remap) -> Option<Remap> {
    let mut inverse = Remap::new();
    for (&from, &to) in remap {
        if inverse.insert(to, from).is_some() {
            return None;
        }
    }
    Some(inverse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::smiles::parse_reaction;
    use crate::core::models::error::ModelError;

    #[test]
    fn build_remap_zips_positionally() {
        assert_eq!(
            build_remap(&[3, 7], &[4, 9]).unwrap(),
            Remap::from([(3, 4), (7, 9)])
        );
    }

    #[test]
    fn build_remap_last_write_wins() {
        assert_eq!(build_remap(&[3, 3], &[4, 5]).unwrap(), Remap::from([(3, 5)]));
    }

    #[test]
    fn build_remap_rejects_length_mismatch() {
        assert_eq!(
            build_remap(&[1], &[1, 2]),
            Err(RuleError::LengthMismatch { bad: 1, good: 2 })
        );
    }

    #[test]
    fn build_remap_of_empty_lists_is_empty() {
        assert!(build_remap(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn apply_remap_rewrites_products_only() {
        let rxn = parse_reaction("[CH3:1][OH:2].[OH2:3]>>[CH3:1][OH:2].[OH2:3]").unwrap();
        let fixed = apply_remap(&rxn, &Remap::from([(2, 3), (3, 2)])).unwrap();

        assert_eq!(
            fixed.to_string(),
            "[CH3:1][OH:2].[OH2:3]>>[CH3:1][OH:3].[OH2:2]"
        );
        assert_eq!(
            rxn.to_string(),
            "[CH3:1][OH:2].[OH2:3]>>[CH3:1][OH:2].[OH2:3]"
        );
    }

    #[test]
    fn apply_remap_surfaces_index_collisions() {
        let rxn = parse_reaction("[CH3:1][OH:2].[OH2:3]>>[CH3:1][OH:2].[OH2:3]").unwrap();
        let result = apply_remap(&rxn, &Remap::from([(2, 3)]));
        assert!(matches!(
            result,
            Err(RuleError::Model(ModelError::DuplicateAtomIndex { index: 3, .. }))
        ));
    }

    #[test]
    fn applying_the_inverse_restores_the_original() {
        let rxn = parse_reaction("[CH3:1][CH2:2][OH:3]>>[CH2:1]=[CH2:2].[OH2:3]").unwrap();
        let remap = Remap::from([(1, 2), (2, 1), (3, 7)]);
        let inverse = invert_remap(&remap).unwrap();
        assert_eq!(inverse, Remap::from([(1, 2), (2, 1), (7, 3)]));

        let there = apply_remap(&rxn, &remap).unwrap();
        let back = apply_remap(&there, &inverse).unwrap();
        assert_eq!(back, rxn);
    }

    #[test]
    fn invert_remap_rejects_non_injective_remaps() {
        assert_eq!(invert_remap(&Remap::from([(1, 5), (2, 5)])), None);
    }
}
