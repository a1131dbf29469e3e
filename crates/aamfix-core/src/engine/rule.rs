use crate::core::cgr::query::CgrQuery;
use crate::core::models::atom::AtomIndex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Atom-index rewrite from a bad mapping to a good one. Indices that are not
/// keys stay as they are.
pub type Remap = BTreeMap<AtomIndex, AtomIndex>;

/// A remapping rule learned from one reviewed reaction.
///
/// `bad_query` matches the erroneous mapping around the reaction center,
/// `good_query` the corrected one, and `remap` rewrites the former into the
/// latter. `valid_atoms` are the remap keys the rule may safely apply to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    bad_query: CgrQuery,
    good_query: CgrQuery,
    remap: Remap,
    valid_atoms: BTreeSet<AtomIndex>,
    relevant_atoms: BTreeSet<AtomIndex>,
    strange_atoms: BTreeSet<AtomIndex>,
}

impl Rule {
    pub(crate) fn new(
        bad_query: CgrQuery,
        good_query: CgrQuery,
        remap: Remap,
        relevant_atoms: BTreeSet<AtomIndex>,
        strange_atoms: BTreeSet<AtomIndex>,
    ) -> Self {
        let valid_atoms = remap
            .keys()
            .copied()
            .filter(|index| !strange_atoms.contains(index))
            .collect();
        Self {
            bad_query,
            good_query,
            remap,
            valid_atoms,
            relevant_atoms,
            strange_atoms,
        }
    }

    pub fn bad_query(&self) -> &CgrQuery {
        &self.bad_query
    }

    pub fn good_query(&self) -> &CgrQuery {
        &self.good_query
    }

    pub fn remap(&self) -> &Remap {
        &self.remap
    }

    pub fn valid_atoms(&self) -> &BTreeSet<AtomIndex> {
        &self.valid_atoms
    }

    /// Atoms both queries were cut from: the widened reaction centers of
    /// both mappings plus the atoms the bad mapping loses or invents.
    pub fn relevant_atoms(&self) -> &BTreeSet<AtomIndex> {
        &self.relevant_atoms
    }

    /// Product indices of the bad mapping that the good mapping never uses.
    pub fn strange_atoms(&self) -> &BTreeSet<AtomIndex> {
        &self.strange_atoms
    }

    /// True when the two mappings already agree on every relevant atom.
    pub fn is_noop(&self) -> bool {
        self.remap.is_empty()
    }

    pub fn into_parts(self) -> (CgrQuery, CgrQuery, Remap, BTreeSet<AtomIndex>) {
        (self.bad_query, self.good_query, self.remap, self.valid_atoms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_atoms_exclude_strange_atoms() {
        let rule = Rule::new(
            CgrQuery::default(),
            CgrQuery::default(),
            Remap::from([(2, 3), (5, 2)]),
            BTreeSet::from([1, 2, 3, 5]),
            BTreeSet::from([5]),
        );
        assert_eq!(rule.valid_atoms(), &BTreeSet::from([2]));
        assert!(!rule.is_noop());

        let (_, _, remap, valid) = rule.into_parts();
        assert_eq!(remap.len(), 2);
        assert_eq!(valid, BTreeSet::from([2]));
    }

    #[test]
    fn serializes_remap_with_index_keys() {
        let rule = Rule::new(
            CgrQuery::default(),
            CgrQuery::default(),
            Remap::from([(2, 3)]),
            BTreeSet::from([2, 3]),
            BTreeSet::new(),
        );
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["remap"]["2"], 3);
        assert_eq!(json["valid_atoms"], serde_json::json!([2]));
    }
}
