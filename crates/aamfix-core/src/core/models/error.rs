use super::atom::AtomIndex;
use thiserror::Error;

/// Failures raised by the reaction model while building or transforming
/// molecules, reactions and condensed graphs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Atom index must be a positive integer, got {0}")]
    InvalidAtomIndex(AtomIndex),

    #[error("Atom index {index} is used more than once in {scope}")]
    DuplicateAtomIndex {
        index: AtomIndex,
        scope: &'static str,
    },

    #[error("Bond references unknown atom {0}")]
    UnknownAtom(AtomIndex),

    #[error("Atom {0} cannot be bonded to itself")]
    SelfBond(AtomIndex),

    #[error("Atoms {atom1} and {atom2} are already bonded")]
    DuplicateBond { atom1: AtomIndex, atom2: AtomIndex },

    #[error(
        "Atom {index} maps element {reactant} in the reactants to element {product} in the products"
    )]
    ElementMismatch {
        index: AtomIndex,
        reactant: u8,
        product: u8,
    },
}
