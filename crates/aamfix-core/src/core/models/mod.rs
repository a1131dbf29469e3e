//! # Core Models Module
//!
//! Data structures of the reaction model: atoms keyed by mapping index,
//! bonds, molecules and mapped reactions.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom properties, the [`AtomIndex`](atom::AtomIndex) mapping key and the
//!   [`AtomIndexed`](atom::AtomIndexed) trait
//! - [`topology`] - Bond orders and bonds between atom indices
//! - [`molecule`] - Molecular graph with ordered atoms and pure remapping
//! - [`reaction`] - Reactant/product sides, side atom sets and canonical form
//! - [`error`] - Failures raised while building or transforming the model
//!
//! ## Usage
//!
//! ```
//! use aamfix::core::models::{atom::Atom, molecule::Molecule, reaction::Reaction, topology::BondOrder};
//!
//! let mut methanol = Molecule::new();
//! methanol.add_atom(1, Atom::new(6).with_hydrogens(3))?;
//! methanol.add_atom(2, Atom::new(8).with_hydrogens(1))?;
//! methanol.add_bond(1, 2, BondOrder::Single)?;
//!
//! let reaction = Reaction::new(vec![methanol.clone()], vec![methanol])?;
//! assert_eq!(reaction.product_atoms().len(), 2);
//! # Ok::<(), aamfix::core::models::error::ModelError>(())
//! ```

pub mod atom;
pub mod error;
pub mod molecule;
pub mod reaction;
pub mod topology;
