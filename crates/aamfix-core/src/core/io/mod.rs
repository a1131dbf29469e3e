//! Text formats for mapped reactions.
//!
//! Reactions enter and leave the library as atom-mapped reaction SMILES: the
//! map number of each atom becomes its [`AtomIndex`](crate::core::models::atom::AtomIndex),
//! and the writer puts every index back so the mapping survives a round trip.

pub mod smiles;
