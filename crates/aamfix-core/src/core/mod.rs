//! # Core Module
//!
//! The reaction model that rule extraction and mapping correction operate on.
//!
//! ## Overview
//!
//! A mapped reaction is a pair of molecule lists whose atoms carry integer
//! indices; an index shared by a reactant atom and a product atom says the
//! two are the same physical atom. Everything in this module is immutable
//! once built: remapping or projecting produces new values.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds, molecules, reactions and their validation errors
//! - **Condensed Graphs** ([`cgr`]) - The union of both sides of a reaction, reaction centers and query projections
//! - **Canonical Forms** ([`canonical`]) - Mapping-independent signatures for structural comparison
//! - **Text I/O** ([`io`]) - Mapped reaction SMILES reading and writing
//! - **Element Data** ([`utils`]) - Static element tables

pub mod canonical;
pub mod cgr;
pub mod io;
pub mod models;
pub mod utils;
