//! # aamfix Core Library
//!
//! Learns remapping rules from reviewed atom-to-atom mappings of chemical
//! reactions and applies reviewer corrections to mapped reactions.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same strict three-layer split throughout, so every
//! layer can be tested on its own.
//!
//! - **[`core`]: The Foundation.** Immutable data models (`Molecule`, `Reaction`), the
//!   condensed graph of reaction with its query projections, mapping-independent canonical
//!   forms, and mapped reaction SMILES I/O.
//!
//! - **[`engine`]: The Logic Core.** The rule extractor, which compares a bad and a good mapping
//!   of the same reaction and derives a `Rule`, and the mapping corrector, which builds and
//!   applies atom-index remaps.
//!
//! - **[`workflows`]: The Public API.** Reviewer-facing procedures that correct a reaction from
//!   entered index pairs, generate the matching rule, or process a batch of reviewed pairs.
//!
//! ## Example
//!
//! ```
//! use aamfix::core::io::smiles::parse_reaction;
//! use aamfix::engine::extractor::extract_rule;
//!
//! let bad = parse_reaction("[CH3:1][OH:2].[OH2:3]>>[CH3:1][OH:2].[OH2:3]")?;
//! let good = parse_reaction("[CH3:1][OH:2].[OH2:3]>>[CH3:1][OH:3].[OH2:2]")?;
//! let rule = extract_rule(&bad, &good)?;
//! assert_eq!(rule.remap().get(&2), Some(&3));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
