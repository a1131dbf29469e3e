//! # Workflows Module
//!
//! High-level entry points for reviewers of atom-to-atom mappings.
//!
//! ## Overview
//!
//! A reviewer looks at a mapped reaction, enters the index pairs that fix
//! its products, and wants both the corrected reaction and a rule that
//! generalizes the fix. These workflows tie the corrector and the extractor
//! together for that purpose, one reaction at a time or as a batch.
//!
//! - **Review Workflow** ([`review`]) - Correction from index pairs, rule generation and batch extraction

pub mod review;
