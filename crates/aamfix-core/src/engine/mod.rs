//! # Engine Module
//!
//! Rule extraction and mapping correction on top of the reaction model.
//!
//! ## Overview
//!
//! Given a reaction mapped badly and the same reaction mapped correctly, the
//! engine works out which atoms the error touches, cuts a query pattern for
//! each mapping around those atoms, and records the atom-index rewrite that
//! turns one mapping into the other. The corrector goes the other way: it
//! builds such a rewrite from reviewer-entered index pairs and applies it.
//!
//! ## Architecture
//!
//! - **Rule Extraction** ([`extractor`]) - Relevant atom sets, query projection and remap derivation
//! - **Mapping Correction** ([`corrector`]) - Building, applying and inverting remaps
//! - **Rules** ([`rule`]) - The immutable result of an extraction
//! - **Configuration** ([`config`]) - Neighborhood depth and product pairing policy
//! - **Progress Monitoring** ([`progress`]) - Event reporting for batch runs
//! - **Error Handling** ([`error`]) - Rule-level error taxonomy

pub mod config;
pub mod corrector;
pub mod error;
pub mod extractor;
pub mod progress;
pub mod rule;
