//! AHP Sherpa - Pairwise-comparison decision analysis
//!
//! This crate implements the Analytic Hierarchy Process: reciprocal
//! comparison matrices are validated and solved into priority vectors,
//! synthesized into ranked alternative scores, and stress-tested by
//! perturbing criterion weights.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
