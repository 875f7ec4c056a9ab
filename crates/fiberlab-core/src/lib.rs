//! # FiberLab Core Library
//!
//! A library for computing the fiber composition of textile samples from laboratory
//! measurements, and for folding repeated samples into averaged composition reports.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture so that the arithmetic can be
//! tested in isolation from input collection and document rendering.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`FiberObservation`, `ResidueStep`,
//!   `GarmentComponent`, per-sample result rows), the fiber moisture reference table, an
//!   insertion-ordered fiber tally, and document export.
//!
//! - **[`engine`]: The Logic Core.** The per-sample engines for manual separation, chemical
//!   separation (residue and component modes) and garment analysis, plus the cross-sample
//!   aggregator shared by all of them.
//!
//! - **[`workflows`]: The Public API.** Validates and computes every sample of a run, aggregates
//!   the results and assembles the report structures consumed by exporters.

pub mod core;
pub mod engine;
pub mod workflows;
