//! # Core Models Module
//!
//! Plain data structures describing what a laboratory run measured and what the engines
//! computed from it.
//!
//! ## Key Components
//!
//! - [`observation`] - One fiber's measured dry weight and moisture regain
//! - [`residue`] - One dissolution step of a chemical separation chain
//! - [`garment`] - Garment components and their fiber percentage breakdowns
//! - [`sample`] - The per-mode sample containers and the [`sample::AnalysisMode`] selector
//! - [`results`] - Per-sample, per-fiber result rows for each analysis mode
//! - [`report`] - Per-sample tables and averaged views, as handed to the exporters
//!
//! All inputs are immutable once handed to an engine; every result row is produced in a single
//! pass and never mutated afterwards.

pub mod garment;
pub mod observation;
pub mod report;
pub mod residue;
pub mod results;
pub mod sample;
