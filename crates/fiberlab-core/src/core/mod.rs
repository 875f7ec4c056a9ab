//! # Core Module
//!
//! The fundamental building blocks shared by every analysis mode.
//!
//! ## Architecture
//!
//! - **Sample Representation** ([`models`]) - Observations, residue chains, garment components
//!   and the per-sample result rows produced by the engines
//! - **Reference Data** ([`reference`]) - The fiber moisture-regain table used to prefill inputs
//! - **Document I/O** ([`io`]) - The exporter seam and the bundled Markdown and JSON renderers
//! - **Utilities** ([`utils`]) - Insertion-ordered keyed accumulation
//!
//! Nothing in this layer performs validation of measurement chains; that belongs to
//! [`crate::engine`].

pub mod io;
pub mod models;
pub mod reference;
pub mod utils;
