//! # Engine Module
//!
//! The calculation engines for fiber composition analysis. Each analysis mode has its own
//! per-sample computation; all of them feed the same cross-sample averaging.
//!
//! ## Architecture
//!
//! - **Manual separation** ([`manual`]) - Fibers separated by hand and weighed dry
//! - **Chemical separation** ([`chemical`]) - Successive dissolution residues, or directly
//!   weighed recovered fibers
//! - **Garments** ([`garments`]) - Component weights combined with declared fiber breakdowns
//! - **Aggregation** ([`aggregate`]) - Averaging results by fiber name across samples
//! - **Configuration** ([`config`]) - Calculation settings and their validation
//! - **Progress Monitoring** ([`progress`]) - Progress events for long batches
//! - **Error Handling** ([`error`]) - Per-sample validation errors and run-level failures
//!
//! Engines are pure functions of their input. They do no I/O and keep no state between calls.

pub mod aggregate;
pub mod chemical;
pub mod config;
pub mod error;
pub mod garments;
pub mod manual;
pub mod progress;
