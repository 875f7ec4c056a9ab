//! # Workflows Module
//!
//! High-level entry points that take a batch of samples from input to report.
//!
//! ## Overview
//!
//! A workflow validates and computes every sample of a run with the engine for its mode, averages
//! the results across samples and reports progress along the way. A run either succeeds for all
//! of its samples or fails with the first invalid one.
//!
//! ## Architecture
//!
//! - **Analysis** ([`analyze`]) - Per-mode runs and a dispatcher over [`analyze::AnalysisInput`]
//! - **Reports** ([`report`]) - Assembly of exporter-ready reports from a finished run
//! - **Session** ([`session`]) - The most recent successful run, kept across failed attempts

pub mod analyze;
pub mod report;
pub mod session;
