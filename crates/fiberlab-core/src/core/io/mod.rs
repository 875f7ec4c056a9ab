//! Rendering of finished analysis reports.
//!
//! Every document format implements [`traits::DocumentExporter`]. Markdown mirrors the
//! laboratory report layout; JSON carries the same data for other tools to consume.

pub mod json;
pub mod markdown;
pub mod traits;
