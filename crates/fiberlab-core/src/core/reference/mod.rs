//! # Reference Module
//!
//! The fiber moisture-regain reference table.
//!
//! ## Overview
//!
//! Laboratories condition fibers under a published standard, and each standard lists an agreed
//! moisture regain per fiber. The table maps a fiber name to its regain under each supported
//! [`table::Standard`] and is used only to prefill observations before they reach an engine.
//! The engines never consult it: they compute from whatever regain is attached to an
//! observation.
//!
//! ## Usage
//!
//! ```ignore
//! use fiberlab::core::reference::table::{FiberReferenceTable, Standard};
//!
//! let table = FiberReferenceTable::load("fibers.csv")?;
//! let regain = table.lookup("cotton", Standard::Iso); // Some(8.5)
//! ```

pub mod table;
