//! # Reactbot Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//!
//! Filesystem helpers shared by the catalog and sentiment loaders.
//!

/// Data file reading with bundled fallbacks (e.g. `read_data_source`).
pub mod io;
