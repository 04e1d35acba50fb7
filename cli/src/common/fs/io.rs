//! # Reactbot Data File I/O
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Reading of the external data files reactbot starts from: the
//! emoji-sentiment table and the sentiment lexicon. Both ship inside the
//! binary, and both can be replaced by a file on disk through configuration.
//!
//! - **`read_file_to_string`**: `fs::read_to_string` with `anyhow` context.
//! - **`read_data_source`**: returns the on-disk file when a path is given,
//!   otherwise the bundled content, together with a name for error messages.
//!
//! ```rust
//! let LoadedSource { name, content } =
//!     io::read_data_source(config_path.as_deref(), "bundled lexicon", BUNDLED)?;
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Content of a data file and the name used to refer to it in messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSource {
    pub name: String,
    pub content: String,
}

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be found, opened, or read, with
/// context indicating which file failed.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Reads `path` if given, otherwise falls back to the bundled content.
///
/// # Arguments
///
/// * `path` - Optional on-disk replacement for the bundled data.
/// * `bundled_name` - Display name of the bundled data.
/// * `bundled` - The bundled data itself (usually from `include_str!`).
pub fn read_data_source(
    path: Option<&Path>,
    bundled_name: &str,
    bundled: &'static str,
) -> Result<LoadedSource> {
    match path {
        Some(path) => {
            info!("Reading data file {}", path.display());
            Ok(LoadedSource {
                name: path.display().to_string(),
                content: read_file_to_string(path)?,
            })
        }
        None => {
            debug!("Using {}", bundled_name);
            Ok(LoadedSource {
                name: bundled_name.to_string(),
                content: bundled.to_string(),
            })
        }
    }
}
