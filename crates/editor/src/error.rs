//! Error types for configuration and background loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading an [`EditorConfig`](crate::config::EditorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or field types.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// The action history must keep at least one action.
	#[error("history_capacity must be at least 1")]
	ZeroCapacity,

	/// Page motions must move by at least one row.
	#[error("page_rows must be at least 1")]
	ZeroPageRows,
}

/// Errors that can occur when loading a document in the background.
#[derive(Debug, Error)]
pub enum LoadError {
	/// Error reading the document.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The load task ended without publishing a result.
	#[error("load of {path} was abandoned before completing")]
	Abandoned {
		/// Path of the document being loaded.
		path: PathBuf,
	},
}
