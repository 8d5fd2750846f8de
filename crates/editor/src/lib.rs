#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Multi-caret edit coordination over a pluggable text store.
//!
//! # Main Types
//!
//! - [`EditSession`] - Carets, action history, and content of one document
//! - [`Content`] - The text store contract the session edits through
//! - [`RopeContent`] - A rope-backed [`Content`] with batch undo
//!
//! # Edit flow
//!
//! ```text
//! Action ──► EditSession::execute ──► Content (single or batch op)
//!                   │                        │
//!                   │            post-edit points, input order
//!                   ▼                        │
//!            ActionHistory ◄── offer   CaretGroup::reseat ◄─┘
//! ```

/// Per-session settings.
pub mod config;
pub mod content;
pub mod error;
/// Background document loading.
pub mod loader;
pub mod position;
pub mod rope_content;
pub mod session;

pub use config::EditorConfig;
pub use content::Content;
pub use error::{ConfigError, LoadError};
pub use loader::{LoadHandle, load_file, spawn_load};
pub use position::CaretPosition;
pub use rope_content::RopeContent;
pub use session::EditSession;
