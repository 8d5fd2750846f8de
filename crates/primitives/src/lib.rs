//! Core types for multi-caret editing: points, carets, caret groups, and the
//! action history behind the repeat command.

/// Recordable editor actions.
pub mod action;
/// A single caret with optional selection anchor.
pub mod caret;
/// Ordered, self-merging caret collections.
pub mod caret_group;
/// Action log and repetition detection.
pub mod history;
/// Row/column positions and ranges.
pub mod point;

pub use action::{Action, Transform};
pub use caret::{Caret, Selection};
pub use caret_group::{CaretGroup, CaretId};
pub use history::{ActionHistory, detect_repetition};
pub use point::{Point, Range};
