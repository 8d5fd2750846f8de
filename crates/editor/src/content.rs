//! The text store contract consumed by [`EditSession`](crate::session::EditSession).
//!
//! The session never computes row or column shifts itself. Every mutation
//! returns the post-edit positions in the same order as its inputs, and the
//! session reseats its carets from those in one step.

use multicaret_primitives::{Point, Range};

/// Text storage for one document.
///
/// Implementations clamp or reject out-of-range points; callers treat points
/// as opaque ordered keys.
pub trait Content {
	/// Inserts `text` at `point`, returning the position after the insertion.
	fn insert(&mut self, point: Point, text: &str) -> Point;

	/// Inserts `text` at each point as one undoable edit, returning the
	/// position after each insertion in input order.
	fn insert_all(&mut self, points: &[Point], text: &str) -> Vec<Point>;

	/// Deletes the character at `point`, returning the deleted text.
	fn delete(&mut self, point: Point) -> String;

	/// Deletes the character at each point as one undoable edit.
	fn delete_all(&mut self, points: &[Point]) -> Vec<Point>;

	/// Deletes the character before `point`, returning the new position.
	fn backspace(&mut self, point: Point) -> Point;

	/// Deletes the character before each point as one undoable edit.
	fn backspace_all(&mut self, points: &[Point]) -> Vec<Point>;

	/// Replaces `start..end` with `text`, returning the position after it.
	fn replace(&mut self, start: Point, end: Point, text: &str) -> Point;

	/// Replaces the text of each range with `f` applied to it, as one
	/// undoable edit. Returns the ascending extent of each replacement in
	/// input order.
	fn replace_ranges(&mut self, ranges: &[Range], f: &dyn Fn(&str) -> String) -> Vec<Range>;

	/// Reverts the last edit, returning the affected positions.
	fn undo(&mut self) -> Vec<Point>;

	/// Reapplies the last reverted edit, returning the affected positions.
	fn redo(&mut self) -> Vec<Point>;

	/// Returns the text between two points.
	fn text(&self, start: Point, end: Point) -> String;

	/// Returns the extent of every occurrence of `pattern`.
	fn find_all(&self, pattern: &str) -> Vec<Range>;

	/// Returns the number of rows.
	fn rows(&self) -> usize;

	/// Returns the number of columns of `row`, excluding the line break.
	fn row_len(&self, row: usize) -> usize;

	/// Shows uncommitted IME composition text at `point`, replacing any
	/// previous composition. Returns the position after it.
	fn insert_flush(&mut self, point: Point, text: &str) -> Point;

	/// Removes the uncommitted IME composition text.
	fn clear_flush(&mut self);
}
