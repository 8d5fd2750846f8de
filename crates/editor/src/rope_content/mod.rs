//! A [`Content`] backed by a [`Rope`], with batch edits and undo/redo.
//!
//! Every mutation is expressed as a list of non-overlapping [`Edit`]s in the
//! coordinates of the text before the mutation. The list is applied last to
//! first so earlier offsets stay valid, and the resulting spans are reported
//! back in input order.

use multicaret_primitives::{Point, Range};
use ropey::Rope;
use tracing::trace;

use crate::content::Content;

#[cfg(test)]
mod tests;

/// A position in the text, measured in characters.
type CharIdx = usize;

/// Replace `remove` characters at `at` with `insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
	at: CharIdx,
	remove: usize,
	insert: String,
}

impl Edit {
	fn new(at: CharIdx, remove: usize, insert: impl Into<String>) -> Self {
		Self {
			at,
			remove,
			insert: insert.into(),
		}
	}
}

/// One undoable step: the edits as applied, and the edits that revert them.
#[derive(Debug, Clone)]
struct EditBatch {
	forward: Vec<Edit>,
	inverse: Vec<Edit>,
}

/// Uncommitted IME text shown in the document.
#[derive(Debug, Clone, Copy)]
struct Flush {
	at: CharIdx,
	len: usize,
}

/// Rope-backed text with LF line breaks.
#[derive(Debug, Clone, Default)]
pub struct RopeContent {
	rope: Rope,
	undo_stack: Vec<EditBatch>,
	redo_stack: Vec<EditBatch>,
	flush: Option<Flush>,
}

impl RopeContent {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the underlying rope.
	pub fn rope(&self) -> &Rope {
		&self.rope
	}

	pub fn can_undo(&self) -> bool {
		!self.undo_stack.is_empty()
	}

	pub fn can_redo(&self) -> bool {
		!self.redo_stack.is_empty()
	}

	fn point_to_char(&self, point: Point) -> CharIdx {
		let last_row = self.rope.len_lines().saturating_sub(1);
		let row = point.row.min(last_row);
		self.rope.line_to_char(row) + point.col.min(self.row_len(row))
	}

	fn char_to_point(&self, idx: CharIdx) -> Point {
		let idx = idx.min(self.rope.len_chars());
		let row = self.rope.char_to_line(idx);
		Point::new(row, idx - self.rope.line_to_char(row))
	}

	fn span_to_range(&self, (start, end): (CharIdx, CharIdx)) -> Range {
		Range::new(self.char_to_point(start), self.char_to_point(end))
	}

	/// Applies `edits` as one step and returns the post-edit `(start, end)`
	/// span of each edit's inserted text, in input order.
	///
	/// Overlapping edits are trimmed so that each starts where the previous
	/// one (in text order) ends.
	fn apply(&mut self, edits: Vec<Edit>) -> (Vec<(CharIdx, CharIdx)>, EditBatch) {
		let len = self.rope.len_chars();
		let mut order: Vec<usize> = (0..edits.len()).collect();
		order.sort_by_key(|&i| edits[i].at);

		let mut spans = vec![(0, 0); edits.len()];
		let mut forward = Vec::with_capacity(edits.len());
		let mut inverse = Vec::with_capacity(edits.len());
		let mut shift: isize = 0;
		let mut prev_end = 0;

		for i in order {
			let edit = &edits[i];
			let at = edit.at.clamp(prev_end, len);
			let end = (edit.at + edit.remove).clamp(at, len);
			let removed = self.rope.slice(at..end).to_string();
			let inserted_len = edit.insert.chars().count();

			let start = at.saturating_add_signed(shift);
			spans[i] = (start, start + inserted_len);
			shift += inserted_len as isize - (end - at) as isize;
			prev_end = end;

			inverse.push(Edit::new(start, inserted_len, removed));
			forward.push(Edit::new(at, end - at, edit.insert.clone()));
		}

		for edit in forward.iter().rev() {
			if edit.remove > 0 {
				self.rope.remove(edit.at..edit.at + edit.remove);
			}
			if !edit.insert.is_empty() {
				self.rope.insert(edit.at, &edit.insert);
			}
		}

		(spans, EditBatch { forward, inverse })
	}

	/// Applies `edits` as a new undo step, dropping any redo history.
	///
	/// Any IME composition must already be dropped: edit offsets are taken
	/// from the committed text.
	fn record(&mut self, edits: Vec<Edit>) -> Vec<(CharIdx, CharIdx)> {
		let (spans, batch) = self.apply(edits);
		let changed = batch
			.forward
			.iter()
			.any(|e| e.remove > 0 || !e.insert.is_empty());
		if changed {
			self.undo_stack.push(batch);
			self.redo_stack.clear();
		}
		spans
	}

	fn record_points(&mut self, edits: Vec<Edit>) -> Vec<Point> {
		let spans = self.record(edits);
		spans.into_iter().map(|(_, end)| self.char_to_point(end)).collect()
	}

	fn drop_flush(&mut self) {
		if let Some(flush) = self.flush.take() {
			self.rope.remove(flush.at..flush.at + flush.len);
		}
	}
}

impl From<&str> for RopeContent {
	fn from(text: &str) -> Self {
		Self {
			rope: Rope::from_str(text),
			..Self::default()
		}
	}
}

impl std::fmt::Display for RopeContent {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.rope)
	}
}

impl Content for RopeContent {
	fn insert(&mut self, point: Point, text: &str) -> Point {
		self.drop_flush();
		let at = self.point_to_char(point);
		let spans = self.record(vec![Edit::new(at, 0, text)]);
		self.char_to_point(spans[0].1)
	}

	fn insert_all(&mut self, points: &[Point], text: &str) -> Vec<Point> {
		self.drop_flush();
		let edits = points
			.iter()
			.map(|p| Edit::new(self.point_to_char(*p), 0, text))
			.collect();
		self.record_points(edits)
	}

	fn delete(&mut self, point: Point) -> String {
		self.drop_flush();
		let at = self.point_to_char(point);
		if at >= self.rope.len_chars() {
			return String::new();
		}
		let deleted = self.rope.char(at).to_string();
		self.record(vec![Edit::new(at, 1, "")]);
		deleted
	}

	fn delete_all(&mut self, points: &[Point]) -> Vec<Point> {
		self.drop_flush();
		let edits = points
			.iter()
			.map(|p| Edit::new(self.point_to_char(*p), 1, ""))
			.collect();
		self.record_points(edits)
	}

	fn backspace(&mut self, point: Point) -> Point {
		self.backspace_all(&[point]).pop().unwrap_or(point)
	}

	fn backspace_all(&mut self, points: &[Point]) -> Vec<Point> {
		self.drop_flush();
		let edits = points
			.iter()
			.map(|p| match self.point_to_char(*p) {
				0 => Edit::new(0, 0, ""),
				at => Edit::new(at - 1, 1, ""),
			})
			.collect();
		self.record_points(edits)
	}

	fn replace(&mut self, start: Point, end: Point, text: &str) -> Point {
		self.drop_flush();
		let range = Range::new(start, end);
		let from = self.point_to_char(range.min());
		let to = self.point_to_char(range.max());
		let spans = self.record(vec![Edit::new(from, to - from, text)]);
		self.char_to_point(spans[0].1)
	}

	fn replace_ranges(&mut self, ranges: &[Range], f: &dyn Fn(&str) -> String) -> Vec<Range> {
		self.drop_flush();
		let edits = ranges
			.iter()
			.map(|r| {
				let from = self.point_to_char(r.min());
				let to = self.point_to_char(r.max());
				let replacement = f(&self.rope.slice(from..to).to_string());
				Edit::new(from, to - from, replacement)
			})
			.collect();
		let spans = self.record(edits);
		spans.into_iter().map(|span| self.span_to_range(span)).collect()
	}

	fn undo(&mut self) -> Vec<Point> {
		self.drop_flush();
		let Some(batch) = self.undo_stack.pop() else {
			trace!("undo: nothing to undo");
			return Vec::new();
		};
		let (spans, _) = self.apply(batch.inverse.clone());
		trace!(edits = spans.len(), undo_stack = self.undo_stack.len(), "undo applied");
		self.redo_stack.push(batch);
		spans.into_iter().map(|(_, end)| self.char_to_point(end)).collect()
	}

	fn redo(&mut self) -> Vec<Point> {
		self.drop_flush();
		let Some(batch) = self.redo_stack.pop() else {
			trace!("redo: nothing to redo");
			return Vec::new();
		};
		let (spans, _) = self.apply(batch.forward.clone());
		trace!(edits = spans.len(), redo_stack = self.redo_stack.len(), "redo applied");
		self.undo_stack.push(batch);
		spans.into_iter().map(|(_, end)| self.char_to_point(end)).collect()
	}

	fn text(&self, start: Point, end: Point) -> String {
		let range = Range::new(start, end);
		let from = self.point_to_char(range.min());
		let to = self.point_to_char(range.max());
		self.rope.slice(from..to).to_string()
	}

	fn find_all(&self, pattern: &str) -> Vec<Range> {
		if pattern.is_empty() {
			return Vec::new();
		}
		let len = pattern.chars().count();
		let text = self.rope.to_string();
		text.match_indices(pattern)
			.map(|(byte, _)| {
				let start = self.rope.byte_to_char(byte);
				self.span_to_range((start, start + len))
			})
			.collect()
	}

	fn rows(&self) -> usize {
		self.rope.len_lines()
	}

	fn row_len(&self, row: usize) -> usize {
		if row >= self.rope.len_lines() {
			return 0;
		}
		let line = self.rope.line(row);
		let mut len = line.len_chars();
		if len > 0 && line.char(len - 1) == '\n' {
			len -= 1;
			if len > 0 && line.char(len - 1) == '\r' {
				len -= 1;
			}
		}
		len
	}

	fn insert_flush(&mut self, point: Point, text: &str) -> Point {
		self.drop_flush();
		let at = self.point_to_char(point);
		self.rope.insert(at, text);
		let len = text.chars().count();
		self.flush = Some(Flush { at, len });
		self.char_to_point(at + len)
	}

	fn clear_flush(&mut self) {
		self.drop_flush();
	}
}
