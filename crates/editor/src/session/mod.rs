//! Per-document edit coordination.
//!
//! An [`EditSession`] turns [`Action`]s into [`Content`] mutations and keeps
//! the [`CaretGroup`] in step with them. A single caret uses the single-point
//! content operation; several carets use the batch operation, and marked
//! carets are replaced through [`Content::replace_ranges`]. Either way the
//! carets are reseated once per edit from the positions the content returns.

use std::time::Instant;

use multicaret_primitives::{Action, ActionHistory, Caret, CaretGroup, Point, Range, Transform};
use tracing::{debug, trace};

use crate::config::EditorConfig;
use crate::content::Content;
use crate::position::CaretPosition;

mod motion;

/// Editing state of one open document.
#[derive(Debug)]
pub struct EditSession<C> {
	content: C,
	carets: CaretGroup,
	history: ActionHistory,
	config: EditorConfig,
	register: String,
	highlights: Vec<Range>,
}

impl<C: Content + Default> Default for EditSession<C> {
	fn default() -> Self {
		Self::new(C::default())
	}
}

impl<C: Content> EditSession<C> {
	/// Creates a session over `content` with the default configuration.
	pub fn new(content: C) -> Self {
		Self::with_config(content, EditorConfig::default())
	}

	pub fn with_config(content: C, config: EditorConfig) -> Self {
		Self {
			content,
			carets: CaretGroup::new(),
			history: config.history(),
			config,
			register: String::new(),
			highlights: Vec::new(),
		}
	}

	pub fn content(&self) -> &C {
		&self.content
	}

	/// Returns the carets. Reads through the group normalize it first.
	pub fn carets(&mut self) -> &mut CaretGroup {
		&mut self.carets
	}

	pub fn history(&self) -> &ActionHistory {
		&self.history
	}

	pub fn config(&self) -> &EditorConfig {
		&self.config
	}

	/// Returns the text last copied or cut.
	pub fn register(&self) -> &str {
		&self.register
	}

	/// Returns the ranges highlighted by the last find.
	pub fn highlights(&self) -> &[Range] {
		&self.highlights
	}

	/// Replaces the document, typically with the result of a background load.
	///
	/// Carets return to the origin and the action history starts over.
	pub fn install(&mut self, content: C) {
		self.content = content;
		self.carets = CaretGroup::new();
		self.history.clear();
		self.highlights.clear();
		debug!(rows = self.content.rows(), "content installed");
	}

	pub fn into_content(self) -> C {
		self.content
	}

	/// Runs `action` and records it in the history.
	pub fn execute(&mut self, action: Action) {
		self.execute_at(action, Instant::now());
	}

	/// Runs `action` as happening at `at`.
	///
	/// [`Action::Repeat`] replays the repeated tail of the history. The
	/// replayed actions are recorded again, so consecutive repeats keep
	/// finding the same block.
	pub fn execute_at(&mut self, action: Action, at: Instant) {
		if action != Action::Repeat {
			self.dispatch(&action);
			self.history.offer_at(action, at);
			return;
		}

		let actions = self.history.repetition();
		if actions.is_empty() {
			trace!("repeat: no repeated tail");
			return;
		}
		debug!(actions = actions.len(), "repeating");
		for action in actions {
			self.dispatch(&action);
			self.history.offer_at(action, at);
		}
	}

	fn dispatch(&mut self, action: &Action) {
		match action {
			Action::Empty | Action::Repeat => {}
			Action::Input(text) => self.input(text),
			Action::Replace {
				transform,
				keep_selection,
			} => self.replace(*transform, *keep_selection),
			Action::Delete => self.delete(),
			Action::Backspace => self.backspace(),
			Action::Undo => self.undo(),
			Action::Redo => self.redo(),
			Action::SelectAll => self.select_all(),
			Action::Escape => self.escape(),
			Action::Copy => {
				self.copy();
			}
			Action::Cut => {
				self.cut();
			}
			Action::Paste(text) => self.paste(text),
			Action::Home { with_select } => self.home(*with_select),
			Action::End { with_select } => self.end(*with_select),
			Action::Tab { with_select } => self.tab(*with_select),
			Action::CaretRight { with_select } => self.caret_right(*with_select),
			Action::CaretLeft { with_select } => self.caret_left(*with_select),
			Action::CaretUp { with_select } => self.caret_up(*with_select),
			Action::CaretDown { with_select } => self.caret_down(*with_select),
			Action::PageUp { with_select } => self.page_up(*with_select),
			Action::PageDown { with_select } => self.page_down(*with_select),
			Action::Goto(row) => self.goto(*row),
			Action::FindAll(pattern) => {
				self.find_all(pattern);
			}
			Action::Save | Action::Wrap(_) => trace!(?action, "left to the host"),
		}
	}

	/// Returns the logical point of each caret, ascending.
	fn caret_points(&mut self) -> Vec<Point> {
		self.carets.carets().map(Caret::point).collect()
	}

	/// Returns a copy of the sole caret, if the group has exactly one.
	fn single(&mut self) -> Option<Caret> {
		self.carets.normalize();
		(self.carets.len() == 1).then(|| self.carets.primary().clone())
	}

	fn replace_selection(&mut self, range: Range, text: &str) {
		let pos = self.content.replace(range.start, range.end, text);
		let caret = self.carets.primary_mut();
		caret.clear_mark();
		caret.at(pos);
	}

	/// Replaces every caret's range, treating unmarked carets as empty
	/// ranges, and reseats at the replacement ends.
	fn replace_all_ranges(&mut self, f: &dyn Fn(&str) -> String) {
		let ranges = self.carets.ranges();
		let replaced = self.content.replace_ranges(&ranges, f);
		let points: Vec<Point> = replaced.iter().map(Range::max).collect();
		self.reseat(&points);
	}

	fn reseat(&mut self, points: &[Point]) {
		trace!(carets = self.carets.len(), points = points.len(), "reseat after edit");
		self.carets.reseat(points);
	}

	/// Inserts `text` at every caret, replacing selections.
	pub fn input(&mut self, text: &str) {
		if let Some(caret) = self.single() {
			match caret.marked_range() {
				Some(range) => self.replace_selection(range, text),
				None => {
					let pos = self.content.insert(caret.point(), text);
					self.carets.primary_mut().at(pos);
				}
			}
		} else if self.carets.has_marked() {
			self.replace_all_ranges(&|_: &str| text.to_string());
		} else {
			let points = self.caret_points();
			let points = self.content.insert_all(&points, text);
			self.reseat(&points);
		}
	}

	/// Deletes the character after every caret, or the selections.
	pub fn delete(&mut self) {
		if let Some(caret) = self.single() {
			match caret.marked_range() {
				Some(range) => self.replace_selection(range, ""),
				None => {
					self.content.delete(caret.point());
				}
			}
		} else if self.carets.has_marked() {
			self.replace_all_ranges(&|_: &str| String::new());
		} else {
			let points = self.caret_points();
			let points = self.content.delete_all(&points);
			self.reseat(&points);
		}
	}

	/// Deletes the character before every caret, or the selections.
	pub fn backspace(&mut self) {
		if let Some(caret) = self.single() {
			match caret.marked_range() {
				Some(range) => self.replace_selection(range, ""),
				None => {
					let pos = self.content.backspace(caret.point());
					self.carets.primary_mut().at(pos);
				}
			}
		} else if self.carets.has_marked() {
			self.replace_all_ranges(&|_: &str| String::new());
		} else {
			let points = self.caret_points();
			let points = self.content.backspace_all(&points);
			self.reseat(&points);
		}
	}

	/// Applies `transform` to every selection.
	///
	/// With `keep_selection` each caret keeps its selection, with its
	/// direction, over the replaced text. Otherwise the carets land at the
	/// end of the replaced text. Does nothing without a selection.
	pub fn replace(&mut self, transform: Transform, keep_selection: bool) {
		self.carets.normalize();
		if !self.carets.has_marked() {
			trace!(?transform, "replace: nothing selected");
			return;
		}
		let ranges = self.carets.ranges();
		let replaced = self.content.replace_ranges(&ranges, &|text: &str| transform.apply(text));
		if keep_selection {
			self.carets.reseat_ranges(&replaced);
		} else {
			let points: Vec<Point> = replaced.iter().map(Range::max).collect();
			self.reseat(&points);
		}
	}

	/// Inserts the configured tab text, or indents the selections.
	///
	/// With `with_select` the selections are unindented instead.
	pub fn tab(&mut self, with_select: bool) {
		self.carets.normalize();
		match (with_select, self.carets.has_marked()) {
			(false, false) => {
				let tab = self.config.tab.clone();
				self.input(&tab);
			}
			(false, true) => self.replace(Transform::Indent, true),
			(true, true) => self.replace(Transform::Unindent, true),
			(true, false) => {}
		}
	}

	pub fn undo(&mut self) {
		let points = self.content.undo();
		if !points.is_empty() {
			self.carets.at(points);
		}
	}

	pub fn redo(&mut self) {
		let points = self.content.redo();
		if !points.is_empty() {
			self.carets.at(points);
		}
	}

	/// Selects the whole document with a single caret at its end.
	pub fn select_all(&mut self) {
		let end = self.document_end();
		self.carets.unique().mark_to(Point::ZERO, end);
	}

	/// Collapses to the primary caret, clearing its selection and any find
	/// highlights.
	pub fn escape(&mut self) {
		self.carets.unique().clear_mark();
		self.highlights.clear();
	}

	/// Copies the selected text, one selection per line, into the register.
	///
	/// Returns the copied text. Without a selection the register is kept.
	pub fn copy(&mut self) -> String {
		let text = self
			.carets
			.marked()
			.iter()
			.map(|range| self.content.text(range.min(), range.max()))
			.collect::<Vec<_>>()
			.join("\n");
		if !text.is_empty() {
			self.register.clone_from(&text);
		}
		text
	}

	/// Copies the selected text and deletes it.
	pub fn cut(&mut self) -> String {
		let text = self.copy();
		if self.carets.has_marked() {
			self.replace_all_ranges(&|_: &str| String::new());
		}
		text
	}

	/// Inserts `text` like [`input`](Self::input). Empty text is ignored.
	pub fn paste(&mut self, text: &str) {
		if !text.is_empty() {
			self.input(text);
		}
	}

	/// Highlights every occurrence of `pattern` and returns them.
	pub fn find_all(&mut self, pattern: &str) -> &[Range] {
		self.highlights = self.content.find_all(pattern);
		debug!(pattern, hits = self.highlights.len(), "find all");
		&self.highlights
	}

	/// Shows uncommitted IME text at the primary caret.
	pub fn ime_flush(&mut self, text: &str) {
		let point = self.carets.primary().point();
		let pos = self.content.insert_flush(point, text);
		self.carets.primary_mut().flush_at(pos);
	}

	/// Replaces the uncommitted IME text with `text`.
	pub fn ime_commit(&mut self, text: &str) {
		self.ime_cancel();
		self.input(text);
	}

	/// Drops the uncommitted IME text.
	pub fn ime_cancel(&mut self) {
		self.content.clear_flush();
		self.carets.primary_mut().clear_flush();
	}

	/// Returns true while IME text is uncommitted.
	pub fn is_composing(&self) -> bool {
		self.carets.primary().has_flush()
	}

	/// Returns the primary caret position for persistence.
	pub fn caret_position(&self) -> CaretPosition {
		self.carets.primary().point().into()
	}

	/// Moves to a persisted caret position, clamped to the document.
	pub fn restore_caret_position(&mut self, pos: CaretPosition) {
		let point = self.clamp(pos.into());
		self.carets.at([point]);
	}

	fn document_end(&self) -> Point {
		let row = self.content.rows().saturating_sub(1);
		Point::new(row, self.content.row_len(row))
	}

	/// Clamps `point` to an existing row and column.
	fn clamp(&self, point: Point) -> Point {
		let row = point.row.min(self.content.rows().saturating_sub(1));
		Point::new(row, point.col.min(self.content.row_len(row)))
	}
}
