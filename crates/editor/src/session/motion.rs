//! Caret motion and pointer handling.
//!
//! Horizontal coordinates are column units here: up and down keep the
//! column a caret started from in its `v_pos`, so crossing a short row does
//! not lose it.

use multicaret_primitives::Point;
use tracing::trace;

use super::EditSession;
use crate::content::Content;

impl<C: Content> EditSession<C> {
	pub fn caret_right(&mut self, with_select: bool) {
		let content = &self.content;
		for caret in self.carets.carets_mut() {
			caret.mark_if(with_select);
			let (row, col) = (caret.row(), caret.col());
			if col < content.row_len(row) {
				caret.at(Point::new(row, col + 1));
			} else if row + 1 < content.rows() {
				caret.at(Point::new(row + 1, 0));
			}
		}
	}

	pub fn caret_left(&mut self, with_select: bool) {
		let content = &self.content;
		for caret in self.carets.carets_mut() {
			caret.mark_if(with_select);
			let row = caret.row();
			match caret.col().min(content.row_len(row)) {
				0 if row == 0 => {}
				0 => caret.at(Point::new(row - 1, content.row_len(row - 1))),
				col => caret.at(Point::new(row, col - 1)),
			}
		}
	}

	pub fn caret_up(&mut self, with_select: bool) {
		let content = &self.content;
		for caret in self.carets.carets_mut() {
			caret.mark_if(with_select);
			if caret.row() == 0 {
				continue;
			}
			let x = caret.v_pos().unwrap_or(caret.col() as f64);
			let row = caret.row() - 1;
			caret.at_with_v_pos(Point::new(row, column(x).min(content.row_len(row))), x);
		}
	}

	pub fn caret_down(&mut self, with_select: bool) {
		let content = &self.content;
		for caret in self.carets.carets_mut() {
			caret.mark_if(with_select);
			if caret.row() + 1 >= content.rows() {
				continue;
			}
			let x = caret.v_pos().unwrap_or(caret.col() as f64);
			let row = caret.row() + 1;
			caret.at_with_v_pos(Point::new(row, column(x).min(content.row_len(row))), x);
		}
	}

	pub fn home(&mut self, with_select: bool) {
		for caret in self.carets.carets_mut() {
			caret.mark_if(with_select);
			caret.at(Point::new(caret.row(), 0));
		}
	}

	pub fn end(&mut self, with_select: bool) {
		let content = &self.content;
		for caret in self.carets.carets_mut() {
			caret.mark_if(with_select);
			let row = caret.row();
			caret.at(Point::new(row, content.row_len(row)));
		}
	}

	/// Moves the primary caret up one page, dropping the other carets.
	pub fn page_up(&mut self, with_select: bool) {
		let rows = self.config.page_rows;
		self.page_move(with_select, |row| row.saturating_sub(rows));
	}

	/// Moves the primary caret down one page, dropping the other carets.
	pub fn page_down(&mut self, with_select: bool) {
		let rows = self.config.page_rows;
		let last = self.content.rows().saturating_sub(1);
		self.page_move(with_select, |row| row.saturating_add(rows).min(last));
	}

	fn page_move(&mut self, with_select: bool, target: impl FnOnce(usize) -> usize) {
		let content = &self.content;
		let caret = self.carets.unique();
		caret.mark_if(with_select);
		let x = caret.v_pos().unwrap_or(caret.col() as f64);
		let row = target(caret.row());
		caret.at_with_v_pos(Point::new(row, column(x).min(content.row_len(row))), x);
	}

	/// Collapses to one unmarked caret at the start of `row`.
	pub fn goto(&mut self, row: usize) {
		let point = self.clamp(Point::new(row, 0));
		let caret = self.carets.unique();
		caret.clear_mark();
		caret.at(point);
	}

	/// Handles a plain click: one caret at `point`.
	///
	/// A click that ends a drag only leaves drag mode, keeping the selection.
	pub fn click(&mut self, point: Point) {
		let point = self.clamp(point);
		let caret = self.carets.unique();
		if caret.is_floating() {
			caret.clear_float();
			return;
		}
		caret.clear_mark();
		caret.at(point);
	}

	/// Adds a caret at `point`, or removes the one already there.
	pub fn toggle_caret(&mut self, point: Point) {
		let point = self.clamp(point);
		self.carets.toggle(point);
	}

	/// Extends the selection of the primary caret to `point` while dragging.
	pub fn drag_to(&mut self, point: Point) {
		let point = self.clamp(point);
		let caret = self.carets.unique();
		caret.mark_if(true);
		caret.float_at(point);
	}

	/// Ends a drag.
	pub fn release(&mut self) {
		self.carets.primary_mut().clear_float();
	}

	/// Adds one caret per row between the primary caret and `to_row`, at the
	/// primary caret's column or the row end if shorter.
	pub fn add_column_carets(&mut self, to_row: usize) {
		let to_row = to_row.min(self.content.rows().saturating_sub(1));
		let origin = self.carets.unique().point();
		if to_row == origin.row {
			return;
		}
		let rows = if to_row < origin.row {
			to_row..origin.row
		} else {
			origin.row + 1..to_row + 1
		};
		let content = &self.content;
		let points: Vec<Point> = rows
			.map(|row| Point::new(row, origin.col.min(content.row_len(row))))
			.collect();
		trace!(from = origin.row, to_row, added = points.len(), "column carets");
		self.carets.add(points);
	}
}

fn column(x: f64) -> usize {
	x.max(0.0).round() as usize
}
