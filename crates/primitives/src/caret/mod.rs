use std::cmp::Ordering;

use crate::point::{Point, Range};

#[cfg(test)]
mod tests;

/// Selection state of a caret, derived from its point and mark.
///
/// A mark sitting on the point carries no extent and counts as
/// [`Unmarked`](Self::Unmarked).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
	/// No active selection.
	Unmarked,
	/// Mark before point. The range runs from mark to point.
	Forward(Range),
	/// Mark after point. The range runs from mark to point.
	Backward(Range),
}

/// A single cursor, optionally anchoring a selection.
///
/// The rendered position and the logical position differ only while an IME
/// composition is in flight: [`flushed_point`](Self::flushed_point) returns
/// the composition end, [`point`](Self::point) the committed position.
#[derive(Debug, Clone, PartialEq)]
pub struct Caret {
	point: Point,
	mark: Option<Point>,
	floating: bool,
	flush: Option<Point>,
	/// Cached horizontal coordinate for vertical navigation.
	v_pos: Option<f64>,
}

impl Default for Caret {
	fn default() -> Self {
		Self::at_point(Point::ZERO)
	}
}

impl Caret {
	/// Creates an unmarked caret at `point`.
	pub fn at_point(point: Point) -> Self {
		Self {
			point,
			mark: None,
			floating: false,
			flush: None,
			v_pos: None,
		}
	}

	/// Creates an unmarked caret at `(row, col)`.
	pub fn new(row: usize, col: usize) -> Self {
		Self::at_point(Point::new(row, col))
	}

	/// Returns the logical position.
	#[inline]
	pub fn point(&self) -> Point {
		self.point
	}

	/// Returns the row of the logical position.
	#[inline]
	pub fn row(&self) -> usize {
		self.point.row
	}

	/// Returns the column of the logical position.
	#[inline]
	pub fn col(&self) -> usize {
		self.point.col
	}

	/// Returns true if the caret sits at the origin.
	pub fn is_zero(&self) -> bool {
		self.point.is_zero()
	}

	/// Moves the caret, forgetting the cached horizontal coordinate and any
	/// pending IME flush point.
	pub fn at(&mut self, point: Point) {
		self.point = point;
		self.v_pos = None;
		self.flush = None;
	}

	/// Moves the caret and remembers `v_pos` for subsequent vertical moves.
	pub fn at_with_v_pos(&mut self, point: Point, v_pos: f64) {
		self.at(point);
		self.v_pos = Some(v_pos);
	}

	/// Moves the caret as part of a mouse drag.
	pub fn float_at(&mut self, point: Point) {
		self.at(point);
		self.floating = true;
	}

	/// Leaves drag mode.
	pub fn clear_float(&mut self) {
		self.floating = false;
	}

	#[inline]
	pub fn is_floating(&self) -> bool {
		self.floating
	}

	/// Sets the rendered position used during IME composition.
	pub fn flush_at(&mut self, point: Point) {
		self.flush = Some(point);
	}

	/// Drops the IME flush point, rendering at the logical position again.
	pub fn clear_flush(&mut self) {
		self.flush = None;
	}

	#[inline]
	pub fn has_flush(&self) -> bool {
		self.flush.is_some()
	}

	/// Returns the flush point if one is set, otherwise the logical point.
	pub fn flushed_point(&self) -> Point {
		self.flush.unwrap_or(self.point)
	}

	/// Returns the cached horizontal coordinate, if any.
	#[inline]
	pub fn v_pos(&self) -> Option<f64> {
		self.v_pos
	}

	/// Anchors a selection at the current point.
	pub fn mark(&mut self) {
		self.mark = Some(self.point);
	}

	/// Drops the selection anchor.
	pub fn clear_mark(&mut self) {
		self.mark = None;
	}

	/// Anchors a selection at `mark` and moves the caret to `point`.
	pub fn mark_to(&mut self, mark: Point, point: Point) {
		self.mark = Some(mark);
		self.at(point);
	}

	/// Clears the mark when `with_select` is false, otherwise anchors one if
	/// none exists yet. Called before every motion.
	pub fn mark_if(&mut self, with_select: bool) {
		if !with_select {
			self.clear_mark();
		} else if !self.is_marked() {
			self.mark();
		}
	}

	#[inline]
	pub fn is_marked(&self) -> bool {
		self.mark.is_some()
	}

	/// Returns the selection anchor, if any.
	#[inline]
	pub fn marked_point(&self) -> Option<Point> {
		self.mark
	}

	/// Returns `mark -> point` when marked.
	pub fn marked_range(&self) -> Option<Range> {
		self.mark.map(|mark| Range::new(mark, self.point))
	}

	/// Returns the marked range, or the empty range at the point.
	pub fn range(&self) -> Range {
		self.marked_range().unwrap_or(Range::point(self.point))
	}

	/// Returns the ordering of point relative to mark.
	///
	/// [`Ordering::Greater`] is a forward selection, [`Ordering::Less`] a
	/// backward one. Unmarked carets report [`Ordering::Equal`].
	pub fn direction(&self) -> Ordering {
		self.mark.map_or(Ordering::Equal, |mark| self.point.cmp(&mark))
	}

	/// Returns the selection as a tagged value.
	pub fn selection(&self) -> Selection {
		let range = self.range();
		match self.direction() {
			Ordering::Equal => Selection::Unmarked,
			Ordering::Greater => Selection::Forward(range),
			Ordering::Less => Selection::Backward(range),
		}
	}

	/// Tests whether `other` can be folded into this caret and, if so, folds it.
	///
	/// Returns false without touching `self` when the two are not mergeable.
	/// Selections running in opposite directions are never merged.
	pub fn merge(&mut self, other: &Caret) -> bool {
		match (self.selection(), other.selection()) {
			(Selection::Unmarked, Selection::Unmarked) => self.point == other.point,
			(Selection::Unmarked, Selection::Forward(range) | Selection::Backward(range)) => {
				if !range.contains(self.point) {
					return false;
				}
				self.mark = other.mark;
				self.point = other.point;
				true
			}
			(Selection::Forward(range) | Selection::Backward(range), Selection::Unmarked) => {
				range.contains(other.point)
			}
			(Selection::Forward(a), Selection::Forward(b)) => {
				if !a.intersects(&b) {
					return false;
				}
				self.mark = Some(a.start.min(b.start));
				self.point = a.end.max(b.end);
				true
			}
			(Selection::Backward(a), Selection::Backward(b)) => {
				if !a.intersects(&b) {
					return false;
				}
				self.mark = Some(a.start.max(b.start));
				self.point = a.end.min(b.end);
				true
			}
			(Selection::Forward(_), Selection::Backward(_))
			| (Selection::Backward(_), Selection::Forward(_)) => false,
		}
	}
}
