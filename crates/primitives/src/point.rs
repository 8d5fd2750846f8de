use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A logical text position: zero-based row, then column.
///
/// Points are opaque ordered keys at this layer. Whether a row or column
/// actually exists in the document is the content store's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
	/// Row (line) index.
	pub row: usize,
	/// Column index within the row.
	pub col: usize,
}

impl Point {
	/// The origin `(0, 0)`.
	pub const ZERO: Self = Self { row: 0, col: 0 };

	/// Creates a point at `(row, col)`.
	pub const fn new(row: usize, col: usize) -> Self {
		Self { row, col }
	}

	/// Returns true if this is the origin.
	#[inline]
	pub fn is_zero(&self) -> bool {
		*self == Self::ZERO
	}
}

impl Ord for Point {
	fn cmp(&self, other: &Self) -> Ordering {
		self.row.cmp(&other.row).then(self.col.cmp(&other.col))
	}
}

impl PartialOrd for Point {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl From<(usize, usize)> for Point {
	fn from((row, col): (usize, usize)) -> Self {
		Self::new(row, col)
	}
}

/// A pair of points.
///
/// Not normalized at construction: `start` may come after `end`, which is how
/// a backward selection is encoded. Use [`min`](Self::min) and
/// [`max`](Self::max) for the order-independent extremes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
	/// The first end as given by the caller.
	pub start: Point,
	/// The second end as given by the caller.
	pub end: Point,
}

impl Range {
	/// Creates a range from `start` to `end`.
	pub const fn new(start: Point, end: Point) -> Self {
		Self { start, end }
	}

	/// Creates an empty range at `point`.
	pub const fn point(point: Point) -> Self {
		Self::new(point, point)
	}

	/// Returns the smaller end.
	#[inline]
	pub fn min(&self) -> Point {
		std::cmp::min(self.start, self.end)
	}

	/// Returns the larger end.
	#[inline]
	pub fn max(&self) -> Point {
		std::cmp::max(self.start, self.end)
	}

	/// Returns true if both ends are the same point.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	/// Returns true if `point` lies within `[min, max]`, both ends inclusive.
	pub fn contains(&self, point: Point) -> bool {
		self.min() <= point && point <= self.max()
	}

	/// Returns true if either end of one range lies inside the other.
	pub fn intersects(&self, other: &Range) -> bool {
		self.contains(other.start)
			|| self.contains(other.end)
			|| other.contains(self.start)
			|| other.contains(self.end)
	}

	/// Returns the range with `start <= end`.
	pub fn ascending(&self) -> Self {
		Self::new(self.min(), self.max())
	}
}
