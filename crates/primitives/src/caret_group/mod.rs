use std::cmp::Ordering;

use smallvec::{SmallVec, smallvec};
use tracing::{trace, warn};

use crate::caret::Caret;
use crate::point::{Point, Range};


/// Stable identity of a caret within its group.
///
/// Ids survive sorting and removal of other carets, so the primary caret is
/// tracked by id rather than by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaretId(u64);

#[derive(Debug, Clone, PartialEq)]
struct Entry {
	id: CaretId,
	caret: Caret,
}

/// The ordered carets of one document, with a designated primary.
///
/// A group always contains at least one caret. After [`normalize`] the carets
/// are sorted by point and no two neighbours are mergeable. Every read view
/// normalizes first; [`toggle`] is the one mutator that leaves the group
/// un-normalized until the next read.
///
/// [`normalize`]: Self::normalize
/// [`toggle`]: Self::toggle
#[derive(Debug, Clone)]
pub struct CaretGroup {
	entries: SmallVec<[Entry; 1]>,
	primary: CaretId,
	next_id: u64,
	dirty: bool,
}

impl Default for CaretGroup {
	fn default() -> Self {
		Self::new()
	}
}

impl CaretGroup {
	/// Creates a group holding a single caret at the origin.
	pub fn new() -> Self {
		let id = CaretId(0);
		Self {
			entries: smallvec![Entry {
				id,
				caret: Caret::default(),
			}],
			primary: id,
			next_id: 1,
			dirty: false,
		}
	}

	fn entry(&mut self, caret: Caret) -> Entry {
		let id = CaretId(self.next_id);
		self.next_id += 1;
		Entry { id, caret }
	}

	/// Returns the number of carets, which may include mergeable duplicates
	/// right after [`toggle`](Self::toggle).
	#[allow(clippy::len_without_is_empty, reason = "a caret group is never empty")]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if the group has not been modified since the last normalize.
	pub fn is_normalized(&self) -> bool {
		!self.dirty
	}

	/// Returns the id of the primary caret.
	pub fn primary_id(&self) -> CaretId {
		self.primary
	}

	fn primary_index(&self) -> usize {
		self.entries.iter().position(|e| e.id == self.primary).unwrap_or(0)
	}

	/// Returns the primary caret.
	pub fn primary(&self) -> &Caret {
		&self.entries[self.primary_index()].caret
	}

	/// Returns the primary caret for in-place mutation.
	///
	/// Moving the primary may make it overlap another caret; the group is
	/// flagged for normalization.
	pub fn primary_mut(&mut self) -> &mut Caret {
		let index = self.primary_index();
		self.dirty = self.entries.len() > 1;
		&mut self.entries[index].caret
	}

	/// Returns the caret with the given id, if it is still in the group.
	pub fn get(&self, id: CaretId) -> Option<&Caret> {
		self.entries.iter().find(|e| e.id == id).map(|e| &e.caret)
	}

	/// Returns true if any caret carries a mark.
	pub fn has_marked(&self) -> bool {
		self.entries.iter().any(|e| e.caret.is_marked())
	}

	/// Returns the rendered point of each caret, ascending.
	pub fn points(&mut self) -> Vec<Point> {
		self.normalize();
		self.entries.iter().map(|e| e.caret.flushed_point()).collect()
	}

	/// Returns the carets, ascending.
	pub fn carets(&mut self) -> impl ExactSizeIterator<Item = &Caret> + '_ {
		self.normalize();
		self.entries.iter().map(|e| &e.caret)
	}

	/// Returns the carets for in-place mutation, ascending.
	///
	/// The group is flagged for normalization because the caller may move
	/// carets onto each other.
	pub fn carets_mut(&mut self) -> impl ExactSizeIterator<Item = &mut Caret> + '_ {
		self.normalize();
		self.dirty = true;
		self.entries.iter_mut().map(|e| &mut e.caret)
	}

	/// Returns the marked ranges only.
	pub fn marked(&mut self) -> Vec<Range> {
		self.normalize();
		self.entries.iter().filter_map(|e| e.caret.marked_range()).collect()
	}

	/// Returns one range per caret; unmarked carets yield an empty range.
	pub fn ranges(&mut self) -> Vec<Range> {
		self.normalize();
		self.entries.iter().map(|e| e.caret.range()).collect()
	}

	/// Replaces all carets with one unmarked caret per point.
	///
	/// The first point becomes the primary. An empty input leaves the group
	/// unchanged.
	pub fn at(&mut self, points: impl IntoIterator<Item = Point>) {
		let mut entries: SmallVec<[Entry; 1]> = SmallVec::new();
		for point in points {
			let entry = self.entry(Caret::at_point(point));
			entries.push(entry);
		}
		let Some(first) = entries.first() else {
			return;
		};
		trace!(before = self.entries.len(), after = entries.len(), "carets reseated");
		self.primary = first.id;
		self.entries = entries;
		self.dirty = true;
		self.normalize();
	}

	/// Appends one unmarked caret per point, keeping the existing carets.
	pub fn add(&mut self, points: impl IntoIterator<Item = Point>) {
		for point in points {
			let entry = self.entry(Caret::at_point(point));
			self.entries.push(entry);
			self.dirty = true;
		}
		self.normalize();
	}

	/// Appends a single caret at `point`.
	pub fn add_at(&mut self, point: Point) {
		self.add(std::iter::once(point));
	}

	/// Removes the caret sitting exactly at `point`, or adds one there.
	///
	/// Removing the last caret replaces it with a fresh caret at `point`.
	/// Unlike the other mutators this does not normalize: the group is
	/// normalized again by the next read.
	pub fn toggle(&mut self, point: Point) {
		let before = self.entries.len();
		let primary_removed = self.get(self.primary).is_some_and(|c| c.point() == point);
		self.entries.retain(|e| e.caret.point() != point);
		self.dirty = true;

		if self.entries.len() == before {
			let entry = self.entry(Caret::at_point(point));
			self.entries.push(entry);
			return;
		}

		if self.entries.is_empty() {
			let entry = self.entry(Caret::at_point(point));
			self.primary = entry.id;
			self.entries.push(entry);
			return;
		}

		if primary_removed {
			self.primary = self.entries[0].id;
		}
	}

	/// Collapses the group to the primary caret alone.
	pub fn unique(&mut self) -> &mut Caret {
		let index = self.primary_index();
		if self.entries.len() > 1 {
			let primary = self.entries.swap_remove(index);
			self.entries.clear();
			self.entries.push(primary);
		}
		self.dirty = false;
		&mut self.entries[0].caret
	}

	/// Clears the mark of every caret.
	///
	/// Carets kept apart only by their selections may now coincide; the group
	/// is flagged for normalization.
	pub fn clear_marks(&mut self) {
		for entry in &mut self.entries {
			entry.caret.clear_mark();
		}
		self.dirty |= self.entries.len() > 1;
	}

	/// Moves every caret to the matching point of `points`, given in caret
	/// order, clearing marks and keeping caret identities.
	///
	/// This is the atomic update applied after a batch edit. If the number of
	/// points does not match the number of carets it behaves like
	/// [`at`](Self::at).
	pub fn reseat(&mut self, points: &[Point]) {
		self.normalize();
		if points.len() != self.entries.len() {
			self.at(points.iter().copied());
			return;
		}
		for (entry, point) in self.entries.iter_mut().zip(points) {
			entry.caret = Caret::at_point(*point);
		}
		trace!(carets = points.len(), "carets reseated in place");
		self.dirty = true;
		self.normalize();
	}

	/// Re-derives each caret's mark and point from `ranges`, given in caret
	/// order, keeping each caret's selection direction.
	///
	/// Empty ranges leave an unmarked caret at the range's point. If the
	/// number of ranges does not match the number of carets, the carets are
	/// reseated at the range ends instead.
	pub fn reseat_ranges(&mut self, ranges: &[Range]) {
		self.normalize();
		if ranges.len() != self.entries.len() {
			warn!(
				carets = self.entries.len(),
				ranges = ranges.len(),
				"range count does not match caret count, reseating at range ends"
			);
			self.at(ranges.iter().map(Range::max));
			return;
		}

		let entries: SmallVec<[Entry; 1]> = self
			.entries
			.iter()
			.zip(ranges)
			.map(|(entry, range)| {
				let mut caret = Caret::at_point(range.max());
				if !range.is_empty() {
					match entry.caret.direction() {
						Ordering::Less => caret.mark_to(range.max(), range.min()),
						Ordering::Equal | Ordering::Greater => caret.mark_to(range.min(), range.max()),
					}
				}
				Entry { id: entry.id, caret }
			})
			.collect();
		trace!(carets = entries.len(), "selections reseated");
		self.entries = entries;
		self.dirty = true;
		self.normalize();
	}

	/// Sorts the carets and folds mergeable neighbours together, repeating
	/// until no neighbours merge.
	///
	/// The primary keeps its identity if it survives the fold. Otherwise the
	/// first caret on the old primary's row takes over, or failing that the
	/// first caret.
	pub fn normalize(&mut self) {
		if !self.dirty && !self.entries.is_empty() {
			return;
		}
		self.dirty = false;

		let primary_row = self.get(self.primary).map(Caret::row);

		let before = self.entries.len();
		// An absorbed selection can reach back over carets already folded, so
		// fold again until a pass merges nothing.
		loop {
			let len = self.entries.len();
			self.entries.sort_by_key(|e| e.caret.point());
			self.entries = fold(std::mem::take(&mut self.entries).into_iter());
			if self.entries.len() == len {
				break;
			}
		}

		if self.entries.is_empty() {
			let entry = self.entry(Caret::default());
			self.primary = entry.id;
			self.entries.push(entry);
			return;
		}

		if before != self.entries.len() {
			trace!(before, after = self.entries.len(), "carets merged");
		}

		if self.get(self.primary).is_none() {
			self.primary = primary_row
				.and_then(|row| self.entries.iter().find(|e| e.caret.row() == row))
				.unwrap_or(&self.entries[0])
				.id;
		}
	}
}

fn fold(entries: impl Iterator<Item = Entry>) -> SmallVec<[Entry; 1]> {
	let mut merged: SmallVec<[Entry; 1]> = SmallVec::new();
	for entry in entries {
		if let Some(last) = merged.last_mut()
			&& last.caret.merge(&entry.caret)
		{
			continue;
		}
		merged.push(entry);
	}
	merged
}
