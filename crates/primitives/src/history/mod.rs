//! Bounded log of recent actions, used to drive the repeat command.
//!
//! The log only ever holds one editing session: a non-repeatable action or
//! a pause longer than the configured gap starts it over.

use std::collections::VecDeque;
use std::ops::Range;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::action::Action;


/// Default number of retained actions.
pub const DEFAULT_CAPACITY: usize = 100;

/// Default pause after which the log starts over.
pub const DEFAULT_GAP: Duration = Duration::from_secs(3);

/// Finds a tail of `log` made of two adjacent, identical blocks.
///
/// Split points are scanned from the middle towards the end, so the longest
/// repeated block wins. Returns the index range of the right-hand block. A
/// single entry trivially repeats itself.
pub fn detect_repetition<T: PartialEq>(log: &[T]) -> Option<Range<usize>> {
	let n = log.len();
	match n {
		0 => return None,
		1 => return Some(0..1),
		_ => {}
	}
	(n.div_ceil(2)..n).find_map(|i| {
		let len = n - i;
		(log[i - len..i] == log[i..n]).then_some(i..n)
	})
}

/// Recent repeatable actions of one document, oldest first.
#[derive(Debug, Clone)]
pub struct ActionHistory {
	actions: VecDeque<Action>,
	last_at: Option<Instant>,
	capacity: usize,
	gap: Duration,
}

impl Default for ActionHistory {
	fn default() -> Self {
		Self::new()
	}
}

impl ActionHistory {
	/// Creates an empty history with the default capacity and gap.
	pub fn new() -> Self {
		Self::with_limits(DEFAULT_CAPACITY, DEFAULT_GAP)
	}

	/// Creates an empty history keeping at most `capacity` actions (at least
	/// one) and starting over after a pause longer than `gap`.
	pub fn with_limits(capacity: usize, gap: Duration) -> Self {
		let capacity = capacity.max(1);
		Self {
			actions: VecDeque::with_capacity(capacity),
			last_at: None,
			capacity,
			gap,
		}
	}

	pub fn len(&self) -> usize {
		self.actions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.actions.is_empty()
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Iterates the recorded actions, oldest first.
	pub fn actions(&self) -> impl DoubleEndedIterator<Item = &Action> {
		self.actions.iter()
	}

	/// Returns the most recent action.
	pub fn peek_last(&self) -> Option<&Action> {
		self.actions.back()
	}

	pub fn clear(&mut self) {
		self.actions.clear();
		self.last_at = None;
	}

	/// Records `action` as happening now. See [`offer_at`](Self::offer_at).
	pub fn offer(&mut self, action: Action) -> bool {
		self.offer_at(action, Instant::now())
	}

	/// Records `action` as happening at `at`.
	///
	/// Markers are ignored. A non-repeatable action clears the log instead of
	/// being recorded. Returns true if the action was appended.
	pub fn offer_at(&mut self, action: Action, at: Instant) -> bool {
		if action.is_marker() {
			return false;
		}

		if !action.is_repeatable() {
			if !self.actions.is_empty() {
				trace!(cleared = self.actions.len(), ?action, "history cleared by non-repeatable action");
			}
			self.clear();
			return false;
		}

		if let Some(last) = self.last_at
			&& at.saturating_duration_since(last) > self.gap
		{
			trace!(cleared = self.actions.len(), "history cleared after pause");
			self.actions.clear();
		}

		if self.actions.len() == self.capacity {
			self.actions.pop_front();
		}
		self.actions.push_back(action);
		self.last_at = Some(at);
		true
	}

	/// Drops everything outside `range`.
	pub fn truncate_to(&mut self, range: Range<usize>) {
		let end = range.end.min(self.actions.len());
		let start = range.start.min(end);
		self.actions.truncate(end);
		self.actions.drain(..start);
	}

	/// Returns the repeated tail block, collapsing the log down to it so that
	/// replaying the block and offering it again repeats once more.
	///
	/// Returns an empty vector when the tail does not repeat.
	pub fn repetition(&mut self) -> Vec<Action> {
		let Some(range) = detect_repetition(self.actions.make_contiguous()) else {
			return Vec::new();
		};
		trace!(len = range.len(), from = self.actions.len(), "repetition detected");
		self.truncate_to(range);
		self.actions.iter().cloned().collect()
	}
}
