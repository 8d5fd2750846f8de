use std::cmp::Ordering;

use proptest::prelude::*;

use super::*;

fn p(row: usize, col: usize) -> Point {
	Point::new(row, col)
}

fn marked(mark: Point, point: Point) -> Caret {
	let mut caret = Caret::at_point(mark);
	caret.mark_to(mark, point);
	caret
}

#[test]
fn direction_follows_point_relative_to_mark() {
	let mut caret = Caret::default();
	assert_eq!(caret.direction(), Ordering::Equal);

	caret.at(p(2, 4));
	assert_eq!(caret.direction(), Ordering::Equal);

	caret.mark();
	caret.at(p(2, 5));
	assert_eq!(caret.direction(), Ordering::Greater);

	caret.at(p(3, 0));
	assert_eq!(caret.direction(), Ordering::Greater);

	caret.at(p(2, 4));
	assert_eq!(caret.direction(), Ordering::Equal);
	assert_eq!(caret.selection(), Selection::Unmarked);

	caret.at(p(2, 3));
	assert_eq!(caret.direction(), Ordering::Less);

	caret.at(p(1, 6));
	assert_eq!(caret.direction(), Ordering::Less);

	caret.clear_mark();
	assert_eq!(caret.direction(), Ordering::Equal);
}

#[test]
fn at_resets_v_pos_and_flush() {
	let mut caret = Caret::new(1, 1);
	caret.at_with_v_pos(p(1, 2), 24.0);
	caret.flush_at(p(1, 5));
	assert_eq!(caret.v_pos(), Some(24.0));
	assert_eq!(caret.flushed_point(), p(1, 5));
	assert_eq!(caret.point(), p(1, 2));

	caret.at(p(2, 0));
	assert_eq!(caret.v_pos(), None);
	assert!(!caret.has_flush());
	assert_eq!(caret.flushed_point(), p(2, 0));
}

#[test]
fn float_at_sets_floating() {
	let mut caret = Caret::default();
	caret.float_at(p(0, 3));
	assert!(caret.is_floating());
	caret.clear_float();
	assert!(!caret.is_floating());
	assert_eq!(caret.point(), p(0, 3));
}

#[test]
fn mark_if_anchors_once() {
	let mut caret = Caret::new(0, 2);
	caret.mark_if(true);
	caret.at(p(0, 6));
	caret.mark_if(true);
	assert_eq!(caret.marked_point(), Some(p(0, 2)));
	caret.mark_if(false);
	assert!(!caret.is_marked());
}

#[test]
fn range_of_unmarked_caret_is_empty() {
	let caret = Caret::new(3, 3);
	assert_eq!(caret.range(), Range::point(p(3, 3)));
	assert_eq!(caret.marked_range(), None);
}

#[test]
fn merge_unmarked_requires_equal_points() {
	let mut a = Caret::default();
	let b = Caret::default();
	assert!(a.merge(&b));

	let c = Caret::new(0, 1);
	assert!(!a.merge(&c));
}

#[test]
fn merge_marked_absorbs_point_inside() {
	//        | 0 | 1 | 2 |
	// caret1 |-->|
	// caret2 |
	let mut caret1 = marked(p(0, 0), p(0, 1));
	let caret2 = Caret::default();
	assert!(caret1.merge(&caret2));
	assert_eq!(caret1.marked_point(), Some(p(0, 0)));
	assert_eq!(caret1.point(), p(0, 1));
}

#[test]
fn merge_marked_rejects_point_outside() {
	//        | 0 | 1 | 2 |
	// caret1 |-->|
	// caret2         |
	let mut caret1 = marked(p(0, 0), p(0, 1));
	let caret2 = Caret::new(0, 2);
	assert!(!caret1.merge(&caret2));
}

#[test]
fn merge_unmarked_adopts_enclosing_selection() {
	let mut inner = Caret::new(0, 4);
	let outer = marked(p(0, 8), p(0, 2));
	assert!(inner.merge(&outer));
	assert_eq!(inner.marked_point(), Some(p(0, 8)));
	assert_eq!(inner.point(), p(0, 2));
	assert_eq!(inner.direction(), Ordering::Less);
}

#[test]
fn merge_disjoint_selections_fails() {
	//        | 0 | 1 | 2 |
	// caret1 |-->|
	// caret2         |-->|
	let mut caret1 = marked(p(0, 0), p(0, 1));
	let caret2 = marked(p(0, 2), p(0, 3));
	assert!(!caret1.merge(&caret2));
}

#[test]
fn merge_forward_overlap_takes_union() {
	//        | 0 | 1 | 2 |
	// caret1 |------>|
	// caret2     |------>|
	let mut caret1 = marked(p(0, 0), p(0, 2));
	let caret2 = marked(p(0, 1), p(0, 3));
	assert!(caret1.merge(&caret2));
	assert_eq!(caret1.marked_point(), Some(p(0, 0)));
	assert_eq!(caret1.point(), p(0, 3));
}

#[test]
fn merge_forward_overlap_across_columns() {
	let mut a = marked(p(0, 0), p(0, 10));
	let b = marked(p(0, 5), p(0, 15));
	assert!(a.merge(&b));
	assert_eq!(a.marked_point(), Some(p(0, 0)));
	assert_eq!(a.point(), p(0, 15));
}

#[test]
fn merge_backward_overlap_takes_union() {
	let mut a = marked(p(0, 10), p(0, 0));
	let b = marked(p(0, 15), p(0, 5));
	assert!(a.merge(&b));
	assert_eq!(a.marked_point(), Some(p(0, 15)));
	assert_eq!(a.point(), p(0, 0));
}

#[test]
fn merge_opposite_directions_is_refused() {
	let mut a = marked(p(0, 0), p(0, 10));
	let b = marked(p(0, 15), p(0, 5));
	let before = a.clone();
	assert!(!a.merge(&b));
	assert_eq!(a, before);
}

fn arb_point() -> impl Strategy<Value = Point> {
	(0usize..4, 0usize..8).prop_map(|(row, col)| Point::new(row, col))
}

fn arb_caret() -> impl Strategy<Value = Caret> {
	(arb_point(), proptest::option::of(arb_point())).prop_map(|(point, mark)| match mark {
		Some(mark) => marked(mark, point),
		None => Caret::at_point(point),
	})
}

proptest! {
	#[test]
	fn prop_failed_merge_leaves_caret_untouched(a in arb_caret(), b in arb_caret()) {
		let mut merged = a.clone();
		if !merged.merge(&b) {
			prop_assert_eq!(merged, a);
		}
	}

	#[test]
	fn prop_successful_merge_covers_both(a in arb_caret(), b in arb_caret()) {
		let mut merged = a.clone();
		if merged.merge(&b) {
			let range = merged.range();
			prop_assert!(range.contains(b.point()));
			prop_assert!(range.contains(a.point()));
		}
	}
}
