use proptest::prelude::*;

use super::*;

fn p(row: usize, col: usize) -> Point {
	Point::new(row, col)
}

#[test]
fn test_insert_returns_end() {
	let mut content = RopeContent::from("hello");
	assert_eq!(content.insert(p(0, 5), " world"), p(0, 11));
	assert_eq!(content.to_string(), "hello world");
}

#[test]
fn test_insert_newline_moves_to_next_row() {
	let mut content = RopeContent::from("ab");
	assert_eq!(content.insert(p(0, 1), "\n"), p(1, 0));
	assert_eq!(content.rows(), 2);
	assert_eq!(content.row_len(0), 1);
}

#[test]
fn test_insert_all_shifts_later_points_on_same_row() {
	let mut content = RopeContent::from("hello world");
	let points = content.insert_all(&[p(0, 2), p(0, 5)], "ab");
	assert_eq!(content.to_string(), "heablloab world");
	assert_eq!(points, vec![p(0, 4), p(0, 9)]);
}

#[test]
fn test_insert_all_keeps_input_order() {
	let mut content = RopeContent::from("abc\ndef");
	let points = content.insert_all(&[p(1, 1), p(0, 1)], "-");
	assert_eq!(content.to_string(), "a-bc\nd-ef");
	assert_eq!(points, vec![p(1, 2), p(0, 2)]);
}

#[test]
fn test_delete_returns_deleted_char() {
	let mut content = RopeContent::from("abc");
	assert_eq!(content.delete(p(0, 1)), "b");
	assert_eq!(content.delete(p(0, 9)), "");
	assert_eq!(content.to_string(), "ac");
}

#[test]
fn test_delete_at_row_end_joins_rows() {
	let mut content = RopeContent::from("ab\ncd");
	content.delete(p(0, 2));
	assert_eq!(content.to_string(), "abcd");
}

#[test]
fn test_delete_all() {
	let mut content = RopeContent::from("abcdef");
	let points = content.delete_all(&[p(0, 0), p(0, 3)]);
	assert_eq!(content.to_string(), "bcef");
	assert_eq!(points, vec![p(0, 0), p(0, 2)]);
}

#[test]
fn test_backspace_all() {
	let mut content = RopeContent::from("abc\ndef");
	let points = content.backspace_all(&[p(0, 0), p(0, 2), p(1, 0)]);
	assert_eq!(content.to_string(), "acdef");
	assert_eq!(points, vec![p(0, 0), p(0, 1), p(0, 2)]);
}

#[test]
fn test_backspace_at_origin_is_noop() {
	let mut content = RopeContent::from("abc");
	assert_eq!(content.backspace(p(0, 0)), p(0, 0));
	assert!(!content.can_undo());
}

#[test]
fn test_replace_either_direction() {
	let mut content = RopeContent::from("hello world");
	assert_eq!(content.replace(p(0, 11), p(0, 6), "there"), p(0, 11));
	assert_eq!(content.to_string(), "hello there");
}

#[test]
fn test_replace_ranges_reports_extents() {
	let mut content = RopeContent::from("one two\nthree");
	let ranges = content.replace_ranges(
		&[
			Range::new(p(0, 0), p(0, 3)),
			Range::new(p(1, 5), p(1, 0)),
		],
		&|s: &str| s.to_uppercase() + "!",
	);
	assert_eq!(content.to_string(), "ONE! two\nTHREE!");
	assert_eq!(
		ranges,
		vec![
			Range::new(p(0, 0), p(0, 4)),
			Range::new(p(1, 0), p(1, 6)),
		]
	);
}

#[test]
fn test_undo_redo_batch() {
	let mut content = RopeContent::from("abc\nabc");
	content.insert_all(&[p(0, 1), p(1, 1)], "xy");
	assert_eq!(content.to_string(), "axybc\naxybc");

	let undone = content.undo();
	assert_eq!(content.to_string(), "abc\nabc");
	assert_eq!(undone, vec![p(0, 1), p(1, 1)]);

	let redone = content.redo();
	assert_eq!(content.to_string(), "axybc\naxybc");
	assert_eq!(redone, vec![p(0, 3), p(1, 3)]);
	assert!(!content.can_redo());
}

#[test]
fn test_undo_restores_deleted_text() {
	let mut content = RopeContent::from("hello world");
	content.replace(p(0, 0), p(0, 6), "");
	assert_eq!(content.to_string(), "world");
	assert_eq!(content.undo(), vec![p(0, 6)]);
	assert_eq!(content.to_string(), "hello world");
}

#[test]
fn test_new_edit_drops_redo() {
	let mut content = RopeContent::from("a");
	content.insert(p(0, 1), "b");
	content.undo();
	assert!(content.can_redo());
	content.insert(p(0, 0), "c");
	assert!(!content.can_redo());
	assert!(content.redo().is_empty());
}

#[test]
fn test_nothing_to_undo() {
	let mut content = RopeContent::new();
	assert!(content.undo().is_empty());
}

#[test]
fn test_text_and_find_all() {
	let content = RopeContent::from("foo bar\nbar foo");
	assert_eq!(content.text(p(0, 4), p(1, 3)), "bar\nbar");
	assert_eq!(
		content.find_all("foo"),
		vec![
			Range::new(p(0, 0), p(0, 3)),
			Range::new(p(1, 4), p(1, 7)),
		]
	);
	assert!(content.find_all("").is_empty());
}

#[test]
fn test_out_of_range_points_are_clamped() {
	let mut content = RopeContent::from("ab\ncd");
	assert_eq!(content.insert(p(0, 10), "!"), p(0, 3));
	assert_eq!(content.insert(p(9, 0), "?"), p(1, 1));
	assert_eq!(content.to_string(), "ab!\n?cd");
}

#[test]
fn test_row_len_ignores_line_breaks() {
	let content = RopeContent::from("ab\r\ncde\n");
	assert_eq!(content.rows(), 3);
	assert_eq!(content.row_len(0), 2);
	assert_eq!(content.row_len(1), 3);
	assert_eq!(content.row_len(2), 0);
	assert_eq!(content.row_len(7), 0);
}

#[test]
fn test_flush_is_not_recorded() {
	let mut content = RopeContent::from("ab");
	assert_eq!(content.insert_flush(p(0, 1), "xyz"), p(0, 4));
	assert_eq!(content.to_string(), "axyzb");
	assert_eq!(content.insert_flush(p(0, 1), "q"), p(0, 2));
	assert_eq!(content.to_string(), "aqb");
	content.clear_flush();
	assert_eq!(content.to_string(), "ab");
	assert!(!content.can_undo());
}

#[test]
fn test_edit_drops_pending_flush() {
	let mut content = RopeContent::from("ab");
	content.insert_flush(p(0, 1), "xyz");
	content.insert(p(0, 1), "Z");
	assert_eq!(content.to_string(), "aZb");
}

fn arb_text() -> impl Strategy<Value = String> {
	proptest::collection::vec(prop_oneof![Just("a"), Just("bc"), Just("\n"), Just("é")], 0..12)
		.prop_map(|parts| parts.concat())
}

fn arb_points() -> impl Strategy<Value = Vec<Point>> {
	proptest::collection::vec((0usize..4, 0usize..6).prop_map(|(row, col)| Point::new(row, col)), 1..5)
}

proptest! {
	#[test]
	fn prop_batch_insert_undo_restores_text(
		text in arb_text(),
		points in arb_points(),
		insert in arb_text(),
	) {
		let mut content = RopeContent::from(text.as_str());
		let ends = content.insert_all(&points, &insert);
		prop_assert_eq!(ends.len(), points.len());
		content.undo();
		prop_assert_eq!(content.to_string(), text);
	}

	#[test]
	fn prop_batch_backspace_redo_matches(text in arb_text(), points in arb_points()) {
		let mut content = RopeContent::from(text.as_str());
		content.backspace_all(&points);
		let edited = content.to_string();
		content.undo();
		prop_assert_eq!(content.to_string(), text);
		content.redo();
		prop_assert_eq!(content.to_string(), edited);
	}
}
