//! Persisted caret position, restored when a document is reopened.

use multicaret_primitives::Point;
use serde::{Deserialize, Serialize};

/// Row and column of the primary caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaretPosition {
	pub row: usize,
	pub col: usize,
}

impl From<Point> for CaretPosition {
	fn from(point: Point) -> Self {
		Self {
			row: point.row,
			col: point.col,
		}
	}
}

impl From<CaretPosition> for Point {
	fn from(pos: CaretPosition) -> Self {
		Point::new(pos.row, pos.col)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_toml_shape() {
		let pos = CaretPosition { row: 12, col: 4 };
		let text = toml::to_string(&pos).unwrap();
		assert_eq!(text, "row = 12\ncol = 4\n");
		assert_eq!(toml::from_str::<CaretPosition>(&text).unwrap(), pos);
	}

	#[test]
	fn test_point_conversion() {
		let point = Point::new(3, 9);
		assert_eq!(Point::from(CaretPosition::from(point)), point);
	}
}
