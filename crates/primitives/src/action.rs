//! Editor actions as recorded by [`ActionHistory`](crate::history::ActionHistory).

/// A text transform applied to selected text by [`Action::Replace`].
///
/// The set is closed so that two replace actions compare by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
	UpperCase,
	LowerCase,
	/// Prefix every line with one indentation unit.
	Indent,
	/// Strip one leading indentation unit (a tab or up to four spaces) per line.
	Unindent,
	/// Trim trailing whitespace from every line.
	Trim,
}

impl Transform {
	/// Applies the transform to `text`.
	pub fn apply(&self, text: &str) -> String {
		match self {
			Transform::UpperCase => text.to_uppercase(),
			Transform::LowerCase => text.to_lowercase(),
			Transform::Indent => map_lines(text, |line| {
				if line.is_empty() {
					line.to_string()
				} else {
					format!("    {line}")
				}
			}),
			Transform::Unindent => map_lines(text, |line| {
				if let Some(rest) = line.strip_prefix('\t') {
					return rest.to_string();
				}
				let spaces = line.chars().take(4).take_while(|c| *c == ' ').count();
				line[spaces..].to_string()
			}),
			Transform::Trim => map_lines(text, |line| line.trim_end().to_string()),
		}
	}
}

fn map_lines(text: &str, f: impl Fn(&str) -> String) -> String {
	text.split('\n').map(f).collect::<Vec<_>>().join("\n")
}

/// A user action.
///
/// Payloads participate in equality, which is what repetition detection
/// compares. Timestamps are kept by the history, not by the action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
	/// No-op marker.
	Empty,
	/// Replays the detected repetition.
	Repeat,

	Input(String),
	Replace {
		transform: Transform,
		keep_selection: bool,
	},
	Delete,
	Backspace,
	Undo,
	Redo,
	SelectAll,
	Escape,
	Copy,
	Cut,
	Paste(String),

	Home { with_select: bool },
	End { with_select: bool },
	Tab { with_select: bool },
	CaretRight { with_select: bool },
	CaretLeft { with_select: bool },
	CaretUp { with_select: bool },
	CaretDown { with_select: bool },
	PageUp { with_select: bool },
	PageDown { with_select: bool },

	Save,
	Wrap(usize),
	Goto(usize),
	FindAll(String),
}

impl Action {
	/// Returns true for actions the history ignores outright.
	pub fn is_marker(&self) -> bool {
		matches!(self, Action::Empty | Action::Repeat)
	}

	/// Returns true if the action can take part in a repeat chain.
	pub fn is_repeatable(&self) -> bool {
		!self.is_marker()
			&& !matches!(
				self,
				Action::Save | Action::Wrap(_) | Action::Goto(_) | Action::FindAll(_)
			)
	}

	/// Returns true if the action modifies text.
	pub fn is_edit(&self) -> bool {
		matches!(
			self,
			Action::Input(_)
				| Action::Replace { .. }
				| Action::Delete
				| Action::Backspace
				| Action::Undo
				| Action::Redo
				| Action::Cut
				| Action::Paste(_)
				| Action::Tab { .. }
		)
	}
}
