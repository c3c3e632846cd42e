/// A location in QuackScript source text, used for diagnostics on both syntax and runtime errors.
///
/// Lines and columns are both 1-indexed, matching how editors report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
	pub line: usize,
	pub column: usize,
}

impl Position {
	#[must_use]
	pub const fn new(line: usize, column: usize) -> Self {
		Self { line, column }
	}

	/// The position of the very start of a source file. Used as a placeholder for values that
	/// weren't produced by parsing actual source, such as internal function declarations.
	#[must_use]
	pub const fn start() -> Self {
		Self { line: 1, column: 1 }
	}
}

impl std::fmt::Display for Position {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}
