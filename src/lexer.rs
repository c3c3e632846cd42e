use convert_case::Casing as _;
use strum::IntoEnumIterator as _;

use crate::{error::SyntaxError, position::Position};

/// A type of token in QuackScript source code. Variants are tried in declaration order against
/// the start of the remaining source, so any token type whose pattern is a prefix of another
/// (`<-` and `<`, `:>` and `:`) must be declared before the shorter one. Keywords must likewise
/// be declared before `Identifier`, or they'd be swallowed by it.
#[derive(strum_macros::EnumIter, PartialEq, Eq, Debug, Clone, Copy)]
pub enum TokenType {
	/// A line comment, running from `#` to the end of the line. Discarded during tokenization.
	LineComment,

	/// The `QUACK` keyword, which opens a variable or constant declaration.
	KeywordQuack,

	/// The `CONST` keyword, which marks a declaration's cell as non-reassignable.
	KeywordConst,

	/// The `return` keyword.
	KeywordReturn,

	/// The `if` keyword.
	KeywordIf,

	/// The `then` keyword, separating an `if` condition from its true-branch.
	KeywordThen,

	/// The `else` keyword, separating an `if` statement's true-branch from its false-branch.
	KeywordElse,

	/// The `end` keyword, closing an `if` statement.
	KeywordEnd,

	/// The `import` keyword.
	KeywordImport,

	/// The `true` boolean literal keyword.
	KeywordTrue,

	/// The `false` boolean literal keyword.
	KeywordFalse,

	/// The `nothing` literal keyword, QuackScript's absent/unit value.
	KeywordNothing,

	/// An identifier. Must be tried after every keyword above, or keywords would never match.
	Identifier,

	/// A numeric literal. QuackScript has no unary minus, so this never includes a leading sign.
	Number,

	/// A single-quoted text literal, with `\'` and `\\` escapes.
	String,

	/// The declaration/assignment arrow `<-`. Must be tried before `LessThan`.
	Arrow,

	/// The function-literal arrow `:>`, separating a parameter list from its body.
	FatArrow,

	/// The closing half of a parameter or argument list, `:)`.
	ParamClose,

	/// The closing half of a function body block, `:}`.
	BraceClose,

	/// The bare colon used in type annotations, e.g. `x: Number`. Must be tried after every
	/// other token type starting with `:`.
	Colon,

	/// The opening half of a parameter or argument list, `(:`.
	ParamOpen,

	/// The opening half of a function body block, `{:`.
	BraceOpen,

	/// The equality operator `==`. Must be tried before nothing else starting with `=`, since
	/// QuackScript has no bare assignment `=`.
	DoubleEqual,

	/// The inequality operator `!=`.
	NotEqual,

	/// The less-than-or-equal operator `<=`. Must be tried before `LessThan`.
	LessEqual,

	/// The greater-than-or-equal operator `>=`. Must be tried before `GreaterThan`.
	GreaterEqual,

	/// The less-than operator `<`.
	LessThan,

	/// The greater-than operator `>`.
	GreaterThan,

	/// The logical-and operator `&&`.
	AndAnd,

	/// The logical-or operator `||`.
	OrOr,

	/// The addition operator `+`.
	Plus,

	/// The subtraction operator `-`.
	Minus,

	/// The multiplication operator `*`.
	Star,

	/// The division operator `/`.
	Slash,

	/// The modulo operator `%`.
	Percent,

	/// The optional-type marker `?`, written directly after a declared type name.
	Question,

	/// The argument/parameter separator `,`.
	Comma,

	/// The accessor operator `.`.
	Dot,

	/// The statement terminator, a duck emoji.
	Quack,

	/// Whitespace. Discarded during tokenization, but newlines within it still advance the
	/// tracked line number.
	Whitespace,
}

impl TokenType {
	/// The pattern that a token of this type must match at the very start of the remaining
	/// source. Multi-character operators sharing a leading character with a shorter one are
	/// listed earlier in `TokenType::iter()` than the shorter one, so the longer match always
	/// wins; see the ordering notes on the enum itself.
	fn pattern(self) -> &'static regex_macro::Regex {
		match self {
			Self::LineComment => regex_macro::regex!(r"^#[^\n\r]*"),
			Self::KeywordQuack => regex_macro::regex!(r"^QUACK\b"),
			Self::KeywordConst => regex_macro::regex!(r"^CONST\b"),
			Self::KeywordReturn => regex_macro::regex!(r"^return\b"),
			Self::KeywordIf => regex_macro::regex!(r"^if\b"),
			Self::KeywordThen => regex_macro::regex!(r"^then\b"),
			Self::KeywordElse => regex_macro::regex!(r"^else\b"),
			Self::KeywordEnd => regex_macro::regex!(r"^end\b"),
			Self::KeywordImport => regex_macro::regex!(r"^import\b"),
			Self::KeywordTrue => regex_macro::regex!(r"^true\b"),
			Self::KeywordFalse => regex_macro::regex!(r"^false\b"),
			Self::KeywordNothing => regex_macro::regex!(r"^nothing\b"),
			Self::Identifier => regex_macro::regex!(r"^[a-zA-Z_]\w*"),
			Self::Number => regex_macro::regex!(r"^\d+(\.\d+)?"),
			Self::String => regex_macro::regex!(r"^'(?:[^'\\]|\\.)*'"),
			Self::Arrow => regex_macro::regex!("^<-"),
			Self::FatArrow => regex_macro::regex!("^:>"),
			Self::ParamClose => regex_macro::regex!(r"^:\)"),
			Self::BraceClose => regex_macro::regex!(r"^:\}"),
			Self::Colon => regex_macro::regex!("^:"),
			Self::ParamOpen => regex_macro::regex!(r"^\(:"),
			Self::BraceOpen => regex_macro::regex!(r"^\{:"),
			Self::DoubleEqual => regex_macro::regex!("^=="),
			Self::NotEqual => regex_macro::regex!("^!="),
			Self::LessEqual => regex_macro::regex!("^<="),
			Self::GreaterEqual => regex_macro::regex!("^>="),
			Self::LessThan => regex_macro::regex!("^<"),
			Self::GreaterThan => regex_macro::regex!("^>"),
			Self::AndAnd => regex_macro::regex!("^&&"),
			Self::OrOr => regex_macro::regex!(r"^\|\|"),
			Self::Plus => regex_macro::regex!(r"^\+"),
			Self::Minus => regex_macro::regex!("^-"),
			Self::Star => regex_macro::regex!(r"^\*"),
			Self::Slash => regex_macro::regex!("^/"),
			Self::Percent => regex_macro::regex!("^%"),
			Self::Question => regex_macro::regex!(r"^\?"),
			Self::Comma => regex_macro::regex!("^,"),
			Self::Dot => regex_macro::regex!(r"^\."),
			Self::Quack => regex_macro::regex!("^\u{1f986}"),
			Self::Whitespace => regex_macro::regex!(r"^\s"),
		}
	}

	/// Returns the matched text of this token type at the start of `code`, or `None` if it
	/// doesn't match there.
	fn get_match(self, code: &str) -> Option<String> {
		self.pattern().find(code).map(|m| m.as_str().to_owned())
	}

	/// Finds the first token type (in declaration order) that matches the start of `code`.
	fn find_match(code: &str) -> Option<(Self, String)> {
		for token_type in Self::iter() {
			if let Some(matched) = token_type.get_match(code) {
				return Some((token_type, matched));
			}
		}
		None
	}
}

impl std::fmt::Display for TokenType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", format!("{self:?}").to_case(convert_case::Case::Title))
	}
}

/// A single token produced by `tokenize`.
#[derive(Debug, Clone)]
pub struct Token {
	pub token_type: TokenType,
	pub value: String,
	pub position: Position,
}

/// Tokenizes a string of QuackScript source code into a flat stream of tokens. Whitespace and
/// comments are discarded; every other token type is preserved in source order.
///
/// # Errors
/// Returns a `SyntaxError` if a character sequence doesn't match any known token type.
pub fn tokenize(code: &str) -> Result<Vec<Token>, SyntaxError> {
	let mut remaining = code.replace('\t', "    ");
	let mut tokens = Vec::new();
	let mut line = 1;
	let mut column = 1;

	while !remaining.is_empty() {
		let Some((token_type, value)) = TokenType::find_match(&remaining) else {
			return Err(SyntaxError {
				message: format!("unrecognized token: {}", remaining.lines().next().unwrap_or(&remaining)),
				position: Position::new(line, column),
			});
		};

		let length = value.len();
		let newline_count = value.chars().filter(|char| *char == '\n').count();

		if token_type != TokenType::Whitespace && token_type != TokenType::LineComment {
			tokens.push(Token { token_type, value, position: Position::new(line, column) });
		}

		line += newline_count;
		column = if newline_count > 0 { 1 } else { column + length };
		remaining = remaining.get(length..).map(ToOwned::to_owned).unwrap_or_default();
	}

	Ok(tokens)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tokenizes_a_declaration() {
		let tokens = tokenize("QUACK x <- 2 + 3\u{1f986} x\u{1f986}").unwrap();
		let types: Vec<TokenType> = tokens.iter().map(|token| token.token_type).collect();
		assert_eq!(
			types,
			vec![
				TokenType::KeywordQuack,
				TokenType::Identifier,
				TokenType::Arrow,
				TokenType::Number,
				TokenType::Plus,
				TokenType::Number,
				TokenType::Quack,
				TokenType::Identifier,
				TokenType::Quack,
			]
		);
	}

	#[test]
	fn distinguishes_arrow_from_less_than() {
		let tokens = tokenize("x <- 1\u{1f986}").unwrap();
		assert_eq!(tokens[1].token_type, TokenType::Arrow);

		let tokens = tokenize("x < 1\u{1f986}").unwrap();
		assert_eq!(tokens[1].token_type, TokenType::LessThan);
	}

	#[test]
	fn tracks_line_numbers_across_newlines() {
		let tokens = tokenize("QUACK x <- 1\u{1f986}\nQUACK y <- 2\u{1f986}").unwrap();
		let second_quack = tokens.iter().find(|token| token.value == "y").unwrap();
		assert_eq!(second_quack.position.line, 2);
	}

	#[test]
	fn rejects_unrecognized_characters() {
		let result = tokenize("QUACK x <- @\u{1f986}");
		assert!(result.is_err());
	}
}
