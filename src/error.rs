use colored::Colorize as _;

use crate::position::Position;

/// An error raised by the lexer or parser: the source text doesn't form valid QuackScript,
/// independent of what it would mean. Passes through `Evaluator::execute` unchanged, since
/// catching it there would hide malformed imports behind a reported runtime error.
#[derive(Debug, Clone)]
pub struct SyntaxError {
	pub message: String,
	pub position: Position,
}

impl std::fmt::Display for SyntaxError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} at {}: {}", "syntax error".red().bold(), self.position, self.message)
	}
}

impl std::error::Error for SyntaxError {}

/// The taxonomy of errors the evaluator can raise once a module is known to be syntactically
/// valid. Every variant corresponds to a named failure in the evaluator's operational semantics;
/// none of them should ever be constructed for a condition the spec doesn't actually describe.
#[derive(Debug, Clone)]
pub enum RuntimeErrorKind {
	UndefinedIdentifier { identifier: String },
	RedeclarationError { identifier: String },
	AssignToConstant { identifier: String },
	TypeMismatch { expected: String, found: String },
	NullToNonOptional { identifier: String },
	ArgumentTypeMismatch { parameter: String, expected: String, found: String },
	ArityMismatch { expected: usize, found: usize },
	NotCallable { identifier: String },
	CallOnNothing { identifier: String },
	NonBooleanCondition { found: String },
	InvalidBinaryOperand,
	InvalidBinaryExpression { operator: String, left: String, right: String },
	UnknownAttribute { type_name: String, attribute: String },
	ImportNotAtTop,
	ImportUnsupported { path: String },
	ImportCycle { path: String },
	ReturnOutsideFunction,
	InternalAssignmentError,
}

impl std::fmt::Display for RuntimeErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::UndefinedIdentifier { identifier } => write!(f, "UndefinedIdentifier: \"{identifier}\" is not declared in any enclosing scope"),
			Self::RedeclarationError { identifier } => write!(f, "RedeclarationError: \"{identifier}\" is already declared in this scope"),
			Self::AssignToConstant { identifier } => write!(f, "AssignToConstant: \"{identifier}\" was declared CONST and cannot be reassigned"),
			Self::TypeMismatch { expected, found } => write!(f, "TypeMismatch: expected a value of type \"{expected}\", found \"{found}\""),
			Self::NullToNonOptional { identifier } => write!(f, "NullToNonOptional: \"{identifier}\" is not optional and cannot hold nothing"),
			Self::ArgumentTypeMismatch { parameter, expected, found } => {
				write!(f, "ArgumentTypeMismatch: parameter \"{parameter}\" expects \"{expected}\", found \"{found}\"")
			}
			Self::ArityMismatch { expected, found } => write!(f, "ArityMismatch: expected {expected} argument(s), found {found}"),
			Self::NotCallable { identifier } => write!(f, "NotCallable: \"{identifier}\" is not a function"),
			Self::CallOnNothing { identifier } => write!(f, "CallOnNothing: \"{identifier}\" holds nothing and cannot be called"),
			Self::NonBooleanCondition { found } => write!(f, "NonBooleanCondition: expected a boolean condition, found \"{found}\""),
			Self::InvalidBinaryOperand => write!(f, "InvalidBinaryOperand: a function cannot be used as a binary operand"),
			Self::InvalidBinaryExpression { operator, left, right } => {
				write!(f, "InvalidBinaryExpression: \"{operator}\" is not defined between \"{left}\" and \"{right}\"")
			}
			Self::UnknownAttribute { type_name, attribute } => write!(f, "UnknownAttribute: \"{type_name}\" has no attribute \"{attribute}\""),
			Self::ImportNotAtTop => write!(f, "ImportNotAtTop: imports must appear before any other statement in a module"),
			Self::ImportUnsupported { path } => write!(f, "ImportUnsupported: the current host cannot load \"{path}\""),
			Self::ImportCycle { path } => write!(f, "ImportCycle: \"{path}\" is already being imported"),
			Self::ReturnOutsideFunction => write!(f, "ReturnOutsideFunction: return used outside of a function body"),
			Self::InternalAssignmentError => write!(f, "InternalAssignmentError: the right-hand side of an assignment must be an expression"),
		}
	}
}

/// A runtime error, carrying the position it occurred at and (when available) the line of
/// source it occurred on, for `stderr` reporting by `Evaluator::execute`.
#[derive(Debug, Clone)]
pub struct RuntimeError {
	pub kind: RuntimeErrorKind,
	pub position: Position,
	pub source_excerpt: Option<String>,
}

impl std::fmt::Display for RuntimeError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} at {}: {}", "runtime error".red().bold(), self.position, self.kind)?;
		if let Some(excerpt) = &self.source_excerpt {
			write!(f, "\n\t{}", unindent::unindent(excerpt).dimmed())?;
		}
		Ok(())
	}
}

impl std::error::Error for RuntimeError {}

/// The union of errors an evaluator entry point can return. `Evaluator::execute` is the only
/// place that catches the `Runtime` variant; `Syntax` always propagates unchanged.
#[derive(Debug, Clone)]
pub enum EvalError {
	Runtime(RuntimeError),
	Syntax(SyntaxError),
}

impl From<RuntimeError> for EvalError {
	fn from(error: RuntimeError) -> Self {
		Self::Runtime(error)
	}
}

impl From<SyntaxError> for EvalError {
	fn from(error: SyntaxError) -> Self {
		Self::Syntax(error)
	}
}

impl std::fmt::Display for EvalError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Runtime(error) => write!(f, "{error}"),
			Self::Syntax(error) => write!(f, "{error}"),
		}
	}
}

impl std::error::Error for EvalError {}
