use crate::position::Position;

/// A single named, typed function parameter. Parameters are always bound as `argument` cells
/// when a call pushes them into the callee's scope.
#[derive(Debug, Clone)]
pub struct Parameter {
	pub identifier: String,
	pub declared_type: String,
}

/// A sequence of statements executed in order, with non-local `return` escaping out of it. Used
/// for both `if`/`else` branches and function bodies.
pub type CodeBlock = Vec<Statement>;

/// The top-level unit produced by the parser. Never mutated once parsed; the evaluator tracks
/// its own cursor into `statements` rather than draining this vector.
#[derive(Debug, Clone)]
pub struct Module {
	pub statements: Vec<Statement>,
}

/// A single statement, tagged with the position it started at for diagnostics.
#[derive(Debug, Clone)]
pub struct Statement {
	pub body: StatementBody,
	pub position: Position,
}

#[derive(Debug, Clone)]
pub enum StatementBody {
	Declaration(Declaration),
	Assignment(Assignment),
	Expression(Expression),
	Return(Expression),
	If(IfStatement),
	Import(ImportStatement),
}

/// Whether a declaration's cell rejects reassignment. Function parameters are bound with their
/// own `argument` kind at call time; this enum only covers the two forms `QUACK` and
/// `CONST QUACK` can produce at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
	Constant,
	Variable,
}

#[derive(Debug, Clone)]
pub struct Declaration {
	pub declaration_kind: DeclarationKind,
	pub identifier: String,
	pub declared_type: Option<String>,
	pub is_optional: bool,
	pub expression: Expression,
}

#[derive(Debug, Clone)]
pub struct Assignment {
	pub identifier: String,
	pub expression: Expression,
}

#[derive(Debug, Clone)]
pub struct IfStatement {
	pub condition: Expression,
	pub true_block: CodeBlock,
	pub false_block: Option<CodeBlock>,
}

#[derive(Debug, Clone)]
pub struct ImportStatement {
	pub path: String,
}

#[derive(Debug, Clone)]
pub enum Expression {
	Number(f64),
	Text(String),
	Boolean(bool),
	Nothing,
	Identifier(String),
	FuncCall(FuncCall),
	Binary(Binary),
	Accessor(Accessor),
	FunctionLiteral(FunctionLiteral),
}

#[derive(Debug, Clone)]
pub struct FuncCall {
	pub identifier: String,
	pub args: Vec<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
	Add,
	Subtract,
	Multiply,
	Divide,
	Modulo,
	Equal,
	NotEqual,
	LessThan,
	LessEqual,
	GreaterThan,
	GreaterEqual,
	And,
	Or,
}

impl std::fmt::Display for BinaryOperator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let symbol = match self {
			Self::Add => "+",
			Self::Subtract => "-",
			Self::Multiply => "*",
			Self::Divide => "/",
			Self::Modulo => "%",
			Self::Equal => "==",
			Self::NotEqual => "!=",
			Self::LessThan => "<",
			Self::LessEqual => "<=",
			Self::GreaterThan => ">",
			Self::GreaterEqual => ">=",
			Self::And => "&&",
			Self::Or => "||",
		};
		write!(f, "{symbol}")
	}
}

#[derive(Debug, Clone)]
pub struct Binary {
	pub operator: BinaryOperator,
	pub left: Box<Expression>,
	pub right: Box<Expression>,
}

/// `receiver.attribute` with optional call arguments. `args: None` means bare field access,
/// which QuackScript has no defined semantics for yet (see `Evaluator::evaluate_accessor`).
#[derive(Debug, Clone)]
pub struct Accessor {
	pub receiver: Box<Expression>,
	pub attribute: String,
	pub args: Option<Vec<Expression>>,
}

#[derive(Debug, Clone)]
pub struct FunctionLiteral {
	pub parameters: Vec<Parameter>,
	pub body: CodeBlock,
}
