use crate::{
	ast::{
		Accessor, Assignment, Binary, BinaryOperator, Declaration, DeclarationKind, Expression, FuncCall, FunctionLiteral, IfStatement,
		ImportStatement, Module, Parameter, Statement, StatementBody,
	},
	error::SyntaxError,
	lexer::{Token, TokenType},
	position::Position,
};

/// A cursor into a flat token stream, advanced by each parsing function. Never rewinds past a
/// token it has already consumed; backtracking is avoided entirely by the grammar's one-token
/// lookahead (the lexer's bracket pairs `(:`/`:)`, `{:`/`:}` exist specifically so the parser
/// never needs more than that).
struct TokenCursor {
	tokens: Vec<Token>,
	position: usize,
}

impl TokenCursor {
	fn new(tokens: Vec<Token>) -> Self {
		Self { tokens, position: 0 }
	}

	fn peek(&self) -> Option<&Token> {
		self.tokens.get(self.position)
	}

	fn peek_type(&self) -> Option<TokenType> {
		self.peek().map(|token| token.token_type)
	}

	/// The position to report an error at when the stream has already ended: the last token's
	/// position, or the start of the file if the stream was empty altogether.
	fn end_position(&self) -> Position {
		self.tokens.last().map_or_else(Position::start, |token| token.position)
	}

	fn advance(&mut self) -> Option<Token> {
		let token = self.tokens.get(self.position).cloned();
		if token.is_some() {
			self.position += 1;
		}
		token
	}

	fn expect(&mut self, expected: TokenType) -> Result<Token, SyntaxError> {
		match self.advance() {
			Some(token) if token.token_type == expected => Ok(token),
			Some(token) => Err(SyntaxError { message: format!("expected {expected}, found {}", token.token_type), position: token.position }),
			None => Err(SyntaxError { message: format!("expected {expected}, found end of input"), position: self.end_position() }),
		}
	}

	fn expect_identifier(&mut self) -> Result<String, SyntaxError> {
		self.expect(TokenType::Identifier).map(|token| token.value)
	}

	fn at(&self, token_type: TokenType) -> bool {
		self.peek_type() == Some(token_type)
	}
}

/// Parses a flat token stream into a `Module`. The parser never mutates a node after producing
/// it; every `Statement` is stamped with the position of its first token.
///
/// # Errors
/// Returns a `SyntaxError` for any token sequence that doesn't match the grammar.
pub fn parse(tokens: Vec<Token>) -> Result<Module, SyntaxError> {
	let mut cursor = TokenCursor::new(tokens);
	let mut statements = Vec::new();
	while cursor.peek().is_some() {
		statements.push(parse_statement(&mut cursor)?);
	}
	Ok(Module { statements })
}

fn parse_statement(cursor: &mut TokenCursor) -> Result<Statement, SyntaxError> {
	let position = cursor.peek().map_or_else(Position::start, |token| token.position);
	let body = match cursor.peek_type() {
		Some(TokenType::KeywordImport) => StatementBody::Import(parse_import(cursor)?),
		Some(TokenType::KeywordQuack | TokenType::KeywordConst) => StatementBody::Declaration(parse_declaration(cursor)?),
		Some(TokenType::KeywordReturn) => StatementBody::Return(parse_return(cursor)?),
		Some(TokenType::KeywordIf) => StatementBody::If(parse_if(cursor)?),
		Some(TokenType::Identifier) if cursor.tokens.get(cursor.position + 1).map(|token| token.token_type) == Some(TokenType::Arrow) => {
			StatementBody::Assignment(parse_assignment(cursor)?)
		}
		_ => {
			let expression = parse_expression(cursor)?;
			cursor.expect(TokenType::Quack)?;
			StatementBody::Expression(expression)
		}
	};
	Ok(Statement { body, position })
}

fn parse_import(cursor: &mut TokenCursor) -> Result<ImportStatement, SyntaxError> {
	cursor.expect(TokenType::KeywordImport)?;
	let path = cursor.expect(TokenType::String)?;
	cursor.expect(TokenType::Quack)?;
	Ok(ImportStatement { path: unquote(&path.value) })
}

fn parse_declaration(cursor: &mut TokenCursor) -> Result<Declaration, SyntaxError> {
	let declaration_kind = if cursor.at(TokenType::KeywordConst) {
		cursor.advance();
		DeclarationKind::Constant
	} else {
		DeclarationKind::Variable
	};
	cursor.expect(TokenType::KeywordQuack)?;
	let identifier = cursor.expect_identifier()?;

	let mut declared_type = None;
	let mut is_optional = false;
	if cursor.at(TokenType::Colon) {
		cursor.advance();
		declared_type = Some(cursor.expect_identifier()?);
		if cursor.at(TokenType::Question) {
			cursor.advance();
			is_optional = true;
		}
	}

	cursor.expect(TokenType::Arrow)?;
	let expression = parse_expression(cursor)?;
	cursor.expect(TokenType::Quack)?;
	Ok(Declaration { declaration_kind, identifier, declared_type, is_optional, expression })
}

fn parse_assignment(cursor: &mut TokenCursor) -> Result<Assignment, SyntaxError> {
	let identifier = cursor.expect_identifier()?;
	cursor.expect(TokenType::Arrow)?;
	let expression = parse_expression(cursor)?;
	cursor.expect(TokenType::Quack)?;
	Ok(Assignment { identifier, expression })
}

fn parse_return(cursor: &mut TokenCursor) -> Result<Expression, SyntaxError> {
	cursor.expect(TokenType::KeywordReturn)?;
	let expression = parse_expression(cursor)?;
	cursor.expect(TokenType::Quack)?;
	Ok(expression)
}

fn parse_if(cursor: &mut TokenCursor) -> Result<IfStatement, SyntaxError> {
	cursor.expect(TokenType::KeywordIf)?;
	let condition = parse_expression(cursor)?;
	cursor.expect(TokenType::KeywordThen)?;

	let mut true_block = Vec::new();
	while !cursor.at(TokenType::KeywordElse) && !cursor.at(TokenType::KeywordEnd) {
		true_block.push(parse_statement(cursor)?);
	}

	let false_block = if cursor.at(TokenType::KeywordElse) {
		cursor.advance();
		let mut block = Vec::new();
		while !cursor.at(TokenType::KeywordEnd) {
			block.push(parse_statement(cursor)?);
		}
		Some(block)
	} else {
		None
	};

	cursor.expect(TokenType::KeywordEnd)?;
	Ok(IfStatement { condition, true_block, false_block })
}

/// Binary operators grouped loosest-to-tightest; each level parses the level below it on both
/// sides, left-associatively.
const PRECEDENCE_LEVELS: &[&[(TokenType, BinaryOperator)]] = &[
	&[(TokenType::OrOr, BinaryOperator::Or)],
	&[(TokenType::AndAnd, BinaryOperator::And)],
	&[(TokenType::DoubleEqual, BinaryOperator::Equal), (TokenType::NotEqual, BinaryOperator::NotEqual)],
	&[
		(TokenType::LessThan, BinaryOperator::LessThan),
		(TokenType::LessEqual, BinaryOperator::LessEqual),
		(TokenType::GreaterThan, BinaryOperator::GreaterThan),
		(TokenType::GreaterEqual, BinaryOperator::GreaterEqual),
	],
	&[(TokenType::Plus, BinaryOperator::Add), (TokenType::Minus, BinaryOperator::Subtract)],
	&[(TokenType::Star, BinaryOperator::Multiply), (TokenType::Slash, BinaryOperator::Divide), (TokenType::Percent, BinaryOperator::Modulo)],
];

fn parse_expression(cursor: &mut TokenCursor) -> Result<Expression, SyntaxError> {
	parse_precedence(cursor, 0)
}

fn parse_precedence(cursor: &mut TokenCursor, level: usize) -> Result<Expression, SyntaxError> {
	let Some(operators) = PRECEDENCE_LEVELS.get(level) else { return parse_postfix(cursor) };

	let mut left = parse_precedence(cursor, level + 1)?;
	while let Some(operator) = cursor.peek_type().and_then(|token_type| operators.iter().find(|(t, _)| *t == token_type).map(|(_, op)| *op)) {
		cursor.advance();
		let right = parse_precedence(cursor, level + 1)?;
		left = Expression::Binary(Binary { operator, left: Box::new(left), right: Box::new(right) });
	}
	Ok(left)
}

/// Parses a primary expression followed by any number of `.attribute` or `.attribute(:args:)`
/// accessor chains, left-associatively: `a.b.c(:x:).d` chains four times over a single receiver.
fn parse_postfix(cursor: &mut TokenCursor) -> Result<Expression, SyntaxError> {
	let mut expression = parse_primary(cursor)?;
	while cursor.at(TokenType::Dot) {
		cursor.advance();
		let attribute = cursor.expect_identifier()?;
		let args = if cursor.at(TokenType::ParamOpen) { Some(parse_argument_list(cursor)?) } else { None };
		expression = Expression::Accessor(Accessor { receiver: Box::new(expression), attribute, args });
	}
	Ok(expression)
}

fn parse_primary(cursor: &mut TokenCursor) -> Result<Expression, SyntaxError> {
	let Some(token) = cursor.peek().cloned() else {
		return Err(SyntaxError { message: "expected an expression, found end of input".to_owned(), position: cursor.end_position() });
	};

	match token.token_type {
		TokenType::Number => {
			cursor.advance();
			let value: f64 = token.value.parse().map_err(|_| SyntaxError { message: format!("invalid number literal: {}", token.value), position: token.position })?;
			Ok(Expression::Number(value))
		}
		TokenType::String => {
			cursor.advance();
			Ok(Expression::Text(unquote(&token.value)))
		}
		TokenType::KeywordTrue => {
			cursor.advance();
			Ok(Expression::Boolean(true))
		}
		TokenType::KeywordFalse => {
			cursor.advance();
			Ok(Expression::Boolean(false))
		}
		TokenType::KeywordNothing => {
			cursor.advance();
			Ok(Expression::Nothing)
		}
		TokenType::ParamOpen => parse_function_literal(cursor),
		TokenType::Identifier => {
			cursor.advance();
			if cursor.at(TokenType::ParamOpen) {
				let args = parse_argument_list(cursor)?;
				Ok(Expression::FuncCall(FuncCall { identifier: token.value, args }))
			} else {
				Ok(Expression::Identifier(token.value))
			}
		}
		found => Err(SyntaxError { message: format!("expected an expression, found {found}"), position: token.position }),
	}
}

/// `(: [expr (, expr)*] :)`, the shared argument-list grammar for both function/accessor calls.
fn parse_argument_list(cursor: &mut TokenCursor) -> Result<Vec<Expression>, SyntaxError> {
	cursor.expect(TokenType::ParamOpen)?;
	let mut args = Vec::new();
	if !cursor.at(TokenType::ParamClose) {
		args.push(parse_expression(cursor)?);
		while cursor.at(TokenType::Comma) {
			cursor.advance();
			args.push(parse_expression(cursor)?);
		}
	}
	cursor.expect(TokenType::ParamClose)?;
	Ok(args)
}

/// `(: [ident: type (, ident: type)*] :) :> {: <stmt>* :}`.
fn parse_function_literal(cursor: &mut TokenCursor) -> Result<Expression, SyntaxError> {
	cursor.expect(TokenType::ParamOpen)?;
	let mut parameters = Vec::new();
	if !cursor.at(TokenType::ParamClose) {
		parameters.push(parse_parameter(cursor)?);
		while cursor.at(TokenType::Comma) {
			cursor.advance();
			parameters.push(parse_parameter(cursor)?);
		}
	}
	cursor.expect(TokenType::ParamClose)?;
	cursor.expect(TokenType::FatArrow)?;
	cursor.expect(TokenType::BraceOpen)?;

	let mut body = Vec::new();
	while !cursor.at(TokenType::BraceClose) {
		body.push(parse_statement(cursor)?);
	}
	cursor.expect(TokenType::BraceClose)?;

	Ok(Expression::FunctionLiteral(FunctionLiteral { parameters, body }))
}

fn parse_parameter(cursor: &mut TokenCursor) -> Result<Parameter, SyntaxError> {
	let identifier = cursor.expect_identifier()?;
	cursor.expect(TokenType::Colon)?;
	let declared_type = cursor.expect_identifier()?;
	Ok(Parameter { identifier, declared_type })
}

/// Strips the surrounding quotes from a lexed string literal and unescapes `\'` and `\\`.
fn unquote(literal: &str) -> String {
	let inner = &literal[1..literal.len() - 1];
	let mut result = String::with_capacity(inner.len());
	let mut chars = inner.chars();
	while let Some(char) = chars.next() {
		if char == '\\' {
			match chars.next() {
				Some('\'') => result.push('\''),
				Some('\\') => result.push('\\'),
				Some(other) => {
					result.push('\\');
					result.push(other);
				}
				None => result.push('\\'),
			}
		} else {
			result.push(char);
		}
	}
	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::lexer::tokenize;

	fn parse_source(source: &str) -> Module {
		parse(tokenize(source).unwrap()).unwrap()
	}

	#[test]
	fn parses_a_declaration_with_a_binary_expression() {
		let module = parse_source("QUACK x <- 2 + 3\u{1f986} x\u{1f986}");
		assert_eq!(module.statements.len(), 2);
		let StatementBody::Declaration(declaration) = &module.statements[0].body else { panic!("expected a declaration") };
		assert_eq!(declaration.identifier, "x");
		assert!(matches!(declaration.expression, Expression::Binary(_)));
	}

	#[test]
	fn parses_a_function_literal_and_a_call() {
		let module = parse_source("QUACK greet <- (:name: Text:) :> {: return 'hi ' + name\u{1f986} :}\u{1f986} greet(:'ada':)\u{1f986}");
		let StatementBody::Declaration(declaration) = &module.statements[0].body else { panic!("expected a declaration") };
		let Expression::FunctionLiteral(literal) = &declaration.expression else { panic!("expected a function literal") };
		assert_eq!(literal.parameters.len(), 1);
		assert_eq!(literal.parameters[0].declared_type, "Text");

		let StatementBody::Expression(Expression::FuncCall(call)) = &module.statements[1].body else { panic!("expected a call") };
		assert_eq!(call.identifier, "greet");
		assert_eq!(call.args.len(), 1);
	}

	#[test]
	fn respects_operator_precedence() {
		let module = parse_source("1 + 2 * 3\u{1f986}");
		let StatementBody::Expression(Expression::Binary(outer)) = &module.statements[0].body else { panic!("expected a binary expression") };
		assert_eq!(outer.operator, BinaryOperator::Add);
		assert!(matches!(*outer.right, Expression::Binary(_)));
	}

	#[test]
	fn parses_an_if_with_an_else_branch() {
		let module = parse_source("if true then 1\u{1f986} else 2\u{1f986} end");
		let StatementBody::If(if_statement) = &module.statements[0].body else { panic!("expected an if statement") };
		assert_eq!(if_statement.true_block.len(), 1);
		assert_eq!(if_statement.false_block.as_ref().map(Vec::len), Some(1));
	}

	#[test]
	fn parses_an_accessor_chain() {
		let module = parse_source("'hi'.length()\u{1f986}");
		let StatementBody::Expression(Expression::Accessor(accessor)) = &module.statements[0].body else { panic!("expected an accessor") };
		assert_eq!(accessor.attribute, "length");
		assert!(accessor.args.is_some());
	}

	#[test]
	fn rejects_a_statement_missing_its_terminator() {
		let result = parse(tokenize("QUACK x <- 1").unwrap());
		assert!(result.is_err());
	}
}
