use std::collections::HashSet;

use crate::{
	ast::{
		Accessor, Assignment, Binary, BinaryOperator, Declaration, IfStatement, ImportStatement, Module, Parameter, Statement, StatementBody,
	},
	attributes,
	error::{EvalError, RuntimeError, RuntimeErrorKind},
	host::Host,
	lexer::tokenize,
	memory::{Cell, DeclarationKind, Memory},
	parser::parse,
	position::Position,
	stdlib,
	state::{ContextTag, State},
	value::{convert_value_to_text, is_callable, value_kind_to_type_name, FuncDeclaration, Value, ValueKind},
};
use crate::ast::Expression;

/// The result of running a code block: either the block ran to completion (`Normal`, carrying
/// the value of its last expression statement, `Nothing` otherwise) or it hit a `return` and is
/// unwinding toward the nearest function-call frame. Kept disjoint from `EvalError` so that
/// catching a runtime error never accidentally catches a return in flight.
enum Flow {
	Normal(Value),
	Return(Value),
}

/// Walks a `Module`'s AST, maintaining its own `Memory` and `State`, and reporting all
/// observable effects through a `Host`. One `Evaluator` owns its `Memory` exclusively; nothing
/// about it is safe to share across threads, matching the single-threaded, synchronous semantics
/// of the language.
pub struct Evaluator<'host> {
	memory: Memory,
	state: State,
	host: &'host mut dyn Host,
	importing: HashSet<String>,
	current_source: Option<String>,
}

impl<'host> Evaluator<'host> {
	pub fn new(host: &'host mut dyn Host) -> Self {
		Self { memory: Memory::new(), state: State::new(), host, importing: HashSet::new(), current_source: None }
	}

	/// Runs `module` to completion. Catches `EvalError::Runtime` and reports it to the host's
	/// `stderr`; a syntax error raised while re-entering the lexer/parser for an import is not a
	/// runtime error and propagates to the caller unchanged.
	///
	/// # Errors
	/// Returns the `SyntaxError` encountered while tokenizing/parsing an imported module, if any.
	pub fn execute(&mut self, module: &Module, source: Option<&str>) -> Result<(), crate::error::SyntaxError> {
		match self.execute_module(module, source) {
			Ok(()) => Ok(()),
			Err(EvalError::Runtime(error)) => {
				self.host.stderr(&error.to_string());
				Ok(())
			}
			Err(EvalError::Syntax(error)) => Err(error),
		}
	}

	/// Resets `Memory` to a fresh global scope, seeds the standard-library registry, and runs
	/// every statement in `module`. `source`, when given, is used to render a source excerpt
	/// alongside any runtime error this run produces.
	///
	/// # Errors
	/// Any `EvalError` raised while running the module's statements.
	pub fn execute_module(&mut self, module: &Module, source: Option<&str>) -> Result<(), EvalError> {
		self.memory.clear();
		self.state = State::new();
		self.importing.clear();
		self.current_source = source.map(ToOwned::to_owned);
		stdlib::seed(&mut self.memory);
		self.run_statements(&module.statements)
	}

	/// Runs a flat list of statements without resetting `Memory` first. Used both by
	/// `execute_module` (after it has cleared memory) and by the import driver, which must share
	/// the importer's global scope rather than wipe it.
	fn run_statements(&mut self, statements: &[Statement]) -> Result<(), EvalError> {
		let mut seen_non_import = false;
		for statement in statements {
			if let StatementBody::Import(import) = &statement.body {
				if seen_non_import {
					return Err(self.runtime_error(RuntimeErrorKind::ImportNotAtTop, statement.position));
				}
				self.execute_import(import, statement.position)?;
				continue;
			}

			seen_non_import = true;
			if let Flow::Normal(value) = self.execute_statement(statement)? {
				if !matches!(value.kind, ValueKind::Nothing) {
					let ValueKind::Text(text) = convert_value_to_text(&value).kind else { unreachable!("convertValueToText always produces Text") };
					self.host.stdout(&text);
				}
			}
		}
		Ok(())
	}

	/// Loads, tokenizes, parses, and evaluates an imported module in the current global
	/// environment, so declarations it makes become visible to the importer. Tracks in-flight
	/// import paths to reject cycles.
	///
	/// # Errors
	/// `ImportCycle` if `import.path` is already being imported; propagates load/syntax/runtime
	/// errors from the imported module otherwise.
	fn execute_import(&mut self, import: &ImportStatement, position: Position) -> Result<(), EvalError> {
		if self.importing.contains(&import.path) {
			return Err(self.runtime_error(RuntimeErrorKind::ImportCycle { path: import.path.clone() }, position));
		}

		let source = self.host.load_file(&import.path).map_err(|kind| self.runtime_error(kind, position))?;
		let tokens = tokenize(&source)?;
		let imported_module = parse(tokens)?;

		self.importing.insert(import.path.clone());
		let previous_source = self.current_source.replace(source);
		let result = self.run_statements(&imported_module.statements);
		self.current_source = previous_source;
		self.importing.remove(&import.path);
		result
	}

	/// Runs every statement of `block` in order, escaping early the moment one of them produces
	/// a `Flow::Return`.
	///
	/// # Errors
	/// Any `EvalError` raised by a contained statement.
	pub fn execute_code_block(&mut self, block: &[Statement]) -> Result<Flow, EvalError> {
		for statement in block {
			if let Flow::Return(value) = self.execute_statement(statement)? {
				return Ok(Flow::Return(value));
			}
		}
		Ok(Flow::Normal(Value::synthetic(ValueKind::Nothing)))
	}

	/// Dispatches a single statement per its body kind.
	///
	/// # Errors
	/// Any `EvalError` the statement's evaluation raises.
	pub fn execute_statement(&mut self, statement: &Statement) -> Result<Flow, EvalError> {
		match &statement.body {
			StatementBody::Declaration(declaration) => {
				self.execute_declaration(declaration, statement.position)?;
				Ok(Flow::Normal(Value::synthetic(ValueKind::Nothing)))
			}
			StatementBody::Assignment(assignment) => {
				self.execute_assignment(assignment, statement.position)?;
				Ok(Flow::Normal(Value::synthetic(ValueKind::Nothing)))
			}
			StatementBody::Expression(expression) => Ok(Flow::Normal(self.evaluate_expression(expression, statement.position)?)),
			StatementBody::Return(expression) => {
				if !self.state.in_function() {
					return Err(self.runtime_error(RuntimeErrorKind::ReturnOutsideFunction, statement.position));
				}
				Ok(Flow::Return(self.evaluate_expression(expression, statement.position)?))
			}
			StatementBody::If(if_statement) => self.execute_if(if_statement, statement.position),
			StatementBody::Import(_) => Err(self.runtime_error(RuntimeErrorKind::ImportNotAtTop, statement.position)),
		}
	}

	fn execute_declaration(&mut self, declaration: &Declaration, position: Position) -> Result<(), EvalError> {
		let value = self.evaluate_expression(&declaration.expression, position)?;
		let inferred_or_declared = declaration.declared_type.clone().unwrap_or_else(|| value_kind_to_type_name(&value.kind).to_owned());

		let (declared_type, optional_internal_type) =
			if declaration.is_optional { ("optional".to_owned(), Some(inferred_or_declared)) } else { (inferred_or_declared, None) };
		let expected = optional_internal_type.clone().unwrap_or_else(|| declared_type.clone());

		if !matches!(value.kind, ValueKind::Nothing) && value_kind_to_type_name(&value.kind) != expected {
			return Err(self.runtime_error(RuntimeErrorKind::TypeMismatch { expected, found: value_kind_to_type_name(&value.kind).to_owned() }, position));
		}
		if matches!(value.kind, ValueKind::Nothing) && !declaration.is_optional {
			return Err(self.runtime_error(RuntimeErrorKind::NullToNonOptional { identifier: declaration.identifier.clone() }, position));
		}

		let cell = Cell {
			identifier: declaration.identifier.clone(),
			declaration_kind: declaration.declaration_kind.into(),
			declared_type,
			optional_internal_type,
			value,
		};
		self.memory.set(cell).map_err(|kind| self.runtime_error(kind, position))
	}

	/// The right-hand side of an `Assignment` is always an `Expression` node by construction,
	/// so the spec's `InternalAssignmentError` guard can never actually trigger here; it remains
	/// part of the error taxonomy for parity with hosts that relax that invariant.
	fn execute_assignment(&mut self, assignment: &Assignment, position: Position) -> Result<(), EvalError> {
		let value = self.evaluate_expression(&assignment.expression, position)?;
		self.memory.update(&assignment.identifier, value).map_err(|kind| self.runtime_error(kind, position))
	}

	fn execute_if(&mut self, if_statement: &IfStatement, position: Position) -> Result<Flow, EvalError> {
		let condition = self.evaluate_expression(&if_statement.condition, position)?;
		let truthy = match condition.kind {
			ValueKind::Boolean(value) => value,
			ValueKind::Nothing => false,
			other => return Err(self.runtime_error(RuntimeErrorKind::NonBooleanCondition { found: value_kind_to_type_name(&other).to_owned() }, position)),
		};

		if truthy {
			self.execute_code_block(&if_statement.true_block)
		} else if let Some(false_block) = &if_statement.false_block {
			self.execute_code_block(false_block)
		} else {
			Ok(Flow::Normal(Value::synthetic(ValueKind::Nothing)))
		}
	}

	fn evaluate_expression(&mut self, expression: &Expression, position: Position) -> Result<Value, EvalError> {
		match expression {
			Expression::Number(number) => Ok(Value::new(ValueKind::Number(*number), position)),
			Expression::Text(text) => Ok(Value::new(ValueKind::Text(text.clone()), position)),
			Expression::Boolean(boolean) => Ok(Value::new(ValueKind::Boolean(*boolean), position)),
			Expression::Nothing => Ok(Value::new(ValueKind::Nothing, position)),
			Expression::Identifier(identifier) => {
				let cell = self.memory.get(identifier).map_err(|kind| self.runtime_error(kind, position))?;
				Ok(cell.value.clone())
			}
			Expression::FuncCall(call) => self.evaluate_func_call(call, position),
			Expression::Binary(binary) => self.evaluate_binary(binary, position),
			Expression::Accessor(accessor) => self.evaluate_accessor(accessor, position),
			Expression::FunctionLiteral(literal) => Ok(Value::new(
				ValueKind::Function(FuncDeclaration { parameters: literal.parameters.clone(), body: literal.body.clone() }),
				position,
			)),
		}
	}

	fn evaluate_func_call(&mut self, call: &crate::ast::FuncCall, position: Position) -> Result<Value, EvalError> {
		let cell = self.memory.get(&call.identifier).map_err(|kind| self.runtime_error(kind, position))?;
		let callee = cell.value.clone();

		if matches!(callee.kind, ValueKind::Nothing) {
			return Err(self.runtime_error(RuntimeErrorKind::CallOnNothing { identifier: call.identifier.clone() }, position));
		}
		if !is_callable(&callee.kind) {
			return Err(self.runtime_error(RuntimeErrorKind::NotCallable { identifier: call.identifier.clone() }, position));
		}

		self.memory.create_scope();
		self.state.push(ContextTag::Function);
		let result = self.call_body(&callee.kind, &call.args, position);
		self.memory.clear_scope();
		self.state.pop();
		result
	}

	/// Binds arguments into the scope `evaluate_func_call` just pushed and dispatches to either
	/// the user-defined body or the host routine. Runs entirely between the push and pop in
	/// `evaluate_func_call`, so every exit path here — success or error — leaves the scope/state
	/// pop to its caller.
	fn call_body(&mut self, callee: &ValueKind, args: &[Expression], position: Position) -> Result<Value, EvalError> {
		let parameters: &[Parameter] = match callee {
			ValueKind::Function(declaration) => &declaration.parameters,
			ValueKind::InternalFunction(declaration) => &declaration.parameters,
			_ => unreachable!("evaluate_func_call only dispatches callable values"),
		};

		if parameters.len() != args.len() {
			return Err(self.runtime_error(RuntimeErrorKind::ArityMismatch { expected: parameters.len(), found: args.len() }, position));
		}

		for (parameter, argument) in parameters.iter().zip(args) {
			let value = self.evaluate_expression(argument, position)?;
			if value_kind_to_type_name(&value.kind) != parameter.declared_type {
				return Err(self.runtime_error(
					RuntimeErrorKind::ArgumentTypeMismatch {
						parameter: parameter.identifier.clone(),
						expected: parameter.declared_type.clone(),
						found: value_kind_to_type_name(&value.kind).to_owned(),
					},
					position,
				));
			}
			let cell = Cell {
				identifier: parameter.identifier.clone(),
				declaration_kind: DeclarationKind::Argument,
				declared_type: parameter.declared_type.clone(),
				optional_internal_type: None,
				value,
			};
			self.memory.set(cell).map_err(|kind| self.runtime_error(kind, position))?;
		}

		match callee {
			ValueKind::Function(declaration) => match self.execute_code_block(&declaration.body)? {
				Flow::Return(value) => Ok(value),
				Flow::Normal(_) => Ok(Value::synthetic(ValueKind::Nothing)),
			},
			ValueKind::InternalFunction(declaration) => {
				stdlib::call(&declaration.identifier, &self.memory, self.host).map_err(|kind| self.runtime_error(kind, position))
			}
			_ => unreachable!("evaluate_func_call only dispatches callable values"),
		}
	}

	fn evaluate_accessor(&mut self, accessor: &Accessor, position: Position) -> Result<Value, EvalError> {
		let receiver = self.evaluate_expression(&accessor.receiver, position)?;
		let Some(argument_expressions) = &accessor.args else {
			return Err(self.runtime_error(
				RuntimeErrorKind::UnknownAttribute { type_name: value_kind_to_type_name(&receiver.kind).to_owned(), attribute: accessor.attribute.clone() },
				position,
			));
		};

		let mut args = Vec::with_capacity(argument_expressions.len());
		for expression in argument_expressions {
			args.push(self.evaluate_expression(expression, position)?);
		}

		attributes::dispatch(&receiver, &accessor.attribute, &args).map_err(|kind| self.runtime_error(kind, position))
	}

	/// Right operand evaluated first, per the operational semantics this mirrors; the resulting
	/// evaluation order is only observable through side effects in nested function calls, which
	/// this crate's test suite doesn't probe.
	fn evaluate_binary(&mut self, binary: &Binary, position: Position) -> Result<Value, EvalError> {
		let right = self.evaluate_expression(&binary.right, position)?;
		if is_callable(&right.kind) {
			return Err(self.runtime_error(RuntimeErrorKind::InvalidBinaryOperand, position));
		}
		let left = self.evaluate_expression(&binary.left, position)?;
		if is_callable(&left.kind) {
			return Err(self.runtime_error(RuntimeErrorKind::InvalidBinaryOperand, position));
		}
		self.dispatch_binary(binary.operator, left, right, position)
	}

	#[allow(clippy::too_many_lines)]
	fn dispatch_binary(&self, operator: BinaryOperator, left: Value, right: Value, position: Position) -> Result<Value, EvalError> {
		let left_type = value_kind_to_type_name(&left.kind);
		let right_type = value_kind_to_type_name(&right.kind);

		if left_type != right_type {
			return match operator {
				BinaryOperator::Equal | BinaryOperator::NotEqual => {
					Ok(Value::new(ValueKind::Boolean(operator == BinaryOperator::NotEqual), position))
				}
				_ => Err(self.runtime_error(
					RuntimeErrorKind::InvalidBinaryExpression { operator: operator.to_string(), left: left_type.to_owned(), right: right_type.to_owned() },
					position,
				)),
			};
		}

		match (operator, left.kind, right.kind) {
			(BinaryOperator::Equal, ValueKind::Boolean(a), ValueKind::Boolean(b)) => Ok(Value::new(ValueKind::Boolean(a == b), position)),
			(BinaryOperator::NotEqual, ValueKind::Boolean(a), ValueKind::Boolean(b)) => Ok(Value::new(ValueKind::Boolean(a != b), position)),
			(BinaryOperator::And, ValueKind::Boolean(a), ValueKind::Boolean(b)) => Ok(Value::new(ValueKind::Boolean(a && b), position)),
			(BinaryOperator::Or, ValueKind::Boolean(a), ValueKind::Boolean(b)) => Ok(Value::new(ValueKind::Boolean(a || b), position)),

			(BinaryOperator::Equal, ValueKind::Number(a), ValueKind::Number(b)) => Ok(Value::new(ValueKind::Boolean(a == b), position)),
			(BinaryOperator::NotEqual, ValueKind::Number(a), ValueKind::Number(b)) => Ok(Value::new(ValueKind::Boolean(a != b), position)),
			(BinaryOperator::LessThan, ValueKind::Number(a), ValueKind::Number(b)) => Ok(Value::new(ValueKind::Boolean(a < b), position)),
			(BinaryOperator::LessEqual, ValueKind::Number(a), ValueKind::Number(b)) => Ok(Value::new(ValueKind::Boolean(a <= b), position)),
			(BinaryOperator::GreaterThan, ValueKind::Number(a), ValueKind::Number(b)) => Ok(Value::new(ValueKind::Boolean(a > b), position)),
			(BinaryOperator::GreaterEqual, ValueKind::Number(a), ValueKind::Number(b)) => Ok(Value::new(ValueKind::Boolean(a >= b), position)),
			(BinaryOperator::Add, ValueKind::Number(a), ValueKind::Number(b)) => Ok(Value::new(ValueKind::Number(a + b), position)),
			(BinaryOperator::Subtract, ValueKind::Number(a), ValueKind::Number(b)) => Ok(Value::new(ValueKind::Number(a - b), position)),
			(BinaryOperator::Multiply, ValueKind::Number(a), ValueKind::Number(b)) => Ok(Value::new(ValueKind::Number(a * b), position)),
			(BinaryOperator::Divide, ValueKind::Number(a), ValueKind::Number(b)) => Ok(Value::new(ValueKind::Number(a / b), position)),
			(BinaryOperator::Modulo, ValueKind::Number(a), ValueKind::Number(b)) => Ok(Value::new(ValueKind::Number(a % b), position)),

			(BinaryOperator::Equal, ValueKind::Text(a), ValueKind::Text(b)) => Ok(Value::new(ValueKind::Boolean(a == b), position)),
			(BinaryOperator::NotEqual, ValueKind::Text(a), ValueKind::Text(b)) => Ok(Value::new(ValueKind::Boolean(a != b), position)),
			(BinaryOperator::Add, ValueKind::Text(a), ValueKind::Text(b)) => Ok(Value::new(ValueKind::Text(a + &b), position)),

			(operator, left_kind, right_kind) => Err(self.runtime_error(
				RuntimeErrorKind::InvalidBinaryExpression {
					operator: operator.to_string(),
					left: value_kind_to_type_name(&left_kind).to_owned(),
					right: value_kind_to_type_name(&right_kind).to_owned(),
				},
				position,
			)),
		}
	}

	/// Builds a `RuntimeError`, attaching a source excerpt from `current_source` (the module or
	/// import currently executing) when one is available.
	fn runtime_error(&self, kind: RuntimeErrorKind, position: Position) -> EvalError {
		let source_excerpt = self.current_source.as_ref().and_then(|source| source.lines().nth(position.line.saturating_sub(1))).map(ToOwned::to_owned);
		EvalError::Runtime(RuntimeError { kind, position, source_excerpt })
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;
	use crate::host::BufferedHost;

	/// A test-only `Host` that resolves imports from an in-memory map instead of a real
	/// filesystem, so the import driver's success and cycle-rejection paths can be exercised
	/// without touching disk. `stdout`/`stderr` delegate to an inner `BufferedHost`.
	struct MapHost {
		files: HashMap<String, String>,
		inner: BufferedHost,
	}

	impl MapHost {
		fn new(files: &[(&str, &str)]) -> Self {
			Self { files: files.iter().map(|(path, source)| ((*path).to_owned(), (*source).to_owned())).collect(), inner: BufferedHost::new() }
		}
	}

	impl Host for MapHost {
		fn stdout(&mut self, text: &str) {
			self.inner.stdout(text);
		}

		fn stderr(&mut self, text: &str) {
			self.inner.stderr(text);
		}

		fn load_file(&mut self, path: &str) -> Result<String, RuntimeErrorKind> {
			self.files.get(path).cloned().ok_or_else(|| RuntimeErrorKind::ImportUnsupported { path: path.to_owned() })
		}
	}

	fn run(source: &str) -> BufferedHost {
		let tokens = tokenize(source).unwrap();
		let module = parse(tokens).unwrap();
		let mut host = BufferedHost::new();
		{
			let mut evaluator = Evaluator::new(&mut host);
			evaluator.execute(&module, Some(source)).unwrap();
		}
		host
	}

	#[test]
	fn arithmetic_expression_result_prints_to_stdout() {
		let host = run("QUACK x <- 2 + 3\u{1f986} x\u{1f986}");
		assert_eq!(host.stdout_contents(), "5\n");
	}

	#[test]
	fn calling_a_user_defined_function_binds_and_returns() {
		let host = run("QUACK greet <- (:name: Text:) :> {: return 'hi ' + name\u{1f986} :}\u{1f986} greet(:'ada':)\u{1f986}");
		assert_eq!(host.stdout_contents(), "hi ada\n");
	}

	#[test]
	fn calling_with_the_wrong_arity_reports_arity_mismatch_and_prints_nothing() {
		let host = run("QUACK f <- (:a: Number, b: Number:) :> {: return a + b\u{1f986} :}\u{1f986} f(:1:)\u{1f986}");
		assert!(host.stderr_contents().contains("ArityMismatch"));
		assert_eq!(host.stdout_contents(), "");
	}

	#[test]
	fn a_non_boolean_if_condition_reports_non_boolean_condition() {
		let host = run("if 1 then 2\u{1f986} end");
		assert!(host.stderr_contents().contains("NonBooleanCondition"));
	}

	#[test]
	fn cross_type_equality_between_text_and_number_is_always_false_and_inequality_always_true() {
		let host = run("'a' == 3\u{1f986} 'a' != 3\u{1f986}");
		assert_eq!(host.stdout_contents(), "false\ntrue\n");
	}

	#[test]
	fn an_import_after_a_non_import_statement_is_rejected() {
		let host = run("QUACK x <- 1\u{1f986} import 'lib.quack'\u{1f986}");
		assert!(host.stderr_contents().contains("ImportNotAtTop"));
	}

	#[test]
	fn scope_depth_returns_to_one_after_a_successful_module_run() {
		let tokens = tokenize("QUACK f <- (: :) :> {: return 1\u{1f986} :}\u{1f986} f(: :)\u{1f986}").unwrap();
		let module = parse(tokens).unwrap();
		let mut host = BufferedHost::new();
		let mut evaluator = Evaluator::new(&mut host);
		evaluator.execute_module(&module, None).unwrap();
		assert_eq!(evaluator.memory.scope_depth(), 1);
		assert_eq!(evaluator.state.depth(), 0);
	}

	#[test]
	fn scope_depth_is_balanced_even_when_the_call_raises() {
		let tokens = tokenize("QUACK f <- (:a: Number:) :> {: return a\u{1f986} :}\u{1f986} f(:'oops':)\u{1f986}").unwrap();
		let module = parse(tokens).unwrap();
		let mut host = BufferedHost::new();
		let mut evaluator = Evaluator::new(&mut host);
		evaluator.execute(&module, None).unwrap();
		assert!(host.stderr_contents().contains("ArgumentTypeMismatch"));
		assert_eq!(evaluator.memory.scope_depth(), 1);
		assert_eq!(evaluator.state.depth(), 0);
	}

	#[test]
	fn return_outside_a_function_is_rejected() {
		let host = run("return 1\u{1f986}");
		assert!(host.stderr_contents().contains("ReturnOutsideFunction"));
	}

	#[test]
	fn a_successful_import_shares_its_declarations_with_the_importer() {
		let tokens = tokenize("import 'lib.quack'\u{1f986} greet(:'ada':)\u{1f986}").unwrap();
		let module = parse(tokens).unwrap();
		let mut host = MapHost::new(&[("lib.quack", "QUACK greet <- (:name: Text:) :> {: return 'hi ' + name\u{1f986} :}\u{1f986}")]);
		let mut evaluator = Evaluator::new(&mut host);
		evaluator.execute(&module, None).unwrap();
		assert_eq!(host.inner.stdout_contents(), "hi ada\n");
	}

	#[test]
	fn a_cyclic_import_is_rejected_instead_of_recursing_forever() {
		let tokens = tokenize("import 'a.quack'\u{1f986}").unwrap();
		let module = parse(tokens).unwrap();
		let mut host = MapHost::new(&[("a.quack", "import 'b.quack'\u{1f986}"), ("b.quack", "import 'a.quack'\u{1f986}")]);
		let mut evaluator = Evaluator::new(&mut host);
		evaluator.execute(&module, None).unwrap();
		assert!(host.inner.stderr_contents().contains("ImportCycle"));
	}

	#[test]
	fn declaring_an_optional_as_nothing_succeeds() {
		let host = run("QUACK x: Number? <- nothing\u{1f986}");
		assert_eq!(host.stderr_contents(), "");
	}

	#[test]
	fn declaring_a_non_optional_as_nothing_reports_null_to_non_optional() {
		let host = run("QUACK x: Number <- nothing\u{1f986}");
		assert!(host.stderr_contents().contains("NullToNonOptional"));
	}
}
