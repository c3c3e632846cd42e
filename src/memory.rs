use std::collections::HashMap;

use crate::{
	ast,
	error::RuntimeErrorKind,
	value::{value_kind_to_type_name, Value, ValueKind},
};

/// Whether a memory cell rejects reassignment. Mirrors `ast::DeclarationKind`, plus `Argument`
/// for cells bound by a function call's parameter list, which has no surface syntax of its own
/// and so isn't representable in `ast::DeclarationKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
	Constant,
	Variable,
	Argument,
}

impl From<ast::DeclarationKind> for DeclarationKind {
	fn from(kind: ast::DeclarationKind) -> Self {
		match kind {
			ast::DeclarationKind::Constant => Self::Constant,
			ast::DeclarationKind::Variable => Self::Variable,
		}
	}
}

/// A named, typed storage slot in a scope. `declared_type` is the literal string `"optional"`
/// when `optional_internal_type` is `Some`, matching the wrapper convention of spec.md §3.2.
#[derive(Debug, Clone)]
pub struct Cell {
	pub identifier: String,
	pub declaration_kind: DeclarationKind,
	pub declared_type: String,
	pub optional_internal_type: Option<String>,
	pub value: Value,
}

impl Cell {
	/// The type name a stored value is checked against: the optional wrapper's inner type when
	/// present, otherwise the cell's own declared type.
	#[must_use]
	pub fn expected_type(&self) -> &str {
		self.optional_internal_type.as_deref().unwrap_or(&self.declared_type)
	}
}

/// A stack of identifier-to-cell scopes implementing lexical shadowing: lookup always searches
/// innermost-outward. The global scope (index 0) is never popped.
#[derive(Debug)]
pub struct Memory {
	scopes: Vec<HashMap<String, Cell>>,
}

impl Memory {
	#[must_use]
	pub fn new() -> Self {
		Self { scopes: vec![HashMap::new()] }
	}

	/// Resets to a single empty global scope, discarding every cell and every pushed scope.
	pub fn clear(&mut self) {
		self.scopes.clear();
		self.scopes.push(HashMap::new());
	}

	/// Pushes a new, empty scope on top of the stack. Used once per function call.
	pub fn create_scope(&mut self) {
		self.scopes.push(HashMap::new());
	}

	/// Pops the innermost scope. Must be paired with exactly one prior `create_scope` call, and
	/// must run on every exit path from the call that pushed it, including an error exit.
	pub fn clear_scope(&mut self) {
		debug_assert!(self.scopes.len() > 1, "attempted to pop the global scope");
		self.scopes.pop();
	}

	/// The number of scopes currently on the stack, including the global scope. Used by tests to
	/// check the balanced-push-pop invariant.
	#[must_use]
	pub fn scope_depth(&self) -> usize {
		self.scopes.len()
	}

	/// Inserts `cell` into the innermost scope.
	///
	/// # Errors
	/// `RedeclarationError` if a cell with the same identifier already exists in that scope.
	pub fn set(&mut self, cell: Cell) -> Result<(), RuntimeErrorKind> {
		let scope = self.scopes.last_mut().expect("memory always has at least one scope");
		if scope.contains_key(&cell.identifier) {
			return Err(RuntimeErrorKind::RedeclarationError { identifier: cell.identifier });
		}
		scope.insert(cell.identifier.clone(), cell);
		Ok(())
	}

	/// Searches scopes innermost-outward for `identifier`.
	///
	/// # Errors
	/// `UndefinedIdentifier` if no scope on the stack has a cell with that identifier.
	pub fn get(&self, identifier: &str) -> Result<&Cell, RuntimeErrorKind> {
		self.scopes
			.iter()
			.rev()
			.find_map(|scope| scope.get(identifier))
			.ok_or_else(|| RuntimeErrorKind::UndefinedIdentifier { identifier: identifier.to_owned() })
	}

	/// Locates `identifier` in any scope and replaces its value. The cell's declared type is
	/// never changed by this call.
	///
	/// # Errors
	/// `UndefinedIdentifier` if absent, `AssignToConstant` if the cell is a constant,
	/// `NullToNonOptional` if `value` is `Nothing` and the cell isn't optional, or
	/// `TypeMismatch` if `value`'s kind doesn't match the cell's declared (or optional-inner)
	/// type.
	pub fn update(&mut self, identifier: &str, value: Value) -> Result<(), RuntimeErrorKind> {
		for scope in self.scopes.iter_mut().rev() {
			let Some(cell) = scope.get_mut(identifier) else { continue };
			if cell.declaration_kind == DeclarationKind::Constant {
				return Err(RuntimeErrorKind::AssignToConstant { identifier: identifier.to_owned() });
			}
			if matches!(value.kind, ValueKind::Nothing) {
				if cell.optional_internal_type.is_none() {
					return Err(RuntimeErrorKind::NullToNonOptional { identifier: identifier.to_owned() });
				}
			} else {
				let expected = cell.expected_type().to_owned();
				if value_kind_to_type_name(&value.kind) != expected {
					return Err(RuntimeErrorKind::TypeMismatch { expected, found: value_kind_to_type_name(&value.kind).to_owned() });
				}
			}
			cell.value = value;
			return Ok(());
		}
		Err(RuntimeErrorKind::UndefinedIdentifier { identifier: identifier.to_owned() })
	}
}

impl Default for Memory {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::position::Position;

	fn cell(identifier: &str, declaration_kind: DeclarationKind, declared_type: &str, value: ValueKind) -> Cell {
		Cell {
			identifier: identifier.to_owned(),
			declaration_kind,
			declared_type: declared_type.to_owned(),
			optional_internal_type: None,
			value: Value::new(value, Position::start()),
		}
	}

	#[test]
	fn lookup_resolves_innermost_scope_first() {
		let mut memory = Memory::new();
		memory.set(cell("x", DeclarationKind::Variable, "Number", ValueKind::Number(1.0))).unwrap();
		memory.create_scope();
		memory.set(cell("x", DeclarationKind::Variable, "Number", ValueKind::Number(2.0))).unwrap();
		let ValueKind::Number(n) = memory.get("x").unwrap().value.kind else { panic!("expected a number") };
		assert!((n - 2.0).abs() < f64::EPSILON);
	}

	#[test]
	fn redeclaring_in_the_same_scope_fails() {
		let mut memory = Memory::new();
		memory.set(cell("x", DeclarationKind::Variable, "Number", ValueKind::Number(1.0))).unwrap();
		let result = memory.set(cell("x", DeclarationKind::Variable, "Number", ValueKind::Number(2.0)));
		assert!(matches!(result, Err(RuntimeErrorKind::RedeclarationError { .. })));
	}

	#[test]
	fn constants_reject_reassignment() {
		let mut memory = Memory::new();
		memory.set(cell("x", DeclarationKind::Constant, "Number", ValueKind::Number(1.0))).unwrap();
		let result = memory.update("x", Value::new(ValueKind::Number(2.0), Position::start()));
		assert!(matches!(result, Err(RuntimeErrorKind::AssignToConstant { .. })));
	}

	#[test]
	fn update_type_checks_against_the_declared_type() {
		let mut memory = Memory::new();
		memory.set(cell("x", DeclarationKind::Variable, "Number", ValueKind::Number(1.0))).unwrap();
		let result = memory.update("x", Value::new(ValueKind::Text("oops".to_owned()), Position::start()));
		assert!(matches!(result, Err(RuntimeErrorKind::TypeMismatch { .. })));
	}

	#[test]
	fn assigning_nothing_to_a_non_optional_cell_is_rejected() {
		let mut memory = Memory::new();
		memory.set(cell("x", DeclarationKind::Variable, "Number", ValueKind::Number(1.0))).unwrap();
		let result = memory.update("x", Value::new(ValueKind::Nothing, Position::start()));
		assert!(matches!(result, Err(RuntimeErrorKind::NullToNonOptional { .. })));
	}

	#[test]
	fn assigning_nothing_to_an_optional_cell_succeeds() {
		let mut memory = Memory::new();
		let mut optional_cell = cell("x", DeclarationKind::Variable, "optional", ValueKind::Number(1.0));
		optional_cell.optional_internal_type = Some("Number".to_owned());
		memory.set(optional_cell).unwrap();
		memory.update("x", Value::new(ValueKind::Nothing, Position::start())).unwrap();
		assert!(matches!(memory.get("x").unwrap().value.kind, ValueKind::Nothing));
	}

	#[test]
	fn popping_leaves_the_global_scope_intact() {
		let mut memory = Memory::new();
		memory.set(cell("x", DeclarationKind::Variable, "Number", ValueKind::Number(1.0))).unwrap();
		memory.create_scope();
		memory.set(cell("y", DeclarationKind::Argument, "Number", ValueKind::Number(2.0))).unwrap();
		memory.clear_scope();
		assert_eq!(memory.scope_depth(), 1);
		assert!(memory.get("x").is_ok());
		assert!(memory.get("y").is_err());
	}
}
