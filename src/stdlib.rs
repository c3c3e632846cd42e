use crate::{
	ast::Parameter,
	error::RuntimeErrorKind,
	host::Host,
	memory::{Cell, DeclarationKind, Memory},
	value::{InternalFuncDeclaration, Value, ValueKind},
};

/// A const-constructible stand-in for `ast::Parameter`, whose `declared_type: String` can't be
/// built inside a `phf_map!` literal. Converted into owned parameters once, at `seed` time.
pub struct InternalParameter {
	pub identifier: &'static str,
	pub declared_type: &'static str,
}

impl InternalParameter {
	fn to_parameter(&self) -> Parameter {
		Parameter { identifier: self.identifier.to_owned(), declared_type: self.declared_type.to_owned() }
	}
}

/// A standard-library routine: its parameter list (for arity/type checking and argument binding,
/// exactly as if it were a user-defined function) and its implementation, which reads its bound
/// arguments back out of the scope the evaluator just pushed for the call.
pub struct InternalFunction {
	pub parameters: &'static [InternalParameter],
	implementation: fn(&Memory, &mut dyn Host) -> Result<Value, RuntimeErrorKind>,
}

static INTERNAL_FUNCTIONS: phf::Map<&'static str, InternalFunction> = phf::phf_map! {
	"print" => InternalFunction {
		parameters: &[InternalParameter { identifier: "text", declared_type: "Text" }],
		implementation: |scope, host| {
			let cell = scope.get("text")?;
			let ValueKind::Text(ref text) = cell.value.kind else { unreachable!("print's parameter is declared Text") };
			host.stdout(text);
			Ok(Value::synthetic(ValueKind::Nothing))
		},
	},
	"printError" => InternalFunction {
		parameters: &[InternalParameter { identifier: "text", declared_type: "Text" }],
		implementation: |scope, host| {
			let cell = scope.get("text")?;
			let ValueKind::Text(ref text) = cell.value.kind else { unreachable!("printError's parameter is declared Text") };
			host.stderr(text);
			Ok(Value::synthetic(ValueKind::Nothing))
		},
	},
	"Vector2" => InternalFunction {
		parameters: &[
			InternalParameter { identifier: "x", declared_type: "Number" },
			InternalParameter { identifier: "y", declared_type: "Number" },
		],
		implementation: |scope, _host| {
			let ValueKind::Number(x) = scope.get("x")?.value.kind else { unreachable!("Vector2's x is declared Number") };
			let ValueKind::Number(y) = scope.get("y")?.value.kind else { unreachable!("Vector2's y is declared Number") };
			Ok(Value::synthetic(ValueKind::Vector2 { x, y }))
		},
	},
	"Vector3" => InternalFunction {
		parameters: &[
			InternalParameter { identifier: "x", declared_type: "Number" },
			InternalParameter { identifier: "y", declared_type: "Number" },
			InternalParameter { identifier: "z", declared_type: "Number" },
		],
		implementation: |scope, _host| {
			let ValueKind::Number(x) = scope.get("x")?.value.kind else { unreachable!("Vector3's x is declared Number") };
			let ValueKind::Number(y) = scope.get("y")?.value.kind else { unreachable!("Vector3's y is declared Number") };
			let ValueKind::Number(z) = scope.get("z")?.value.kind else { unreachable!("Vector3's z is declared Number") };
			Ok(Value::synthetic(ValueKind::Vector3 { x, y, z }))
		},
	},
};

/// Invokes the routine registered under `identifier` against the scope the evaluator has already
/// bound its arguments into.
///
/// # Errors
/// Propagates whatever the routine itself returns; routines never fail for a reason other than
/// an invariant the evaluator already checked before dispatching here.
pub fn call(identifier: &str, scope: &Memory, host: &mut dyn Host) -> Result<Value, RuntimeErrorKind> {
	(INTERNAL_FUNCTIONS
		.get(identifier)
		.unwrap_or_else(|| unreachable!("evaluator only dispatches identifiers it resolved from this registry"))
		.implementation)(scope, host)
}

/// Declares every standard-library routine as an `InternalFunction` cell in the global scope.
/// Called once per top-level `Evaluator::execute_module`, after `Memory::clear`.
pub fn seed(memory: &mut Memory) {
	for (identifier, function) in &INTERNAL_FUNCTIONS {
		let parameters: Vec<Parameter> = function.parameters.iter().map(InternalParameter::to_parameter).collect();
		let cell = Cell {
			identifier: (*identifier).to_owned(),
			declaration_kind: DeclarationKind::Constant,
			declared_type: "internalFunc".to_owned(),
			optional_internal_type: None,
			value: Value::synthetic(ValueKind::InternalFunction(InternalFuncDeclaration { identifier: (*identifier).to_owned(), parameters })),
		};
		memory.set(cell).unwrap_or_else(|_| unreachable!("the global scope is freshly cleared and every stdlib identifier is unique"));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::host::BufferedHost;

	#[test]
	fn seeding_populates_every_registered_routine() {
		let mut memory = Memory::new();
		seed(&mut memory);
		assert!(memory.get("print").is_ok());
		assert!(memory.get("Vector2").is_ok());
	}

	#[test]
	fn print_writes_its_argument_to_stdout() {
		let mut memory = Memory::new();
		memory.create_scope();
		memory
			.set(Cell {
				identifier: "text".to_owned(),
				declaration_kind: DeclarationKind::Argument,
				declared_type: "Text".to_owned(),
				optional_internal_type: None,
				value: Value::synthetic(ValueKind::Text("quack".to_owned())),
			})
			.unwrap();
		let mut host = BufferedHost::new();
		call("print", &memory, &mut host).unwrap();
		assert_eq!(host.stdout_contents(), "quack\n");
	}
}
