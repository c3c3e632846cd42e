use crate::{
	error::RuntimeErrorKind,
	value::{convert_value_to_text, value_kind_to_type_name, Value, ValueKind},
};

/// A static primitive attribute's implementation: given the receiver value and its call
/// arguments, produces the call's result or a runtime error.
type AttributeFn = fn(&Value, &[Value]) -> Result<Value, RuntimeErrorKind>;

/// The process-wide registry of built-in "methods" reachable via accessor syntax on primitive
/// receivers, keyed by `"TypeName.attribute"`. Initialised once as a `phf::Map`, so there is no
/// setup step and no hidden mutable state to get wrong between evaluator instances.
static PRIMITIVE_ATTRIBUTES: phf::Map<&'static str, AttributeFn> = phf::phf_map! {
	"Number.to_text" => |receiver, _args| Ok(convert_value_to_text(receiver)),
	"Number.round" => |receiver, _args| {
		let ValueKind::Number(n) = receiver.kind else { unreachable!("dispatched on a Number receiver") };
		Ok(Value::new(ValueKind::Number(n.round()), receiver.position))
	},
	"Number.abs" => |receiver, _args| {
		let ValueKind::Number(n) = receiver.kind else { unreachable!("dispatched on a Number receiver") };
		Ok(Value::new(ValueKind::Number(n.abs()), receiver.position))
	},
	"Text.to_text" => |receiver, _args| Ok(receiver.clone()),
	"Text.length" => |receiver, _args| {
		let ValueKind::Text(ref text) = receiver.kind else { unreachable!("dispatched on a Text receiver") };
		Ok(Value::new(ValueKind::Number(text.chars().count() as f64), receiver.position))
	},
	"Text.to_uppercase" => |receiver, _args| {
		let ValueKind::Text(ref text) = receiver.kind else { unreachable!("dispatched on a Text receiver") };
		Ok(Value::new(ValueKind::Text(text.to_uppercase()), receiver.position))
	},
	"Text.to_lowercase" => |receiver, _args| {
		let ValueKind::Text(ref text) = receiver.kind else { unreachable!("dispatched on a Text receiver") };
		Ok(Value::new(ValueKind::Text(text.to_lowercase()), receiver.position))
	},
	"Boolean.to_text" => |receiver, _args| Ok(convert_value_to_text(receiver)),
	"Boolean.negate" => |receiver, _args| {
		let ValueKind::Boolean(b) = receiver.kind else { unreachable!("dispatched on a Boolean receiver") };
		Ok(Value::new(ValueKind::Boolean(!b), receiver.position))
	},
};

/// Resolves and invokes `receiver.attribute(:args:)` against the static registry.
///
/// # Errors
/// `UnknownAttribute` if `receiver`'s type has no attribute by that name.
pub fn dispatch(receiver: &Value, attribute: &str, args: &[Value]) -> Result<Value, RuntimeErrorKind> {
	let type_name = value_kind_to_type_name(&receiver.kind);
	let key = format!("{type_name}.{attribute}");
	PRIMITIVE_ATTRIBUTES
		.get(key.as_str())
		.ok_or_else(|| RuntimeErrorKind::UnknownAttribute { type_name: type_name.to_owned(), attribute: attribute.to_owned() })
		.and_then(|implementation| implementation(receiver, args))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::position::Position;

	#[test]
	fn text_length_counts_unicode_scalars_not_bytes() {
		let receiver = Value::new(ValueKind::Text("café".to_owned()), Position::start());
		let ValueKind::Number(n) = dispatch(&receiver, "length", &[]).unwrap().kind else { panic!("expected a number") };
		assert!((n - 4.0).abs() < f64::EPSILON);
	}

	#[test]
	fn unknown_attribute_is_reported_with_the_receiver_type_name() {
		let receiver = Value::new(ValueKind::Number(1.0), Position::start());
		let result = dispatch(&receiver, "frobnicate", &[]);
		assert!(matches!(result, Err(RuntimeErrorKind::UnknownAttribute { type_name, .. }) if type_name == "Number"));
	}

	#[test]
	fn boolean_negate_flips_the_value() {
		let receiver = Value::new(ValueKind::Boolean(true), Position::start());
		let ValueKind::Boolean(b) = dispatch(&receiver, "negate", &[]).unwrap().kind else { panic!("expected a boolean") };
		assert!(!b);
	}
}
