// File: src/runtime/value.rs
//
// Runtime value types for the Cyon language.
// Defines the tagged values that cross the boundary between the host and
// interpreted code, plus the array container with its slot semantics.

use crate::errors::CyonError;
use std::sync::Arc;

/// Runtime values in the Cyon runtime core
///
/// Strings and arrays are reference-counted for cheap cloning; mutation of
/// an array goes through copy-on-write (`Arc::make_mut`), so every `Value`
/// behaves as a single-owner value at the API surface.
///
/// Array slots distinguish a never-assigned hole (`None`) from an explicitly
/// stored `Nil` (`Some(Value::Nil)`). Both read back as `Nil` through
/// [`Value::array_get`]; [`Value::array_is_set`] exposes the distinction for
/// embedders that need a has-style check.
#[derive(Clone)]
pub enum Value {
    /// Absence of a value
    Nil,
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point number
    Float(f64),
    /// String value (owned copy, reference-counted for cheap cloning)
    Str(Arc<String>),
    /// Fixed-length array of independently boxed slots
    Array(Arc<Vec<Option<Value>>>),
    /// Native (built-in) function, resolved by name through the registry
    NativeFunction(String),
    /// User-defined function: opaque handle into the embedding
    /// interpreter's function table
    UserFunction(usize),
}

impl Value {
    /// Helper to create a Str value from a String
    pub fn str(s: String) -> Self {
        Value::Str(Arc::new(s))
    }

    /// Helper to create a Str value from a &str
    pub fn str_ref(s: &str) -> Self {
        Value::Str(Arc::new(s.to_string()))
    }

    /// Helper to create an array value with `len` slots, all holes
    pub fn array_with_len(len: usize) -> Self {
        Value::Array(Arc::new(vec![None; len]))
    }

    /// Name of this value's type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::NativeFunction(_) => "native function",
            Value::UserFunction(_) => "function",
        }
    }

    /// Number of slots if this value is an array, 0 otherwise
    pub fn array_len(&self) -> usize {
        match self {
            Value::Array(slots) => slots.len(),
            _ => 0,
        }
    }

    /// Whether `index` names a slot that has been assigned
    ///
    /// An explicitly stored `Nil` counts as set; a hole does not. False for
    /// non-array receivers and out-of-bounds indices.
    pub fn array_is_set(&self, index: usize) -> bool {
        match self {
            Value::Array(slots) => matches!(slots.get(index), Some(Some(_))),
            _ => false,
        }
    }

    /// Store `value` at `index`
    ///
    /// Reports a diagnostic and leaves the receiver unchanged if it is not
    /// an array or the index is out of bounds. The returned status is
    /// advisory; callers may ignore it and keep executing.
    pub fn array_set(&mut self, index: usize, value: Value) -> Result<(), CyonError> {
        match self {
            Value::Array(slots) => {
                if index >= slots.len() {
                    let err = CyonError::index_out_of_bounds(index, slots.len());
                    err.report();
                    return Err(err);
                }
                Arc::make_mut(slots)[index] = Some(value);
                Ok(())
            }
            other => {
                let err = CyonError::type_error(format!(
                    "Cannot index into a value of type {}",
                    other.type_name()
                ));
                err.report();
                Err(err)
            }
        }
    }

    /// Read the slot at `index`
    ///
    /// Holes and non-array receivers read as `Nil`. Out-of-bounds reads
    /// additionally report a diagnostic but still return `Nil` so
    /// interpreted execution continues.
    pub fn array_get(&self, index: usize) -> Value {
        match self {
            Value::Array(slots) => match slots.get(index) {
                Some(Some(value)) => value.clone(),
                Some(None) => Value::Nil,
                None => {
                    CyonError::index_out_of_bounds(index, slots.len()).report();
                    Value::Nil
                }
            },
            _ => Value::Nil,
        }
    }
}

// Manual Debug implementation for Value
impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Int(n) => write!(f, "Int({})", n),
            Value::Float(n) => write!(f, "Float({})", n),
            Value::Str(s) => write!(f, "Str({:?})", s.as_ref()),
            Value::Array(slots) => {
                let set = slots.iter().filter(|slot| slot.is_some()).count();
                write!(f, "Array[{} slots, {} set]", slots.len(), set)
            }
            Value::NativeFunction(name) => write!(f, "NativeFunction({})", name),
            Value::UserFunction(handle) => write!(f, "UserFunction(#{})", handle),
        }
    }
}
