// File: src/runtime/registry.rs
//
// Native function registry for the Cyon runtime.
// Host code registers named functions here; the interpreter resolves a
// call-by-name into a plain function pointer and invokes it with tagged
// values. Includes the built-in `print` and `input` natives.

use crate::errors::CyonError;
use crate::runtime::value::Value;
use crate::runtime::Runtime;

/// Maximum number of native functions a registry will accept
pub const MAX_NATIVE_FUNCTIONS: usize = 256;

/// Signature of a host function callable from interpreted code
pub type NativeFn = fn(&mut Runtime, &[Value]) -> Value;

/// Ordered name -> function table for host-provided natives
///
/// Registration is append-only and performs no uniqueness check: lookup
/// scans in registration order and returns the first match, so a duplicate
/// name only adds an unreachable entry. Callers are expected to keep names
/// unique by construction.
pub struct NativeRegistry {
    entries: Vec<(String, NativeFn)>,
    initialized: bool,
}

impl NativeRegistry {
    /// Create an empty registry with no builtins installed
    pub fn new() -> Self {
        NativeRegistry { entries: Vec::new(), initialized: false }
    }

    /// Append a named native function
    ///
    /// Reports a diagnostic and fails once the table is full; existing
    /// entries are untouched.
    pub fn register(&mut self, name: &str, native: NativeFn) -> Result<(), CyonError> {
        if self.entries.len() >= MAX_NATIVE_FUNCTIONS {
            let err = CyonError::registry_full(name);
            err.report();
            return Err(err);
        }
        self.entries.push((name.to_string(), native));
        Ok(())
    }

    /// Resolve a name to its function pointer, first match wins
    pub fn lookup(&self, name: &str) -> Option<NativeFn> {
        self.entries.iter().find(|(entry_name, _)| entry_name == name).map(|(_, native)| *native)
    }

    /// Number of registered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Install the built-in natives exactly once
    ///
    /// Idempotent: repeated calls leave the registry unchanged.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        let _ = self.register("print", native_print);
        let _ = self.register("input", native_input);
        self.initialized = true;
    }
}

impl Default for NativeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// print(args...) - renders each argument by tag, space-separated, with a
/// trailing newline; always returns Nil
fn native_print(runtime: &mut Runtime, args: &[Value]) -> Value {
    let parts: Vec<String> = args.iter().map(render_print_arg).collect();
    runtime.write_output(&parts.join(" "));
    Value::Nil
}

fn render_print_arg(value: &Value) -> String {
    match value {
        Value::Str(s) => s.as_ref().clone(),
        Value::Int(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        _ => "<value>".to_string(),
    }
}

/// input(prompt?) - writes a string prompt unbuffered, then reads one line
/// up to but not including the newline; empty string at end of input
fn native_input(runtime: &mut Runtime, args: &[Value]) -> Value {
    if let Some(Value::Str(prompt)) = args.first() {
        runtime.write_prompt(prompt);
    }
    Value::str(runtime.read_line())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nop(_runtime: &mut Runtime, _args: &[Value]) -> Value {
        Value::Nil
    }

    fn other(_runtime: &mut Runtime, _args: &[Value]) -> Value {
        Value::Int(1)
    }

    #[test]
    fn test_lookup_returns_first_registered_match() {
        let mut registry = NativeRegistry::new();
        registry.register("probe", nop).unwrap();
        registry.register("probe", other).unwrap();

        let resolved = registry.lookup("probe").expect("probe should resolve");
        let mut runtime = Runtime::new();
        match resolved(&mut runtime, &[]) {
            Value::Nil => {}
            got => panic!("duplicate registration must shadow nothing, got {:?}", got),
        }
    }

    #[test]
    fn test_lookup_unknown_name_is_none() {
        let registry = NativeRegistry::new();
        assert!(registry.lookup("missing").is_none());
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut registry = NativeRegistry::new();
        registry.init();
        registry.init();
        assert_eq!(registry.names(), vec!["print", "input"]);
    }

    #[test]
    fn test_register_fails_when_full() {
        let mut registry = NativeRegistry::new();
        for i in 0..MAX_NATIVE_FUNCTIONS {
            registry.register(&format!("fn_{}", i), nop).unwrap();
        }
        assert!(registry.register("one_too_many", nop).is_err());
        assert_eq!(registry.len(), MAX_NATIVE_FUNCTIONS);
    }
}
