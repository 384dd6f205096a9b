// File: src/errors.rs
//
// Error handling and reporting for the Cyon runtime core.
// Runtime failures here are advisory: they are reported to stderr and the
// offending operation returns a benign default, so interpreted-language
// execution keeps going instead of taking down the host process.

use colored::Colorize;
use std::fmt;

/// Types of errors the runtime core can report
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    TypeError,
    IndexOutOfBounds,
    RegistryFull,
    UndefinedFunction,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::TypeError => write!(f, "Type Error"),
            ErrorKind::IndexOutOfBounds => write!(f, "Index Out Of Bounds"),
            ErrorKind::RegistryFull => write!(f, "Registry Full"),
            ErrorKind::UndefinedFunction => write!(f, "Undefined Function"),
        }
    }
}

/// A runtime diagnostic with kind and message
#[derive(Debug, Clone, PartialEq)]
pub struct CyonError {
    pub kind: ErrorKind,
    pub message: String,
}

impl CyonError {
    pub fn new(kind: ErrorKind, message: String) -> Self {
        Self { kind, message }
    }

    /// Create a type error for an operation applied to the wrong value kind
    pub fn type_error(message: String) -> Self {
        Self::new(ErrorKind::TypeError, message)
    }

    /// Create an out-of-bounds error for an array access
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::new(
            ErrorKind::IndexOutOfBounds,
            format!("Array index out of bounds: {} >= {}", index, len),
        )
    }

    /// Create an error for registering into a full native-function table
    pub fn registry_full(name: &str) -> Self {
        Self::new(
            ErrorKind::RegistryFull,
            format!("Cannot register native function '{}': registry is full", name),
        )
    }

    /// Create an error for a call to an unregistered native function
    pub fn undefined_function(name: &str) -> Self {
        Self::new(ErrorKind::UndefinedFunction, format!("Function '{}' is not defined", name))
    }

    /// Write this diagnostic to the error channel (stderr)
    pub fn report(&self) {
        eprintln!("{}", self);
    }
}

impl fmt::Display for CyonError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind_str = format!("{}", self.kind);
        write!(f, "{}: {}", kind_str.red().bold(), self.message.bold())
    }
}

impl std::error::Error for CyonError {}
