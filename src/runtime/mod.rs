// File: src/runtime/mod.rs
//
// Runtime context for the Cyon language.
// One Runtime owns the loop control stack, the native function registry,
// and the loop statistics counters for a single interpreter instance.
// Multiple independent runtimes can coexist in one process; each is meant
// to be driven from a single interpreter thread.

pub mod loop_control;
pub mod registry;
pub mod value;

pub use loop_control::{LoopStack, LoopStats, Signal, DEFAULT_MAX_LOOP_DEPTH};
pub use registry::{NativeFn, NativeRegistry, MAX_NATIVE_FUNCTIONS};
pub use value::Value;

use crate::errors::CyonError;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

/// Shared state backing one embedded interpreter instance
pub struct Runtime {
    pub loops: LoopStack,
    pub natives: NativeRegistry,
    pub stats: LoopStats,
    output: Option<Arc<Mutex<Vec<u8>>>>,
    input_lines: Option<Arc<Mutex<VecDeque<String>>>>,
}

impl Runtime {
    /// Creates a runtime with the built-in natives installed
    pub fn new() -> Self {
        let mut runtime = Runtime {
            loops: LoopStack::new(),
            natives: NativeRegistry::new(),
            stats: LoopStats::new(),
            output: None,
            input_lines: None,
        };
        runtime.natives.init();
        runtime
    }

    /// Expose a host function to interpreted code under `name`
    pub fn register_native(&mut self, name: &str, native: NativeFn) -> Result<(), CyonError> {
        self.natives.register(name, native)
    }

    /// Resolve and invoke a native function by name
    ///
    /// An unknown name reports a diagnostic and yields `Nil`; interpreted
    /// execution continues.
    pub fn call_native(&mut self, name: &str, args: &[Value]) -> Value {
        match self.natives.lookup(name) {
            Some(native) => native(self, args),
            None => {
                CyonError::undefined_function(name).report();
                Value::Nil
            }
        }
    }

    /// Redirect print/prompt output into a buffer and return it
    pub fn capture_output(&mut self) -> Arc<Mutex<Vec<u8>>> {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        self.output = Some(Arc::clone(&buffer));
        buffer
    }

    /// Feed `input` from a fixed list of lines instead of stdin
    pub fn script_input(&mut self, lines: &[&str]) {
        let queue: VecDeque<String> = lines.iter().map(|line| line.to_string()).collect();
        self.input_lines = Some(Arc::new(Mutex::new(queue)));
    }

    /// Print the loop statistics report
    pub fn print_stats(&self) {
        self.write_output(&self.stats.report());
    }

    /// Helper to write output to either the output buffer or stdout
    pub(crate) fn write_output(&self, msg: &str) {
        if let Some(out) = &self.output {
            let mut buffer = out.lock().unwrap();
            let _ = writeln!(buffer, "{}", msg);
        } else {
            println!("{}", msg);
        }
    }

    /// Write a prompt without a newline, flushed so it lands before reads
    pub(crate) fn write_prompt(&self, msg: &str) {
        if let Some(out) = &self.output {
            let mut buffer = out.lock().unwrap();
            let _ = write!(buffer, "{}", msg);
        } else {
            print!("{}", msg);
            let _ = io::stdout().flush();
        }
    }

    /// Read one line from scripted input or stdin, without the newline
    pub(crate) fn read_line(&mut self) -> String {
        if let Some(lines) = &self.input_lines {
            let mut queue = lines.lock().unwrap();
            return queue.pop_front().unwrap_or_default();
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => {
                while line.ends_with('\n') || line.ends_with('\r') {
                    line.pop();
                }
                line
            }
            Err(_) => String::new(),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
