//! # gust
//!
//! gust is an expression-oriented array language written in Rust.
//! Programs are chains of pipes: every expression maps a vector of values to
//! a vector of values, and operators broadcast over arrays.
//!
//! ```
//! use gust::run;
//!
//! let result = run("[1, 2, 3] ≺ * (10)", &[]).unwrap();
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].to_string(), "[10, 20, 30]");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::Error,
    interpreter::{
        evaluator::core::Program,
        parser::core::ParseResult,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and the arena that stores a parsed
/// program. The tree is built once by the parser and read once by the
/// compiler.
///
/// # Responsibilities
/// - Defines node types for all language constructs.
/// - Attaches line numbers to the nodes that can fail at run time.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// # Responsibilities
/// - Defines one error enum per phase (compilation, evaluation).
/// - Attaches line numbers and detailed messages for context.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, dispatch, evaluation and the
/// builtins to provide a complete runtime for gust programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator and value
///   types.
/// - Provides the `Program` type programs are compiled into.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Convert between `f64`, `i64` and `usize` without panicking.
pub mod util;

/// Compiles source text into a reusable program.
///
/// # Errors
/// Returns an error if the source does not tokenize, parse, or contains an
/// invalid pattern literal.
///
/// # Examples
/// ```
/// use gust::{compile, interpreter::value::core::Value};
///
/// let program = compile("square ⇒ _ * _; $ | square").unwrap();
/// let mut output = Vec::new();
/// let result = program.call_with_output(&[Value::Number(7.0)], &mut output).unwrap();
/// assert_eq!(result, vec![Value::Number(49.0)]);
///
/// assert!(compile("(1, 2").is_err());
/// ```
pub fn compile(source: &str) -> ParseResult<Program> {
    Program::compile(source)
}

/// Compiles and runs source text once, writing output to standard output.
///
/// # Errors
/// Returns an error if compilation or evaluation fails.
///
/// # Examples
/// ```
/// use gust::{interpreter::value::core::Value, run};
///
/// assert_eq!(run("1 + 2", &[]).unwrap(), vec![Value::Number(3.0)]);
///
/// // 'missing' is neither a variable nor a builtin.
/// assert!(run("missing(1)", &[]).is_err());
/// ```
pub fn run(source: &str, args: &[Value]) -> Result<Vec<Value>, Error> {
    let program = compile(source)?;
    Ok(program.call(args)?)
}
