use thiserror::Error;

/// Parsing errors.
///
/// Defines all error types that can occur while turning source text into a
/// runnable program: unrecognized input, unexpected or missing tokens and
/// malformed pattern literals.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while a compiled program runs:
/// unresolved names, missing overloads, broadcasting mismatches, rejected
/// builtin arguments and failing output sinks.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Either phase's error, as returned by [`crate::run`].
#[derive(Debug, Error)]
pub enum Error {
    /// The source did not compile.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The program failed while running.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
