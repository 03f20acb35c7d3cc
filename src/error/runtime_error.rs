use thiserror::Error;

use crate::interpreter::value::tag::TypeTag;

#[derive(Debug, Error)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// A call or operator names neither a variable nor a builtin.
    #[error("Error on line {line}: '{name}' is neither a variable nor a builtin.")]
    UnresolvedName {
        /// The unresolved name.
        name: String,
        /// The source line of the call or operator.
        line: usize,
    },
    /// No overload entry matches the operand types, wildcards included.
    #[error("Error: '{operator}' is not defined for ({left}, {right}).")]
    Dispatch {
        /// The builtin being applied.
        operator: String,
        /// Type of the left operand.
        left:     TypeTag,
        /// Type of the right operand.
        right:    TypeTag,
    },
    /// Two value vectors of different lengths, both longer than one, met in an
    /// operator.
    #[error("Error: Cannot broadcast '{operator}' over {left} and {right} values.")]
    BroadcastLength {
        /// The builtin being applied.
        operator: String,
        /// Length of the left vector.
        left:     usize,
        /// Length of the right vector.
        right:    usize,
    },
    /// A builtin received a value it cannot work with.
    #[error("Error: Invalid argument to '{builtin}': {details}.")]
    InvalidArgument {
        /// The builtin that rejected the argument.
        builtin: &'static str,
        /// Details about why the argument is invalid.
        details: String,
    },
    /// Writing to the output sink failed.
    #[error("Error: Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
