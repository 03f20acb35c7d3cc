use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
/// Represents all errors that can occur while lexing, parsing or compiling.
pub enum ParseError {
    /// No token rule accepts the input at this position.
    #[error("Error on line {line}: Unrecognized input '{text}' at offset {offset}.")]
    UnrecognizedInput {
        /// The offending slice of source text.
        text:   String,
        /// Byte offset of the slice in the source.
        offset: usize,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A construct was required but a different token was found.
    #[error("Error on line {line}: Expected {expected}, found '{found}'.")]
    Expected {
        /// Human readable name of the missing construct.
        expected: &'static str,
        /// The token that was found instead.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The token stream ended while a construct was still open.
    #[error("Error on line {line}: Unexpected end of input, expected {expected}.")]
    UnexpectedEndOfInput {
        /// Human readable name of the missing construct.
        expected: &'static str,
        /// The last line of the source.
        line:     usize,
    },
    /// A statement was complete but more tokens followed it.
    #[error("Error on line {line}: Unexpected trailing token '{token}'.")]
    TrailingInput {
        /// The extra token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A pattern literal is not a valid regular expression.
    #[error("Error on line {line}: Invalid pattern {{{pattern}}}: {details}")]
    InvalidPattern {
        /// Pattern text between the braces.
        pattern: String,
        /// Message reported by the regular expression engine.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A pattern literal carries a flag letter that has no meaning.
    #[error("Error on line {line}: Unknown pattern flag '{flag}'.")]
    UnknownPatternFlag {
        /// The flag letter.
        flag: char,
        /// The source line where the error occurred.
        line: usize,
    },
}
