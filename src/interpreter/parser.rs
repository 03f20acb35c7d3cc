/// Parser state and entry point.
///
/// Holds the `Parser` cursor over the lexemes, the `ParseResult` alias and the
/// token helpers every grammar level shares.
pub mod core;

/// Statement parsing.
///
/// Splits the program at breaks and recognizes definitions, assignments,
/// pipe chains and loops.
pub mod statement;

/// Portal chains.
///
/// Parses the push, drain and peek stages together with their static or
/// computed keys.
pub mod portal;

/// Binary operator parsing.
///
/// Implements the fixed precedence ladder, the open level for user-defined
/// infix names, and the conditional that sits on top of both.
pub mod binary;

/// Operand parsing.
///
/// Handles lambdas, calls and every literal form, including list and array
/// literals.
pub mod unary;
