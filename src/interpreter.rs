/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces lexemes: tokens together
/// with their source text, line and byte offset. Operators are not dedicated
/// tokens; every symbol the lexer does not reserve becomes an identifier, so
/// builtins and user functions share one namespace.
///
/// # Responsibilities
/// - Converts the input character stream into lexemes.
/// - Decodes string escapes and splits pattern literals into source and flags.
/// - Decides whether a sign belongs to a number or is an operator.
/// - Reports unrecognized input with its line and offset.
pub mod lexer;
/// The parser module builds the syntax tree from lexemes.
///
/// The parser is recursive descent over a fixed ladder of operator levels
/// plus one open level for user-defined infix names. Nodes are stored in an
/// arena and refer to their children by index.
///
/// # Responsibilities
/// - Converts lexemes into `Node`s of an `Ast`.
/// - Validates the grammar, reporting the expected construct and the token
///   found instead.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum and function values.
/// - Classifies values into the type tags dispatch works on.
/// - Compiles and compares pattern values.
/// - Provides hashable keys for set operations.
pub mod value;
/// The dispatch module selects scalar implementations by operand type.
///
/// Every table-driven builtin is an overload table keyed by pairs of type
/// tags, with wildcard fallback and broadcasting over arrays and value
/// vectors.
pub mod dispatch;
/// The evaluator module compiles syntax trees into closures and runs them.
///
/// Every node becomes a closure from the evaluation state and an argument
/// vector to a result vector. Pipes, loops and portals compose these closures
/// into a program.
///
/// # Responsibilities
/// - Compiles nodes once, so evaluation never inspects the tree again.
/// - Holds the per-execution state: variables, portals, the loop index stack
///   and the program input.
/// - Resolves names against variables and builtins.
pub mod evaluator;
/// The builtins module implements the standard library.
///
/// Arithmetic, comparison, logic and set operators are declared as overload
/// tables; sequence builtins, constants and output sinks are written directly
/// against value vectors.
pub mod builtins;
