/// Overload tables and type-pair lookup.
///
/// An `OverloadTable` maps pairs of type tags, or wildcards, to scalar
/// implementations. Tables are declared with the `overloads!` macro once when
/// the builtins are registered and consulted on every operator application.
pub mod core;
/// Elementwise application over value vectors and array values.
///
/// Operators broadcast twice: between the two whole value vectors they
/// receive, strictly, and inside a scalar call whenever an operand is an
/// array, cycling the shorter array.
pub mod broadcast;
