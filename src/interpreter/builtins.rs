/// The builtin registry and the three calling-convention adapters.
///
/// Declares the `Builtin` trait with its operand (call) and operator (infix)
/// forms, the adapters that derive both forms from an overload table or from
/// a pair of plain functions, and the `Builtins` registry every evaluation
/// state starts from.
pub mod core;
/// `+ - * / % ↑ e E`: arithmetic, including the string-aware overloads.
pub mod arithmetic;
/// `= ≠ ≈ ≉ < > ≤ ≥`: equality and ordering.
pub mod comparison;
/// `∨ ∧ ⊻`, the bitwise operators `& ‖ ^` and the shifts `« »`.
pub mod logic;
/// `∪ ∩ ∖`: set operations over arrays.
pub mod set;
/// `_ ‹ › ~ ℓ i $` and the constants: shaping and reading value vectors.
pub mod sequence;
/// `…` and `.`: output sinks.
pub mod io;
