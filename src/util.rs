/// Numeric conversion helpers.
///
/// The language has a single number type, `f64`. This module collects the
/// conversions between it and the integer types that bitwise operators,
/// string repetition and slicing need, so every builtin truncates, saturates
/// and rejects values the same way.
pub mod num;
