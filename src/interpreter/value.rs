/// The runtime value model.
///
/// Defines `Value`, the function values produced by lambdas, truthiness and
/// the display forms used by output sinks and portal keys.
pub mod core;
/// Compiled pattern values.
///
/// Wraps a compiled regular expression together with the source and flag
/// letters it was written with, so patterns can be compared, displayed and
/// combined.
pub mod pattern;
/// Hashable keys for set operations.
///
/// Numbers are `f64`, so values cannot be hashed directly; set union,
/// intersection and difference deduplicate through these keys instead.
pub mod set_key;
/// Type tags used by the dispatch engine.
pub mod tag;
