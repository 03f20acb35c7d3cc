use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::interpreter::value::core::Value;

/// A hashable stand-in for a value, used to find duplicates in set
/// operations.
///
/// Two values have equal keys exactly when they are structurally equal,
/// except that `NaN` matches `NaN` here so it deduplicates like any other
/// number.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SetKey {
    /// `null`
    Null,
    /// `true` or `false`
    Boolean(bool),
    /// A number, with a total order over `f64`.
    Number(OrderedFloat<f64>),
    /// A string.
    String(Rc<str>),
    /// An array, keyed element by element.
    Array(Vec<SetKey>),
    /// A pattern, keyed by its source and flags.
    Pattern(String, String),
    /// A function, keyed by identity.
    Function(usize),
}

impl From<&Value> for SetKey {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => Self::Null,
            Value::Boolean(b) => Self::Boolean(*b),
            // `-0` and `0` are equal numbers and must share a key.
            Value::Number(n) if *n == 0.0 => Self::Number(OrderedFloat(0.0)),
            Value::Number(n) => Self::Number(OrderedFloat(*n)),
            Value::String(s) => Self::String(Rc::clone(s)),
            Value::Array(arr) => Self::Array(arr.iter().map(Self::from).collect()),
            Value::Pattern(p) => Self::Pattern(p.source().to_string(), p.flags().to_string()),
            Value::Function(f) => Self::Function(f.address()),
        }
    }
}
