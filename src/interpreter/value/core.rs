use std::{fmt, rc::Rc};

use crate::interpreter::{
    evaluator::core::{Eval, EvalResult, State},
    value::{pattern::Pattern, tag::TypeTag},
};

/// Represents a runtime value in the interpreter.
///
/// Values are structurally immutable: strings, arrays and patterns sit behind
/// `Rc`, so cloning a value never copies its contents and every operation
/// builds a new value instead of changing one in place.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `null`, also produced by a missing conditional branch.
    Null,
    /// A boolean value (`true` or `false`).
    Boolean(bool),
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A string of Unicode scalar values.
    String(Rc<str>),
    /// An ordered, possibly nested and heterogeneous, sequence of values.
    Array(Rc<Vec<Self>>),
    /// A compiled pattern such as `{[0-9]+}`.
    Pattern(Rc<Pattern>),
    /// A closure produced by `λ`.
    Function(Function),
}

/// A callable value.
///
/// Functions compare equal only to themselves.
#[derive(Clone)]
pub struct Function(Eval);

impl Function {
    /// Wraps a compiled closure.
    #[must_use]
    pub const fn new(body: Eval) -> Self {
        Self(body)
    }

    /// Calls the function with an argument vector.
    pub fn call(&self, state: &mut State<'_>, args: &[Value]) -> EvalResult<Vec<Value>> {
        (self.0)(state, args)
    }

    /// An identity usable as a hash key, stable while the function lives.
    #[must_use]
    pub fn address(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("λ")
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(Rc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(Rc::from(v))
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl Value {
    /// Classifies the value for dispatch.
    #[must_use]
    pub const fn tag(&self) -> TypeTag {
        match self {
            Self::Null => TypeTag::Null,
            Self::Boolean(_) => TypeTag::Boolean,
            Self::Number(_) => TypeTag::Number,
            Self::String(_) => TypeTag::String,
            Self::Array(_) => TypeTag::Array,
            Self::Pattern(_) => TypeTag::Pattern,
            Self::Function(_) => TypeTag::Function,
        }
    }

    /// Determines whether a value counts as true in conditions and loops.
    ///
    /// `null`, `false`, `0` and the empty string are falsy. Every other value
    /// is truthy, including `NaN`, empty arrays and patterns.
    ///
    /// # Example
    /// ```
    /// use gust::interpreter::value::core::Value;
    ///
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(Value::from("0").is_truthy());
    /// assert!(Value::from(Vec::new()).is_truthy());
    /// assert!(Value::Number(f64::NAN).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Boolean(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Array(_) | Self::Pattern(_) | Self::Function(_) => true,
        }
    }

    /// Reads the value as a number: booleans count as `0` or `1`.
    ///
    /// Returns `None` for every other type.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Boolean(true) => Some(1.0),
            Self::Boolean(false) => Some(0.0),
            _ => None,
        }
    }

    /// Returns the string contents, if the value is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Packs a result vector into a single value.
    ///
    /// A single value stands for itself; any other number of values becomes
    /// an array. This is how expand pipes store the result of each element.
    #[must_use]
    pub fn collapse(mut values: Vec<Self>) -> Self {
        if values.len() == 1
           && let Some(value) = values.pop()
        {
            return value;
        }
        Self::from(values)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Array(a) => {
                write!(f, "[")?;

                for (index, value) in a.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
            Self::Pattern(p) => write!(f, "{p}"),
            Self::Function(_) => write!(f, "λ"),
        }
    }
}
