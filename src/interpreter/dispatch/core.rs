use std::{collections::HashMap, fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        dispatch::broadcast::zip_values,
        evaluator::core::EvalResult,
        value::{core::Value, tag::TypeTag},
    },
};

/// A scalar implementation: one value on each side, one value out.
pub type ScalarFn = Rc<dyn Fn(&Value, &Value) -> EvalResult<Value>>;

/// Wraps a closure as a [`ScalarFn`].
///
/// Going through this function gives closures their argument types, which a
/// bare `Rc::new` cannot infer.
pub fn scalar<F>(f: F) -> ScalarFn
    where F: Fn(&Value, &Value) -> EvalResult<Value> + 'static
{
    Rc::new(f)
}

/// Builds the error for a type pair no overload accepts.
#[must_use]
pub fn dispatch_error(operator: &str, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::Dispatch { operator: operator.to_string(),
                             left:     left.tag(),
                             right:    right.tag(), }
}

/// One side of an overload key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Matches exactly this type.
    Tag(TypeTag),
    /// `*`: matches any type, tried only after exact keys.
    Any,
}

/// The overloads of one builtin, keyed by operand types.
///
/// Union declarations such as `[number | boolean], [string]` expand into one
/// key per combination. When two declarations produce the same key the first
/// one wins, so specific entries go before general ones.
pub struct OverloadTable {
    name:      &'static str,
    entries:   HashMap<(Slot, Slot), ScalarFn>,
    vectorize: Option<ScalarFn>,
}

impl fmt::Debug for OverloadTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverloadTable")
         .field("name", &self.name)
         .field("entries", &self.entries.len())
         .field("vectorize", &self.vectorize.is_some())
         .finish()
    }
}

impl OverloadTable {
    /// Creates an empty table for the builtin `name`.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self { name,
               entries: HashMap::new(),
               vectorize: None }
    }

    /// Declares `func` for every combination of `left` and `right` slots not
    /// declared yet.
    #[must_use]
    pub fn entry(mut self, left: &[Slot], right: &[Slot], func: &ScalarFn) -> Self {
        for l in left {
            for r in right {
                self.entries.entry((*l, *r)).or_insert_with(|| Rc::clone(func));
            }
        }
        self
    }

    /// Declares the implementation used whenever an operand is an array.
    #[must_use]
    pub fn vectorize(mut self, func: ScalarFn) -> Self {
        self.vectorize = Some(func);
        self
    }

    /// The builtin name the table was declared for.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Finds the implementation for a pair of types.
    ///
    /// Keys are tried in the order `(left, right)`, `(left, *)`, `(*, right)`,
    /// `(*, *)`.
    ///
    /// # Errors
    /// Returns `RuntimeError::Dispatch` naming the builtin and both types if
    /// no key matches.
    ///
    /// # Example
    /// ```
    /// use gust::interpreter::{
    ///     dispatch::core::{OverloadTable, Slot, scalar},
    ///     value::{core::Value, tag::TypeTag},
    /// };
    ///
    /// let number = Slot::Tag(TypeTag::Number);
    /// let table = OverloadTable::new("pick")
    ///     .entry(&[number], &[number], &scalar(|_, _| Ok(Value::from("exact"))))
    ///     .entry(&[number], &[Slot::Any], &scalar(|_, _| Ok(Value::from("left"))))
    ///     .entry(&[Slot::Any], &[Slot::Any], &scalar(|_, _| Ok(Value::from("any"))));
    ///
    /// let pick = |a: Value, b: Value| table.apply(&a, &b).unwrap().to_string();
    ///
    /// assert_eq!(pick(Value::Number(1.0), Value::Number(2.0)), "exact");
    /// assert_eq!(pick(Value::Number(1.0), Value::from("x")), "left");
    /// assert_eq!(pick(Value::Null, Value::Number(2.0)), "any");
    /// ```
    pub fn lookup(&self, left: TypeTag, right: TypeTag) -> EvalResult<&ScalarFn> {
        [(Slot::Tag(left), Slot::Tag(right)),
         (Slot::Tag(left), Slot::Any),
         (Slot::Any, Slot::Tag(right)),
         (Slot::Any, Slot::Any)].iter()
                                .find_map(|key| self.entries.get(key))
                                .ok_or_else(|| RuntimeError::Dispatch { operator: self.name.to_string(),
                                                                        left,
                                                                        right })
    }

    /// Applies the builtin to two values.
    ///
    /// When either value is an array the `vectorize` entry takes over if the
    /// table has one. Otherwise, unless an exact entry exists for the pair,
    /// the operation broadcasts into the array elements and recurses.
    pub fn apply(&self, left: &Value, right: &Value) -> EvalResult<Value> {
        let (left_tag, right_tag) = (left.tag(), right.tag());

        if left_tag == TypeTag::Array || right_tag == TypeTag::Array {
            if let Some(vectorize) = &self.vectorize {
                return vectorize(left, right);
            }
            if !self.entries.contains_key(&(Slot::Tag(left_tag), Slot::Tag(right_tag))) {
                return zip_values(left, right, |l, r| self.apply(l, r));
            }
        }

        let func = self.lookup(left_tag, right_tag)?;
        func(left, right)
    }
}

/// Maps a slot written in an `overloads!` declaration to a [`Slot`].
macro_rules! slot {
    (*) => {
        $crate::interpreter::dispatch::core::Slot::Any
    };
    (null) => {
        $crate::interpreter::dispatch::core::Slot::Tag($crate::interpreter::value::tag::TypeTag::Null)
    };
    (boolean) => {
        $crate::interpreter::dispatch::core::Slot::Tag($crate::interpreter::value::tag::TypeTag::Boolean)
    };
    (number) => {
        $crate::interpreter::dispatch::core::Slot::Tag($crate::interpreter::value::tag::TypeTag::Number)
    };
    (string) => {
        $crate::interpreter::dispatch::core::Slot::Tag($crate::interpreter::value::tag::TypeTag::String)
    };
    (array) => {
        $crate::interpreter::dispatch::core::Slot::Tag($crate::interpreter::value::tag::TypeTag::Array)
    };
    (pattern) => {
        $crate::interpreter::dispatch::core::Slot::Tag($crate::interpreter::value::tag::TypeTag::Pattern)
    };
}

/// Declares an overload table.
///
/// Each line reads `[left types], [right types] => implementation`, where a
/// type list is separated by `|` and `*` is the wildcard. An optional
/// `vectorize => implementation` after the name declares the array
/// implementation.
///
/// ```ignore
/// overloads!("+";
///     [number | boolean], [number | boolean] => |a, b| ...,
///     [string], [string] => |a, b| ...,
///     [null], [*] => |_, b| Ok(b.clone()),
/// )
/// ```
macro_rules! overloads {
    (
        $name:expr $(, vectorize => $vectorize:expr)? ;
        $(
            [$($left:tt)|+], [$($right:tt)|+] => $func:expr
        ),* $(,)?
    ) => {{
        let table = $crate::interpreter::dispatch::core::OverloadTable::new($name);
        $(
            let table = table.vectorize($crate::interpreter::dispatch::core::scalar($vectorize));
        )?
        $(
            let table = table.entry(&[$($crate::interpreter::dispatch::core::slot!($left)),+],
                                    &[$($crate::interpreter::dispatch::core::slot!($right)),+],
                                    &$crate::interpreter::dispatch::core::scalar($func));
        )*
        table
    }};
}

pub(crate) use overloads;
pub(crate) use slot;
