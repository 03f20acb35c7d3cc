use std::cmp::Ordering;

use crate::interpreter::{
    dispatch::core::{OverloadTable, overloads},
    value::core::Value,
};

/// Relative tolerance of `≈` on numbers.
pub const REL_TOLERANCE: f64 = 1e-10;

/// `=`: structural equality. Arrays are equal when their elements are, and
/// `null` only equals `null`.
pub fn equal() -> OverloadTable {
    overloads!("=", vectorize => |a, b| Ok(Value::Boolean(a == b));
        [*], [*] => |a, b| Ok(Value::Boolean(a == b)),
    )
}

/// `≠`: negated structural equality.
pub fn not_equal() -> OverloadTable {
    overloads!("≠", vectorize => |a, b| Ok(Value::Boolean(a != b));
        [*], [*] => |a, b| Ok(Value::Boolean(a != b)),
    )
}

/// `≈`: loose equality, see [`loosely_equal`].
pub fn approximately_equal() -> OverloadTable {
    overloads!("≈", vectorize => |a, b| Ok(Value::Boolean(loosely_equal(a, b)));
        [*], [*] => |a, b| Ok(Value::Boolean(loosely_equal(a, b))),
    )
}

/// `≉`: negated loose equality.
pub fn not_approximately_equal() -> OverloadTable {
    overloads!("≉", vectorize => |a, b| Ok(Value::Boolean(!loosely_equal(a, b)));
        [*], [*] => |a, b| Ok(Value::Boolean(!loosely_equal(a, b))),
    )
}

/// `<`
pub fn less() -> OverloadTable {
    relation("<", Ordering::is_lt)
}

/// `>`
pub fn greater() -> OverloadTable {
    relation(">", Ordering::is_gt)
}

/// `≤`
pub fn less_or_equal() -> OverloadTable {
    relation("≤", Ordering::is_le)
}

/// `≥`
pub fn greater_or_equal() -> OverloadTable {
    relation("≥", Ordering::is_ge)
}

/// Builds an ordering operator. Numbers and booleans compare numerically,
/// strings lexicographically, and `null` compares as `0` against numbers and
/// as `''` against strings. Numbers never compare with strings.
fn relation(name: &'static str, holds: fn(Ordering) -> bool) -> OverloadTable {
    overloads!(name;
        [number | boolean | null], [number | boolean | null] => move |a, b| {
            let ordering = numeric(a).partial_cmp(&numeric(b));
            Ok(Value::Boolean(ordering.is_some_and(holds)))
        },
        [string | null], [string | null] => move |a, b| {
            Ok(Value::Boolean(holds(textual(a).cmp(textual(b)))))
        },
    )
}

fn numeric(value: &Value) -> f64 {
    value.as_number().unwrap_or(0.0)
}

fn textual(value: &Value) -> &str {
    value.as_str().unwrap_or_default()
}

/// Loose equality.
///
/// - numbers and booleans are equal within a relative tolerance of
///   [`REL_TOLERANCE`];
/// - two strings are equal when one is an anagram of the other;
/// - a string and a pattern are equal when the pattern matches the whole
///   string;
/// - a string and a number are equal when the string parses to the number;
/// - `null` equals every falsy value and the empty array;
/// - arrays are equal when they have the same length and their elements are
///   loosely equal.
///
/// # Example
/// ```
/// use gust::interpreter::{builtins::comparison::loosely_equal, value::core::Value};
///
/// assert!(loosely_equal(&Value::from("listen"), &Value::from("silent")));
/// assert!(loosely_equal(&Value::from(" 42 "), &Value::Number(42.0)));
/// assert!(loosely_equal(&Value::Null, &Value::from("")));
/// assert!(loosely_equal(&Value::Number(0.1 + 0.2), &Value::Number(0.3)));
/// assert!(!loosely_equal(&Value::Number(1.0), &Value::Number(1.001)));
/// ```
#[must_use]
pub fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, Value::Array(items)) | (Value::Array(items), Value::Null) => items.is_empty(),
        (Value::Null, other) | (other, Value::Null) => !other.is_truthy(),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(l, r)| loosely_equal(l, r))
        },
        (Value::Array(_), _) | (_, Value::Array(_)) => false,
        (Value::String(x), Value::String(y)) => is_anagram(x, y),
        (Value::String(s), Value::Pattern(p)) | (Value::Pattern(p), Value::String(s)) => p.full_match(s),
        (Value::String(s), other) | (other, Value::String(s)) => {
            match (other.as_number(), s.trim().parse::<f64>()) {
                (Some(n), Ok(parsed)) => is_close(n, parsed),
                _ => false,
            }
        },
        _ => match (a.as_number(), b.as_number()) {
            (Some(x), Some(y)) => is_close(x, y),
            _ => a == b,
        },
    }
}

fn is_close(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= REL_TOLERANCE * a.abs().max(b.abs())
}

fn is_anagram(a: &str, b: &str) -> bool {
    let sorted = |s: &str| {
        let mut chars: Vec<char> = s.chars().collect();
        chars.sort_unstable();
        chars
    };
    sorted(a) == sorted(b)
}
