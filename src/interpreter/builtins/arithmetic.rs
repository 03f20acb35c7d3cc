use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        dispatch::core::{OverloadTable, dispatch_error, overloads},
        evaluator::core::EvalResult,
        value::core::Value,
    },
    util::num::{bounded_count, f64_to_count, usize_to_f64},
};

/// Reads a number or boolean operand. Only called from entries whose key
/// guarantees one of the two.
pub(super) fn number(value: &Value) -> f64 {
    value.as_number().unwrap_or(f64::NAN)
}

/// Reads a string operand. Only called from entries whose key guarantees a
/// string.
pub(super) fn text(value: &Value) -> &str {
    value.as_str().unwrap_or_default()
}

fn strings(items: impl IntoIterator<Item = String>) -> Value {
    Value::from(items.into_iter().map(Value::from).collect::<Vec<_>>())
}

/// `+`: sums, concatenation and pattern alternation. `null` is the identity.
pub fn add() -> OverloadTable {
    overloads!("+";
        [number | boolean], [number | boolean] => |a, b| Ok(Value::Number(number(a) + number(b))),
        [string], [string | number | boolean] => |a, b| Ok(Value::from(format!("{a}{b}"))),
        [number | boolean], [string] => |a, b| Ok(Value::from(format!("{a}{b}"))),
        [pattern], [pattern] => |a, b| match (a, b) {
            (Value::Pattern(x), Value::Pattern(y)) => {
                x.alternate(y)
                 .map(|p| Value::Pattern(Rc::new(p)))
                 .map_err(|e| RuntimeError::InvalidArgument { builtin: "+",
                                                              details: e.to_string() })
            },
            _ => Err(dispatch_error("+", a, b)),
        },
        [null], [*] => |_, b| Ok(b.clone()),
        [*], [null] => |a, _| Ok(a.clone()),
    )
}

/// `-`: differences, and removal of text from strings.
///
/// A count on the right drops that many trailing characters, a count on the
/// left drops leading ones.
pub fn subtract() -> OverloadTable {
    overloads!("-";
        [number | boolean], [number | boolean] => |a, b| Ok(Value::Number(number(a) - number(b))),
        [string], [string] => |a, b| {
            let needle = text(b);
            if needle.is_empty() {
                return Ok(a.clone());
            }
            Ok(Value::from(text(a).replace(needle, "")))
        },
        [string], [number | boolean] => |a, b| {
            let count = f64_to_count(number(b), "-")?;
            let chars: Vec<char> = text(a).chars().collect();
            let keep = chars.len().saturating_sub(count);
            Ok(Value::from(chars[..keep].iter().collect::<String>()))
        },
        [number | boolean], [string] => |a, b| {
            let count = f64_to_count(number(a), "-")?;
            Ok(Value::from(text(b).chars().skip(count).collect::<String>()))
        },
        [string], [pattern] => |a, b| match b {
            Value::Pattern(p) => Ok(Value::from(p.regex().replace_all(text(a), "").into_owned())),
            _ => Err(dispatch_error("-", a, b)),
        },
        [null], [number | boolean] => |_, b| Ok(Value::Number(-number(b))),
        [null], [string] => |_, b| Ok(b.clone()),
        [*], [null] => |a, _| Ok(a.clone()),
    )
}

/// `*`: products and string repetition.
pub fn multiply() -> OverloadTable {
    overloads!("*";
        [number | boolean], [number | boolean] => |a, b| Ok(Value::Number(number(a) * number(b))),
        [string], [number | boolean] => |a, b| repeat(text(a), number(b)),
        [number | boolean], [string] => |a, b| repeat(text(b), number(a)),
        [null], [number | boolean] => |_, _| Ok(Value::Number(0.0)),
        [number | boolean], [null] => |_, _| Ok(Value::Number(0.0)),
        [null], [string] => |_, _| Ok(Value::from("")),
        [string], [null] => |_, _| Ok(Value::from("")),
    )
}

fn repeat(text: &str, times: f64) -> EvalResult<Value> {
    let times = bounded_count(text.len(), f64_to_count(times, "*")?, "*")?;
    Ok(Value::from(text.repeat(times)))
}

fn chunk_count(count: f64, builtin: &'static str) -> EvalResult<usize> {
    bounded_count(1, f64_to_count(count, builtin)?, builtin)
}

/// `/`: quotients and string splitting.
///
/// Dividing a string by a count splits it into that many nearly equal
/// chunks; dividing by a string or pattern splits at every separator.
pub fn divide() -> OverloadTable {
    overloads!("/";
        [number | boolean], [number | boolean] => |a, b| Ok(Value::Number(number(a) / number(b))),
        [string], [string] => |a, b| {
            let separator = text(b);
            if separator.is_empty() {
                return Ok(strings(text(a).chars().map(String::from)));
            }
            Ok(strings(text(a).split(separator).map(String::from)))
        },
        [string], [pattern] => |a, b| match b {
            Value::Pattern(p) => Ok(strings(p.regex().split(text(a)).map(String::from))),
            _ => Err(dispatch_error("/", a, b)),
        },
        [string], [number | boolean] => |a, b| Ok(strings(even_chunks(text(a), chunk_count(number(b), "/")?))),
        [number | boolean], [string] => |a, b| Ok(strings(even_chunks(text(b), chunk_count(number(a), "/")?))),
    )
}

/// `%`: remainders, substring positions, pattern matches and fixed-size
/// chunks.
pub fn modulo() -> OverloadTable {
    overloads!("%";
        [number | boolean], [number | boolean] => |a, b| Ok(Value::Number(number(a) % number(b))),
        [string], [string] => |a, b| {
            let positions = indices_of(text(a), text(b));
            Ok(Value::from(positions.into_iter().map(|i| Value::Number(usize_to_f64(i))).collect::<Vec<_>>()))
        },
        [string], [pattern] => |a, b| match b {
            Value::Pattern(p) => Ok(strings(p.regex().find_iter(text(a)).map(|m| m.as_str().to_string()))),
            _ => Err(dispatch_error("%", a, b)),
        },
        [string], [number | boolean] => |a, b| Ok(strings(sized_chunks(text(a), f64_to_count(number(b), "%")?))),
        [number | boolean], [string] => |a, b| Ok(strings(sized_chunks(text(b), f64_to_count(number(a), "%")?))),
    )
}

/// `↑`: exponentiation.
pub fn power() -> OverloadTable {
    overloads!("↑";
        [number | boolean], [number | boolean] => |a, b| Ok(Value::Number(number(a).powf(number(b)))),
    )
}

/// `e` and `E`: scientific scaling, `a e b` is `a · 10^b`.
pub fn scale(name: &'static str) -> OverloadTable {
    overloads!(name;
        [number | boolean], [number | boolean] => |a, b| Ok(Value::Number(number(a) * 10f64.powf(number(b)))),
    )
}

/// Splits `text` into `count` chunks whose lengths differ by at most one,
/// longer chunks first. A count of zero yields no chunks.
///
/// # Example
/// ```
/// use gust::interpreter::builtins::arithmetic::even_chunks;
///
/// assert_eq!(even_chunks("abcdefg", 3), vec!["abc", "de", "fg"]);
/// assert_eq!(even_chunks("ab", 3), vec!["a", "b", ""]);
/// assert!(even_chunks("abc", 0).is_empty());
/// ```
#[must_use]
pub fn even_chunks(text: &str, count: usize) -> Vec<String> {
    if count == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().collect();
    let (size, extra) = (chars.len() / count, chars.len() % count);
    let boundary = |i: usize| i * size + i.min(extra);

    (0..count).map(|i| chars[boundary(i)..boundary(i + 1)].iter().collect())
              .collect()
}

/// Splits `text` into chunks of `size` characters; the last may be shorter.
/// A size of zero yields no chunks.
#[must_use]
pub fn sized_chunks(text: &str, size: usize) -> Vec<String> {
    if size == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(size).map(|chunk| chunk.iter().collect()).collect()
}

/// Character positions of every occurrence of `needle` in `haystack`,
/// overlapping occurrences included.
///
/// # Example
/// ```
/// use gust::interpreter::builtins::arithmetic::indices_of;
///
/// assert_eq!(indices_of("banana", "ana"), vec![1, 3]);
/// assert!(indices_of("banana", "").is_empty());
/// ```
#[must_use]
pub fn indices_of(haystack: &str, needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }
    haystack.char_indices()
            .enumerate()
            .filter(|(_, (byte, _))| haystack[*byte..].starts_with(needle))
            .map(|(position, _)| position)
            .collect()
}

/// Shifts every character code by `offset`, leaving characters that would
/// fall outside the Unicode range unchanged.
pub(super) fn shift_chars(text: &str, offset: i64) -> Value {
    let shifted: String = text.chars()
                              .map(|c| {
                                  i64::from(u32::from(c)).checked_add(offset)
                                                         .and_then(|code| u32::try_from(code).ok())
                                                         .and_then(char::from_u32)
                                                         .unwrap_or(c)
                              })
                              .collect();
    Value::from(shifted)
}
