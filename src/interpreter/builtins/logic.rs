use crate::{
    interpreter::{
        builtins::arithmetic::{number, shift_chars, text},
        dispatch::core::{OverloadTable, overloads},
        value::core::Value,
    },
    util::num::{i64_to_f64, shift_amount, truncate_to_i64},
};

/// `∨`: the left value if it is truthy, else the right value.
pub fn or() -> OverloadTable {
    overloads!("∨";
        [*], [*] => |a, b| Ok(if a.is_truthy() { a.clone() } else { b.clone() }),
    )
}

/// `∧`: the left value if it is falsy, else the right value.
pub fn and() -> OverloadTable {
    overloads!("∧";
        [*], [*] => |a, b| Ok(if a.is_truthy() { b.clone() } else { a.clone() }),
    )
}

/// `⊻`: whichever value is truthy when exactly one is, else `false`.
pub fn xor() -> OverloadTable {
    overloads!("⊻";
        [*], [*] => |a, b| Ok(match (a.is_truthy(), b.is_truthy()) {
            (true, false) => a.clone(),
            (false, true) => b.clone(),
            _ => Value::Boolean(false),
        }),
    )
}

fn integers(a: &Value, b: &Value) -> (i64, i64) {
    (truncate_to_i64(number(a)), truncate_to_i64(number(b)))
}

/// Keeps the characters of the longer string whose position in the shorter
/// string holds the same character (`same`), or a different one.
fn compare_positions(a: &str, b: &str, same: bool) -> Value {
    let (a, b): (Vec<char>, Vec<char>) = (a.chars().collect(), b.chars().collect());
    let (longer, shorter) = if a.len() < b.len() { (b, a) } else { (a, b) };
    let kept: String = longer.iter()
                             .enumerate()
                             .filter(|(i, c)| (shorter.get(*i) == Some(*c)) == same)
                             .map(|(_, c)| c)
                             .collect();
    Value::from(kept)
}

/// `&`: bitwise and of integers; on two strings, the characters that agree
/// by position.
pub fn bitwise_and() -> OverloadTable {
    overloads!("&";
        [number | boolean], [number | boolean] => |a, b| {
            let (x, y) = integers(a, b);
            Ok(Value::Number(i64_to_f64(x & y)))
        },
        [string], [string] => |a, b| Ok(compare_positions(text(a), text(b), true)),
    )
}

/// `‖`: bitwise or of integers. `null` is the identity.
pub fn bitwise_or() -> OverloadTable {
    overloads!("‖";
        [number | boolean], [number | boolean] => |a, b| {
            let (x, y) = integers(a, b);
            Ok(Value::Number(i64_to_f64(x | y)))
        },
        [null], [*] => |_, b| Ok(b.clone()),
        [*], [null] => |a, _| Ok(a.clone()),
    )
}

/// `^`: bitwise exclusive or of integers; on two strings, the characters
/// that differ by position. `null` is the identity.
pub fn bitwise_xor() -> OverloadTable {
    overloads!("^";
        [number | boolean], [number | boolean] => |a, b| {
            let (x, y) = integers(a, b);
            Ok(Value::Number(i64_to_f64(x ^ y)))
        },
        [string], [string] => |a, b| Ok(compare_positions(text(a), text(b), false)),
        [null], [*] => |_, b| Ok(b.clone()),
        [*], [null] => |a, _| Ok(a.clone()),
    )
}

/// `«`: integer left shift; on a string and a count, every character code
/// shifted down by the count.
pub fn shift_left() -> OverloadTable {
    overloads!("«";
        [number | boolean], [number | boolean] => |a, b| {
            let (x, y) = integers(a, b);
            Ok(Value::Number(i64_to_f64(x.checked_shl(shift_amount(y)).unwrap_or(0))))
        },
        [string], [number | boolean] => |a, b| Ok(shift_chars(text(a), -truncate_to_i64(number(b)))),
        [number | boolean], [string] => |a, b| Ok(shift_chars(text(b), -truncate_to_i64(number(a)))),
        [*], [null] => |a, _| Ok(a.clone()),
    )
}

/// `»`: arithmetic right shift; on a string and a count, every character
/// code shifted up by the count.
pub fn shift_right() -> OverloadTable {
    overloads!("»";
        [number | boolean], [number | boolean] => |a, b| {
            let (x, y) = integers(a, b);
            Ok(Value::Number(i64_to_f64(x >> shift_amount(y))))
        },
        [string], [number | boolean] => |a, b| Ok(shift_chars(text(a), truncate_to_i64(number(b)))),
        [number | boolean], [string] => |a, b| Ok(shift_chars(text(b), truncate_to_i64(number(a)))),
        [*], [null] => |a, _| Ok(a.clone()),
    )
}
