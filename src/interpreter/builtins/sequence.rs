use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, State},
        value::core::Value,
    },
    util::num::{bounded_count, f64_to_count, usize_to_f64},
};

/// Reads the last passed value as a count, or `default` when nothing was
/// passed.
fn trailing_count(passed: &mut Vec<Value>, default: usize, builtin: &'static str) -> EvalResult<usize> {
    let Some(value) = passed.pop() else {
        return Ok(default);
    };
    match value.as_number() {
        Some(n) => f64_to_count(n, builtin),
        None => Err(RuntimeError::InvalidArgument { builtin,
                                                    details: format!("expected a count, got {}", value.tag()) }),
    }
}

fn concat(piped: &[Value], passed: Vec<Value>) -> Vec<Value> {
    piped.iter().cloned().chain(passed).collect()
}

/// `_`: returns every value it receives.
#[allow(clippy::unnecessary_wraps)]
pub fn identity(_state: &mut State<'_>, piped: &[Value], passed: Vec<Value>) -> EvalResult<Vec<Value>> {
    Ok(concat(piped, passed))
}

/// `‹`: drops leading values. The count is the last passed value, `1` if
/// nothing is passed.
pub fn drop_leading(_state: &mut State<'_>, piped: &[Value], mut passed: Vec<Value>) -> EvalResult<Vec<Value>> {
    let count = trailing_count(&mut passed, 1, "‹")?;
    Ok(concat(piped, passed).into_iter().skip(count).collect())
}

/// `›`: drops trailing values. The count is the last passed value, `1` if
/// nothing is passed.
pub fn drop_trailing(_state: &mut State<'_>, piped: &[Value], mut passed: Vec<Value>) -> EvalResult<Vec<Value>> {
    let count = trailing_count(&mut passed, 1, "›")?;
    let mut values = concat(piped, passed);
    values.truncate(values.len().saturating_sub(count));
    Ok(values)
}

/// `~`: the numbers from `from` up to, not including, `to` in steps of
/// `step`.
///
/// With a single value the range starts at `0`. The step defaults to `1`, or
/// `-1` when `to` is below `from`.
pub fn range(_state: &mut State<'_>, piped: &[Value], passed: Vec<Value>) -> EvalResult<Vec<Value>> {
    let numbers = concat(piped, passed).iter()
                                       .map(|value| {
                                           value.as_number().ok_or_else(|| RuntimeError::InvalidArgument {
                                               builtin: "~",
                                               details: format!("expected a number, got {}", value.tag()),
                                           })
                                       })
                                       .collect::<EvalResult<Vec<f64>>>()?;

    let (from, to, step) = match numbers.as_slice() {
        [] => return Ok(Vec::new()),
        [to] => (0.0, *to, None),
        [from, to] => (*from, *to, None),
        [from, to, step, ..] => (*from, *to, Some(*step)),
    };
    let step = step.unwrap_or(if to < from { -1.0 } else { 1.0 });
    if step == 0.0 || step.is_nan() {
        return Err(RuntimeError::InvalidArgument { builtin: "~",
                                                   details: "the step must be a nonzero number".to_string() });
    }

    let steps = ((to - from) / step).ceil();
    if steps.is_nan() || steps <= 0.0 {
        return Ok(Vec::new());
    }
    let count = bounded_count(1, f64_to_count(steps, "~")?, "~")?;

    Ok((0..count).map(|i| Value::Number(usize_to_f64(i).mul_add(step, from)))
                 .collect())
}

/// `ℓ`: the length of every value: characters of a string, elements of an
/// array, `1` for anything else.
#[allow(clippy::unnecessary_wraps)]
pub fn lengths(_state: &mut State<'_>, piped: &[Value], passed: Vec<Value>) -> EvalResult<Vec<Value>> {
    Ok(concat(piped, passed).iter()
                            .map(|value| {
                                let length = match value {
                                    Value::String(s) => s.chars().count(),
                                    Value::Array(items) => items.len(),
                                    _ => 1,
                                };
                                Value::Number(usize_to_f64(length))
                            })
                            .collect())
}

/// `i`: the index of the innermost expand pipe, or `null` outside of one.
/// `i(k)` reads the index `k` levels further out.
pub fn loop_index(state: &mut State<'_>, _piped: &[Value], mut passed: Vec<Value>) -> EvalResult<Vec<Value>> {
    let depth = trailing_count(&mut passed, 0, "i")?;
    let index = state.loop_indices
                     .iter()
                     .rev()
                     .nth(depth)
                     .map_or(Value::Null, |&i| Value::Number(usize_to_f64(i)));
    Ok(vec![index])
}

/// `$`: the program's input. `$(k)` selects the `k`-th input value, `null`
/// if there is none.
pub fn input(state: &mut State<'_>, _piped: &[Value], mut passed: Vec<Value>) -> EvalResult<Vec<Value>> {
    if passed.is_empty() {
        return Ok(state.initial_args.clone());
    }
    let position = trailing_count(&mut passed, 0, "$")?;
    Ok(vec![state.initial_args.get(position).cloned().unwrap_or(Value::Null)])
}

/// `ε`: the empty string.
#[allow(clippy::unnecessary_wraps)]
pub fn empty_string(_state: &mut State<'_>, _piped: &[Value], _passed: Vec<Value>) -> EvalResult<Vec<Value>> {
    Ok(vec![Value::from("")])
}

/// `∅`: the empty array.
#[allow(clippy::unnecessary_wraps)]
pub fn empty_array(_state: &mut State<'_>, _piped: &[Value], _passed: Vec<Value>) -> EvalResult<Vec<Value>> {
    Ok(vec![Value::from(Vec::new())])
}

/// `true`
#[allow(clippy::unnecessary_wraps)]
pub fn true_constant(_state: &mut State<'_>, _piped: &[Value], _passed: Vec<Value>) -> EvalResult<Vec<Value>> {
    Ok(vec![Value::Boolean(true)])
}

/// `false`
#[allow(clippy::unnecessary_wraps)]
pub fn false_constant(_state: &mut State<'_>, _piped: &[Value], _passed: Vec<Value>) -> EvalResult<Vec<Value>> {
    Ok(vec![Value::Boolean(false)])
}

/// `null`
#[allow(clippy::unnecessary_wraps)]
pub fn null_constant(_state: &mut State<'_>, _piped: &[Value], _passed: Vec<Value>) -> EvalResult<Vec<Value>> {
    Ok(vec![Value::Null])
}
