use std::collections::HashSet;

use crate::interpreter::{
    dispatch::core::{OverloadTable, overloads},
    evaluator::core::EvalResult,
    value::{core::Value, set_key::SetKey},
};

/// The members of a set operand: an array's elements, or any other value on
/// its own.
fn members(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.as_ref().clone(),
        other => vec![other.clone()],
    }
}

/// Keeps the first occurrence of every distinct candidate for which `keep`
/// holds.
fn distinct(candidates: Vec<Value>, keep: impl Fn(&SetKey) -> bool) -> Value {
    let mut seen = HashSet::new();
    let result: Vec<Value> = candidates.into_iter()
                                       .filter(|value| {
                                           let key = SetKey::from(value);
                                           keep(&key) && seen.insert(key)
                                       })
                                       .collect();
    Value::from(result)
}

fn keys(value: &Value) -> HashSet<SetKey> {
    members(value).iter().map(SetKey::from).collect()
}

#[allow(clippy::unnecessary_wraps)]
fn union_of(a: &Value, b: &Value) -> EvalResult<Value> {
    let mut candidates = members(a);
    candidates.extend(members(b));
    Ok(distinct(candidates, |_| true))
}

#[allow(clippy::unnecessary_wraps)]
fn intersection_of(a: &Value, b: &Value) -> EvalResult<Value> {
    let right = keys(b);
    Ok(distinct(members(a), |key| right.contains(key)))
}

#[allow(clippy::unnecessary_wraps)]
fn difference_of(a: &Value, b: &Value) -> EvalResult<Value> {
    let right = keys(b);
    Ok(distinct(members(a), |key| !right.contains(key)))
}

/// `∪`: members of either side, in order of first occurrence.
pub fn union() -> OverloadTable {
    overloads!("∪", vectorize => union_of;
        [*], [*] => union_of,
    )
}

/// `∩`: distinct members of the left side that also occur on the right side.
pub fn intersection() -> OverloadTable {
    overloads!("∩", vectorize => intersection_of;
        [*], [*] => intersection_of,
    )
}

/// `∖`: distinct members of the left side that do not occur on the right
/// side.
pub fn difference() -> OverloadTable {
    overloads!("∖", vectorize => difference_of;
        [*], [*] => difference_of,
    )
}
