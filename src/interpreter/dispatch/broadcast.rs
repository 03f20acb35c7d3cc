use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Applies `f` between two whole value vectors.
///
/// A single value on one side is repeated against every value on the other
/// side, equal lengths are zipped positionally, and an empty side produces an
/// empty result.
///
/// # Errors
/// Returns `RuntimeError::BroadcastLength` if both sides hold more than one
/// value and their lengths differ, and otherwise any error `f` returns.
///
/// # Example
/// ```
/// use gust::interpreter::{dispatch::broadcast::zip_vectors, value::core::Value};
///
/// let n = |x: f64| Value::Number(x);
/// let add = |a: &Value, b: &Value| Ok(n(a.as_number().unwrap() + b.as_number().unwrap()));
///
/// let spread = zip_vectors("+", &[n(10.0)], &[n(1.0), n(2.0), n(3.0)], add).unwrap();
/// assert_eq!(spread, vec![n(11.0), n(12.0), n(13.0)]);
///
/// assert!(zip_vectors("+", &[n(1.0), n(2.0)], &[n(1.0), n(2.0), n(3.0)], add).is_err());
/// assert!(zip_vectors("+", &[], &[n(1.0)], add).unwrap().is_empty());
/// ```
pub fn zip_vectors<F>(operator: &str, left: &[Value], right: &[Value], f: F) -> EvalResult<Vec<Value>>
    where F: Fn(&Value, &Value) -> EvalResult<Value>
{
    match (left, right) {
        ([], _) | (_, []) => Ok(Vec::new()),
        ([single], values) => values.iter().map(|r| f(single, r)).collect(),
        (values, [single]) => values.iter().map(|l| f(l, single)).collect(),
        _ if left.len() == right.len() => left.iter().zip(right).map(|(l, r)| f(l, r)).collect(),
        _ => Err(RuntimeError::BroadcastLength { operator: operator.to_string(),
                                                 left:     left.len(),
                                                 right:    right.len(), }),
    }
}

/// Applies `f` elementwise when either value is an array.
///
/// An array against a non-array maps over the array. Two arrays produce as
/// many results as the longer one has elements, cycling through the shorter
/// one, so `[1, 2, 3]` against `[4, 8]` pairs `1·4`, `2·8`, `3·4`. An empty
/// array on either side produces an empty array. Two non-arrays are passed
/// to `f` unchanged.
///
/// `f` is usually the caller's own dispatch, so nested arrays broadcast again
/// at the next level.
pub fn zip_values<F>(left: &Value, right: &Value, f: F) -> EvalResult<Value>
    where F: Fn(&Value, &Value) -> EvalResult<Value>
{
    let items = match (left, right) {
        (Value::Array(a), Value::Array(b)) => {
            if a.is_empty() || b.is_empty() {
                return Ok(Value::from(Vec::new()));
            }
            let length = a.len().max(b.len());
            (0..length).map(|i| f(&a[i % a.len()], &b[i % b.len()]))
                       .collect::<EvalResult<Vec<_>>>()?
        },
        (Value::Array(a), _) => a.iter().map(|l| f(l, right)).collect::<EvalResult<Vec<_>>>()?,
        (_, Value::Array(b)) => b.iter().map(|r| f(left, r)).collect::<EvalResult<Vec<_>>>()?,
        _ => return f(left, right),
    };
    Ok(Value::from(items))
}
