use std::{rc::Rc, slice};

use tracing::trace;

use crate::{
    ast::{NodeId, PipeKind},
    interpreter::{
        evaluator::core::{Compiler, Eval, EvalResult, State, eval, first_is_truthy},
        parser::core::ParseResult,
        value::core::Value,
    },
};

impl Compiler<'_> {
    /// Compiles `from | to`, `from ≻ to` or `from ≺ to`.
    pub(super) fn compile_pipe(&self, kind: PipeKind, from: NodeId, to: NodeId) -> ParseResult<Eval> {
        let from = self.compile(from)?;
        let to = self.compile(to)?;

        Ok(match kind {
            PipeKind::Sequential => eval(move |state, args| {
                let values = from(state, args)?;
                to(state, &values)
            }),
            PipeKind::Flatten => eval(move |state, args| {
                let values = flatten(from(state, args)?);
                to(state, &values)
            }),
            PipeKind::Expand => eval(move |state, args| {
                let values = from(state, args)?;
                if let [Value::Array(elements)] = values.as_slice() {
                    let results = expand(state, &to, elements)?;
                    return Ok(vec![Value::from(results)]);
                }
                expand(state, &to, &values)
            }),
        })
    }

    /// Compiles `condition ⮔ body`: while the condition's first value is
    /// truthy, the body's result replaces the arguments. The final arguments
    /// are the result.
    pub(super) fn compile_loop(&self, condition: NodeId, body: NodeId) -> ParseResult<Eval> {
        let condition = self.compile(condition)?;
        let body = self.compile(body)?;

        Ok(eval(move |state, args| {
            let mut args = args.to_vec();
            while first_is_truthy(&condition(state, &args)?) {
                args = body(state, &args)?;
            }
            Ok(args)
        }))
    }
}

/// Splices every array one level into the vector.
fn flatten(values: Vec<Value>) -> Vec<Value> {
    values.into_iter()
          .flat_map(|value| match value {
              Value::Array(elements) => Rc::unwrap_or_clone(elements),
              other => vec![other],
          })
          .collect()
}

/// Calls `to` once per element with the element's index pushed onto the loop
/// index stack.
///
/// An array element is spread into the argument vector. Each result is
/// packed into a single value.
fn expand(state: &mut State<'_>, to: &Eval, elements: &[Value]) -> EvalResult<Vec<Value>> {
    let mut results = Vec::with_capacity(elements.len());

    for (index, element) in elements.iter().enumerate() {
        trace!(index, depth = state.loop_indices.len(), "expand iteration");

        state.loop_indices.push(index);
        let result = match element {
            Value::Array(items) => to(state, items.as_slice()),
            other => to(state, slice::from_ref(other)),
        };
        state.loop_indices.pop();

        results.push(Value::collapse(result?));
    }

    Ok(results)
}
