use std::rc::Rc;

use crate::{
    ast::NodeId,
    error::RuntimeError,
    interpreter::{
        builtins::core::Builtin,
        evaluator::core::{Compiler, Eval, EvalResult, State, eval},
        parser::core::ParseResult,
        value::core::{Function, Value},
    },
};

/// What a name refers to at the moment it is evaluated.
enum Callee {
    /// A variable bound to a function.
    Function(Function),
    /// A variable bound to anything else; its values are substituted.
    Constant(Vec<Value>),
    /// A builtin.
    Builtin(Rc<dyn Builtin>),
}

/// Resolves `name` against the variables first and the builtins second.
///
/// Names are resolved on every evaluation, so a function body can refer to
/// names bound after it was defined, including its own.
fn resolve(state: &State<'_>, name: &str, line: usize) -> EvalResult<Callee> {
    if let Some(values) = state.variables.get(name) {
        return Ok(match values.first() {
            Some(Value::Function(function)) => Callee::Function(function.clone()),
            _ => Callee::Constant(values.clone()),
        });
    }

    state.builtins
         .get(name)
         .map(Callee::Builtin)
         .ok_or_else(|| RuntimeError::UnresolvedName { name: name.to_string(),
                                                       line })
}

impl Compiler<'_> {
    /// Compiles `name` or `name(arguments)`.
    ///
    /// A function receives the argument list's values if one is written and
    /// the incoming arguments otherwise, so `f(x)` and `x | f` agree. A
    /// builtin receives both through its operand form.
    pub(super) fn compile_call(&self, name: &str, arguments: Option<NodeId>, line: usize) -> ParseResult<Eval> {
        let name = name.to_string();
        let arguments = arguments.map(|id| self.compile(id)).transpose()?;

        Ok(eval(move |state, args| {
            let callee = resolve(state, &name, line)?;
            let passed = arguments.as_ref()
                                  .map(|arguments| arguments(state, args))
                                  .transpose()?;

            match callee {
                Callee::Function(function) => function.call(state, passed.as_deref().unwrap_or(args)),
                Callee::Constant(values) => Ok(values),
                Callee::Builtin(builtin) => builtin.operand(state, args, passed.unwrap_or_default()),
            }
        }))
    }

    /// Compiles `left name right`.
    ///
    /// A function receives the left values followed by the right ones; a
    /// builtin receives both vectors through its operator form.
    pub(super) fn compile_operator(&self, name: &str, left: NodeId, right: NodeId, line: usize) -> ParseResult<Eval> {
        let name = name.to_string();
        let left = self.compile(left)?;
        let right = self.compile(right)?;

        Ok(eval(move |state, args| {
            let callee = resolve(state, &name, line)?;
            let left = left(state, args)?;
            let right = right(state, args)?;

            match callee {
                Callee::Function(function) => function.call(state, &[left, right].concat()),
                Callee::Constant(values) => Ok(values),
                Callee::Builtin(builtin) => builtin.operator(state, left, right),
            }
        }))
    }
}
