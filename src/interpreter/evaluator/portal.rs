use tracing::trace;

use crate::{
    ast::{NodeId, PortalKey},
    interpreter::{
        evaluator::core::{Compiler, Eval, EvalResult, State, eval},
        parser::core::ParseResult,
        value::core::Value,
    },
};

/// What a portal stage does with its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// `⇥`: appends the values and passes them through.
    Push,
    /// `⟼`: removes every queued value and yields them.
    Drain,
    /// `↦`: yields a copy of the queued values, leaving the queue intact.
    Peek,
}

/// A portal key after compilation.
enum Key {
    Static(String),
    Dynamic(Eval),
}

impl Key {
    /// Computes the queue name. A dynamic key joins the display forms of its
    /// values with `,`.
    fn resolve(&self, state: &mut State<'_>, args: &[Value]) -> EvalResult<String> {
        match self {
            Self::Static(name) => Ok(name.clone()),
            Self::Dynamic(key) => Ok(key(state, args)?.iter()
                                                      .map(ToString::to_string)
                                                      .collect::<Vec<_>>()
                                                      .join(",")),
        }
    }
}

impl Compiler<'_> {
    /// Compiles one portal stage.
    ///
    /// The source, or the incoming arguments when there is none, is always
    /// evaluated first. The key is computed from the incoming arguments.
    pub(super) fn compile_portal(&self, stage: Stage, source: Option<NodeId>, key: &PortalKey) -> ParseResult<Eval> {
        let source = source.map(|id| self.compile(id)).transpose()?;
        let key = match key {
            PortalKey::Static(name) => Key::Static(name.clone()),
            PortalKey::Dynamic(id) => Key::Dynamic(self.compile(*id)?),
        };

        Ok(eval(move |state, args| {
            let values = match &source {
                Some(source) => source(state, args)?,
                None => args.to_vec(),
            };
            let key = key.resolve(state, args)?;

            match stage {
                Stage::Push => {
                    trace!(key = %key, count = values.len(), "portal push");
                    state.portals.entry(key).or_default().extend(values.iter().cloned());
                    Ok(values)
                },
                Stage::Drain => {
                    let drained: Vec<Value> = state.portals.remove(&key).map(Vec::from).unwrap_or_default();
                    trace!(key = %key, count = drained.len(), "portal drain");
                    Ok(drained)
                },
                Stage::Peek => {
                    let queued: Vec<Value> = state.portals
                                                  .get(&key)
                                                  .map(|queue| queue.iter().cloned().collect())
                                                  .unwrap_or_default();
                    trace!(key = %key, count = queued.len(), "portal peek");
                    Ok(queued)
                },
            }
        }))
    }
}
