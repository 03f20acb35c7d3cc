/// Core evaluation logic and state management.
///
/// Contains the evaluation state, the compiler that turns syntax nodes into
/// closures, and the reusable `Program` built from source text.
pub mod core;

/// Pipes and loops.
///
/// Compiles the sequential, flatten and expand pipes, which hand value
/// vectors from one stage to the next, and the loop built on top of them.
pub mod pipe;

/// Portal stages.
///
/// Compiles pushes onto, drains of and peeks into the named queues of the
/// evaluation state.
pub mod portal;

/// Calls and operators.
///
/// Resolves a name against the variables first and the builtins second, and
/// invokes it with the call or the operator convention.
pub mod call;
