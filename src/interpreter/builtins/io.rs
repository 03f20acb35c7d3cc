use crate::interpreter::{
    evaluator::core::{EvalResult, State},
    value::core::Value,
};

/// `…`: writes every value separated by spaces, then a newline. Returns an
/// empty vector.
pub fn print_line(state: &mut State<'_>, piped: &[Value], passed: Vec<Value>) -> EvalResult<Vec<Value>> {
    let line = piped.iter()
                    .chain(&passed)
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
    writeln!(state.output, "{line}")?;
    Ok(Vec::new())
}

/// `.`: writes every value with nothing in between and no newline.
pub fn print_raw(state: &mut State<'_>, piped: &[Value], passed: Vec<Value>) -> EvalResult<Vec<Value>> {
    for value in piped.iter().chain(&passed) {
        write!(state.output, "{value}")?;
    }
    Ok(Vec::new())
}
