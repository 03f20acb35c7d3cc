use std::{collections::HashMap, rc::Rc};

use crate::interpreter::{
    builtins::{arithmetic, comparison, io, logic, sequence, set},
    dispatch::{broadcast::zip_vectors, core::OverloadTable},
    evaluator::core::{EvalResult, State},
    value::core::Value,
};

/// A function provided by the language rather than defined in a program.
///
/// Every builtin can be used two ways. `f(x, y)` and `args | f` use the
/// operand form, which sees the piped-in vector and the explicit arguments.
/// `a f b` uses the operator form, which sees the whole left and right
/// vectors.
pub trait Builtin {
    /// Call form: `piped` is the incoming argument vector, `passed` the
    /// values of the parenthesized argument list.
    fn operand(&self, state: &mut State<'_>, piped: &[Value], passed: Vec<Value>) -> EvalResult<Vec<Value>>;

    /// Infix form: `left` and `right` are the operand vectors.
    fn operator(&self, state: &mut State<'_>, left: Vec<Value>, right: Vec<Value>) -> EvalResult<Vec<Value>>;
}

/// A builtin defined by an overload table.
///
/// The operand form folds the table left to right over all values, so
/// `+(1, 2, 3)` is `(1 + 2) + 3`; zero values give an empty vector and a
/// single value is returned unchanged. The operator form broadcasts the table
/// between the two vectors.
#[derive(Debug)]
pub struct Overloaded {
    table: OverloadTable,
}

impl Overloaded {
    /// Wraps an overload table.
    #[must_use]
    pub const fn new(table: OverloadTable) -> Self {
        Self { table }
    }
}

impl Builtin for Overloaded {
    fn operand(&self, _state: &mut State<'_>, piped: &[Value], passed: Vec<Value>) -> EvalResult<Vec<Value>> {
        let mut values = piped.iter().cloned().chain(passed);
        let Some(first) = values.next() else {
            return Ok(Vec::new());
        };
        let folded = values.try_fold(first, |acc, value| self.table.apply(&acc, &value))?;
        Ok(vec![folded])
    }

    fn operator(&self, _state: &mut State<'_>, left: Vec<Value>, right: Vec<Value>) -> EvalResult<Vec<Value>> {
        zip_vectors(self.table.name(), &left, &right, |l, r| self.table.apply(l, r))
    }
}

/// A comparison builtin.
///
/// The operand form compares every adjacent pair and combines the results
/// with `conjunction`, so `<(1, 2, 3)` holds only if `1 < 2` and `2 < 3`. The
/// operator form broadcasts without chaining.
#[derive(Debug)]
pub struct Chained {
    table:       OverloadTable,
    conjunction: OverloadTable,
}

impl Chained {
    /// Wraps a comparison table and the table combining adjacent results.
    #[must_use]
    pub const fn new(table: OverloadTable, conjunction: OverloadTable) -> Self {
        Self { table, conjunction }
    }
}

impl Builtin for Chained {
    fn operand(&self, _state: &mut State<'_>, piped: &[Value], passed: Vec<Value>) -> EvalResult<Vec<Value>> {
        let values: Vec<Value> = piped.iter().cloned().chain(passed).collect();
        if values.len() < 2 {
            return Ok(values);
        }

        let mut pairs = values.windows(2).map(|pair| self.table.apply(&pair[0], &pair[1]));
        let Some(first) = pairs.next() else {
            return Ok(Vec::new());
        };
        let combined = pairs.try_fold(first?, |acc, result| self.conjunction.apply(&acc, &result?))?;
        Ok(vec![combined])
    }

    fn operator(&self, _state: &mut State<'_>, left: Vec<Value>, right: Vec<Value>) -> EvalResult<Vec<Value>> {
        zip_vectors(self.table.name(), &left, &right, |l, r| self.table.apply(l, r))
    }
}

/// Signature of a hand-written operand form.
pub type OperandFn = fn(&mut State<'_>, &[Value], Vec<Value>) -> EvalResult<Vec<Value>>;

/// A builtin written directly against value vectors.
///
/// The operator form treats the left vector as piped values and the right
/// vector as passed values, so `a ‹ 2` reads like `a | ‹(2)`.
pub struct Native {
    operand: OperandFn,
}

impl Native {
    /// Wraps an operand form.
    #[must_use]
    pub const fn new(operand: OperandFn) -> Self {
        Self { operand }
    }
}

impl Builtin for Native {
    fn operand(&self, state: &mut State<'_>, piped: &[Value], passed: Vec<Value>) -> EvalResult<Vec<Value>> {
        (self.operand)(state, piped, passed)
    }

    fn operator(&self, state: &mut State<'_>, left: Vec<Value>, right: Vec<Value>) -> EvalResult<Vec<Value>> {
        (self.operand)(state, &left, right)
    }
}

/// Declares the standard builtins as the `standard_table` registry contents.
macro_rules! builtin_table {
    (
        $(
            $name:literal => $builtin:expr
        ),* $(,)?
    ) => {
        fn standard_table() -> HashMap<&'static str, Rc<dyn Builtin>> {
            let mut table: HashMap<&'static str, Rc<dyn Builtin>> = HashMap::new();
            $(
                table.insert($name, Rc::new($builtin));
            )*
            table
        }
    };
}

builtin_table! {
    "+" => Overloaded::new(arithmetic::add()),
    "-" => Overloaded::new(arithmetic::subtract()),
    "*" => Overloaded::new(arithmetic::multiply()),
    "/" => Overloaded::new(arithmetic::divide()),
    "%" => Overloaded::new(arithmetic::modulo()),
    "↑" => Overloaded::new(arithmetic::power()),
    "e" => Overloaded::new(arithmetic::scale("e")),
    "E" => Overloaded::new(arithmetic::scale("E")),
    "∨" => Overloaded::new(logic::or()),
    "∧" => Overloaded::new(logic::and()),
    "⊻" => Overloaded::new(logic::xor()),
    "&" => Overloaded::new(logic::bitwise_and()),
    "‖" => Overloaded::new(logic::bitwise_or()),
    "^" => Overloaded::new(logic::bitwise_xor()),
    "«" => Overloaded::new(logic::shift_left()),
    "»" => Overloaded::new(logic::shift_right()),
    "=" => Overloaded::new(comparison::equal()),
    "≠" => Overloaded::new(comparison::not_equal()),
    "≈" => Overloaded::new(comparison::approximately_equal()),
    "≉" => Overloaded::new(comparison::not_approximately_equal()),
    "<" => Chained::new(comparison::less(), logic::and()),
    ">" => Chained::new(comparison::greater(), logic::and()),
    "≤" => Chained::new(comparison::less_or_equal(), logic::and()),
    "≥" => Chained::new(comparison::greater_or_equal(), logic::and()),
    "∪" => Overloaded::new(set::union()),
    "∩" => Overloaded::new(set::intersection()),
    "∖" => Overloaded::new(set::difference()),
    "_" => Native::new(sequence::identity),
    "‹" => Native::new(sequence::drop_leading),
    "›" => Native::new(sequence::drop_trailing),
    "~" => Native::new(sequence::range),
    "ℓ" => Native::new(sequence::lengths),
    "i" => Native::new(sequence::loop_index),
    "$" => Native::new(sequence::input),
    "ε" => Native::new(sequence::empty_string),
    "∅" => Native::new(sequence::empty_array),
    "true" => Native::new(sequence::true_constant),
    "false" => Native::new(sequence::false_constant),
    "null" => Native::new(sequence::null_constant),
    "…" => Native::new(io::print_line),
    "." => Native::new(io::print_raw),
}

/// The builtins available to a program, by name.
pub struct Builtins {
    table: HashMap<&'static str, Rc<dyn Builtin>>,
}

impl Builtins {
    /// The standard library: every builtin in `builtin_table!`.
    #[must_use]
    pub fn standard() -> Self {
        Self { table: standard_table() }
    }

    /// Looks up a builtin, returning a handle that outlives the borrow of the
    /// registry so it can be called with the evaluation state.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rc<dyn Builtin>> {
        self.table.get(name).map(Rc::clone)
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Self::standard()
    }
}
