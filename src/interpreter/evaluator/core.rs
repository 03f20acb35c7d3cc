use std::{
    collections::{HashMap, VecDeque},
    io::{self, Write},
    rc::Rc,
};

use tracing::debug;

use crate::{
    ast::{Ast, Literal, Node, NodeId},
    error::{ParseError, RuntimeError},
    interpreter::{
        builtins::core::Builtins,
        evaluator::portal::Stage,
        lexer::tokenize,
        parser::core::{ParseResult, parse},
        value::{
            core::{Function, Value},
            pattern::Pattern,
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A compiled syntax node: maps the state and an argument vector to a result
/// vector.
pub type Eval = Rc<dyn Fn(&mut State<'_>, &[Value]) -> EvalResult<Vec<Value>>>;

/// Wraps a closure as an [`Eval`].
///
/// Going through this function gives closures their argument types, which a
/// bare `Rc::new` cannot infer.
pub fn eval<F>(f: F) -> Eval
    where F: Fn(&mut State<'_>, &[Value]) -> EvalResult<Vec<Value>> + 'static
{
    Rc::new(f)
}

/// Stores the runtime state of one program execution.
///
/// A fresh state is created for every call of a [`Program`], so variables and
/// portal queues never leak from one execution into the next.
pub struct State<'o> {
    /// Bound names. A binding whose first value is a function is callable.
    pub variables:    HashMap<String, Vec<Value>>,
    /// The builtins names fall back to.
    pub builtins:     Rc<Builtins>,
    /// Portal queues by key.
    pub portals:      HashMap<String, VecDeque<Value>>,
    /// Indices of the active expand pipes, innermost last.
    pub loop_indices: Vec<usize>,
    /// The input the program was called with.
    pub initial_args: Vec<Value>,
    /// Where the output builtins write to.
    pub output:       &'o mut dyn Write,
}

impl<'o> State<'o> {
    /// Creates the state for one execution.
    #[must_use]
    pub fn new(builtins: Rc<Builtins>, initial_args: Vec<Value>, output: &'o mut dyn Write) -> Self {
        Self { variables: HashMap::new(),
               builtins,
               portals: HashMap::new(),
               loop_indices: Vec::new(),
               initial_args,
               output }
    }
}

/// Turns the nodes of one syntax tree into closures.
///
/// The match over node kinds runs once per node at compile time; evaluating
/// the result only calls closures.
pub struct Compiler<'a> {
    ast: &'a Ast,
}

impl<'a> Compiler<'a> {
    /// Creates a compiler for `ast`.
    #[must_use]
    pub const fn new(ast: &'a Ast) -> Self {
        Self { ast }
    }

    /// Compiles the node `id` and everything below it.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidPattern` or
    /// `ParseError::UnknownPatternFlag` for a pattern literal that does not
    /// compile.
    pub fn compile(&self, id: NodeId) -> ParseResult<Eval> {
        match self.ast.get(id) {
            Node::Program { statements } => self.compile_program(statements),
            Node::Assignment { name, value, .. } => self.compile_assignment(name, *value),
            Node::Pipe { kind, from, to } => self.compile_pipe(*kind, *from, *to),
            Node::Loop { condition, body } => self.compile_loop(*condition, *body),
            Node::PortalIn { source, key } => self.compile_portal(Stage::Push, *source, key),
            Node::PortalOut { source, key } => self.compile_portal(Stage::Drain, *source, key),
            Node::PortalThrough { source, key } => self.compile_portal(Stage::Peek, *source, key),
            Node::Lambda { body } => self.compile_lambda(*body),
            Node::Conditional { condition,
                                then_branch,
                                else_branch, } => {
                self.compile_conditional(*condition, *then_branch, *else_branch)
            },
            Node::Operator { name,
                             left,
                             right,
                             line, } => self.compile_operator(name, *left, *right, *line),
            Node::Call { name,
                         arguments,
                         line, } => self.compile_call(name, *arguments, *line),
            Node::List { items } => self.compile_list(items),
            Node::Array { items } => self.compile_array(items),
            Node::Literal(literal) => Self::compile_literal(literal),
        }
    }

    /// Compiles every node in `ids`, in order.
    pub(super) fn compile_all(&self, ids: &[NodeId]) -> ParseResult<Vec<Eval>> {
        ids.iter().map(|&id| self.compile(id)).collect()
    }

    /// Every statement runs on the program input; the last one's result is
    /// the program's result.
    fn compile_program(&self, statements: &[NodeId]) -> ParseResult<Eval> {
        let statements = self.compile_all(statements)?;

        Ok(eval(move |state, args| {
            let mut result = Vec::new();
            for statement in &statements {
                result = statement(state, args)?;
            }
            Ok(result)
        }))
    }

    /// Binds `name` to the whole result vector and yields it.
    fn compile_assignment(&self, name: &str, value: NodeId) -> ParseResult<Eval> {
        let name = name.to_string();
        let value = self.compile(value)?;

        Ok(eval(move |state, args| {
            let values = value(state, args)?;
            state.variables.insert(name.clone(), values.clone());
            Ok(values)
        }))
    }

    fn compile_lambda(&self, body: NodeId) -> ParseResult<Eval> {
        let body = self.compile(body)?;
        Ok(eval(move |_, _| Ok(vec![Value::Function(Function::new(Rc::clone(&body)))])))
    }

    /// Branches on the truthiness of the condition's first value. An empty
    /// condition is falsy, a missing branch yields `null`.
    fn compile_conditional(&self,
                           condition: NodeId,
                           then_branch: Option<NodeId>,
                           else_branch: Option<NodeId>)
                           -> ParseResult<Eval> {
        let condition = self.compile(condition)?;
        let then_branch = then_branch.map(|id| self.compile(id)).transpose()?;
        let else_branch = else_branch.map(|id| self.compile(id)).transpose()?;

        Ok(eval(move |state, args| {
            let branch = if first_is_truthy(&condition(state, args)?) {
                &then_branch
            } else {
                &else_branch
            };
            match branch {
                Some(branch) => branch(state, args),
                None => Ok(vec![Value::Null]),
            }
        }))
    }

    /// Concatenates the values of every item.
    fn compile_list(&self, items: &[NodeId]) -> ParseResult<Eval> {
        let items = self.compile_all(items)?;

        Ok(eval(move |state, args| {
            let mut values = Vec::new();
            for item in &items {
                values.extend(item(state, args)?);
            }
            Ok(values)
        }))
    }

    /// Splices the values of every item into one array.
    fn compile_array(&self, items: &[NodeId]) -> ParseResult<Eval> {
        let items = self.compile_all(items)?;

        Ok(eval(move |state, args| {
            let mut elements = Vec::new();
            for item in &items {
                elements.extend(item(state, args)?);
            }
            Ok(vec![Value::from(elements)])
        }))
    }

    /// Literals are built once; patterns are compiled here, so a malformed
    /// pattern fails compilation rather than execution.
    fn compile_literal(literal: &Literal) -> ParseResult<Eval> {
        let value = match literal {
            Literal::String(text) => Value::from(text.as_str()),
            Literal::Number(n) => Value::Number(*n),
            Literal::Character(c) => Value::from(c.to_string()),
            Literal::Pattern { source, flags, line } => {
                Value::Pattern(Rc::new(Pattern::compile(source, flags, *line)?))
            },
        };
        Ok(eval(move |_, _| Ok(vec![value.clone()])))
    }
}

/// Returns `true` if a vector's first value is truthy; an empty vector is
/// falsy.
pub(super) fn first_is_truthy(values: &[Value]) -> bool {
    values.first().is_some_and(Value::is_truthy)
}

/// A compiled program, callable any number of times.
///
/// # Example
/// ```
/// use gust::interpreter::{evaluator::core::Program, value::core::Value};
///
/// let program = Program::compile("$ | * (2)").unwrap();
/// let mut output = Vec::new();
///
/// let doubled = program.call_with_output(&[Value::Number(21.0)], &mut output).unwrap();
/// assert_eq!(doubled, vec![Value::Number(42.0)]);
///
/// let again = program.call_with_output(&[Value::Number(4.0)], &mut output).unwrap();
/// assert_eq!(again, vec![Value::Number(8.0)]);
/// ```
pub struct Program {
    root:     Eval,
    builtins: Rc<Builtins>,
}

impl Program {
    /// Tokenizes, parses and compiles source text.
    ///
    /// # Errors
    /// Returns the first lexing, syntax or pattern error.
    pub fn compile(source: &str) -> ParseResult<Self> {
        let lexemes = tokenize(source)?;
        let ast = parse(&lexemes)?;
        let root = ast.root()
                      .ok_or(ParseError::UnexpectedEndOfInput { expected: "a program",
                                                                line:     1, })?;
        let root = Compiler::new(&ast).compile(root)?;
        debug!(nodes = ast.len(), "compiled program");

        Ok(Self { root,
                  builtins: Rc::new(Builtins::standard()) })
    }

    /// Runs the program on `args`, writing output to standard output.
    ///
    /// # Errors
    /// Returns the first runtime error.
    pub fn call(&self, args: &[Value]) -> EvalResult<Vec<Value>> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.call_with_output(args, &mut lock)
    }

    /// Runs the program on `args`, writing output to `output`.
    ///
    /// # Errors
    /// Returns the first runtime error, or `RuntimeError::Output` if writing
    /// fails.
    #[tracing::instrument(level = "debug", skip_all, fields(args = args.len()))]
    pub fn call_with_output(&self, args: &[Value], output: &mut dyn Write) -> EvalResult<Vec<Value>> {
        let mut state = State::new(Rc::clone(&self.builtins), args.to_vec(), output);
        let result = (self.root)(&mut state, args)?;
        state.output.flush()?;
        debug!(values = result.len(), "program finished");
        Ok(result)
    }
}
