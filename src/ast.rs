/// Index of a node inside an [`Ast`] arena.
///
/// Children are referenced by index rather than owned, so the tree can be
/// shared read-only between compilations and repeated runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Arena holding every node of one parsed program.
///
/// Nodes are appended bottom-up by the parser, so a parent always has a higher
/// index than its children and the last node pushed is the program root.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Ast {
    /// Creates an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Appends a node and returns its index.
    pub fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Returns the node stored at `id`.
    ///
    /// Ids are only ever produced by [`Ast::push`] on the same arena, so the
    /// lookup cannot miss.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Returns the id of the last node pushed, which is the program root once
    /// parsing has finished.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.nodes.len().checked_sub(1).map(NodeId)
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no node has been pushed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The three ways a pipe can hand values from one stage to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeKind {
    /// `|` passes the whole value vector on.
    Sequential,
    /// `≻` splices every array one level before passing the vector on.
    Flatten,
    /// `≺` calls the next stage once per element.
    Expand,
}

/// How a portal stage names its queue.
#[derive(Debug, Clone, PartialEq)]
pub enum PortalKey {
    /// A key known at parse time, such as `⇥ total`.
    Static(String),
    /// A list or array evaluated at run time, such as `⇥ ('row', i)`.
    Dynamic(NodeId),
}

/// A constant appearing directly in source code.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A quoted string with escapes already decoded.
    String(String),
    /// A number such as `3`, `-0.5` or `1e3`.
    Number(f64),
    /// A single character written as `` `c ``.
    Character(char),
    /// A pattern literal such as `{[a-z]+}i`.
    Pattern {
        /// Regular expression source between the braces.
        source: String,
        /// Trailing flag letters.
        flags:  String,
        /// Line number in the source code.
        line:   usize,
    },
}

/// A node of the syntax tree.
///
/// Every variant compiles to a closure from the evaluation state and an
/// argument vector to a result vector.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// The root: statements separated by breaks.
    Program {
        /// Statements in source order.
        statements: Vec<NodeId>,
    },
    /// `name ≔ value`, or the desugared form of `name ⇒ body`.
    Assignment {
        /// The bound name.
        name:  String,
        /// The right-hand side.
        value: NodeId,
        /// Line number in the source code.
        line:  usize,
    },
    /// `from | to`, `from ≻ to` or `from ≺ to`.
    Pipe {
        /// Which pipe operator joins the stages.
        kind: PipeKind,
        /// The producing stage.
        from: NodeId,
        /// The consuming stage.
        to:   NodeId,
    },
    /// `condition ⮔ body`.
    Loop {
        /// Evaluated before every iteration.
        condition: NodeId,
        /// Replaces the argument vector on every iteration.
        body:      NodeId,
    },
    /// `source ⇥ key`: pushes onto a queue and passes the values through.
    PortalIn {
        /// The head expression, or `None` to use the incoming arguments.
        source: Option<NodeId>,
        /// Which queue to push onto.
        key:    PortalKey,
    },
    /// `source ⟼ key`: drains a queue.
    PortalOut {
        /// The head expression, or `None` to use the incoming arguments.
        source: Option<NodeId>,
        /// Which queue to drain.
        key:    PortalKey,
    },
    /// `source ↦ key`: copies a queue without draining it.
    PortalThrough {
        /// The head expression, or `None` to use the incoming arguments.
        source: Option<NodeId>,
        /// Which queue to read.
        key:    PortalKey,
    },
    /// `λ body`: produces a function value.
    Lambda {
        /// The function body.
        body: NodeId,
    },
    /// `condition ? then : else`.
    Conditional {
        /// Decides the branch by the truthiness of its first value.
        condition:   NodeId,
        /// Taken on a truthy condition.
        then_branch: Option<NodeId>,
        /// Taken on a falsy condition.
        else_branch: Option<NodeId>,
    },
    /// An infix application such as `a + b` or `a zip b`.
    Operator {
        /// The operator or user function name.
        name:  String,
        /// Left operand.
        left:  NodeId,
        /// Right operand.
        right: NodeId,
        /// Line number in the source code.
        line:  usize,
    },
    /// A name, optionally followed by a parenthesized argument list.
    Call {
        /// The called name.
        name:      String,
        /// The explicit argument list, if any.
        arguments: Option<NodeId>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `(a, b, c)`: splices every item's values.
    List {
        /// Items in source order.
        items: Vec<NodeId>,
    },
    /// `[a, b, c]`: wraps every item's values into one array.
    Array {
        /// Items in source order.
        items: Vec<NodeId>,
    },
    /// A constant.
    Literal(Literal),
}
