use tracing::debug;

use crate::{
    ast::{Ast, Node, NodeId},
    error::ParseError,
    interpreter::lexer::{Lexeme, Token},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full program.
///
/// This is the entry point for parsing. The result always ends with a
/// `Node::Program` root, which is empty for a source without statements.
///
/// # Errors
/// Returns the first syntax error encountered.
///
/// # Example
/// ```
/// use gust::{
///     ast::Node,
///     interpreter::{lexer::tokenize, parser::core::parse},
/// };
///
/// let ast = parse(&tokenize("x ≔ 2; x * 3").unwrap()).unwrap();
/// let root = ast.root().unwrap();
///
/// assert!(matches!(ast.get(root), Node::Program { statements } if statements.len() == 2));
/// ```
pub fn parse(lexemes: &[Lexeme]) -> ParseResult<Ast> {
    let mut parser = Parser::new(lexemes);
    parser.parse_program()?;
    debug!(nodes = parser.ast.len(), "parsed program");
    Ok(parser.ast)
}

/// A cursor over the lexemes of one program, building its syntax tree.
///
/// The grammar levels are spread over the sibling modules, each adding its
/// own `impl Parser` block.
pub(super) struct Parser<'t> {
    lexemes:        &'t [Lexeme],
    position:       usize,
    pub(super) ast: Ast,
}

impl<'t> Parser<'t> {
    /// Creates a parser positioned at the first lexeme.
    pub(super) const fn new(lexemes: &'t [Lexeme]) -> Self {
        Self { lexemes,
               position: 0,
               ast: Ast::new() }
    }

    /// Returns the current lexeme without consuming it.
    pub(super) fn current(&self) -> Option<&'t Lexeme> {
        self.lexemes.get(self.position)
    }

    /// Returns the current token without consuming it.
    pub(super) fn peek(&self) -> Option<&'t Token> {
        self.peek_at(0)
    }

    /// Returns the token `offset` positions ahead without consuming
    /// anything.
    pub(super) fn peek_at(&self, offset: usize) -> Option<&'t Token> {
        self.lexemes.get(self.position + offset).map(|l| &l.token)
    }

    /// Consumes and returns the current lexeme.
    pub(super) fn advance(&mut self) -> Option<&'t Lexeme> {
        let lexeme = self.lexemes.get(self.position)?;
        self.position += 1;
        Some(lexeme)
    }

    /// Consumes the current token if it equals `token`.
    pub(super) fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.position += 1;
            return true;
        }
        false
    }

    /// Consumes `token` or fails naming `expected`.
    pub(super) fn expect(&mut self, token: &Token, expected: &'static str) -> ParseResult<()> {
        if self.eat(token) {
            return Ok(());
        }
        Err(self.error_expected(expected))
    }

    /// Line of the current lexeme, or of the last one at the end of input.
    pub(super) fn line(&self) -> usize {
        self.current()
            .or_else(|| self.lexemes.last())
            .map_or(1, |l| l.line)
    }

    /// Builds the error for a missing construct at the current position.
    pub(super) fn error_expected(&self, expected: &'static str) -> ParseError {
        match self.current() {
            Some(lexeme) => ParseError::Expected { expected,
                                                   found: lexeme.raw.clone(),
                                                   line: lexeme.line },
            None => ParseError::UnexpectedEndOfInput { expected,
                                                       line: self.line() },
        }
    }

    /// Appends a node to the tree.
    pub(super) fn push(&mut self, node: Node) -> NodeId {
        self.ast.push(node)
    }
}
