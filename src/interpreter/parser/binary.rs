use crate::{
    ast::{Node, NodeId},
    interpreter::{
        lexer::{Lexeme, Token},
        parser::core::{ParseResult, Parser},
    },
};

/// The fixed operator levels, loosest first.
///
/// Every level is left-associative. Identifiers not listed here act as infix
/// operators one level tighter than the last entry.
pub const LADDER: [&[&str]; 12] = [&["∨"],
                                   &["⊻"],
                                   &["∧"],
                                   &["‖"],
                                   &["^"],
                                   &["&"],
                                   &["=", "≈", "≠", "≉"],
                                   &[">", "<", "≥", "≤"],
                                   &["«", "»"],
                                   &["+", "-"],
                                   &["*", "/", "%"],
                                   &["↑", "e", "E"]];

/// Returns `true` if `name` is claimed by a level of the [`LADDER`].
///
/// # Example
/// ```
/// use gust::interpreter::parser::binary::is_ladder_operator;
///
/// assert!(is_ladder_operator("+"));
/// assert!(is_ladder_operator("e"));
/// assert!(!is_ladder_operator("zip"));
/// assert!(!is_ladder_operator("~"));
/// ```
#[must_use]
pub fn is_ladder_operator(name: &str) -> bool {
    LADDER.iter().any(|level| level.contains(&name))
}

/// Returns `true` if `token` can begin an operand, which decides whether a
/// conditional has a then-branch.
const fn starts_operand(token: &Token) -> bool {
    matches!(token,
             Token::Identifier(_)
             | Token::String(_)
             | Token::Character(_)
             | Token::Pattern(_)
             | Token::Number(_)
             | Token::LParen
             | Token::LBracket)
}

impl Parser<'_> {
    /// Parses a conditional.
    ///
    /// Both branches are optional; a missing branch evaluates to `null`.
    /// Nested conditionals associate to the right.
    ///
    /// Grammar: `conditional := ladder ("?" conditional? (":" conditional)?)?`
    pub(super) fn parse_conditional(&mut self) -> ParseResult<NodeId> {
        let condition = self.parse_level(0)?;

        if !self.eat(&Token::Then) {
            return Ok(condition);
        }

        let then_branch = match self.peek() {
            Some(token) if starts_operand(token) => Some(self.parse_conditional()?),
            _ => None,
        };
        let else_branch = if self.eat(&Token::Else) {
            Some(self.parse_conditional()?)
        } else {
            None
        };

        Ok(self.push(Node::Conditional { condition,
                                         then_branch,
                                         else_branch }))
    }

    /// Parses one level of the [`LADDER`], or the open level below the last
    /// one.
    ///
    /// Grammar: `ladder[k] := ladder[k+1] (op[k] ladder[k+1])*`
    fn parse_level(&mut self, level: usize) -> ParseResult<NodeId> {
        let Some(operators) = LADDER.get(level) else {
            return self.parse_open();
        };

        let mut left = self.parse_level(level + 1)?;

        while let Some(Lexeme { token: Token::Identifier(name),
                                line,
                                .. }) = self.current()
              && operators.contains(&name.as_str())
        {
            self.advance();
            let right = self.parse_level(level + 1)?;
            left = self.push(Node::Operator { name: name.clone(),
                                              left,
                                              right,
                                              line: *line });
        }

        Ok(left)
    }

    /// Parses user-defined infix operators: any identifier that is not on the
    /// ladder, so `a zip b` calls `zip` with both sides.
    ///
    /// Grammar: `open := call (identifier call)*`
    fn parse_open(&mut self) -> ParseResult<NodeId> {
        let mut left = self.parse_call()?;

        while let Some(Lexeme { token: Token::Identifier(name),
                                line,
                                .. }) = self.current()
              && !is_ladder_operator(name)
        {
            self.advance();
            let right = self.parse_call()?;
            left = self.push(Node::Operator { name: name.clone(),
                                              left,
                                              right,
                                              line: *line });
        }

        Ok(left)
    }
}
