use crate::{
    ast::{Literal, Node, NodeId},
    interpreter::{
        lexer::{Lexeme, Token},
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a lambda.
    ///
    /// `λ` is a prefix marker that turns the expression after it into a
    /// function value. Markers nest, so `λ λ x` is a function returning a
    /// function.
    ///
    /// Grammar: `lambda := "λ" lambda | conditional`
    pub(super) fn parse_lambda(&mut self) -> ParseResult<NodeId> {
        if self.eat(&Token::Lambda) {
            let body = self.parse_lambda()?;
            return Ok(self.push(Node::Lambda { body }));
        }
        self.parse_conditional()
    }

    /// Parses a call or a literal.
    ///
    /// An identifier directly followed by a list passes the list's values as
    /// arguments; a bare identifier is a call without arguments.
    ///
    /// Grammar: `call := identifier list? | literal`
    pub(super) fn parse_call(&mut self) -> ParseResult<NodeId> {
        let Some(Lexeme { token: Token::Identifier(name),
                          line,
                          .. }) = self.current()
        else {
            return self.parse_literal();
        };
        self.advance();

        let arguments = if self.peek() == Some(&Token::LParen) {
            Some(self.parse_literal()?)
        } else {
            None
        };

        Ok(self.push(Node::Call { name: name.clone(),
                                  arguments,
                                  line: *line }))
    }

    /// Parses a literal.
    ///
    /// Grammar:
    /// ```text
    ///     literal := string | character | number | pattern | list | array
    ///     list    := "(" (pipe ("," pipe)*)? ")"
    ///     array   := "[" (pipe ("," pipe)*)? "]"
    /// ```
    ///
    /// # Errors
    /// Returns `ParseError::Expected` or `ParseError::UnexpectedEndOfInput`
    /// if no literal starts at the current token.
    pub(super) fn parse_literal(&mut self) -> ParseResult<NodeId> {
        let Some(lexeme) = self.current() else {
            return Err(self.error_expected("an expression"));
        };

        let literal = match &lexeme.token {
            Token::String(text) => Literal::String(text.clone()),
            Token::Character(c) => Literal::Character(*c),
            Token::Number(n) => Literal::Number(*n),
            Token::Pattern(pattern) => Literal::Pattern { source: pattern.source.clone(),
                                                          flags:  pattern.flags.clone(),
                                                          line:   lexeme.line, },
            Token::LParen => {
                self.advance();
                let items = self.parse_comma_separated(&Token::RParen, "',' or ')'")?;
                return Ok(self.push(Node::List { items }));
            },
            Token::LBracket => {
                self.advance();
                let items = self.parse_comma_separated(&Token::RBracket, "',' or ']'")?;
                return Ok(self.push(Node::Array { items }));
            },
            _ => return Err(self.error_expected("an expression")),
        };

        self.advance();
        Ok(self.push(Node::Literal(literal)))
    }

    /// Parses comma-separated pipes up to and including `closing`.
    ///
    /// An immediately encountered closing token produces an empty list.
    fn parse_comma_separated(&mut self, closing: &Token, expected: &'static str) -> ParseResult<Vec<NodeId>> {
        let mut items = Vec::new();
        if self.eat(closing) {
            return Ok(items);
        }

        loop {
            items.push(self.parse_pipe()?);
            if self.eat(&Token::Separator) {
                continue;
            }
            self.expect(closing, expected)?;
            return Ok(items);
        }
    }
}
