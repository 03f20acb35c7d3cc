use crate::{
    ast::{Node, NodeId},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses the whole token stream into a `Node::Program`.
    ///
    /// Grammar: `program := statement (break statement?)*`
    ///
    /// Leading, trailing and repeated breaks are allowed.
    ///
    /// # Errors
    /// Returns `ParseError::TrailingInput` if a statement is followed by
    /// anything other than a break.
    pub(super) fn parse_program(&mut self) -> ParseResult<NodeId> {
        let mut statements = Vec::new();

        loop {
            while self.eat(&Token::Break) {}
            if self.peek().is_none() {
                break;
            }

            statements.push(self.parse_statement()?);

            if let Some(lexeme) = self.current()
               && lexeme.token != Token::Break
            {
                return Err(ParseError::TrailingInput { token: lexeme.raw.clone(),
                                                       line:  lexeme.line, });
            }
        }

        Ok(self.push(Node::Program { statements }))
    }

    /// Parses a single statement.
    ///
    /// Grammar:
    /// ```text
    ///     statement  := definition | assignment | pipe
    ///     definition := identifier "⇒" pipe
    ///     assignment := identifier ("≔" | "=") pipe
    /// ```
    /// A definition is sugar for assigning a lambda. `=` only assigns after a
    /// word name such as `total`; after anything else it stays equality.
    fn parse_statement(&mut self) -> ParseResult<NodeId> {
        let Some(lexeme) = self.current() else {
            return Err(self.error_expected("a statement"));
        };
        let Token::Identifier(name) = &lexeme.token else {
            return self.parse_pipe();
        };

        let is_definition = self.peek_at(1) == Some(&Token::Define);
        let is_assignment = match self.peek_at(1) {
            Some(Token::Assign) => true,
            Some(Token::Identifier(op)) => op == "=" && is_word(name),
            _ => false,
        };
        if !is_definition && !is_assignment {
            return self.parse_pipe();
        }

        self.advance();
        self.advance();

        let mut value = self.parse_pipe()?;
        if is_definition {
            value = self.push(Node::Lambda { body: value });
        }

        Ok(self.push(Node::Assignment { name: name.clone(),
                                        value,
                                        line: lexeme.line }))
    }

    /// Parses a left-associative chain of pipes.
    ///
    /// Grammar: `pipe := loop (("|" | "≻" | "≺") loop)*`
    pub(super) fn parse_pipe(&mut self) -> ParseResult<NodeId> {
        let mut left = self.parse_loop()?;

        while let Some(Token::Pipe(kind)) = self.peek() {
            self.advance();
            let right = self.parse_loop()?;
            left = self.push(Node::Pipe { kind: *kind,
                                          from: left,
                                          to:   right, });
        }

        Ok(left)
    }

    /// Parses a loop. Nested loops associate to the right, so `a ⮔ b ⮔ c`
    /// loops `b ⮔ c` while `a` holds.
    ///
    /// Grammar: `loop := portal ("⮔" loop)?`
    fn parse_loop(&mut self) -> ParseResult<NodeId> {
        let condition = self.parse_portal()?;

        if !self.eat(&Token::Loop) {
            return Ok(condition);
        }

        let body = self.parse_loop()?;
        Ok(self.push(Node::Loop { condition, body }))
    }
}

/// Returns `true` for names made only of letters, the names `=` may assign.
fn is_word(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphabetic())
}
