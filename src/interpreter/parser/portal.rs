use crate::{
    ast::{Node, NodeId, PortalKey},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

/// Builds the node for one portal stage from its source and key.
type StageBuilder = fn(Option<NodeId>, PortalKey) -> Node;

impl Parser<'_> {
    /// Parses an optional head expression followed by portal stages.
    ///
    /// Every stage takes the previous one as its source. A chain that opens
    /// with a stage has no head and starts from the incoming arguments.
    ///
    /// Grammar:
    /// ```text
    ///     portal := (lambda | stage) stage*
    ///     stage  := ("⇥" | "⟼" | "↦") key
    /// ```
    pub(super) fn parse_portal(&mut self) -> ParseResult<NodeId> {
        let mut source = if self.peek().and_then(stage_builder).is_some() {
            None
        } else {
            Some(self.parse_lambda()?)
        };

        while let Some(build) = self.peek().and_then(stage_builder) {
            self.advance();
            let key = self.parse_portal_key()?;
            source = Some(self.push(build(source, key)));
        }

        source.ok_or_else(|| self.error_expected("an expression"))
    }

    /// Parses the key of a portal stage.
    ///
    /// Identifiers, strings, characters and numbers name a queue directly.
    /// A list or array is evaluated at run time and its values are joined
    /// into the key.
    fn parse_portal_key(&mut self) -> ParseResult<PortalKey> {
        let Some(lexeme) = self.current() else {
            return Err(self.error_expected("a portal key"));
        };

        let key = match &lexeme.token {
            Token::Identifier(name) => name.clone(),
            Token::String(text) => text.clone(),
            Token::Character(c) => c.to_string(),
            Token::Number(n) => n.to_string(),
            Token::LParen | Token::LBracket => return Ok(PortalKey::Dynamic(self.parse_literal()?)),
            _ => return Err(self.error_expected("a portal key")),
        };

        self.advance();
        Ok(PortalKey::Static(key))
    }
}

fn stage_builder(token: &Token) -> Option<StageBuilder> {
    let build: StageBuilder = match token {
        Token::PortalIn => |source, key| Node::PortalIn { source, key },
        Token::PortalOut => |source, key| Node::PortalOut { source, key },
        Token::PortalThrough => |source, key| Node::PortalThrough { source, key },
        _ => return None,
    };
    Some(build)
}
