use std::fmt;

use logos::Logos;
use tracing::debug;

use crate::{
    ast::PipeKind,
    error::ParseError,
    interpreter::parser::{binary::is_ladder_operator, core::ParseResult},
};

/// A pattern literal as written, before it is compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternLiteral {
    /// Expression between the braces, with `\}` already decoded.
    pub source: String,
    /// Flag letters following the closing brace.
    pub flags:  String,
}

/// Represents a lexical token in the source input.
///
/// Whitespace and both comment forms are matched and skipped. Everything that
/// is not a dedicated token, a literal or a bracket is an identifier: either a
/// run of ASCII letters or a single symbol, which is how operators like `+`,
/// `≤` or `…` reach the parser.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Whitespace, including newlines.
    #[regex(r"\s+", |lex| {
        lex.extras.line += count_newlines(lex.slice());
        logos::Skip
    })]
    Whitespace,
    /// `# comments` up to the end of the line.
    #[regex(r"#([^\[\n][^\n]*)?", logos::skip, allow_greedy = true)]
    Comment,
    /// ```text
    /// #[ block
    ///    comments ]#
    /// ```
    #[regex(r"#\[([^\]]|\]+[^\]#])*\]+#", |lex| {
        lex.extras.line += count_newlines(lex.slice());
        logos::Skip
    })]
    BlockComment,
    /// `;`, swallowing any run of further breaks and whitespace.
    #[regex(r";[\s;]*", |lex| {
        lex.extras.line += count_newlines(lex.slice());
        Token::Break
    })]
    Break,
    /// `|`, `≻` or `≺`
    #[token("|", |_| PipeKind::Sequential)]
    #[token("≻", |_| PipeKind::Flatten)]
    #[token("≺", |_| PipeKind::Expand)]
    Pipe(PipeKind),
    /// `⇥`
    #[token("⇥")]
    PortalIn,
    /// `⟼`
    #[token("⟼")]
    PortalOut,
    /// `↦`
    #[token("↦")]
    PortalThrough,
    /// `⇒`
    #[token("⇒")]
    Define,
    /// `⮔`
    #[token("⮔")]
    Loop,
    /// `≔`
    #[token("≔")]
    Assign,
    /// `λ`
    #[token("λ")]
    Lambda,
    /// `,`
    #[token(",")]
    Separator,
    /// `?`
    #[token("?")]
    Then,
    /// `:`
    #[token(":")]
    Else,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// String literals such as `'hello\n'` or `"it's"`.
    #[regex(r"'([^'\\]|\\[^\n])*'", parse_string, allow_greedy = true)]
    #[regex(r#""([^"\\]|\\[^\n])*""#, parse_string, allow_greedy = true)]
    String(String),
    /// Character literals such as `` `a ``.
    #[regex(r"`[^\n]", |lex| lex.slice().chars().nth(1))]
    Character(char),
    /// Pattern literals such as `{[0-9]+}g`.
    #[regex(r"\{([^}\\]|\\[^\n])*\}[a-zA-Z]*", parse_pattern, allow_greedy = true)]
    Pattern(PatternLiteral),
    /// Numeric literals such as `3`, `-2.5`, `.5` or `1e-3`.
    #[regex(r"[+-]?([0-9]+(\.[0-9]+)?|\.[0-9]+)([eE][+-]?[0-9]+)?", parse_number, priority = 3)]
    Number(f64),
    /// Words such as `zip`, or any single symbol such as `+` or `≈`.
    #[regex(r"[a-zA-Z]+", |lex| lex.slice().to_string(), priority = 3)]
    #[regex(r#"[^\sa-zA-Z0-9'"`{}\[\]();,#?:]"#, |lex| lex.slice().to_string(), priority = 1)]
    Identifier(String),
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// A token together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    /// The token.
    pub token:  Token,
    /// The exact source text of the token.
    pub raw:    String,
    /// Line the token starts on, counted from 1.
    pub line:   usize,
    /// Byte offset of the token in the source.
    pub offset: usize,
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Lexeme {
    /// Returns `true` if a sign directly after this lexeme is a binary
    /// operator rather than part of a number.
    fn ends_operand(&self) -> bool {
        match &self.token {
            Token::Number(_)
            | Token::String(_)
            | Token::Character(_)
            | Token::Pattern(_)
            | Token::RParen
            | Token::RBracket => true,
            Token::Identifier(name) => !is_ladder_operator(name),
            _ => false,
        }
    }
}

/// Converts source text into lexemes.
///
/// Signs glued to a number stay part of the literal only where a value is
/// expected; after an operand they are split off into their own identifier so
/// that `x-1` reads as `x - 1`.
///
/// # Errors
/// Returns `ParseError::UnrecognizedInput` with the line and byte offset of
/// the first character no token rule accepts.
///
/// # Example
/// ```
/// use gust::interpreter::lexer::{Token, tokenize};
///
/// let lexemes = tokenize("[1,-2]-3").unwrap();
/// let tokens: Vec<Token> = lexemes.into_iter().map(|l| l.token).collect();
///
/// assert_eq!(tokens,
///            vec![Token::LBracket,
///                 Token::Number(1.0),
///                 Token::Separator,
///                 Token::Number(-2.0),
///                 Token::RBracket,
///                 Token::Identifier("-".into()),
///                 Token::Number(3.0)]);
/// ```
pub fn tokenize(source: &str) -> ParseResult<Vec<Lexeme>> {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });
    let mut lexemes: Vec<Lexeme> = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let line = lexer.extras.line;
        let Ok(token) = result else {
            return Err(ParseError::UnrecognizedInput { text: lexer.slice().to_string(),
                                                       offset: span.start,
                                                       line });
        };
        let raw = lexer.slice().to_string();

        // Breaks and multi-line strings advance the line counter while they
        // are matched, so a lexeme is attributed to the line it starts on.
        let line = line - count_newlines(&raw);

        if let Token::Number(value) = token
           && raw.starts_with(['+', '-'])
           && lexemes.last().is_some_and(Lexeme::ends_operand)
        {
            let (sign, _) = raw.split_at(1);
            lexemes.push(Lexeme { token: Token::Identifier(sign.to_string()),
                                  raw: sign.to_string(),
                                  line,
                                  offset: span.start });
            lexemes.push(Lexeme { token: Token::Number(value.abs()),
                                  raw: raw[1..].to_string(),
                                  line,
                                  offset: span.start + 1 });
            continue;
        }

        lexemes.push(Lexeme { token,
                              raw,
                              line,
                              offset: span.start });
    }

    debug!(count = lexemes.len(), "tokenized source");
    Ok(lexemes)
}

fn count_newlines(text: &str) -> usize {
    text.chars().filter(|&c| c == '\n').count()
}

/// Parses a numeric literal from the current token slice.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Decodes a quoted string literal, counting any newlines it spans.
fn parse_string(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    lex.extras.line += count_newlines(slice);
    decode_escapes(&slice[1..slice.len() - 1])
}

/// Splits a pattern literal into its source and flags.
///
/// Only `\}` is decoded here. Every other escape belongs to the regular
/// expression and is kept as written.
fn parse_pattern(lex: &logos::Lexer<Token>) -> PatternLiteral {
    let slice = lex.slice();
    let close = slice.rfind('}').unwrap_or(slice.len());
    let source = slice[1..close].replace("\\}", "}");
    let flags = slice[close + 1..].to_string();
    PatternLiteral { source, flags }
}

/// Decodes backslash escapes in a string literal.
///
/// `\n`, `\r`, `\t`, `\v`, `\b` and `\f` become control characters; any other
/// escaped character stands for itself.
///
/// # Example
/// ```
/// use gust::interpreter::lexer::decode_escapes;
///
/// assert_eq!(decode_escapes(r"a\tb\'c\\"), "a\tb'c\\");
/// ```
#[must_use]
pub fn decode_escapes(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some('r') => decoded.push('\r'),
            Some('t') => decoded.push('\t'),
            Some('v') => decoded.push('\u{0B}'),
            Some('b') => decoded.push('\u{08}'),
            Some('f') => decoded.push('\u{0C}'),
            Some(other) => decoded.push(other),
            None => decoded.push('\\'),
        }
    }
    decoded
}
