use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// Flag letters a pattern literal may carry.
///
/// `g` is accepted for familiarity; pattern operations always find every
/// match.
pub const PATTERN_FLAGS: &str = "imsxUg";

/// A compiled regular expression together with how it was written.
///
/// Two patterns are equal when their source and flags are equal.
#[derive(Debug, Clone)]
pub struct Pattern {
    source:   String,
    flags:    String,
    regex:    Regex,
    anchored: Regex,
}

impl Pattern {
    /// Compiles a pattern literal.
    ///
    /// # Errors
    /// - `ParseError::UnknownPatternFlag` if a flag letter is not one of
    ///   [`PATTERN_FLAGS`].
    /// - `ParseError::InvalidPattern` if the source is not a valid regular
    ///   expression.
    ///
    /// # Example
    /// ```
    /// use gust::interpreter::value::pattern::Pattern;
    ///
    /// let pattern = Pattern::compile("[a-c]+", "i", 1).unwrap();
    /// assert!(pattern.full_match("AbC"));
    /// assert!(!pattern.full_match("abcd"));
    ///
    /// assert!(Pattern::compile("a", "q", 1).is_err());
    /// assert!(Pattern::compile("(", "", 1).is_err());
    /// ```
    pub fn compile(source: &str, flags: &str, line: usize) -> ParseResult<Self> {
        if let Some(flag) = flags.chars().find(|c| !PATTERN_FLAGS.contains(*c)) {
            return Err(ParseError::UnknownPatternFlag { flag, line });
        }
        Self::build(source, flags).map_err(|e| ParseError::InvalidPattern { pattern: source.to_string(),
                                                                             details: e.to_string(),
                                                                             line })
    }

    /// Builds a pattern from flags already known to be valid.
    pub(crate) fn build(source: &str, flags: &str) -> Result<Self, regex::Error> {
        let configure = |text: &str| {
            RegexBuilder::new(text).case_insensitive(flags.contains('i'))
                                   .multi_line(flags.contains('m'))
                                   .dot_matches_new_line(flags.contains('s'))
                                   .ignore_whitespace(flags.contains('x'))
                                   .swap_greed(flags.contains('U'))
                                   .build()
        };
        let regex = configure(source)?;
        let anchored = configure(&format!(r"\A{}\z", group(source, flags)))?;

        Ok(Self { source: source.to_string(),
                  flags: flags.to_string(),
                  regex,
                  anchored })
    }

    /// Builds a pattern matching either operand, keeping the flags of both.
    pub(crate) fn alternate(&self, other: &Self) -> Result<Self, regex::Error> {
        let mut flags = self.flags.clone();
        flags.extend(other.flags.chars().filter(|c| !self.flags.contains(*c)));
        let source = format!("{}|{}", group(&self.source, &flags), group(&other.source, &flags));
        Self::build(&source, &flags)
    }

    /// The expression as written between the braces.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The flag letters as written.
    #[must_use]
    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// The compiled expression, matching anywhere in a string.
    #[must_use]
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns `true` if the whole of `text` matches.
    #[must_use]
    pub fn full_match(&self, text: &str) -> bool {
        self.anchored.is_match(text)
    }
}

/// Wraps `source` in a non-capturing group. With `x` a trailing comment
/// would swallow the closing parenthesis, so it goes on its own line.
fn group(source: &str, flags: &str) -> String {
    if flags.contains('x') {
        format!("(?:{source}\n)")
    } else {
        format!("(?:{source})")
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}{}", self.source.replace('}', "\\}"), self.flags)
    }
}
