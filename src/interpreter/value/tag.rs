use std::fmt;

/// The runtime type of a value, as seen by the dispatch engine.
///
/// Every value classifies into exactly one tag. `Function` exists so that
/// closures classify too; no overload names it, so it only matches wildcards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    /// `null`
    Null,
    /// `true` or `false`
    Boolean,
    /// Any number, including `NaN` and infinities.
    Number,
    /// Any string, including characters.
    String,
    /// Any array.
    Array,
    /// A compiled pattern.
    Pattern,
    /// A closure produced by `λ`.
    Function,
}

impl TypeTag {
    /// The lowercase name used in overload declarations and error messages.
    ///
    /// # Example
    /// ```
    /// use gust::interpreter::value::tag::TypeTag;
    ///
    /// assert_eq!(TypeTag::Boolean.name(), "boolean");
    /// assert_eq!(TypeTag::Pattern.to_string(), "pattern");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Pattern => "pattern",
            Self::Function => "function",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
