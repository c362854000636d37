use std::borrow::Cow;

/// Everything that can go wrong while reading or writing an interval field.
#[derive(Debug, thiserror::Error, derive_more::IsVariant)]
pub enum Error {
    /// The value could not be interpreted as an instant.
    #[error("`{input}` is not a recognizable timestamp")]
    Conversion {
        input: String,

        #[source]
        source: chrono::ParseError,
    },

    /// Whole-value assignment of a shape that is not an interval.
    #[error("cannot assign {shape} to an interval field")]
    Type { shape: Cow<'static, str> },

    /// No configured field generates an accessor with this name.
    #[error("unknown interval accessor `{name}`")]
    UnknownAccessor { name: String },

    /// Malformed range literal.
    #[error("`{input}` is not a valid range literal: {reason}")]
    Literal { input: String, reason: &'static str },
}

impl Error {
    pub(crate) fn type_error(shape: impl Into<Cow<'static, str>>) -> Self {
        Self::Type { shape: shape.into() }
    }

    pub(crate) fn literal(input: &str, reason: &'static str) -> Self {
        Self::Literal { input: input.to_owned(), reason }
    }
}
