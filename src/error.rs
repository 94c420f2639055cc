//! Error taxonomy for documentation passes and style registration.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DocError>;

/// Errors surfaced while documenting a callable or registering a style.
///
/// Every variant aborts the pass that produced it; a callable's docstring is
/// never partially rewritten.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DocError {
    /// More than one `ParamDoc`/`ReturnDoc` on a single annotation.
    #[error("Only a single {kind} value can be provided for {position}")]
    DuplicateDescriptor { kind: &'static str, position: String },

    /// A `ReturnDoc` on a tuple return that was decomposed into elements.
    #[error("Multiple return values were found; provide a Return instance for each separately.")]
    AmbiguousReturn,

    /// A textual annotation referenced a name missing from the namespace.
    #[error("name '{name}' is not defined (in annotation `{annotation}`)")]
    UnresolvedName { name: String, annotation: String },

    /// A textual annotation could not be parsed or evaluated.
    #[error("invalid annotation `{annotation}`: {message}")]
    InvalidAnnotation { annotation: String, message: String },

    /// The signature provider reported the same parameter name twice.
    #[error("duplicate parameter '{0}' in signature")]
    DuplicateParameter(String),

    #[error("A handler for '{0}' is already registered")]
    DuplicateStyle(String),

    #[error("Unknown style '{0}'; register a handler for it first")]
    UnknownStyle(String),
}

impl DocError {
    pub(crate) fn invalid(annotation: &str, message: impl Into<String>) -> Self {
        DocError::InvalidAnnotation {
            annotation: annotation.to_string(),
            message: message.into(),
        }
    }
}
