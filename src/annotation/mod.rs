//! Annotation resolver: turn raw annotations into a base type plus extras.
//!
//! A raw annotation is either already a [`TypeExpr`] or deferred text that
//! must be evaluated in the owning callable's [`Namespace`].

pub mod eval;
pub mod lexer;
pub mod namespace;

pub use namespace::{Namespace, Symbol};

use crate::descriptor::Metadata;
use crate::error::Result;
use crate::types::TypeExpr;

/// A parameter or return annotation as declared.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// A textual forward reference, evaluated lazily.
    Unresolved(String),
    /// A concrete type, possibly an `Annotated` envelope.
    Resolved(TypeExpr),
}

impl Annotation {
    /// A deferred annotation from source text.
    pub fn text(text: impl Into<String>) -> Self {
        Annotation::Unresolved(text.into())
    }
}

impl From<TypeExpr> for Annotation {
    fn from(t: TypeExpr) -> Self {
        Annotation::Resolved(t)
    }
}

/// Result of resolving one annotation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolved {
    /// `None` when no annotation was declared.
    pub base: Option<TypeExpr>,
    /// Envelope extras in declaration order.
    pub extras: Vec<Metadata>,
}

/// Resolve `annotation` in `namespace`.
///
/// Absent annotations resolve to no base and no extras. Text that names
/// something missing from the namespace fails with
/// [`DocError::UnresolvedName`](crate::DocError::UnresolvedName).
pub fn resolve(annotation: Option<&Annotation>, namespace: &Namespace) -> Result<Resolved> {
    match annotation {
        None => Ok(Resolved::default()),
        Some(Annotation::Resolved(t)) => Ok(resolve_type(t)),
        Some(Annotation::Unresolved(text)) => {
            let t = eval::evaluate(text, namespace)?;
            tracing::trace!(annotation = %text, resolved = %t, "resolved textual annotation");
            Ok(resolve_type(&t))
        }
    }
}

/// Resolve a type that is already concrete, e.g. one element of a tuple.
pub fn resolve_type(t: &TypeExpr) -> Resolved {
    let (base, extras) = t.split_annotated();
    Resolved {
        base: Some(base.clone()),
        extras: extras.to_vec(),
    }
}
