//! Introspection boundary: what the walker needs to know about a callable.
//!
//! [`SignatureProvider`] is the read side, [`Documentable`] adds the
//! docstring write. [`Callable`] is the in-process implementation, built by
//! hand or by a binding layer that mirrors a host runtime's signatures.

use crate::annotation::{Annotation, Namespace};
use crate::types::{Literal, TypeExpr};
use serde::Serialize;

/// How a parameter binds arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    #[default]
    Normal,
    /// `*args`
    VarPositional,
    /// `**kwargs`
    VarKeyword,
}

impl ParamKind {
    /// Marker prefixed to the parameter name when rendered.
    pub fn marker(self) -> &'static str {
        match self {
            ParamKind::Normal => "",
            ParamKind::VarPositional => "*",
            ParamKind::VarKeyword => "**",
        }
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub kind: ParamKind,
    pub annotation: Option<Annotation>,
    pub default: Option<Literal>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Normal,
            annotation: None,
            default: None,
        }
    }

    pub fn kind(mut self, kind: ParamKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn annotation(mut self, annotation: impl Into<Annotation>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// Annotate with deferred source text.
    pub fn annotation_text(mut self, text: impl Into<String>) -> Self {
        self.annotation = Some(Annotation::text(text));
        self
    }

    pub fn default(mut self, value: impl Into<Literal>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Read access to a callable's signature and docstring.
pub trait SignatureProvider {
    /// Name used in log events.
    fn name(&self) -> &str;

    fn docstring(&self) -> Option<&str>;

    /// Parameters in declaration order.
    fn parameters(&self) -> &[Parameter];

    /// `None` when no return annotation was declared.
    fn return_annotation(&self) -> Option<&Annotation>;

    /// Scope for evaluating textual annotations.
    fn namespace(&self) -> &Namespace;
}

/// A callable whose docstring can be replaced.
pub trait Documentable: SignatureProvider {
    fn set_docstring(&mut self, docstring: String);
}

/// A callable described in-process.
#[derive(Debug, Clone, Default)]
pub struct Callable {
    name: String,
    docstring: Option<String>,
    parameters: Vec<Parameter>,
    returns: Option<Annotation>,
    namespace: Namespace,
}

impl Callable {
    /// Start describing a callable. Its namespace defaults to
    /// [`Namespace::standard`].
    pub fn builder(name: impl Into<String>) -> CallableBuilder {
        CallableBuilder {
            callable: Callable {
                name: name.into(),
                namespace: Namespace::standard(),
                ..Callable::default()
            },
        }
    }
}

impl SignatureProvider for Callable {
    fn name(&self) -> &str {
        &self.name
    }

    fn docstring(&self) -> Option<&str> {
        self.docstring.as_deref()
    }

    fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    fn return_annotation(&self) -> Option<&Annotation> {
        self.returns.as_ref()
    }

    fn namespace(&self) -> &Namespace {
        &self.namespace
    }
}

impl Documentable for Callable {
    fn set_docstring(&mut self, docstring: String) {
        self.docstring = Some(docstring);
    }
}

/// Builder for [`Callable`].
#[derive(Debug, Clone)]
pub struct CallableBuilder {
    callable: Callable,
}

impl CallableBuilder {
    pub fn doc(mut self, docstring: impl Into<String>) -> Self {
        self.callable.docstring = Some(docstring.into());
        self
    }

    pub fn param(mut self, parameter: Parameter) -> Self {
        self.callable.parameters.push(parameter);
        self
    }

    pub fn returns(mut self, annotation: impl Into<Annotation>) -> Self {
        self.callable.returns = Some(annotation.into());
        self
    }

    /// Declare the return annotation as deferred source text.
    pub fn returns_text(mut self, text: impl Into<String>) -> Self {
        self.callable.returns = Some(Annotation::text(text));
        self
    }

    /// Shorthand for `-> None`.
    pub fn returns_none(self) -> Self {
        self.returns(TypeExpr::NoneType)
    }

    pub fn namespace(mut self, namespace: Namespace) -> Self {
        self.callable.namespace = namespace;
        self
    }

    pub fn build(self) -> Callable {
        self.callable
    }
}
