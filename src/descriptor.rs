//! Documentation descriptors carried inside annotation envelopes.
//!
//! A `ParamDoc` documents one parameter, a `ReturnDoc` one return value.
//! Both are immutable once built; the builder methods consume and return
//! `self`, so a finished descriptor cannot be changed in place.

use crate::types::Literal;
use serde::Serialize;
use std::fmt;

/// Documentation attached to a parameter annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParamDoc {
    description: Option<String>,
    default_display: Option<String>,
    type_display: Option<String>,
}

impl ParamDoc {
    /// Descriptor with a description and no overrides.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Override the rendered default value (shown verbatim, not repr'd).
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default_display = Some(default.into());
        self
    }

    /// Override the rendered type.
    pub fn with_type_hint(mut self, type_hint: impl Into<String>) -> Self {
        self.type_display = Some(type_hint.into());
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn default_display(&self) -> Option<&str> {
        self.default_display.as_deref()
    }

    pub fn type_display(&self) -> Option<&str> {
        self.type_display.as_deref()
    }
}

/// Documentation attached to a return annotation or a return-tuple element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReturnDoc {
    description: Option<String>,
    type_display: Option<String>,
}

impl ReturnDoc {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            type_display: None,
        }
    }

    /// Override the rendered type.
    pub fn with_type_hint(mut self, type_hint: impl Into<String>) -> Self {
        self.type_display = Some(type_hint.into());
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn type_display(&self) -> Option<&str> {
        self.type_display.as_deref()
    }
}

/// One extra value attached to a type inside an `Annotated` envelope.
///
/// Anything that is not a descriptor is kept as `Other` so that metadata
/// belonging to unrelated tooling survives resolution untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Metadata {
    Param(ParamDoc),
    Return(ReturnDoc),
    Other(Literal),
}

impl From<ParamDoc> for Metadata {
    fn from(doc: ParamDoc) -> Self {
        Metadata::Param(doc)
    }
}

impl From<ReturnDoc> for Metadata {
    fn from(doc: ReturnDoc) -> Self {
        Metadata::Return(doc)
    }
}

impl From<Literal> for Metadata {
    fn from(value: Literal) -> Self {
        Metadata::Other(value)
    }
}

impl From<&str> for Metadata {
    fn from(value: &str) -> Self {
        Metadata::Other(Literal::Str(value.to_string()))
    }
}

/// A descriptor type the extractor can look for among envelope extras.
pub trait Descriptor: Clone {
    /// Name used in error messages.
    const KIND: &'static str;

    fn from_metadata(metadata: &Metadata) -> Option<&Self>;
}

impl Descriptor for ParamDoc {
    const KIND: &'static str = "ParamDoc";

    fn from_metadata(metadata: &Metadata) -> Option<&Self> {
        match metadata {
            Metadata::Param(doc) => Some(doc),
            _ => None,
        }
    }
}

impl Descriptor for ReturnDoc {
    const KIND: &'static str = "ReturnDoc";

    fn from_metadata(metadata: &Metadata) -> Option<&Self> {
        match metadata {
            Metadata::Return(doc) => Some(doc),
            _ => None,
        }
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, first: &mut bool, key: &str, value: &Option<String>) -> fmt::Result {
    if let Some(value) = value {
        if !*first {
            f.write_str(", ")?;
        }
        *first = false;
        write!(f, "{}={}", key, Literal::Str(value.clone()))?;
    }
    Ok(())
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        match self {
            Metadata::Param(doc) => {
                f.write_str("ParamDoc(")?;
                write_field(f, &mut first, "description", &doc.description)?;
                write_field(f, &mut first, "default", &doc.default_display)?;
                write_field(f, &mut first, "type_hint", &doc.type_display)?;
                f.write_str(")")
            }
            Metadata::Return(doc) => {
                f.write_str("ReturnDoc(")?;
                write_field(f, &mut first, "description", &doc.description)?;
                write_field(f, &mut first, "type_hint", &doc.type_display)?;
                f.write_str(")")
            }
            Metadata::Other(value) => write!(f, "{}", value),
        }
    }
}
