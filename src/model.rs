//! Style-agnostic data model handed to renderers.

use crate::descriptor::{ParamDoc, ReturnDoc};
use crate::signature::ParamKind;
use serde::Serialize;

/// Everything a renderer needs to produce one docstring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuredDoc {
    /// The docstring exactly as found on the callable.
    pub docstring: String,
    /// Text before the first blank line of the cleaned docstring.
    pub summary: String,
    /// Remaining text after the blank line(s), if any.
    pub body: Option<String>,
    pub params: Vec<ParamEntry>,
    pub returns: Vec<ReturnEntry>,
}

impl StructuredDoc {
    /// True when there is nothing to append to the docstring.
    pub fn is_bare(&self) -> bool {
        self.params.is_empty() && self.returns.is_empty()
    }

    /// The cleaned docstring, summary and body rejoined.
    pub fn cleaned(&self) -> String {
        match self.body.as_deref() {
            Some(body) if !body.is_empty() && !self.summary.is_empty() => {
                format!("{}\n\n{}", self.summary, body)
            }
            Some(body) if !body.is_empty() => body.to_string(),
            _ => self.summary.clone(),
        }
    }
}

/// One documented parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamEntry {
    /// Name with its `*`/`**` marker already applied.
    pub name: String,
    pub kind: ParamKind,
    /// `None` when the parameter had no annotation.
    pub type_display: Option<String>,
    /// Whether the parameter declares a default value.
    pub has_default: bool,
    /// The `ParamDoc` override if given, else the declared default's repr.
    pub default_display: Option<String>,
    pub doc: Option<ParamDoc>,
}

impl ParamEntry {
    pub fn description(&self) -> Option<&str> {
        self.doc.as_ref().and_then(ParamDoc::description)
    }
}

/// One documented return value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnEntry {
    pub type_display: String,
    pub doc: Option<ReturnDoc>,
}

impl ReturnEntry {
    pub fn description(&self) -> Option<&str> {
        self.doc.as_ref().and_then(ReturnDoc::description)
    }
}
