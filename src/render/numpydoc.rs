//! numpydoc renderer.
//!
//! Appends `Parameters` and `Returns` sections to the cleaned docstring:
//!
//! ```text
//! Summary.
//!
//! Parameters
//! ----------
//! a : str, default: 'x'
//!     Description.
//!
//! Returns
//! -------
//! int
//!     Description.
//! ```

use crate::docstring::{cleandoc, indent};
use crate::model::{ParamEntry, ReturnEntry, StructuredDoc};
use crate::render::Renderer;

/// Registry name of this style.
pub const NAME: &str = "numpydoc";

const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, Default)]
pub struct NumpydocRenderer;

impl Renderer for NumpydocRenderer {
    fn render(&self, doc: &StructuredDoc) -> String {
        render(doc)
    }
}

/// Render `doc` in numpydoc layout.
///
/// With no parameters and no return values the original docstring is
/// returned untouched.
pub fn render(doc: &StructuredDoc) -> String {
    if doc.is_bare() {
        return doc.docstring.clone();
    }

    let mut out = doc.cleaned();
    if !doc.params.is_empty() {
        push_section(&mut out, "Parameters", doc.params.iter().map(param_block));
    }
    if !doc.returns.is_empty() {
        push_section(&mut out, "Returns", doc.returns.iter().map(return_block));
    }
    out
}

fn push_section(out: &mut String, title: &str, blocks: impl Iterator<Item = String>) {
    out.push_str("\n\n");
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(title.len()));
    for block in blocks {
        out.push('\n');
        out.push_str(&block);
    }
}

/// `name`, `name : type`, or `name : type, default: value`.
///
/// A default is only shown alongside a type. An overridden default is shown
/// even when the parameter declares none.
fn param_header(entry: &ParamEntry) -> String {
    let Some(ref type_display) = entry.type_display else {
        return entry.name.clone();
    };
    match entry.default_display {
        Some(ref default) => format!("{} : {}, default: {}", entry.name, type_display, default),
        None => format!("{} : {}", entry.name, type_display),
    }
}

fn param_block(entry: &ParamEntry) -> String {
    with_description(param_header(entry), entry.description())
}

fn return_block(entry: &ReturnEntry) -> String {
    with_description(entry.type_display.clone(), entry.description())
}

fn with_description(header: String, description: Option<&str>) -> String {
    let text = description.map(cleandoc).unwrap_or_default();
    if text.is_empty() {
        return header;
    }
    format!("{}\n{}", header, indent(&text, INDENT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ParamDoc, ReturnDoc};
    use crate::signature::ParamKind;

    fn doc(params: Vec<ParamEntry>, returns: Vec<ReturnEntry>) -> StructuredDoc {
        StructuredDoc {
            docstring: "Docstring".into(),
            summary: "Docstring".into(),
            body: None,
            params,
            returns,
        }
    }

    fn param(name: &str, type_display: Option<&str>, default: Option<&str>, description: Option<&str>) -> ParamEntry {
        ParamEntry {
            name: name.into(),
            kind: ParamKind::Normal,
            type_display: type_display.map(Into::into),
            has_default: default.is_some(),
            default_display: default.map(Into::into),
            doc: description.map(|d| ParamDoc::new(d)),
        }
    }

    fn ret(type_display: &str, description: Option<&str>) -> ReturnEntry {
        ReturnEntry {
            type_display: type_display.into(),
            doc: description.map(|d| ReturnDoc::new(d)),
        }
    }

    #[test]
    fn bare_docstring_untouched() {
        let mut d = doc(vec![], vec![]);
        d.docstring = "  Docstring\n    with odd indent  ".into();
        assert_eq!(render(&d), "  Docstring\n    with odd indent  ");
    }

    #[test]
    fn basic_layout() {
        let d = doc(
            vec![param("a", Some("str"), None, Some("blah"))],
            vec![ret("str", Some("blah"))],
        );
        assert_eq!(
            render(&d),
            "Docstring\n\nParameters\n----------\na : str\n    blah\n\nReturns\n-------\nstr\n    blah"
        );
    }

    #[test]
    fn headers() {
        assert_eq!(param_header(&param("a", None, None, None)), "a");
        assert_eq!(param_header(&param("a", None, Some("1"), None)), "a");
        assert_eq!(param_header(&param("a", Some("int"), None, None)), "a : int");
        assert_eq!(
            param_header(&param("a", Some("str"), Some("'default'"), None)),
            "a : str, default: 'default'"
        );

        let mut overridden = param("a", Some("int"), Some("x"), None);
        overridden.has_default = false;
        assert_eq!(param_header(&overridden), "a : int, default: x");
    }

    #[test]
    fn multiline_description() {
        let block = with_description(
            "a : str".into(),
            Some("some long\n    multiline\n\n    description\n    "),
        );
        assert_eq!(block, "a : str\n    some long\n    multiline\n\n    description");
    }

    #[test]
    fn blank_description_is_omitted() {
        assert_eq!(with_description("int".into(), Some("  \n ")), "int");
    }

    #[test]
    fn body_is_kept() {
        let mut d = doc(vec![], vec![ret("None", None)]);
        d.body = Some("More detail.".into());
        assert_eq!(render(&d), "Docstring\n\nMore detail.\n\nReturns\n-------\nNone");
    }
}
