//! Signature walker: builds the [`StructuredDoc`] for one callable.

use crate::annotation::{resolve, resolve_type, Annotation, Namespace, Resolved};
use crate::descriptor::{ParamDoc, ReturnDoc};
use crate::docstring::{cleandoc, split_summary};
use crate::error::{DocError, Result};
use crate::extract::extract;
use crate::model::{ParamEntry, ReturnEntry, StructuredDoc};
use crate::signature::{Parameter, SignatureProvider};
use std::collections::HashSet;

/// Walk `target`'s signature into a [`StructuredDoc`].
///
/// Returns `Ok(None)` when the callable has no docstring; nothing else is
/// examined in that case. Any resolution or extraction error aborts the
/// whole walk.
pub fn walk<S: SignatureProvider + ?Sized>(target: &S) -> Result<Option<StructuredDoc>> {
    let Some(docstring) = target.docstring() else {
        return Ok(None);
    };
    let (summary, body) = split_summary(&cleandoc(docstring));
    let namespace = target.namespace();

    let mut seen = HashSet::new();
    let mut params = Vec::with_capacity(target.parameters().len());
    for param in target.parameters() {
        if !seen.insert(param.name.as_str()) {
            return Err(DocError::DuplicateParameter(param.name.clone()));
        }
        params.push(param_entry(param, namespace)?);
    }

    let returns = return_entries(target.return_annotation(), namespace)?;

    tracing::debug!(
        callable = target.name(),
        params = params.len(),
        returns = returns.len(),
        "walked signature"
    );

    Ok(Some(StructuredDoc {
        docstring: docstring.to_string(),
        summary,
        body,
        params,
        returns,
    }))
}

fn param_entry(param: &Parameter, namespace: &Namespace) -> Result<ParamEntry> {
    let Resolved { base, extras } = resolve(param.annotation.as_ref(), namespace)?;
    let doc: Option<ParamDoc> = extract(&extras, &format!("parameter '{}'", param.name))?;

    let type_display = doc
        .as_ref()
        .and_then(|d| d.type_display())
        .map(str::to_string)
        .or_else(|| base.map(|t| t.to_string()));

    let default_display = doc
        .as_ref()
        .and_then(|d| d.default_display())
        .map(str::to_string)
        .or_else(|| param.default.as_ref().map(|v| v.to_string()));

    Ok(ParamEntry {
        name: format!("{}{}", param.kind.marker(), param.name),
        kind: param.kind,
        type_display,
        has_default: param.default.is_some(),
        default_display,
        doc,
    })
}

fn return_entries(annotation: Option<&Annotation>, namespace: &Namespace) -> Result<Vec<ReturnEntry>> {
    let Resolved { base, extras } = resolve(annotation, namespace)?;
    let root_doc: Option<ReturnDoc> = extract(&extras, "the return value")?;

    let Some(base) = base else {
        return Ok(Vec::new());
    };

    let Some(elements) = base.as_fixed_tuple() else {
        return Ok(vec![return_entry(base.to_string(), root_doc)]);
    };

    if root_doc.is_some() {
        return Err(DocError::AmbiguousReturn);
    }

    elements
        .iter()
        .enumerate()
        .map(|(i, element)| -> Result<ReturnEntry> {
            let Resolved { base, extras } = resolve_type(element);
            let doc = extract(&extras, &format!("return value {}", i))?;
            let display = base.map(|t| t.to_string()).unwrap_or_default();
            Ok(return_entry(display, doc))
        })
        .collect()
}

fn return_entry(resolved_display: String, doc: Option<ReturnDoc>) -> ReturnEntry {
    let type_display = doc
        .as_ref()
        .and_then(|d| d.type_display())
        .map(str::to_string)
        .unwrap_or(resolved_display);
    ReturnEntry { type_display, doc }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{Callable, ParamKind};
    use crate::types::{Literal, TypeExpr};

    fn str_() -> TypeExpr {
        TypeExpr::named("str")
    }

    fn int() -> TypeExpr {
        TypeExpr::named("int")
    }

    #[test]
    fn no_docstring_is_not_examined() {
        // The annotation would fail to resolve if it were looked at.
        let f = Callable::builder("fn")
            .param(Parameter::new("a").annotation_text("Missing"))
            .build();
        assert_eq!(walk(&f).unwrap(), None);
    }

    #[test]
    fn param_entry_fields() {
        let f = Callable::builder("fn")
            .doc("Docstring")
            .param(
                Parameter::new("a")
                    .annotation(TypeExpr::annotated(str_(), [ParamDoc::new("blah").into()]))
                    .default("default"),
            )
            .param(Parameter::new("kw").kind(ParamKind::VarKeyword).annotation(str_()))
            .build();
        let doc = walk(&f).unwrap().unwrap();
        assert_eq!(doc.summary, "Docstring");
        assert_eq!(doc.params.len(), 2);

        let a = &doc.params[0];
        assert_eq!(a.name, "a");
        assert_eq!(a.type_display.as_deref(), Some("str"));
        assert!(a.has_default);
        assert_eq!(a.default_display.as_deref(), Some("'default'"));
        assert_eq!(a.description(), Some("blah"));

        let kw = &doc.params[1];
        assert_eq!(kw.name, "**kw");
        assert!(!kw.has_default);
        assert!(doc.returns.is_empty());
    }

    #[test]
    fn overrides_win() {
        let f = Callable::builder("fn")
            .doc("Docstring")
            .param(
                Parameter::new("b")
                    .annotation(TypeExpr::annotated(
                        TypeExpr::generic("typing.Optional", [int()]),
                        [ParamDoc::default().with_default("inferred").with_type_hint("int?").into()],
                    ))
                    .default(Literal::None),
            )
            .returns(TypeExpr::annotated(int(), [ReturnDoc::default().with_type_hint("some_type").into()]))
            .build();
        let doc = walk(&f).unwrap().unwrap();
        assert_eq!(doc.params[0].type_display.as_deref(), Some("int?"));
        assert_eq!(doc.params[0].default_display.as_deref(), Some("inferred"));
        assert_eq!(doc.returns[0].type_display, "some_type");
    }

    #[test]
    fn default_override_without_declared_default() {
        let f = Callable::builder("fn")
            .doc("Docstring")
            .param(Parameter::new("a").annotation(TypeExpr::annotated(
                int(),
                [ParamDoc::default().with_default("x").into()],
            )))
            .build();
        let doc = walk(&f).unwrap().unwrap();
        assert!(!doc.params[0].has_default);
        assert_eq!(doc.params[0].default_display.as_deref(), Some("x"));
    }

    #[test]
    fn decomposes_fixed_tuple() {
        let f = Callable::builder("fn")
            .doc("Docstring")
            .returns(TypeExpr::generic(
                "tuple",
                [str_(), TypeExpr::annotated(int(), [ReturnDoc::new("doc").into()])],
            ))
            .build();
        let doc = walk(&f).unwrap().unwrap();
        let displays: Vec<&str> = doc.returns.iter().map(|r| r.type_display.as_str()).collect();
        assert_eq!(displays, ["str", "int"]);
        assert_eq!(doc.returns[0].description(), None);
        assert_eq!(doc.returns[1].description(), Some("doc"));
    }

    #[test]
    fn variable_length_tuple_is_one_entry() {
        let f = Callable::builder("fn")
            .doc("Docstring")
            .returns(TypeExpr::annotated(
                TypeExpr::generic("tuple", [str_(), TypeExpr::Ellipsis]),
                [ReturnDoc::new("doc").into()],
            ))
            .build();
        let doc = walk(&f).unwrap().unwrap();
        assert_eq!(doc.returns.len(), 1);
        assert_eq!(doc.returns[0].type_display, "tuple[str, ...]");
        assert_eq!(doc.returns[0].description(), Some("doc"));
    }

    #[test]
    fn root_doc_on_decomposed_tuple_fails() {
        let f = Callable::builder("fn")
            .doc("Docstring")
            .returns(TypeExpr::annotated(
                TypeExpr::generic("tuple", [str_(), int()]),
                [ReturnDoc::new("doc").into()],
            ))
            .build();
        assert_eq!(walk(&f).unwrap_err(), DocError::AmbiguousReturn);
    }

    #[test]
    fn duplicate_on_tuple_element_fails() {
        let f = Callable::builder("fn")
            .doc("Docstring")
            .returns(TypeExpr::generic(
                "tuple",
                [
                    str_(),
                    TypeExpr::annotated(int(), [ReturnDoc::new("1").into(), ReturnDoc::new("2").into()]),
                ],
            ))
            .build();
        let err = walk(&f).unwrap_err();
        assert_eq!(
            err,
            DocError::DuplicateDescriptor {
                kind: "ReturnDoc",
                position: "return value 1".into()
            }
        );
    }

    #[test]
    fn duplicate_parameter_names_fail() {
        let f = Callable::builder("fn")
            .doc("Docstring")
            .param(Parameter::new("a"))
            .param(Parameter::new("a"))
            .build();
        assert_eq!(walk(&f).unwrap_err(), DocError::DuplicateParameter("a".into()));
    }
}
