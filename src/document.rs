//! Orchestrator: render a callable's docstring in a chosen style and write it back.

use crate::error::Result;
use crate::render::{self, Registry, Renderer, DEFAULT_STYLE};
use crate::signature::{Documentable, SignatureProvider};
use crate::walker;
use std::fmt;
use std::sync::Arc;

/// A configured documentation pass: one style, applied to any number of
/// callables.
#[derive(Clone)]
pub struct Documenter {
    style: String,
    renderer: Arc<dyn Renderer>,
}

impl Documenter {
    /// Resolve `style` in `registry` up front.
    ///
    /// An unknown style fails here, before any callable is examined.
    pub fn new(registry: &Registry, style: &str) -> Result<Self> {
        Ok(Self {
            style: style.to_string(),
            renderer: registry.resolve(style)?,
        })
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    /// Render the docstring `target` would get, without touching it.
    ///
    /// `Ok(None)` when the callable has no docstring.
    pub fn render<S: SignatureProvider + ?Sized>(&self, target: &S) -> Result<Option<String>> {
        Ok(walker::walk(target)?.map(|doc| self.renderer.render(&doc)))
    }

    /// Replace `target`'s docstring with the rendered one and hand it back.
    ///
    /// Callables without a docstring are returned unchanged. On error the
    /// docstring is left exactly as it was.
    pub fn apply_to<'t, T: Documentable + ?Sized>(&self, target: &'t mut T) -> Result<&'t mut T> {
        match self.render(&*target)? {
            Some(rendered) => {
                tracing::debug!(callable = target.name(), style = %self.style, "documented callable");
                target.set_docstring(rendered);
            }
            None => {
                tracing::debug!(callable = target.name(), "no docstring; left unchanged");
            }
        }
        Ok(target)
    }
}

impl fmt::Debug for Documenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Documenter").field("style", &self.style).finish()
    }
}

/// Parameterized form: a [`Documenter`] for `style` from the process-wide
/// registry.
pub fn configure(style: &str) -> Result<Documenter> {
    Documenter::new(&render::global().read(), style)
}

/// Bare form: document `target` with the default `numpydoc` style.
pub fn document<T: Documentable + ?Sized>(target: &mut T) -> Result<&mut T> {
    configure(DEFAULT_STYLE)?.apply_to(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ParamDoc;
    use crate::error::DocError;
    use crate::model::StructuredDoc;
    use crate::signature::{Callable, Parameter};
    use crate::types::TypeExpr;

    fn documented() -> Callable {
        Callable::builder("fn")
            .doc("Docstring")
            .param(Parameter::new("a").annotation(TypeExpr::annotated(
                TypeExpr::named("int"),
                [ParamDoc::new("1").into(), ParamDoc::new("2").into()],
            )))
            .build()
    }

    #[test]
    fn unknown_style_fails_before_walking() {
        let err = Documenter::new(&Registry::new(), "junk").err().unwrap();
        assert_eq!(err, DocError::UnknownStyle("junk".into()));
    }

    #[test]
    fn failure_leaves_docstring_alone() {
        let mut f = documented();
        let documenter = Documenter::new(&Registry::new(), "numpydoc").unwrap();
        assert!(documenter.apply_to(&mut f).is_err());
        assert_eq!(f.docstring(), Some("Docstring"));
    }

    #[test]
    fn custom_registry_style() {
        let mut registry = Registry::new();
        registry
            .register("count", |doc: &StructuredDoc| format!("{} params", doc.params.len()))
            .unwrap();
        let mut f = Callable::builder("fn")
            .doc("Docstring")
            .param(Parameter::new("x"))
            .build();
        let documenter = Documenter::new(&registry, "count").unwrap();
        assert_eq!(documenter.style(), "count");
        documenter.apply_to(&mut f).unwrap();
        assert_eq!(f.docstring(), Some("1 params"));
    }

    #[test]
    fn render_does_not_mutate() {
        let f = Callable::builder("fn").doc("Docstring").returns_none().build();
        let documenter = Documenter::new(&Registry::new(), "numpydoc").unwrap();
        let rendered = documenter.render(&f).unwrap();
        assert_eq!(rendered.as_deref(), Some("Docstring\n\nReturns\n-------\nNone"));
        assert_eq!(f.docstring(), Some("Docstring"));
    }
}
