//! Renderer module: trait-based style dispatch through a [`Registry`].

pub mod numpydoc;

use crate::error::{DocError, Result};
use crate::model::StructuredDoc;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Style used when none is named.
pub const DEFAULT_STYLE: &str = numpydoc::NAME;

/// Turns a [`StructuredDoc`] into final docstring text.
///
/// Any `Fn(&StructuredDoc) -> String` is a renderer.
pub trait Renderer: Send + Sync {
    fn render(&self, doc: &StructuredDoc) -> String;
}

impl<F> Renderer for F
where
    F: Fn(&StructuredDoc) -> String + Send + Sync,
{
    fn render(&self, doc: &StructuredDoc) -> String {
        self(doc)
    }
}

/// Mapping from style name to renderer. Add-only.
#[derive(Clone)]
pub struct Registry {
    styles: BTreeMap<String, Arc<dyn Renderer>>,
}

impl Registry {
    /// Registry holding the built-in `numpydoc` style.
    pub fn new() -> Self {
        let mut styles: BTreeMap<String, Arc<dyn Renderer>> = BTreeMap::new();
        styles.insert(numpydoc::NAME.to_string(), Arc::new(numpydoc::NumpydocRenderer));
        Self { styles }
    }

    /// Registry with no styles at all.
    pub fn empty() -> Self {
        Self {
            styles: BTreeMap::new(),
        }
    }

    /// Register `renderer` under `name` and hand it back unchanged.
    ///
    /// Fails with [`DocError::DuplicateStyle`] if the name is taken; the
    /// existing registration is kept.
    pub fn register<R: Renderer + Clone + 'static>(&mut self, name: &str, renderer: R) -> Result<R> {
        if self.styles.contains_key(name) {
            return Err(DocError::DuplicateStyle(name.to_string()));
        }
        self.styles.insert(name.to_string(), Arc::new(renderer.clone()));
        tracing::debug!(style = name, "registered docstring style");
        Ok(renderer)
    }

    /// Look up the renderer for `name`.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Renderer>> {
        self.styles
            .get(name)
            .cloned()
            .ok_or_else(|| DocError::UnknownStyle(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Registered style names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("styles", &self.styles.keys().collect::<Vec<_>>())
            .finish()
    }
}

static GLOBAL: LazyLock<RwLock<Registry>> = LazyLock::new(|| RwLock::new(Registry::new()));

/// The process-wide registry used by [`document`](crate::document) and
/// [`configure`](crate::configure).
pub fn global() -> &'static RwLock<Registry> {
    &GLOBAL
}

/// Decorator-style registration into the process-wide registry.
///
/// `register_style("name")(renderer)` registers `renderer` and returns it,
/// still usable as a plain function.
pub fn register_style<R: Renderer + Clone + 'static>(name: &str) -> impl FnOnce(R) -> Result<R> + '_ {
    move |renderer| GLOBAL.write().register(name, renderer)
}

/// Look up `name` in the process-wide registry.
pub fn resolve_style(name: &str) -> Result<Arc<dyn Renderer>> {
    GLOBAL.read().resolve(name)
}
