//! sigdoc: keep docstrings in sync with annotated signatures.
//!
//! Descriptors ([`ParamDoc`], [`ReturnDoc`]) ride along with type annotations
//! inside an `Annotated` envelope. A documentation pass resolves each
//! annotation, picks out its descriptor, and appends rendered sections to
//! the callable's existing docstring:
//!
//! ```
//! use sigdoc::{document, Callable, ParamDoc, Parameter, SignatureProvider, TypeExpr};
//!
//! let mut f = Callable::builder("fn")
//!     .doc("Docstring")
//!     .param(Parameter::new("a").annotation(TypeExpr::annotated(
//!         TypeExpr::named("str"),
//!         [ParamDoc::new("blah").into()],
//!     )))
//!     .returns_text(r#"Annotated[str, ReturnDoc("blah")]"#)
//!     .build();
//!
//! document(&mut f)?;
//! assert_eq!(
//!     f.docstring(),
//!     Some("Docstring\n\nParameters\n----------\na : str\n    blah\n\nReturns\n-------\nstr\n    blah")
//! );
//! # Ok::<(), sigdoc::DocError>(())
//! ```
//!
//! Pipeline: [`signature`] → [`walker`] ([`annotation`] → [`extract`]) →
//! [`model::StructuredDoc`] → [`render::Registry`] → renderer.

pub mod annotation;
pub mod descriptor;
pub mod docstring;
pub mod document;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;
pub mod signature;
pub mod types;
pub mod walker;

pub use annotation::{Annotation, Namespace, Symbol};
pub use descriptor::{Metadata, ParamDoc, ReturnDoc};
pub use document::{configure, document, Documenter};
pub use error::{DocError, Result};
pub use model::{ParamEntry, ReturnEntry, StructuredDoc};
pub use render::{register_style, resolve_style, Registry, Renderer, DEFAULT_STYLE};
pub use signature::{Callable, CallableBuilder, Documentable, ParamKind, Parameter, SignatureProvider};
pub use types::{Literal, TypeExpr};
