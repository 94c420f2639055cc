//! Name lookup scope for textual annotations.

use crate::types::{Literal, TypeExpr};
use std::collections::BTreeMap;

/// Builtin types that take no type arguments.
const BUILTIN_TYPES: &[&str] = &["str", "int", "float", "bool", "bytes", "complex", "object"];

/// Builtin generic origins.
const BUILTIN_GENERICS: &[&str] = &["list", "dict", "set", "frozenset", "tuple", "type"];

/// `typing` generic origins.
const TYPING_GENERICS: &[&str] = &[
    "Optional", "Union", "List", "Dict", "Tuple", "Set", "FrozenSet", "Sequence", "Mapping",
    "Callable", "Iterable", "Iterator", "Type",
];

/// What a name in a [`Namespace`] is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    /// A type that cannot be subscripted.
    Type(TypeExpr),
    /// A generic origin, usable bare or with type arguments.
    Generic(String),
    /// The `Annotated` envelope constructor.
    Annotated,
    /// `typing.Literal`, whose arguments are values.
    Literal,
    /// The `ParamDoc` constructor.
    ParamDoc,
    /// The `ReturnDoc` constructor.
    ReturnDoc,
    /// A plain value, usable as opaque envelope metadata.
    Value(Literal),
    /// A nested scope reached with `module.name`.
    Module(Namespace),
}

/// A callable's defining scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    symbols: BTreeMap<String, Symbol>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope seeded with builtin types.
    pub fn builtins() -> Self {
        let mut ns = Self::new();
        for name in BUILTIN_TYPES {
            ns.insert(*name, Symbol::Type(TypeExpr::named(*name)));
        }
        for name in BUILTIN_GENERICS {
            ns.insert(*name, Symbol::Generic(name.to_string()));
        }
        ns
    }

    /// Adds the `typing` module, plus its common names imported bare.
    pub fn with_typing(mut self) -> Self {
        let typing = typing_module();
        for (name, symbol) in &typing.symbols {
            self.insert(name.clone(), symbol.clone());
        }
        self.insert("typing", Symbol::Module(typing));
        self
    }

    /// Adds the descriptor constructors and their `P`/`R` aliases.
    pub fn with_descriptors(mut self) -> Self {
        self.insert("ParamDoc", Symbol::ParamDoc);
        self.insert("P", Symbol::ParamDoc);
        self.insert("ReturnDoc", Symbol::ReturnDoc);
        self.insert("R", Symbol::ReturnDoc);
        self
    }

    /// Builtins, `typing`, and the descriptors: what a typical module sees.
    pub fn standard() -> Self {
        Self::builtins().with_typing().with_descriptors()
    }

    pub fn with(mut self, name: impl Into<String>, symbol: Symbol) -> Self {
        self.insert(name, symbol);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, symbol: Symbol) {
        self.symbols.insert(name.into(), symbol);
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }
}

fn typing_module() -> Namespace {
    let mut typing = Namespace::new();
    for name in TYPING_GENERICS {
        typing.insert(*name, Symbol::Generic(format!("typing.{}", name)));
    }
    typing.insert("Any", Symbol::Type(TypeExpr::named("typing.Any")));
    typing.insert("Annotated", Symbol::Annotated);
    typing.insert("Literal", Symbol::Literal);
    typing
}
