//! Type descriptors and literal values.
//!
//! `TypeExpr` is the resolved form of an annotation. Its `Display` impl is
//! the canonical textual form used in rendered docstrings: builtins render
//! bare (`str`), `typing` members qualified (`typing.Optional[int]`).

use crate::descriptor::Metadata;
use std::fmt;

/// Origins recognised as tuple type forms.
const TUPLE_ORIGINS: &[&str] = &["tuple", "typing.Tuple"];

/// A resolved type annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// The none-type, rendered `None`.
    NoneType,
    /// An unparameterized type or generic origin (`str`, `tuple`, `typing.Any`).
    Named(String),
    /// A parameterized generic (`tuple[str, int]`, `typing.Optional[int]`).
    Generic { origin: String, args: Vec<TypeExpr> },
    /// The `...` marker of a variable-length tuple.
    Ellipsis,
    /// The `()` argument of `tuple[()]`.
    EmptyTuple,
    /// A literal value inside a type form, e.g. `typing.Literal['a']`.
    Value(Literal),
    /// A base type paired with extra metadata values.
    Annotated(Box<Annotated>),
}

/// The "annotated with metadata" envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotated {
    pub base: TypeExpr,
    pub extras: Vec<Metadata>,
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    pub fn generic(origin: impl Into<String>, args: impl IntoIterator<Item = TypeExpr>) -> Self {
        TypeExpr::Generic {
            origin: origin.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Wrap `base` in an envelope carrying `extras`.
    ///
    /// Nested envelopes flatten: the inner extras come first. With no extras
    /// the base type is returned as-is.
    pub fn annotated(base: TypeExpr, extras: impl IntoIterator<Item = Metadata>) -> Self {
        let mut extras: Vec<Metadata> = extras.into_iter().collect();
        let base = match base {
            TypeExpr::Annotated(inner) => {
                let Annotated {
                    base,
                    extras: mut inner_extras,
                } = *inner;
                inner_extras.append(&mut extras);
                extras = inner_extras;
                base
            }
            other => other,
        };
        if extras.is_empty() {
            return base;
        }
        TypeExpr::Annotated(Box::new(Annotated { base, extras }))
    }

    /// Separate the base type from any envelope extras.
    pub fn split_annotated(&self) -> (&TypeExpr, &[Metadata]) {
        match self {
            TypeExpr::Annotated(inner) => (&inner.base, &inner.extras),
            other => (other, &[]),
        }
    }

    /// Element types when this is a fixed-arity tuple of two or more types.
    ///
    /// Bare `tuple`, `tuple[X, ...]`, `tuple[X]`, and `tuple[()]` all return
    /// `None`.
    pub fn as_fixed_tuple(&self) -> Option<&[TypeExpr]> {
        match self {
            TypeExpr::Generic { origin, args }
                if TUPLE_ORIGINS.contains(&origin.as_str())
                    && args.len() >= 2
                    && !args
                        .iter()
                        .any(|a| matches!(a, TypeExpr::Ellipsis | TypeExpr::EmptyTuple)) =>
            {
                Some(args.as_slice())
            }
            _ => None,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::NoneType => f.write_str("None"),
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::Generic { origin, args } => {
                write!(f, "{}[", origin)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str("]")
            }
            TypeExpr::Ellipsis => f.write_str("..."),
            TypeExpr::EmptyTuple => f.write_str("()"),
            TypeExpr::Value(value) => write!(f, "{}", value),
            TypeExpr::Annotated(inner) => {
                write!(f, "typing.Annotated[{}", inner.base)?;
                for extra in &inner.extras {
                    write!(f, ", {}", extra)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A plain value: a parameter default or an opaque envelope extra.
///
/// `Display` produces the host's `repr` form.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A pre-rendered representation, shown verbatim.
    Repr(String),
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Str(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Str(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::None => f.write_str("None"),
            Literal::Bool(true) => f.write_str("True"),
            Literal::Bool(false) => f.write_str("False"),
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Float(x) if x.is_nan() => f.write_str("nan"),
            Literal::Float(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "inf" } else { "-inf" })
            }
            Literal::Float(x) => f.write_str(&repr_float(*x)),
            Literal::Str(s) => f.write_str(&repr_str(s)),
            Literal::Repr(raw) => f.write_str(raw),
        }
    }
}

/// Format a finite float the way the host's `repr` does.
///
/// `Debug` already picks the same shortest digits and switches to
/// exponent form at the same magnitudes; the host additionally signs the
/// exponent and pads it to two digits (`1e+20`, `1.5e-07`).
fn repr_float(x: f64) -> String {
    let debug = format!("{:?}", x);
    let Some((mantissa, exponent)) = debug.split_once('e') else {
        return debug;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

/// Quote a string the way the host's `repr` does.
///
/// Single quotes unless the text contains `'` and no `"`.
fn repr_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
