//! Recursive-descent evaluator turning annotation text into a `TypeExpr`.
//!
//! Parsing and evaluation happen in one pass: every name is looked up in the
//! callable's namespace as soon as it is read.

use super::lexer::{tokenize, Token};
use super::namespace::{Namespace, Symbol};
use crate::descriptor::{Metadata, ParamDoc, ReturnDoc};
use crate::error::{DocError, Result};
use crate::types::{Literal, TypeExpr};

/// Intermediate result of evaluating a sub-expression.
#[derive(Debug, Clone)]
enum Value<'ns> {
    Type(TypeExpr),
    /// An unsubscripted generic origin.
    Generic(String),
    Literal(Literal),
    Meta(Metadata),
    Module(&'ns Namespace),
    Form(Form),
    Ellipsis,
    EmptyTuple,
}

/// Special constructors that are not themselves types.
#[derive(Debug, Clone, Copy)]
enum Form {
    Annotated,
    Literal,
    ParamDoc,
    ReturnDoc,
}

impl Form {
    fn name(self) -> &'static str {
        match self {
            Form::Annotated => "typing.Annotated",
            Form::Literal => "typing.Literal",
            Form::ParamDoc => "ParamDoc",
            Form::ReturnDoc => "ReturnDoc",
        }
    }
}

/// A call argument, positional or `key=value`.
enum Arg<'ns> {
    Positional(Value<'ns>),
    Keyword(String, Value<'ns>),
}

/// Deepest expression nesting accepted, forward references included.
pub const MAX_DEPTH: usize = 200;

struct Evaluator<'a> {
    /// Top-level annotation text, quoted in error messages.
    source: &'a str,
    namespace: &'a Namespace,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

/// Evaluate `text` against `namespace`.
pub fn evaluate(text: &str, namespace: &Namespace) -> Result<TypeExpr> {
    evaluate_within(text, text, namespace, 0)
}

fn evaluate_within(text: &str, source: &str, namespace: &Namespace, depth: usize) -> Result<TypeExpr> {
    let mut eval = Evaluator {
        source,
        namespace,
        tokens: tokenize(text).map_err(|err| match err {
            DocError::InvalidAnnotation { message, .. } => DocError::invalid(source, message),
            other => other,
        })?,
        pos: 0,
        depth,
    };
    if eval.tokens.is_empty() {
        return Err(DocError::invalid(source, "empty annotation"));
    }
    let value = eval.expr()?;
    if let Some(token) = eval.peek() {
        return Err(eval.error(format!("unexpected trailing {:?}", token)));
    }
    eval.to_type(value, false)
}

impl<'a> Evaluator<'a> {
    fn error(&self, message: impl Into<String>) -> DocError {
        DocError::invalid(self.source, message)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected {:?}, found {:?}", expected, self.peek())))
        }
    }

    fn expr(&mut self) -> Result<Value<'a>> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error("annotation nested too deeply"));
        }
        let value = self.postfix();
        self.depth -= 1;
        value
    }

    fn postfix(&mut self) -> Result<Value<'a>> {
        let mut value = self.primary()?;
        loop {
            if self.eat(&Token::LBracket) {
                let args = self.items(&Token::RBracket)?;
                value = self.subscript(value, args)?;
            } else if self.eat(&Token::LParen) {
                let args = self.call_args()?;
                value = self.call(value, args)?;
            } else if self.eat(&Token::Dot) {
                let Some(Token::Name(attr)) = self.next() else {
                    return Err(self.error("expected a name after `.`"));
                };
                value = self.attribute(value, &attr)?;
            } else {
                return Ok(value);
            }
        }
    }

    fn primary(&mut self) -> Result<Value<'a>> {
        match self.next() {
            Some(Token::Name(name)) => match name.as_str() {
                "None" => Ok(Value::Type(TypeExpr::NoneType)),
                "True" => Ok(Value::Literal(Literal::Bool(true))),
                "False" => Ok(Value::Literal(Literal::Bool(false))),
                _ => {
                    let namespace = self.namespace;
                    match namespace.get(&name) {
                        Some(symbol) => Ok(self.bind(symbol)),
                        None => Err(DocError::UnresolvedName {
                            name,
                            annotation: self.source.to_string(),
                        }),
                    }
                }
            },
            Some(Token::Str(s)) => Ok(Value::Literal(Literal::Str(s))),
            Some(Token::Int(n)) => Ok(Value::Literal(Literal::Int(n))),
            Some(Token::Float(x)) => Ok(Value::Literal(Literal::Float(x))),
            Some(Token::Ellipsis) => Ok(Value::Ellipsis),
            Some(Token::LParen) => {
                if self.eat(&Token::RParen) {
                    return Ok(Value::EmptyTuple);
                }
                let inner = self.expr()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            other => Err(self.error(format!("unexpected {:?}", other))),
        }
    }

    fn bind(&self, symbol: &'a Symbol) -> Value<'a> {
        match symbol {
            Symbol::Type(t) => Value::Type(t.clone()),
            Symbol::Generic(origin) => Value::Generic(origin.clone()),
            Symbol::Annotated => Value::Form(Form::Annotated),
            Symbol::Literal => Value::Form(Form::Literal),
            Symbol::ParamDoc => Value::Form(Form::ParamDoc),
            Symbol::ReturnDoc => Value::Form(Form::ReturnDoc),
            Symbol::Value(v) => Value::Literal(v.clone()),
            Symbol::Module(ns) => Value::Module(ns),
        }
    }

    fn attribute(&self, value: Value<'a>, attr: &str) -> Result<Value<'a>> {
        let Value::Module(module) = value else {
            return Err(self.error(format!("cannot look up `.{}` on a non-module", attr)));
        };
        match module.get(attr) {
            Some(symbol) => Ok(self.bind(symbol)),
            None => Err(DocError::UnresolvedName {
                name: attr.to_string(),
                annotation: self.source.to_string(),
            }),
        }
    }

    /// Comma-separated expressions up to `close`; a trailing comma is allowed.
    fn items(&mut self, close: &Token) -> Result<Vec<Value<'a>>> {
        let mut items = Vec::new();
        while !self.eat(close) {
            items.push(self.expr()?);
            if !self.eat(&Token::Comma) {
                self.expect(close)?;
                break;
            }
        }
        if items.is_empty() {
            return Err(self.error("empty subscript"));
        }
        Ok(items)
    }

    fn call_args(&mut self) -> Result<Vec<Arg<'a>>> {
        let mut args = Vec::new();
        while !self.eat(&Token::RParen) {
            let is_keyword = matches!(self.peek(), Some(Token::Name(_)))
                && self.tokens.get(self.pos + 1) == Some(&Token::Equals);
            if is_keyword {
                let Some(Token::Name(key)) = self.next() else {
                    return Err(self.error("expected keyword name"));
                };
                self.pos += 1;
                args.push(Arg::Keyword(key, self.expr()?));
            } else {
                args.push(Arg::Positional(self.expr()?));
            }
            if !self.eat(&Token::Comma) {
                self.expect(&Token::RParen)?;
                break;
            }
        }
        Ok(args)
    }

    fn subscript(&self, value: Value<'a>, args: Vec<Value<'a>>) -> Result<Value<'a>> {
        match value {
            Value::Form(Form::Annotated) => {
                let mut args = args.into_iter();
                let base = match args.next() {
                    Some(base) => self.to_type(base, false)?,
                    None => return Err(self.error("Annotated needs a type")),
                };
                let extras: Vec<Metadata> = args.map(|a| self.to_metadata(a)).collect();
                if extras.is_empty() {
                    return Err(self.error("Annotated needs at least one metadata value"));
                }
                Ok(Value::Type(TypeExpr::annotated(base, extras)))
            }
            Value::Form(Form::Literal) => {
                let args = args
                    .into_iter()
                    .map(|a| match a {
                        Value::Literal(l) => Ok(TypeExpr::Value(l)),
                        Value::Type(TypeExpr::NoneType) => Ok(TypeExpr::NoneType),
                        _ => Err(self.error("Literal arguments must be values")),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::Type(TypeExpr::generic(Form::Literal.name(), args)))
            }
            Value::Generic(origin) => {
                let args = args
                    .into_iter()
                    .map(|a| self.to_type(a, true))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::Type(TypeExpr::Generic { origin, args }))
            }
            Value::Type(other) => Err(self.error(format!("`{}` is not subscriptable", other))),
            _ => Err(self.error("value is not subscriptable")),
        }
    }

    fn call(&self, value: Value<'a>, args: Vec<Arg<'a>>) -> Result<Value<'a>> {
        let form = match value {
            Value::Form(form @ (Form::ParamDoc | Form::ReturnDoc)) => form,
            _ => return Err(self.error("only ParamDoc and ReturnDoc can be called")),
        };

        let mut description = None;
        let mut default = None;
        let mut type_hint = None;
        let mut positional = 0;

        for arg in args {
            let (key, value) = match arg {
                Arg::Positional(value) => {
                    positional += 1;
                    if positional > 1 {
                        return Err(self.error(format!(
                            "{} takes at most one positional argument",
                            form.name()
                        )));
                    }
                    ("description".to_string(), value)
                }
                Arg::Keyword(key, value) => (key, value),
            };
            let slot = match (form, key.as_str()) {
                (_, "description") => &mut description,
                (_, "type_hint") => &mut type_hint,
                (Form::ParamDoc, "default") => &mut default,
                _ => {
                    return Err(self.error(format!(
                        "{} got an unexpected keyword argument '{}'",
                        form.name(),
                        key
                    )))
                }
            };
            if slot.is_some() {
                return Err(self.error(format!(
                    "{} got multiple values for argument '{}'",
                    form.name(),
                    key
                )));
            }
            *slot = Some(self.to_text(value, &key)?);
        }

        let meta = match form {
            Form::ParamDoc => {
                let mut doc = description.flatten().map(|d| ParamDoc::new(d)).unwrap_or_default();
                if let Some(default) = default.flatten() {
                    doc = doc.with_default(default);
                }
                if let Some(type_hint) = type_hint.flatten() {
                    doc = doc.with_type_hint(type_hint);
                }
                Metadata::Param(doc)
            }
            _ => {
                let mut doc = description.flatten().map(|d| ReturnDoc::new(d)).unwrap_or_default();
                if let Some(type_hint) = type_hint.flatten() {
                    doc = doc.with_type_hint(type_hint);
                }
                Metadata::Return(doc)
            }
        };
        Ok(Value::Meta(meta))
    }

    /// A descriptor argument: a string, or `None` for unset.
    fn to_text(&self, value: Value<'a>, key: &str) -> Result<Option<String>> {
        match value {
            Value::Literal(Literal::Str(s)) => Ok(Some(s)),
            Value::Type(TypeExpr::NoneType) => Ok(None),
            _ => Err(self.error(format!("argument '{}' must be a string", key))),
        }
    }

    /// Interpret a value in type position.
    ///
    /// Strings are forward references and are evaluated in turn; `...` and
    /// `()` are only accepted inside a subscript.
    fn to_type(&self, value: Value<'a>, in_subscript: bool) -> Result<TypeExpr> {
        match value {
            Value::Type(t) => Ok(t),
            Value::Generic(origin) => Ok(TypeExpr::Named(origin)),
            Value::Literal(Literal::Str(text)) => {
                evaluate_within(&text, self.source, self.namespace, self.depth)
            }
            Value::Ellipsis if in_subscript => Ok(TypeExpr::Ellipsis),
            Value::EmptyTuple if in_subscript => Ok(TypeExpr::EmptyTuple),
            Value::Form(form @ Form::Literal) => Ok(TypeExpr::named(form.name())),
            Value::Form(form) => Err(self.error(format!("`{}` is not a type", form.name()))),
            Value::Meta(meta) => Err(self.error(format!("`{}` is not a type", meta))),
            Value::Literal(l) => Err(self.error(format!("`{}` is not a type", l))),
            Value::Module(_) => Err(self.error("a module is not a type")),
            Value::Ellipsis | Value::EmptyTuple => Err(self.error("`...` and `()` are only valid inside a subscript")),
        }
    }

    /// Interpret a value in envelope-extra position; never fails.
    fn to_metadata(&self, value: Value<'a>) -> Metadata {
        match value {
            Value::Meta(meta) => meta,
            Value::Literal(l) => Metadata::Other(l),
            Value::Type(t) => Metadata::Other(Literal::Repr(t.to_string())),
            Value::Generic(origin) => Metadata::Other(Literal::Repr(origin)),
            Value::Form(form) => Metadata::Other(Literal::Repr(form.name().to_string())),
            Value::Module(_) => Metadata::Other(Literal::Repr("<module>".to_string())),
            Value::Ellipsis => Metadata::Other(Literal::Repr("Ellipsis".to_string())),
            Value::EmptyTuple => Metadata::Other(Literal::Repr("()".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns() -> Namespace {
        Namespace::standard()
    }

    fn eval(text: &str) -> TypeExpr {
        evaluate(text, &ns()).unwrap()
    }

    #[test]
    fn plain_names() {
        assert_eq!(eval("str"), TypeExpr::named("str"));
        assert_eq!(eval("None"), TypeExpr::NoneType);
    }

    #[test]
    fn generics_render_canonically() {
        assert_eq!(eval("Optional[int]").to_string(), "typing.Optional[int]");
        assert_eq!(eval("typing.Dict[str, int]").to_string(), "typing.Dict[str, int]");
        assert_eq!(eval("tuple[str, ...]").to_string(), "tuple[str, ...]");
        assert_eq!(eval("tuple[()]").to_string(), "tuple[()]");
        assert_eq!(eval("Literal['a', 1]").to_string(), "typing.Literal['a', 1]");
    }

    #[test]
    fn annotated_with_descriptor() {
        let t = eval(r#"Annotated[str, P("blah", default="x", type_hint="Text")]"#);
        let (base, extras) = t.split_annotated();
        assert_eq!(base, &TypeExpr::named("str"));
        assert_eq!(
            extras,
            &[Metadata::Param(
                ParamDoc::new("blah").with_default("x").with_type_hint("Text")
            )]
        );
    }

    #[test]
    fn keyword_description_and_none() {
        let t = eval(r#"Annotated[int, R(description=None, type_hint="some_type")]"#);
        let (_, extras) = t.split_annotated();
        assert_eq!(extras, &[Metadata::Return(ReturnDoc::default().with_type_hint("some_type"))]);
    }

    #[test]
    fn opaque_extras_kept() {
        let t = eval(r#"Annotated[None, "not a docstring", 3]"#);
        let (base, extras) = t.split_annotated();
        assert_eq!(base, &TypeExpr::NoneType);
        assert_eq!(extras[0], Metadata::from("not a docstring"));
        assert_eq!(extras[1], Metadata::Other(Literal::Int(3)));
    }

    #[test]
    fn nested_forward_reference() {
        let t = eval(r#"tuple["str", 'Annotated[int, R("doc")]']"#);
        let elements = t.as_fixed_tuple().unwrap();
        assert_eq!(elements[0], TypeExpr::named("str"));
        assert!(matches!(elements[1], TypeExpr::Annotated(_)));
    }

    #[test]
    fn nested_annotated_flattens() {
        let t = eval(r#"Annotated[Annotated[int, P("1")], P("2")]"#);
        assert_eq!(t.split_annotated().1.len(), 2);
    }

    #[test]
    fn user_symbols() {
        let ns = ns()
            .with("Path", Symbol::Type(TypeExpr::named("pathlib.Path")))
            .with("MARKER", Symbol::Value(Literal::Repr("<marker>".into())));
        let t = evaluate("Annotated[Path, MARKER]", &ns).unwrap();
        assert_eq!(t.split_annotated().0.to_string(), "pathlib.Path");
    }

    #[test]
    fn unresolved_name() {
        let err = evaluate("Annotated[Foo, P('x')]", &ns()).unwrap_err();
        assert_eq!(
            err,
            DocError::UnresolvedName {
                name: "Foo".into(),
                annotation: "Annotated[Foo, P('x')]".into()
            }
        );
        let err = evaluate("typing.Nope", &ns()).unwrap_err();
        assert!(matches!(err, DocError::UnresolvedName { name, .. } if name == "Nope"));
    }

    #[test]
    fn bare_generic_origin() {
        assert_eq!(eval("tuple"), TypeExpr::named("tuple"));
        assert_eq!(eval("typing.List"), TypeExpr::named("typing.List"));
    }

    fn nested_lists(depth: usize) -> String {
        format!("{}int{}", "list[".repeat(depth), "]".repeat(depth))
    }

    #[test]
    fn nesting_is_capped() {
        assert!(evaluate(&nested_lists(MAX_DEPTH - 1), &ns()).is_ok());
        for depth in [MAX_DEPTH, 5000] {
            let err = evaluate(&nested_lists(depth), &ns()).unwrap_err();
            assert_eq!(
                err,
                DocError::invalid(&nested_lists(depth), "annotation nested too deeply")
            );
        }
    }

    #[test]
    fn forward_references_share_the_nesting_cap() {
        let half = MAX_DEPTH / 2;
        let inner = nested_lists(half);
        let text = format!("{}'{}'{}", "list[".repeat(half), inner, "]".repeat(half));
        let err = evaluate(&text, &ns()).unwrap_err();
        assert!(matches!(err, DocError::InvalidAnnotation { ref message, .. } if message.contains("too deeply")));
    }

    #[test]
    fn rejects_malformed() {
        for text in [
            "",
            "Annotated[int]",
            "str[",
            "str]",
            "P('x')",
            "P('a', 'b')",
            "Annotated[int, R(default='x')]",
            "Annotated[int, P(description='a', description='b')]",
            "Optional[int][str]",
            "str(1)",
            "...",
            "'x' 'y'",
            "str[int]",
            "typing.Any[int]",
            "Literal['a'][int]",
        ] {
            let err = evaluate(text, &ns()).unwrap_err();
            assert!(
                matches!(err, DocError::InvalidAnnotation { .. }),
                "{:?} gave {:?}",
                text,
                err
            );
        }
    }
}
