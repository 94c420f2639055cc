//! Tokenizer for textual annotations.

use crate::error::{DocError, Result};
use regex::Regex;
use std::sync::LazyLock;

// Alternatives are tried left to right: triple-quoted strings before plain
// ones, floats before ints, `...` before `.`.
static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\s*(?:",
        r#"(?P<tstr>(?s:"""(?:[^\\]|\\.)*?"""|'''(?:[^\\]|\\.)*?'''))"#,
        r#"|(?P<str>"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*')"#,
        r"|(?P<name>[A-Za-z_][A-Za-z0-9_]*)",
        r"|(?P<float>-?[0-9]+\.[0-9]*(?:[eE][+-]?[0-9]+)?)",
        r"|(?P<int>-?[0-9]+)",
        r"|(?P<ellipsis>\.\.\.)",
        r"|(?P<punct>[\[\](),.=])",
        r")"
    ))
    .unwrap()
});

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Name(String),
    Str(String),
    Int(i64),
    Float(f64),
    Ellipsis,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Dot,
    Equals,
}

/// Split `text` into tokens.
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = text;

    loop {
        if rest.trim_start().is_empty() {
            return Ok(tokens);
        }
        let Some(caps) = RE_TOKEN.captures(rest) else {
            let near: String = rest.trim_start().chars().take(12).collect();
            return Err(DocError::invalid(text, format!("unexpected input near `{}`", near)));
        };

        let token = if let Some(m) = caps.name("tstr") {
            let s = m.as_str();
            Token::Str(unescape(&s[3..s.len() - 3]))
        } else if let Some(m) = caps.name("str") {
            let s = m.as_str();
            Token::Str(unescape(&s[1..s.len() - 1]))
        } else if let Some(m) = caps.name("name") {
            Token::Name(m.as_str().to_string())
        } else if let Some(m) = caps.name("float") {
            let value = m
                .as_str()
                .parse()
                .map_err(|_| DocError::invalid(text, format!("bad number `{}`", m.as_str())))?;
            Token::Float(value)
        } else if let Some(m) = caps.name("int") {
            let value = m
                .as_str()
                .parse()
                .map_err(|_| DocError::invalid(text, format!("bad number `{}`", m.as_str())))?;
            Token::Int(value)
        } else if caps.name("ellipsis").is_some() {
            Token::Ellipsis
        } else {
            match caps.name("punct").map(|m| m.as_str()) {
                Some("[") => Token::LBracket,
                Some("]") => Token::RBracket,
                Some("(") => Token::LParen,
                Some(")") => Token::RParen,
                Some(",") => Token::Comma,
                Some(".") => Token::Dot,
                _ => Token::Equals,
            }
        };

        tokens.push(token);
        rest = &rest[caps[0].len()..];
    }
}

/// Resolve backslash escapes inside a string literal body.
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            // line continuation
            Some('\n') => {}
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
