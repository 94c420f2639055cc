//! Docstring cleanup and summary/body split.

const TAB_WIDTH: usize = 8;

/// Normalize a docstring's indentation.
///
/// Tabs expand to 8 columns. The first line loses its leading whitespace;
/// the indentation common to every other non-blank line is removed from
/// those lines. Leading and trailing blank lines are dropped.
pub fn cleandoc(doc: &str) -> String {
    let expanded = expand_tabs(doc);
    let lines: Vec<&str> = expanded.split('\n').collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, l)| {
            if i == 0 {
                l.trim_start()
            } else {
                l.get(margin..).unwrap_or_else(|| l.trim_start())
            }
        })
        .collect();

    while cleaned.last().is_some_and(|l| l.trim().is_empty()) {
        cleaned.pop();
    }
    let start = cleaned
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(cleaned.len());

    cleaned[start..].join("\n")
}

/// Split a cleaned docstring at its first blank line.
///
/// Returns the summary and, when present, the remaining body with its
/// leading blank lines removed.
pub fn split_summary(cleaned: &str) -> (String, Option<String>) {
    let lines: Vec<&str> = cleaned.split('\n').collect();
    let Some(blank) = lines.iter().position(|l| l.trim().is_empty()) else {
        return (cleaned.to_string(), None);
    };

    let summary = lines[..blank].join("\n");
    let body_start = lines[blank..]
        .iter()
        .position(|l| !l.trim().is_empty())
        .map(|offset| blank + offset);
    let body = body_start.map(|start| lines[start..].join("\n"));
    (summary, body)
}

/// Indent every non-blank line of `text` by `prefix`.
pub fn indent(text: &str, prefix: &str) -> String {
    text.split('\n')
        .map(|l| {
            if l.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, l)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn expand_tabs(text: &str) -> String {
    if !text.contains('\t') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = TAB_WIDTH - column % TAB_WIDTH;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\n' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}
