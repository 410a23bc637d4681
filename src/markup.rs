//! Markup checks for page files, run by `protogen check`.
//!
//! This is a tag scan, not an HTML parser. It keeps a stack of open elements
//! to find unclosed and stray tags, and flags two accessibility gaps:
//! images without `alt`, and inputs with an `id` that no `<label for>`
//! names. Comments and the bodies of `<script>` and `<style>` are skipped.
//!
//! Generated pages always pass. Findings come from imported content or hand
//! edits, so `check` reports them as warnings.

use std::collections::BTreeSet;
use std::fmt;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupIssue {
    UnclosedTag(String),
    StrayClosingTag(String),
    ImageWithoutAlt,
    /// Carries the input's `id`.
    InputWithoutLabel(String),
}

impl fmt::Display for MarkupIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkupIssue::UnclosedTag(tag) => write!(f, "unclosed <{tag}>"),
            MarkupIssue::StrayClosingTag(tag) => write!(f, "stray </{tag}>"),
            MarkupIssue::ImageWithoutAlt => f.write_str("<img> without alt"),
            MarkupIssue::InputWithoutLabel(id) => {
                write!(f, "<input id=\"{id}\"> has no matching <label for>")
            }
        }
    }
}

struct Tag<'a> {
    name: String,
    attrs: &'a str,
    closing: bool,
    self_closing: bool,
}

/// Scan one HTML document. Issues come back in document order, with
/// unclosed elements and unlabelled inputs last.
pub fn scan(html: &str) -> Vec<MarkupIssue> {
    let mut issues = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut label_targets = BTreeSet::new();
    let mut input_ids = Vec::new();

    let mut rest = html;
    while let Some(lt) = rest.find('<') {
        rest = &rest[lt..];
        if let Some(comment) = rest.strip_prefix("<!--") {
            rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
            continue;
        }
        let Some((tag, after)) = parse_tag(rest) else {
            rest = &rest[1..];
            continue;
        };
        rest = after;

        if tag.closing {
            if !VOID_ELEMENTS.contains(&tag.name.as_str()) {
                close(&mut open, &tag.name, &mut issues);
            }
            continue;
        }

        match tag.name.as_str() {
            "img" if attr(tag.attrs, "alt").is_none() => {
                issues.push(MarkupIssue::ImageWithoutAlt);
            }
            "input" if attr(tag.attrs, "aria-label").is_none() => {
                if let Some(id) = attr(tag.attrs, "id") {
                    input_ids.push(id.to_string());
                }
            }
            "label" => {
                if let Some(target) = attr(tag.attrs, "for") {
                    label_targets.insert(target.to_string());
                }
            }
            _ => {}
        }

        if tag.self_closing || VOID_ELEMENTS.contains(&tag.name.as_str()) {
            continue;
        }
        if RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) {
            let end = format!("</{}", tag.name);
            rest = match rest.to_ascii_lowercase().find(&end) {
                Some(at) => &rest[at..],
                None => "",
            };
        }
        open.push(tag.name);
    }

    issues.extend(open.into_iter().map(MarkupIssue::UnclosedTag));
    issues.extend(
        input_ids
            .into_iter()
            .filter(|id| !label_targets.contains(id))
            .map(MarkupIssue::InputWithoutLabel),
    );
    issues
}

/// Pop back to the matching open element. Anything opened after it was
/// never closed.
fn close(open: &mut Vec<String>, name: &str, issues: &mut Vec<MarkupIssue>) {
    match open.iter().rposition(|n| n == name) {
        Some(at) => {
            issues.extend(open.drain(at + 1..).map(MarkupIssue::UnclosedTag));
            open.pop();
        }
        None => issues.push(MarkupIssue::StrayClosingTag(name.to_string())),
    }
}

/// Parse the tag at the start of `s` (which begins with `<`). `None` for
/// doctypes, processing instructions and a bare `<` in text.
fn parse_tag(s: &str) -> Option<(Tag<'_>, &str)> {
    let body = &s[1..];
    let (closing, body) = match body.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    if !body.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let name_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(body.len());
    let end = name_len + tag_end(&body[name_len..])?;
    let attrs = body[name_len..end].trim();
    let tag = Tag {
        name: body[..name_len].to_ascii_lowercase(),
        attrs,
        closing,
        self_closing: attrs.ends_with('/'),
    };
    Some((tag, &body[end + 1..]))
}

/// Offset of the `>` ending a tag, ignoring any inside quoted values.
fn tag_end(s: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, '>') => return Some(i),
            _ => {}
        }
    }
    None
}

/// Value of attribute `name`. A bare attribute yields `Some("")`.
fn attr<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    let mut rest = attrs;
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if rest.is_empty() {
            return None;
        }
        let key_len = rest
            .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
            .unwrap_or(rest.len());
        let key = &rest[..key_len];
        rest = rest[key_len..].trim_start();

        let mut value = "";
        if let Some(v) = rest.strip_prefix('=') {
            let v = v.trim_start();
            (value, rest) = match v.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let inner = &v[1..];
                    let close = inner.find(q).unwrap_or(inner.len());
                    (&inner[..close], inner.get(close + 1..).unwrap_or(""))
                }
                _ => {
                    let end = v.find(char::is_whitespace).unwrap_or(v.len());
                    (&v[..end], &v[end..])
                }
            };
        }
        if key.eq_ignore_ascii_case(name) {
            return Some(value);
        }
    }
}
