//! JSON5-style rendering of field trees.
//!
//! Rendering is a pure projection of a tree value: the same tree always gives
//! byte-identical text. Containers are always laid out one child per line,
//! every sibling but the last gets a trailing comma, and comments become
//! trailing `//` line comments.
//!
//! # Example
//!
//! ```
//! use fieldquill::document::{Field, FieldTree};
//! use fieldquill::serializer::{render_document, RenderOptions};
//!
//! let tree = FieldTree::from_fields(vec![
//!     Field::string("x1", Some("name"), "hi"),
//!     Field::array("x2", Some("items"), vec![Field::number("x3", None, 5.0)]),
//! ]);
//!
//! let text = render_document(&tree, &RenderOptions::default());
//! assert_eq!(text, "{\n  \"name\":\"hi\",\n  \"items\":[\n    5\n  ]\n}");
//! ```

use crate::config::Config;
use crate::document::field::{Children, Field, FieldValue};
use crate::document::tree::FieldTree;
use std::fmt::Write;
use tracing::trace;

/// How a whole document is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per indentation level
    pub indent_size: usize,
    /// Wrap the top-level fields in an outer `{ }`
    pub wrap_document: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_size: 2,
            wrap_document: true,
        }
    }
}

impl From<&Config> for RenderOptions {
    fn from(config: &Config) -> Self {
        Self {
            indent_size: config.indent_size,
            wrap_document: config.wrap_document,
        }
    }
}

/// Renders a complete document.
///
/// With `wrap_document`, the top-level fields are rendered at level 1 inside
/// `{` and `}`; an empty tree gives `{}`. Without it, they are rendered at
/// level 0 with no delimiters.
pub fn render_document(tree: &FieldTree, options: &RenderOptions) -> String {
    trace!(fields = tree.field_count(), "rendering document");
    let unit = " ".repeat(options.indent_size);

    if !options.wrap_document {
        return render_fields(tree.get_fields(), &unit, 0);
    }
    if tree.is_empty() {
        return "{}".to_string();
    }
    format!("{{\n{}\n}}", render_fields(tree.get_fields(), &unit, 1))
}

/// Renders a sibling sequence, one field per line (containers span several),
/// joined with newlines and indented by `unit` repeated `level` times.
pub fn render_fields(fields: &Children, unit: &str, level: usize) -> String {
    let last = fields.len().saturating_sub(1);
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| render_field(field, unit, level, i != last))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_field(field: &Field, unit: &str, level: usize, needs_comma: bool) -> String {
    let indent = unit.repeat(level);
    let mut result = indent.clone();

    if let Some(key) = field.key() {
        push_quoted(&mut result, key);
        result.push(':');
    }

    match field.value() {
        FieldValue::Array(children) => {
            render_container(&mut result, children, ('[', ']'), unit, level, &indent);
        }
        FieldValue::Object(children) => {
            render_container(&mut result, children, ('{', '}'), unit, level, &indent);
        }
        FieldValue::String(s) => push_quoted(&mut result, s),
        scalar => result.push_str(&render_scalar(scalar)),
    }

    if needs_comma {
        result.push(',');
    }
    if let Some(comment) = field.comment().filter(|c| !c.is_empty()) {
        result.push_str("  //");
        push_comment(&mut result, comment);
    }
    result
}

fn render_container(
    result: &mut String,
    children: &Children,
    (open, close): (char, char),
    unit: &str,
    level: usize,
    indent: &str,
) {
    result.push(open);
    if !children.is_empty() {
        result.push('\n');
        result.push_str(&render_fields(children, unit, level + 1));
        result.push('\n');
        result.push_str(indent);
    }
    result.push(close);
}

/// Renders a scalar value as a literal. Containers render as empty brackets.
pub fn render_scalar(value: &FieldValue) -> String {
    match value {
        FieldValue::String(s) => {
            let mut out = String::with_capacity(s.len() + 2);
            push_quoted(&mut out, s);
            out
        }
        FieldValue::Number(n) => format_number(*n),
        FieldValue::Boolean(b) => b.to_string(),
        FieldValue::Array(_) => "[]".to_string(),
        FieldValue::Object(_) => "{}".to_string(),
    }
}

/// Formats a number without a fractional part when it has none. Non-finite
/// values use the JSON5 literals.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

/// Escapes a string for use inside double quotes.
pub fn escape_json_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    push_escaped(&mut out, s);
    out
}

fn push_quoted(out: &mut String, s: &str) {
    out.push('"');
    push_escaped(out, s);
    out.push('"');
}

// U+2028 and U+2029 are escaped too: JSON5 reads them as line terminators.
fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        let short = match c {
            '\\' => '\\',
            '"' => '"',
            '\n' => 'n',
            '\r' => 'r',
            '\t' => 't',
            '\x08' => 'b',
            '\x0C' => 'f',
            c if c.is_control() || c == '\u{2028}' || c == '\u{2029}' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
                continue;
            }
            c => {
                out.push(c);
                continue;
            }
        };
        out.push('\\');
        out.push(short);
    }
}

/// Characters that end a JSON5 line comment.
const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

// Each line of the comment becomes one space-separated word group, so the
// comment cannot spill onto the next line.
fn push_comment(out: &mut String, comment: &str) {
    for piece in comment.split(LINE_TERMINATORS).filter(|p| !p.is_empty()) {
        out.push(' ');
        out.push_str(piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(fields: Vec<Field>) -> String {
        render_fields(&fields.into_iter().collect(), "  ", 1)
    }

    #[test]
    fn test_scalar_rows() {
        let text = render(vec![
            Field::string("a", Some("s"), "x"),
            Field::number("b", Some("n"), 1.5),
            Field::boolean("c", Some("b"), false),
        ]);
        assert_eq!(text, "  \"s\":\"x\",\n  \"n\":1.5,\n  \"b\":false");
    }

    #[test]
    fn test_empty_string_value() {
        assert_eq!(render(vec![Field::string("a", Some("s"), "")]), "  \"s\":\"\"");
    }

    #[test]
    fn test_comment_after_comma() {
        let text = render(vec![
            Field::number("a", Some("a"), 1.0).with_comment("note"),
            Field::number("b", Some("b"), 2.0).with_comment("last"),
        ]);
        assert_eq!(text, "  \"a\":1,  // note\n  \"b\":2  // last");
    }

    #[test]
    fn test_comment_on_container_follows_closing_bracket() {
        let text = render(vec![Field::object(
            "o",
            Some("o"),
            vec![Field::boolean("t", Some("t"), true)],
        )
        .with_comment("settings")]);
        assert_eq!(text, "  \"o\":{\n    \"t\":true\n  }  // settings");
    }

    #[test]
    fn test_multiline_comment_is_folded() {
        let text = render(vec![Field::number("a", Some("a"), 1.0).with_comment("one\ntwo")]);
        assert_eq!(text, "  \"a\":1  // one two");
    }

    #[test]
    fn test_empty_containers() {
        let text = render(vec![
            Field::array("a", Some("list"), vec![]),
            Field::object("o", Some("map"), vec![]),
        ]);
        assert_eq!(text, "  \"list\":[],\n  \"map\":{}");
    }

    #[test]
    fn test_nested_array_of_objects() {
        let text = render(vec![Field::array(
            "a",
            Some("rows"),
            vec![Field::object(
                "r",
                None,
                vec![Field::number("i", Some("id"), 7.0)],
            )],
        )]);
        assert_eq!(
            text,
            "  \"rows\":[\n    {\n      \"id\":7\n    }\n  ]"
        );
    }

    #[test]
    fn test_keys_and_strings_are_escaped() {
        let text = render(vec![Field::string("a", Some("say \"hi\""), "line\nbreak")]);
        assert_eq!(text, "  \"say \\\"hi\\\"\":\"line\\nbreak\"");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render_document(&FieldTree::new(), &RenderOptions::default()), "{}");
    }

    #[test]
    fn test_unwrapped_document_starts_at_level_zero() {
        let tree = FieldTree::from_fields(vec![Field::number("a", Some("a"), 1.0)]);
        let options = RenderOptions {
            indent_size: 4,
            wrap_document: false,
        };
        assert_eq!(render_document(&tree, &options), "\"a\":1");
    }

    #[test]
    fn test_escape_control_characters() {
        assert_eq!(escape_json_string("\u{1}"), "\\u0001");
        assert_eq!(escape_json_string("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_comment_of_only_line_breaks_renders_bare_marker() {
        let text = render(vec![Field::boolean("a", Some("a"), true).with_comment("\r\n")]);
        assert_eq!(text, "  \"a\":true  //");
    }

    #[test]
    fn test_render_scalar_quotes_strings() {
        assert_eq!(render_scalar(&FieldValue::String("t\"x".into())), "\"t\\\"x\"");
        assert_eq!(render_scalar(&FieldValue::Boolean(true)), "true");
    }
}
