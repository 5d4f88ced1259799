//! SNBT, the textual form of NBT.
//!
//! [`to_snbt`] produces the compact single-line form, [`to_snbt_pretty`] the
//! indented multi-line form, and [`from_snbt`] parses both back. The grammar
//! is reproduced character for character: suffix letters, the `[B;`/`[I;`
//! array prefixes and the key-quoting rule are wire compatible with existing
//! documents.

use std::fmt::Write;

use crate::{error::Result, Value, DEFAULT_DEPTH_LIMIT};

pub(crate) mod de;
pub(crate) mod parser;

/// Layout configuration for [`to_snbt_pretty_with`].
#[derive(Debug, Clone)]
pub struct PrettyConfig {
    /// Indentation level of the root value. Nested containers indent one
    /// more unit per level.
    pub indent_level: usize,
    /// One unit of indentation.
    pub indent: String,
    /// Inserted before each entry and before a closing bracket.
    pub line_break: String,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        PrettyConfig {
            indent_level: 0,
            indent: "    ".to_owned(),
            line_break: "\n".to_owned(),
        }
    }
}

/// Serialize a value to compact, single-line SNBT.
///
/// ```
/// use nbtser::{nbt, to_snbt};
///
/// let doc = nbt!({"a": 1, "b": "hi"});
/// assert_eq!(to_snbt(&doc), "{a:1,b:\"hi\"}");
/// ```
pub fn to_snbt(value: &Value) -> String {
    let mut out = String::new();
    write_compact(&mut out, value);
    out
}

/// Serialize a value to indented SNBT with the default layout: four-space
/// indentation and `\n` line breaks.
pub fn to_snbt_pretty(value: &Value) -> String {
    to_snbt_pretty_with(value, &PrettyConfig::default())
}

/// Serialize a value to indented SNBT.
///
/// Indentation text is re-materialized at every nesting level, so encoding
/// cost grows with depth; deeply nested documents encode measurably slower
/// than [`to_snbt`].
pub fn to_snbt_pretty_with(value: &Value, config: &PrettyConfig) -> String {
    let mut out = String::new();
    write_pretty(&mut out, value, config.indent_level, config);
    out
}

/// Parse an SNBT document into a value tree, with the default depth limit.
///
/// Any grammar violation aborts the parse with a syntax error carrying the
/// byte offset; nothing is recovered or skipped. Trailing non-whitespace
/// after the top-level value is an error.
pub fn from_snbt(input: &str) -> Result<Value> {
    from_snbt_with_limit(input, DEFAULT_DEPTH_LIMIT)
}

/// Parse an SNBT document, refusing to nest containers more than
/// `depth_limit` levels deep.
pub fn from_snbt_with_limit(input: &str, depth_limit: usize) -> Result<Value> {
    de::SnbtReader::new(input, depth_limit).read_document()
}

fn write_compact(out: &mut String, value: &Value) {
    match value {
        Value::Byte(v) => {
            out.push_str(itoa::Buffer::new().format(*v));
            out.push('b');
        }
        Value::Short(v) => {
            out.push_str(itoa::Buffer::new().format(*v));
            out.push('s');
        }
        Value::Int(v) => out.push_str(itoa::Buffer::new().format(*v)),
        Value::Long(v) => {
            out.push_str(itoa::Buffer::new().format(*v));
            out.push('l');
        }
        Value::Float(v) => {
            out.push_str(ryu::Buffer::new().format(*v));
            out.push('f');
        }
        Value::Double(v) => {
            out.push_str(ryu::Buffer::new().format(*v));
            out.push('d');
        }
        Value::String(v) => write_escaped_str(out, v),
        Value::ByteArray(xs) => {
            out.push_str("[B;");
            for (i, n) in xs.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(itoa::Buffer::new().format(*n));
                out.push('b');
            }
            out.push(']');
        }
        Value::IntArray(xs) => {
            out.push_str("[I;");
            for (i, n) in xs.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(itoa::Buffer::new().format(*n));
            }
            out.push(']');
        }
        Value::List(xs) => {
            out.push('[');
            for (i, v) in xs.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_compact(out, v);
            }
            out.push(']');
        }
        Value::Compound(m) => {
            out.push('{');
            for (i, (key, v)) in m.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_key(out, key);
                out.push(':');
                write_compact(out, v);
            }
            out.push('}');
        }
    }
}

fn write_pretty(out: &mut String, value: &Value, level: usize, config: &PrettyConfig) {
    match value {
        Value::Compound(m) if !m.is_empty() => {
            let tap = config.indent.repeat(level);
            out.push('{');
            for (i, (key, v)) in m.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&config.line_break);
                out.push_str(&tap);
                out.push_str(&config.indent);
                write_key(out, key);
                out.push_str(": ");
                write_pretty(out, v, level + 1, config);
            }
            out.push_str(&config.line_break);
            out.push_str(&tap);
            out.push('}');
        }
        Value::List(xs) if !xs.is_empty() => {
            let tap = config.indent.repeat(level);
            out.push('[');
            for (i, v) in xs.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&config.line_break);
                out.push_str(&tap);
                out.push_str(&config.indent);
                write_pretty(out, v, level + 1, config);
            }
            out.push_str(&config.line_break);
            out.push_str(&tap);
            out.push(']');
        }
        // Scalars and typed arrays have no pretty form.
        other => write_compact(out, other),
    }
}

/// Whether a compound key can be written without quotes.
///
/// This predicate is the single source of truth for the quoting boundary:
/// the parser ends a bare key or bare string at the first byte outside this
/// class.
pub(crate) fn is_bare_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(is_bare_byte)
}

pub(crate) fn is_bare_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'+' | b'-')
}

fn write_key(out: &mut String, key: &str) {
    if is_bare_key(key) {
        out.push_str(key);
    } else {
        write_escaped_str(out, key);
    }
}

/// JSON-style string escaping: short escapes for the usual control
/// characters, `\uXXXX` UTF-16 units for everything else outside printable
/// ASCII. Astral-plane characters become surrogate pairs.
pub(crate) fn write_escaped_str(out: &mut String, v: &str) {
    out.push('"');
    for c in v.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='\u{007e}' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units).iter() {
                    let _ = write!(out, "\\u{:04x}", unit);
                }
            }
        }
    }
    out.push('"');
}
