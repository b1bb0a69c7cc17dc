//! Python literal rendering for values substituted into launcher templates

use std::fmt::Write;
use std::path::PathBuf;

/// Rendered in place of the preload list when no libraries are preloaded
pub const NO_PRELOAD: &str = "None";

/// Render `value` as a Python string literal.
///
/// Quote selection follows the interpreter's `repr` of a `str`: single quotes
/// unless the text contains a single quote and no double quote. Control
/// characters and every whitespace character other than the space are
/// escaped the way `repr` escapes them. Other non-printable code points,
/// such as format characters, are emitted as-is.
pub fn python_literal(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() || (c.is_whitespace() && c != ' ') => {
                let code = c as u32;
                let _ = match code {
                    0..=0xff => write!(out, "\\x{:02x}", code),
                    0x100..=0xffff => write!(out, "\\u{:04x}", code),
                    _ => write!(out, "\\U{:08x}", code),
                };
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Render the preload list as the value of `LD_PRELOAD`.
///
/// Only base names are kept; the loader finds them through the native library
/// search path, which points at the link tree.
pub fn render_preload(libraries: &[PathBuf]) -> String {
    if libraries.is_empty() {
        return NO_PRELOAD.to_string();
    }

    let names: Vec<String> = libraries
        .iter()
        .map(|lib| {
            lib.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .collect();
    python_literal(&names.join(":"))
}
