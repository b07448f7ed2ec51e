//! Text-level rewriting of a page

use crate::synth::PageConfig;
use anyhow::{Context, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Comment that marks a page as already converted
pub const MARKER: &str = "// @pagecfg:generated";

pub const HEADER: &str = "// Editable content and styling tokens extracted from this page.";

/// Name of the binding inserted into converted pages
pub const CONFIG_BINDING: &str = "pageConfig";

pub fn is_converted(source: &str) -> bool {
    source.contains(MARKER)
}

/// Whether the page already binds `pageConfig` itself
pub fn declares_config(source: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(&format!(r"\b(?:const|let|var)\s+{}\b", CONFIG_BINDING)).expect("valid regex")
        })
        .is_match(source)
}

/// Renders the inserted block, ending with a blank line
pub fn render_block(config: &PageConfig) -> Result<String> {
    let json = serde_json::to_string_pretty(config).context("Failed to serialize page config")?;
    Ok(format!(
        "{}\n{}\nconst {} = {};\n\n",
        MARKER, HEADER, CONFIG_BINDING, json
    ))
}

/// Inserts the config block after the directive prologue
///
/// A byte order mark stays at the very start of the file.
pub fn insert_block(source: &str, block: &str) -> String {
    let (bom, body) = match source.strip_prefix(BOM) {
        Some(body) => (BOM, body),
        None => ("", source),
    };
    let split = prologue_end(body);
    let (prologue, mut rest) = body.split_at(split);

    let mut out = String::with_capacity(source.len() + block.len() + 1);
    out.push_str(bom);
    out.push_str(prologue);
    if !prologue.is_empty() && !prologue.ends_with('\n') {
        out.push('\n');
        rest = rest.trim_start_matches([' ', '\t']);
    }
    out.push_str(block);
    out.push_str(rest);
    out
}

const BOM: &str = "\u{feff}";

/// Byte offset just past the last leading directive, or 0
///
/// Directives are string-literal statements such as `'use client';` at the
/// very top of the file, optionally preceded by comments. When the rest of
/// the directive's line is blank or a comment the offset is past the line
/// break; when code follows a terminating `;` on the same line the offset is
/// just past the `;`. A string followed by anything else is an expression
/// and ends the prologue.
pub fn prologue_end(source: &str) -> usize {
    let bytes = source.as_bytes();
    let mut i = 0;
    let mut end = 0;

    loop {
        i = skip_trivia(bytes, i);
        let quote = match bytes.get(i) {
            Some(&q @ (b'\'' | b'"')) => q,
            _ => return end,
        };

        let mut j = i + 1;
        loop {
            match bytes.get(j) {
                None | Some(b'\n') => return end,
                Some(b'\\') => j += 2,
                Some(&b) if b == quote => break,
                Some(_) => j += 1,
            }
        }
        j += 1;

        j = skip_inline_space(bytes, j);
        let mut terminated = None;
        if bytes.get(j) == Some(&b';') {
            j += 1;
            terminated = Some(j);
        }
        j = skip_line_trailer(bytes, j);

        match bytes.get(j) {
            None => return bytes.len(),
            Some(b'\n') => {
                end = j + 1;
                i = end;
            }
            Some(b'\r') if bytes.get(j + 1) == Some(&b'\n') => {
                end = j + 2;
                i = end;
            }
            Some(_) => match terminated {
                Some(after) => {
                    end = after;
                    i = after;
                }
                None => return end,
            },
        }
    }
}

/// Skips spaces and comments up to the end of the current line
fn skip_line_trailer(bytes: &[u8], mut i: usize) -> usize {
    loop {
        i = skip_inline_space(bytes, i);
        match (bytes.get(i), bytes.get(i + 1)) {
            (Some(b'/'), Some(b'/')) => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                return i;
            }
            (Some(b'/'), Some(b'*')) => match bytes[i + 2..].windows(2).position(|w| w == b"*/") {
                Some(close) => i += close + 4,
                None => return bytes.len(),
            },
            _ => return i,
        }
    }
}

fn skip_inline_space(bytes: &[u8], mut i: usize) -> usize {
    while matches!(bytes.get(i), Some(b' ' | b'\t')) {
        i += 1;
    }
    i
}

fn skip_trivia(bytes: &[u8], mut i: usize) -> usize {
    loop {
        match bytes.get(i) {
            Some(b) if b.is_ascii_whitespace() => i += 1,
            Some(0xEF) if bytes[i..].starts_with(BOM.as_bytes()) => i += BOM.len(),
            Some(b'/') if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            Some(b'/') if bytes.get(i + 1) == Some(&b'*') => {
                match bytes[i + 2..].windows(2).position(|w| w == b"*/") {
                    Some(close) => i += close + 4,
                    None => return bytes.len(),
                }
            }
            _ => return i,
        }
    }
}
