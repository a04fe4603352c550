//! Multi-strategy repair parsing for loosely-structured model output.
//!
//! The strategy chain is strictly ordered and stops at the first parse
//! success. The ordering is load-bearing for callers and tests — do not
//! reorder it:
//!
//! 1. fenced block (optionally tagged) → inner content
//! 2. else boundary extraction from the first `{`/`[` to the last `}`/`]`
//! 3. else the trimmed text if it starts with `{`/`[`, otherwise the raw text
//! 4. direct parse
//! 5. on failure: escape raw newlines/tabs/control characters inside
//!    string literals, re-parse
//! 6. on failure: strip trailing commas, strip a leading BOM, trim, re-parse
//! 7. on failure: trim a trailing comma and append the matching closer
//!    when the text opens with a bracket but does not end with one,
//!    re-parse
//!
//! Boundary extraction is a simple first-open/last-close substring, not
//! a real bracket matcher. When prose containing a bracket follows the
//! JSON, the extraction over-extends and the parse fails. That is the
//! documented contract: fail rather than guess.

use coursekit_core::{CourseError, Result};
use regex::Regex;
use serde_json::Value;

/// Parse model output into a JSON value, repairing common damage.
pub fn parse_structured(raw: &str) -> Result<Value> {
    let extracted = extract_candidate(raw);

    if let Ok(value) = serde_json::from_str(&extracted) {
        return Ok(value);
    }

    let normalized = normalize_string_literals(&extracted);
    if let Ok(value) = serde_json::from_str(&normalized) {
        return Ok(value);
    }

    let cleaned = cleanup(&normalized);
    if let Ok(value) = serde_json::from_str(&cleaned) {
        return Ok(value);
    }

    let closed = close_partial(&cleaned);
    match serde_json::from_str(&closed) {
        Ok(value) => Ok(value),
        Err(error) => Err(CourseError::Parse {
            message: error.to_string(),
            raw: raw.to_string(),
            extracted,
            preview: preview(raw),
        }),
    }
}

/// Short diagnostic preview: first ~200 characters, whitespace collapsed.
pub fn preview(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(200).collect()
}

fn extract_candidate(raw: &str) -> String {
    if let Some(inner) = extract_fenced_block(raw) {
        return inner;
    }
    if let Some(region) = extract_bracket_region(raw) {
        return region;
    }
    let trimmed = raw.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        trimmed.to_string()
    } else {
        raw.to_string()
    }
}

/// Inner content of the first fenced block, tag (```json etc.) skipped.
fn extract_fenced_block(raw: &str) -> Option<String> {
    let start = raw.find("```")?;
    let rest = &raw[start + 3..];
    let tag_len = rest.chars().take_while(|c| c.is_ascii_alphanumeric()).count();
    let rest = &rest[tag_len..];
    let end = rest.find("```")?;
    Some(rest[..end].trim().to_string())
}

/// First `{`/`[` through the last `}`/`]`. Not a bracket matcher: a
/// bracket inside trailing prose extends the region past the JSON.
fn extract_bracket_region(raw: &str) -> Option<String> {
    let start = raw.find(['{', '['])?;
    let end = raw.rfind(['}', ']'])?;
    if end > start { Some(raw[start..=end].to_string()) } else { None }
}

/// Escape raw newlines, tabs, and other control characters that appear
/// inside string literals. Models regularly emit real line breaks in
/// multi-line answer text.
fn normalize_string_literals(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for ch in text.chars() {
        if !in_string {
            if ch == '"' {
                in_string = true;
            }
            out.push(ch);
            continue;
        }
        if escaped {
            out.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' => {
                out.push(ch);
                escaped = true;
            }
            '"' => {
                out.push(ch);
                in_string = false;
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }

    out
}

/// Strip trailing commas before closers, a leading BOM, and outer
/// whitespace.
fn cleanup(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text).trim();
    let trailing_comma = Regex::new(r",\s*([}\]])").unwrap();
    trailing_comma.replace_all(text, "$1").into_owned()
}

/// Append the matching closer to output truncated mid-object/mid-array.
/// Output cut off at a token limit routinely ends on a comma, so a
/// trailing comma is trimmed first; the step-6 regex cannot catch it
/// because the closer does not exist yet.
fn close_partial(text: &str) -> String {
    let mut trimmed = text.trim_end();
    if let Some(stripped) = trimmed.strip_suffix(',') {
        trimmed = stripped.trim_end();
    }
    if trimmed.starts_with('{') && !trimmed.ends_with('}') {
        format!("{trimmed}}}")
    } else if trimmed.starts_with('[') && !trimmed.ends_with(']') {
        format!("{trimmed}]")
    } else {
        trimmed.to_string()
    }
}
