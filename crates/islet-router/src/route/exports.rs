/// Best-effort reading of route module source text
///
/// No JavaScript parser is involved. Handler verbs and the `metadata`
/// object are found with text patterns; anything the heuristics cannot
/// read is reported as absent, never as an error that stops a scan.

use super::HttpMethod;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// `export const GET =`, `export async function POST(`, `export let PUT:` ...
static VERB_DECLARATIONS: Lazy<Vec<(HttpMethod, Regex)>> = Lazy::new(|| {
    HttpMethod::ALL
        .into_iter()
        .map(|method| {
            let pattern = format!(
                r"(?i)export\s+(?:const|let|var|async\s+function|function)\s+{}\s*[=:(]",
                method.as_str()
            );
            (method, Regex::new(&pattern).expect("verb pattern compiles"))
        })
        .collect()
});

/// `export { GET, handler as POST }`
static EXPORT_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"export\s*\{([^}]*)\}").expect("export list pattern compiles"));

static METADATA_BINDING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"export\s+(?:const|let|var)\s+metadata\s*(?::\s*[\w.<>\[\], ]+?\s*)?=\s*\{")
        .expect("metadata pattern compiles")
});

/// HTTP verbs the module exports handlers for, in [`HttpMethod::ALL`] order
///
/// # Examples
///
/// ```
/// use islet_router::route::exports::exported_methods;
/// use islet_router::route::HttpMethod;
///
/// let source = "export const GET = () => {};\nexport async function POST(req) {}";
/// assert_eq!(exported_methods(source), vec![HttpMethod::Get, HttpMethod::Post]);
/// ```
pub fn exported_methods(source: &str) -> Vec<HttpMethod> {
    let listed = export_list_names(source);

    HttpMethod::ALL
        .into_iter()
        .filter(|method| {
            let declared = VERB_DECLARATIONS
                .iter()
                .any(|(m, re)| m == method && re.is_match(source));
            declared
                || listed
                    .iter()
                    .any(|name| name.eq_ignore_ascii_case(method.as_str()))
        })
        .collect()
}

/// Public names from every `export { a, b as c }` clause
fn export_list_names(source: &str) -> Vec<String> {
    EXPORT_LIST
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .flat_map(|body| {
            body.as_str()
                .split(',')
                .filter_map(|item| {
                    let item = item.trim();
                    let public = match item.split_once(" as ") {
                        Some((_, alias)) => alias.trim(),
                        None => item,
                    };
                    (!public.is_empty()).then(|| public.to_string())
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Extracts the object literal bound to an exported `metadata`
///
/// Returns `Ok(None)` when there is no such export and `Err` with a reason
/// when there is one but it is not plain data (spread, identifiers,
/// template interpolation, shorthand properties ...).
pub fn extract_metadata(source: &str) -> Result<Option<Map<String, Value>>, String> {
    let Some(found) = METADATA_BINDING.find(source) else {
        return Ok(None);
    };
    // the match ends right after the opening brace
    let open = found.end() - 1;
    let literal = object_literal(&source[open..])
        .ok_or_else(|| "unterminated metadata object".to_string())?;
    let json = js_object_to_json(literal).ok_or_else(|| "unsupported syntax".to_string())?;
    serde_json::from_str::<Map<String, Value>>(&json)
        .map(Some)
        .map_err(|err| err.to_string())
}

/// Slice from the opening `{` to its matching `}`, skipping strings and comments
fn object_literal(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' | b'`' => i = skip_string(bytes, i)?,
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = find_block_end(bytes, i)?;
            }
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=i]);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index of the closing quote of the string starting at `start`
fn skip_string(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b if b == quote => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index of the `/` closing a block comment starting at `start`
fn find_block_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 2;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return Some(i + 1);
        }
        i += 1;
    }
    None
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Rewrites a JS object literal made of plain data into JSON text
///
/// Handles bare and single-quoted keys, single-quoted and
/// interpolation-free template strings, comments, trailing commas and
/// `undefined`. Anything else is passed through for serde_json to reject.
fn js_object_to_json(literal: &str) -> Option<String> {
    let chars: Vec<char> = literal.chars().collect();
    let mut out = String::with_capacity(literal.len() + 16);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' | '\'' | '`' => {
                let mut value = String::new();
                i += 1;
                loop {
                    let ch = *chars.get(i)?;
                    if ch == c {
                        break;
                    }
                    if ch == '\\' {
                        let next = *chars.get(i + 1)?;
                        match next {
                            '\'' | '`' => value.push(next),
                            _ => {
                                value.push('\\');
                                value.push(next);
                            }
                        }
                        i += 2;
                        continue;
                    }
                    if c == '`' && ch == '$' && chars.get(i + 1) == Some(&'{') {
                        return None;
                    }
                    match ch {
                        '"' => value.push_str("\\\""),
                        '\n' => value.push_str("\\n"),
                        _ => value.push(ch),
                    }
                    i += 1;
                }
                out.push('"');
                out.push_str(&value);
                out.push('"');
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
                continue;
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                while i + 1 < chars.len() && !(chars[i] == '*' && chars[i + 1] == '/') {
                    i += 1;
                }
                i += 1;
            }
            '}' | ']' => {
                let trimmed = out.trim_end().len();
                out.truncate(trimmed);
                if out.ends_with(',') {
                    out.pop();
                }
                out.push(c);
            }
            c if is_ident_char(c) => {
                let start = i;
                while i < chars.len() && is_ident_char(chars[i]) {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                let next = chars[i..].iter().find(|ch| !ch.is_whitespace());
                let prev = out.trim_end().chars().last();
                if next == Some(&':') && matches!(prev, Some('{') | Some(',')) {
                    out.push('"');
                    out.push_str(&word);
                    out.push('"');
                } else if word == "undefined" {
                    out.push_str("null");
                } else {
                    out.push_str(&word);
                }
                continue;
            }
            _ => out.push(c),
        }
        i += 1;
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_methods_from_declarations() {
        let source = r#"
            export const GET = async (c) => c.json([]);
            export async function POST(c) { return c.json({}) }
            export function DELETE(c) {}
        "#;
        assert_eq!(
            exported_methods(source),
            vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete]
        );
    }

    #[test]
    fn test_methods_typed_binding() {
        let source = "export const PATCH: Handler = (c) => c.text('ok');";
        assert_eq!(exported_methods(source), vec![HttpMethod::Patch]);
    }

    #[test]
    fn test_methods_ignore_longer_names() {
        let source = "export const GETTER = 1;\nexport function getUsers() {}";
        assert!(exported_methods(source).is_empty());
    }

    #[test]
    fn test_methods_default_export_only() {
        let source = "export default function handler(c) { return c.text('hi') }";
        assert!(exported_methods(source).is_empty());
    }

    #[test]
    fn test_methods_from_export_list() {
        let source = "const list = () => {};\nexport { list as GET, PUT };";
        assert_eq!(
            exported_methods(source),
            vec![HttpMethod::Get, HttpMethod::Put]
        );
    }

    #[test]
    fn test_metadata_plain_object() {
        let source = r#"
            import { h } from 'preact';
            export const metadata = {
              title: 'About us',
              description: "Who we are",
              tags: ['team', 'company',],
              robots: { index: true, follow: false },
            };
            export default function About() {}
        "#;
        let meta = extract_metadata(source).unwrap().unwrap();
        assert_eq!(
            serde_json::Value::Object(meta),
            json!({
                "title": "About us",
                "description": "Who we are",
                "tags": ["team", "company"],
                "robots": { "index": true, "follow": false }
            })
        );
    }

    #[test]
    fn test_metadata_typed_with_comments_and_urls() {
        let source = r#"
            export const metadata: Metadata = {
              // shown in the tab
              title: `Docs`,
              canonical: 'https://example.com/docs', /* absolute */
            }
        "#;
        let meta = extract_metadata(source).unwrap().unwrap();
        assert_eq!(meta["title"], "Docs");
        assert_eq!(meta["canonical"], "https://example.com/docs");
    }

    #[test]
    fn test_metadata_absent() {
        assert_eq!(extract_metadata("export default function Page() {}"), Ok(None));
    }

    #[test]
    fn test_metadata_with_identifiers_is_unparsable() {
        let source = "export const metadata = { title: siteName, ...base };";
        assert!(extract_metadata(source).is_err());

        let source = "export const metadata = { title: `${siteName} | Home` };";
        assert!(extract_metadata(source).is_err());
    }
}
