//! Relaxed text repair
//!
//! Bundlers emit descriptor components in the host object-literal syntax:
//! unquoted identifier keys, single-quoted strings, `!0`/`!1` boolean
//! shorthand, naive backslash handling. This module rewrites such text into
//! strict JSON and parses it, or fails with [`Error::Repair`].
//!
//! The rewrite is a single quote-aware pass: it tracks whether the scanner is
//! inside a string region, so apostrophes and `!0` sequences inside string
//! content survive untouched. Backslashes inside strings are doubled unless
//! they escape the string's own delimiter, preserving the legacy behavior the
//! downstream tooling expects for the inputs this family of bundlers
//! produces.

use crate::{Error, Result};
use serde_json::Value;

/// Repair relaxed object-literal text and parse it as JSON.
///
/// No partial structure is returned on failure; repair is attempted exactly
/// once per input.
pub fn repair(text: &str) -> Result<Value> {
    let repaired = rewrite(text);
    serde_json::from_str(&repaired).map_err(|source| Error::Repair {
        text: text.to_string(),
        source,
    })
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Rewrite relaxed text into strict JSON text. Infallible: whether the
/// result actually parses is the caller's problem.
fn rewrite(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\'' | '"' => {
                i = copy_string(&chars, i, &mut out);
            }
            '!' if chars.get(i + 1).copied() == Some('0') => {
                out.push_str("true");
                i += 2;
            }
            '!' if chars.get(i + 1).copied() == Some('1') => {
                out.push_str("false");
                i += 2;
            }
            c if is_ident_start(c) => {
                let mut j = i + 1;
                while j < chars.len() && is_ident_continue(chars[j]) {
                    j += 1;
                }
                // Only identifiers in key position get quoted
                let mut k = j;
                while k < chars.len() && chars[k].is_whitespace() {
                    k += 1;
                }
                let ident: String = chars[i..j].iter().collect();
                if chars.get(k) == Some(&':') {
                    out.push('"');
                    out.push_str(&ident);
                    out.push('"');
                } else {
                    out.push_str(&ident);
                }
                i = j;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Copy one string literal starting at the opening quote, emitting a strict
/// double-quoted JSON string. Returns the index just past the closing quote.
fn copy_string(chars: &[char], start: usize, out: &mut String) -> usize {
    let quote = chars[start];
    out.push('"');
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => match chars.get(i + 1).copied() {
                Some(c) if c == quote => {
                    // Escaped delimiter: emit the character itself
                    if c == '"' {
                        out.push_str("\\\"");
                    } else {
                        out.push(c);
                    }
                    i += 2;
                }
                Some('\\') => {
                    out.push_str("\\\\\\\\");
                    i += 2;
                }
                Some('"') => {
                    out.push_str("\\\"");
                    i += 2;
                }
                Some('\'') => {
                    out.push('\'');
                    i += 2;
                }
                Some(c) => {
                    out.push_str("\\\\");
                    out.push(c);
                    i += 2;
                }
                None => {
                    out.push_str("\\\\");
                    i += 1;
                }
            },
            c if c == quote => {
                out.push('"');
                return i + 1;
            }
            '"' => {
                out.push_str("\\\"");
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    // Unterminated string: close it and let the parser complain
    out.push('"');
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_boolean_shorthand() {
        assert_eq!(repair("[!0,!1]").unwrap(), json!([true, false]));
    }

    #[test]
    fn test_unquoted_keys_and_single_quotes() {
        assert_eq!(
            repair("{x:1,y:!0,name:'Foo'}").unwrap(),
            json!({"x": 1, "y": true, "name": "Foo"})
        );
    }

    #[test]
    fn test_nested_structures() {
        let value = repair("{names:['a','b'],types:[{kind:'U256',mut:!1}]}").unwrap();
        assert_eq!(
            value,
            json!({"names": ["a", "b"], "types": [{"kind": "U256", "mut": false}]})
        );
    }

    #[test]
    fn test_apostrophe_inside_string_survives() {
        assert_eq!(
            repair(r"{msg:'it\'s fine'}").unwrap(),
            json!({"msg": "it's fine"})
        );
    }

    #[test]
    fn test_double_quote_inside_single_quoted_string() {
        assert_eq!(
            repair(r#"{q:'say "hi"'}"#).unwrap(),
            json!({"q": "say \"hi\""})
        );
    }

    #[test]
    fn test_shorthand_inside_string_untouched() {
        assert_eq!(repair("{s:'!0'}").unwrap(), json!({"s": "!0"}));
    }

    #[test]
    fn test_key_like_text_inside_string_untouched() {
        assert_eq!(repair("{s:'a: b'}").unwrap(), json!({"s": "a: b"}));
    }

    #[test]
    fn test_backslash_doubling_preserved() {
        // Legacy behavior: a lone backslash in source text denotes a literal
        // backslash in the recovered value
        assert_eq!(repair(r"{p:'a\b'}").unwrap(), json!({"p": "a\\b"}));
    }

    #[test]
    fn test_already_quoted_keys_pass_through() {
        assert_eq!(
            repair(r#"{"k":1,v:'x'}"#).unwrap(),
            json!({"k": 1, "v": "x"})
        );
    }

    #[test]
    fn test_literal_true_false_null_values() {
        assert_eq!(
            repair("{a:true,b:false,c:null}").unwrap(),
            json!({"a": true, "b": false, "c": null})
        );
    }

    #[test]
    fn test_bare_identifier_value_fails() {
        assert!(matches!(
            repair("{a:someVar}"),
            Err(Error::Repair { .. })
        ));
    }

    #[test]
    fn test_empty_member_fails() {
        let err = repair("{a:}").unwrap_err();
        match err {
            Error::Repair { text, .. } => assert_eq!(text, "{a:}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_round_trip_through_relaxed_rendering() {
        // Render a strict value into the bundler's quasi-syntax, then repair
        fn relax(value: &Value) -> String {
            match value {
                Value::Bool(true) => "!0".to_string(),
                Value::Bool(false) => "!1".to_string(),
                Value::String(s) => format!("'{}'", s),
                Value::Array(items) => {
                    let inner: Vec<String> = items.iter().map(relax).collect();
                    format!("[{}]", inner.join(","))
                }
                Value::Object(map) => {
                    let inner: Vec<String> = map
                        .iter()
                        .map(|(k, v)| format!("{}:{}", k, relax(v)))
                        .collect();
                    format!("{{{}}}", inner.join(","))
                }
                other => other.to_string(),
            }
        }

        let original = json!({
            "names": ["owner", "balance"],
            "types": ["Address", "U256"],
            "isMutable": [true, false],
            "nested": {"depth": 2, "flags": [false]}
        });
        assert_eq!(repair(&relax(&original)).unwrap(), original);
    }
}
