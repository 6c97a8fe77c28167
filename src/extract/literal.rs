//! Literal scanner for fully inlined descriptors
//!
//! Some bundles carry the whole descriptor as one quasi-JSON string handed to
//! `JSON.parse('…')`. Those candidates are already strict JSON if the bundle
//! is well formed, so they go straight to the parser; the nine-field order
//! check then separates descriptors from unrelated parsed blobs.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::descriptor::{fields_in_canonical_order, Descriptor};

// Non-greedy body match; nested single quotes inside the literal are a known
// limitation of the source pattern family.
static PARSE_CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)JSON\.parse\('(\{.*?\})'\)").unwrap());

/// Outcome of one literal scan over a module.
#[derive(Debug, Default)]
pub struct LiteralScan {
    /// Descriptors recovered from inline literals, in textual order.
    pub descriptors: Vec<Descriptor>,
    /// Candidates that claimed descriptor shape but failed strict parsing.
    pub malformed: usize,
}

pub struct LiteralScanner;

impl LiteralScanner {
    /// Scan a whole module's source for inline descriptor literals.
    ///
    /// Pure: no side effects beyond diagnostics. Candidates that fail strict
    /// parsing are logged and skipped (no retry, no partial result);
    /// candidates that parse but are not descriptor-shaped are silent
    /// non-matches.
    pub fn scan(source: &str) -> LiteralScan {
        let mut scan = LiteralScan::default();
        for capture in PARSE_CALL_REGEX.captures_iter(source) {
            let candidate = &capture[1];
            let value: Value = match serde_json::from_str(candidate) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping malformed inline literal");
                    scan.malformed += 1;
                    continue;
                }
            };
            let shaped = value
                .as_object()
                .map(fields_in_canonical_order)
                .unwrap_or(false);
            if !shaped {
                tracing::debug!("inline literal is not descriptor-shaped, ignoring");
                continue;
            }
            match Descriptor::from_value(value) {
                Ok(descriptor) => {
                    tracing::debug!(name = %descriptor.name, "recovered inline descriptor");
                    scan.descriptors.push(descriptor);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "descriptor-shaped literal failed conversion");
                    scan.malformed += 1;
                }
            }
        }
        scan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLETE: &str = r#"{"version":"1","name":"Foo","bytecode":"ab","codeHash":"cd","fieldsSig":{"names":[]},"eventsSig":[],"functions":[],"constants":[],"enums":[]}"#;

    #[test]
    fn test_complete_literal_accepted_verbatim() {
        let source = format!("x=JSON.parse('{}');", COMPLETE);
        let scan = LiteralScanner::scan(&source);
        assert_eq!(scan.descriptors.len(), 1);
        assert_eq!(scan.malformed, 0);
        let d = &scan.descriptors[0];
        assert_eq!(d.version, "1");
        assert_eq!(d.name, "Foo");
        assert_eq!(d.bytecode, "ab");
        assert_eq!(d.code_hash, "cd");
    }

    #[test]
    fn test_partial_literal_rejected() {
        // Required fields codeHash..enums absent: not a descriptor
        let source = r#"x=JSON.parse('{"version":"1","name":"Foo","bytecode":"ab"}');"#;
        let scan = LiteralScanner::scan(source);
        assert!(scan.descriptors.is_empty());
        assert_eq!(scan.malformed, 0);
    }

    #[test]
    fn test_malformed_literal_counted_and_skipped() {
        let source = r#"x=JSON.parse('{"version":}');"#;
        let scan = LiteralScanner::scan(source);
        assert!(scan.descriptors.is_empty());
        assert_eq!(scan.malformed, 1);
    }

    #[test]
    fn test_scan_continues_past_malformed_candidate() {
        let source = format!(
            "a=JSON.parse('{{oops}}');b=JSON.parse('{}');",
            COMPLETE
        );
        let scan = LiteralScanner::scan(&source);
        assert_eq!(scan.descriptors.len(), 1);
        assert_eq!(scan.malformed, 1);
    }

    #[test]
    fn test_multiple_literals_in_textual_order() {
        let second = COMPLETE.replace("Foo", "Bar");
        let source = format!("JSON.parse('{}');JSON.parse('{}');", COMPLETE, second);
        let scan = LiteralScanner::scan(&source);
        assert_eq!(scan.descriptors.len(), 2);
        assert_eq!(scan.descriptors[0].name, "Foo");
        assert_eq!(scan.descriptors[1].name, "Bar");
    }

    #[test]
    fn test_double_quoted_argument_not_matched() {
        // The known bundler family emits single-quoted parse arguments only
        let source = format!(r#"x=JSON.parse("{}");"#, COMPLETE.replace('"', r#"\""#));
        let scan = LiteralScanner::scan(&source);
        assert!(scan.descriptors.is_empty());
    }
}
