//! Signature matcher for the indirection form
//!
//! Detects object-literal declarations whose member names are the nine
//! descriptor fields in canonical order and whose member values are bare
//! variable references, e.g.
//! `{version:a,name:b,bytecode:c,codeHash:d,fieldsSig:e,eventsSig:f,functions:g,constants:h,enums:i}`.
//!
//! Order is the sole positive signal: any permutation, any missing field, or
//! any member value that is not a plain identifier voids the candidate.

use crate::descriptor::DESCRIPTOR_FIELDS;
use crate::extract::lexer::{Lexer, Spanned};

/// The nine identifier names bound to the descriptor fields, preserving
/// field-to-identifier correspondence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureBindings {
    pub idents: [String; 9],
}

impl SignatureBindings {
    /// Iterate `(field_name, identifier)` pairs in canonical order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        DESCRIPTOR_FIELDS
            .into_iter()
            .zip(self.idents.iter().map(String::as_str))
    }
}

pub struct SignatureMatcher;

impl SignatureMatcher {
    /// Find the first matching declaration in a scope, if any.
    pub fn find(scope_text: &str) -> Option<SignatureBindings> {
        Self::find_all(scope_text).into_iter().next()
    }

    /// Find every matching declaration in a scope, in textual order.
    ///
    /// Whether more than the first match is used is the orchestrator's
    /// policy, not this matcher's.
    pub fn find_all(scope_text: &str) -> Vec<SignatureBindings> {
        let tokens = Lexer::tokenize(scope_text);
        let mut found = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            if tokens[i].token.is_punct('{') {
                if let Some((bindings, next)) = match_at(&tokens, i + 1) {
                    found.push(bindings);
                    i = next;
                    continue;
                }
            }
            i += 1;
        }
        found
    }
}

/// Try to match the nine `field:ident` members starting right after a `{`.
/// Returns the bindings and the index just past the last consumed token.
fn match_at(tokens: &[Spanned<'_>], start: usize) -> Option<(SignatureBindings, usize)> {
    let mut idents: Vec<String> = Vec::with_capacity(9);
    let mut i = start;
    for (n, field) in DESCRIPTOR_FIELDS.into_iter().enumerate() {
        let key = tokens.get(i)?.token.as_ident()?;
        if key != field {
            return None;
        }
        if !tokens.get(i + 1)?.token.is_punct(':') {
            return None;
        }
        let value = tokens.get(i + 2)?.token.as_ident()?;
        i += 3;
        if n < 8 {
            if !tokens.get(i)?.token.is_punct(',') {
                return None;
            }
            i += 1;
        } else {
            // A bare reference is followed by the object close (or another
            // member); a call or member access is not a reference.
            match tokens.get(i).map(|s| s.token) {
                None => {}
                Some(t) if t.is_punct('}') || t.is_punct(',') => {}
                Some(_) => return None,
            }
        }
        idents.push(value.to_string());
    }
    let idents: [String; 9] = idents.try_into().ok()?;
    Some((SignatureBindings { idents }, i))
}
