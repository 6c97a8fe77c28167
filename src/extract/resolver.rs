//! Scope-local variable resolution
//!
//! Given an identifier bound by a signature match, finds the assignment that
//! supplies its value within the same scope slice and returns the raw
//! right-hand-side expression text. Resolution never looks outside the scope:
//! bundlers place a descriptor's supporting variables in the same declaration
//! block, and that locality is what makes the heuristic sound.

use crate::extract::lexer::{Lexer, Spanned, Token};

/// Resolves identifiers against one scope's text.
///
/// The scope is lexed once at construction and reused for every lookup, so
/// resolving all nine descriptor fields costs a single tokenization pass.
pub struct VariableResolver<'a> {
    text: &'a str,
    tokens: Vec<Spanned<'a>>,
}

impl<'a> VariableResolver<'a> {
    pub fn new(scope_text: &'a str) -> Self {
        Self {
            text: scope_text,
            tokens: Lexer::tokenize(scope_text),
        }
    }

    /// Find the first assignment `name = <expression>` in the scope and
    /// return the trimmed expression text.
    ///
    /// The expression extends to the first `,` or `;` at the assignment's
    /// own nesting depth. If the expression is itself an assignment chain
    /// (`name = other = value`), only the terminal value text is returned.
    /// `None` is the expected outcome for identifiers with no in-scope
    /// assignment; the caller treats it as a recovery failure for the
    /// candidate, not a fault.
    pub fn resolve(&self, name: &str) -> Option<&'a str> {
        let at = self.find_assignment(name)?;
        let rhs = &self.tokens[at + 2..];
        let rhs_start = self.tokens.get(at + 2)?.start;

        let mut depth = 0i32;
        let mut end = self.text.len();
        let mut last_chain_eq: Option<usize> = None;
        for spanned in rhs {
            match spanned.token {
                Token::Punct('{') | Token::Punct('[') | Token::Punct('(') => depth += 1,
                Token::Punct('}') | Token::Punct(']') | Token::Punct(')') => {
                    if depth == 0 {
                        // Exited the structure enclosing the assignment
                        end = spanned.start;
                        break;
                    }
                    depth -= 1;
                }
                Token::Punct(',') | Token::Punct(';') if depth == 0 => {
                    end = spanned.start;
                    break;
                }
                Token::Op("=") if depth == 0 => last_chain_eq = Some(spanned.end),
                _ => {}
            }
        }

        let start = match last_chain_eq {
            Some(chain_end) if chain_end < end => chain_end,
            _ => rhs_start,
        };
        let value = self.text[start..end].trim();
        (!value.is_empty()).then_some(value)
    }

    /// Index of the `name` token of the first plain assignment to `name`.
    /// Property stores (`obj.name = …`) are not assignments to `name`.
    fn find_assignment(&self, name: &str) -> Option<usize> {
        self.tokens.windows(2).enumerate().position(|(i, pair)| {
            pair[0].token.as_ident() == Some(name)
                && pair[1].token.is_op("=")
                && (i == 0 || !self.tokens[i - 1].token.is_punct('.'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve<'a>(scope: &'a str, name: &str) -> Option<&'a str> {
        VariableResolver::new(scope).resolve(name)
    }

    #[test]
    fn test_simple_assignment() {
        assert_eq!(resolve("a='1.0',b=2;", "a"), Some("'1.0'"));
        assert_eq!(resolve("a='1.0',b=2;", "b"), Some("2"));
    }

    #[test]
    fn test_structured_value_with_internal_commas() {
        let scope = "e={x:1,y:!0,z:[1,2]},f=3;";
        assert_eq!(resolve(scope, "e"), Some("{x:1,y:!0,z:[1,2]}"));
    }

    #[test]
    fn test_not_found_is_none() {
        assert_eq!(resolve("a=1,b=2;", "missing"), None);
    }

    #[test]
    fn test_chained_assignment_returns_terminal_value() {
        assert_eq!(resolve("a=b=5,c=6;", "a"), Some("5"));
    }

    #[test]
    fn test_property_store_is_not_a_declaration() {
        assert_eq!(resolve("o.k=1;", "k"), None);
        assert_eq!(resolve("o.k=1,k=2;", "k"), Some("2"));
    }

    #[test]
    fn test_equality_is_not_an_assignment() {
        assert_eq!(resolve("if(a===1){}", "a"), None);
        assert_eq!(resolve("a===1,a=[2];", "a"), Some("[2]"));
    }

    #[test]
    fn test_assignment_inside_string_ignored() {
        assert_eq!(resolve("s='a=1',b=2;", "a"), None);
    }

    #[test]
    fn test_terminates_at_enclosing_close() {
        // Scope slice cut mid-structure by the splitter
        assert_eq!(resolve("f(e=[1,2])", "e"), Some("[1,2]"));
    }

    #[test]
    fn test_unterminated_value_runs_to_scope_end() {
        assert_eq!(resolve("a=42", "a"), Some("42"));
    }

    #[test]
    fn test_first_assignment_wins() {
        assert_eq!(resolve("a=1,a=2;", "a"), Some("1"));
    }
}
