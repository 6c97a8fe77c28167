//! Token scanner for minified bundle text
//!
//! Signature matching and variable resolution work over this token stream
//! instead of monolithic regular expressions, so string contents, comments,
//! and nesting cannot fool them. This is not a full host-language tokenizer:
//! regex literals are not disambiguated from division, which is adequate for
//! the declaration blocks the known bundler family emits.

/// A single lexed token. String tokens are opaque: their raw slice includes
/// the surrounding quotes and escapes are not interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Ident(&'a str),
    Str(&'a str),
    Num(&'a str),
    Op(&'a str),
    Punct(char),
}

impl<'a> Token<'a> {
    pub fn as_ident(&self) -> Option<&'a str> {
        match *self {
            Token::Ident(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_punct(&self, c: char) -> bool {
        matches!(self, Token::Punct(p) if *p == c)
    }

    pub fn is_op(&self, op: &str) -> bool {
        matches!(self, Token::Op(o) if *o == op)
    }
}

/// A token plus its byte span in the source it was lexed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned<'a> {
    pub token: Token<'a>,
    pub start: usize,
    pub end: usize,
}

/// Multi-character operators, longest first so `===` never lexes as `==` `=`.
const OPERATORS: [&str; 22] = [
    "===", "!==", ">>>", "**=", "==", "!=", "<=", ">=", "=>", "&&", "||", "??", "++", "--", "+=",
    "-=", "*=", "/=", "%=", "&=", "|=", "^=",
];

const OPERATOR_CHARS: &str = "=!<>&|+-*/%^~?";
const PUNCT_CHARS: &str = "{}[]():;,.";

pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Lex the entire input into a vector.
    pub fn tokenize(src: &'a str) -> Vec<Spanned<'a>> {
        Lexer::new(src).collect()
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_trivia(&mut self) {
        loop {
            let rest = &self.src[self.pos..];
            let Some(c) = rest.chars().next() else {
                return;
            };
            if c.is_whitespace() {
                self.pos += c.len_utf8();
            } else if rest.starts_with("//") {
                match rest.find('\n') {
                    Some(nl) => self.pos += nl + 1,
                    None => self.pos = self.src.len(),
                }
            } else if rest.starts_with("/*") {
                match rest[2..].find("*/") {
                    Some(close) => self.pos += 2 + close + 2,
                    None => self.pos = self.src.len(),
                }
            } else {
                return;
            }
        }
    }

    fn lex_string(&mut self, quote: char) -> usize {
        // Caller sits on the opening quote. Unterminated strings run to EOF.
        let mut chars = self.src[self.pos..].char_indices().skip(1);
        while let Some((i, c)) = chars.next() {
            if c == '\\' {
                chars.next();
            } else if c == quote {
                return self.pos + i + c.len_utf8();
            }
        }
        self.src.len()
    }

    fn lex_while(&mut self, start: usize, pred: impl Fn(char) -> bool) -> usize {
        let mut end = start;
        for (i, c) in self.src[start..].char_indices() {
            if pred(c) {
                end = start + i + c.len_utf8();
            } else {
                break;
            }
        }
        end
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Spanned<'a>;

    fn next(&mut self) -> Option<Spanned<'a>> {
        self.skip_trivia();
        let start = self.pos;
        let c = self.peek()?;

        let (token, end) = if c == '\'' || c == '"' || c == '`' {
            let end = self.lex_string(c);
            (Token::Str(&self.src[start..end]), end)
        } else if is_ident_start(c) {
            let end = self.lex_while(start, is_ident_continue);
            (Token::Ident(&self.src[start..end]), end)
        } else if c.is_ascii_digit() {
            // Covers hex/exponent forms loosely; sign characters stay operators
            let end = self.lex_while(start, |c| c.is_ascii_alphanumeric() || c == '.');
            (Token::Num(&self.src[start..end]), end)
        } else if PUNCT_CHARS.contains(c) {
            (Token::Punct(c), start + c.len_utf8())
        } else if OPERATOR_CHARS.contains(c) {
            let rest = &self.src[start..];
            match OPERATORS.iter().find(|op| rest.starts_with(**op)) {
                Some(op) => (Token::Op(&rest[..op.len()]), start + op.len()),
                None => (Token::Op(&rest[..c.len_utf8()]), start + c.len_utf8()),
            }
        } else {
            (Token::Punct(c), start + c.len_utf8())
        };

        self.pos = end;
        Some(Spanned { token, start, end })
    }
}
