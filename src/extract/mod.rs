//! Extraction primitives
//!
//! The two descriptor forms are detected by separate scanners: a regex-driven
//! literal scanner for fully inlined `JSON.parse('…')` strings, and a
//! token-driven signature matcher plus variable resolver for the indirection
//! form. Both accept a candidate only on the exact nine-field order.

pub mod lexer;
pub mod literal;
pub mod resolver;
pub mod signature;

pub use lexer::{Lexer, Spanned, Token};
pub use literal::{LiteralScan, LiteralScanner};
pub use resolver::VariableResolver;
pub use signature::{SignatureBindings, SignatureMatcher};
