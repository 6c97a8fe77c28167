//! # Abiscope - Contract interface recovery for minified bundles
//!
//! dApp bundlers inline contract interface descriptors (ABI-shaped records)
//! into minified JavaScript in two non-standard forms. Abiscope recovers them
//! as valid structured data.
//!
//! Abiscope provides:
//! - A literal scanner for fully inlined `JSON.parse('…')` descriptor strings
//! - A signature matcher for object literals whose members are variable
//!   references, plus a scope-local variable resolver for the indirection
//! - A relaxed-text repairer that rewrites bundler object-literal syntax
//!   (unquoted keys, single quotes, `!0`/`!1`) into strict JSON
//! - An export sink that persists descriptors grouped by origin

pub mod descriptor;
pub mod scope;
pub mod extract;
pub mod repair;
pub mod pipeline;
pub mod export;
pub mod web;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use descriptor::{Descriptor, DESCRIPTOR_FIELDS};
pub use pipeline::{Extractor, MatchPolicy, ModuleScan, ScanStats};
pub use scope::{Scope, ScopeSplitter};

/// Result type alias for Abiscope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Abiscope operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed descriptor literal: {0}")]
    MalformedLiteral(String),

    #[error("Unresolved variable `{0}` in scope")]
    UnresolvedVariable(String),

    #[error("Repair failed for `{text}`: {source}")]
    Repair {
        text: String,
        source: serde_json::Error,
    },

    #[error("Fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
