//! Web collaborators: page fetch and script URL discovery
//!
//! The extraction core never performs I/O; it only ever receives already
//! fetched module text. These helpers are the thin glue the CLI uses to
//! obtain `(module source, origin)` pairs from a live page.

pub mod discover;
pub mod fetch;

pub use discover::{discover_script_urls, DEFAULT_SCRIPT_FILTERS};
pub use fetch::fetch_text;
