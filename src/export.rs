//! Export sink for recovered descriptors
//!
//! The pipeline's contract with this module is exactly: deliver a complete
//! descriptor plus the origin to key it by. Destination naming, directory
//! layout, and the overwrite-on-collision policy live here, not in the core.

use std::path::PathBuf;

use url::Url;

use crate::descriptor::Descriptor;
use crate::Result;

/// Accepts `(descriptor, origin)` pairs and persists them somewhere.
pub trait DescriptorSink {
    /// Persist one descriptor, returning the destination path.
    fn export(&self, descriptor: &Descriptor, origin: &str) -> Result<PathBuf>;
}

/// Persists descriptors as indented JSON files, grouped per origin:
/// `<root>/<origin host>/<Name>.json`.
///
/// Two descriptors sharing a `name` under the same origin silently overwrite
/// one another; the pipeline does not deduplicate and no collision signal is
/// raised.
#[derive(Debug, Clone)]
pub struct JsonDirExporter {
    root: PathBuf,
}

impl JsonDirExporter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory for one origin: the network host for URL origins, a
    /// sanitized form of the origin string otherwise.
    pub fn origin_dir(&self, origin: &str) -> PathBuf {
        let key = Url::parse(origin)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| file_safe_name(origin));
        self.root.join(key)
    }
}

impl DescriptorSink for JsonDirExporter {
    fn export(&self, descriptor: &Descriptor, origin: &str) -> Result<PathBuf> {
        let dir = self.origin_dir(origin);
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
        }
        let path = dir.join(format!("{}.json", file_safe_name(&descriptor.name)));
        std::fs::write(&path, descriptor.to_pretty_json()?)?;
        tracing::info!(path = %path.display(), "exported descriptor");
        Ok(path)
    }
}

/// Derive a file-safe name: spaces become underscores, anything outside
/// `[A-Za-z0-9._-]` is dropped. An empty result falls back to `"unnamed"`.
pub fn file_safe_name(name: &str) -> String {
    let safe: String = name
        .trim()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    if safe.is_empty() {
        "unnamed".to_string()
    } else {
        safe
    }
}
