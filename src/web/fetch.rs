//! HTTP transport
//!
//! Uses curl to avoid pulling a full HTTP client stack into the dependency
//! tree; the tool only ever issues simple GETs for pages and script files.

use std::process::Command;

use crate::{Error, Result};

/// Fetch a URL as text, following redirects.
pub fn fetch_text(url: &str) -> Result<String> {
    let output = Command::new("curl")
        .arg("-fsSL")
        .arg(url)
        .output()
        .map_err(|err| Error::Fetch {
            url: url.to_string(),
            reason: format!("failed to run curl: {err}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Fetch {
            url: url.to_string(),
            reason: stderr.trim().to_string(),
        });
    }

    String::from_utf8(output.stdout).map_err(|_| Error::Fetch {
        url: url.to_string(),
        reason: "response body is not valid UTF-8".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_url_is_a_fetch_error() {
        let err = fetch_text("http://127.0.0.1:1/nothing").unwrap_err();
        match err {
            Error::Fetch { url, .. } => assert!(url.contains("127.0.0.1")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
