//! Content-write operations (`PUT /repos/{owner}/{repo}/contents/{path}`).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::error::Result;
use crate::github::GitHubClient;

/// Branch every provisioning write targets.
pub const DEFAULT_BRANCH: &str = "main";

/// A single file write: commit message plus base64 content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PutContents {
    pub message: String,
    /// Base64-encoded file bytes.
    pub content: String,
    pub branch: String,
}

impl PutContents {
    /// Build a write of raw bytes to the default branch.
    pub fn new(message: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            message: message.into(),
            content: encode_content(bytes),
            branch: DEFAULT_BRANCH.into(),
        }
    }
}

/// Encode raw bytes the way the contents API expects them.
pub fn encode_content(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Operations that create or update file contents.
pub trait ContentOps {
    /// Create or update the file at `path` in `full_name`.
    fn put_contents(&self, full_name: &str, path: &str, contents: &PutContents) -> Result<()>;
}

impl ContentOps for GitHubClient {
    fn put_contents(&self, full_name: &str, path: &str, contents: &PutContents) -> Result<()> {
        let endpoint = format!("/repos/{}/contents/{}", full_name, encode_path(path));
        let _: serde_json::Value = self.put(&endpoint, contents)?;
        Ok(())
    }
}

/// Percent-encode each path segment, keeping the separators.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
