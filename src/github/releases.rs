//! Release operations.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::github::GitHubClient;

/// Request body for creating a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRelease {
    pub tag_name: String,
    pub name: String,
    pub body: String,
}

impl CreateRelease {
    /// A release named after its tag, with a generated body.
    pub fn for_tag(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            name: tag.clone(),
            body: format!("Release {}", tag),
            tag_name: tag,
        }
    }
}

/// A release on GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    pub html_url: String,
}

/// Release operations.
pub trait ReleaseOps {
    /// Create a release (and its tag) in `full_name`.
    fn create_release(&self, full_name: &str, release: &CreateRelease) -> Result<Release>;
}

impl ReleaseOps for GitHubClient {
    fn create_release(&self, full_name: &str, release: &CreateRelease) -> Result<Release> {
        self.post(&format!("/repos/{}/releases", full_name), release)
    }
}
