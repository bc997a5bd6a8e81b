//! GitHub user profile lookups.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::github::GitHubClient;

/// Public profile from `/users/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub name: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    pub location: Option<String>,
    pub html_url: String,
    pub avatar_url: String,
}

/// User profile operations.
pub trait UserOps {
    /// Fetch a user's public profile.
    fn get_user(&self, username: &str) -> Result<GitHubUser>;
}

impl UserOps for GitHubClient {
    fn get_user(&self, username: &str) -> Result<GitHubUser> {
        self.get(&format!("/users/{}", urlencoding::encode(username)))
    }
}
