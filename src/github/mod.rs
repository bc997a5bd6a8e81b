//! GitHub API integration.
//!
//! This module provides a blocking client for the handful of GitHub REST
//! endpoints the tool needs:
//! - Look up a user's public profile
//! - List a user's repositories
//! - Create a repository, write file contents, and tag releases
//!
//! Each group of endpoints sits behind its own trait so callers can be
//! generic over the transport.
//!
//! # Example
//!
//! ```rust,no_run
//! use github_tool::github::{GitHubClient, RepoOps};
//!
//! let client = GitHubClient::new();
//!
//! for repo in client.list_user_repos("octocat")? {
//!     println!("{}: {}", repo.full_name, repo.html_url);
//! }
//! # Ok::<(), github_tool::error::ToolError>(())
//! ```

mod client;
mod contents;
mod releases;
mod repos;
mod users;

pub use client::GitHubClient;
pub use contents::{ContentOps, DEFAULT_BRANCH, PutContents, encode_content};
pub use releases::{CreateRelease, Release, ReleaseOps};
pub use repos::{CreateRepository, GitHubRepo, RepoOps, RepositoryHandle};
pub use users::{GitHubUser, UserOps};

/// Everything the provisioning workflow needs from an API.
pub trait ProvisionApi: RepoOps + ContentOps + ReleaseOps {}

impl<T: RepoOps + ContentOps + ReleaseOps> ProvisionApi for T {}
