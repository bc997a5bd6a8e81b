//! # GitHub Tool
//!
//! Inspect a GitHub user and provision repositories from Rust.
//!
//! This crate provides:
//! - A blocking GitHub API client with one trait per endpoint group
//! - A filter/sort/paginate view over a user's repositories
//! - Stat and trophy badge URLs for a username
//! - A provisioning workflow that creates a repository, uploads files,
//!   writes a README linking them, and tags a release
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use github_tool::prelude::*;
//!
//! let mut dashboard = Dashboard::new(GitHubClient::new(), "octocat");
//! for status in dashboard.refresh() {
//!     eprintln!("{}", status);
//! }
//!
//! dashboard.apply(ListingAction::Sort(SortKey::Stars));
//! for repo in dashboard.view().items {
//!     println!("{} ({} stars)", repo.full_name, repo.stargazers_count);
//! }
//! ```
//!
//! ## Provisioning
//!
//! ```rust,no_run
//! use github_tool::prelude::*;
//!
//! let client = GitHubClient::new().with_token("ghp_your_token_here");
//! let request = ProvisionRequest::new("demo")
//!     .private(true)
//!     .file(UploadFile::new("notes.txt", "hello"))
//!     .release_tag("v1");
//!
//! let report = provision(&client, &request)?;
//! println!("{}: {}", report.repository.html_url, report.status());
//! # Ok::<(), github_tool::error::ToolError>(())
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod github;
pub mod listing;
pub mod logging;
pub mod provision;
pub mod stats;
pub mod status;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{ApiMode, ToolConfig};
    pub use crate::dashboard::Dashboard;
    pub use crate::error::{Result, ToolError};
    pub use crate::github::{
        ContentOps, CreateRelease, CreateRepository, GitHubClient, GitHubRepo, GitHubUser,
        ProvisionApi, PutContents, Release, ReleaseOps, RepoOps, RepositoryHandle, UserOps,
    };
    pub use crate::listing::{
        ListingAction, ListingPage, ListingView, SortKey, derive_view, filter_repos, paginate,
        sort_repos,
    };
    pub use crate::provision::{
        FileOutcome, FormAction, ProvisionForm, ProvisionReport, ProvisionRequest, StepOutcome,
        UploadFile, provision,
    };
    pub use crate::stats::{Badge, BadgeKind, DashboardSnapshot, badges_for, load_dashboard};
    pub use crate::status::{StatusKind, StatusMessage};
}

pub use prelude::*;
