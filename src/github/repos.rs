//! GitHub repository operations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ApiMode;
use crate::error::Result;
use crate::github::GitHubClient;

const PER_PAGE: usize = 100;
const MAX_PAGES: usize = 100;

/// Repository summary from the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    /// ISO-8601 UTC timestamp, e.g. `2024-01-31T12:00:00Z`.
    pub created_at: String,
    pub language: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(rename = "private", default)]
    pub is_private: bool,
}

/// The repository a provisioning run operates on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryHandle {
    /// `owner/name`, used to address every follow-up call.
    pub full_name: String,
    pub html_url: String,
}

/// Parameters for creating a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRepository {
    pub name: String,
    pub private: bool,
    /// Let GitHub create an initial commit with a README.
    pub auto_init: bool,
}

impl CreateRepository {
    /// Create a public repository request without an initial commit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            private: false,
            auto_init: false,
        }
    }

    /// Make the repository private.
    pub fn private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Initialise the repository with a README.
    pub fn auto_init(mut self, auto_init: bool) -> Self {
        self.auto_init = auto_init;
        self
    }
}

/// `POST /user/repos` body.
#[derive(Serialize)]
struct CreateRepoBody<'a> {
    name: &'a str,
    private: bool,
    auto_init: bool,
}

/// Proxy creation body; the proxy performs the call with the forwarded token.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProxyCreateRepoBody<'a> {
    repo_name: &'a str,
    is_private: bool,
    include_readme: bool,
    token: &'a str,
}

/// Repository listing and creation operations.
pub trait RepoOps {
    /// List all public repositories for a user.
    fn list_user_repos(&self, user: &str) -> Result<Vec<GitHubRepo>>;

    /// Create a repository owned by the authenticated user.
    fn create_repo(&self, request: &CreateRepository) -> Result<RepositoryHandle>;
}

/// Whether paging stops after `page` returned `fetched` repositories.
fn is_last_page(fetched: usize, page: usize) -> bool {
    fetched < PER_PAGE || page >= MAX_PAGES
}

/// Path of the creation call for `mode`.
fn create_endpoint(mode: ApiMode) -> &'static str {
    match mode {
        ApiMode::Direct => "/user/repos",
        ApiMode::Proxy => "/create-repo",
    }
}

impl RepoOps for GitHubClient {
    fn list_user_repos(&self, user: &str) -> Result<Vec<GitHubRepo>> {
        let user = urlencoding::encode(user);
        let mut all_repos = Vec::new();
        let mut page = 1;

        loop {
            let endpoint = format!("/users/{}/repos?per_page={}&page={}", user, PER_PAGE, page);
            let repos: Vec<GitHubRepo> = self.get(&endpoint)?;
            let fetched = repos.len();

            debug!(%user, page, count = fetched, "fetched repository page");
            all_repos.extend(repos);

            if is_last_page(fetched, page) {
                break;
            }
            page += 1;
        }

        Ok(all_repos)
    }

    fn create_repo(&self, request: &CreateRepository) -> Result<RepositoryHandle> {
        let endpoint = create_endpoint(self.mode);
        match self.mode {
            ApiMode::Direct => self.post(
                endpoint,
                &CreateRepoBody {
                    name: &request.name,
                    private: request.private,
                    auto_init: request.auto_init,
                },
            ),
            ApiMode::Proxy => self.post(
                endpoint,
                &ProxyCreateRepoBody {
                    repo_name: &request.name,
                    is_private: request.private,
                    include_readme: request.auto_init,
                    token: self.token.as_deref().unwrap_or_default(),
                },
            ),
        }
    }
}
