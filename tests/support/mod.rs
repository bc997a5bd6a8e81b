//! In-memory GitHub API used by the integration tests.

#![allow(dead_code)]

use github_tool::prelude::*;
use std::collections::HashSet;
use std::sync::Mutex;

/// One call received by [`RecordingApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetUser(String),
    ListRepos(String),
    CreateRepo(CreateRepository),
    PutContents {
        full_name: String,
        path: String,
        contents: PutContents,
    },
    CreateRelease {
        full_name: String,
        release: CreateRelease,
    },
}

impl Call {
    pub fn is_write(&self) -> bool {
        !matches!(self, Call::GetUser(_) | Call::ListRepos(_))
    }
}

/// Records every call in order; fails the calls it is told to fail.
#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<Call>>,
    pub repos: Vec<GitHubRepo>,
    pub fail_user: bool,
    pub fail_list: bool,
    pub fail_create: bool,
    pub fail_uploads: HashSet<String>,
    pub fail_release: bool,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repos(mut self, repos: Vec<GitHubRepo>) -> Self {
        self.repos = repos;
        self
    }

    pub fn failing_user(mut self) -> Self {
        self.fail_user = true;
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_release(mut self) -> Self {
        self.fail_release = true;
        self
    }

    pub fn failing_upload(mut self, path: &str) -> Self {
        self.fail_uploads.insert(path.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn write_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_write).collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn rejected(message: &str) -> ToolError {
    ToolError::Api {
        status: 422,
        message: message.to_string(),
    }
}

impl UserOps for RecordingApi {
    fn get_user(&self, username: &str) -> Result<GitHubUser> {
        self.record(Call::GetUser(username.to_string()));
        if self.fail_user {
            return Err(ToolError::Api {
                status: 404,
                message: "Not Found".into(),
            });
        }
        Ok(GitHubUser {
            login: username.to_string(),
            name: Some("The Octocat".into()),
            public_repos: self.repos.len() as u32,
            followers: 10,
            following: 2,
            location: Some("San Francisco".into()),
            html_url: format!("https://github.com/{}", username),
            avatar_url: format!("https://avatars.example.com/{}", username),
        })
    }
}

impl RepoOps for RecordingApi {
    fn list_user_repos(&self, user: &str) -> Result<Vec<GitHubRepo>> {
        self.record(Call::ListRepos(user.to_string()));
        if self.fail_list {
            return Err(ToolError::Api {
                status: 403,
                message: "API rate limit exceeded".into(),
            });
        }
        Ok(self.repos.clone())
    }

    fn create_repo(&self, request: &CreateRepository) -> Result<RepositoryHandle> {
        self.record(Call::CreateRepo(request.clone()));
        if self.fail_create {
            return Err(rejected("name already exists on this account"));
        }
        Ok(RepositoryHandle {
            full_name: format!("me/{}", request.name),
            html_url: format!("https://github.com/me/{}", request.name),
        })
    }
}

impl ContentOps for RecordingApi {
    fn put_contents(&self, full_name: &str, path: &str, contents: &PutContents) -> Result<()> {
        self.record(Call::PutContents {
            full_name: full_name.to_string(),
            path: path.to_string(),
            contents: contents.clone(),
        });
        if self.fail_uploads.contains(path) {
            return Err(rejected("Invalid request"));
        }
        Ok(())
    }
}

impl ReleaseOps for RecordingApi {
    fn create_release(&self, full_name: &str, release: &CreateRelease) -> Result<Release> {
        self.record(Call::CreateRelease {
            full_name: full_name.to_string(),
            release: release.clone(),
        });
        if self.fail_release {
            return Err(rejected("tag_name already_exists"));
        }
        Ok(Release {
            id: 1,
            tag_name: release.tag_name.clone(),
            html_url: format!("https://github.com/{}/releases/tag/{}", full_name, release.tag_name),
        })
    }
}

pub fn repo(name: &str, description: Option<&str>, stars: u64, created: &str) -> GitHubRepo {
    GitHubRepo {
        id: stars,
        name: name.into(),
        full_name: format!("octocat/{}", name),
        html_url: format!("https://github.com/octocat/{}", name),
        description: description.map(Into::into),
        stargazers_count: stars,
        created_at: created.into(),
        language: None,
        fork: false,
        is_private: false,
    }
}
