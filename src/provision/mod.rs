//! Repository provisioning.
//!
//! A provisioning run creates a repository and then, in order:
//! 1. uploads each requested file, one at a time,
//! 2. writes a README linking every requested file (only when files were given),
//! 3. tags a release (only when a tag was given).
//!
//! Only the creation call is fatal. Every later step records its own outcome
//! and the run carries on; nothing is rolled back.
//!
//! # Example
//!
//! ```rust,no_run
//! use github_tool::github::GitHubClient;
//! use github_tool::provision::{ProvisionRequest, UploadFile, provision};
//!
//! let client = GitHubClient::new().with_token("ghp_your_token_here");
//! let request = ProvisionRequest::new("demo")
//!     .file(UploadFile::new("hello.txt", "hello"))
//!     .release_tag("v0.1.0");
//!
//! let report = provision(&client, &request)?;
//! println!("{}", report.status());
//! # Ok::<(), github_tool::error::ToolError>(())
//! ```

mod form;
mod readme;
mod request;

pub use form::{FormAction, ProvisionForm};
pub use readme::{README_COMMIT_MESSAGE, README_PATH, render_readme};
pub use request::{ProvisionRequest, UploadFile};

use tracing::{error, info, warn};

use crate::error::{Result, ToolError};
use crate::github::{CreateRelease, ProvisionApi, PutContents, RepositoryHandle};
use crate::status::StatusMessage;

/// Result of one non-fatal step.
#[derive(Debug)]
pub enum StepOutcome {
    Succeeded,
    Failed(ToolError),
}

impl StepOutcome {
    fn from_result<T>(result: Result<T>) -> Self {
        match result {
            Ok(_) => StepOutcome::Succeeded,
            Err(e) => StepOutcome::Failed(e),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Succeeded)
    }

    pub fn error(&self) -> Option<&ToolError> {
        match self {
            StepOutcome::Succeeded => None,
            StepOutcome::Failed(e) => Some(e),
        }
    }
}

/// Upload outcome for one file.
#[derive(Debug)]
pub struct FileOutcome {
    pub name: String,
    pub outcome: StepOutcome,
}

/// Everything that happened during a run that got past creation.
#[derive(Debug)]
pub struct ProvisionReport {
    pub repository: RepositoryHandle,
    /// One entry per requested file, in upload order.
    pub uploads: Vec<FileOutcome>,
    /// `None` when no files were requested.
    pub readme: Option<StepOutcome>,
    /// `None` when no release tag was requested.
    pub release: Option<StepOutcome>,
    /// Set when the listing refresh that follows a run failed.
    pub listing_refresh: Option<StatusMessage>,
}

impl ProvisionReport {
    /// Human-readable failures, in step order.
    pub fn failures(&self) -> Vec<String> {
        let mut failures: Vec<String> = self
            .uploads
            .iter()
            .filter_map(|u| {
                u.outcome
                    .error()
                    .map(|e| format!("Error uploading file: {} ({})", u.name, e))
            })
            .collect();

        if let Some(e) = self.readme.as_ref().and_then(StepOutcome::error) {
            failures.push(format!("Error updating README.md ({})", e));
        }
        if let Some(e) = self.release.as_ref().and_then(StepOutcome::error) {
            failures.push(format!("Error marking release ({})", e));
        }
        failures
    }

    /// Whether every step succeeded.
    pub fn is_clean(&self) -> bool {
        self.uploads.iter().all(|u| u.outcome.is_success())
            && self.readme.as_ref().is_none_or(StepOutcome::is_success)
            && self.release.as_ref().is_none_or(StepOutcome::is_success)
    }

    /// Files whose upload succeeded.
    pub fn uploaded_files(&self) -> impl Iterator<Item = &str> {
        self.uploads
            .iter()
            .filter(|u| u.outcome.is_success())
            .map(|u| u.name.as_str())
    }

    /// The status to show for this run.
    pub fn status(&self) -> StatusMessage {
        let failures = self.failures();
        if failures.is_empty() {
            StatusMessage::success("Repository created successfully")
        } else {
            StatusMessage::warning(format!(
                "Repository created with errors: {}",
                failures.join("; ")
            ))
        }
    }
}

/// The status for a run that failed before or during creation.
pub fn failure_status(err: &ToolError) -> StatusMessage {
    match err {
        ToolError::InvalidRequest(msg) => StatusMessage::error(msg.clone()),
        ToolError::CreationFailed { .. } => StatusMessage::error(err.to_string()),
        _ => StatusMessage::error(format!("Error creating repository: {}", err)),
    }
}

/// Create a repository and populate it.
///
/// Returns `Err` only when the request is invalid or creation fails; in both
/// cases no further call is made.
pub fn provision<A>(api: &A, request: &ProvisionRequest) -> Result<ProvisionReport>
where
    A: ProvisionApi,
{
    request.validate()?;

    let repository = api
        .create_repo(&request.create_repository())
        .map_err(|e| {
            error!(
                repo = %request.name,
                status = ?e.status(),
                network = e.is_network(),
                error = %e,
                "repository creation failed"
            );
            ToolError::CreationFailed {
                name: request.name.clone(),
                source: Box::new(e),
            }
        })?;
    info!(repo = %repository.full_name, "repository created");

    let uploads = upload_files(api, &repository, &request.files);

    let readme = if request.files.is_empty() {
        None
    } else {
        Some(write_readme(api, &repository, request))
    };

    let release = request
        .tag()
        .map(|tag| tag_release(api, &repository, tag));

    Ok(ProvisionReport {
        repository,
        uploads,
        readme,
        release,
        listing_refresh: None,
    })
}

/// Upload files one after another; a failure does not stop the rest.
fn upload_files<A>(api: &A, repository: &RepositoryHandle, files: &[UploadFile]) -> Vec<FileOutcome>
where
    A: ProvisionApi,
{
    files
        .iter()
        .map(|file| {
            let contents = PutContents::new(format!("Add {}", file.name), &file.content);
            let outcome =
                StepOutcome::from_result(api.put_contents(&repository.full_name, &file.name, &contents));

            match outcome.error() {
                None => info!(repo = %repository.full_name, file = %file.name, "file uploaded"),
                Some(e) => {
                    warn!(repo = %repository.full_name, file = %file.name, error = %e, "file upload failed")
                }
            }

            FileOutcome {
                name: file.name.clone(),
                outcome,
            }
        })
        .collect()
}

fn write_readme<A>(api: &A, repository: &RepositoryHandle, request: &ProvisionRequest) -> StepOutcome
where
    A: ProvisionApi,
{
    let readme = render_readme(&request.name, &request.files);
    let contents = PutContents::new(README_COMMIT_MESSAGE, readme.as_bytes());
    let outcome =
        StepOutcome::from_result(api.put_contents(&repository.full_name, README_PATH, &contents));

    match outcome.error() {
        None => info!(repo = %repository.full_name, "README.md updated"),
        Some(e) => warn!(repo = %repository.full_name, error = %e, "README.md update failed"),
    }
    outcome
}

fn tag_release<A>(api: &A, repository: &RepositoryHandle, tag: &str) -> StepOutcome
where
    A: ProvisionApi,
{
    let outcome =
        StepOutcome::from_result(api.create_release(&repository.full_name, &CreateRelease::for_tag(tag)));

    match outcome.error() {
        None => info!(repo = %repository.full_name, tag, "release created"),
        Some(e) => warn!(repo = %repository.full_name, tag, error = %e, "release creation failed"),
    }
    outcome
}
