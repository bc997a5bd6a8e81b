//! Provisioning form state, updated one action at a time.

use crate::error::Result;
use crate::provision::{ProvisionRequest, UploadFile};

/// One user edit to the provisioning form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    SetToken(String),
    SetRepoName(String),
    SetPrivate(bool),
    SetIncludeReadme(bool),
    /// Append files to the selection.
    AddFiles(Vec<UploadFile>),
    /// Drop the selected file at this index; out-of-range is ignored.
    RemoveFile(usize),
    SetReleaseTag(String),
}

/// Input collected before a provisioning run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionForm {
    pub token: String,
    pub repo_name: String,
    pub private: bool,
    pub include_readme: bool,
    pub files: Vec<UploadFile>,
    pub release_tag: String,
}

impl ProvisionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action.
    pub fn apply(&mut self, action: FormAction) {
        match action {
            FormAction::SetToken(token) => self.token = token,
            FormAction::SetRepoName(name) => self.repo_name = name,
            FormAction::SetPrivate(private) => self.private = private,
            FormAction::SetIncludeReadme(include) => self.include_readme = include,
            FormAction::AddFiles(files) => self.files.extend(files),
            FormAction::RemoveFile(index) => {
                if index < self.files.len() {
                    self.files.remove(index);
                }
            }
            FormAction::SetReleaseTag(tag) => self.release_tag = tag,
        }
    }

    /// Apply a sequence of actions.
    pub fn with_actions(mut self, actions: impl IntoIterator<Item = FormAction>) -> Self {
        for action in actions {
            self.apply(action);
        }
        self
    }

    /// Build a validated request from the current input.
    pub fn to_request(&self) -> Result<ProvisionRequest> {
        let mut request = ProvisionRequest::new(self.repo_name.trim())
            .private(self.private)
            .initialize_readme(self.include_readme)
            .files(self.files.iter().cloned());

        let tag = self.release_tag.trim();
        if !tag.is_empty() {
            request = request.release_tag(tag);
        }

        request.validate()?;
        Ok(request)
    }
}
