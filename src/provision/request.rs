//! Provisioning request and upload files.

use std::path::Path;
use walkdir::WalkDir;

use crate::error::{Result, ToolError};
use crate::github::CreateRepository;

/// A file to upload: its base name and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Read a file from disk, naming it after its base name.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ToolError::InvalidRequest(format!("Not a file path: {}", path.display()))
            })?;
        let content = std::fs::read(path).map_err(|e| {
            ToolError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", path.display(), e),
            ))
        })?;
        Ok(Self { name, content })
    }

    /// Read the regular files directly inside `dir`, sorted by name.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Vec<Self>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir.as_ref())
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(Self::from_path(entry.path())?);
            }
        }

        Ok(files)
    }
}

/// Everything needed to create and populate one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionRequest {
    pub name: String,
    pub private: bool,
    pub initialize_readme: bool,
    /// Uploaded sequentially, in this order.
    pub files: Vec<UploadFile>,
    pub release_tag: Option<String>,
}

impl ProvisionRequest {
    /// A public repository with no files and no release.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            private: false,
            initialize_readme: false,
            files: Vec::new(),
            release_tag: None,
        }
    }

    /// Make the repository private.
    pub fn private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Let GitHub create an initial README.
    pub fn initialize_readme(mut self, initialize: bool) -> Self {
        self.initialize_readme = initialize;
        self
    }

    /// Add a file to upload.
    pub fn file(mut self, file: UploadFile) -> Self {
        self.files.push(file);
        self
    }

    /// Add several files to upload.
    pub fn files(mut self, files: impl IntoIterator<Item = UploadFile>) -> Self {
        self.files.extend(files);
        self
    }

    /// Tag a release after the files are in.
    pub fn release_tag(mut self, tag: impl Into<String>) -> Self {
        self.release_tag = Some(tag.into());
        self
    }

    /// The release tag, if one was given and is non-empty.
    pub fn tag(&self) -> Option<&str> {
        self.release_tag.as_deref().filter(|t| !t.is_empty())
    }

    /// Reject requests that cannot be sent.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ToolError::InvalidRequest(
                "Repository name is required".into(),
            ));
        }
        if let Some(file) = self.files.iter().find(|f| f.name.trim().is_empty()) {
            return Err(ToolError::InvalidRequest(format!(
                "File name is required ({} bytes without a name)",
                file.content.len()
            )));
        }
        Ok(())
    }

    /// The creation call for this request.
    pub fn create_repository(&self) -> CreateRepository {
        CreateRepository::new(&self.name)
            .private(self.private)
            .auto_init(self.initialize_readme)
    }
}
