//! README synthesis for provisioned repositories.

use std::fmt::Write;

use crate::provision::UploadFile;

/// Commit message used when writing the generated README.
pub const README_COMMIT_MESSAGE: &str = "Update README.md with file links";

/// Path of the generated README.
pub const README_PATH: &str = "README.md";

/// Render a README listing every file as a relative link, in order.
pub fn render_readme(repo_name: &str, files: &[UploadFile]) -> String {
    let mut readme = format!(
        "# {}\n\nThis repository was created using the GitHub API.\n\n## Files\n\n",
        repo_name
    );
    for file in files {
        let _ = writeln!(readme, "- [{0}](./{0})", file.name);
    }
    readme
}
