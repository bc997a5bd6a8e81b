//! Provisioning workflow tests against an in-memory API.

mod support;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use github_tool::prelude::*;
use support::{Call, RecordingApi, repo};

fn decode(content: &str) -> String {
    String::from_utf8(STANDARD.decode(content).unwrap()).unwrap()
}

#[test]
fn test_creation_only_makes_one_call() {
    let api = RecordingApi::new();
    let request = ProvisionRequest::new("demo").release_tag("");

    let report = provision(&api, &request).unwrap();

    assert_eq!(api.calls().len(), 1);
    assert!(matches!(&api.calls()[0], Call::CreateRepo(c) if c.name == "demo" && !c.private));
    assert!(report.uploads.is_empty());
    assert!(report.readme.is_none());
    assert!(report.release.is_none());
    assert!(report.listing_refresh.is_none());
    assert_eq!(report.status().text, "Repository created successfully");
}

#[test]
fn test_creation_failure_stops_everything() {
    let api = RecordingApi::new().failing_create();
    let request = ProvisionRequest::new("demo")
        .file(UploadFile::new("a.txt", "a"))
        .release_tag("v1");

    let err = provision(&api, &request).unwrap_err();

    assert_eq!(api.calls().len(), 1);
    assert!(matches!(err, ToolError::CreationFailed { .. }));
    assert_eq!(err.status(), Some(422));
    assert!(
        github_tool::provision::failure_status(&err)
            .text
            .starts_with("Error creating repository")
    );
}

#[test]
fn test_invalid_request_makes_no_calls() {
    let api = RecordingApi::new();
    let err = provision(&api, &ProvisionRequest::new("")).unwrap_err();

    assert!(matches!(err, ToolError::InvalidRequest(_)));
    assert!(api.calls().is_empty());
}

#[test]
fn test_failed_upload_does_not_stop_the_rest() {
    let api = RecordingApi::new().failing_upload("first.txt");
    let request = ProvisionRequest::new("demo")
        .file(UploadFile::new("first.txt", "1"))
        .file(UploadFile::new("second.txt", "2"));

    let report = provision(&api, &request).unwrap();

    let paths: Vec<String> = api
        .calls()
        .iter()
        .filter_map(|c| match c {
            Call::PutContents { path, .. } => Some(path.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(paths, vec!["first.txt", "second.txt", "README.md"]);

    assert!(!report.uploads[0].outcome.is_success());
    assert!(report.uploads[1].outcome.is_success());
    assert!(report.readme.as_ref().unwrap().is_success());
    assert_eq!(report.uploaded_files().collect::<Vec<_>>(), vec!["second.txt"]);

    let Some(Call::PutContents { contents, .. }) = api.calls().last().cloned() else {
        panic!("expected README write last");
    };
    let readme = decode(&contents.content);
    assert!(readme.contains("- [first.txt](./first.txt)"));
    assert!(readme.contains("- [second.txt](./second.txt)"));

    let status = report.status();
    assert!(!status.is_success());
    assert!(status.text.contains("Error uploading file: first.txt"));
    assert!(!status.text.contains("second.txt"));
}

#[test]
fn test_files_are_base64_encoded_on_main() {
    let api = RecordingApi::new();
    let bytes = vec![0u8, 159, 146, 150, 255];
    let request = ProvisionRequest::new("bin").file(UploadFile::new("blob.bin", bytes.clone()));

    provision(&api, &request).unwrap();

    match &api.calls()[1] {
        Call::PutContents {
            full_name,
            path,
            contents,
        } => {
            assert_eq!(full_name, "me/bin");
            assert_eq!(path, "blob.bin");
            assert_eq!(contents.branch, "main");
            assert_eq!(contents.message, "Add blob.bin");
            assert_eq!(STANDARD.decode(&contents.content).unwrap(), bytes);
        }
        other => panic!("unexpected call {:?}", other),
    }
}

#[test]
fn test_release_runs_even_when_uploads_fail() {
    let api = RecordingApi::new()
        .failing_upload("a.txt")
        .failing_upload("README.md");
    let request = ProvisionRequest::new("demo")
        .file(UploadFile::new("a.txt", "a"))
        .release_tag("v2");

    let report = provision(&api, &request).unwrap();

    assert!(matches!(api.calls().last(), Some(Call::CreateRelease { .. })));
    assert!(report.release.as_ref().unwrap().is_success());
    assert_eq!(report.failures().len(), 2);
}

#[test]
fn test_release_failure_is_reported() {
    let api = RecordingApi::new().failing_release();
    let report = provision(&api, &ProvisionRequest::new("demo").release_tag("v1")).unwrap();

    assert_eq!(api.calls().len(), 2);
    assert!(!report.is_clean());
    assert!(report.status().text.contains("Error marking release"));
}

#[test]
fn test_concrete_scenario_through_dashboard() {
    let api = RecordingApi::new().with_repos(vec![repo(
        "demo",
        None,
        0,
        "2024-01-01T00:00:00Z",
    )]);
    let mut dashboard = Dashboard::new(api, "me");

    let request = ProvisionRequest::new("demo")
        .private(false)
        .initialize_readme(true)
        .file(UploadFile::new("a.txt", "hello"))
        .release_tag("v1");

    let report = dashboard.provision(&request).unwrap();
    let api = dashboard.api();

    let writes = api.write_calls();
    assert_eq!(writes.len(), 4);

    match &writes[0] {
        Call::CreateRepo(c) => {
            assert_eq!(c.name, "demo");
            assert!(!c.private);
            assert!(c.auto_init);
        }
        other => panic!("expected create, got {:?}", other),
    }
    assert!(matches!(&writes[1], Call::PutContents { path, .. } if path == "a.txt"));
    match &writes[2] {
        Call::PutContents { path, contents, .. } => {
            assert_eq!(path, "README.md");
            assert_eq!(contents.message, "Update README.md with file links");
            assert!(decode(&contents.content).contains("- [a.txt](./a.txt)"));
        }
        other => panic!("expected README write, got {:?}", other),
    }
    match &writes[3] {
        Call::CreateRelease { full_name, release } => {
            assert_eq!(full_name, "me/demo");
            assert_eq!(release.tag_name, "v1");
            assert_eq!(release.name, "v1");
            assert_eq!(release.body, "Release v1");
        }
        other => panic!("expected release, got {:?}", other),
    }

    assert_eq!(report.status().text, "Repository created successfully");
    assert!(report.listing_refresh.is_none());
    assert_eq!(api.count(|c| matches!(c, Call::ListRepos(_))), 1);
    assert!(matches!(api.calls().last(), Some(Call::ListRepos(u)) if u == "me"));
    assert_eq!(dashboard.repositories().len(), 1);
}

#[test]
fn test_failed_listing_refresh_is_reported() {
    let mut dashboard = Dashboard::new(RecordingApi::new().failing_list(), "me");

    let report = dashboard.provision(&ProvisionRequest::new("demo")).unwrap();

    assert_eq!(dashboard.api().count(|c| matches!(c, Call::ListRepos(_))), 1);
    assert!(report.is_clean());
    let refresh = report.listing_refresh.expect("refresh failure should be reported");
    assert_eq!(refresh.kind, StatusKind::Error);
    assert!(refresh.text.starts_with("Error fetching repositories"));
    assert!(dashboard.repositories().is_empty());
}

#[test]
fn test_failed_creation_skips_listing_refresh() {
    let api = RecordingApi::new().failing_create();
    let mut dashboard = Dashboard::new(api, "me");

    assert!(dashboard.provision(&ProvisionRequest::new("demo")).is_err());
    assert_eq!(dashboard.api().calls().len(), 1);
}

#[test]
fn test_form_drives_provisioning() {
    let form = ProvisionForm::new().with_actions([
        FormAction::SetRepoName("from-form".into()),
        FormAction::SetPrivate(true),
        FormAction::AddFiles(vec![
            UploadFile::new("keep.txt", "k"),
            UploadFile::new("drop.txt", "d"),
        ]),
        FormAction::RemoveFile(1),
    ]);
    let api = RecordingApi::new();

    let report = provision(&api, &form.to_request().unwrap()).unwrap();

    assert_eq!(report.repository.full_name, "me/from-form");
    assert!(matches!(&api.calls()[0], Call::CreateRepo(c) if c.private));
    assert_eq!(report.uploads.len(), 1);
    assert_eq!(api.calls().len(), 3);
}
