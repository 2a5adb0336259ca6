use std::ffi::OsString;

use diag_serializer_cli::{run_with_args, ExitStatus};

fn manifest_project(contents: &str) -> tempfile::TempDir {
    let project = tempfile::Builder::new()
        .prefix("diag_serializer_project")
        .tempdir()
        .unwrap();
    std::fs::write(project.path().join("diag-serializer.toml"), contents).unwrap();
    project
}

#[test]
fn args_of_known_unit() {
    let project = manifest_project("[project]\nruntime-version = 17\n\n[units.main]\n");
    let args: Vec<OsString> = vec![
        "diag-serializer".into(),
        "args".into(),
        "--manifest-path".into(),
        project.path().join("diag-serializer.toml").into(),
        "--unit".into(),
        "main".into(),
    ];
    assert_eq!(run_with_args(args).unwrap(), ExitStatus::Success);
}

#[test]
fn args_of_disabled_unit() {
    let project = manifest_project("[units.main]\nenabled = false\n");
    let args: Vec<OsString> = vec![
        "diag-serializer".into(),
        "args".into(),
        "--manifest-path".into(),
        project.path().join("diag-serializer.toml").into(),
        "--unit".into(),
        "main".into(),
    ];
    assert_eq!(run_with_args(args).unwrap(), ExitStatus::Error);
}

#[test]
fn args_of_unknown_unit() {
    let project = manifest_project("[units.main]\n");
    let args: Vec<OsString> = vec![
        "diag-serializer".into(),
        "args".into(),
        "--manifest-path".into(),
        project.path().join("diag-serializer.toml").into(),
        "--unit".into(),
        "test".into(),
    ];
    let error = run_with_args(args).unwrap_err();
    assert_eq!(
        error.to_string(),
        "no compilation unit named 'test' in the manifest"
    );
}

#[test]
fn args_with_missing_manifest() {
    let project = tempfile::tempdir().unwrap();
    let args: Vec<OsString> = vec![
        "diag-serializer".into(),
        "args".into(),
        "--manifest-path".into(),
        project.path().join("diag-serializer.toml").into(),
        "--unit".into(),
        "main".into(),
    ];
    assert!(run_with_args(args).is_err());
}
