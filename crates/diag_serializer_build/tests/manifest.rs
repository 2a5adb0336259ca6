use std::path::Path;

use diag_serializer_build::{CompilerInvocation, Manifest, ManifestError, MANIFEST_FILENAME};

#[test]
fn resources_manifest() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/resources");
    let manifest = Manifest::from_file(root.join(MANIFEST_FILENAME)).unwrap();

    assert_eq!(manifest.build_dir(), root.join("out"));
    assert_eq!(manifest.runtime_version(), Some(17));
    assert_eq!(
        manifest.unit_names().collect::<Vec<_>>(),
        vec!["generated", "main", "test"]
    );

    let main = CompilerInvocation::for_unit(&manifest, "main").unwrap();
    assert_eq!(
        main.arguments().output_file(),
        Some(root.join("out/javac-diagnostics/main.txt").as_path())
    );
    assert!(main.fork_options().fork);

    let test = CompilerInvocation::for_unit(&manifest, "test").unwrap();
    assert_eq!(
        test.arguments().output_file(),
        Some(root.join("reports/test-diagnostics.txt").as_path())
    );

    let generated = CompilerInvocation::for_unit(&manifest, "generated").unwrap();
    assert!(generated.compiler_args().is_empty());
}

#[test]
fn missing_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let result = Manifest::from_file(dir.path().join(MANIFEST_FILENAME));
    assert!(matches!(result, Err(ManifestError::Read { .. })));
}

#[test]
fn manifest_relative_to_its_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(MANIFEST_FILENAME);
    std::fs::write(&path, "[units.main]\noutput-file = \"diagnostics.txt\"\n").unwrap();

    let manifest = Manifest::from_file(&path).unwrap();
    assert_eq!(
        manifest.unit("main").unwrap().output_file(),
        Some(dir.path().join("diagnostics.txt").as_path())
    );
}
