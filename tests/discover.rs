use rulecheck::{
    DiscoveryError, FileSource, MemoryFiles, OsFiles, Outcome, Profile, discover, validate_paths,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn paths(items: &[&str]) -> Vec<PathBuf> {
    items.iter().map(PathBuf::from).collect()
}

/// Layout shared by the file-system tests.
fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "agents/DCA/rules/DoctorGPhD/b.yml", "id: B\nname: b\nconditions: []\n");
    write(root, "agents/DCA/rules/DoctorGPhD/a.yaml", "id: A\nname: a\nconditions: []\n");
    write(root, "agents/x/y/rules/DoctorGPhD/c.json", r#"{"id": "C", "name": "c", "conditions": []}"#);
    write(root, "agents/DCA/rules/DoctorGPhD/notes.txt", "ignored");
    write(root, "agents/DCA/rules/Other/z.yml", "id: Z\nname: z\nconditions: []\n");
    dir
}

// ─── OsFiles ────────────────────────────────────────────────────────────────

#[test]
fn default_patterns_are_sorted_and_relative() {
    let dir = fixture();
    let source = OsFiles::new(dir.path());
    let files = discover(&source, &[], &Profile::ruleset().patterns).unwrap();
    assert_eq!(
        files,
        paths(&[
            "agents/DCA/rules/DoctorGPhD/a.yaml",
            "agents/DCA/rules/DoctorGPhD/b.yml",
            "agents/x/y/rules/DoctorGPhD/c.json",
        ])
    );
}

#[test]
fn overlapping_inputs_are_deduplicated() {
    let dir = fixture();
    let source = OsFiles::new(dir.path());
    let inputs = strings(&[
        "agents/**/*.yml",
        "agents/DCA/rules/DoctorGPhD/b.yml",
        "./agents/DCA/rules/DoctorGPhD/b.yml",
    ]);
    let files = discover(&source, &inputs, &[]).unwrap();
    assert_eq!(
        files,
        paths(&[
            "agents/DCA/rules/DoctorGPhD/b.yml",
            "agents/DCA/rules/Other/z.yml",
        ])
    );
}

#[test]
fn explicit_inputs_replace_defaults() {
    let dir = fixture();
    let source = OsFiles::new(dir.path());
    let inputs = strings(&["agents/DCA/rules/Other/z.yml"]);
    let files = discover(&source, &inputs, &Profile::ruleset().patterns).unwrap();
    assert_eq!(files, paths(&["agents/DCA/rules/Other/z.yml"]));
}

#[test]
fn directories_are_not_candidates() {
    let dir = fixture();
    let source = OsFiles::new(dir.path());
    let files = discover(&source, &strings(&["agents/*"]), &[]).unwrap();
    assert!(files.is_empty(), "{:?}", files);
}

#[test]
fn unmatched_pattern_is_not_an_error() {
    let dir = fixture();
    let source = OsFiles::new(dir.path());
    let files = discover(&source, &strings(&["nowhere/**/*.yml"]), &[]).unwrap();
    assert!(files.is_empty());
}

#[test]
fn invalid_pattern_is_fatal() {
    let dir = fixture();
    let source = OsFiles::new(dir.path());
    let err = discover(&source, &strings(&["agents/***/x.yml"]), &[]).unwrap_err();
    assert!(matches!(err, DiscoveryError::Pattern { .. }), "{:?}", err);
}

#[test]
fn root_with_glob_metacharacters_is_literal() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("weird[1]");
    write(&root, "rules/r.yml", "id: R\nname: r\nconditions: []\n");

    let source = OsFiles::new(&root);
    assert_eq!(source.root(), root.as_path());
    let files = discover(&source, &strings(&["rules/*.yml"]), &[]).unwrap();
    assert_eq!(files, paths(&["rules/r.yml"]));
}

#[test]
fn end_to_end_over_the_file_system() {
    let dir = fixture();
    write(dir.path(), "agents/x/y/rules/DoctorGPhD/dup.yml", "id: A\nname: again\nconditions: []\n");

    let source = OsFiles::new(dir.path());
    let report = validate_paths(&source, &[], &Profile::ruleset()).unwrap();
    assert_eq!(report.file_count(), 4);
    assert_eq!(report.outcome(), Outcome::SchemaFailure);
    assert_eq!(report.distinct_ids, 3);
}

// ─── MemoryFiles ────────────────────────────────────────────────────────────

#[test]
fn memory_star_does_not_cross_directories() {
    let files = MemoryFiles::new()
        .with("top.yml", "")
        .with("nested/deep.yml", "");
    let found = discover(&files, &strings(&["*.yml"]), &[]).unwrap();
    assert_eq!(found, paths(&["top.yml"]));

    let found = discover(&files, &strings(&["**/*.yml"]), &[]).unwrap();
    assert_eq!(found, paths(&["nested/deep.yml", "top.yml"]));
}

#[test]
fn memory_literal_path_is_included() {
    let files = MemoryFiles::new().with("odd[name].yml", "");
    // As a glob this would be a character class; as a literal file it matches.
    let found = discover(&files, &strings(&["odd[name].yml"]), &[]).unwrap();
    assert_eq!(found, paths(&["odd[name].yml"]));
}

// ─── Walk failures ──────────────────────────────────────────────────────────

/// A tree whose directories cannot be listed.
struct UnreadableTree;

impl FileSource for UnreadableTree {
    fn is_file(&self, _path: &Path) -> bool {
        false
    }

    fn expand(&self, _pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
        Err(DiscoveryError::Io {
            path: PathBuf::from("agents/locked"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        })
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }
}

#[test]
fn walk_failure_aborts_discovery() {
    let err = discover(&UnreadableTree, &[], &Profile::ruleset().patterns).unwrap_err();
    match &err {
        DiscoveryError::Io { path, source } => {
            assert_eq!(path, Path::new("agents/locked"));
            assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
        }
        other => panic!("expected I/O error, got {:?}", other),
    }
    assert!(err.to_string().contains("agents/locked"), "{}", err);
}

#[test]
fn walk_failure_produces_no_report() {
    let result = validate_paths(&UnreadableTree, &strings(&["rules/*.yml"]), &Profile::ruleset());
    assert!(matches!(result, Err(DiscoveryError::Io { .. })));
}

#[cfg(unix)]
#[test]
fn unlistable_directory_is_an_io_error() {
    use std::os::unix::fs::PermissionsExt;

    let dir = fixture();
    let locked = dir.path().join("agents/DCA/rules");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not restrict root, so the walk cannot fail there.
    let listable = fs::read_dir(&locked).is_ok();
    let result = discover(&OsFiles::new(dir.path()), &strings(&["agents/**/*.yml"]), &[]);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if !listable {
        assert!(matches!(result, Err(DiscoveryError::Io { .. })), "{:?}", result);
    }
}
