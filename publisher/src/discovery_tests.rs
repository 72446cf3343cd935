//! Unit tests for symbol file discovery.

use super::*;
use crate::patterns::{DEFAULT_SEARCH_PATTERN, parse_patterns};
use rstest::{fixture, rstest};
use std::fs;
use tempfile::TempDir;

/// A symbols folder with a small build output tree.
struct SymbolsTree {
    _temp: TempDir,
    root: Utf8PathBuf,
}

impl SymbolsTree {
    fn file(&self, relative: &str) -> Utf8PathBuf {
        let path = self.root.join(relative);
        fs::create_dir_all(path.parent().expect("file has parent")).expect("create parent");
        fs::write(&path, b"MSF 7.00").expect("write file");
        path
    }

    fn dir(&self, relative: &str) -> Utf8PathBuf {
        let path = self.root.join(relative);
        fs::create_dir_all(&path).expect("create dir");
        path
    }
}

#[fixture]
fn tree() -> SymbolsTree {
    let temp = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8 temp dir");
    SymbolsTree { _temp: temp, root }
}

fn paths(files: &[DiscoveredFile]) -> Vec<&Utf8Path> {
    files.iter().map(DiscoveredFile::path).collect()
}

#[rstest]
fn default_pattern_finds_pdb_under_bin(tree: SymbolsTree) {
    let pdb = tree.file("bin/Debug/app.pdb");
    tree.file("bin/Debug/app.dll");

    let files = discover_files(&tree.root, &parse_patterns(DEFAULT_SEARCH_PATTERN))
        .expect("discovery succeeds");

    assert_eq!(paths(&files), [pdb.as_path()]);
}

#[rstest]
fn default_pattern_finds_nested_projects(tree: SymbolsTree) {
    let first = tree.file("src/App/bin/Release/net8.0/App.pdb");
    let second = tree.file("src/Lib/bin/Release/Lib.pdb");
    tree.file("src/Lib/obj/Release/Lib.pdb");

    let files = discover_files(&tree.root, &parse_patterns(DEFAULT_SEARCH_PATTERN))
        .expect("discovery succeeds");

    assert_eq!(files.len(), 2);
    assert!(paths(&files).contains(&first.as_path()));
    assert!(paths(&files).contains(&second.as_path()));
}

#[rstest]
fn directories_matching_the_pattern_are_excluded(tree: SymbolsTree) {
    let pdb = tree.file("bin/app.pdb");
    tree.dir("bin/folder.pdb");

    let files = discover_files(&tree.root, &parse_patterns("bin/*.pdb")).expect("discovery");

    assert_eq!(paths(&files), [pdb.as_path()]);
}

#[cfg(unix)]
#[rstest]
fn symlinks_to_directories_are_excluded_but_links_to_files_kept(tree: SymbolsTree) {
    let target_dir = tree.dir("real");
    let target_file = tree.file("real/app.pdb");
    std::os::unix::fs::symlink(&target_dir, tree.root.join("bin_dir.pdb")).expect("dir link");
    std::os::unix::fs::symlink(&target_file, tree.root.join("link.pdb")).expect("file link");

    let files = discover_files(&tree.root, &parse_patterns("*.pdb")).expect("discovery");

    assert_eq!(paths(&files), [tree.root.join("link.pdb").as_path()]);
}

#[cfg(unix)]
#[rstest]
fn a_link_back_to_an_ancestor_lists_each_file_once(tree: SymbolsTree) {
    let pdb = tree.file("bin/Debug/app.pdb");
    std::os::unix::fs::symlink(&tree.root, tree.root.join("bin/loop")).expect("cycle link");

    let files = discover_files(&tree.root, &parse_patterns(DEFAULT_SEARCH_PATTERN))
        .expect("discovery succeeds");

    assert_eq!(files.len(), 1, "expected one entry, got {files:?}");
    let found = files.first().expect("one file");
    assert_eq!(
        fs::canonicalize(found.path()).expect("resolve match"),
        fs::canonicalize(&pdb).expect("resolve pdb")
    );
}

#[rstest]
fn results_follow_pattern_order(tree: SymbolsTree) {
    let alpha = tree.file("a/alpha.pdb");
    let zulu = tree.file("z/zulu.pdb");

    let files = discover_files(&tree.root, &parse_patterns("z/*.pdb\na/*.pdb")).expect("ok");

    assert_eq!(paths(&files), [zulu.as_path(), alpha.as_path()]);
}

#[rstest]
fn overlapping_patterns_list_a_file_twice(tree: SymbolsTree) {
    let pdb = tree.file("bin/app.pdb");

    let files = discover_files(&tree.root, &parse_patterns("bin/*.pdb\n**/*.pdb")).expect("ok");

    assert_eq!(paths(&files), [pdb.as_path(), pdb.as_path()]);
}

#[rstest]
fn a_single_pattern_lists_each_file_once(tree: SymbolsTree) {
    tree.file("bin/x/bin/app.pdb");

    let files =
        discover_files(&tree.root, &parse_patterns("**/bin/**/*.pdb")).expect("discovery");

    let unique: HashSet<_> = files.iter().collect();
    assert_eq!(unique.len(), files.len());
    assert_eq!(files.len(), 1);
}

#[rstest]
#[case::leading_slash("/bin/*.pdb")]
#[case::leading_backslash("\\bin\\*.pdb")]
fn leading_separators_stay_inside_the_base_folder(tree: SymbolsTree, #[case] pattern: &str) {
    let pdb = tree.file("bin/app.pdb");

    let files = discover_files(&tree.root, &parse_patterns(pattern)).expect("discovery");

    assert_eq!(paths(&files), [pdb.as_path()]);
}

#[rstest]
fn base_folder_metacharacters_are_matched_literally(tree: SymbolsTree) {
    let base = tree.dir("out[1]");
    let pdb = tree.file("out[1]/app.pdb");

    let files = discover_files(&base, &parse_patterns("*.pdb")).expect("discovery");

    assert_eq!(paths(&files), [pdb.as_path()]);
}

#[rstest]
#[case::no_patterns("")]
#[case::no_matches("**/*.nothing")]
fn empty_results_are_not_errors(tree: SymbolsTree, #[case] raw: &str) {
    tree.file("bin/app.pdb");

    let files = discover_files(&tree.root, &parse_patterns(raw)).expect("discovery");

    assert!(files.is_empty());
}

#[rstest]
fn malformed_pattern_is_reported_with_the_pattern(tree: SymbolsTree) {
    let err = discover_files(&tree.root, &parse_patterns("bin/[*.pdb"))
        .expect_err("pattern should be rejected");

    assert!(matches!(
        &err,
        DiscoveryError::InvalidPattern { pattern, .. } if pattern == "bin/[*.pdb"
    ));
    assert!(err.to_string().contains("bin/[*.pdb"));
}

#[test]
fn search_expression_joins_base_and_pattern() {
    let pattern = parse_patterns("sym/*.pdb").remove(0);
    let expression = search_expression(Utf8Path::new("/work/repo/"), &pattern);
    assert_eq!(expression, "/work/repo/sym/*.pdb");
}

#[cfg(not(windows))]
#[test]
fn backslashes_become_forward_slashes() {
    assert_eq!(normalize_separators(r"**\bin\**\*.pdb"), "**/bin/**/*.pdb");
}

#[cfg(unix)]
#[rstest]
fn unreadable_directory_fails_discovery(tree: SymbolsTree) {
    use std::os::unix::fs::PermissionsExt;

    // Root bypasses directory permissions.
    if unsafe { libc::geteuid() } == 0 {
        return;
    }

    tree.file("locked/inner/app.pdb");
    let locked = tree.root.join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("lock dir");

    let result = discover_files(&tree.root, &parse_patterns("**/*.pdb"));
    let cause = fs::read_dir(&locked).expect_err("locked dir is unreadable");

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("unlock dir");
    assert!(
        matches!(&result, Err(DiscoveryError::Unreadable { path, .. }) if path.contains("locked")),
        "expected Unreadable error, got {result:?}"
    );
    let message = result.expect_err("discovery fails").to_string();
    assert!(
        message.ends_with(&format!(": {cause}")),
        "expected the I/O cause in {message:?}"
    );
}
