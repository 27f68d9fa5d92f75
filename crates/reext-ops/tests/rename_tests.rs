use std::fs;
use std::path::{Path, PathBuf};

use reext_ops::{RenameConfig, RenameError, SkipReason, TreeRenamer, rename_tree};
use tempfile::TempDir;

fn touch(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// All file paths under `root`, relative and sorted.
fn tree(root: &Path) -> Vec<String> {
    fn visit(dir: &Path, root: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                visit(&path, root, out);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    let mut out = Vec::new();
    visit(root, root, &mut out);
    out.sort();
    out
}

#[test]
fn test_bottom_up_completeness() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(&root.join("a/b/file1.old"), "one");
    touch(&root.join("a/file2.old"), "two");

    let skipped = rename_tree(root, ".old", ".new").unwrap();

    assert!(skipped.is_empty());
    assert_eq!(tree(root), vec!["a/b/file1.new", "a/file2.new"]);
    assert_eq!(fs::read_to_string(root.join("a/b/file1.new")).unwrap(), "one");
    assert_eq!(fs::read_to_string(root.join("a/file2.new")).unwrap(), "two");
}

#[test]
fn test_true_collision_is_skipped() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(&root.join("x.old"), "old");
    touch(&root.join("x.new"), "new");

    let skipped = rename_tree(root, "old", "new").unwrap();

    assert_eq!(skipped.len(), 1);
    let entry = &skipped.entries()[0];
    assert_eq!(entry.source, root.join("x.old"));
    assert_eq!(entry.destination, root.join("x.new"));
    assert_eq!(entry.reason, SkipReason::TargetExists);

    assert_eq!(fs::read_to_string(root.join("x.old")).unwrap(), "old");
    assert_eq!(fs::read_to_string(root.join("x.new")).unwrap(), "new");
}

#[test]
fn test_collision_does_not_stop_walk() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(&root.join("a.old"), "");
    touch(&root.join("a.new"), "");
    touch(&root.join("b.old"), "");
    touch(&root.join("sub/c.old"), "");

    let skipped = rename_tree(root, "old", "new").unwrap();

    assert_eq!(skipped.len(), 1);
    assert_eq!(
        tree(root),
        vec!["a.new", "a.old", "b.new", "sub/c.new"]
    );
}

#[test]
fn test_same_extension_case_variation_is_not_a_collision() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(&root.join("FILE.OLD"), "data");

    let skipped = rename_tree(root, ".old", ".OLD").unwrap();

    assert!(skipped.is_empty());
    assert_eq!(tree(root), vec!["FILE.old"]);
    assert_eq!(fs::read_to_string(root.join("FILE.old")).unwrap(), "data");
}

#[test]
fn test_uppercase_extension_is_matched() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(&root.join("Photo.JPEG"), "");

    rename_tree(root, "jpeg", "JPG").unwrap();

    assert_eq!(tree(root), vec!["Photo.jpg"]);
}

#[test]
fn test_non_matching_files_untouched() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(&root.join("doc.txt"), "text");
    touch(&root.join("archive.older"), "");
    touch(&root.join("keep.old"), "");

    rename_tree(root, "old", "new").unwrap();

    assert_eq!(tree(root), vec!["archive.older", "doc.txt", "keep.new"]);
    assert_eq!(fs::read_to_string(root.join("doc.txt")).unwrap(), "text");
}

#[test]
fn test_bare_extension_name_is_renamed() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(&root.join(".old"), "");

    rename_tree(root, "old", "new").unwrap();

    assert_eq!(tree(root), vec![".new"]);
}

#[test]
fn test_invalid_root_is_rejected_without_mutation() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("file.old");
    touch(&file, "");

    let err = rename_tree(&file, "old", "new").unwrap_err();

    assert!(matches!(err, RenameError::NotADirectory { .. }));
    assert_eq!(tree(temp.path()), vec!["file.old"]);
}

#[test]
fn test_missing_root_is_rejected() {
    let temp = TempDir::new().unwrap();
    let err = rename_tree(temp.path().join("nope"), "old", "new").unwrap_err();
    assert!(matches!(err, RenameError::NotADirectory { .. }));
}

#[test]
fn test_rerun_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(&root.join("a/one.old"), "");
    touch(&root.join("two.old"), "");

    rename_tree(root, "old", "new").unwrap();
    let after_first = tree(root);

    let outcome = TreeRenamer::new()
        .run(&RenameConfig::new(root, "old", "new"))
        .unwrap();

    assert!(outcome.renamed.is_empty());
    assert!(outcome.skipped.is_empty());
    assert_eq!(tree(root), after_first);
}

#[test]
fn test_outcome_lists_renames_deepest_first() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(&root.join("top.old"), "");
    touch(&root.join("a/mid.old"), "");
    touch(&root.join("a/b/deep.old"), "");

    let outcome = TreeRenamer::new()
        .run(&RenameConfig::new(root, "old", "new"))
        .unwrap();

    let sources: Vec<PathBuf> = outcome.renamed.iter().map(|t| t.source.clone()).collect();
    assert_eq!(
        sources,
        vec![
            root.join("a/b/deep.old"),
            root.join("a/mid.old"),
            root.join("top.old"),
        ]
    );
}

#[test]
fn test_max_depth_limits_renames() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(&root.join("top.old"), "");
    touch(&root.join("a/mid.old"), "");
    touch(&root.join("a/b/deep.old"), "");

    let config = RenameConfig::builder()
        .root(root)
        .old_extension("old")
        .new_extension("new")
        .max_depth(1u32)
        .build()
        .unwrap();
    TreeRenamer::new().run(&config).unwrap();

    assert_eq!(tree(root), vec!["a/b/deep.old", "a/mid.new", "top.new"]);
}

#[cfg(target_os = "linux")]
#[test]
fn test_case_variant_of_distinct_file_is_not_overwritten() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(&root.join("x.OLD"), "upper");
    touch(&root.join("x.old"), "lower");

    let skipped = rename_tree(root, "old", "old").unwrap();

    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped.entries()[0].source, root.join("x.OLD"));
    assert_eq!(fs::read_to_string(root.join("x.OLD")).unwrap(), "upper");
    assert_eq!(fs::read_to_string(root.join("x.old")).unwrap(), "lower");
}

#[cfg(unix)]
#[test]
fn test_unwritable_directory_aborts_walk() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let locked = root.join("locked");
    touch(&locked.join("a.old"), "");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    // Permission bits do not apply when running as root.
    let probe = locked.join("probe");
    if fs::write(&probe, b"").is_ok() {
        fs::remove_file(&probe).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = rename_tree(root, "old", "new");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(result, Err(RenameError::Rename { .. })));
    assert!(locked.join("a.old").exists());
}

#[cfg(unix)]
#[test]
fn test_symlinked_root_renames_top_level_files() {
    let temp = TempDir::new().unwrap();
    let real = temp.path().join("real");
    touch(&real.join("a.old"), "");
    touch(&real.join("sub/b.old"), "");
    let link = temp.path().join("link");
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let skipped = rename_tree(&link, "old", "new").unwrap();

    assert!(skipped.is_empty());
    assert_eq!(tree(&real), vec!["a.new", "sub/b.new"]);
}

#[cfg(unix)]
#[test]
fn test_file_symlink_is_renamed_not_its_target() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(&root.join("target.txt"), "payload");
    std::os::unix::fs::symlink(root.join("target.txt"), root.join("link.old")).unwrap();

    rename_tree(root, "old", "new").unwrap();

    let renamed = root.join("link.new");
    assert!(fs::symlink_metadata(&renamed).unwrap().file_type().is_symlink());
    assert!(fs::symlink_metadata(root.join("link.old")).is_err());
    assert_eq!(fs::read_link(&renamed).unwrap(), root.join("target.txt"));
    assert_eq!(fs::read_to_string(root.join("target.txt")).unwrap(), "payload");
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_name_is_reported_and_left_alone() {
    use reext_ops::WarningKind;
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let bad = root.join(OsStr::from_bytes(b"bad\xff.old"));
    fs::write(&bad, b"").unwrap();
    touch(&root.join("good.old"), "");

    let outcome = TreeRenamer::new()
        .run(&RenameConfig::new(root, "old", "new"))
        .unwrap();

    assert_eq!(outcome.renamed.len(), 1);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].kind, WarningKind::InvalidName);
    assert!(bad.exists());
    assert!(root.join("good.new").exists());
}
