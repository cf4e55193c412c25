use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use super::*;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"img").unwrap();
}

fn names(items: &[DiscoveredItem]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

fn sample_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "M001MT/a.jpg");
    touch(dir.path(), "M001MT2/a.jpg");
    touch(dir.path(), "batch/W011MW/b.png");
    touch(dir.path(), "ZZZZZZ/c.jpg");
    dir
}

#[test]
fn folder_mode_matches_exact_names_only() {
    let dir = sample_tree();
    let list = AllowList::new(["M001MT", "W011MW"]);

    let result = classify(dir.path(), &list, ScanMode::FolderName).unwrap();

    assert_eq!(names(&result.matched), vec!["M001MT", "W011MW"]);
    assert!(names(&result.unmatched).contains(&"M001MT2"));
    assert!(names(&result.unmatched).contains(&"ZZZZZZ"));
}

// Case-insensitive file systems cannot hold both spellings side by side.
#[cfg(target_os = "linux")]
#[test]
fn folder_mode_is_case_sensitive() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "M001MT/a.jpg");
    touch(dir.path(), "m001mt/a.jpg");
    let list = AllowList::new(["M001MT"]);

    let result = classify(dir.path(), &list, ScanMode::FolderName).unwrap();

    assert_eq!(names(&result.matched), vec!["M001MT"]);
    assert_eq!(names(&result.unmatched), vec!["m001mt"]);
}

#[test]
fn folder_mode_recurses_into_nested_folders() {
    let dir = sample_tree();
    let list = AllowList::new(["W011MW"]);

    let result = classify(dir.path(), &list, ScanMode::FolderName).unwrap();

    assert_eq!(result.matched.len(), 1);
    assert!(result.matched[0].path.ends_with("batch/W011MW"));
    assert!(names(&result.unmatched).contains(&"batch"));
}

#[test]
fn folder_mode_descends_into_matched_folders() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "M001MT/W011MW/x.jpg");
    let list = AllowList::new(["M001MT", "W011MW"]);

    let result = classify(dir.path(), &list, ScanMode::FolderName).unwrap();

    assert_eq!(names(&result.matched), vec!["M001MT", "W011MW"]);
}

#[test]
fn folder_mode_ignores_files_and_root() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "M001MT.jpg");
    let list = AllowList::new(["M001MT"]);

    let result = classify(dir.path(), &list, ScanMode::FolderName).unwrap();

    assert!(result.is_empty());
}

#[test]
fn partition_is_total_and_disjoint() {
    let dir = sample_tree();
    let list = AllowList::builtin();

    let result = classify(dir.path(), &list, ScanMode::FolderName).unwrap();

    let all_dirs = walkdir::WalkDir::new(dir.path())
        .min_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_dir())
        .count();
    assert_eq!(result.total(), all_dirs);

    let matched: HashSet<_> = result.matched.iter().map(|i| &i.path).collect();
    let unmatched: HashSet<_> = result.unmatched.iter().map(|i| &i.path).collect();
    assert!(matched.is_disjoint(&unmatched));
    assert_eq!(matched.len() + unmatched.len(), result.total());
}

#[test]
fn empty_allow_list_leaves_everything_unmatched() {
    let dir = sample_tree();
    let list = AllowList::default();

    let result = classify(dir.path(), &list, ScanMode::FolderName).unwrap();

    assert!(result.matched.is_empty());
    assert_eq!(result.unmatched.len(), 5);
}

#[test]
fn repeated_scans_are_stable() {
    let dir = sample_tree();
    let list = AllowList::builtin();

    let first = classify(dir.path(), &list, ScanMode::FolderName).unwrap();
    let second = classify(dir.path(), &list, ScanMode::FolderName).unwrap();

    assert_eq!(first, second);
}

#[test]
fn items_carry_absolute_paths() {
    let dir = sample_tree();
    let result = classify(dir.path(), &AllowList::builtin(), ScanMode::FolderName).unwrap();
    assert!(result.iter().all(|i| i.path.is_absolute()));
}

#[test]
fn filename_mode_extracts_prefix() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "A060MB-TX-001.png");
    touch(dir.path(), "ab.png");
    touch(dir.path(), "ZZZZZZ-1.jpg");
    let list = AllowList::new(["A060MB"]);

    let result = classify(dir.path(), &list, ScanMode::FilenamePrefix).unwrap();

    assert_eq!(names(&result.matched), vec!["A060MB-TX-001.png"]);
    assert_eq!(result.matched[0].id(), "A060MB");
    assert_eq!(result.matched[0].kind, ItemKind::File);

    let short = result
        .unmatched
        .iter()
        .find(|i| i.name == "ab.png")
        .unwrap();
    assert_eq!(short.extracted_id, None);
    assert_eq!(result.unmatched.len(), 2);
}

#[test]
fn filename_mode_skips_non_images_and_subfolders() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "M001MT-notes.txt");
    touch(dir.path(), "M001MT/inner.jpg");
    touch(dir.path(), "M001MT-1.JPG");
    let list = AllowList::new(["M001MT"]);

    let result = classify(dir.path(), &list, ScanMode::FilenamePrefix).unwrap();

    assert_eq!(names(&result.matched), vec!["M001MT-1.JPG"]);
    assert!(result.unmatched.is_empty());
}

#[test]
fn filename_mode_with_shape_policy() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "P003OL_front.jpg");
    let list = AllowList::new(["P003OL"]);

    let result = Classifier::new(&list)
        .with_mode(ScanMode::FilenamePrefix)
        .with_policy(ExtractionPolicy::ShapePrefix)
        .classify(dir.path())
        .unwrap();

    assert_eq!(result.matched_ids(), vec!["P003OL"]);
}

#[test]
fn custom_filter_replaces_image_set() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "M001MT-1.webp");
    touch(dir.path(), "M001MT-2.jpg");
    let list = AllowList::new(["M001MT"]);

    let result = Classifier::new(&list)
        .with_mode(ScanMode::FilenamePrefix)
        .with_filter(ExtensionFilter::new(["webp"]))
        .classify(dir.path())
        .unwrap();

    assert_eq!(names(&result.matched), vec!["M001MT-1.webp"]);
}

#[test]
fn excluded_directories_are_not_entered() {
    let dir = sample_tree();
    touch(dir.path(), "out/无法处理/ZZZZZZ/c.jpg");
    let list = AllowList::builtin();

    let result = Classifier::new(&list)
        .with_excluded([dir.path().join("out")])
        .classify(dir.path())
        .unwrap();

    assert!(result.iter().all(|i| !i.path.starts_with(dir.path().join("out"))));
    assert!(!names(&result.unmatched).contains(&"out"));
}

#[test]
fn missing_root_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = classify(
        &dir.path().join("missing"),
        &AllowList::builtin(),
        ScanMode::FolderName,
    )
    .unwrap_err();
    assert_eq!(err.error_type(), "NotFound");
}

#[test]
fn file_root_is_not_found() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "file.jpg");
    let err = classify(
        &dir.path().join("file.jpg"),
        &AllowList::builtin(),
        ScanMode::FolderName,
    )
    .unwrap_err();
    assert_eq!(err.error_type(), "NotFound");
}

#[cfg(unix)]
#[test]
fn unreadable_subtree_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    touch(dir.path(), "locked/M001MT/a.jpg");
    touch(dir.path(), "W011MW/b.jpg");
    let locked = dir.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits are not enforced for privileged users.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let list = AllowList::new(["M001MT", "W011MW"]);
    let result = classify(dir.path(), &list, ScanMode::FolderName);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let result = result.unwrap();
    assert_eq!(result.matched_ids(), vec!["W011MW"]);
    assert!(names(&result.unmatched).contains(&"locked"));
}
