use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use super::*;
use crate::allowlist::DEFAULT_IDS;

const LEGACY_SCRIPT: &str = r#"
#target photoshop
var targetFolderNames = [
    "M001MT", "W011MW",
    'A060AC'
];
main();
"#;

fn store(tmp: &TempDir) -> ConfigStore {
    ConfigStore::new(Some(tmp.path().join("config.json")))
}

fn show(allow_list: Option<PathBuf>, irregular: bool) -> AllowListAction {
    AllowListAction::Show {
        allow_list,
        irregular,
    }
}

#[test]
fn show_builtin_by_default() {
    let tmp = TempDir::new().unwrap();

    let report = run_allowlist_impl(&show(None, false), &store(&tmp)).unwrap();

    assert_eq!(report.output.lines().count(), DEFAULT_IDS.len());
    assert!(report.output.starts_with("M001MT\n"));
    assert!(report.irregular.is_empty());
}

#[test]
fn show_reports_irregular_entries() {
    let tmp = TempDir::new().unwrap();
    let list = tmp.path().join("ids.txt");
    fs::write(&list, "M001MT\nM001MT2\nab\n").unwrap();

    let report = run_allowlist_impl(&show(Some(list.clone()), false), &store(&tmp)).unwrap();
    assert_eq!(report.output, "M001MT\nM001MT2\nab\n");
    assert_eq!(report.irregular, vec!["M001MT2", "ab"]);

    let only_odd = run_allowlist_impl(&show(Some(list), true), &store(&tmp)).unwrap();
    assert_eq!(only_odd.output, "M001MT2\nab\n");
}

#[test]
fn show_uses_configured_list() {
    let tmp = TempDir::new().unwrap();
    let list = tmp.path().join("ids.json");
    fs::write(&list, r#"["W011MW"]"#).unwrap();
    let store = store(&tmp);
    let mut config = store.load();
    config.set(ConfigKey::AllowListPath, Some(list.display().to_string()));
    store.save(&config).unwrap();

    let report = run_allowlist_impl(&show(None, false), &store).unwrap();

    assert_eq!(report.output, "W011MW\n");
}

#[test]
fn import_to_stdout() {
    let tmp = TempDir::new().unwrap();
    let script = tmp.path().join("batch.jsx");
    fs::write(&script, LEGACY_SCRIPT).unwrap();
    let action = AllowListAction::Import {
        script,
        output: None,
        save: false,
    };

    let report = run_allowlist_impl(&action, &store(&tmp)).unwrap();

    assert_eq!(report.output, "M001MT\nW011MW\nA060AC\n");
}

#[test]
fn import_to_file_and_save() {
    let tmp = TempDir::new().unwrap();
    let script = tmp.path().join("batch.jsx");
    fs::write(&script, LEGACY_SCRIPT).unwrap();
    let target = tmp.path().join("lists/ids.txt");
    let store = store(&tmp);
    let action = AllowListAction::Import {
        script,
        output: Some(target.clone()),
        save: true,
    };

    let report = run_allowlist_impl(&action, &store).unwrap();

    assert!(report.output.starts_with("Imported 3 codes into"));
    assert_eq!(AllowList::load(&target).unwrap().len(), 3);
    assert_eq!(store.load().path(ConfigKey::AllowListPath), Some(target));
}

#[test]
fn import_without_list_fails() {
    let tmp = TempDir::new().unwrap();
    let script = tmp.path().join("batch.jsx");
    fs::write(&script, "main();\n").unwrap();
    let action = AllowListAction::Import {
        script,
        output: None,
        save: false,
    };

    let err = run_allowlist_impl(&action, &store(&tmp)).unwrap_err();

    assert!(matches!(err, BatchError::AllowList(_)));
}
