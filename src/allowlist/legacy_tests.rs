use super::*;

#[test]
fn extracts_single_quoted_list() {
    let source = r"
        var INPUT = getenv('PS_INPUT_DIR');
        var targetFolderNames = ['M001MT','M002MT', 'W013GZ'];
        try { main(); } catch (e) {}
    ";
    let ids = extract_from_script_source(source).unwrap();
    assert_eq!(ids, vec!["M001MT", "M002MT", "W013GZ"]);
}

#[test]
fn extracts_multiline_double_quoted_list() {
    let source = r#"
        const targetFolderNames = [
            "A060MB",
            "A060MC", // trailing comment
            "A060ME",
        ];
    "#;
    let ids = extract_from_script_source(source).unwrap();
    assert_eq!(ids, vec!["A060MB", "A060MC", "A060ME"]);
}

#[test]
fn keeps_duplicates_in_order() {
    let source = "targetFolderNames = ['W034MW','W011MW','W034MW']";
    let ids = extract_from_script_source(source).unwrap();
    assert_eq!(ids, vec!["W034MW", "W011MW", "W034MW"]);
}

#[test]
fn ignores_other_arrays() {
    let source = "var exts = ['psd', 'jpg'];\nvar targetFolderNames = ['M001MT'];";
    let ids = extract_from_script_source(source).unwrap();
    assert_eq!(ids, vec!["M001MT"]);
}

#[test]
fn missing_declaration_is_error() {
    let err = extract_from_script_source("var exts = ['psd'];").unwrap_err();
    assert!(err.to_string().contains("targetFolderNames"));
}

#[test]
fn empty_declaration_is_error() {
    let err = extract_from_script_source("var targetFolderNames = [];").unwrap_err();
    assert!(err.to_string().contains("empty"));
}
