use super::*;

#[test]
fn output_format_from_str() {
    assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
}

#[test]
fn output_format_rejects_unknown() {
    let err = "sarif".parse::<OutputFormat>().unwrap_err();
    assert_eq!(err, "Unknown output format: sarif");
}

#[test]
fn formatter_matches_format() {
    let summary = RunSummary::default();

    let json = OutputFormat::Json
        .formatter(ColorMode::Never, 0)
        .format_summary(&summary)
        .unwrap();
    let text = OutputFormat::Text
        .formatter(ColorMode::Never, 0)
        .format_summary(&summary)
        .unwrap();

    assert!(json.trim_start().starts_with('{'));
    assert!(text.starts_with("Dispatched:"));
}
