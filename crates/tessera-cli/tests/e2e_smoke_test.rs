use std::fs;

use tempfile::tempdir;

use tessera_cli::{Args, CliError, LogLevel, run};

fn args(input: &str, output: &str) -> Args {
    Args {
        input: input.to_string(),
        output: output.to_string(),
        check: false,
        config: None,
        log_level: LogLevel::Off,
    }
}

/// A layout with a column gap and stale order values; loadable, but in
/// need of normalization.
const STALE_LAYOUT: &str = r#"[
    { "instanceId": "mi-b", "moduleId": "joint", "order": 9, "rowIndex": 0, "columnIndex": 3 },
    { "instanceId": "mi-a", "moduleId": "gas", "order": 4, "rowIndex": 0, "columnIndex": 0,
      "customName": "Root shielding" },
    { "instanceId": "mi-c", "moduleId": "gas", "order": 11, "rowIndex": 2, "columnIndex": 0 }
]"#;

/// Same instance id twice; must be rejected.
const DUPLICATE_LAYOUT: &str = r#"[
    { "instanceId": "mi-a", "moduleId": "gas", "order": 1, "rowIndex": 0, "columnIndex": 0 },
    { "instanceId": "mi-a", "moduleId": "gas", "order": 2, "rowIndex": 0, "columnIndex": 1 }
]"#;

#[test]
fn e2e_normalizes_stale_layout() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("layout.json");
    let output = temp_dir.path().join("normalized.json");
    fs::write(&input, STALE_LAYOUT).unwrap();

    run(&args(
        &input.to_string_lossy(),
        &output.to_string_lossy(),
    ))
    .expect("stale layout should normalize");

    let normalized: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let entries = normalized.as_array().unwrap();
    assert_eq!(entries.len(), 3);

    // Row-major order, columns contiguous, order from 1, names preserved.
    assert_eq!(entries[0]["instanceId"], "mi-a");
    assert_eq!(entries[0]["customName"], "Root shielding");
    assert_eq!(entries[1]["instanceId"], "mi-b");
    assert_eq!(entries[1]["columnIndex"], 1);
    // Row gaps survive normalization.
    assert_eq!(entries[2]["rowIndex"], 2);
    let orders: Vec<_> = entries.iter().map(|e| e["order"].as_u64().unwrap()).collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[test]
fn e2e_rejects_duplicate_instance_ids() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("layout.json");
    let output = temp_dir.path().join("normalized.json");
    fs::write(&input, DUPLICATE_LAYOUT).unwrap();

    let err = run(&args(
        &input.to_string_lossy(),
        &output.to_string_lossy(),
    ))
    .expect_err("duplicate ids must be rejected");

    assert!(matches!(err, CliError::Validation(_)));
    assert!(!output.exists(), "no output on validation failure");
}

#[test]
fn e2e_check_mode_writes_nothing() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("layout.json");
    let output = temp_dir.path().join("normalized.json");
    fs::write(&input, STALE_LAYOUT).unwrap();

    let mut check_args = args(&input.to_string_lossy(), &output.to_string_lossy());
    check_args.check = true;

    run(&check_args).expect("check of a loadable layout succeeds");
    assert!(!output.exists(), "check mode must not write output");
}

#[test]
fn e2e_rejects_malformed_json() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("layout.json");
    fs::write(&input, "{ not json ]").unwrap();

    let err = run(&args(&input.to_string_lossy(), "unused.json"))
        .expect_err("malformed input must be rejected");
    assert!(matches!(err, CliError::Engine(_)));
}

#[test]
fn e2e_overfull_row_is_reported_against_config() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("layout.json");
    let config = temp_dir.path().join("config.toml");

    // Three columns in row 0 is fine by default, too many with a
    // two-column config.
    let layout = r#"[
        { "instanceId": "mi-a", "moduleId": "gas", "order": 1, "rowIndex": 0, "columnIndex": 0 },
        { "instanceId": "mi-b", "moduleId": "gas", "order": 2, "rowIndex": 0, "columnIndex": 1 },
        { "instanceId": "mi-c", "moduleId": "gas", "order": 3, "rowIndex": 0, "columnIndex": 2 }
    ]"#;
    fs::write(&input, layout).unwrap();
    fs::write(&config, "[grid]\nrow_capacity = 2\n").unwrap();

    let mut strict_args = args(&input.to_string_lossy(), "unused.json");
    strict_args.check = true;
    strict_args.config = Some(config.to_string_lossy().to_string());

    let err = run(&strict_args).expect_err("row over configured capacity must be rejected");
    assert!(matches!(err, CliError::Validation(_)));
}
