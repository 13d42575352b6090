use clap::Parser;
use outline_tree::cli::{Cli, Commands};
use outline_tree::main_lib;
use outline_tree::snapshot::TreeSnapshot;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn fixture_items() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/items.json")
        .to_string_lossy()
        .to_string()
}

#[test]
fn test_cli_defaults_to_run() {
    let cli = Cli::parse_from(["outline-tree"]);
    assert!(cli.command.is_none());

    let cli = Cli::parse_from(["outline-tree", "run", "--items", "tree.json"]);
    match cli.command {
        Some(Commands::Run { items, config }) => {
            assert_eq!(items.as_deref(), Some("tree.json"));
            assert!(config.is_none());
        }
        _ => panic!("expected run subcommand"),
    }
}

#[test]
fn test_cli_execute_arguments() {
    let cli = Cli::parse_from([
        "outline-tree",
        "execute",
        "--items",
        "tree.json",
        "-x",
        "sequence:[down,right]",
    ]);
    match cli.command {
        Some(Commands::Execute { items, command, output }) => {
            assert_eq!(items, "tree.json");
            assert_eq!(command, "sequence:[down,right]");
            assert!(output.is_none());
        }
        _ => panic!("expected execute subcommand"),
    }
}

#[test]
fn test_execute_matches_spec_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("state.json");

    let snapshot = main_lib::execute_command(
        &fixture_items(),
        "sequence:[down,right,up,left]",
        Some(output.to_str().unwrap()),
    )
    .unwrap();

    let names: Vec<&str> = snapshot.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert_eq!(snapshot.selected.as_deref(), Some("B"));
    assert!(!snapshot.rows[1].expanded);

    let saved: TreeSnapshot = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(saved, snapshot);
}

#[test]
fn test_screenshot_shows_nested_rows() {
    let screenshot = main_lib::generate_screenshot(
        &fixture_items(),
        Some("sequence:[activate:1,down,right]"),
        None,
        50,
        12,
    )
    .unwrap();

    assert!(screenshot.contains("▼ B"));
    assert!(screenshot.contains("  ▼ B2"));
    assert!(screenshot.contains("      B2a"));
    assert!(screenshot.contains("▶ C"));
}

#[test]
fn test_missing_items_file_is_an_error() {
    assert!(main_lib::execute_command("/nonexistent/items.json", "down", None).is_err());
}
