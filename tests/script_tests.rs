use outline_tree::app::App;
use outline_tree::config::Config;
use outline_tree::item::load_items_from_file;
use outline_tree::test_runner::TestRunner;
use std::path::{Path, PathBuf};

/// Runs a script from tests/scripts against the shared fixture tree
fn run_script_test(name: &str) {
    let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests");
    let items = load_items_from_file(base.join("fixtures/items.json"))
        .unwrap_or_else(|e| panic!("Failed to load fixture items: {}", e));

    let mut app = App::new(items, Config::default());
    app.load();

    let script: PathBuf = base.join("scripts").join(format!("{}.script", name));
    let runner = TestRunner::from_file(&script)
        .unwrap_or_else(|e| panic!("Failed to parse {:?}: {}", script, e));

    let result = runner
        .run(&mut app)
        .unwrap_or_else(|e| panic!("Script {} aborted: {}", name, e));

    if !result.success {
        result.print_summary();
        panic!("Script test '{}' failed: {:?}", name, result.errors);
    }
    assert!(result.assertions_passed > 0, "script '{}' asserted nothing", name);
}

#[test]
fn load_and_navigate() {
    run_script_test("load_and_navigate");
}

#[test]
fn expand_collapse() {
    run_script_test("expand_collapse");
}

#[test]
fn double_click() {
    run_script_test("double_click");
}

#[test]
fn clear_and_reload() {
    run_script_test("clear_and_reload");
}
