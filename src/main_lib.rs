// Library entry points behind the CLI subcommands

use crate::app::App;
use crate::command::Command;
use crate::config::Config;
use crate::error::{Result, TreeError};
use crate::executor::Executor;
use crate::item::{demo_items, load_items_from_file, Item};
use crate::screenshot::render_to_string;
use crate::snapshot::TreeSnapshot;
use crate::test_runner::{TestResult, TestRunner};
use std::fs;
use std::path::Path;

/// Items from a file, or the demo tree
pub fn resolve_items(items_path: Option<&str>) -> Result<Vec<Item>> {
    match items_path {
        Some(path) => load_items_from_file(path),
        None => Ok(demo_items()),
    }
}

/// A loaded app over the given items, with a command already applied
fn prepared_app(items_path: &str, command_str: Option<&str>) -> Result<App> {
    let items = load_items_from_file(items_path)?;
    let mut app = App::new(items, Config::default());
    app.load();

    if let Some(command_str) = command_str {
        let command = Command::from_string(command_str).map_err(TreeError::Command)?;
        let result = Executor::execute(&mut app, &command);
        if let Some(status) = result.status_message {
            eprintln!("Status: {}", status);
        }
    }

    Ok(app)
}

fn write_output(output_path: Option<&str>, content: &str, what: &str) -> Result<()> {
    match output_path {
        Some(path) => {
            fs::write(path, content)?;
            println!("{} saved to: {}", what, path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

pub fn execute_command(items_path: &str, command_str: &str, output_path: Option<&str>) -> Result<TreeSnapshot> {
    let app = prepared_app(items_path, Some(command_str))?;
    let snapshot = TreeSnapshot::from_app(&app);

    let mut json = snapshot.to_json()?;
    json.push('\n');
    write_output(output_path, &json, "Result")?;

    Ok(snapshot)
}

pub fn generate_screenshot(
    items_path: &str,
    command_str: Option<&str>,
    output_path: Option<&str>,
    width: u16,
    height: u16,
) -> Result<String> {
    let mut app = prepared_app(items_path, command_str)?;
    let screenshot = render_to_string(&mut app, width, height)?;
    write_output(output_path, &screenshot, "Screenshot")?;
    Ok(screenshot)
}

pub fn run_script(
    script_path: &Path,
    items_path: Option<&str>,
    overwrite: bool,
) -> Result<TestResult> {
    let mut app = App::new(resolve_items(items_path)?, Config::default());
    app.load();

    let mut runner = TestRunner::from_file(script_path)?;
    runner.overwrite_mode = overwrite;
    runner.screenshot_base_dir = script_path.parent().map(Path::to_path_buf);

    log::info!("🧪 Running test script with {} commands", runner.commands.len());
    runner.run(&mut app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_items(dir: &TempDir) -> String {
        let path = dir.path().join("items.json");
        fs::write(
            &path,
            r#"[
                { "type": "leaf", "name": "A" },
                { "type": "group", "name": "B", "items": [
                    { "type": "leaf", "name": "B1" },
                    { "type": "leaf", "name": "B2" }
                ] }
            ]"#,
        )
        .unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_execute_command_writes_snapshot() {
        let dir = TempDir::new().unwrap();
        let items = write_items(&dir);
        let output = dir.path().join("out.json");

        let snapshot = execute_command(
            &items,
            "sequence:[down,right]",
            Some(output.to_str().unwrap()),
        )
        .unwrap();
        assert_eq!(snapshot.selected.as_deref(), Some("B1"));

        let written: TreeSnapshot =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written, snapshot);
    }

    #[test]
    fn test_execute_rejects_bad_command() {
        let dir = TempDir::new().unwrap();
        let items = write_items(&dir);
        let result = execute_command(&items, "sideways", None);
        assert!(matches!(result, Err(TreeError::Command(_))));
    }

    #[test]
    fn test_generate_screenshot() {
        let dir = TempDir::new().unwrap();
        let items = write_items(&dir);
        let output = dir.path().join("shot.txt");

        let screenshot =
            generate_screenshot(&items, Some("activate:1"), Some(output.to_str().unwrap()), 40, 8)
                .unwrap();
        assert!(screenshot.contains("▼ B"));
        assert_eq!(fs::read_to_string(&output).unwrap(), screenshot);
    }

    #[test]
    fn test_run_script_from_file() {
        let dir = TempDir::new().unwrap();
        let items = write_items(&dir);
        let script = dir.path().join("script");
        fs::write(&script, "key:down\nkey:enter\nassert:visible:A,B,B1,B2\n").unwrap();

        let result = run_script(&script, Some(&items), false).unwrap();
        assert!(result.success, "errors: {:?}", result.errors);
    }

    #[test]
    fn test_resolve_items_defaults_to_demo() {
        let items = resolve_items(None).unwrap();
        assert_eq!(items, demo_items());
    }
}
