use crate::app::App;
use crate::command::Command;
use crate::error::{Result, TreeError};
use crate::event::{handle_event, handle_mouse};
use crate::executor::Executor;
use crate::screenshot::render_to_string;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Script format for headless testing
///
/// Each non-empty line is one command:
/// - `key:<keyname>` - Send a key event (e.g., `key:down`, `key:enter`, `key:q`)
/// - `dblclick:<index>` - Double click the visible row at that index
/// - `command:<command>` - Run a textual command (e.g., `command:activate:1`)
/// - `assert:<property>:<value>` - Assert tree state
/// - `screenshot:<file>` - Compare (or with overwrite, write) a text screenshot
/// - `# comment` - Comments (ignored)
///
/// Examples:
/// ```text
/// # Open the second group and check its first child is selected
/// key:down
/// key:right
/// assert:selected:B1
/// assert:visible:A,B,B1,B2
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptCommand {
    pub command_type: CommandType,
    pub value: String,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Key,
    DoubleClick,
    Command,
    Assert,
    Screenshot,
}

#[derive(Debug, Clone)]
pub struct TestRunner {
    pub commands: Vec<ScriptCommand>,
    pub overwrite_mode: bool,
    pub screenshot_base_dir: Option<PathBuf>,
    pub width: u16,
    pub height: u16,
}

impl Default for TestRunner {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            overwrite_mode: false,
            screenshot_base_dir: None,
            width: 120,
            height: 30,
        }
    }
}

impl TestRunner {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_string(&content)
    }

    pub fn from_string(content: &str) -> Result<Self> {
        let mut commands = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (command_type, value) = if let Some(value) = line.strip_prefix("key:") {
                (CommandType::Key, value)
            } else if let Some(value) = line.strip_prefix("dblclick:") {
                (CommandType::DoubleClick, value)
            } else if let Some(value) = line.strip_prefix("command:") {
                (CommandType::Command, value)
            } else if let Some(value) = line.strip_prefix("assert:") {
                (CommandType::Assert, value)
            } else if let Some(value) = line.strip_prefix("screenshot:") {
                (CommandType::Screenshot, value)
            } else {
                return Err(TreeError::Script(format!(
                    "Invalid command on line {}: {}",
                    line_num + 1,
                    line
                )));
            };

            commands.push(ScriptCommand {
                command_type,
                value: value.trim().to_string(),
                line: line_num + 1,
            });
        }

        Ok(TestRunner {
            commands,
            ..Self::default()
        })
    }

    pub fn run(&self, app: &mut App) -> Result<TestResult> {
        let start_time = Instant::now();
        let mut events_processed = 0;
        let mut assertions_passed = 0;
        let mut assertions_failed = 0;
        let mut errors = Vec::new();

        log::info!("🧪 Starting test run with {} commands", self.commands.len());

        for command in &self.commands {
            log::debug!("🧪 Executing line {}: {:?}", command.line, command);

            match command.command_type {
                CommandType::Key => match parse_key_event(&command.value) {
                    Ok(event) => {
                        handle_event(event, app);
                        events_processed += 1;
                    }
                    Err(e) => errors.push(format!("Line {}: {}", command.line, e)),
                },
                CommandType::DoubleClick => match self.double_click(app, &command.value) {
                    Ok(()) => events_processed += 1,
                    Err(e) => errors.push(format!("Line {}: {}", command.line, e)),
                },
                CommandType::Command => match Command::from_string(&command.value) {
                    Ok(parsed) => {
                        Executor::execute(app, &parsed);
                        events_processed += 1;
                    }
                    Err(e) => errors.push(format!(
                        "Line {}: {}",
                        command.line,
                        TreeError::Command(e)
                    )),
                },
                CommandType::Assert => match evaluate_assertion(app, &command.value) {
                    Ok(true) => {
                        assertions_passed += 1;
                        log::debug!("🧪 Assertion passed: {}", command.value);
                    }
                    Ok(false) => {
                        assertions_failed += 1;
                        errors.push(format!(
                            "Line {}: assertion failed: {} (selected: {:?}, visible: {:?})",
                            command.line,
                            command.value,
                            app.selected_name(),
                            app.visible_names()
                        ));
                    }
                    Err(e) => {
                        assertions_failed += 1;
                        errors.push(format!("Line {}: assertion error: {}", command.line, e));
                    }
                },
                CommandType::Screenshot => {
                    if let Err(e) = self.take_screenshot(app, &command.value) {
                        errors.push(format!("Line {}: screenshot failed: {}", command.line, e));
                    }
                }
            }
        }

        let duration = start_time.elapsed();
        log::info!("🧪 Test run completed in {:?}", duration);

        let success = assertions_failed == 0 && errors.is_empty();
        Ok(TestResult {
            duration,
            events_processed,
            assertions_passed,
            assertions_failed,
            errors,
            success,
        })
    }

    /// Draw once so the tree area is known, then click the row twice
    fn double_click(&self, app: &mut App, value: &str) -> Result<()> {
        let index: usize = value
            .parse()
            .map_err(|_| TreeError::Script(format!("Invalid row index: {}", value)))?;

        render_to_string(app, self.width, self.height)?;

        let area = app.ui.tree_area;
        let offset = app.ui.list_state.offset();
        let row = index
            .checked_sub(offset)
            .and_then(|relative| u16::try_from(relative).ok())
            .filter(|relative| *relative < area.height)
            .ok_or_else(|| TreeError::Script(format!("Row {} is not on screen", index)))?;

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: area.x,
            row: area.y + row,
            modifiers: KeyModifiers::NONE,
        };
        let now = Instant::now();
        app.last_click = None;
        handle_mouse(&click, app, now);
        handle_mouse(&click, app, now + Duration::from_millis(1));
        Ok(())
    }

    fn take_screenshot(&self, app: &mut App, filename: &str) -> Result<()> {
        let content = render_to_string(app, self.width, self.height)?;

        // Resolve the final screenshot path
        let final_path = match &self.screenshot_base_dir {
            Some(base_dir) => base_dir.join(filename),
            None => PathBuf::from(filename),
        };

        if self.overwrite_mode {
            std::fs::write(&final_path, content)?;
            println!("📸 Screenshot saved to: {}", final_path.display());
            return Ok(());
        }

        // Verify mode: compare with existing file
        match std::fs::read_to_string(&final_path) {
            Ok(existing_content) if existing_content == content => {
                println!("✅ Screenshot verification passed: {}", final_path.display());
                Ok(())
            }
            Ok(_) => Err(TreeError::Script(format!(
                "❌ Screenshot verification failed: {}. Content differs from expected. Use --overwrite to update.",
                final_path.display()
            ))),
            Err(_) => Err(TreeError::Script(format!(
                "❌ Screenshot verification failed: {} does not exist. Use --overwrite to create.",
                final_path.display()
            ))),
        }
    }
}

pub fn parse_key_event(key_str: &str) -> Result<Event> {
    let key_code = match key_str.to_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        _ => {
            let mut chars = key_str.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(TreeError::Script(format!("Unknown key: {}", key_str))),
            }
        }
    };

    Ok(Event::Key(KeyEvent::new(key_code, KeyModifiers::NONE)))
}

/// Check one `property:value` assertion against the app
pub fn evaluate_assertion(app: &App, assertion: &str) -> Result<bool> {
    let (property, expected) = assertion.split_once(':').ok_or_else(|| {
        TreeError::Script("Assertion must be in format 'property:value'".to_string())
    })?;

    let parse_bool = |name: &str| {
        expected
            .parse::<bool>()
            .map_err(|_| TreeError::Script(format!("{} expects boolean value", name)))
    };
    let find_row = |name: &str| app.tree.rows().iter().find(|row| row.name() == name);

    match property {
        "selected" => Ok(match app.selected_name() {
            Some(name) => name == expected,
            None => expected == "none" || expected.is_empty(),
        }),
        "visible" => {
            let expected_names: Vec<&str> = if expected.is_empty() {
                Vec::new()
            } else {
                expected.split(',').map(str::trim).collect()
            };
            Ok(app.visible_names() == expected_names)
        }
        "visible_count" => {
            let count = expected
                .parse::<usize>()
                .map_err(|_| TreeError::Script("visible_count expects numeric value".to_string()))?;
            Ok(app.tree.rows().len() == count)
        }
        "loaded" => Ok(app.tree.is_loaded() == parse_bool("loaded")?),
        "expanded" => Ok(find_row(expected).is_some_and(|row| row.is_expanded())),
        "collapsed" => Ok(find_row(expected).is_some_and(|row| !row.is_expanded())),
        "depth" => {
            let (name, depth) = expected.split_once('=').ok_or_else(|| {
                TreeError::Script("depth expects 'name=N'".to_string())
            })?;
            let depth = depth
                .parse::<usize>()
                .map_err(|_| TreeError::Script("depth expects numeric value".to_string()))?;
            Ok(find_row(name).is_some_and(|row| row.depth() == depth))
        }
        "status_contains" => Ok(app.ui.status_message.contains(expected)),
        _ => Err(TreeError::Script(format!(
            "Unknown assertion property: {}",
            property
        ))),
    }
}

#[derive(Debug, Clone)]
pub struct TestResult {
    pub duration: Duration,
    pub events_processed: usize,
    pub assertions_passed: usize,
    pub assertions_failed: usize,
    pub errors: Vec<String>,
    pub success: bool,
}

impl TestResult {
    pub fn print_summary(&self) {
        println!("🧪 Test Results:");
        println!("   Duration: {:?}", self.duration);
        println!("   Events processed: {}", self.events_processed);
        println!("   Assertions passed: {}", self.assertions_passed);
        println!("   Assertions failed: {}", self.assertions_failed);

        if !self.errors.is_empty() {
            println!("   Errors:");
            for error in &self.errors {
                println!("     - {}", error);
            }
        }

        if self.success {
            println!("   Status: ✅ PASSED");
        } else {
            println!("   Status: ❌ FAILED");
        }
    }
}
