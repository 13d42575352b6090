use crate::{app::App, command::Command, controller::TreeEvent};

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub changed: bool,
    pub status_message: Option<String>,
}

/// Executes commands against an application
pub struct Executor;

impl Executor {
    /// Execute a command against the app and report what happened
    pub fn execute(app: &mut App, command: &Command) -> ExecutionResult {
        log::debug!("Executor: running {}", command);

        let changed = match command {
            Command::NavigateUp => app.dispatch(TreeEvent::NavigateUp),
            Command::NavigateDown => app.dispatch(TreeEvent::NavigateDown),
            Command::Expand => app.dispatch(TreeEvent::ExpandRequest),
            Command::Collapse => app.dispatch(TreeEvent::CollapseRequest),
            Command::Toggle => app.dispatch(TreeEvent::ConfirmToggle),
            Command::Activate(index) => {
                if app.tree.row_at(*index).is_none() {
                    return ExecutionResult {
                        changed: false,
                        status_message: Some(format!("No row at index {}", index)),
                    };
                }
                app.activate_index(*index)
            }
            Command::Load => {
                let was_loaded = app.tree.is_loaded();
                app.load();
                !was_loaded
            }
            Command::Clear => {
                let was_loaded = app.tree.is_loaded();
                app.clear();
                was_loaded
            }
            Command::Sequence(commands) => {
                let mut changed = false;
                for command in commands {
                    changed |= Self::execute(app, command).changed;
                }
                changed
            }
        };

        let status_message = if changed {
            Some(app.ui.status_message.clone())
        } else {
            None
        };

        ExecutionResult {
            changed,
            status_message,
        }
    }
}
