use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use outline_tree::app::App;
use outline_tree::cli::{Cli, Commands};
use outline_tree::config::Config;
use outline_tree::error::{Result, TreeError};
use outline_tree::{event, main_lib, ui};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::path::Path;
use std::{io, time::Duration};

fn init_file_logging() -> Result<()> {
    // The TUI owns the terminal, so logs only go to a file named by OUTLINE_TREE_LOG
    if let Ok(log_file) = std::env::var("OUTLINE_TREE_LOG") {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        env_logger::Builder::new()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .filter_level(log::LevelFilter::Debug)
            .init();

        log::info!("outline-tree starting up");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Test { verbose: true, .. }) = &cli.command {
        if std::env::var("OUTLINE_TREE_LOG").is_err() {
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Debug)
                .init();
        } else {
            init_file_logging()?;
        }
    } else {
        init_file_logging()?;
    }

    match cli.command.unwrap_or(Commands::Run {
        items: None,
        config: None,
    }) {
        Commands::Run { items, config } => run_interactive(items.as_deref(), config.as_deref()),
        Commands::Screenshot {
            items,
            command,
            output,
            width,
            height,
        } => {
            main_lib::generate_screenshot(&items, command.as_deref(), output.as_deref(), width, height)?;
            Ok(())
        }
        Commands::Execute {
            items,
            command,
            output,
        } => {
            main_lib::execute_command(&items, &command, output.as_deref())?;
            Ok(())
        }
        Commands::Test {
            script,
            items,
            overwrite,
            verbose: _,
        } => {
            log::info!("🧪 Script: {}", script);
            let result = main_lib::run_script(Path::new(&script), items.as_deref(), overwrite)?;
            result.print_summary();

            if result.success {
                Ok(())
            } else {
                Err(TreeError::Script("Test failed".to_string()))
            }
        }
    }
}

fn run_interactive(items_path: Option<&str>, config_path: Option<&str>) -> Result<()> {
    let items = main_lib::resolve_items(items_path)?;
    let config = Config::load(config_path.map(Path::new))?;

    let mut app = App::new(items, config);
    app.load();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    loop {
        // Handle forced screen redraw
        if app.ui.force_redraw {
            terminal.clear()?;
            app.ui.force_redraw = false;
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if crossterm::event::poll(tick_rate)? {
            let event = crossterm::event::read()?;
            event::handle_event(event, app);
        }

        if app.should_quit {
            log::info!("outline-tree shutting down");
            return Ok(());
        }
    }
}
