use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "outline-tree")]
#[command(about = "A keyboard- and mouse-driven collapsible tree list for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive TUI (default)
    Run {
        /// JSON file with the items to show (a demo tree is used when omitted)
        #[arg(short, long)]
        items: Option<String>,
        /// JSON configuration file
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Render the tree after a command and print it as text
    Screenshot {
        /// JSON file with the items to show
        #[arg(short, long)]
        items: String,
        /// Command to apply before rendering (e.g., "sequence:[down,right]")
        #[arg(short = 'x', long)]
        command: Option<String>,
        /// Output file for the screenshot (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
        /// Terminal width for rendering
        #[arg(long, default_value = "80")]
        width: u16,
        /// Terminal height for rendering
        #[arg(long, default_value = "24")]
        height: u16,
    },
    /// Execute a command against a freshly loaded tree and output the resulting state
    Execute {
        /// JSON file with the items to show
        #[arg(short, long)]
        items: String,
        /// Command to execute (e.g., "down", "activate:1", "sequence:[down,right]")
        #[arg(short = 'x', long)]
        command: String,
        /// Output file for the resulting state (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Run a headless test script
    Test {
        /// Path to the script file
        #[arg(short, long)]
        script: String,
        /// JSON file with the items to show (a demo tree is used when omitted)
        #[arg(short, long)]
        items: Option<String>,
        /// Write screenshots instead of verifying them
        #[arg(long)]
        overwrite: bool,
        /// Log to stderr
        #[arg(short, long)]
        verbose: bool,
    },
}
