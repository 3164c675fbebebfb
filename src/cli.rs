//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

/// Resetter - telemetry identifier reset for VS Code based editors
///
/// Regenerates the machine identifiers Windsurf and Cursor keep in their storage file.
#[derive(Parser, Debug)]
#[command(
    name = "resetter",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Reset the telemetry IDs of Windsurf and Cursor",
    long_about = "Resetter regenerates the telemetry identifiers (machineId, macMachineId, \
                  sqmId, devDeviceId) that Windsurf and Cursor store in their \
                  globalStorage/storage.json, leaving every other setting untouched.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  resetter reset\n    \
                  resetter reset cursor\n    \
                  resetter reset windsurf --yes\n    \
                  resetter list\n    \
                  resetter show cursor"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reset the identifiers of an application
    Reset(ResetArgs),

    /// List supported applications
    List,

    /// Show the current identifiers of an application
    Show(ShowArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the reset command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Choose the application interactively:\n    resetter reset\n\n\
                  Reset Cursor:\n    resetter reset cursor\n\n\
                  Reset without confirmation:\n    resetter reset windsurf -y")]
pub struct ResetArgs {
    /// Application to reset (e.g., cursor, windsurf). Prompts if omitted
    pub profile: Option<String>,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show Cursor identifiers:\n    resetter show cursor")]
pub struct ShowArgs {
    /// Application to show
    pub profile: String,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    resetter completions --shell bash > ~/.bash_completion.d/resetter\n\n\
                  Generate zsh completions:\n    resetter completions --shell zsh > ~/.zfunc/_resetter\n\n\
                  Generate fish completions:\n    resetter completions --shell fish > ~/.config/fish/completions/resetter.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
