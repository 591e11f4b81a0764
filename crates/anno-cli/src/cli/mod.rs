use clap::Parser;

pub mod entity;
pub mod global;
pub mod root_commands;

pub use entity::EntityArg;
pub use global::GlobalFlags;
pub use root_commands::{Commands, ConvertArgs};

/// Top-level CLI parser for the `anno` binary.
#[derive(Debug, Parser)]
#[command(
    name = "anno",
    version,
    about = "Convert annotation service payloads between wire and native JSON"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print single-line JSON regardless of the configured style
    #[arg(short, long, global = true)]
    pub compact: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            compact: self.compact,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}
