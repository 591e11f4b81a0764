use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::EntityArg;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Convert a wire payload into native JSON.
    Decode(ConvertArgs),
    /// Convert native JSON into a wire payload.
    Encode(ConvertArgs),
    /// Decode then re-encode a wire payload and report any difference.
    Roundtrip(ConvertArgs),
    /// List every enumeration and its wire tags.
    Kinds,
}

#[derive(Clone, Debug, Args)]
pub struct ConvertArgs {
    /// Entity schema to apply (defaults to `general.default_entity`)
    #[arg(short, long, value_enum)]
    pub entity: Option<EntityArg>,

    /// Input JSON file; omit or pass `-` to read stdin
    pub input: Option<PathBuf>,
}
