use anno_config::AnnoConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod convert;
pub mod kinds;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, config: &AnnoConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let pretty = config.general.pretty && !flags.compact;
    let default_entity = config.general.default_entity.as_str();

    match command {
        Commands::Decode(args) => convert::decode(&args, default_entity, pretty),
        Commands::Encode(args) => convert::encode(&args, default_entity, pretty),
        Commands::Roundtrip(args) => convert::roundtrip(&args, default_entity, pretty),
        Commands::Kinds => kinds::handle(pretty),
    }
}
