/// Global flags available before or after subcommands.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalFlags {
    pub compact: bool,
    pub quiet: bool,
    pub verbose: bool,
}
