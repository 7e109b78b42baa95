mod context;
mod flags;
pub mod prompts;
mod quiet;

use std::path::Path;

use crate::config::Config;
use crate::pass::GenerateError;
use crate::settings::SettingsError;

pub use flags::CliFlags;

/// Invalid input detected while preparing a run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Rejected(SettingsError),
    #[error(transparent)]
    Generate(GenerateError),
}

/// Run one non-interactive invocation.
pub fn run(flags: CliFlags, dir: &Path, config: &Config) -> anyhow::Result<()> {
    context::Context::new(flags, dir, config).run()
}
