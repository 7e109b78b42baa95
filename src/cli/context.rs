//! CLI context - bundles settings, flags, and the run's origin token.

use std::io::{self, ErrorKind};
use std::path::Path;

use anyhow::Context as _;
use copypasta::{ClipboardContext, ClipboardProvider};
use rand::rngs::OsRng;
use tracing::{debug, warn};
use zeroize::Zeroize;

use super::{CliError, CliFlags, prompts, quiet};
use crate::config::Config;
use crate::pass::output::{OutputError, collect_batch, write_batch};
use crate::pass::{GenerateError, charset};
use crate::settings::{EventKind, Origin, Settings, SettingsRecord, Subscription, file};
use crate::terminal::entropy_summary;

/// Application context for CLI mode.
pub struct Context<'a> {
    pub settings: Settings,
    pub flags: CliFlags,
    dir: &'a Path,
    origin: Origin,
    events: Subscription,
}

impl<'a> Context<'a> {
    /// Start from the stored settings, or from the configured defaults
    /// when `--default` is given.
    pub fn new(flags: CliFlags, dir: &'a Path, config: &Config) -> Self {
        let mut settings = if flags.default {
            Settings::from_record(SettingsRecord::with_classes(
                config.default_classes.classes(),
            ))
        } else {
            Settings::load_from_dir(dir, config.default_classes)
        };
        let events = settings.subscribe();
        Self {
            settings,
            flags,
            dir,
            origin: Origin::unique(),
            events,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        quiet::set(self.flags.quiet);
        self.apply_flags()?;
        if !self.settings.has_classes() {
            return Err(CliError::Generate(GenerateError::EmptyAlphabet).into());
        }
        if self.flags.save {
            self.save();
        }
        if self.flags.entropy {
            let size = charset::size(self.settings.classes().iter().copied());
            let summary =
                entropy_summary(self.settings.min_length(), self.settings.max_length(), size);
            prompts::entropy(&summary, size);
        }
        self.generate_output()
    }

    /// Apply length and class flags in the order min, max, classes, then
    /// fail on the first rejection this run caused.
    fn apply_flags(&mut self) -> Result<(), CliError> {
        let origin = Some(self.origin);
        let (min, max) = self.flags.bounds();
        if let Some(min) = min {
            self.settings.set_min_length(min, origin);
        }
        if let Some(max) = max {
            self.settings.set_max_length(max, origin);
        }
        if let Some(classes) = &self.flags.classes {
            self.settings.set_classes(classes.iter().copied(), origin);
        }

        for event in self.events.pending() {
            if !event.is_from(self.origin) {
                continue;
            }
            match event.kind {
                EventKind::Rejected(error) => return Err(CliError::Rejected(error)),
                EventKind::Changed(field) => debug!(%field, "changed from command line"),
            }
        }
        Ok(())
    }

    fn save(&self) {
        match self.settings.save_to_dir(self.dir) {
            Ok(()) => prompts::settings_saved(&file::path(self.dir).display().to_string()),
            Err(e) => {
                warn!("failed to save settings: {e}");
                prompts::warn(&format!("Failed to save settings: {e}"));
            }
        }
    }

    /// Generate passwords and handle output.
    fn generate_output(&mut self) -> anyhow::Result<()> {
        if self.flags.clipboard {
            match ClipboardContext::new() {
                Ok(ctx) => return self.copy_to(ctx),
                Err(e) => {
                    debug!("clipboard unavailable: {e}");
                    prompts::clipboard_fallback();
                }
            }
        }

        let alphabet = self.settings.alphabet();
        let result = write_batch(
            io::stdout().lock(),
            &alphabet,
            self.settings.min_length(),
            self.settings.max_length(),
            self.flags.number,
            &mut OsRng,
        );
        match result {
            Ok(()) => Ok(()),
            Err(OutputError::Generate(e)) => Err(CliError::Generate(e).into()),
            // Reader went away, e.g. piped into `head`.
            Err(OutputError::Io(e)) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
            Err(OutputError::Io(e)) => Err(e).context("failed to write passwords"),
        }
    }

    fn copy_to(&self, mut ctx: ClipboardContext) -> anyhow::Result<()> {
        let passwords = collect_batch(
            &self.settings.alphabet(),
            self.settings.min_length(),
            self.settings.max_length(),
            self.flags.number,
            &mut OsRng,
        )
        .map_err(CliError::Generate)?;

        ctx.set_contents(passwords.to_string())
            .map_err(|e| anyhow::anyhow!("clipboard error: {e}"))?;
        if let Ok(mut retrieved) = ctx.get_contents() {
            retrieved.zeroize();
        }
        prompts::clipboard_copied(self.flags.number);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultSelection;
    use crate::pass::CharacterClass;
    use crate::settings::SettingsError;
    use crate::settings::Field;
    use clap::Parser;

    fn context<'a>(dir: &'a Path, config: &Config, args: &[&str]) -> Context<'a> {
        let flags =
            CliFlags::try_parse_from(std::iter::once("pwgen").chain(args.iter().copied())).unwrap();
        Context::new(flags, dir, config)
    }

    #[test]
    fn flags_apply_in_order_with_cascade() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path(), &Config::default(), &["-m", "20", "-M", "10"]);
        ctx.apply_flags().unwrap();
        // min 20 raised max to 20, then max 10 lowered min to 10.
        assert_eq!(ctx.settings.min_length(), 10);
        assert_eq!(ctx.settings.max_length(), 10);
    }

    #[test]
    fn negative_length_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path(), &Config::default(), &["--max", "-4"]);
        let err = ctx.apply_flags().unwrap_err();
        assert!(matches!(
            err,
            CliError::Rejected(SettingsError::NegativeLength {
                field: Field::MaxLength,
                value: -4
            })
        ));
        assert_eq!(ctx.settings.max_length(), 8);
    }

    #[test]
    fn classes_replace_the_stored_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path(), &Config::default(), &["-c", "lower"]);
        ctx.apply_flags().unwrap();
        assert_eq!(
            ctx.settings.classes().iter().copied().collect::<Vec<_>>(),
            vec![CharacterClass::Lower]
        );
    }

    #[test]
    fn empty_default_selection_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            default_classes: DefaultSelection::None,
            ..Config::default()
        };
        let mut ctx = context(dir.path(), &config, &["-q"]);
        let err = ctx.run().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Generate(GenerateError::EmptyAlphabet))
        ));
    }

    #[test]
    fn default_flag_ignores_stored_settings() {
        let dir = tempfile::tempdir().unwrap();
        let stored = SettingsRecord {
            min_length: 30,
            max_length: 40,
            classes: [CharacterClass::Digit].into_iter().collect(),
        };
        file::write(dir.path(), &stored).unwrap();

        let ctx = context(dir.path(), &Config::default(), &[]);
        assert_eq!(ctx.settings.record(), stored);

        let ctx = context(dir.path(), &Config::default(), &["-d"]);
        assert_eq!(ctx.settings.min_length(), 8);
        assert_eq!(ctx.settings.classes().len(), 5);
    }
}
