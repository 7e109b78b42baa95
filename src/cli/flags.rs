use clap::Parser;

use crate::pass::CharacterClass;

/// Generate random passwords from selectable character classes.
///
/// Run without arguments for the interactive form.
#[derive(Debug, Parser)]
#[command(name = "pwgen", version)]
pub struct CliFlags {
    /// Minimum password length
    #[arg(short = 'm', long = "min", value_name = "N", allow_negative_numbers = true)]
    pub min: Option<i64>,

    /// Maximum password length
    #[arg(short = 'M', long = "max", value_name = "N", allow_negative_numbers = true)]
    pub max: Option<i64>,

    /// Exact password length (sets both bounds)
    #[arg(
        short,
        long,
        value_name = "N",
        allow_negative_numbers = true,
        conflicts_with_all = ["min", "max"]
    )]
    pub length: Option<i64>,

    /// Character classes to draw from, comma separated
    #[arg(
        short,
        long,
        value_name = "LIST",
        value_enum,
        value_delimiter = ',',
        ignore_case = true
    )]
    pub classes: Option<Vec<CharacterClass>>,

    /// Number of passwords to generate
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    pub number: usize,

    /// Copy to the clipboard instead of printing
    #[arg(short = 'b', long = "board")]
    pub clipboard: bool,

    /// Store the resulting lengths and classes for later runs
    #[arg(short, long)]
    pub save: bool,

    /// Start from the defaults instead of the stored settings
    #[arg(short, long)]
    pub default: bool,

    /// Print an entropy estimate to stderr
    #[arg(short, long)]
    pub entropy: bool,

    /// Suppress warnings, log output and confirmations
    #[arg(short, long)]
    pub quiet: bool,

    /// Open the interactive form
    #[arg(short, long, exclusive = true)]
    pub interactive: bool,
}

impl CliFlags {
    /// Lower and upper bound requested on the command line, in application order.
    pub fn bounds(&self) -> (Option<i64>, Option<i64>) {
        match self.length {
            Some(len) => (Some(len), Some(len)),
            None => (self.min, self.max),
        }
    }
}
