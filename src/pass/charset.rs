//! Character classes and alphabet assembly.

use std::fmt;
use std::str::FromStr;

const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGIT: &str = "0123456789";
const PUNCTUATION: &str = "!();:'\",.?/";
const SPECIAL: &str = "@#$%^&_|{}[]<>+-*=";

/// A named group of characters usable as an alphabet component.
///
/// Variant order is the order classes appear in an assembled alphabet when
/// taken from a settings selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum CharacterClass {
    Upper,
    Lower,
    Digit,
    Punctuation,
    Special,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 5] = [
        CharacterClass::Upper,
        CharacterClass::Lower,
        CharacterClass::Digit,
        CharacterClass::Punctuation,
        CharacterClass::Special,
    ];

    /// The literal characters of this class.
    pub fn alphabet(self) -> &'static str {
        match self {
            CharacterClass::Upper => UPPER,
            CharacterClass::Lower => LOWER,
            CharacterClass::Digit => DIGIT,
            CharacterClass::Punctuation => PUNCTUATION,
            CharacterClass::Special => SPECIAL,
        }
    }

    /// Name used in the persisted settings record.
    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Upper => "UPPER",
            CharacterClass::Lower => "LOWER",
            CharacterClass::Digit => "DIGIT",
            CharacterClass::Punctuation => "PUNCTUATION",
            CharacterClass::Special => "SPECIAL",
        }
    }

    /// Lowercase label shown next to the check box.
    pub fn label(self) -> &'static str {
        match self {
            CharacterClass::Upper => "upper",
            CharacterClass::Lower => "lower",
            CharacterClass::Digit => "digit",
            CharacterClass::Punctuation => "punctuation",
            CharacterClass::Special => "special",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown character class: {0}")]
pub struct UnknownClass(pub String);

impl FromStr for CharacterClass {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        CharacterClass::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownClass(trimmed.to_string()))
    }
}

/// Concatenate the alphabets of `classes` in the order given.
///
/// Repeated classes contribute their characters again; an empty input gives
/// an empty alphabet.
pub fn build<I>(classes: I) -> String
where
    I: IntoIterator<Item = CharacterClass>,
{
    let mut alphabet = String::new();
    for class in classes {
        alphabet.push_str(class.alphabet());
    }
    alphabet
}

/// Number of characters in the alphabet assembled from `classes`.
pub fn size<I>(classes: I) -> usize
where
    I: IntoIterator<Item = CharacterClass>,
{
    classes.into_iter().map(|c| c.alphabet().chars().count()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_is_the_ascii_uppercase_letters() {
        let alphabet = build([CharacterClass::Upper]);
        assert_eq!(alphabet.len(), 26);
        assert!(alphabet.chars().all(|c| c.is_ascii_uppercase()));
        assert_eq!(alphabet, ('A'..='Z').collect::<String>());
    }

    #[test]
    fn preserves_caller_order() {
        let forward = build([CharacterClass::Digit, CharacterClass::Upper]);
        let reverse = build([CharacterClass::Upper, CharacterClass::Digit]);
        assert!(forward.starts_with("0123456789A"));
        assert!(reverse.starts_with("ABC"));
        assert!(reverse.ends_with("Z0123456789"));
        assert_eq!(forward, build([CharacterClass::Digit, CharacterClass::Upper]));
    }

    #[test]
    fn repeated_classes_are_not_deduplicated() {
        let doubled = build([CharacterClass::Digit, CharacterClass::Digit]);
        assert_eq!(doubled, "01234567890123456789");
    }

    #[test]
    fn empty_selection_gives_empty_alphabet() {
        assert_eq!(build([]), "");
        assert_eq!(size([]), 0);
    }

    #[test]
    fn size_counts_every_class() {
        assert_eq!(size(CharacterClass::ALL), 26 + 26 + 10 + 11 + 18);
        assert_eq!(size(CharacterClass::ALL), build(CharacterClass::ALL).len());
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("upper".parse(), Ok(CharacterClass::Upper));
        assert_eq!(" PUNCTUATION ".parse(), Ok(CharacterClass::Punctuation));
        assert_eq!(
            "greek".parse::<CharacterClass>(),
            Err(UnknownClass("greek".to_string()))
        );
    }

    #[test]
    fn display_matches_persisted_name() {
        for class in CharacterClass::ALL {
            assert_eq!(class.to_string().parse(), Ok(class));
        }
    }
}
