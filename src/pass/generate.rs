//! Password generation.

use rand::{CryptoRng, Rng};
use zeroize::Zeroizing;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("no character class selected")]
    EmptyAlphabet,
    #[error("minimum length {min} is greater than maximum length {max}")]
    InvalidRange { min: usize, max: usize },
}

/// Generate one password from `alphabet` with a length drawn uniformly from
/// `min..=max`.
///
/// Each position is an independent uniform draw over the alphabet's
/// characters, so characters repeated in the alphabet are proportionally
/// more likely.
pub fn generate<R>(
    alphabet: &str,
    min: usize,
    max: usize,
    rng: &mut R,
) -> Result<Zeroizing<String>, GenerateError>
where
    R: Rng + CryptoRng + ?Sized,
{
    if alphabet.is_empty() {
        return Err(GenerateError::EmptyAlphabet);
    }
    if min > max {
        return Err(GenerateError::InvalidRange { min, max });
    }

    let chars: Zeroizing<Vec<char>> = Zeroizing::new(alphabet.chars().collect());
    let length = rng.gen_range(min..=max);

    let mut password = Zeroizing::new(String::with_capacity(length));
    for _ in 0..length {
        password.push(random_char(&chars, rng));
    }
    Ok(password)
}

#[inline]
fn random_char<R>(chars: &[char], rng: &mut R) -> char
where
    R: Rng + ?Sized,
{
    chars[rng.gen_range(0..chars.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pass::charset::{self, CharacterClass};
    use rand::SeedableRng;
    use rand::rngs::{OsRng, StdRng};

    #[test]
    fn fixed_length_from_two_letters() {
        for _ in 0..200 {
            let pass = generate("AB", 3, 3, &mut OsRng).unwrap();
            assert_eq!(pass.len(), 3);
            assert!(pass.chars().all(|c| c == 'A' || c == 'B'));
        }
    }

    #[test]
    fn length_stays_within_bounds() {
        let alphabet = charset::build(CharacterClass::ALL);
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 5];
        for _ in 0..2_000 {
            let pass = generate(&alphabet, 4, 8, &mut rng).unwrap();
            let len = pass.chars().count();
            assert!((4..=8).contains(&len), "length {len} out of range");
            seen[len - 4] = true;
        }
        assert!(seen.iter().all(|s| *s), "both endpoints must be reachable");
    }

    #[test]
    fn characters_come_from_the_alphabet() {
        let alphabet = charset::build([CharacterClass::Punctuation, CharacterClass::Special]);
        for _ in 0..200 {
            let pass = generate(&alphabet, 10, 40, &mut OsRng).unwrap();
            assert!(pass.chars().all(|c| alphabet.contains(c)));
        }
    }

    #[test]
    fn empty_alphabet_fails() {
        assert_eq!(
            generate("", 8, 8, &mut OsRng),
            Err(GenerateError::EmptyAlphabet)
        );
        assert_eq!(
            generate("", 0, 0, &mut OsRng),
            Err(GenerateError::EmptyAlphabet)
        );
    }

    #[test]
    fn inverted_range_fails() {
        assert_eq!(
            generate("abc", 9, 3, &mut OsRng),
            Err(GenerateError::InvalidRange { min: 9, max: 3 })
        );
    }

    #[test]
    fn zero_length_is_allowed() {
        let pass = generate("abc", 0, 0, &mut OsRng).unwrap();
        assert!(pass.is_empty());
    }

    #[test]
    fn same_seed_same_password() {
        let alphabet = charset::build([CharacterClass::Lower, CharacterClass::Digit]);
        let a = generate(&alphabet, 12, 20, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate(&alphabet, 12, 20, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }
}
