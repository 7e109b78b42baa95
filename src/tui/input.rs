use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Longest value the length fields accept.
pub const MAX_DIGITS: usize = 4;

/// Outcome of feeding one key to a [`DigitBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Continue,
    Commit(i64),
    Cancel,
}

/// Inline editor for a length field. Only decimal digits get in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitBuffer {
    digits: String,
    /// 0-based insertion point, `0..=digits.len()`.
    cursor: usize,
}

impl DigitBuffer {
    pub fn new(initial: usize) -> Self {
        let digits = initial.to_string();
        let cursor = digits.len();
        Self { digits, cursor }
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn apply(&mut self, key: KeyEvent) -> Edit {
        match key.code {
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Edit::Cancel;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.digits.clear();
                self.cursor = 0;
            }
            KeyCode::Esc => return Edit::Cancel,
            KeyCode::Enter | KeyCode::Tab => return Edit::Commit(self.value()),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.digits.remove(self.cursor);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.digits.len() {
                    self.digits.remove(self.cursor);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.digits.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.digits.len(),
            KeyCode::Char(c) if c.is_ascii_digit() && self.digits.len() < MAX_DIGITS => {
                self.digits.insert(self.cursor, c);
                self.cursor += 1;
            }
            _ => {}
        }
        Edit::Continue
    }

    /// An emptied field commits as zero.
    fn value(&self) -> i64 {
        self.digits.parse().unwrap_or(0)
    }
}
