//! State of the interactive form and its reaction to settings events.

use copypasta::ClipboardProvider;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{CryptoRng, Rng};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::input::{DigitBuffer, Edit};
use crate::pass::{CharacterClass, GenerateError, generate};
use crate::settings::{EventKind, Field, Origin, Settings, SettingsEvent, Subscription};

pub const NO_CLASS_MESSAGE: &str = "Select at least one character class";

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Redraw,
    Copy,
    /// Widen (positive) or narrow the panel.
    Resize(i16),
    Move(i16, i16),
    /// Save state and leave.
    Quit,
    /// Leave without saving.
    Abort,
}

/// Controls that can carry the red error highlight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlight {
    pub min: bool,
    pub max: bool,
    pub classes: bool,
}

pub struct Form {
    id: Origin,
    min_field: Origin,
    max_field: Origin,
    min_text: String,
    max_text: String,
    editing: Option<(Field, DigitBuffer)>,
    highlight: Highlight,
    message: Option<String>,
    password: Option<Zeroizing<String>>,
    events: Subscription,
}

impl Form {
    pub fn new(settings: &mut Settings) -> Self {
        Self {
            id: Origin::unique(),
            min_field: Origin::unique(),
            max_field: Origin::unique(),
            min_text: settings.min_length().to_string(),
            max_text: settings.max_length().to_string(),
            editing: None,
            highlight: Highlight::default(),
            message: None,
            password: None,
            events: settings.subscribe(),
        }
    }

    pub fn min_text(&self) -> &str {
        &self.min_text
    }

    pub fn max_text(&self) -> &str {
        &self.max_text
    }

    pub fn editing(&self) -> Option<(Field, &DigitBuffer)> {
        self.editing.as_ref().map(|(f, buf)| (*f, buf))
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|p| p.as_str())
    }

    /// Generation is only offered with a non-empty selection.
    pub fn can_generate(&self, settings: &Settings) -> bool {
        settings.has_classes()
    }

    pub fn handle_key<R>(&mut self, key: KeyEvent, settings: &mut Settings, rng: &mut R) -> Command
    where
        R: Rng + CryptoRng + ?Sized,
    {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Command::Abort;
        }

        if let Some((field, buf)) = self.editing.as_mut() {
            match buf.apply(key) {
                Edit::Continue => {}
                Edit::Cancel => self.editing = None,
                Edit::Commit(value) => {
                    let field = *field;
                    self.editing = None;
                    self.commit(field, value, settings);
                }
            }
            return Command::Redraw;
        }

        match key.code {
            KeyCode::Char('1') => self.begin_edit(Field::MinLength, settings.min_length()),
            KeyCode::Char('2') => self.begin_edit(Field::MaxLength, settings.max_length()),
            KeyCode::Char(c @ '3'..='7') => {
                let index = (c as u8 - b'3') as usize;
                self.toggle(CharacterClass::ALL[index], settings);
            }
            KeyCode::Char('n') | KeyCode::Char('N') => self.new_password(settings, rng),
            KeyCode::Char('c') | KeyCode::Char('C') => return Command::Copy,
            KeyCode::Char('<') => return Command::Resize(-2),
            KeyCode::Char('>') => return Command::Resize(2),
            KeyCode::Left => return Command::Move(-1, 0),
            KeyCode::Right => return Command::Move(1, 0),
            KeyCode::Up => return Command::Move(0, -1),
            KeyCode::Down => return Command::Move(0, 1),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Command::Quit,
            _ => {}
        }
        Command::Redraw
    }

    fn begin_edit(&mut self, field: Field, current: usize) {
        self.editing = Some((field, DigitBuffer::new(current)));
    }

    /// Push an edited length into the settings, tagged with the field's token.
    pub fn commit(&mut self, field: Field, value: i64, settings: &mut Settings) {
        match field {
            Field::MinLength => settings.set_min_length(value, Some(self.min_field)),
            Field::MaxLength => settings.set_max_length(value, Some(self.max_field)),
            Field::Classes => {}
        }
        self.sync(settings);
    }

    fn toggle(&mut self, class: CharacterClass, settings: &mut Settings) {
        let selected = settings.toggle_class(class, Some(self.id));
        debug!(class = class.label(), selected, "class toggled");
        if settings.has_classes() && self.highlight.classes {
            self.highlight.classes = false;
            self.message = None;
        }
        self.sync(settings);
    }

    pub fn new_password<R>(&mut self, settings: &Settings, rng: &mut R)
    where
        R: Rng + CryptoRng + ?Sized,
    {
        if !self.can_generate(settings) {
            self.highlight.classes = true;
            self.message = Some(NO_CLASS_MESSAGE.to_string());
            return;
        }
        match generate(
            &settings.alphabet(),
            settings.min_length(),
            settings.max_length(),
            rng,
        ) {
            Ok(password) => {
                self.password = Some(password);
                self.message = None;
            }
            Err(GenerateError::EmptyAlphabet) => {
                self.highlight.classes = true;
                self.message = Some(NO_CLASS_MESSAGE.to_string());
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    pub fn copy<C>(&mut self, clipboard: &mut C)
    where
        C: ClipboardProvider + ?Sized,
    {
        let Some(password) = self.password.as_ref() else {
            self.message = Some("Nothing to copy yet".to_string());
            return;
        };
        match clipboard.set_contents(password.to_string()) {
            Ok(()) => self.message = Some("Copied to clipboard".to_string()),
            Err(e) => {
                warn!("clipboard write failed: {e}");
                self.message = Some(format!("Clipboard error: {e}"));
            }
        }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Apply every queued settings event.
    pub fn sync(&mut self, settings: &Settings) {
        let events: Vec<SettingsEvent> = self.events.pending().collect();
        for event in events {
            self.on_event(settings, event);
        }
    }

    fn on_event(&mut self, settings: &Settings, event: SettingsEvent) {
        if event.is_from(self.id) {
            return;
        }
        match event.kind {
            EventKind::Changed(Field::MinLength) => {
                self.min_text = settings.min_length().to_string();
                self.clear_error(event.origin);
            }
            EventKind::Changed(Field::MaxLength) => {
                self.max_text = settings.max_length().to_string();
                self.clear_error(event.origin);
            }
            EventKind::Changed(Field::Classes) => {
                if settings.has_classes() {
                    self.highlight.classes = false;
                }
            }
            EventKind::Rejected(error) => {
                self.message = Some(error.to_string());
                self.mark_error(event.origin);
            }
        }
    }

    fn clear_error(&mut self, origin: Option<Origin>) {
        if origin == Some(self.min_field) {
            self.highlight.min = false;
        } else if origin == Some(self.max_field) {
            self.highlight.max = false;
        }
        self.message = None;
    }

    fn mark_error(&mut self, origin: Option<Origin>) {
        if origin == Some(self.min_field) {
            self.highlight.min = true;
        } else if origin == Some(self.max_field) {
            self.highlight.max = true;
        }
    }

    /// Stop listening to `settings`.
    pub fn detach(self, settings: &mut Settings) {
        settings.unsubscribe(self.events.id());
        debug!(remaining = settings.subscriber_count(), "form detached");
    }

    #[cfg(test)]
    fn field_tokens(&self) -> (Origin, Origin) {
        (self.min_field, self.max_field)
    }
}
