//! Password generation settings.
//!
//! [`Settings`] holds the length bounds and the class selection and
//! broadcasts a [`SettingsEvent`] to every subscriber whenever a value
//! actually changes. Negative lengths are not reported to the caller; they
//! are broadcast as [`EventKind::Rejected`] so the control that produced the
//! value can show the error.

mod event;
pub mod file;
pub mod geometry;

use std::collections::BTreeSet;
use std::sync::mpsc::{self, Sender};

use tracing::debug;

use crate::pass::{CharacterClass, charset};

pub use event::{
    EventKind, Field, Origin, SettingsError, SettingsEvent, SubscriberId, Subscription,
};

pub const DEFAULT_LENGTH: usize = 8;

/// Plain values of a [`Settings`], without subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsRecord {
    pub min_length: usize,
    pub max_length: usize,
    pub classes: BTreeSet<CharacterClass>,
}

impl SettingsRecord {
    pub fn with_classes(classes: BTreeSet<CharacterClass>) -> Self {
        Self {
            min_length: DEFAULT_LENGTH,
            max_length: DEFAULT_LENGTH,
            classes,
        }
    }
}

#[derive(Debug)]
pub struct Settings {
    min_length: usize,
    max_length: usize,
    classes: BTreeSet<CharacterClass>,
    subscribers: Vec<(SubscriberId, Sender<SettingsEvent>)>,
    next_subscriber: u64,
}

impl Settings {
    /// Build from stored values, raising `max_length` to `min_length` if the
    /// record has them inverted.
    pub fn from_record(record: SettingsRecord) -> Self {
        let max_length = record.max_length.max(record.min_length);
        if max_length != record.max_length {
            debug!(
                min = record.min_length,
                max = record.max_length,
                "stored bounds inverted, raising maximum"
            );
        }
        Self {
            min_length: record.min_length,
            max_length,
            classes: record.classes,
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    pub fn record(&self) -> SettingsRecord {
        SettingsRecord {
            min_length: self.min_length,
            max_length: self.max_length,
            classes: self.classes.clone(),
        }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn classes(&self) -> &BTreeSet<CharacterClass> {
        &self.classes
    }

    pub fn contains(&self, class: CharacterClass) -> bool {
        self.classes.contains(&class)
    }

    pub fn has_classes(&self) -> bool {
        !self.classes.is_empty()
    }

    /// Alphabet of the selected classes, in class order.
    pub fn alphabet(&self) -> String {
        charset::build(self.classes.iter().copied())
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    /// Set the minimum length, raising the maximum to match if needed.
    pub fn set_min_length(&mut self, value: i64, origin: Option<Origin>) {
        let Some(value) = self.checked_length(Field::MinLength, value, origin) else {
            return;
        };
        if value == self.min_length {
            return;
        }
        debug!(value, "minimum length changed");
        self.min_length = value;
        self.notify(SettingsEvent::changed(Field::MinLength, origin));

        if self.max_length < value {
            self.max_length = value;
            self.notify(SettingsEvent::changed(Field::MaxLength, origin));
        }
    }

    /// Set the maximum length, lowering the minimum to match if needed.
    pub fn set_max_length(&mut self, value: i64, origin: Option<Origin>) {
        let Some(value) = self.checked_length(Field::MaxLength, value, origin) else {
            return;
        };
        if value == self.max_length {
            return;
        }
        debug!(value, "maximum length changed");
        self.max_length = value;
        self.notify(SettingsEvent::changed(Field::MaxLength, origin));

        if self.min_length > value {
            self.min_length = value;
            self.notify(SettingsEvent::changed(Field::MinLength, origin));
        }
    }

    /// Replace the whole selection.
    pub fn set_classes<I>(&mut self, classes: I, origin: Option<Origin>)
    where
        I: IntoIterator<Item = CharacterClass>,
    {
        let classes: BTreeSet<CharacterClass> = classes.into_iter().collect();
        if classes == self.classes {
            return;
        }
        self.classes = classes;
        self.notify(SettingsEvent::changed(Field::Classes, origin));
    }

    pub fn add_class(&mut self, class: CharacterClass, origin: Option<Origin>) {
        if self.classes.insert(class) {
            self.notify(SettingsEvent::changed(Field::Classes, origin));
        }
    }

    pub fn remove_class(&mut self, class: CharacterClass, origin: Option<Origin>) {
        if self.classes.remove(&class) {
            self.notify(SettingsEvent::changed(Field::Classes, origin));
        }
    }

    /// Flip `class` and return whether it is now selected.
    pub fn toggle_class(&mut self, class: CharacterClass, origin: Option<Origin>) -> bool {
        if self.contains(class) {
            self.remove_class(class, origin);
            false
        } else {
            self.add_class(class, origin);
            true
        }
    }

    // ------------------------------------------------------------------
    // Subscribers
    // ------------------------------------------------------------------

    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, tx));
        Subscription::new(id, rx)
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&mut self, event: SettingsEvent) {
        self.subscribers.retain(|(_, tx)| tx.send(event.clone()).is_ok());
    }

    fn checked_length(
        &mut self,
        field: Field,
        value: i64,
        origin: Option<Origin>,
    ) -> Option<usize> {
        match usize::try_from(value) {
            Ok(v) => Some(v),
            Err(_) => {
                debug!(%field, value, "rejected negative length");
                self.notify(SettingsEvent::rejected(
                    SettingsError::NegativeLength { field, value },
                    origin,
                ));
                None
            }
        }
    }
}
