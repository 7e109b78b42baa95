//! Change notifications broadcast by [`Settings`](super::Settings).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, TryIter};

static NEXT_ORIGIN: AtomicU64 = AtomicU64::new(1);

/// Which part of the settings changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    MinLength,
    MaxLength,
    Classes,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::MinLength => "minimum length",
            Field::MaxLength => "maximum length",
            Field::Classes => "character classes",
        })
    }
}

/// Opaque token naming whoever requested a mutation.
///
/// Observers hold their own tokens and compare them against
/// [`SettingsEvent::origin`] to recognise changes they caused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Origin(u64);

impl Origin {
    /// A token distinct from every other token created in this process.
    pub fn unique() -> Self {
        Origin(NEXT_ORIGIN.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{field} must not be negative (got {value})")]
    NegativeLength { field: Field, value: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Changed(Field),
    Rejected(SettingsError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsEvent {
    pub kind: EventKind,
    pub origin: Option<Origin>,
}

impl SettingsEvent {
    pub fn changed(field: Field, origin: Option<Origin>) -> Self {
        Self {
            kind: EventKind::Changed(field),
            origin,
        }
    }

    pub fn rejected(error: SettingsError, origin: Option<Origin>) -> Self {
        Self {
            kind: EventKind::Rejected(error),
            origin,
        }
    }

    /// True when `token` caused this event.
    pub fn is_from(&self, token: Origin) -> bool {
        self.origin == Some(token)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub(super) u64);

/// Receiving end of a settings subscription.
///
/// Dropping it unsubscribes on the next broadcast.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    events: Receiver<SettingsEvent>,
}

impl Subscription {
    pub(super) fn new(id: SubscriberId, events: Receiver<SettingsEvent>) -> Self {
        Self { id, events }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Events queued since the last call, oldest first. Never blocks.
    pub fn pending(&self) -> TryIter<'_, SettingsEvent> {
        self.events.try_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_unique() {
        let a = Origin::unique();
        let b = Origin::unique();
        assert_ne!(a, b);
        assert!(SettingsEvent::changed(Field::Classes, Some(a)).is_from(a));
        assert!(!SettingsEvent::changed(Field::Classes, Some(a)).is_from(b));
        assert!(!SettingsEvent::changed(Field::Classes, None).is_from(a));
    }

    #[test]
    fn rejection_message_names_the_field() {
        let err = SettingsError::NegativeLength {
            field: Field::MaxLength,
            value: -4,
        };
        assert_eq!(err.to_string(), "maximum length must not be negative (got -4)");
    }
}
