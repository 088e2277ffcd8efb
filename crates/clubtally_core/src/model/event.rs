//! Event domain model.
//!
//! # Responsibility
//! - Define point-earning event categories and their seed defaults.
//!
//! # Invariants
//! - `name` and `glyph` are non-empty after trimming.
//! - Events are immutable once created; the only mutation is deletion.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for events.
pub type EventId = Uuid;

/// Glyph used when the caller does not pick one.
pub const DEFAULT_GLYPH: &str = "⭐";

/// Glyph palette offered by the add-event form.
pub const GLYPH_PALETTE: [&str; 10] = ["⭐", "🎵", "🎤", "🎓", "🤝", "🍕", "🎸", "📚", "🏆", "🔥"];

/// Validation failures for event records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    NilUuid,
    EmptyName,
    EmptyGlyph,
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "event id must not be nil"),
            Self::EmptyName => write!(f, "event name must not be empty"),
            Self::EmptyGlyph => write!(f, "event glyph must not be empty"),
        }
    }
}

impl Error for EventValidationError {}

/// A named, point-valued category used when awarding points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventRecord")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    /// Any integer; zero and negative values are allowed.
    pub points: i64,
    pub glyph: String,
}

#[derive(Deserialize)]
struct EventRecord {
    id: EventId,
    name: String,
    points: i64,
    glyph: String,
}

impl TryFrom<EventRecord> for Event {
    type Error = EventValidationError;

    fn try_from(value: EventRecord) -> Result<Self, Self::Error> {
        let event = Self {
            id: value.id,
            name: value.name,
            points: value.points,
            glyph: value.glyph,
        };
        event.validate()?;
        Ok(event)
    }
}

impl Event {
    /// Creates an event with a generated ID.
    ///
    /// `name` is trimmed. A blank `glyph` falls back to [`DEFAULT_GLYPH`].
    pub fn new(
        name: impl Into<String>,
        points: i64,
        glyph: impl Into<String>,
    ) -> Result<Self, EventValidationError> {
        Self::with_id(Uuid::new_v4(), name, points, glyph)
    }

    /// Creates an event with a caller-provided ID.
    pub fn with_id(
        id: EventId,
        name: impl Into<String>,
        points: i64,
        glyph: impl Into<String>,
    ) -> Result<Self, EventValidationError> {
        let glyph = glyph.into();
        let glyph = match glyph.trim() {
            "" => DEFAULT_GLYPH.to_string(),
            trimmed => trimmed.to_string(),
        };
        let event = Self {
            id,
            name: name.into().trim().to_string(),
            points,
            glyph,
        };
        event.validate()?;
        Ok(event)
    }

    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.id.is_nil() {
            return Err(EventValidationError::NilUuid);
        }
        if self.name.trim().is_empty() {
            return Err(EventValidationError::EmptyName);
        }
        if self.glyph.trim().is_empty() {
            return Err(EventValidationError::EmptyGlyph);
        }
        Ok(())
    }
}

/// Returns the event list seeded on first run.
pub fn default_events() -> Vec<Event> {
    [
        ("University", 4, "🎓"),
        ("Gathering", 3, "🤝"),
        ("Symposium", 2, "🎤"),
        ("Karaoke", 1, "🎶"),
    ]
    .into_iter()
    .map(|(name, points, glyph)| Event {
        id: Uuid::new_v4(),
        name: name.to_string(),
        points,
        glyph: glyph.to_string(),
    })
    .collect()
}
