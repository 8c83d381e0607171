//! Cards in play.
//!
//! A `BoardCard` is an [`EventRecord`] tagged with the id it received when
//! the deck was built. Ids come from catalog positions, so two cards with
//! identical dates are still distinct cards.

use serde::{Deserialize, Serialize};

use super::record::EventRecord;

/// Identifier of a card within one dealt deck.
///
/// Equal to the record's index in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A record dealt into a game.
///
/// Serializes as the catalog record with an extra `id` field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCard {
    /// Deck-unique id.
    pub id: CardId,

    /// The underlying event.
    #[serde(flatten)]
    pub record: EventRecord,
}

impl BoardCard {
    /// Tag a record with an id.
    #[must_use]
    pub fn new(id: CardId, record: EventRecord) -> Self {
        Self { id, record }
    }

    /// The event's signed year.
    #[must_use]
    pub fn date(&self) -> i64 {
        self.record.date
    }
}
