//! Durable form of an in-progress game.
//!
//! Field names match the stored JSON used by the web client so that an
//! existing saved game keeps loading:
//!
//! ```json
//! {
//!   "gameState": "playing",
//!   "boardCards": [ { "id": 4, "date": "-33", "event": {..}, "bible_reference": {..} } ],
//!   "currentCard": { "id": 9, ... },
//!   "score": 0,
//!   "shuffledDeck": [ ... ],
//!   "deckIndex": 2
//! }
//! ```
//!
//! There is no version field. Anything that fails to parse, or parses but
//! contradicts itself, is treated as no snapshot at all.

use serde::{Deserialize, Serialize};

use super::state::Phase;
use crate::cards::BoardCard;
use crate::deck::Deck;
use crate::rules::is_chronological;

/// Stored copy of a `Playing` session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    /// Always `Playing` when written by the engine.
    #[serde(rename = "gameState")]
    pub phase: Phase,

    /// Placed cards, oldest year first.
    #[serde(rename = "boardCards")]
    pub board: Vec<BoardCard>,

    /// Card awaiting placement.
    #[serde(rename = "currentCard")]
    pub active_card: Option<BoardCard>,

    /// Correct placements so far.
    pub score: u32,

    /// The game's full deck.
    #[serde(rename = "shuffledDeck")]
    pub deck: Deck,

    /// Index of the next undrawn card.
    #[serde(rename = "deckIndex")]
    pub deck_cursor: usize,
}

impl PersistedSnapshot {
    /// Parse a stored value. `None` for anything that is not a snapshot.
    #[must_use]
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }

    /// Check that the snapshot describes a game the engine could have
    /// produced.
    ///
    /// Returns a short description of the first problem found.
    pub fn check_consistency(&self) -> Result<(), &'static str> {
        if self.phase != Phase::Playing {
            return Err("phase is not playing");
        }
        let Some(active) = &self.active_card else {
            return Err("no active card");
        };
        if self.deck_cursor < 2 || self.deck_cursor > self.deck.len() {
            return Err("deck cursor out of range");
        }
        if self.board.len() + 1 != self.deck_cursor {
            return Err("board size does not match deck cursor");
        }
        if u32::try_from(self.board.len()).ok() != self.score.checked_add(1) {
            return Err("score does not match board size");
        }
        if !is_chronological(&self.board) {
            return Err("board is out of order");
        }
        if !self.deck.has_unique_ids() {
            return Err("deck has duplicate ids");
        }
        let mut drawn = self.board.iter().chain(std::iter::once(active));
        if !drawn.all(|card| self.deck.contains(card.id)) {
            return Err("card missing from deck");
        }
        Ok(())
    }
}
