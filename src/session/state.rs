//! Game session state machine.
//!
//! ```text
//!   Start ──deal──▶ Playing ──wrong placement──▶ GameOver (lost)
//!                      │  ▲                          │
//!                      │  └── correct, cards left    │
//!                      └──correct, deck exhausted──▶ GameOver (won)
//!
//!   deal is reachable from every phase and replaces the session wholesale
//! ```
//!
//! The board is non-decreasing by year whenever the phase is `Playing`. A
//! wrong placement never touches the board; it ends the game instead.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::snapshot::PersistedSnapshot;
use crate::cards::{BoardCard, CardId};
use crate::core::error::EngineError;
use crate::core::MIN_DEAL_SIZE;
use crate::deck::Deck;
use crate::rules::{is_chronological, is_valid_insertion};

/// Session phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Nothing dealt yet.
    #[default]
    Start,
    /// A card is awaiting placement.
    Playing,
    /// Ended by a wrong placement or by placing the last card.
    GameOver,
}

impl Phase {
    /// Wire name, matching the stored snapshot.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Playing => "playing",
            Self::GameOver => "gameOver",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a placement attempt was dropped without effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The session is not in `Playing`.
    NotPlaying(Phase),
    /// No card is awaiting placement.
    NoActiveCard,
    /// The position is past the last drop target.
    OutOfRange {
        /// Requested position.
        position: usize,
        /// Number of valid drop targets.
        slots: usize,
    },
}

/// Result of one placement attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// Correct; the next card is now active.
    Placed {
        /// The card that was placed.
        card: CardId,
        /// Where it went.
        position: usize,
    },
    /// Correct, and it was the last card.
    Won {
        /// The card that was placed.
        card: CardId,
        /// Where it went.
        position: usize,
    },
    /// Wrong; the board is unchanged and the game is over.
    Lost {
        /// The rejected card.
        card: CardId,
        /// Where the player tried to put it.
        position: usize,
    },
}

impl PlacementOutcome {
    /// Check if the attempt was dropped.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }

    /// Check if the card went onto the board.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Placed { .. } | Self::Won { .. })
    }

    /// Check if this attempt moved the session to `GameOver`.
    #[must_use]
    pub fn ends_game(&self) -> bool {
        matches!(self, Self::Won { .. } | Self::Lost { .. })
    }
}

/// One live game.
///
/// Mutated only through [`GameSession::deal`] (which builds a new session)
/// and [`GameSession::attempt_placement`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameSession {
    phase: Phase,
    board: Vec<BoardCard>,
    active_card: Option<BoardCard>,
    score: u32,
    deck: Deck,
    deck_cursor: usize,
    last_failed_card: Option<BoardCard>,
}

impl GameSession {
    /// A session in `Start` with nothing dealt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deal a new game from a shuffled deck.
    ///
    /// The first card seeds the board and the second becomes active.
    /// Fails if the deck holds fewer than `required` cards (never less
    /// than two).
    pub fn deal(deck: Deck, required: usize) -> Result<Self, EngineError> {
        let required = required.max(MIN_DEAL_SIZE);
        let too_small = EngineError::CatalogTooSmall {
            found: deck.len(),
            required,
        };
        let (Some(first), Some(second)) = (deck.card_at(0), deck.card_at(1)) else {
            return Err(too_small);
        };
        if deck.len() < required {
            return Err(too_small);
        }

        let board = vec![first.clone()];
        let active_card = Some(second.clone());
        info!(cards = deck.len(), "dealt new game");

        Ok(Self {
            phase: Phase::Playing,
            board,
            active_card,
            score: 0,
            deck,
            deck_cursor: 2,
            last_failed_card: None,
        })
    }

    /// Try to insert the active card at `position`.
    ///
    /// Stale attempts (wrong phase, no active card) and positions past the
    /// last drop target are ignored and leave the session untouched.
    pub fn attempt_placement(&mut self, position: usize) -> PlacementOutcome {
        if self.phase != Phase::Playing {
            return PlacementOutcome::Ignored(IgnoreReason::NotPlaying(self.phase));
        }
        let Some(card) = self.active_card.take() else {
            return PlacementOutcome::Ignored(IgnoreReason::NoActiveCard);
        };
        let slots = self.drop_target_count();
        if position >= slots {
            self.active_card = Some(card);
            return PlacementOutcome::Ignored(IgnoreReason::OutOfRange { position, slots });
        }

        let id = card.id;
        if !is_valid_insertion(&self.board, &card, position) {
            info!(card = %id, position, score = self.score, "wrong placement, game lost");
            self.last_failed_card = Some(card);
            self.phase = Phase::GameOver;
            return PlacementOutcome::Lost { card: id, position };
        }

        self.board.insert(position, card);
        self.score += 1;
        debug_assert!(is_chronological(&self.board));

        match self.deck.card_at(self.deck_cursor) {
            Some(next) => {
                self.active_card = Some(next.clone());
                self.deck_cursor += 1;
                debug!(card = %id, position, score = self.score, "card placed");
                PlacementOutcome::Placed { card: id, position }
            }
            None => {
                self.phase = Phase::GameOver;
                info!(score = self.score, "deck exhausted, game won");
                PlacementOutcome::Won { card: id, position }
            }
        }
    }

    // === Observers ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Placed cards, oldest year first.
    #[must_use]
    pub fn board(&self) -> &[BoardCard] {
        &self.board
    }

    /// Card awaiting placement.
    #[must_use]
    pub fn active_card(&self) -> Option<&BoardCard> {
        self.active_card.as_ref()
    }

    /// Correct placements so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The card that ended the game, if it was lost.
    #[must_use]
    pub fn last_failed_card(&self) -> Option<&BoardCard> {
        self.last_failed_card.as_ref()
    }

    /// The full deck for this game.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Index of the next undrawn card.
    #[must_use]
    pub fn deck_cursor(&self) -> usize {
        self.deck_cursor
    }

    /// Cards not yet drawn.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.deck.len().saturating_sub(self.deck_cursor)
    }

    /// Number of drop targets: one per gap, including both ends.
    #[must_use]
    pub fn drop_target_count(&self) -> usize {
        self.board.len() + 1
    }

    /// Check if the game ended with every card placed.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.phase == Phase::GameOver && self.last_failed_card.is_none()
    }

    // === Snapshots ===

    /// Capture the session for storage.
    ///
    /// Returns `None` outside `Playing`: finished and unstarted games are
    /// never persisted.
    #[must_use]
    pub fn snapshot(&self) -> Option<PersistedSnapshot> {
        match self.phase {
            Phase::Playing => Some(PersistedSnapshot {
                phase: self.phase,
                board: self.board.clone(),
                active_card: self.active_card.clone(),
                score: self.score,
                deck: self.deck.clone(),
                deck_cursor: self.deck_cursor,
            }),
            Phase::Start | Phase::GameOver => None,
        }
    }

    /// Rebuild a session from a stored snapshot.
    ///
    /// Only `Playing` snapshots whose contents agree with each other are
    /// accepted; anything else is treated as no snapshot.
    #[must_use]
    pub fn restore(snapshot: PersistedSnapshot) -> Option<Self> {
        if let Err(problem) = snapshot.check_consistency() {
            debug!(problem, "snapshot rejected");
            return None;
        }

        Some(Self {
            phase: snapshot.phase,
            board: snapshot.board,
            active_card: snapshot.active_card,
            score: snapshot.score,
            deck: snapshot.deck,
            deck_cursor: snapshot.deck_cursor,
            last_failed_card: None,
        })
    }
}
