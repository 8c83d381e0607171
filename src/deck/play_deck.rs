//! The per-game deck.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{BoardCard, CardId, Catalog};
use crate::core::rng::GameRng;

/// One game's identifier-tagged copy of the catalog.
///
/// Built fresh for every game, so shuffles never share state.
///
/// ## Example
///
/// ```
/// use timeline_engine::cards::{Catalog, EventRecord};
/// use timeline_engine::core::GameRng;
/// use timeline_engine::deck::Deck;
///
/// let catalog = Catalog::new(vec![EventRecord::new(1), EventRecord::new(2), EventRecord::new(3)]);
/// let deck = Deck::shuffled(&catalog, &mut GameRng::new(7));
///
/// assert_eq!(deck.len(), 3);
/// assert!(deck.has_unique_ids());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vec<BoardCard>,
}

impl Deck {
    /// Build an unshuffled deck. Each card's id is its catalog index.
    #[must_use]
    pub fn build(catalog: &Catalog) -> Self {
        let cards: Vec<BoardCard> = catalog
            .iter()
            .enumerate()
            .map(|(index, record)| {
                // Catalogs never approach u32::MAX entries
                #[allow(clippy::cast_possible_truncation)]
                let id = CardId::new(index as u32);
                BoardCard::new(id, record.clone())
            })
            .collect();

        debug!(cards = cards.len(), "built deck");
        Self { cards }
    }

    /// Build and shuffle in one step.
    #[must_use]
    pub fn shuffled(catalog: &Catalog, rng: &mut GameRng) -> Self {
        let mut deck = Self::build(catalog);
        deck.shuffle(rng);
        deck
    }

    /// Wrap already-dealt cards (restored games, tests).
    #[must_use]
    pub fn from_cards(cards: Vec<BoardCard>) -> Self {
        Self { cards }
    }

    /// Permute the deck in place with an unbiased Fisher–Yates shuffle.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
        debug!(cards = self.cards.len(), seed = rng.seed(), "shuffled deck");
    }

    /// The card at a draw position.
    #[must_use]
    pub fn card_at(&self, index: usize) -> Option<&BoardCard> {
        self.cards.get(index)
    }

    /// All cards in draw order.
    #[must_use]
    pub fn cards(&self) -> &[BoardCard] {
        &self.cards
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check that no id appears twice.
    #[must_use]
    pub fn has_unique_ids(&self) -> bool {
        let mut seen = FxHashSet::default();
        self.cards.iter().all(|card| seen.insert(card.id))
    }

    /// Check if a card with this id is in the deck.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.iter().any(|card| card.id == id)
    }
}
