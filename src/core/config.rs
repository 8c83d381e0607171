//! Engine configuration.
//!
//! The embedding application provides an `EngineConfig` at startup. Every
//! field has a default matching the shipped game, so most callers only
//! override the seed (tests) or the storage key (multiple boards per page).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Storage key the snapshot lives under unless overridden.
pub const DEFAULT_STORAGE_KEY: &str = "jw-hitster-game-state";

/// Fewest cards that can be dealt: one seeds the board, one is active.
pub const MIN_DEAL_SIZE: usize = 2;

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for deck shuffles. `None` draws from OS entropy.
    pub seed: Option<u64>,

    /// Key the in-progress snapshot is stored under.
    pub storage_key: String,

    /// How long a feedback message stays visible, in milliseconds.
    pub message_visible_ms: u64,

    /// Pause between the game ending and the game-over screen, in milliseconds.
    pub game_over_delay_ms: u64,

    /// Minimum catalog size required to deal. Values below 2 are raised to 2.
    pub min_deck_size: usize,

    /// Language used when a record lacks the requested translation.
    pub fallback_language: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            message_visible_ms: 2_500,
            game_over_delay_ms: 600,
            min_deck_size: MIN_DEAL_SIZE,
            fallback_language: "en".to_string(),
        }
    }
}

impl EngineConfig {
    /// Use a fixed shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Store snapshots under a custom key.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the feedback message lifetime.
    #[must_use]
    pub fn with_message_visible_ms(mut self, ms: u64) -> Self {
        self.message_visible_ms = ms;
        self
    }

    /// Set the game-over reveal delay.
    #[must_use]
    pub fn with_game_over_delay_ms(mut self, ms: u64) -> Self {
        self.game_over_delay_ms = ms;
        self
    }

    /// Require a larger catalog before dealing.
    #[must_use]
    pub fn with_min_deck_size(mut self, size: usize) -> Self {
        self.min_deck_size = size;
        self
    }

    /// Set the fallback language code.
    #[must_use]
    pub fn with_fallback_language(mut self, lang: impl Into<String>) -> Self {
        self.fallback_language = lang.into();
        self
    }

    /// Minimum deal size with the floor of 2 applied.
    #[must_use]
    pub fn required_cards(&self) -> usize {
        self.min_deck_size.max(MIN_DEAL_SIZE)
    }

    /// Feedback message lifetime.
    #[must_use]
    pub fn message_visible(&self) -> Duration {
        Duration::from_millis(self.message_visible_ms)
    }

    /// Game-over reveal delay.
    #[must_use]
    pub fn game_over_delay(&self) -> Duration {
        Duration::from_millis(self.game_over_delay_ms)
    }
}
