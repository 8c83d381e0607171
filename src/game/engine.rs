//! The game orchestrator.
//!
//! `TimelineGame` owns the session and wires it to persistence, feedback
//! messages and presentation timers. The session decides what happens;
//! this layer decides what gets saved and shown.

use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::cards::{BoardCard, CardId, Catalog};
use crate::core::{EngineConfig, EngineError, GameRng};
use crate::deck::Deck;
use crate::feedback::{
    DeferredAction, FeedbackEvent, FeedbackMessage, Generation, MessageKind, TimerQueue,
};
use crate::interaction::PlacementSink;
use crate::persistence::{PersistenceGateway, Storage};
use crate::session::{GameSession, Phase, PlacementOutcome};

/// Something the host should redraw after a [`TimelineGame::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresentationCue {
    /// The message with this id timed out.
    MessageDismissed(u64),
    /// The game-over screen should now be shown.
    GameOverRevealed,
}

/// A playable timeline game backed by `S`.
///
/// ## Usage
///
/// ```
/// use timeline_engine::cards::{Catalog, EventRecord};
/// use timeline_engine::core::EngineConfig;
/// use timeline_engine::game::TimelineGame;
/// use timeline_engine::persistence::MemoryStorage;
/// use timeline_engine::session::Phase;
///
/// let records = [-33, 70, 1914].into_iter().map(EventRecord::new).collect();
/// let config = EngineConfig::default().with_seed(7);
/// let mut game = TimelineGame::new(Catalog::new(records), MemoryStorage::new(), config);
/// assert_eq!(game.phase(), Phase::Start);
///
/// game.start_game().unwrap();
/// assert_eq!(game.phase(), Phase::Playing);
/// assert_eq!(game.board().len(), 1);
/// ```
#[derive(Debug)]
pub struct TimelineGame<S> {
    config: EngineConfig,
    catalog: Catalog,
    rng: GameRng,
    session: GameSession,
    gateway: PersistenceGateway<S>,

    generation: Generation,
    timers: TimerQueue,
    message: Option<FeedbackMessage>,
    next_message_id: u64,
    feedback: Vec<FeedbackEvent>,
    newly_placed: Option<CardId>,
    game_over_visible: bool,
    resumed: bool,
}

impl<S: Storage> TimelineGame<S> {
    /// Create a game, resuming a stored `Playing` snapshot if one exists.
    ///
    /// Storage is consulted for a snapshot here and nowhere else.
    pub fn new(catalog: Catalog, storage: S, config: EngineConfig) -> Self {
        let gateway = PersistenceGateway::new(storage, config.storage_key.clone());
        let rng = GameRng::from_seed_or_entropy(config.seed);

        let restored = gateway.load().and_then(GameSession::restore);
        let resumed = restored.is_some();
        let session = restored.unwrap_or_default();
        if resumed {
            info!(score = session.score(), board = session.board().len(), "resumed saved game");
        } else {
            debug!(key = %gateway.key(), "no saved game to resume");
        }

        Self {
            config,
            catalog,
            rng,
            session,
            gateway,
            generation: Generation::default(),
            timers: TimerQueue::new(),
            message: None,
            next_message_id: 0,
            feedback: Vec::new(),
            newly_placed: None,
            game_over_visible: false,
            resumed,
        }
    }

    /// Deal a fresh game from a new shuffle of the catalog.
    ///
    /// Valid from any phase. Fails without touching anything, including
    /// the stored snapshot, when the catalog is too small.
    pub fn start_game(&mut self) -> Result<(), EngineError> {
        let required = self.config.required_cards();
        if self.catalog.len() < required {
            return Err(EngineError::CatalogTooSmall {
                found: self.catalog.len(),
                required,
            });
        }

        self.clear_snapshot();
        self.generation = self.generation.next();
        self.timers.cancel_all();
        self.message = None;
        self.feedback.clear();
        self.newly_placed = None;
        self.game_over_visible = false;
        self.resumed = false;

        let deck = Deck::shuffled(&self.catalog, &mut self.rng.fork());
        self.session = GameSession::deal(deck, required)?;
        info!(generation = self.generation.0, "game started");

        self.persist();
        Ok(())
    }

    /// Try to place the active card at `position`.
    ///
    /// See [`GameSession::attempt_placement`] for the rules; this adds the
    /// feedback message, the game-over reveal timer and persistence.
    pub fn attempt_placement(&mut self, position: usize) -> PlacementOutcome {
        let outcome = self.session.attempt_placement(position);

        match outcome {
            PlacementOutcome::Ignored(reason) => {
                trace!(?reason, position, "placement ignored");
                return outcome;
            }
            PlacementOutcome::Placed { card, .. } => {
                self.newly_placed = Some(card);
                self.show_message(MessageKind::Correct, card);
            }
            PlacementOutcome::Won { card, .. } => {
                self.newly_placed = Some(card);
                self.show_message(MessageKind::Won, card);
                self.schedule_game_over();
            }
            PlacementOutcome::Lost { card, .. } => {
                self.show_message(MessageKind::Lost, card);
                self.schedule_game_over();
            }
        }

        self.persist();
        outcome
    }

    /// Report elapsed time and run due presentation timers.
    ///
    /// Timers left over from an earlier game are dropped.
    pub fn tick(&mut self, now: Duration) -> Vec<PresentationCue> {
        let mut cues = Vec::new();

        for fired in self.timers.advance_to(now) {
            if fired.generation != self.generation {
                trace!(
                    stale = fired.generation.0,
                    current = self.generation.0,
                    "stale timer dropped"
                );
                continue;
            }
            match fired.action {
                DeferredAction::DismissMessage(id) => {
                    if self.message.is_some_and(|m| m.id == id) {
                        self.message = None;
                        cues.push(PresentationCue::MessageDismissed(id));
                    }
                }
                DeferredAction::RevealGameOver => {
                    if self.session.phase() == Phase::GameOver && !self.game_over_visible {
                        self.game_over_visible = true;
                        cues.push(PresentationCue::GameOverRevealed);
                    }
                }
            }
        }

        cues
    }

    /// Hide the current message now.
    pub fn dismiss_message(&mut self) {
        self.message = None;
        self.timers
            .cancel_where(|action| matches!(action, DeferredAction::DismissMessage(_)));
    }

    /// The placement animation for the newly placed card has finished.
    pub fn acknowledge_placement_animation(&mut self) {
        self.newly_placed = None;
    }

    /// Take all feedback events raised since the last call or the last
    /// [`start_game`](Self::start_game), whichever came later.
    pub fn drain_feedback(&mut self) -> Vec<FeedbackEvent> {
        std::mem::take(&mut self.feedback)
    }

    fn show_message(&mut self, kind: MessageKind, card: CardId) {
        let message = FeedbackMessage {
            id: self.next_message_id,
            kind,
        };
        self.next_message_id += 1;

        self.message = Some(message);
        self.feedback.push(FeedbackEvent { message, card });

        self.timers
            .cancel_where(|action| matches!(action, DeferredAction::DismissMessage(_)));
        self.timers.schedule(
            self.config.message_visible(),
            self.generation,
            DeferredAction::DismissMessage(message.id),
        );
    }

    fn schedule_game_over(&mut self) {
        self.timers.schedule(
            self.config.game_over_delay(),
            self.generation,
            DeferredAction::RevealGameOver,
        );
    }

    /// Save while playing, clear once over. Storage failures never reach
    /// the caller; the in-memory session stays authoritative.
    fn persist(&mut self) {
        match self.session.phase() {
            Phase::Playing => {
                if let Some(snapshot) = self.session.snapshot() {
                    if let Err(err) = self.gateway.save(&snapshot) {
                        warn!(error = %err, "failed to save game");
                    }
                }
            }
            Phase::GameOver => self.clear_snapshot(),
            Phase::Start => {}
        }
    }

    fn clear_snapshot(&mut self) {
        if let Err(err) = self.gateway.clear() {
            warn!(error = %err, "failed to clear saved game");
        }
    }

    // === Observers ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    /// Placed cards, oldest year first.
    #[must_use]
    pub fn board(&self) -> &[BoardCard] {
        self.session.board()
    }

    /// Card awaiting placement.
    #[must_use]
    pub fn active_card(&self) -> Option<&BoardCard> {
        self.session.active_card()
    }

    /// Correct placements so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.session.score()
    }

    /// The card that lost the game.
    #[must_use]
    pub fn last_failed_card(&self) -> Option<&BoardCard> {
        self.session.last_failed_card()
    }

    /// Check if the game ended with every card placed.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.session.is_won()
    }

    /// Number of drop targets to render.
    #[must_use]
    pub fn drop_target_count(&self) -> usize {
        self.session.drop_target_count()
    }

    /// Message on screen.
    #[must_use]
    pub fn message(&self) -> Option<FeedbackMessage> {
        self.message
    }

    /// Check if the game-over screen is showing.
    #[must_use]
    pub fn game_over_visible(&self) -> bool {
        self.game_over_visible
    }

    /// Card to animate into place.
    #[must_use]
    pub fn newly_placed(&self) -> Option<CardId> {
        self.newly_placed
    }

    /// Current game generation.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Check if the current game came from a stored snapshot.
    #[must_use]
    pub fn resumed(&self) -> bool {
        self.resumed
    }

    /// The underlying session.
    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The catalog games are dealt from.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The storage backend.
    #[must_use]
    pub fn storage(&self) -> &S {
        self.gateway.storage()
    }

    /// Event text of a card in `lang`, falling back per configuration.
    #[must_use]
    pub fn event_text<'a>(&self, card: &'a BoardCard, lang: &str) -> Option<&'a str> {
        card.record.event_text.get(lang, &self.config.fallback_language)
    }

    /// Scripture reference of a card in `lang`, falling back per
    /// configuration.
    #[must_use]
    pub fn reference_text<'a>(&self, card: &'a BoardCard, lang: &str) -> Option<&'a str> {
        card.record.reference_text.get(lang, &self.config.fallback_language)
    }
}

impl<S: Storage> PlacementSink for TimelineGame<S> {
    fn attempt_placement(&mut self, position: usize) {
        TimelineGame::attempt_placement(self, position);
    }

    fn accepts_placement(&self) -> bool {
        self.phase() == Phase::Playing && self.active_card().is_some()
    }
}
