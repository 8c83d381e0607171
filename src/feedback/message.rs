//! Feedback messages shown after a placement.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Visual tone of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Green.
    Success,
    /// Red.
    Error,
}

/// Which message to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// A correct placement with cards left.
    Correct,
    /// The last card was placed correctly.
    Won,
    /// A wrong placement ended the game.
    Lost,
}

impl MessageKind {
    /// Key for the presentation layer's string tables.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Won => "won",
            Self::Lost => "lose",
        }
    }

    /// Tone for this kind.
    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Correct | Self::Won => Tone::Success,
            Self::Lost => Tone::Error,
        }
    }

    /// English text, for hosts without their own string tables.
    #[must_use]
    pub const fn default_text(self) -> &'static str {
        match self {
            Self::Correct => "Correct!",
            Self::Won => "You placed every card. You win!",
            Self::Lost => "Wrong position. Game over!",
        }
    }
}

/// A message currently on screen.
///
/// Ids are unique for the lifetime of a game instance so a new message
/// with the same text still restarts its animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackMessage {
    /// Unique id.
    pub id: u64,
    /// What to show.
    pub kind: MessageKind,
}

impl FeedbackMessage {
    /// Tone of the message.
    #[must_use]
    pub fn tone(&self) -> Tone {
        self.kind.tone()
    }
}

/// Fire-and-forget notification of a placement result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedbackEvent {
    /// The message raised.
    pub message: FeedbackMessage,
    /// The card that was placed or rejected.
    pub card: CardId,
}
