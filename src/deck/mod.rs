//! Deck construction, shuffling, and sequential draw.
//!
//! A deck is rebuilt from the catalog for every game. Cards are tagged with
//! their catalog index before shuffling, so ids are deterministic no matter
//! how the shuffle falls.

pub mod play_deck;

pub use play_deck::Deck;
