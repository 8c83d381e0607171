//! Card system: event records, dealt cards, and the catalog.
//!
//! ## Key Types
//!
//! - `EventRecord`: Static event data (year, localized text, sources)
//! - `CardId`: Deck-unique identifier assigned from the catalog index
//! - `BoardCard`: A record dealt into a game
//! - `Catalog`: The read-only pool decks are built from

pub mod card;
pub mod catalog;
pub mod record;

pub use card::{BoardCard, CardId};
pub use catalog::Catalog;
pub use record::{parse_year, Bibliography, EventRecord, InvalidYear, LocalizedText, RawEventRecord};
