//! Snapshot persistence.
//!
//! The game consults storage exactly once, at startup, to resume an
//! in-progress game. After that it only writes: `save` after every
//! transition that leaves the game `Playing`, `clear` when a game ends or
//! a new one is dealt.
//!
//! ## Key Types
//!
//! - `Storage`: String key-value backend
//! - `MemoryStorage`, `FileStorage`: Provided backends
//! - `PersistenceGateway`: Snapshot encoding under a fixed key
//!
//! Two games sharing one backend and key overwrite each other; the last
//! write wins.

pub mod file;
pub mod gateway;
pub mod memory;
pub mod storage;

pub use file::FileStorage;
pub use gateway::PersistenceGateway;
pub use memory::MemoryStorage;
pub use storage::Storage;
