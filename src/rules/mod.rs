//! Placement rules.
//!
//! `is_valid_insertion` is the single source of truth for whether a
//! placement is correct. It is pure and is called once per attempt.

pub mod placement;

pub use placement::{is_chronological, is_valid_insertion, valid_positions};
