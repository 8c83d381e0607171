//! Insertion correctness.
//!
//! Positions index the gaps of the board: `0` is before the first card and
//! `k` is immediately after `board[k - 1]`, so a board of `n` cards has
//! `n + 1` positions.

use std::iter;

use crate::cards::BoardCard;

/// Check whether inserting `card` at `position` keeps the board in order.
///
/// The hypothetical sequence is valid iff every adjacent pair satisfies
/// `date[i] <= date[i + 1]`. Equal years may sit next to each other in
/// either order. Positions past the end are never valid.
///
/// ```
/// use timeline_engine::cards::{BoardCard, CardId, EventRecord};
/// use timeline_engine::rules::is_valid_insertion;
///
/// let board: Vec<_> = [100, 200, 400]
///     .iter()
///     .enumerate()
///     .map(|(i, &d)| BoardCard::new(CardId::new(i as u32), EventRecord::new(d)))
///     .collect();
/// let card = BoardCard::new(CardId::new(9), EventRecord::new(300));
///
/// assert!(is_valid_insertion(&board, &card, 2));
/// assert!(!is_valid_insertion(&board, &card, 1));
/// ```
#[must_use]
pub fn is_valid_insertion(board: &[BoardCard], card: &BoardCard, position: usize) -> bool {
    if position > board.len() {
        return false;
    }

    let (before, after) = board.split_at(position);
    let dates = before
        .iter()
        .map(BoardCard::date)
        .chain(iter::once(card.date()))
        .chain(after.iter().map(BoardCard::date));

    dates.clone().zip(dates.skip(1)).all(|(a, b)| a <= b)
}

/// Every position where `card` could be placed correctly.
#[must_use]
pub fn valid_positions(board: &[BoardCard], card: &BoardCard) -> Vec<usize> {
    (0..=board.len())
        .filter(|&position| is_valid_insertion(board, card, position))
        .collect()
}

/// Check that a sequence is non-decreasing by year.
#[must_use]
pub fn is_chronological(cards: &[BoardCard]) -> bool {
    cards.windows(2).all(|pair| pair[0].date() <= pair[1].date())
}
