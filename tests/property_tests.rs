//! Property tests for the placement validator and the deck shuffle.

use proptest::prelude::*;
use timeline_engine::cards::{BoardCard, CardId, Catalog, EventRecord};
use timeline_engine::core::GameRng;
use timeline_engine::deck::Deck;
use timeline_engine::rules::{is_chronological, is_valid_insertion, valid_positions};
use timeline_engine::session::{GameSession, Phase};

fn card(id: u32, date: i64) -> BoardCard {
    BoardCard::new(CardId::new(id), EventRecord::new(date))
}

fn sorted_board(dates: Vec<i64>) -> Vec<BoardCard> {
    let mut dates = dates;
    dates.sort_unstable();
    dates.into_iter().enumerate().map(|(i, d)| card(i as u32, d)).collect()
}

fn arb_board() -> impl Strategy<Value = Vec<BoardCard>> {
    prop::collection::vec(-3000i64..3000, 0..12).prop_map(sorted_board)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    // Validator

    #[test]
    fn valid_iff_insertion_stays_sorted(
        board in arb_board(),
        date in -3500i64..3500,
        position in 0usize..14
    ) {
        let candidate = card(999, date);
        let expected = position <= board.len() && {
            let mut after = board.clone();
            after.insert(position, candidate.clone());
            is_chronological(&after)
        };
        prop_assert_eq!(is_valid_insertion(&board, &candidate, position), expected);
    }

    #[test]
    fn some_position_is_always_valid(board in arb_board(), date in -3500i64..3500) {
        let positions = valid_positions(&board, &card(999, date));
        prop_assert!(!positions.is_empty());

        // Valid positions form one contiguous run
        let run: Vec<usize> = (positions[0]..positions[0] + positions.len()).collect();
        prop_assert_eq!(positions, run);
    }

    #[test]
    fn distinct_dates_have_exactly_one_slot(
        dates in prop::collection::btree_set(-3000i64..3000, 1..12),
        pick in any::<prop::sample::Index>()
    ) {
        let dates: Vec<i64> = dates.into_iter().collect();
        let held_out = dates[pick.index(dates.len())];
        let board = sorted_board(dates.iter().copied().filter(|&d| d != held_out).collect());

        prop_assert_eq!(valid_positions(&board, &card(999, held_out)).len(), 1);
    }

    // Shuffle

    #[test]
    fn shuffle_is_a_permutation(
        dates in prop::collection::vec(-3000i64..3000, 0..40),
        seed in any::<u64>()
    ) {
        let catalog = Catalog::new(dates.iter().copied().map(EventRecord::new).collect());
        let deck = Deck::shuffled(&catalog, &mut GameRng::new(seed));

        prop_assert_eq!(deck.len(), catalog.len());
        prop_assert!(deck.has_unique_ids());

        let mut ids: Vec<u32> = deck.cards().iter().map(|c| c.id.raw()).collect();
        ids.sort_unstable();
        prop_assert_eq!(ids, (0..catalog.len() as u32).collect::<Vec<_>>());

        for dealt in deck.cards() {
            prop_assert_eq!(Some(&dealt.record), catalog.get(dealt.id.raw() as usize));
        }
    }

    // Session

    #[test]
    fn correct_play_keeps_board_sorted(
        dates in prop::collection::vec(-3000i64..3000, 2..20),
        seed in any::<u64>()
    ) {
        let catalog = Catalog::new(dates.iter().copied().map(EventRecord::new).collect());
        let deck = Deck::shuffled(&catalog, &mut GameRng::new(seed));
        let mut session = GameSession::deal(deck, 2).unwrap();

        let mut score = 0;
        while session.phase() == Phase::Playing {
            let position = valid_positions(session.board(), session.active_card().unwrap())[0];
            prop_assert!(session.attempt_placement(position).is_correct());
            score += 1;
            prop_assert!(is_chronological(session.board()));
            prop_assert_eq!(session.score(), score);
        }
        prop_assert_eq!(session.board().len(), dates.len());
        prop_assert!(session.is_won());
    }
}

// =============================================================================
// Shuffle fairness
// =============================================================================

/// Chi-square test of where each card lands over many shuffles.
///
/// For n = 6 there are 36 (card, position) cells, each expected
/// `trials / 6` times, with 25 degrees of freedom. `CRITICAL` is the
/// 0.9999 quantile of that distribution.
#[test]
fn test_shuffle_positions_are_uniform() {
    const N: usize = 6;
    const TRIALS: usize = 60_000;
    const CRITICAL: f64 = 60.0;

    let catalog = Catalog::new((0..N as i64).map(EventRecord::new).collect());
    let mut rng = GameRng::new(0xC0FFEE);
    let mut counts = [[0usize; N]; N];

    for _ in 0..TRIALS {
        let deck = Deck::shuffled(&catalog, &mut rng);
        for (position, dealt) in deck.cards().iter().enumerate() {
            counts[dealt.id.raw() as usize][position] += 1;
        }
    }

    let expected = TRIALS as f64 / N as f64;
    let chi_square: f64 = counts
        .iter()
        .flatten()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum();

    assert!(
        chi_square < CRITICAL,
        "chi-square {chi_square:.2} too large: {counts:?}"
    );
}

#[test]
fn test_validator_reference_board() {
    let board = sorted_board(vec![100, 200, 400]);

    assert_eq!(valid_positions(&board, &card(9, 300)), vec![2]);
    assert_eq!(valid_positions(&board, &card(9, 50)), vec![0]);
    assert_eq!(valid_positions(&board, &card(9, 200)), vec![1, 2]);
    assert!(!is_valid_insertion(&board, &card(9, 300), 4));
}
