//! Best-five evaluator for 5–7 card hands.
//!
//! Categories are checked strongest-first; the first match wins, since a
//! hand qualifying for a higher category always also satisfies a lower
//! one. The returned [`HandValue`] carries the concrete five cards laid
//! out for positional comparison (grouped cards first, then kickers
//! rank-descending; the wheel as `[Five, Four, Three, Two, Ace]`).

use holdem_shared::{Card, HandCategory, HandValue, Rank, Suit};
use std::cmp::Ordering;

/// Evaluate the best five-card hand available in `cards` (5–7 cards).
pub fn evaluate(cards: &[Card]) -> HandValue {
    debug_assert!(
        (5..=7).contains(&cards.len()),
        "evaluator expects 5-7 cards, got {}",
        cards.len()
    );
    let mut sorted = cards.to_vec();
    sorted.sort_by(|a, b| b.rank.cmp(&a.rank));

    if let Some(run) = find_straight_flush(&sorted) {
        let category = if run[0].rank == Rank::Ace {
            HandCategory::RoyalFlush
        } else {
            HandCategory::StraightFlush
        };
        return HandValue {
            category,
            cards: run,
        };
    }

    let groups = rank_groups(&sorted);

    if let Some(best) = find_four_of_a_kind(&sorted, &groups) {
        return HandValue {
            category: HandCategory::FourOfAKind,
            cards: best,
        };
    }
    if let Some(best) = find_full_house(&sorted, &groups) {
        return HandValue {
            category: HandCategory::FullHouse,
            cards: best,
        };
    }
    if let Some(best) = find_flush(&sorted) {
        return HandValue {
            category: HandCategory::Flush,
            cards: best,
        };
    }
    if let Some(best) = find_straight(&sorted) {
        return HandValue {
            category: HandCategory::Straight,
            cards: best,
        };
    }
    if let Some(best) = find_three_of_a_kind(&sorted, &groups) {
        return HandValue {
            category: HandCategory::ThreeOfAKind,
            cards: best,
        };
    }
    if let Some(best) = find_two_pair(&sorted, &groups) {
        return HandValue {
            category: HandCategory::TwoPair,
            cards: best,
        };
    }
    if let Some(best) = find_one_pair(&sorted, &groups) {
        return HandValue {
            category: HandCategory::OnePair,
            cards: best,
        };
    }

    HandValue {
        category: HandCategory::HighCard,
        cards: take_five(sorted.iter().copied()),
    }
}

/// Evaluate two hole cards against the board.
pub fn evaluate_hole(hole: [Card; 2], community: &[Card]) -> HandValue {
    let mut cards = Vec::with_capacity(7);
    cards.push(hole[0]);
    cards.push(hole[1]);
    cards.extend_from_slice(community);
    evaluate(&cards)
}

/// Compare two full card sets by their best five-card hands.
pub fn compare_hands(a: &[Card], b: &[Card]) -> Ordering {
    evaluate(a).cmp(&evaluate(b))
}

// ===== Internal helpers. All take cards sorted rank-descending. =====

/// Rank run-lengths in descending rank order.
fn rank_groups(sorted: &[Card]) -> Vec<(Rank, usize)> {
    let mut groups: Vec<(Rank, usize)> = Vec::new();
    for c in sorted {
        match groups.last_mut() {
            Some((r, n)) if *r == c.rank => *n += 1,
            _ => groups.push((c.rank, 1)),
        }
    }
    groups
}

fn take_five(cards: impl IntoIterator<Item = Card>) -> [Card; 5] {
    let v: Vec<Card> = cards.into_iter().take(5).collect();
    debug_assert_eq!(v.len(), 5);
    [v[0], v[1], v[2], v[3], v[4]]
}

/// The `n` highest cards whose rank is not excluded.
fn kickers<'a>(sorted: &'a [Card], exclude: &[Rank], n: usize) -> impl Iterator<Item = Card> + 'a {
    let exclude = exclude.to_vec();
    sorted
        .iter()
        .copied()
        .filter(move |c| !exclude.contains(&c.rank))
        .take(n)
}

fn find_straight_flush(sorted: &[Card]) -> Option<[Card; 5]> {
    for &suit in &Suit::ALL {
        let suited: Vec<Card> = sorted.iter().copied().filter(|c| c.suit == suit).collect();
        if suited.len() >= 5 {
            if let Some(run) = find_straight(&suited) {
                return Some(run);
            }
        }
    }
    None
}

/// Highest run of five consecutive ranks, duplicates collapsed. The
/// wheel (A-2-3-4-5) is only a fallback: Ace's high value is not
/// adjacent to Two, so it needs its own check, and any higher straight
/// must win first.
fn find_straight(sorted: &[Card]) -> Option<[Card; 5]> {
    let mut unique: Vec<Card> = Vec::with_capacity(sorted.len());
    for &c in sorted {
        if unique.last().map(|u| u.rank) != Some(c.rank) {
            unique.push(c);
        }
    }

    if unique.len() >= 5 {
        for window in unique.windows(5) {
            let consecutive = window
                .windows(2)
                .all(|w| w[0].rank.value() == w[1].rank.value() + 1);
            if consecutive {
                return Some(take_five(window.iter().copied()));
            }
        }
    }

    let find = |r: Rank| unique.iter().copied().find(|c| c.rank == r);
    if let (Some(five), Some(four), Some(three), Some(two), Some(ace)) = (
        find(Rank::Five),
        find(Rank::Four),
        find(Rank::Three),
        find(Rank::Two),
        find(Rank::Ace),
    ) {
        // Ace last: it plays low, and comparison reads the Five as high.
        return Some([five, four, three, two, ace]);
    }
    None
}

fn find_four_of_a_kind(sorted: &[Card], groups: &[(Rank, usize)]) -> Option<[Card; 5]> {
    let (quad_rank, _) = groups.iter().find(|(_, n)| *n == 4)?;
    let quads = sorted.iter().copied().filter(|c| c.rank == *quad_rank);
    Some(take_five(quads.chain(kickers(sorted, &[*quad_rank], 1))))
}

fn find_full_house(sorted: &[Card], groups: &[(Rank, usize)]) -> Option<[Card; 5]> {
    // groups are rank-descending, so the first qualifying group is the
    // highest; a second trips counts as the pair, reduced to two cards.
    let (trips_rank, _) = groups.iter().find(|(_, n)| *n >= 3)?;
    let (pair_rank, _) = groups
        .iter()
        .find(|(r, n)| r != trips_rank && *n >= 2)?;
    let trips = sorted
        .iter()
        .copied()
        .filter(|c| c.rank == *trips_rank)
        .take(3);
    let pair = sorted
        .iter()
        .copied()
        .filter(|c| c.rank == *pair_rank)
        .take(2);
    Some(take_five(trips.chain(pair)))
}

fn find_flush(sorted: &[Card]) -> Option<[Card; 5]> {
    for &suit in &Suit::ALL {
        let count = sorted.iter().filter(|c| c.suit == suit).count();
        if count >= 5 {
            return Some(take_five(
                sorted.iter().copied().filter(|c| c.suit == suit),
            ));
        }
    }
    None
}

fn find_three_of_a_kind(sorted: &[Card], groups: &[(Rank, usize)]) -> Option<[Card; 5]> {
    let (trips_rank, _) = groups.iter().find(|(_, n)| *n >= 3)?;
    let trips = sorted
        .iter()
        .copied()
        .filter(|c| c.rank == *trips_rank)
        .take(3);
    Some(take_five(trips.chain(kickers(sorted, &[*trips_rank], 2))))
}

fn find_two_pair(sorted: &[Card], groups: &[(Rank, usize)]) -> Option<[Card; 5]> {
    let mut pairs = groups.iter().filter(|(_, n)| *n >= 2);
    let (high_rank, _) = pairs.next()?;
    let (low_rank, _) = pairs.next()?;
    let high = sorted
        .iter()
        .copied()
        .filter(|c| c.rank == *high_rank)
        .take(2);
    let low = sorted
        .iter()
        .copied()
        .filter(|c| c.rank == *low_rank)
        .take(2);
    Some(take_five(
        high.chain(low).chain(kickers(sorted, &[*high_rank, *low_rank], 1)),
    ))
}

fn find_one_pair(sorted: &[Card], groups: &[(Rank, usize)]) -> Option<[Card; 5]> {
    let (pair_rank, _) = groups.iter().find(|(_, n)| *n >= 2)?;
    let pair = sorted
        .iter()
        .copied()
        .filter(|c| c.rank == *pair_rank)
        .take(2);
    Some(take_five(pair.chain(kickers(sorted, &[*pair_rank], 3))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn royal_flush_beats_straight_flush() {
        let royal = evaluate(&[
            c(Rank::Ace, Suit::Hearts),
            c(Rank::King, Suit::Hearts),
            c(Rank::Queen, Suit::Hearts),
            c(Rank::Jack, Suit::Hearts),
            c(Rank::Ten, Suit::Hearts),
            c(Rank::Two, Suit::Clubs),
            c(Rank::Three, Suit::Diamonds),
        ]);
        assert_eq!(royal.category, HandCategory::RoyalFlush);

        let steel = evaluate(&[
            c(Rank::Nine, Suit::Spades),
            c(Rank::Eight, Suit::Spades),
            c(Rank::Seven, Suit::Spades),
            c(Rank::Six, Suit::Spades),
            c(Rank::Five, Suit::Spades),
            c(Rank::Ace, Suit::Clubs),
            c(Rank::Ace, Suit::Diamonds),
        ]);
        assert_eq!(steel.category, HandCategory::StraightFlush);
        assert!(royal > steel);
    }

    #[test]
    fn full_house_uses_highest_trips_and_highest_pair() {
        // Two trips available: aces and kings. Kings must be reduced to
        // the pair.
        let value = evaluate(&[
            c(Rank::Ace, Suit::Hearts),
            c(Rank::Ace, Suit::Spades),
            c(Rank::Ace, Suit::Clubs),
            c(Rank::King, Suit::Hearts),
            c(Rank::King, Suit::Diamonds),
            c(Rank::King, Suit::Clubs),
            c(Rank::Two, Suit::Diamonds),
        ]);
        assert_eq!(value.category, HandCategory::FullHouse);
        let ranks: Vec<Rank> = value.cards.iter().map(|c| c.rank).collect();
        assert_eq!(
            ranks,
            vec![Rank::Ace, Rank::Ace, Rank::Ace, Rank::King, Rank::King]
        );
    }

    #[test]
    fn quads_pick_the_best_kicker() {
        let value = evaluate(&[
            c(Rank::Nine, Suit::Hearts),
            c(Rank::Nine, Suit::Spades),
            c(Rank::Nine, Suit::Clubs),
            c(Rank::Nine, Suit::Diamonds),
            c(Rank::Ace, Suit::Hearts),
            c(Rank::King, Suit::Diamonds),
            c(Rank::Two, Suit::Clubs),
        ]);
        assert_eq!(value.category, HandCategory::FourOfAKind);
        assert_eq!(value.cards[4].rank, Rank::Ace);
    }

    #[test]
    fn wheel_straight_puts_ace_low() {
        let value = evaluate(&[
            c(Rank::Ace, Suit::Spades),
            c(Rank::Two, Suit::Hearts),
            c(Rank::Three, Suit::Diamonds),
            c(Rank::Four, Suit::Clubs),
            c(Rank::Five, Suit::Spades),
            c(Rank::King, Suit::Diamonds),
            c(Rank::Queen, Suit::Hearts),
        ]);
        assert_eq!(value.category, HandCategory::Straight);
        let ranks: Vec<Rank> = value.cards.iter().map(|c| c.rank).collect();
        assert_eq!(
            ranks,
            vec![Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace]
        );
    }

    #[test]
    fn six_high_straight_preferred_over_wheel() {
        let value = evaluate(&[
            c(Rank::Ace, Suit::Spades),
            c(Rank::Two, Suit::Hearts),
            c(Rank::Three, Suit::Diamonds),
            c(Rank::Four, Suit::Clubs),
            c(Rank::Five, Suit::Spades),
            c(Rank::Six, Suit::Diamonds),
            c(Rank::Queen, Suit::Hearts),
        ]);
        assert_eq!(value.category, HandCategory::Straight);
        assert_eq!(value.cards[0].rank, Rank::Six);
    }

    #[test]
    fn flush_wins_over_straight() {
        let value = evaluate(&[
            c(Rank::Two, Suit::Spades),
            c(Rank::Five, Suit::Spades),
            c(Rank::Seven, Suit::Spades),
            c(Rank::Nine, Suit::Spades),
            c(Rank::Jack, Suit::Spades),
            c(Rank::King, Suit::Hearts),
            c(Rank::Ace, Suit::Diamonds),
        ]);
        assert_eq!(value.category, HandCategory::Flush);
        assert_eq!(value.cards[0].rank, Rank::Jack);
    }

    #[test]
    fn two_pair_carries_the_top_kicker() {
        let value = evaluate(&[
            c(Rank::Queen, Suit::Spades),
            c(Rank::Queen, Suit::Hearts),
            c(Rank::Eight, Suit::Diamonds),
            c(Rank::Eight, Suit::Clubs),
            c(Rank::Ace, Suit::Spades),
            c(Rank::Four, Suit::Diamonds),
            c(Rank::Three, Suit::Hearts),
        ]);
        assert_eq!(value.category, HandCategory::TwoPair);
        let ranks: Vec<Rank> = value.cards.iter().map(|c| c.rank).collect();
        assert_eq!(
            ranks,
            vec![Rank::Queen, Rank::Queen, Rank::Eight, Rank::Eight, Rank::Ace]
        );
    }

    #[test]
    fn three_pairs_keep_the_best_two_and_best_kicker() {
        // Seven cards can hold three pairs; the fifth card must be the
        // highest leftover, which here is the third pair's Jack.
        let value = evaluate(&[
            c(Rank::Ace, Suit::Spades),
            c(Rank::Ace, Suit::Hearts),
            c(Rank::Queen, Suit::Diamonds),
            c(Rank::Queen, Suit::Clubs),
            c(Rank::Jack, Suit::Spades),
            c(Rank::Jack, Suit::Diamonds),
            c(Rank::Three, Suit::Hearts),
        ]);
        assert_eq!(value.category, HandCategory::TwoPair);
        let ranks: Vec<Rank> = value.cards.iter().map(|c| c.rank).collect();
        assert_eq!(
            ranks,
            vec![Rank::Ace, Rank::Ace, Rank::Queen, Rank::Queen, Rank::Jack]
        );
    }

    #[test]
    fn evaluation_is_idempotent() {
        let cards = [
            c(Rank::Ten, Suit::Spades),
            c(Rank::Ten, Suit::Hearts),
            c(Rank::Four, Suit::Diamonds),
            c(Rank::Nine, Suit::Clubs),
            c(Rank::Ace, Suit::Spades),
            c(Rank::Four, Suit::Clubs),
            c(Rank::Two, Suit::Hearts),
        ];
        let first = evaluate(&cards);
        let second = evaluate(&cards);
        assert_eq!(first.category, second.category);
        assert_eq!(first.cards, second.cards);
    }

    #[test]
    fn compare_hands_orders_by_category_then_kickers() {
        let board = [
            c(Rank::Queen, Suit::Spades),
            c(Rank::Seven, Suit::Hearts),
            c(Rank::Four, Suit::Diamonds),
            c(Rank::Nine, Suit::Clubs),
            c(Rank::Two, Suit::Hearts),
        ];
        let mut pair_of_aces: Vec<Card> = board.to_vec();
        pair_of_aces.extend([c(Rank::Ace, Suit::Spades), c(Rank::Ace, Suit::Hearts)]);
        let mut ace_high: Vec<Card> = board.to_vec();
        ace_high.extend([c(Rank::Ace, Suit::Diamonds), c(Rank::Jack, Suit::Clubs)]);

        assert_eq!(compare_hands(&pair_of_aces, &ace_high), Ordering::Greater);
        assert_eq!(compare_hands(&ace_high, &pair_of_aces), Ordering::Less);
        assert_eq!(compare_hands(&ace_high, &ace_high), Ordering::Equal);
    }

    #[test]
    fn five_card_inputs_are_supported() {
        let value = evaluate(&[
            c(Rank::King, Suit::Spades),
            c(Rank::King, Suit::Hearts),
            c(Rank::Seven, Suit::Diamonds),
            c(Rank::Four, Suit::Clubs),
            c(Rank::Two, Suit::Spades),
        ]);
        assert_eq!(value.category, HandCategory::OnePair);
        assert_eq!(value.cards[2].rank, Rank::Seven);
    }
}
