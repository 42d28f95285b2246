//! Card set generation
//!
//! A deck is built by sampling pairs from the catalog and expanding each into
//! a term card and a definition card. Both the sampling and the final layout
//! use an unbiased Fisher-Yates shuffle driven by the caller's rng, so a
//! seeded rng reproduces the same deck.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{CardId, Difficulty, PairId};
use crate::game::catalog::{self, Category, TermPair};
use crate::game::constants::pairs_for;

/// Which face of a pair a card shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Term,
    Definition,
}

/// A playable card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub pair_id: PairId,
    pub display_text: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub category: Category,
    pub unique_id: CardId,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl Card {
    fn from_pair<R: Rng + ?Sized>(pair: &TermPair, card_type: CardType, rng: &mut R) -> Self {
        let display_text = match card_type {
            CardType::Term => pair.term,
            CardType::Definition => pair.definition,
        };
        Self {
            pair_id: pair.pair_id,
            display_text: display_text.to_string(),
            card_type,
            category: pair.category,
            unique_id: CardId::from_rng(rng),
            is_flipped: false,
            is_matched: false,
        }
    }
}

/// In-place Fisher-Yates shuffle; every permutation is equally likely
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Deal a shuffled deck of `2 * pairs_for(difficulty)` cards
///
/// # Panics
/// If the catalog holds fewer pairs than the difficulty requires.
pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Vec<Card> {
    let pairs_needed = pairs_for(difficulty) as usize;
    let catalog = catalog::all();
    assert!(
        catalog.len() >= pairs_needed,
        "catalog has {} pairs, {} needs {}",
        catalog.len(),
        difficulty,
        pairs_needed
    );

    let mut pool: Vec<&TermPair> = catalog.iter().collect();
    fisher_yates(&mut pool, rng);

    let mut cards = Vec::with_capacity(pairs_needed * 2);
    for pair in pool.into_iter().take(pairs_needed) {
        cards.push(Card::from_pair(pair, CardType::Term, rng));
        cards.push(Card::from_pair(pair, CardType::Definition, rng));
    }

    fisher_yates(&mut cards, rng);
    cards
}

/// Two distinct cards showing the same pair
pub fn cards_match(a: &Card, b: &Card) -> bool {
    a.pair_id == b.pair_id && a.unique_id != b.unique_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_deck_size_and_pairing() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for difficulty in Difficulty::ALL {
            let deck = generate(difficulty, &mut rng);
            assert_eq!(deck.len(), 2 * pairs_for(difficulty) as usize);

            let ids: HashSet<_> = deck.iter().map(|c| c.unique_id).collect();
            assert_eq!(ids.len(), deck.len());

            let mut per_pair: HashMap<PairId, Vec<CardType>> = HashMap::new();
            for card in &deck {
                per_pair.entry(card.pair_id).or_default().push(card.card_type);
            }
            for types in per_pair.values() {
                assert_eq!(types.len(), 2);
                assert!(types.contains(&CardType::Term));
                assert!(types.contains(&CardType::Definition));
            }
        }
    }

    #[test]
    fn test_fresh_deck_is_face_down() {
        let deck = generate(Difficulty::Easy, &mut ChaCha8Rng::seed_from_u64(1));
        assert!(deck.iter().all(|c| !c.is_flipped && !c.is_matched));
    }

    #[test]
    fn test_same_seed_same_deck() {
        let a = generate(Difficulty::Hard, &mut ChaCha8Rng::seed_from_u64(9));
        let b = generate(Difficulty::Hard, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_text_follows_card_type() {
        let deck = generate(Difficulty::Medium, &mut ChaCha8Rng::seed_from_u64(3));
        for card in &deck {
            let pair = catalog::get(card.pair_id).unwrap();
            let expected = match card.card_type {
                CardType::Term => pair.term,
                CardType::Definition => pair.definition,
            };
            assert_eq!(card.display_text, expected);
            assert_eq!(card.category, pair.category);
        }
    }

    #[test]
    fn test_cards_match() {
        let deck = generate(Difficulty::Easy, &mut ChaCha8Rng::seed_from_u64(5));
        let first = &deck[0];
        let partner = deck
            .iter()
            .find(|c| c.pair_id == first.pair_id && c.unique_id != first.unique_id)
            .unwrap();
        let stranger = deck.iter().find(|c| c.pair_id != first.pair_id).unwrap();

        assert!(cards_match(first, partner));
        assert!(cards_match(partner, first));
        assert!(!cards_match(first, first));
        assert!(!cards_match(first, stranger));
    }

    #[test]
    fn test_fisher_yates_is_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut items: Vec<u32> = (0..50).collect();
        fisher_yates(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_fisher_yates_trivial_inputs() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut empty: Vec<u8> = vec![];
        fisher_yates(&mut empty, &mut rng);
        let mut one = vec![1];
        fisher_yates(&mut one, &mut rng);
        assert_eq!(one, vec![1]);
    }
}
