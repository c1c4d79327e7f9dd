use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// The 52-card deck owned by the hand in progress.
///
/// Cards are drawn front-to-back; a drawn (or burned) card never comes back
/// until the next [`Deck::shuffle`], which rebuilds the full deck first.
///
/// # Examples
///
/// ```
/// use cardroom_engine::deck::Deck;
///
/// let mut deck = Deck::new_with_seed(7);
/// deck.shuffle();
/// let first = deck.deal_card().unwrap();
/// assert_eq!(deck.remaining(), 51);
/// assert!(!deck.undealt().contains(&first));
/// ```
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    /// Fisher-Yates over a freshly rebuilt deck.
    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        if self.position >= self.cards.len() {
            None
        } else {
            let c = self.cards[self.position];
            self.position += 1;
            Some(c)
        }
    }

    pub fn burn_card(&mut self) {
        let _ = self.deal_card();
    }

    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    /// Cards not yet drawn, in draw order.
    pub fn undealt(&self) -> &[Card] {
        &self.cards[self.position.min(self.cards.len())..]
    }
}
