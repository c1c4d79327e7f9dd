//! Eval command: evaluate a card list, optionally with wild ranks.
//!
//! ```text
//! $ cardroom eval Qs 7h 7d As Kd --wild Q
//! Cards: Q♠ 7♥ 7♦ A♠ K♦
//! Wild: Q
//! Hand: Three of a Kind
//! Best: ...
//! ```

use crate::error::CliError;
use crate::ui::format_cards;
use cardroom_engine::cards::{Card, Rank, parse_cards};
use cardroom_engine::lowball::best_low;
use cardroom_engine::wild::{WildRanks, evaluate_with_wilds};
use std::io::Write;

pub fn handle_eval_command(
    cards: &[String],
    wild: &[String],
    low: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cards = parse_cards(&cards.join(" "))?;
    check_hand(&cards)?;
    let wilds = wild
        .iter()
        .map(|r| r.parse::<Rank>())
        .collect::<Result<WildRanks, _>>()?;

    let strength = evaluate_with_wilds(&cards, wilds);
    writeln!(out, "Cards: {}", format_cards(&cards))?;
    if !wilds.is_empty() {
        let ranks: Vec<String> = wilds.ranks().iter().map(Rank::to_string).collect();
        writeln!(out, "Wild: {}", ranks.join(" "))?;
    }
    writeln!(out, "Hand: {}", strength.category)?;
    writeln!(out, "Best: {}", format_cards(&strength.cards))?;
    if low {
        match best_low(&cards, wilds) {
            Some(l) => writeln!(out, "Low: {} ({})", l.label(), format_cards(&l.cards))?,
            None => writeln!(out, "Low: none")?,
        }
    }
    Ok(())
}

// The evaluators assume 5..=7 distinct cards.
fn check_hand(cards: &[Card]) -> Result<(), CliError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(CliError::InvalidInput(format!(
            "need 5 to 7 cards, got {}",
            cards.len()
        )));
    }
    let mut sorted = cards.to_vec();
    sorted.sort();
    if let Some(pair) = sorted.windows(2).find(|w| w[0] == w[1]) {
        return Err(CliError::InvalidInput(format!("duplicate card {}", pair[0])));
    }
    Ok(())
}
