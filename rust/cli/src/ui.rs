//! Terminal output helpers shared by the commands.

use cardroom_engine::cards::Card;
use cardroom_engine::view::CardView;
use std::io::Write;

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// `A♠ 10♥`, or `-` for no cards.
pub fn format_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "-".to_string();
    }
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Like [`format_cards`], with `??` for a card the viewer cannot see.
pub fn format_card_views(cards: &[CardView]) -> String {
    if cards.is_empty() {
        return "-".to_string();
    }
    cards
        .iter()
        .map(|c| match c {
            CardView::Face(card) => card.to_string(),
            CardView::Hidden => "??".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
