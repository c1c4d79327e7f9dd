//! Deal command: one hand, played down with checks and calls, shown from
//! every seat's side of the table.

use super::{TableArgs, seated_session};
use crate::error::CliError;
use crate::ui::{format_card_views, format_cards};
use cardroom_engine::player::PlayerAction;
use cardroom_engine::session::Session;
use cardroom_engine::variant::Variant;
use std::io::Write;

pub fn handle_deal_command(args: TableArgs, out: &mut dyn Write) -> Result<(), CliError> {
    let mut session = seated_session(args)?;
    session.start_hand()?;
    check_down(&mut session)?;

    writeln!(
        out,
        "Variant: {}  Seed: {}  Hand: {}",
        session.variant(),
        session.seed(),
        session.hand_number()
    )?;
    for (seat, _) in session.players() {
        let view = session.view(Some(seat));
        let Some(me) = view.seat(seat) else {
            continue;
        };
        let marker = if me.is_dealer { " (dealer)" } else { "" };
        write!(
            out,
            "Seat {} {}{}: {}",
            seat,
            me.identity,
            marker,
            format_card_views(&me.down)
        )?;
        if session.variant() == Variant::Stud {
            write!(out, " | up: {}", format_cards(&me.up))?;
        }
        writeln!(out)?;
    }

    match session.variant() {
        Variant::Holdem => writeln!(out, "Board: {}", format_cards(session.board()))?,
        Variant::Stud => {
            let ranks: Vec<String> = session
                .wild_ranks()
                .ranks()
                .iter()
                .map(ToString::to_string)
                .collect();
            writeln!(out, "Wild: {}", ranks.join(" "))?;
        }
    }
    for w in session.winners() {
        let hand = w.category.map(|c| c.name()).unwrap_or("uncontested");
        writeln!(
            out,
            "Winner: seat {} {} +{} {} ({:?})",
            w.seat, w.identity, w.amount, hand, w.win_type
        )?;
    }
    Ok(())
}

fn check_down(session: &mut Session) -> Result<(), CliError> {
    while let Some(seat) = session.current_actor() {
        let action = if session.to_call(seat) > 0 {
            PlayerAction::Call
        } else {
            PlayerAction::Check
        };
        session.apply_action(seat, action)?;
    }
    Ok(())
}
