//! Sim command: bots play a run of hands at one table.
//!
//! # Environment Variables
//!
//! - `CARDROOM_SIM_BREAK_AFTER`: stop after N hands as if interrupted (exit 130)

use super::{TableArgs, seated_session};
use crate::error::CliError;
use crate::ui;
use cardroom_ai::{BOT_KINDS, Bot, create_bot};
use cardroom_engine::errors::GameError;
use cardroom_engine::logger::HandLogger;
use cardroom_engine::player::PlayerAction;
use cardroom_engine::session::Session;
use cardroom_engine::variant::Phase;
use std::collections::HashMap;
use std::io::Write;

pub const BREAK_AFTER_ENV: &str = "CARDROOM_SIM_BREAK_AFTER";

pub fn handle_sim_command(
    hands: u64,
    args: TableArgs,
    bot_kinds: &[String],
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    if bot_kinds.is_empty() {
        return Err(CliError::InvalidInput("at least one bot kind is required".into()));
    }

    let mut session = seated_session(args)?;
    let mut bots: HashMap<usize, Box<dyn Bot>> = HashMap::new();
    let seats: Vec<usize> = session.players().map(|(seat, _)| seat).collect();
    for (i, &seat) in seats.iter().enumerate() {
        let kind = &bot_kinds[i % bot_kinds.len()];
        let bot = create_bot(kind).ok_or_else(|| {
            CliError::InvalidInput(format!(
                "unknown bot {:?} (expected one of: {})",
                kind,
                BOT_KINDS.join(", ")
            ))
        })?;
        bots.insert(seat, bot);
    }
    let start_stacks: HashMap<usize, u32> = session
        .players()
        .map(|(seat, p)| (seat, p.stack()))
        .collect();

    let mut logger = output
        .map(HandLogger::create)
        .transpose()
        .map_err(|e| CliError::InvalidInput(format!("cannot open output file: {}", e)))?;
    let break_after = std::env::var(BREAK_AFTER_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok());

    let mut played = 0u64;
    let mut wins: HashMap<usize, u32> = HashMap::new();
    while played < hands {
        if session.phase() == Phase::Showdown {
            session.new_hand()?;
        }
        match session.start_hand() {
            Ok(_) => {}
            Err(GameError::NotEnoughPlayers { .. }) => {
                ui::display_warning(err, &format!("table broke up after {} hands", played))?;
                break;
            }
            Err(e) => return Err(e.into()),
        }
        play_out(&mut session, &bots)?;
        played += 1;

        for w in session.winners() {
            *wins.entry(w.seat).or_default() += 1;
        }
        if let (Some(logger), Some(record)) = (logger.as_mut(), session.last_record()) {
            let mut record = record.clone();
            record.hand_id = logger.next_id();
            logger.write(&record)?;
        }

        if let Some(b) = break_after
            && played == b
            && played < hands
        {
            writeln!(out, "Interrupted: saved {}/{}", played, hands)?;
            return Err(CliError::Interrupted(format!(
                "saved {}/{}",
                played, hands
            )));
        }
    }

    writeln!(out, "Simulated: {} hands (seed {})", played, session.seed())?;
    for (seat, player) in session.players() {
        let start = start_stacks.get(&seat).copied().unwrap_or(0);
        let delta = i64::from(player.stack()) - i64::from(start);
        let name = bots.get(&seat).map(|b| b.name()).unwrap_or("-");
        writeln!(
            out,
            "Seat {} {} [{}]: stack {} ({:+}) wins {}",
            seat,
            player.identity(),
            name,
            player.stack(),
            delta,
            wins.get(&seat).copied().unwrap_or(0)
        )?;
    }
    Ok(())
}

/// Lets the bots act until the hand is over.
fn play_out(session: &mut Session, bots: &HashMap<usize, Box<dyn Bot>>) -> Result<(), CliError> {
    while let Some(seat) = session.current_actor() {
        let bot = bots
            .get(&seat)
            .ok_or_else(|| CliError::InvalidInput(format!("no bot for seat {}", seat)))?;
        let action = bot.choose_action(&session.view(Some(seat)));
        if session.apply_action(seat, action).is_err() {
            session.apply_action(seat, PlayerAction::Fold)?;
        }
    }
    Ok(())
}
