//! One module per subcommand. Each exposes `handle_<name>_command`, writes
//! to the streams it is given and returns `Result<(), CliError>`.

mod cfg;
mod deal;
mod eval;
mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use sim::handle_sim_command;

use crate::cli::VariantArg;
use crate::config;
use crate::error::CliError;
use cardroom_engine::session::Session;
use cardroom_engine::variant::Variant;

/// Table options given on the command line; each falls back to the config.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableArgs {
    pub variant: Option<VariantArg>,
    pub players: Option<u16>,
    pub seed: Option<u64>,
}

/// A session with `P1`..`Pn` seated, settings from `args` over the config.
pub(crate) fn seated_session(args: TableArgs) -> Result<Session, CliError> {
    let resolved = config::load_with_sources()?;
    let mut cfg = resolved.config;
    if let Some(players) = args.players {
        cfg.players = usize::from(players);
    }
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    let variant = args.variant.map(Variant::from).unwrap_or(cfg.variant);

    let mut session = Session::new(variant, cfg.table_config(variant))?;
    for i in 1..=cfg.players {
        session.add_player(&format!("P{i}"))?;
    }
    Ok(session)
}
