//! Cfg command: the resolved configuration as JSON, each value with its
//! source (`default`, `file` or `env`).
//!
//! ```json
//! {
//!   "players": { "value": 5, "source": "default" },
//!   "seed": { "value": 42, "source": "env" },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()
        .map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))?;

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "variant": {
            "value": config.variant,
            "source": sources.variant,
        },
        "players": {
            "value": config.players,
            "source": sources.players,
        },
        "starting_chips": {
            "value": config.starting_chips,
            "source": sources.starting_chips,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "hi_lo": {
            "value": config.hi_lo,
            "source": sources.hi_lo,
        },
        "two_natural_sevens_wins": {
            "value": config.two_natural_sevens_wins,
            "source": sources.two_natural_sevens_wins,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
