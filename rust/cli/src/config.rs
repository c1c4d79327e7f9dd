//! CLI settings: built-in defaults, then the TOML file named by
//! `CARDROOM_CONFIG`, then `CARDROOM_*` environment variables. Each value
//! remembers where it came from so `cfg` can show it.

use cardroom_engine::config::{StudRules, TableConfig};
use cardroom_engine::variant::Variant;
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "CARDROOM_CONFIG";
pub const SEED_ENV: &str = "CARDROOM_SEED";
pub const PLAYERS_ENV: &str = "CARDROOM_PLAYERS";
pub const STARTING_CHIPS_ENV: &str = "CARDROOM_STARTING_CHIPS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub variant: Variant,
    pub players: usize,
    pub starting_chips: u32,
    pub seed: Option<u64>,
    pub hi_lo: bool,
    pub two_natural_sevens_wins: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::Holdem,
            players: 5,
            starting_chips: 1000,
            seed: None,
            hi_lo: false,
            two_natural_sevens_wins: false,
        }
    }
}

impl Config {
    /// Table settings for `variant`, with the default stakes for it.
    pub fn table_config(&self, variant: Variant) -> TableConfig {
        let mut table = TableConfig::default_for(variant);
        table.num_players = self.players;
        table.starting_chips = self.starting_chips;
        table.seed = self.seed;
        if variant == Variant::Stud {
            table.stud = StudRules {
                hi_lo: self.hi_lo,
                two_natural_sevens_wins: self.two_natural_sevens_wins,
            };
        }
        table
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub variant: ValueSource,
    pub players: ValueSource,
    pub starting_chips: ValueSource,
    pub seed: ValueSource,
    pub hi_lo: ValueSource,
    pub two_natural_sevens_wins: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            variant: ValueSource::Default,
            players: ValueSource::Default,
            starting_chips: ValueSource::Default,
            seed: ValueSource::Default,
            hi_lo: ValueSource::Default,
            two_natural_sevens_wins: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

/// Resolves against the process environment.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    resolve(|key| std::env::var(key).ok())
}

/// Resolves with `env` standing in for the environment.
pub fn resolve<F>(env: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = env(CONFIG_ENV).filter(|p| !p.is_empty()) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.variant {
            cfg.variant = v;
            sources.variant = ValueSource::File;
        }
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.starting_chips {
            cfg.starting_chips = v;
            sources.starting_chips = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.hi_lo {
            cfg.hi_lo = v;
            sources.hi_lo = ValueSource::File;
        }
        if let Some(v) = f.two_natural_sevens_wins {
            cfg.two_natural_sevens_wins = v;
            sources.two_natural_sevens_wins = ValueSource::File;
        }
    }

    if let Some(seed) = env(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("invalid {SEED_ENV}: {seed}")))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(players) = env(PLAYERS_ENV)
        && !players.is_empty()
    {
        cfg.players = players
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("invalid {PLAYERS_ENV}: {players}")))?;
        sources.players = ValueSource::Env;
    }
    if let Some(chips) = env(STARTING_CHIPS_ENV)
        && !chips.is_empty()
    {
        cfg.starting_chips = chips.trim().parse().map_err(|_| {
            ConfigError::Invalid(format!("invalid {STARTING_CHIPS_ENV}: {chips}"))
        })?;
        sources.starting_chips = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    variant: Option<Variant>,
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    starting_chips: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    hi_lo: Option<bool>,
    #[serde(default)]
    two_natural_sevens_wins: Option<bool>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.table_config(cfg.variant)
        .validate(cfg.variant)
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))
}
