//! Command-line argument definitions.

use cardroom_engine::variant::Variant;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "cardroom",
    version,
    about = "Hold'em and Follow-the-Queen stud table tools"
)]
pub struct CardroomCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deal one hand, play it down with checks and calls, and show every seat
    Deal {
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,
        #[arg(long, value_parser = clap::value_parser!(u16).range(2..=10))]
        players: Option<u16>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Evaluate 5 to 7 cards, e.g. `eval As Kd Qh Jc 10s 2d 3c`
    Eval {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
        /// Extra wild ranks, e.g. `--wild Q --wild 7`
        #[arg(long, value_delimiter = ',')]
        wild: Vec<String>,
        /// Also report the eight-or-better low
        #[arg(long)]
        low: bool,
    },
    /// Let bots play a run of hands at one table
    Sim {
        #[arg(long)]
        hands: u64,
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,
        #[arg(long, value_parser = clap::value_parser!(u16).range(2..=10))]
        players: Option<u16>,
        #[arg(long)]
        seed: Option<u64>,
        /// Bot kinds, assigned to seats in turn
        #[arg(long, value_delimiter = ',', default_value = "baseline")]
        bots: Vec<String>,
        /// Write one JSON hand record per line to this file
        #[arg(long)]
        output: Option<String>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    Holdem,
    Stud,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Holdem => Variant::Holdem,
            VariantArg::Stud => Variant::Stud,
        }
    }
}
