//! CLI argument parsing using clap v4

use clap::{Args, Parser, Subcommand};

/// persona-order - display ordering for assistant personas
///
/// Lists personas in display order with visibility and ownership applied,
/// and persists new orders as explicit display priorities.
#[derive(Parser, Debug)]
#[command(name = "persona-order")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, env = "PERSONA_ORDER_CONFIG", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List personas in display order
    List {
        /// Include personas hidden from the picker
        #[arg(short, long)]
        all: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the display priority map for an order, without saving it
    Priorities {
        /// Persona ids in the desired order
        #[arg(required = true, allow_negative_numbers = true)]
        ids: Vec<i64>,
    },

    /// Save a new display order
    Reorder(ReorderArgs),

    /// Display version and build information
    Version,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

#[derive(Args, Debug, Clone)]
#[command(group(
    clap::ArgGroup::new("target")
        .required(true)
        .args(["order", "move_id"])
))]
pub struct ReorderArgs {
    /// Full order as comma-separated ids (e.g. 7,2,-1); must list every shown persona
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub order: Option<Vec<i64>>,

    /// Id of the persona to move
    #[arg(long = "move", allow_negative_numbers = true, requires = "to")]
    pub move_id: Option<i64>,

    /// Zero-based position to move it to
    #[arg(long)]
    pub to: Option<usize>,

    /// Reorder among all personas, including hidden ones
    #[arg(short, long)]
    pub all: bool,
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the effective configuration
    Show,

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the configuration
    Validate,
}
