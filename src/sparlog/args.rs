use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sparlog")]
#[command(about = "Track purchases and the money you saved on them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory override (also SPARLOG_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a purchase
    #[command(alias = "a")]
    Add {
        /// Where you bought it
        merchant: String,

        /// What you bought
        item: String,

        /// Free-form category label
        #[arg(short, long, default_value = "")]
        category: String,

        /// Amount paid, in currency units
        #[arg(short, long, default_value = "0")]
        amount: String,

        /// Discount percent you got
        #[arg(short, long, default_value = "0")]
        discount: String,

        /// Optional note
        #[arg(short, long, default_value = "")]
        note: String,

        /// Path to a receipt image to attach
        #[arg(long)]
        receipt: Option<PathBuf>,
    },

    /// List purchases, newest first
    #[command(alias = "ls")]
    List {
        /// Show only the N most recent purchases
        #[arg(short, long)]
        recent: Option<usize>,
    },

    /// Spending and savings statistics, with insights
    Stats,

    /// Monthly savings leaderboard
    #[command(alias = "lb")]
    Leaderboard {
        /// Month to rank, as YYYY-MM (defaults to the current month)
        month: Option<String>,
    },

    /// Export the full log as CSV
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or update the profile
    Profile {
        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Storage mode: local or remote
        #[arg(long)]
        mode: Option<String>,
    },

    /// Erase all local data (log, profile, onboarding flag)
    Reset {
        /// Skip the safety check
        #[arg(long)]
        force: bool,
    },
}
