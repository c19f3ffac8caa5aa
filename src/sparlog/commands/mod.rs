use crate::metrics::{CategorySavings, Stats, WeekSavings};
use crate::model::{LeaderboardRow, Profile, PurchaseEntry};

pub mod add;
pub mod export;
pub mod leaderboard;
pub mod list;
pub mod profile;
pub mod reset;
pub mod stats;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// The three insight metrics shown alongside plain stats.
#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    pub smart_score: u32,
    pub top_category: CategorySavings,
    pub best_week: WeekSavings,
}

/// Structured command output. Commands never print; the CLI decides how to
/// render whichever fields a command filled in.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub entries: Vec<PurchaseEntry>,
    pub stats: Option<Stats>,
    pub insights: Option<Insights>,
    pub leaderboard: Vec<LeaderboardRow>,
    pub profile: Option<Profile>,
    pub csv: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }
}
