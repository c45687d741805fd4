use serde::{Deserialize, Serialize};

/// Where a spin cycle currently is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Spinning,
    Settling,
    Evaluated,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReelView {
    pub spinning: bool,
    pub symbols: Vec<u8>, // catalog indices, top to bottom
}

/// Everything a presentation layer needs to draw the machine.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub balance: u64,
    pub phase: Phase,
    pub spinning: bool,
    pub reels: Vec<ReelView>,
    pub show_win: bool,
    pub win_amount: u64,
    pub spins: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn insufficient_credits(cost: u64) -> Self {
        Self {
            title: "Not enough credits".into(),
            description: format!("You need at least {cost} credits to spin"),
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn winner(payout: u64) -> Self {
        Self {
            title: "Winner!".into(),
            description: format!("You won {payout} credits!"),
            variant: NotificationVariant::Default,
        }
    }

    pub fn credits_added(amount: u64) -> Self {
        Self {
            title: "Credits Added".into(),
            description: format!("{amount} credits have been added to your balance"),
            variant: NotificationVariant::Default,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AudioCue {
    SpinStart,
    Win,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SpinError {
    #[error("a spin is already in progress")]
    AlreadySpinning,
    #[error("insufficient credits: balance {balance}, spin costs {cost}")]
    InsufficientCredits { balance: u64, cost: u64 },
    #[error("spin cycle was interrupted")]
    Interrupted,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error("playback blocked by the host")]
    Blocked,
    #[error("audio unavailable: {0}")]
    Unavailable(String),
}

pub type SpinResult<T> = Result<T, SpinError>;
