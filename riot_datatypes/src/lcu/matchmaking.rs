use serde::{Deserialize, Serialize};

use crate::SummonerId;

/// Payload of `/lol-matchmaking/v1/ready-check`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyCheck {
    pub state: ReadyCheckState,
    pub player_response: PlayerResponse,
    #[serde(default)]
    pub decliner_ids: Vec<SummonerId>,
    #[serde(default)]
    pub dodge_warning: DodgeWarning,
    #[serde(default)]
    pub suppress_ux: bool,
    /// seconds since the ready check popped
    #[serde(default)]
    pub timer: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadyCheckState {
    Invalid,
    InProgress,
    EveryoneReady,
    StrangerNotReady,
    PartyNotReady,
    Error,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerResponse {
    None,
    Accepted,
    Declined,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DodgeWarning {
    #[default]
    None,
    Warning,
    Penalty,
}
