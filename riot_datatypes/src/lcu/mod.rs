pub mod champ_select;
mod gameflow;
mod matchmaking;
mod summoner;

pub use gameflow::GamePhase;
pub use matchmaking::{DodgeWarning, PlayerResponse, ReadyCheck, ReadyCheckState};
pub use summoner::Summoner;
