use riot_datatypes::lcu::champ_select::{Action, ActionType, Player, Session, Trade};
use riot_datatypes::lcu::{GamePhase, ReadyCheck};
use riot_datatypes::Champion;
use serde::{Deserialize, Serialize};

use super::EventKind;

/// A pick/ban slot that changed between two sessions, with the player acting on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerSelection {
    pub selection_info: Action,
    /// `None` if the acting cell isn't part of either roster
    pub summoner_info: Option<Player>,
}

#[derive(Debug, Clone, PartialEq, strum_macros::IntoStaticStr, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Event {
    GameflowStateChanged(GamePhase),
    MatchFoundStatusChanged(ReadyCheck),
    SelectedChampionChanged(Champion),
    ChampionTradeReceived(Vec<Trade>),
    SessionUpdated(Box<Session>),
    ChampSelectTurnToPick(ActionType),
    PeerSelectionChanged(SummonerSelection),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::GameflowStateChanged(_) => EventKind::GameflowStateChanged,
            Event::MatchFoundStatusChanged(_) => EventKind::MatchFoundStatusChanged,
            Event::SelectedChampionChanged(_) => EventKind::SelectedChampionChanged,
            Event::ChampionTradeReceived(_) => EventKind::ChampionTradeReceived,
            Event::SessionUpdated(_) => EventKind::SessionUpdated,
            Event::ChampSelectTurnToPick(_) => EventKind::ChampSelectTurnToPick,
            Event::PeerSelectionChanged(_) => EventKind::PeerSelectionChanged,
        }
    }
}
