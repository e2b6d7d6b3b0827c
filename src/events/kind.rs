use serde::{Deserialize, Serialize};

pub mod topic {
    pub const GAMEFLOW_PHASE: &str = "/lol-gameflow/v1/gameflow-phase";
    pub const READY_CHECK: &str = "/lol-matchmaking/v1/ready-check";
    pub const CURRENT_CHAMPION: &str = "/lol-champ-select/v1/current-champion";
    pub const SESSION_TRADES: &str = "/lol-champ-select/v1/session/trades";
    pub const SESSION: &str = "/lol-champ-select/v1/session";
}

/// Every event a consumer can subscribe to.
///
/// `SessionUpdated`, `ChampSelectTurnToPick` and `PeerSelectionChanged` share the session topic:
/// the first is the decoded session itself, the other two are derived by diffing consecutive sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum_macros::IntoStaticStr, Serialize, Deserialize)]
pub enum EventKind {
    GameflowStateChanged,
    MatchFoundStatusChanged,
    SelectedChampionChanged,
    ChampionTradeReceived,
    SessionUpdated,
    ChampSelectTurnToPick,
    PeerSelectionChanged,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        EventKind::GameflowStateChanged,
        EventKind::MatchFoundStatusChanged,
        EventKind::SelectedChampionChanged,
        EventKind::ChampionTradeReceived,
        EventKind::SessionUpdated,
        EventKind::ChampSelectTurnToPick,
        EventKind::PeerSelectionChanged,
    ];

    pub const fn topic(self) -> &'static str {
        match self {
            EventKind::GameflowStateChanged => topic::GAMEFLOW_PHASE,
            EventKind::MatchFoundStatusChanged => topic::READY_CHECK,
            EventKind::SelectedChampionChanged => topic::CURRENT_CHAMPION,
            EventKind::ChampionTradeReceived => topic::SESSION_TRADES,
            EventKind::SessionUpdated | EventKind::ChampSelectTurnToPick | EventKind::PeerSelectionChanged => {
                topic::SESSION
            }
        }
    }

    /// Derived kinds never appear on the wire; they are computed from `SessionUpdated` payloads.
    pub const fn is_derived(self) -> bool {
        matches!(self, EventKind::ChampSelectTurnToPick | EventKind::PeerSelectionChanged)
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// All kinds delivered on `topic`, the decoded (primary) kind first.
pub fn kinds_sharing_topic(topic: &str) -> Vec<EventKind> {
    let mut kinds: Vec<_> = EventKind::ALL.into_iter().filter(|kind| kind.topic() == topic).collect();
    kinds.sort_by_key(|kind| kind.is_derived());
    kinds
}

/// The kind whose decoder handles messages on `topic`.
pub fn primary_kind(topic: &str) -> Option<EventKind> {
    EventKind::ALL
        .into_iter()
        .find(|kind| !kind.is_derived() && kind.topic() == topic)
}
