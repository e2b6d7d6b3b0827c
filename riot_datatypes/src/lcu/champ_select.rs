use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::{ActionId, CellId, ChampionId, SkinId, SpellId, SummonerId, TradeId};

pub type GameId = i64;

/// Payload of `/lol-champ-select/v1/session`.
///
/// The client re-sends the complete session on every change, so every field defaults
/// to keep partially populated sessions (custom games, practice tool, spectating) decodable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
    /// rounds of pick/ban actions, each round an ordered list of slots
    pub actions: Vec<Vec<Action>>,
    pub my_team: Vec<Player>,
    pub their_team: Vec<Player>,
    pub bans: Bans,
    pub timer: Timer,
    pub trades: Vec<Trade>,
    pub bench_champions: Vec<BenchChampion>,
    pub game_id: GameId,
    pub counter: i64,
    pub local_player_cell_id: CellId,
    pub allow_battle_boost: bool,
    pub allow_duplicate_picks: bool,
    pub allow_rerolling: bool,
    pub allow_skin_selection: bool,
    pub bench_enabled: bool,
    pub has_simultaneous_bans: bool,
    pub has_simultaneous_picks: bool,
    pub is_custom_game: bool,
    pub is_spectating: bool,
    pub skip_champion_select: bool,
    pub rerolls_remaining: i64,
}

impl Session {
    pub fn round_count(&self) -> usize {
        self.actions.len()
    }

    pub fn last_round(&self) -> Option<&[Action]> {
        self.actions.last().map(Vec::as_slice)
    }

    /// all actions in round order
    pub fn all_actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().flatten()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.my_team.iter().chain(self.their_team.iter())
    }

    pub fn player_by_cell(&self, cell_id: CellId) -> Option<&Player> {
        self.players().find(|player| player.cell_id == cell_id)
    }

    /// Cell of a summoner on the local team.
    /// The enemy team is anonymized during champ select, so only `my_team` can match.
    pub fn cell_of_summoner(&self, summoner_id: SummonerId) -> Option<CellId> {
        self.my_team
            .iter()
            .find(|player| player.summoner_id == summoner_id)
            .map(|player| player.cell_id)
    }
}

/// One pick or ban slot. The `id` stays stable across session updates for the same turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: ActionId,
    pub actor_cell_id: CellId,
    #[serde(default)]
    pub champion_id: ChampionId,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub is_in_progress: bool,
    #[serde(default)]
    pub is_ally_action: bool,
    #[serde(default)]
    pub pick_turn: i64,
    #[serde(rename = "type")]
    pub action_type: ActionType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Pick,
    Ban,
    /// ranked queues reveal all ten bans as a separate action
    TenBansReveal,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Player {
    pub cell_id: CellId,
    pub summoner_id: SummonerId,
    pub champion_id: ChampionId,
    pub champion_pick_intent: ChampionId,
    pub selected_skin_id: SkinId,
    pub ward_skin_id: SkinId,
    pub spell1_id: SpellId,
    pub spell2_id: SpellId,
    pub assigned_position: String,
    pub entitled_feature_type: String,
    pub team: Team,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Team {
    #[default]
    Order = 1,
    Chaos = 2,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bans {
    pub my_team_bans: Vec<ChampionId>,
    pub their_team_bans: Vec<ChampionId>,
    pub num_bans: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timer {
    pub adjusted_time_left_in_phase: i64,
    pub internal_now_in_epoch_ms: i64,
    pub total_time_in_phase: i64,
    pub is_infinite: bool,
    pub phase: TimerPhase,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimerPhase {
    Planning,
    BanPick,
    Finalization,
    GameStarting,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchChampion {
    pub champion_id: ChampionId,
    #[serde(default)]
    pub is_priority: bool,
}

/// Entry of `/lol-champ-select/v1/session/trades`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: TradeId,
    pub cell_id: CellId,
    pub state: TradeState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeState {
    Available,
    Busy,
    Invalid,
    Received,
    Sent,
    #[serde(other)]
    Unknown,
}
