use riot_datatypes::lcu::champ_select::{ActionType, Session};
use riot_datatypes::{ActionId, SummonerId};

use super::{Fault, SummonerSelection};

/// Which turn notifications were already sent for the local player's current action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnState {
    pub last_action_id: Option<ActionId>,
    pub pick_notified: bool,
    pub ban_notified: bool,
}

impl TurnState {
    /// Returns the action type to notify about, at most once per action id and type.
    fn observe(&mut self, action_id: ActionId, action_type: ActionType) -> Option<ActionType> {
        if self.last_action_id != Some(action_id) {
            *self = TurnState {
                last_action_id: Some(action_id),
                ..TurnState::default()
            };
        }

        let notified = match action_type {
            ActionType::Pick => &mut self.pick_notified,
            ActionType::Ban => &mut self.ban_notified,
            ActionType::TenBansReveal | ActionType::Unknown => return None,
        };

        if *notified {
            None
        } else {
            *notified = true;
            Some(action_type)
        }
    }
}

/// What a new session changed compared to the retained one.
#[derive(Debug, Default)]
pub struct SessionChanges {
    /// the local player has to pick or ban now
    pub turn: Option<ActionType>,
    /// changed slots of the last round, in slot order
    pub peer_changes: Vec<SummonerSelection>,
    pub inconsistency: Option<Fault>,
}

#[derive(Debug, Default)]
pub struct DiffEngineState {
    pub previous: Option<Session>,
    pub turn: TurnState,
}

/// Derives turn notifications and peer selection changes from consecutive champ select sessions.
#[derive(Debug, Default)]
pub struct SessionDiffEngine {
    state: DiffEngineState,
}

impl SessionDiffEngine {
    pub fn process(&mut self, session: Session, local_summoner: Option<SummonerId>) -> SessionChanges {
        let turn = Self::detect_turn(&mut self.state.turn, &session, local_summoner);

        let (peer_changes, inconsistency) = match &self.state.previous {
            Some(previous) => Self::diff_last_round(previous, &session),
            None => (vec![], None),
        };

        self.state.previous = Some(session);

        SessionChanges {
            turn,
            peer_changes,
            inconsistency,
        }
    }

    pub fn reset(&mut self) {
        self.state = DiffEngineState::default();
    }

    pub fn state(&self) -> &DiffEngineState {
        &self.state
    }

    fn detect_turn(
        turn: &mut TurnState,
        session: &Session,
        local_summoner: Option<SummonerId>,
    ) -> Option<ActionType> {
        // the local summoner may not be known yet or not be part of this session
        let local_cell_id = session.cell_of_summoner(local_summoner?)?;

        let action = session
            .all_actions()
            .find(|action| action.actor_cell_id == local_cell_id && action.is_in_progress)?;

        turn.observe(action.id, action.action_type)
    }

    /// Slots of the last round that differ from the previous session.
    /// Only meaningful while both sessions have the same rounds; a last round that grew or
    /// shrank is still compared slot by slot up to the shorter length, and reported.
    fn diff_last_round(previous: &Session, current: &Session) -> (Vec<SummonerSelection>, Option<Fault>) {
        if previous.round_count() != current.round_count() {
            let fault = Fault::DiffInconsistency {
                previous_rounds: previous.round_count(),
                current_rounds: current.round_count(),
            };
            return (vec![], Some(fault));
        }

        let (Some(previous_round), Some(current_round)) = (previous.last_round(), current.last_round()) else {
            return (vec![], None);
        };

        let inconsistency = (previous_round.len() != current_round.len()).then(|| Fault::SlotCountMismatch {
            previous_slots: previous_round.len(),
            current_slots: current_round.len(),
        });

        let changes = current_round
            .iter()
            .zip(previous_round)
            .filter(|(new, old)| new != old)
            .map(|(action, _)| SummonerSelection {
                selection_info: action.clone(),
                summoner_info: current.player_by_cell(action.actor_cell_id).cloned(),
            })
            .collect();

        (changes, inconsistency)
    }
}
