use riot_datatypes::ChampionId;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{DecodeError, Event, EventKind};
use crate::lookup::ChampionCatalog;

/// Turn the raw payload of a message into the event of `kind`.
///
/// `Ok(None)` means "nothing to emit": the selected champion id isn't in the catalog
/// (e.g. `0` while no champion is hovered).
/// The derived kinds decode to the session they are computed from.
pub fn decode(kind: EventKind, raw: &Value, catalog: &dyn ChampionCatalog) -> Result<Option<Event>, DecodeError> {
    let event = match kind {
        EventKind::GameflowStateChanged => Event::GameflowStateChanged(from_value(kind, raw)?),
        EventKind::MatchFoundStatusChanged => Event::MatchFoundStatusChanged(from_value(kind, raw)?),
        EventKind::SelectedChampionChanged => {
            let champion_id: ChampionId = from_value(kind, raw)?;
            match catalog.champion_by_id(champion_id) {
                Some(champion) => Event::SelectedChampionChanged(champion),
                None => return Ok(None),
            }
        }
        EventKind::ChampionTradeReceived => Event::ChampionTradeReceived(from_value(kind, raw)?),
        EventKind::SessionUpdated | EventKind::ChampSelectTurnToPick | EventKind::PeerSelectionChanged => {
            Event::SessionUpdated(Box::new(from_value(kind, raw)?))
        }
    };

    Ok(Some(event))
}

fn from_value<T: DeserializeOwned>(kind: EventKind, raw: &Value) -> Result<T, DecodeError> {
    T::deserialize(raw).map_err(|source| DecodeError {
        kind,
        source,
        raw: raw.clone(),
    })
}
