use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use league_events::events::topic;
use league_events::riot_datatypes::lcu::champ_select::ActionType;
use league_events::riot_datatypes::lcu::GamePhase;
use league_events::riot_datatypes::Champion;
use league_events::{Event, EventKind, LeagueEvents, SummonerSelection, Transport};
use serde_json::{json, Value};

const LOCAL_SUMMONER: i64 = 1001;

#[derive(Debug, Default)]
struct RecordingTransport {
    active: HashMap<String, usize>,
    log: Vec<String>,
}

impl Transport for RecordingTransport {
    fn ensure_topic_active(&mut self, topic: &str) -> Result<()> {
        *self.active.entry(topic.into()).or_default() += 1;
        self.log.push(format!("+{topic}"));
        Ok(())
    }

    fn ensure_topic_inactive(&mut self, topic: &str) -> Result<()> {
        self.active.remove(topic);
        self.log.push(format!("-{topic}"));
        Ok(())
    }

    fn deactivate_all_topics(&mut self) -> Result<()> {
        self.active.clear();
        self.log.push("-*".into());
        Ok(())
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn router() -> LeagueEvents<RecordingTransport> {
    init_logger();
    let champions = vec![
        Champion {
            id: 64,
            name: "Lee Sin".into(),
        },
        Champion {
            id: 103,
            name: "Ahri".into(),
        },
    ];
    LeagueEvents::new(RecordingTransport::default(), Some(LOCAL_SUMMONER), champions)
}

/// Collects every event of `kind` delivered to the router.
fn record(events: &mut LeagueEvents<RecordingTransport>, kind: EventKind) -> Arc<Mutex<Vec<Event>>> {
    let seen = Arc::new(Mutex::new(vec![]));
    events.on(kind, {
        let seen = seen.clone();
        move |event| {
            seen.lock().unwrap().push(event.clone());
            Ok(())
        }
    });
    seen
}

fn action(id: i64, actor_cell_id: i64, action_type: &str, champion_id: i64, in_progress: bool) -> Value {
    let is_ally_action = actor_cell_id < 5;
    json!({
        "id": id,
        "actorCellId": actor_cell_id,
        "championId": champion_id,
        "completed": false,
        "isAllyAction": is_ally_action,
        "isInProgress": in_progress,
        "pickTurn": 1,
        "type": action_type
    })
}

fn session(actions: Value) -> Value {
    json!({
        "actions": actions,
        "localPlayerCellId": 2,
        "myTeam": [
            {"cellId": 0, "summonerId": 1000, "championId": 0, "team": 1},
            {"cellId": 1, "summonerId": 1002, "championId": 0, "team": 1},
            {"cellId": 2, "summonerId": LOCAL_SUMMONER, "championId": 0, "team": 1}
        ],
        "theirTeam": [
            {"cellId": 5, "summonerId": 0, "championId": 0, "team": 2},
            {"cellId": 6, "summonerId": 0, "championId": 0, "team": 2}
        ],
        "timer": {"phase": "BAN_PICK"}
    })
}

fn turns(seen: &Mutex<Vec<Event>>) -> Vec<ActionType> {
    seen.lock()
        .unwrap()
        .iter()
        .filter_map(|event| match event {
            Event::ChampSelectTurnToPick(action_type) => Some(*action_type),
            _ => None,
        })
        .collect()
}

#[test]
fn subscribing_twice_keeps_one_transport_subscription() {
    let mut events = router();

    events.subscribe(EventKind::GameflowStateChanged).unwrap();
    events.subscribe(EventKind::GameflowStateChanged).unwrap();

    assert_eq!(events.transport().active.get(topic::GAMEFLOW_PHASE), Some(&1));
    assert_eq!(events.transport().log, vec![format!("+{}", topic::GAMEFLOW_PHASE)]);
}

#[test]
fn session_subscription_alone_does_not_notify_turns() {
    let mut events = router();
    let sessions = record(&mut events, EventKind::SessionUpdated);
    let turns_seen = record(&mut events, EventKind::ChampSelectTurnToPick);
    events.subscribe(EventKind::SessionUpdated).unwrap();

    events.on_message(topic::SESSION, session(json!([[action(1, 2, "pick", 0, true)]])));

    assert_eq!(sessions.lock().unwrap().len(), 1);
    assert!(turns_seen.lock().unwrap().is_empty());
}

#[test]
fn turn_is_notified_once_for_repeated_snapshots() {
    let mut events = router();
    let seen = record(&mut events, EventKind::ChampSelectTurnToPick);
    events.subscribe(EventKind::ChampSelectTurnToPick).unwrap();

    for _ in 0..5 {
        events.on_message(topic::SESSION, session(json!([[action(7, 2, "pick", 0, true)]])));
    }

    assert_eq!(turns(&seen), vec![ActionType::Pick]);
}

#[test]
fn new_action_rearms_turn_notification() {
    let mut events = router();
    let seen = record(&mut events, EventKind::ChampSelectTurnToPick);
    events.subscribe(EventKind::ChampSelectTurnToPick).unwrap();

    events.on_message(topic::SESSION, session(json!([[action(7, 2, "pick", 0, true)]])));
    events.on_message(
        topic::SESSION,
        session(json!([[action(7, 2, "pick", 64, false)], [action(8, 2, "ban", 0, true)]])),
    );
    events.on_message(
        topic::SESSION,
        session(json!([[action(7, 2, "pick", 64, false)], [action(8, 2, "ban", 0, true)]])),
    );

    assert_eq!(turns(&seen), vec![ActionType::Pick, ActionType::Ban]);
}

#[test]
fn peer_change_in_last_round_is_reported_with_its_player() {
    let mut events = router();
    let seen = record(&mut events, EventKind::PeerSelectionChanged);
    events.subscribe(EventKind::PeerSelectionChanged).unwrap();

    events.on_message(
        topic::SESSION,
        session(json!([[action(1, 0, "pick", 0, true), action(2, 1, "pick", 0, true)]])),
    );
    events.on_message(
        topic::SESSION,
        session(json!([[action(1, 0, "pick", 0, true), action(2, 1, "pick", 64, true)]])),
    );

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let Event::PeerSelectionChanged(SummonerSelection {
        selection_info,
        summoner_info,
    }) = &seen[0]
    else {
        panic!("unexpected event {:?}", seen[0]);
    };
    assert_eq!(selection_info.id, 2);
    assert_eq!(selection_info.champion_id, 64);
    let player = summoner_info.as_ref().unwrap();
    assert_eq!(player.cell_id, selection_info.actor_cell_id);
    assert_eq!(player.summoner_id, 1002);
}

#[test]
fn round_count_mismatch_is_skipped_but_snapshot_is_kept() {
    let mut events = router();
    let seen = record(&mut events, EventKind::PeerSelectionChanged);
    events.subscribe(EventKind::PeerSelectionChanged).unwrap();

    let round = |champion_id: i64| json!([action(1, 0, "pick", champion_id, true)]);

    events.on_message(topic::SESSION, session(json!([round(0), round(0), round(0)])));
    events.on_message(topic::SESSION, session(json!([round(0), round(0), round(0), round(0)])));
    assert!(seen.lock().unwrap().is_empty());

    // compared against the 4 round snapshot now
    events.on_message(topic::SESSION, session(json!([round(0), round(0), round(0), round(103)])));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn broken_session_does_not_affect_other_kinds() {
    let mut events = router();
    let phases = Arc::new(Mutex::new(vec![]));
    events.on_gameflow_state_changed({
        let phases = phases.clone();
        move |phase| {
            phases.lock().unwrap().push(phase);
            Ok(())
        }
    });
    let sessions = record(&mut events, EventKind::SessionUpdated);
    events.subscribe(EventKind::GameflowStateChanged).unwrap();
    events.subscribe(EventKind::SessionUpdated).unwrap();

    events.on_message(topic::GAMEFLOW_PHASE, json!("ChampSelect"));
    events.on_message(topic::SESSION, json!({"actions": "not a list"}));
    events.on_message(topic::GAMEFLOW_PHASE, json!("InProgress"));

    assert!(sessions.lock().unwrap().is_empty());
    assert_eq!(*phases.lock().unwrap(), vec![GamePhase::ChampSelect, GamePhase::InProgress]);
}

#[test]
fn unsubscribe_all_forgets_notified_turns() {
    let mut events = router();
    let seen = record(&mut events, EventKind::ChampSelectTurnToPick);
    let snapshot = session(json!([[action(7, 2, "pick", 0, true)]]));

    events.subscribe(EventKind::ChampSelectTurnToPick).unwrap();
    events.on_message(topic::SESSION, snapshot.clone());

    events.unsubscribe_all().unwrap();
    assert!(events.active_topics().is_empty());
    assert_eq!(events.transport().log.last().map(String::as_str), Some("-*"));

    events.subscribe(EventKind::ChampSelectTurnToPick).unwrap();
    events.on_message(topic::SESSION, snapshot);

    assert_eq!(turns(&seen), vec![ActionType::Pick, ActionType::Pick]);
}

#[test]
fn session_is_delivered_before_derived_events() {
    let mut events = router();
    let order = Arc::new(Mutex::new(vec![]));
    let kinds = [EventKind::PeerSelectionChanged, EventKind::ChampSelectTurnToPick, EventKind::SessionUpdated];
    for kind in kinds {
        events.on(kind, {
            let order = order.clone();
            move |event| {
                order.lock().unwrap().push(event.kind());
                Ok(())
            }
        });
    }
    events.subscribe_all().unwrap();

    events.on_message(
        topic::SESSION,
        session(json!([[action(1, 0, "pick", 0, true), action(7, 2, "pick", 0, true)]])),
    );
    events.on_message(
        topic::SESSION,
        session(json!([[action(1, 0, "pick", 64, true), action(7, 2, "pick", 0, true)]])),
    );

    assert_eq!(
        *order.lock().unwrap(),
        vec![
            EventKind::SessionUpdated,
            EventKind::ChampSelectTurnToPick,
            EventKind::SessionUpdated,
            EventKind::PeerSelectionChanged,
        ]
    );
}

#[test]
fn unsubscribe_all_from_a_listener_resets_after_the_message() {
    let mut events = router();
    let order = Arc::new(Mutex::new(vec![]));
    let derived = [EventKind::ChampSelectTurnToPick, EventKind::PeerSelectionChanged];
    for kind in derived {
        events.on(kind, {
            let order = order.clone();
            move |event| {
                order.lock().unwrap().push(event.kind());
                Ok(())
            }
        });
    }
    let handle = events.handle();
    let mut first = true;
    events.on(EventKind::SessionUpdated, {
        let order = order.clone();
        move |event| {
            order.lock().unwrap().push(event.kind());
            if std::mem::take(&mut first) {
                handle.unsubscribe_all()?;
            }
            Ok(())
        }
    });
    events.subscribe(EventKind::SessionUpdated).unwrap();
    events.subscribe(EventKind::ChampSelectTurnToPick).unwrap();
    events.subscribe(EventKind::PeerSelectionChanged).unwrap();

    events.on_message(
        topic::SESSION,
        session(json!([[action(1, 0, "pick", 0, true), action(7, 2, "pick", 0, true)]])),
    );
    assert!(!events.is_subscribed(EventKind::SessionUpdated));
    assert!(events.active_topics().is_empty());

    events.subscribe(EventKind::SessionUpdated).unwrap();
    events.subscribe(EventKind::ChampSelectTurnToPick).unwrap();
    events.subscribe(EventKind::PeerSelectionChanged).unwrap();

    // slot 1 changed, but there is no retained session to compare against anymore
    events.on_message(
        topic::SESSION,
        session(json!([[action(1, 0, "pick", 64, true), action(7, 2, "pick", 0, true)]])),
    );

    assert_eq!(
        *order.lock().unwrap(),
        vec![
            EventKind::SessionUpdated,
            EventKind::ChampSelectTurnToPick,
            EventKind::SessionUpdated,
            EventKind::ChampSelectTurnToPick,
        ]
    );
}

#[test]
fn failing_listener_does_not_stop_the_others() {
    let mut events = router();
    events.on(EventKind::GameflowStateChanged, |_| anyhow::bail!("listener failed"));
    events.on(EventKind::GameflowStateChanged, |_| panic!("listener panicked"));
    let seen = record(&mut events, EventKind::GameflowStateChanged);
    events.subscribe(EventKind::GameflowStateChanged).unwrap();

    events.on_message(topic::GAMEFLOW_PHASE, json!("Lobby"));
    events.on_message(topic::GAMEFLOW_PHASE, json!("Matchmaking"));

    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn removed_listener_is_not_called() {
    let mut events = router();
    let calls = Arc::new(Mutex::new(0));
    let listener_id = events.on_gameflow_state_changed({
        let calls = calls.clone();
        move |_| {
            *calls.lock().unwrap() += 1;
            Ok(())
        }
    });
    events.subscribe(EventKind::GameflowStateChanged).unwrap();

    events.on_message(topic::GAMEFLOW_PHASE, json!("Lobby"));
    assert!(events.off(listener_id));
    assert!(!events.off(listener_id));
    events.on_message(topic::GAMEFLOW_PHASE, json!("Matchmaking"));

    assert_eq!(*calls.lock().unwrap(), 1);
}

#[test]
fn selected_champion_is_resolved_from_the_catalog() {
    let mut events = router();
    let names = Arc::new(Mutex::new(vec![]));
    events.on_selected_champion_changed({
        let names = names.clone();
        move |champion| {
            names.lock().unwrap().push(champion.name.clone());
            Ok(())
        }
    });
    events.subscribe(EventKind::SelectedChampionChanged).unwrap();

    events.on_message(topic::CURRENT_CHAMPION, json!(103));
    events.on_message(topic::CURRENT_CHAMPION, json!(9999));
    events.on_message(topic::CURRENT_CHAMPION, json!(64));

    assert_eq!(*names.lock().unwrap(), vec!["Ahri".to_string(), "Lee Sin".to_string()]);
}

#[test]
fn ready_check_and_trades_are_decoded() {
    let mut events = router();
    let ready_checks = record(&mut events, EventKind::MatchFoundStatusChanged);
    let trades = Arc::new(Mutex::new(vec![]));
    events.on_champion_trades_updated({
        let trades = trades.clone();
        move |received| {
            trades.lock().unwrap().extend(received.iter().map(|trade| trade.id));
            Ok(())
        }
    });
    events.subscribe_all().unwrap();

    events.on_message(
        topic::READY_CHECK,
        json!({
            "state": "InProgress",
            "playerResponse": "None",
            "declinerIds": [],
            "dodgeWarning": "None",
            "suppressUx": false,
            "timer": 3.0
        }),
    );
    events.on_message(
        topic::SESSION_TRADES,
        json!([
            {"id": 1, "cellId": 0, "state": "AVAILABLE"},
            {"id": 2, "cellId": 1, "state": "RECEIVED"}
        ]),
    );

    assert_eq!(ready_checks.lock().unwrap().len(), 1);
    assert_eq!(*trades.lock().unwrap(), vec![1, 2]);
}
