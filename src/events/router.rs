use std::collections::BTreeSet;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use riot_datatypes::lcu::champ_select::{ActionType, Session, Trade};
use riot_datatypes::lcu::{GamePhase, ReadyCheck};
use riot_datatypes::Champion;
use serde_json::Value;
use tokio::sync::Notify;

use super::diff::SessionDiffEngine;
use super::kind::{kinds_sharing_topic, primary_kind};
use super::listeners::Listeners;
use super::{decode, Event, EventKind, Fault, ListenerId, SummonerSelection};
use crate::lookup::{ChampionCatalog, SummonerLookup};

/// The connection the router subscribes topics on.
///
/// Implementations only activate/deactivate topics; incoming messages are handed to
/// [`LeagueEvents::on_message`] by whoever owns the connection.
pub trait Transport {
    fn ensure_topic_active(&mut self, topic: &str) -> Result<()>;
    fn ensure_topic_inactive(&mut self, topic: &str) -> Result<()>;
    fn deactivate_all_topics(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Subscribe(EventKind),
    Unsubscribe(EventKind),
    SubscribeAll,
    UnsubscribeAll,
}

/// Changes subscriptions of a [`LeagueEvents`] it doesn't have `&mut` access to,
/// e.g. from inside a listener or after the router moved into a background task.
///
/// Commands are applied once the message currently being delivered is done.
#[derive(Debug, Clone)]
pub struct EventsHandle {
    commands: Sender<Command>,
    wake: Arc<Notify>,
}

impl EventsHandle {
    pub fn subscribe(&self, kind: EventKind) -> Result<()> {
        self.send(Command::Subscribe(kind))
    }

    pub fn unsubscribe(&self, kind: EventKind) -> Result<()> {
        self.send(Command::Unsubscribe(kind))
    }

    pub fn subscribe_all(&self) -> Result<()> {
        self.send(Command::SubscribeAll)
    }

    pub fn unsubscribe_all(&self) -> Result<()> {
        self.send(Command::UnsubscribeAll)
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| anyhow!("event router dropped ({command:?})"))?;
        self.wake.notify_one();
        Ok(())
    }
}

/// Routes raw topic messages of the League client to typed listeners and derives
/// champ select turn / selection events from consecutive sessions.
///
/// Delivery is synchronous: `on_message` returns after every listener ran, so a
/// listener that blocks stalls all further messages.
pub struct LeagueEvents<T: Transport> {
    transport: T,
    summoner: Box<dyn SummonerLookup>,
    catalog: Box<dyn ChampionCatalog>,
    subscriptions: BTreeSet<EventKind>,
    listeners: Listeners,
    diff_engine: SessionDiffEngine,
    commands_tx: Sender<Command>,
    commands_rx: Receiver<Command>,
    wake: Arc<Notify>,
}

impl<T: Transport> LeagueEvents<T> {
    pub fn new(
        transport: T,
        summoner: impl SummonerLookup + 'static,
        catalog: impl ChampionCatalog + 'static,
    ) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel();
        Self {
            transport,
            summoner: Box::new(summoner),
            catalog: Box::new(catalog),
            subscriptions: BTreeSet::new(),
            listeners: Listeners::default(),
            diff_engine: SessionDiffEngine::default(),
            commands_tx,
            commands_rx,
            wake: Arc::new(Notify::new()),
        }
    }

    pub fn handle(&self) -> EventsHandle {
        EventsHandle {
            commands: self.commands_tx.clone(),
            wake: self.wake.clone(),
        }
    }

    /// Notified whenever an [`EventsHandle`] queued a command.
    pub fn command_signal(&self) -> Arc<Notify> {
        self.wake.clone()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // SUBSCRIPTIONS //

    pub fn subscribe(&mut self, kind: EventKind) -> Result<()> {
        if self.subscriptions.contains(&kind) {
            return Ok(());
        }

        if !self.topic_in_use(kind.topic()) {
            self.transport.ensure_topic_active(kind.topic())?;
        }
        self.subscriptions.insert(kind);

        log::info!("subscribed event: {}", kind.name());
        Ok(())
    }

    pub fn unsubscribe(&mut self, kind: EventKind) -> Result<()> {
        if !self.subscriptions.contains(&kind) {
            return Ok(());
        }

        let topic_still_needed = self
            .subscriptions
            .iter()
            .any(|other| *other != kind && other.topic() == kind.topic());
        if !topic_still_needed {
            self.transport.ensure_topic_inactive(kind.topic())?;
        }
        self.subscriptions.remove(&kind);

        log::info!("unsubscribed event: {}", kind.name());
        Ok(())
    }

    pub fn subscribe_all(&mut self) -> Result<()> {
        EventKind::ALL.into_iter().try_for_each(|kind| self.subscribe(kind))
    }

    /// Drops every subscription and forgets the retained session and turn state.
    /// The local state is reset even if the transport fails to deactivate its topics.
    pub fn unsubscribe_all(&mut self) -> Result<()> {
        self.subscriptions.clear();
        self.diff_engine.reset();

        log::info!("unsubscribed all events");
        self.transport.deactivate_all_topics()
    }

    pub fn is_subscribed(&self, kind: EventKind) -> bool {
        self.subscriptions.contains(&kind)
    }

    pub fn active_topics(&self) -> BTreeSet<&'static str> {
        self.subscriptions.iter().map(|kind| kind.topic()).collect()
    }

    fn topic_in_use(&self, topic: &str) -> bool {
        self.subscriptions.iter().any(|kind| kind.topic() == topic)
    }

    /// Apply commands queued through [`EventsHandle`]s.
    pub fn apply_pending(&mut self) {
        while let Ok(command) = self.commands_rx.try_recv() {
            let result = match command {
                Command::Subscribe(kind) => self.subscribe(kind),
                Command::Unsubscribe(kind) => self.unsubscribe(kind),
                Command::SubscribeAll => self.subscribe_all(),
                Command::UnsubscribeAll => self.unsubscribe_all(),
            };

            if let Err(e) = result {
                log::error!("failed to apply {command:?}: {e}");
            }
        }
    }

    // LISTENERS //

    pub fn on(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&Event) -> Result<()> + Send + 'static,
    ) -> ListenerId {
        self.listeners.add(kind, Box::new(listener))
    }

    /// Returns `false` if the listener was already removed.
    pub fn off(&mut self, listener_id: ListenerId) -> bool {
        self.listeners.remove(listener_id)
    }

    pub fn on_gameflow_state_changed(
        &mut self,
        mut listener: impl FnMut(GamePhase) -> Result<()> + Send + 'static,
    ) -> ListenerId {
        self.on(EventKind::GameflowStateChanged, move |event| match event {
            Event::GameflowStateChanged(phase) => listener(*phase),
            _ => Ok(()),
        })
    }

    pub fn on_ready_check_changed(
        &mut self,
        mut listener: impl FnMut(&ReadyCheck) -> Result<()> + Send + 'static,
    ) -> ListenerId {
        self.on(EventKind::MatchFoundStatusChanged, move |event| match event {
            Event::MatchFoundStatusChanged(ready_check) => listener(ready_check),
            _ => Ok(()),
        })
    }

    pub fn on_selected_champion_changed(
        &mut self,
        mut listener: impl FnMut(&Champion) -> Result<()> + Send + 'static,
    ) -> ListenerId {
        self.on(EventKind::SelectedChampionChanged, move |event| match event {
            Event::SelectedChampionChanged(champion) => listener(champion),
            _ => Ok(()),
        })
    }

    pub fn on_champion_trades_updated(
        &mut self,
        mut listener: impl FnMut(&[Trade]) -> Result<()> + Send + 'static,
    ) -> ListenerId {
        self.on(EventKind::ChampionTradeReceived, move |event| match event {
            Event::ChampionTradeReceived(trades) => listener(trades.as_slice()),
            _ => Ok(()),
        })
    }

    pub fn on_session_updated(
        &mut self,
        mut listener: impl FnMut(&Session) -> Result<()> + Send + 'static,
    ) -> ListenerId {
        self.on(EventKind::SessionUpdated, move |event| match event {
            Event::SessionUpdated(session) => listener(session.as_ref()),
            _ => Ok(()),
        })
    }

    pub fn on_turn_to_pick(
        &mut self,
        mut listener: impl FnMut(ActionType) -> Result<()> + Send + 'static,
    ) -> ListenerId {
        self.on(EventKind::ChampSelectTurnToPick, move |event| match event {
            Event::ChampSelectTurnToPick(action_type) => listener(*action_type),
            _ => Ok(()),
        })
    }

    pub fn on_peer_selection_changed(
        &mut self,
        mut listener: impl FnMut(&SummonerSelection) -> Result<()> + Send + 'static,
    ) -> ListenerId {
        self.on(EventKind::PeerSelectionChanged, move |event| match event {
            Event::PeerSelectionChanged(selection) => listener(selection),
            _ => Ok(()),
        })
    }

    // DELIVERY //

    /// Deliver one message pushed by the transport.
    /// Never fails: faults are logged and only drop (part of) this message.
    pub fn on_message(&mut self, topic: &str, payload: Value) {
        self.deliver(topic, &payload);
        self.apply_pending();
    }

    /// Like [`on_message`](Self::on_message) for a payload that still has to be parsed.
    pub fn on_raw_message(&mut self, topic: &str, raw: &str) {
        match serde_json::from_str::<Value>(raw) {
            Ok(payload) => self.on_message(topic, payload),
            Err(e) => {
                log::error!("failed to parse message on {topic}: {e}");
                log::debug!("raw message on {topic}: {raw}");
                self.apply_pending();
            }
        }
    }

    fn deliver(&mut self, topic: &str, payload: &Value) {
        let Some(primary) = primary_kind(topic) else {
            log::debug!("ignoring message on unknown topic {topic}");
            return;
        };
        if !kinds_sharing_topic(topic).iter().any(|kind| self.is_subscribed(*kind)) {
            log::debug!("ignoring message on inactive topic {topic}");
            return;
        }

        let event = match decode(primary, payload, self.catalog.as_ref()) {
            Ok(Some(event)) => event,
            Ok(None) => return,
            Err(e) => return Fault::from(e).log(),
        };

        self.emit(&event);

        // the session itself is always delivered before anything derived from it
        if let Event::SessionUpdated(session) = event {
            self.derive_session_events(*session);
        }
    }

    fn derive_session_events(&mut self, session: Session) {
        let local_summoner = self.summoner.current_summoner_id();
        let changes = self.diff_engine.process(session, local_summoner);

        if let Some(fault) = changes.inconsistency {
            fault.log();
        }
        if let Some(action_type) = changes.turn {
            log::info!("champ select turn to {action_type:?}");
            self.emit(&Event::ChampSelectTurnToPick(action_type));
        }
        for selection in changes.peer_changes {
            self.emit(&Event::PeerSelectionChanged(selection));
        }
    }

    fn emit(&mut self, event: &Event) {
        let kind = event.kind();
        if !self.subscriptions.contains(&kind) || !self.listeners.has_listeners(kind) {
            return;
        }

        log::debug!("invoking {} listeners", kind.name());
        for fault in self.listeners.dispatch(event) {
            fault.log();
        }
    }
}
