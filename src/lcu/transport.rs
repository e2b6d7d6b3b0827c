use std::collections::BTreeSet;

use anyhow::{anyhow, Result};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::events::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicCommand {
    Activate(String),
    Deactivate(String),
    DeactivateAll,
}

/// Websocket operation needed to get a connection in line with the [`ActiveTopics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicChange {
    Subscribe(String),
    Unsubscribe(String),
}

/// Router side of the LCU connection: topic changes are queued and picked up by the
/// connection task, which owns the websocket.
#[derive(Debug, Clone)]
pub struct LcuTransport {
    commands: UnboundedSender<TopicCommand>,
}

impl LcuTransport {
    pub fn new() -> (Self, ActiveTopics) {
        let (commands, rx) = mpsc::unbounded_channel();
        (Self { commands }, ActiveTopics::new(rx))
    }

    fn send(&self, command: TopicCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|e| anyhow!("LCU connection task is gone ({:?})", e.0))
    }
}

impl Transport for LcuTransport {
    fn ensure_topic_active(&mut self, topic: &str) -> Result<()> {
        self.send(TopicCommand::Activate(topic.into()))
    }

    fn ensure_topic_inactive(&mut self, topic: &str) -> Result<()> {
        self.send(TopicCommand::Deactivate(topic.into()))
    }

    fn deactivate_all_topics(&mut self) -> Result<()> {
        self.send(TopicCommand::DeactivateAll)
    }
}

/// Connection side: the set of topics that should be subscribed on the websocket.
/// Outlives single connections so a reconnect can subscribe everything again.
#[derive(Debug)]
pub struct ActiveTopics {
    commands: UnboundedReceiver<TopicCommand>,
    topics: BTreeSet<String>,
}

impl ActiveTopics {
    fn new(commands: UnboundedReceiver<TopicCommand>) -> Self {
        Self {
            commands,
            topics: BTreeSet::new(),
        }
    }

    /// `None` once the transport (and with it the router) was dropped.
    pub async fn recv(&mut self) -> Option<TopicCommand> {
        self.commands.recv().await
    }

    pub fn apply(&mut self, command: TopicCommand) -> Vec<TopicChange> {
        match command {
            TopicCommand::Activate(topic) if self.topics.insert(topic.clone()) => vec![TopicChange::Subscribe(topic)],
            TopicCommand::Deactivate(topic) if self.topics.remove(&topic) => vec![TopicChange::Unsubscribe(topic)],
            TopicCommand::DeactivateAll => std::mem::take(&mut self.topics)
                .into_iter()
                .map(TopicChange::Unsubscribe)
                .collect(),
            _ => vec![],
        }
    }

    /// Record everything queued while no connection was around.
    /// Nothing needs to be unsubscribed since there is no websocket yet.
    pub fn drain_pending(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            self.apply(command);
        }
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(String::as_str)
    }
}
