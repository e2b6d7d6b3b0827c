use anyhow::Result;
use futures_util::StreamExt;
use riot_datatypes::lcu::Summoner;
use riot_datatypes::Champion;
use riot_local_auth::Credentials;
use serde_json::Value;
use shaco::model::ws::{EventType, LcuSubscriptionType};
use shaco::{rest::LcuRestClient, ws::LcuWebsocketClient};
use tokio::select;
use tokio_util::sync::CancellationToken;

use super::transport::{ActiveTopics, LcuTransport, TopicChange};
use crate::config::Config;
use crate::events::{topic, LeagueEvents};
use crate::lookup::{ChampionCatalogCache, LocalSummoner, SummonerLookup};

#[derive(Clone)]
pub struct LcuCtx {
    pub credentials: Credentials,
    pub config: Config,
    pub summoner: LocalSummoner,
    pub champions: ChampionCatalogCache,
    pub cancel_token: CancellationToken,
}

/// A single websocket session with the League client.
///
/// Returns when the websocket closes, the router is dropped or the token is cancelled.
pub struct LcuConnection<'a> {
    ctx: LcuCtx,
    events: &'a mut LeagueEvents<LcuTransport>,
    topics: &'a mut ActiveTopics,
}

impl<'a> LcuConnection<'a> {
    const CURRENT_SUMMONER: &'static str = "/lol-summoner/v1/current-summoner";

    pub fn new(ctx: LcuCtx, events: &'a mut LeagueEvents<LcuTransport>, topics: &'a mut ActiveTopics) -> Self {
        Self { ctx, events, topics }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut lcu_ws_client = LcuWebsocketClient::connect_with(&self.ctx.credentials).await?;
        let lcu_rest_client = LcuRestClient::from(&self.ctx.credentials);

        // subscriptions made while disconnected (or before the first connection)
        self.events.apply_pending();
        self.topics.drain_pending();
        for topic in self.topics.topics() {
            lcu_ws_client
                .subscribe(LcuSubscriptionType::JsonApiEvent(topic.into()))
                .await?;
        }
        log::info!("connected to LCU websocket");

        Self::refresh_lookups(&self.ctx, &lcu_rest_client).await;
        if self.ctx.config.prime_on_connect {
            self.prime_topics(&lcu_rest_client).await;
        }

        let command_signal = self.events.command_signal();
        loop {
            select! {
                _ = self.ctx.cancel_token.cancelled() => {
                    log::info!("task cancelled (LCU connection)");
                    break;
                }
                _ = command_signal.notified() => self.events.apply_pending(),
                command = self.topics.recv() => {
                    let Some(command) = command else {
                        log::info!("event router dropped - closing LCU connection");
                        break;
                    };

                    for change in self.topics.apply(command) {
                        match change {
                            TopicChange::Subscribe(topic) => {
                                lcu_ws_client.subscribe(LcuSubscriptionType::JsonApiEvent(topic)).await?
                            }
                            TopicChange::Unsubscribe(topic) => {
                                lcu_ws_client.unsubscribe(LcuSubscriptionType::JsonApiEvent(topic)).await?
                            }
                        }
                    }
                }
                event = lcu_ws_client.next() => {
                    let Some(event) = event else {
                        log::info!("LCU websocket closed");
                        break;
                    };

                    let payload = event.payload;
                    if self.ctx.config.trace_messages {
                        log::debug!("{:?} {}: {}", payload.event_type, payload.uri, payload.data);
                    }
                    if payload.event_type == EventType::Delete {
                        log::debug!("{} deleted", payload.uri);
                        continue;
                    }

                    // the client may have been started before anyone logged in
                    if payload.uri == topic::SESSION && self.ctx.summoner.current_summoner_id().is_none() {
                        Self::refresh_lookups(&self.ctx, &lcu_rest_client).await;
                    }

                    self.events.on_message(&payload.uri, payload.data);
                }
            }
        }

        Ok(())
    }

    /// Takes the ctx instead of `&self`: the router must not be borrowed across the await.
    async fn refresh_lookups(ctx: &LcuCtx, lcu_rest_client: &LcuRestClient) {
        let summoner = match lcu_rest_client.get::<Summoner>(Self::CURRENT_SUMMONER).await {
            Ok(summoner) => summoner,
            Err(e) => {
                log::info!("no current summoner yet: {e}");
                ctx.summoner.set(None);
                return;
            }
        };
        ctx.summoner.set(Some(summoner.summoner_id));

        match lcu_rest_client
            .get::<Vec<Champion>>(format!(
                "/lol-champions/v1/inventories/{}/champions",
                summoner.summoner_id
            ))
            .await
        {
            Ok(champions) => {
                ctx.champions.replace(champions);
                if ctx.champions.is_empty() {
                    log::warn!("champion inventory is empty, selected champions can't be resolved");
                } else {
                    log::info!("loaded {} champions", ctx.champions.len());
                }
            }
            Err(e) => log::warn!("failed to load champions: {e}"),
        }
    }

    /// Feed the current state of every active topic through the router, so listeners
    /// don't have to wait for the next change.
    async fn prime_topics(&mut self, lcu_rest_client: &LcuRestClient) {
        let topics: Vec<String> = self.topics.topics().map(str::to_owned).collect();
        for topic in topics {
            match lcu_rest_client.get::<Value>(topic.as_str()).await {
                Ok(payload) => self.events.on_message(&topic, payload),
                Err(e) => log::info!("no initial event-data for {topic}: {e}"),
            }
        }
    }
}
