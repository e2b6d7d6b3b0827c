use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;

use super::connection::{LcuConnection, LcuCtx};
use super::transport::{ActiveTopics, LcuTransport};
use crate::cancellable;
use crate::config::Config;
use crate::events::{EventsHandle, LeagueEvents};
use crate::lookup::{ChampionCatalogCache, LocalSummoner};

/// A router wired to the League client, ready to get listeners before being started.
pub struct LcuEvents {
    pub events: LeagueEvents<LcuTransport>,
    topics: ActiveTopics,
    summoner: LocalSummoner,
    champions: ChampionCatalogCache,
}

impl Default for LcuEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl LcuEvents {
    pub fn new() -> Self {
        let summoner = LocalSummoner::default();
        let champions = ChampionCatalogCache::default();
        let (transport, topics) = LcuTransport::new();
        let events = LeagueEvents::new(transport, summoner.clone(), champions.clone());

        Self {
            events,
            topics,
            summoner,
            champions,
        }
    }
}

/// Keeps an [`LcuEvents`] connected for as long as it runs: waits for the client to
/// come up, pumps its messages and reconnects whenever the connection is lost.
pub struct EventService {
    handle: EventsHandle,
    cancel_token: CancellationToken,
    task: Mutex<JoinHandle<()>>,
}

impl EventService {
    pub fn start(lcu_events: LcuEvents, config: Config) -> Self {
        let LcuEvents {
            mut events,
            mut topics,
            summoner,
            champions,
        } = lcu_events;

        for kind in &config.subscriptions {
            if let Err(e) = events.subscribe(*kind) {
                log::error!("failed to subscribe {}: {e}", kind.name());
            }
        }

        let handle = events.handle();
        let cancel_token = CancellationToken::new();

        let task = tokio::spawn({
            let cancel_token = cancel_token.child_token();

            async move {
                log::info!("waiting for LCU API");

                loop {
                    if let Ok(credentials) = riot_local_auth::lcu::try_get_credentials() {
                        let ctx = LcuCtx {
                            credentials,
                            config: config.clone(),
                            summoner: summoner.clone(),
                            champions: champions.clone(),
                            cancel_token: cancel_token.clone(),
                        };

                        if let Err(e) = LcuConnection::new(ctx, &mut events, &mut topics).run().await {
                            log::error!("stopped listening for events: {e}");
                        }
                    }

                    let cancelled = cancellable!(sleep(config.retry_interval()), cancel_token, ());
                    if cancelled {
                        log::info!("task cancelled (event service)");
                        return;
                    }
                }
            }
        });

        Self {
            handle,
            cancel_token,
            task: Mutex::new(task),
        }
    }

    /// Change subscriptions of the running router.
    pub fn events(&self) -> &EventsHandle {
        &self.handle
    }

    pub async fn stop(&self) {
        self.cancel_token.cancel();

        let Ok(mut task) = self.task.try_lock() else { return };
        if timeout(Duration::from_secs(2), &mut *task).await.is_err() {
            log::warn!("EventService stop() ran into timeout - aborting task");
            task.abort();
        }
    }
}
