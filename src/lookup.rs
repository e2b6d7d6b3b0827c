//! Read-only lookups the event layer needs but doesn't own.
//!
//! Both are injected into [`LeagueEvents`](crate::LeagueEvents) at construction. The shared
//! implementations ([`LocalSummoner`], [`ChampionCatalogCache`]) are cheap to clone so the
//! LCU connection can refresh them while the router reads them.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use riot_datatypes::{Champion, ChampionId, SummonerId};

pub trait SummonerLookup: Send + Sync {
    /// `None` while the client has no logged in summoner yet.
    fn current_summoner_id(&self) -> Option<SummonerId>;
}

pub trait ChampionCatalog: Send + Sync {
    fn champion_by_id(&self, id: ChampionId) -> Option<Champion>;
}

impl SummonerLookup for Option<SummonerId> {
    fn current_summoner_id(&self) -> Option<SummonerId> {
        *self
    }
}

impl ChampionCatalog for HashMap<ChampionId, Champion> {
    fn champion_by_id(&self, id: ChampionId) -> Option<Champion> {
        self.get(&id).cloned()
    }
}

impl ChampionCatalog for Vec<Champion> {
    fn champion_by_id(&self, id: ChampionId) -> Option<Champion> {
        self.iter().find(|champion| champion.id == id).cloned()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocalSummoner(Arc<RwLock<Option<SummonerId>>>);

impl LocalSummoner {
    pub fn set(&self, summoner_id: Option<SummonerId>) {
        *self.0.write().unwrap_or_else(|e| e.into_inner()) = summoner_id;
    }
}

impl SummonerLookup for LocalSummoner {
    fn current_summoner_id(&self) -> Option<SummonerId> {
        *self.0.read().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChampionCatalogCache(Arc<RwLock<HashMap<ChampionId, Champion>>>);

impl ChampionCatalogCache {
    pub fn replace(&self, champions: impl IntoIterator<Item = Champion>) {
        let champions = champions.into_iter().map(|c| (c.id, c)).collect();
        *self.0.write().unwrap_or_else(|e| e.into_inner()) = champions;
    }

    pub fn len(&self) -> usize {
        self.0.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChampionCatalog for ChampionCatalogCache {
    fn champion_by_id(&self, id: ChampionId) -> Option<Champion> {
        self.0.read().unwrap_or_else(|e| e.into_inner()).get(&id).cloned()
    }
}
