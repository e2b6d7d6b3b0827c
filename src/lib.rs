//! Typed subscriptions to the League client's websocket events.
//!
//! [`LeagueEvents`] turns raw topic messages into typed events and derives champ select
//! events that don't exist on the wire ("your turn to pick/ban", "another player changed
//! their selection") by diffing consecutive sessions. The [`lcu`] module connects it to a
//! running client.

mod util;

pub mod config;
pub mod events;
pub mod lcu;
pub mod lookup;

pub use config::Config;
pub use events::{Event, EventKind, EventsHandle, LeagueEvents, ListenerId, SummonerSelection, Transport};
pub use lookup::{ChampionCatalog, SummonerLookup};
pub use riot_datatypes;
