mod decode;
mod diff;
mod error;
mod event;
mod kind;
mod listeners;
mod router;

pub use decode::decode;
pub use diff::{DiffEngineState, SessionChanges, SessionDiffEngine, TurnState};
pub use error::{DecodeError, Fault};
pub use event::{Event, SummonerSelection};
pub use kind::{kinds_sharing_topic, primary_kind, topic, EventKind};
pub use listeners::{Listener, ListenerId};
pub use router::{EventsHandle, LeagueEvents, Transport};
