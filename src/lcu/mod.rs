mod connection;
mod service;
mod transport;

pub use connection::{LcuConnection, LcuCtx};
pub use service::{EventService, LcuEvents};
pub use transport::{ActiveTopics, LcuTransport, TopicChange, TopicCommand};
