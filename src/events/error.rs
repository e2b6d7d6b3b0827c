use serde_json::Value;
use thiserror::Error;

use super::EventKind;

#[derive(Debug, Error)]
#[error("failed to decode {kind:?} payload: {source}")]
pub struct DecodeError {
    pub kind: EventKind,
    #[source]
    pub source: serde_json::Error,
    pub raw: Value,
}

/// Everything that can go wrong while delivering a single message.
///
/// Faults are logged by the router and never leave it; the message (or the part of it
/// that faulted) is dropped and delivery continues with the next listener or message.
#[derive(Debug, Error)]
pub enum Fault {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("listener for {kind:?} failed: {source:#}")]
    Listener {
        kind: EventKind,
        #[source]
        source: anyhow::Error,
    },
    #[error("listener for {kind:?} panicked: {message}")]
    ListenerPanic { kind: EventKind, message: String },
    #[error("session round count changed ({previous_rounds} -> {current_rounds}), skipping peer diff")]
    DiffInconsistency {
        previous_rounds: usize,
        current_rounds: usize,
    },
    #[error("last round changed its slot count ({previous_slots} -> {current_slots}), extra slots not diffed")]
    SlotCountMismatch {
        previous_slots: usize,
        current_slots: usize,
    },
}

impl Fault {
    pub fn log(&self) {
        match self {
            Fault::Decode(e) => {
                log::error!("{e}");
                log::debug!("raw payload of {:?}: {}", e.kind, e.raw);
            }
            Fault::Listener { .. } | Fault::ListenerPanic { .. } => log::error!("{self}"),
            Fault::DiffInconsistency { .. } | Fault::SlotCountMismatch { .. } => log::debug!("{self}"),
        }
    }
}
