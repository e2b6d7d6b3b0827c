use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use super::{Event, EventKind, Fault};

pub type Listener = Box<dyn FnMut(&Event) -> anyhow::Result<()> + Send>;

/// Opaque handle returned by [`LeagueEvents::on`](super::LeagueEvents::on), used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId {
    kind: EventKind,
    id: u64,
}

impl ListenerId {
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    by_kind: HashMap<EventKind, Vec<(u64, Listener)>>,
}

impl Listeners {
    pub fn add(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
        self.next_id += 1;
        self.by_kind.entry(kind).or_default().push((self.next_id, listener));
        ListenerId { kind, id: self.next_id }
    }

    pub fn remove(&mut self, listener_id: ListenerId) -> bool {
        let Some(listeners) = self.by_kind.get_mut(&listener_id.kind) else { return false };
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != listener_id.id);
        listeners.len() != before
    }

    pub fn has_listeners(&self, kind: EventKind) -> bool {
        self.by_kind.get(&kind).is_some_and(|listeners| !listeners.is_empty())
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// Call every listener of the event's kind in registration order.
    /// A failing or panicking listener doesn't keep the remaining ones from running.
    pub fn dispatch(&mut self, event: &Event) -> Vec<Fault> {
        let kind = event.kind();
        let Some(listeners) = self.by_kind.get_mut(&kind) else { return vec![] };

        let mut faults = Vec::new();
        for (_, listener) in listeners.iter_mut() {
            match catch_unwind(AssertUnwindSafe(|| listener(event))) {
                Ok(Ok(())) => {}
                Ok(Err(source)) => faults.push(Fault::Listener { kind, source }),
                Err(panic) => {
                    let message = panic
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| panic.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic payload".into());
                    faults.push(Fault::ListenerPanic { kind, message });
                }
            }
        }

        faults
    }
}
