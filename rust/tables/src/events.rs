use crate::manager::TableId;
use cardroom_engine::session::SessionEvent;
use cardroom_engine::variant::Variant;
use cardroom_engine::view::TableSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

// Bounded so a stalled subscriber cannot grow memory without limit; once its
// buffer is full it is dropped from the table.
const EVENT_CHANNEL_BUFFER: usize = 1000;

pub type EventSender = mpsc::Sender<TableUpdate>;
pub type EventReceiver = mpsc::Receiver<TableUpdate>;

/// What happened on a table, as seen by a spectator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableEvent {
    TableCreated { variant: Variant },
    PlayerJoined { seat: usize, identity: String },
    /// Something the session itself reported.
    Session(SessionEvent),
    TableClosed { reason: String },
}

/// One broadcast message: the event plus the spectator snapshot after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableUpdate {
    pub table_id: TableId,
    pub event: TableEvent,
    pub snapshot: Option<TableSnapshot>,
}

pub struct EventSubscription {
    bus: EventBus,
    table_id: TableId,
    subscriber_id: usize,
    pub receiver: EventReceiver,
}

impl EventSubscription {
    pub fn receiver(&mut self) -> &mut EventReceiver {
        &mut self.receiver
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.table_id, self.subscriber_id);
    }
}

/// Per-table fan-out of [`TableUpdate`]s.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

#[derive(Debug, Default)]
struct EventBusInner {
    subscribers: RwLock<HashMap<TableId, Vec<(usize, EventSender)>>>,
    next_id: AtomicUsize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, table_id: TableId) -> EventSubscription {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_BUFFER);
        let id = self.inner.next_id.fetch_add(1, Ordering::AcqRel);
        {
            let mut guard = match self.inner.subscribers.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.entry(table_id.clone()).or_default().push((id, tx));
        }

        tracing::info!(table_id = %table_id, subscriber_id = id, "subscribed to table updates");

        EventSubscription {
            bus: self.clone(),
            table_id,
            subscriber_id: id,
            receiver: rx,
        }
    }

    pub fn broadcast(&self, table_id: &TableId, update: TableUpdate) {
        tracing::debug!(table_id = %table_id, event = ?update.event, "broadcasting table update");

        let subscribers = {
            let guard = match self.inner.subscribers.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.get(table_id).cloned()
        };

        let Some(list) = subscribers else {
            tracing::trace!(table_id = %table_id, "no subscribers for table");
            return;
        };

        let mut failed = Vec::new();
        for (id, sender) in list {
            if let Err(e) = sender.try_send(update.clone()) {
                tracing::warn!(
                    table_id = %table_id,
                    subscriber_id = id,
                    error = ?e,
                    "dropping subscriber"
                );
                failed.push(id);
            }
        }
        if !failed.is_empty() {
            self.remove_subscribers(table_id, &failed);
        }
    }

    pub fn unsubscribe(&self, table_id: &TableId, subscriber_id: usize) {
        self.remove_subscribers(table_id, &[subscriber_id]);
    }

    /// Forgets every subscriber of a table; their receivers see the channel close.
    pub fn drop_table(&self, table_id: &TableId) {
        let mut guard = match self.inner.subscribers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.remove(table_id);
    }

    pub fn subscriber_count(&self) -> usize {
        let guard = match self.inner.subscribers.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.values().map(Vec::len).sum()
    }

    fn remove_subscribers(&self, table_id: &TableId, ids: &[usize]) {
        let mut guard = match self.inner.subscribers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(list) = guard.get_mut(table_id) {
            list.retain(|(id, _)| !ids.contains(id));
            if list.is_empty() {
                guard.remove(table_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed(id: &str) -> TableUpdate {
        TableUpdate {
            table_id: id.to_string(),
            event: TableEvent::TableClosed {
                reason: "test".into(),
            },
            snapshot: None,
        }
    }

    #[test]
    fn broadcast_reaches_only_that_table() {
        let bus = EventBus::new();
        let mut a = bus.subscribe("a".into());
        let mut b = bus.subscribe("b".into());

        bus.broadcast(&"a".to_string(), closed("a"));

        let got = a.receiver().try_recv().expect("update for a");
        assert_eq!(got.table_id, "a");
        assert!(b.receiver().try_recv().is_err());
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let bus = EventBus::new();
        let sub = bus.subscribe("t".into());
        assert_eq!(bus.subscriber_count(), 1);
        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn closed_receiver_is_removed_on_broadcast() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe("t".into());
        sub.receiver().close();

        bus.broadcast(&"t".to_string(), closed("t"));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn full_buffer_drops_the_slow_subscriber() {
        let bus = EventBus::new();
        let _slow = bus.subscribe("t".into());
        for _ in 0..=EVENT_CHANNEL_BUFFER {
            bus.broadcast(&"t".to_string(), closed("t"));
        }
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn updates_serialize_with_type_tags() {
        let update = TableUpdate {
            table_id: "t".into(),
            event: TableEvent::PlayerJoined {
                seat: 2,
                identity: "ann".into(),
            },
            snapshot: None,
        };
        let json = serde_json::to_value(&update).expect("serialize");
        assert_eq!(json["event"]["type"], "player_joined");
        assert_eq!(json["event"]["seat"], 2);
    }
}
