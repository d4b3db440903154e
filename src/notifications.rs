//! Process-wide fan-out of order events to connected viewers.
//!
//! The hub owns the set of active subscriber handles; the wire transport that
//! drains each receiver is a separate concern. Broadcast is best-effort: a
//! dead subscriber is pruned and logged, and never fails the caller.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use crate::domain::order::OrderEvent;
use crate::domain::ports::OrderNotifier;

pub type SubscriberId = u64;

struct HubState {
    subscribers: HashMap<SubscriberId, mpsc::UnboundedSender<String>>,
    closed: bool,
}

pub struct NotificationHub {
    state: Mutex<HubState>,
    next_id: AtomicU64,
}

impl NotificationHub {
    pub fn start() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(HubState {
                subscribers: HashMap::new(),
                closed: false,
            }),
            next_id: AtomicU64::new(1),
        })
    }

    fn state(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new subscriber. Returns `None` once the hub is stopped.
    pub fn subscribe(&self) -> Option<(SubscriberId, mpsc::UnboundedReceiver<String>)> {
        let mut state = self.state();
        if state.closed {
            return None;
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        state.subscribers.insert(id, tx);
        log::info!("notification subscriber {} connected", id);
        Some((id, rx))
    }

    pub fn unsubscribe(&self, id: SubscriberId) {
        if self.state().subscribers.remove(&id).is_some() {
            log::info!("notification subscriber {} disconnected", id);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.state().subscribers.len()
    }

    /// Push one event to every connected subscriber.
    pub fn broadcast(&self, event: &OrderEvent) {
        let payload = match serde_json::to_string(event) {
            Ok(p) => p,
            Err(e) => {
                log::error!("failed to serialize order event: {}", e);
                return;
            }
        };

        // Send outside the lock over a snapshot of the set, so a subscriber
        // connecting or disconnecting mid-broadcast is tolerated.
        let snapshot: Vec<(SubscriberId, mpsc::UnboundedSender<String>)> = {
            let state = self.state();
            if state.closed {
                return;
            }
            state
                .subscribers
                .iter()
                .map(|(id, tx)| (*id, tx.clone()))
                .collect()
        };

        let mut dead = Vec::new();
        for (id, tx) in snapshot {
            if tx.send(payload.clone()).is_err() {
                dead.push(id);
            }
        }

        if !dead.is_empty() {
            let mut state = self.state();
            for id in dead {
                if state.subscribers.remove(&id).is_some() {
                    log::warn!("dropping unreachable notification subscriber {}", id);
                }
            }
        }
    }

    /// Stop the hub: drop all subscriber handles and refuse new ones.
    pub fn stop(&self) {
        let mut state = self.state();
        state.closed = true;
        state.subscribers.clear();
    }
}

impl OrderNotifier for NotificationHub {
    fn push(&self, event: &OrderEvent) {
        self.broadcast(event);
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::order::{DeliveryMethod, OrderView};
    use crate::domain::status::OrderStatus;

    fn sample_order() -> OrderView {
        OrderView {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            total: BigDecimal::from_str("20.00").unwrap(),
            delivery_method: DeliveryMethod::Pickup,
            delivery_address: None,
            delivery_fee: BigDecimal::from(0),
            coupon_id: None,
            status: OrderStatus::AwaitingConfirmation,
            products: vec![],
            fruits: vec![],
            toppings: vec![],
            size: None,
            cream: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn broadcast_reaches_every_subscriber() {
        let hub = NotificationHub::start();
        let (_a, mut rx_a) = hub.subscribe().unwrap();
        let (_b, mut rx_b) = hub.subscribe().unwrap();

        hub.broadcast(&OrderEvent::NewOrder(sample_order()));

        let msg_a = rx_a.try_recv().expect("subscriber a should receive");
        let msg_b = rx_b.try_recv().expect("subscriber b should receive");
        assert!(msg_a.contains("\"type\":\"new_order\""));
        assert_eq!(msg_a, msg_b);
    }

    #[test]
    fn status_updates_are_tagged() {
        let hub = NotificationHub::start();
        let (_id, mut rx) = hub.subscribe().unwrap();

        hub.broadcast(&OrderEvent::StatusUpdate(sample_order()));

        let msg = rx.try_recv().expect("should receive");
        assert!(msg.contains("\"type\":\"status_update\""));
    }

    #[test]
    fn dropped_receiver_is_pruned_without_affecting_others() {
        let hub = NotificationHub::start();
        let (_dead, rx_dead) = hub.subscribe().unwrap();
        let (_live, mut rx_live) = hub.subscribe().unwrap();
        drop(rx_dead);

        hub.broadcast(&OrderEvent::NewOrder(sample_order()));

        assert!(rx_live.try_recv().is_ok());
        assert_eq!(hub.subscriber_count(), 1);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let hub = NotificationHub::start();
        let (id, mut rx) = hub.subscribe().unwrap();
        hub.unsubscribe(id);

        hub.broadcast(&OrderEvent::NewOrder(sample_order()));

        assert!(rx.try_recv().is_err());
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn stopped_hub_refuses_subscribers_and_swallows_broadcasts() {
        let hub = NotificationHub::start();
        let (_id, _rx) = hub.subscribe().unwrap();
        hub.stop();

        assert!(hub.subscribe().is_none());
        assert_eq!(hub.subscriber_count(), 0);
        // Broadcast after stop is a silent no-op.
        hub.broadcast(&OrderEvent::NewOrder(sample_order()));
    }
}
