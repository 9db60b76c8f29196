//! Pager change notifications.
//!
//! The externally observable pager state (selected page, auto-scroll flags)
//! is published through an [`EventBus`]. Listeners run synchronously, on the
//! thread that caused the change, right after the state has been committed.
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use parking_lot::RwLock;

use crate::settings::Animation;

/// Source of a selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeOrigin {
    /// The application or the auto-scroller requested the change.
    Update,
    /// The pager content settled on a new page after a gesture or a tap.
    Content,
}

/// A change of externally observable pager state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PagerEvent {
    /// The selected real index changed.
    SelectionChanged {
        /// New selected real index.
        index: usize,
        /// Animation the change should be rendered with.
        animation: Option<Animation>,
        /// What triggered the change.
        origin: ChangeOrigin,
    },
    /// Auto-scroll was enabled or disabled.
    AutoScrollEnabledChanged(bool),
    /// The auto-scroll timer started or stopped.
    AutoScrollRunningChanged(bool),
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&PagerEvent) + Send + Sync>;

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Shared registry of event listeners.
///
/// Cloning the bus yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct EventBus {
    listeners: Arc<RwLock<Vec<(SubscriptionId, Listener)>>>,
}

impl EventBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for every future event.
    pub fn subscribe(
        &self,
        listener: impl Fn(&PagerEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    /// Delivers `event` to every listener, in subscription order.
    pub fn emit(&self, event: PagerEvent) {
        // Snapshot so listeners may (un)subscribe while being notified.
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    #[test]
    fn test_listeners_receive_events_in_order() {
        let bus = EventBus::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&received);
        bus.subscribe(move |event| first.lock().push((1, *event)));
        let second = Arc::clone(&received);
        bus.subscribe(move |event| second.lock().push((2, *event)));

        bus.emit(PagerEvent::AutoScrollRunningChanged(true));
        let received = received.lock();
        assert_eq!(
            *received,
            vec![
                (1, PagerEvent::AutoScrollRunningChanged(true)),
                (2, PagerEvent::AutoScrollRunningChanged(true)),
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);
        let id = bus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        bus.emit(PagerEvent::AutoScrollEnabledChanged(true));
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(PagerEvent::AutoScrollEnabledChanged(false));

        assert_eq!(count.load(Ordering::Relaxed), 1);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_clones_share_listeners() {
        let bus = EventBus::new();
        let handle = bus.clone();
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);
        handle.subscribe(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        bus.emit(PagerEvent::AutoScrollRunningChanged(false));
        assert_eq!(count.load(Ordering::Relaxed), 1);
        assert_eq!(bus.len(), 1);
    }

    #[test]
    fn test_listener_may_subscribe_while_notified() {
        let bus = EventBus::new();
        let inner = bus.clone();
        bus.subscribe(move |_| {
            inner.subscribe(|_| {});
        });
        bus.emit(PagerEvent::AutoScrollRunningChanged(true));
        assert_eq!(bus.len(), 2);
    }
}
