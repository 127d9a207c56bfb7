//! Deferred event queue between widgets and the app.
//!
//! Widgets get a cloneable `EventEmitter` and push events while they render.
//! The app drains the queue with `poll()` once per frame, after all widgets
//! have drawn, and applies the state changes. Widgets never mutate app
//! state directly.

use log::warn;
use std::any::Any;
use std::sync::{Arc, Mutex};

/// Maximum events in queue before oldest are evicted
const MAX_QUEUE_SIZE: usize = 256;

/// Marker trait for events. Blanket-implemented for every qualifying type.
pub trait Event: Any + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync + 'static> Event for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

type Queue = Arc<Mutex<Vec<BoxedEvent>>>;

/// Boxed event for queue storage
pub type BoxedEvent = Box<dyn Event>;

#[derive(Clone, Default)]
pub struct EventBus {
    queue: Queue,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit<E: Event>(&self, event: E) {
        push(&self.queue, Box::new(event));
    }

    /// Emit an already boxed event (widget dispatch closures).
    pub fn emit_boxed(&self, event: BoxedEvent) {
        push(&self.queue, event);
    }

    /// Drain all queued events in emission order.
    pub fn poll(&self) -> Vec<BoxedEvent> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Emitter handle for widgets.
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter {
            queue: Arc::clone(&self.queue),
        }
    }

    pub fn queue_len(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Lightweight emitter handle, cloned into widgets.
#[derive(Clone)]
pub struct EventEmitter {
    queue: Queue,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("queue_len", &self.queue.lock().map(|q| q.len()).unwrap_or(0))
            .finish()
    }
}

impl EventEmitter {
    pub fn emit<E: Event>(&self, event: E) {
        push(&self.queue, Box::new(event));
    }

    pub fn emit_boxed(&self, event: BoxedEvent) {
        push(&self.queue, event);
    }
}

fn push(queue: &Queue, event: BoxedEvent) {
    let mut queue = queue.lock().unwrap_or_else(|e| e.into_inner());
    if queue.len() >= MAX_QUEUE_SIZE {
        let evict_count = queue.len() / 2;
        warn!("EventBus queue full ({} events), evicting oldest {}", queue.len(), evict_count);
        queue.drain(0..evict_count);
    }
    queue.push(event);
}

/// Downcast a queued event to its concrete type.
///
/// Derefs to `dyn Event` first: calling `as_any()` on the `Box` itself would
/// hit the blanket impl for `Box<dyn Event>` and the downcast would fail.
#[inline]
pub fn downcast_event<E: Event>(event: &BoxedEvent) -> Option<&E> {
    (**event).as_any().downcast_ref::<E>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Toggle(u32);

    #[derive(Clone, Debug)]
    struct Enhance(u32);

    #[test]
    fn test_poll_preserves_order_and_drains() {
        let bus = EventBus::new();
        bus.emit(Toggle(1));
        bus.emit(Enhance(2));
        bus.emit(Toggle(3));

        let events = bus.poll();
        assert_eq!(events.len(), 3);
        assert_eq!(downcast_event::<Toggle>(&events[0]).map(|e| e.0), Some(1));
        assert_eq!(downcast_event::<Enhance>(&events[1]).map(|e| e.0), Some(2));
        assert!(downcast_event::<Enhance>(&events[2]).is_none());

        assert!(bus.poll().is_empty());
    }

    #[test]
    fn test_emitter_shares_queue() {
        let bus = EventBus::new();
        let emitter = bus.emitter();
        emitter.emit(Toggle(7));
        emitter.clone().emit(Toggle(8));

        assert_eq!(bus.queue_len(), 2);
    }

    #[test]
    fn test_boxed_and_typed_share_order() {
        let bus = EventBus::new();
        let emitter = bus.emitter();
        emitter.emit(Toggle(1));
        let boxed: BoxedEvent = Box::new(Enhance(2));
        emitter.emit_boxed(boxed);
        bus.emit(Toggle(3));

        let events = bus.poll();
        assert_eq!(events.len(), 3);
        assert_eq!(downcast_event::<Enhance>(&events[1]).map(|e| e.0), Some(2));
        assert_eq!(downcast_event::<Toggle>(&events[2]).map(|e| e.0), Some(3));
    }

    #[test]
    fn test_queue_eviction() {
        let bus = EventBus::new();
        for i in 0..(MAX_QUEUE_SIZE as u32 + 1) {
            bus.emit(Toggle(i));
        }
        let events = bus.poll();
        assert_eq!(events.len(), MAX_QUEUE_SIZE / 2 + 1);
        // Oldest half was evicted
        assert_eq!(downcast_event::<Toggle>(&events[0]).map(|e| e.0), Some(MAX_QUEUE_SIZE as u32 / 2));
    }
}
