//! Typed publish/subscribe with one deferred drain per frame.
//!
//! Every event type gets its own channel: a queue plus the handlers
//! subscribed to it. Channels keep the order in which their type was first
//! seen, and [`EventBus::process_events`] walks them in that order.
//!
//! Handlers cannot reach the bus directly. They get a [`Publisher`] whose
//! events are queued after the drain finishes, so anything published while
//! draining waits for the next frame.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Debug;
use std::mem;

use log::trace;

/// Anything that can travel over the bus.
pub trait Event: Clone + Debug + 'static {}

impl<T: Clone + Debug + 'static> Event for T {}

type Handler<E> = Box<dyn FnMut(&E, &mut Publisher)>;

struct Channel<E: Event> {
    queue: Vec<E>,
    handlers: Vec<Handler<E>>,
}

impl<E: Event> Channel<E> {
    fn new() -> Self {
        Self {
            queue: Vec::new(),
            handlers: Vec::new(),
        }
    }
}

/// Object-safe face of a `Channel<E>`.
trait ErasedChannel {
    fn dispatch(&mut self, publisher: &mut Publisher) -> usize;
    fn queued(&self) -> usize;
    fn clear(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<E: Event> ErasedChannel for Channel<E> {
    fn dispatch(&mut self, publisher: &mut Publisher) -> usize {
        let queue = mem::take(&mut self.queue);
        let delivered = queue.len();
        for event in &queue {
            for handler in &mut self.handlers {
                handler(event, publisher);
            }
        }
        delivered
    }

    fn queued(&self) -> usize {
        self.queue.len()
    }

    fn clear(&mut self) {
        self.queue.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// An event waiting to be handed back to the bus.
trait PendingEvent {
    fn deliver(self: Box<Self>, bus: &mut EventBus);
}

impl<E: Event> PendingEvent for E {
    fn deliver(self: Box<Self>, bus: &mut EventBus) {
        bus.publish(*self);
    }
}

/// Publishing handle given to handlers during a drain.
#[derive(Default)]
pub struct Publisher {
    pending: Vec<Box<dyn PendingEvent>>,
}

impl Publisher {
    pub fn publish<E: Event>(&mut self, event: E) {
        self.pending.push(Box::new(event));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Generic event bus. One instance per simulation.
#[derive(Default)]
pub struct EventBus {
    index: HashMap<TypeId, usize>,
    channels: Vec<Box<dyn ErasedChannel>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` for the next `process_events`.
    pub fn publish<E: Event>(&mut self, event: E) {
        self.channel_mut::<E>().queue.push(event);
    }

    /// Register a handler for `E`. Handlers run in subscription order.
    pub fn subscribe<E, F>(&mut self, handler: F)
    where
        E: Event,
        F: FnMut(&E, &mut Publisher) + 'static,
    {
        self.channel_mut::<E>().handlers.push(Box::new(handler));
    }

    /// Drain every queue once, in channel order. Events published by
    /// handlers are queued for the next call. Returns how many queued
    /// events were drained.
    pub fn process_events(&mut self) -> usize {
        let mut publisher = Publisher::default();
        let mut delivered = 0;
        for channel in &mut self.channels {
            delivered += channel.dispatch(&mut publisher);
        }
        let deferred = publisher.pending.len();
        for event in publisher.pending {
            event.deliver(self);
        }
        if delivered > 0 || deferred > 0 {
            trace!("event bus delivered {delivered}, deferred {deferred}");
        }
        delivered
    }

    /// Events of type `E` waiting for the next drain.
    pub fn pending<E: Event>(&self) -> &[E] {
        self.channel::<E>()
            .map(|c| c.queue.as_slice())
            .unwrap_or(&[])
    }

    /// Total events waiting across every channel.
    pub fn pending_count(&self) -> usize {
        self.channels.iter().map(|c| c.queued()).sum()
    }

    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.channel::<E>().map_or(0, |c| c.handlers.len())
    }

    /// Drop every queued event. Subscriptions stay.
    pub fn clear(&mut self) {
        for channel in &mut self.channels {
            channel.clear();
        }
    }

    fn channel<E: Event>(&self) -> Option<&Channel<E>> {
        let &slot = self.index.get(&TypeId::of::<E>())?;
        self.channels[slot].as_any().downcast_ref::<Channel<E>>()
    }

    fn channel_mut<E: Event>(&mut self) -> &mut Channel<E> {
        let slot = match self.index.get(&TypeId::of::<E>()) {
            Some(&slot) => slot,
            None => {
                let slot = self.channels.len();
                self.channels.push(Box::new(Channel::<E>::new()));
                self.index.insert(TypeId::of::<E>(), slot);
                slot
            }
        };
        match self.channels[slot].as_any_mut().downcast_mut::<Channel<E>>() {
            Some(channel) => channel,
            None => unreachable!("channel slot registered under a different type"),
        }
    }
}
