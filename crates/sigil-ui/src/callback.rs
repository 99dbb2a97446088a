//! Widget-to-application notifications.
//!
//! Widgets emit [`Callback`]s while handling events. By default callbacks
//! accumulate in a FIFO [`CallbackQueue`] drained by the application each
//! frame. Alternatively, the application registers handlers in a
//! [`HandlerList`]; while at least one handler exists, new callbacks
//! bypass the queue and are delivered synchronously instead.

use std::collections::VecDeque;

use crate::widget::WidgetId;

/// What happened on the widget.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Signal {
    Pressed,
    Released,
    Clicked,
    DoubleClicked,
    Focused,
    Unfocused,
}

/// A single widget notification.
///
/// `source` identifies the emitting widget; `id` is the application-assigned
/// callback id the widget was configured with (0 when unset).
#[derive(Debug, Clone, PartialEq)]
pub struct Callback {
    pub source: WidgetId,
    pub id: u32,
    pub signal: Signal,
    /// Text attached by the widget, e.g. a label's string.
    pub text: Option<String>,
    /// Scene position the interaction happened at, when applicable.
    pub position: Option<(i32, i32)>,
}

/// FIFO callback buffer.
#[derive(Debug, Default)]
pub struct CallbackQueue {
    queue: VecDeque<Callback>,
}

impl CallbackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cb: Callback) {
        self.queue.push_back(cb);
    }

    /// Removes and returns the oldest callback; `None` when empty.
    /// Never blocks.
    pub fn poll(&mut self) -> Option<Callback> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Ordered synchronous callback handlers.
///
/// While non-empty, every new callback is delivered to each handler in
/// registration order, exactly once, by reference. Registration is never
/// retroactive: callbacks already sitting in the queue stay there.
#[derive(Default)]
pub struct HandlerList {
    handlers: Vec<Box<dyn FnMut(&Callback)>>,
}

impl HandlerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, handler: F)
    where
        F: FnMut(&Callback) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Delivers `cb` to every handler in registration order.
    pub fn deliver(&mut self, cb: &Callback) {
        for handler in &mut self.handlers {
            handler(cb);
        }
    }
}

impl std::fmt::Debug for HandlerList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerList")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn cb(id: u32) -> Callback {
        Callback {
            source: WidgetId::new(),
            id,
            signal: Signal::Clicked,
            text: None,
            position: None,
        }
    }

    // ── queue ─────────────────────────────────────────────────────────────

    #[test]
    fn queue_is_fifo() {
        let mut q = CallbackQueue::new();
        q.push(cb(1));
        q.push(cb(2));
        q.push(cb(3));

        assert_eq!(q.poll().map(|c| c.id), Some(1));
        assert_eq!(q.poll().map(|c| c.id), Some(2));
        assert_eq!(q.poll().map(|c| c.id), Some(3));
        assert_eq!(q.poll(), None);
    }

    #[test]
    fn poll_on_empty_queue_returns_none() {
        let mut q = CallbackQueue::new();
        assert_eq!(q.poll(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn len_tracks_pushes_and_polls() {
        let mut q = CallbackQueue::new();
        for i in 0..5 {
            q.push(cb(i));
        }
        assert_eq!(q.len(), 5);

        q.poll();
        q.poll();
        assert_eq!(q.len(), 3);
    }

    // ── handlers ──────────────────────────────────────────────────────────

    #[test]
    fn handlers_run_in_registration_order_exactly_once() {
        let seen: Rc<RefCell<Vec<(u32, u32)>>> = Rc::new(RefCell::new(Vec::new()));

        let mut handlers = HandlerList::new();
        for handler_idx in 0..3u32 {
            let seen = Rc::clone(&seen);
            handlers.register(move |c| seen.borrow_mut().push((handler_idx, c.id)));
        }

        handlers.deliver(&cb(7));

        assert_eq!(&*seen.borrow(), &[(0, 7), (1, 7), (2, 7)]);
    }
}
