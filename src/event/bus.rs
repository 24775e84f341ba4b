use super::{AnnotatorEvent, EventHandler};
use parking_lot::Mutex;

/// A simple event bus for broadcasting annotator events to registered handlers
pub struct EventBus {
    handlers: Mutex<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.lock().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.lock().push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.lock().len()
    }

    /// Emit an event to all registered handlers.
    ///
    /// The handler list is taken out of the lock while it runs, so a handler
    /// may subscribe others. Those start with the next event.
    pub fn emit(&self, event: AnnotatorEvent) {
        log::trace!("emit {event:?}");
        let mut running = std::mem::take(&mut *self.handlers.lock());
        for handler in running.iter_mut() {
            handler.handle_event(&event);
        }
        let mut handlers = self.handlers.lock();
        let added = std::mem::replace(&mut *handlers, running);
        handlers.extend(added);
    }
}
