mod bus;
mod events;

pub use bus::EventBus;
pub use events::AnnotatorEvent;

/// Receives every event the annotator emits, in emission order.
pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &AnnotatorEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&AnnotatorEvent) + Send,
{
    fn handle_event(&mut self, event: &AnnotatorEvent) {
        self(event)
    }
}
