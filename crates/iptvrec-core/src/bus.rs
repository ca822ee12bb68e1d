use std::collections::VecDeque;

use crate::event::Event;

/// Queue between the window's event sources and its handler.
///
/// Key presses and terminal resizes come from input polling. `TimerFired`
/// comes from due scheduler registrations. Handling a key can queue a
/// follow-up such as an `Action` or `StartClock`, and that follow-up is
/// popped in the same pass, after everything already waiting.
#[derive(Default)]
pub struct EventBus {
    queue: VecDeque<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Take the oldest queued event.
    pub fn pop(&mut self) -> Option<Event> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
