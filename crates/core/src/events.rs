//! Notification seam between the rule engine and feedback consumers.
//!
//! `GameState` queues a [`GameEvent`] for every successful transition; whoever drives
//! the game drains the queue and hands each event to an [`EventSink`]. Sinks are
//! fire-and-forget and cannot influence the game.

use crate::types::GameEvent;

/// Receiver of game notifications (sound, haptics, logs, ...).
pub trait EventSink {
    fn notify(&mut self, event: &GameEvent);
}

/// Sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Collects events in order, mostly for tests.
impl EventSink for Vec<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        self.push(*event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn notify(&mut self, event: &GameEvent) {
        (**self).notify(event);
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F: FnMut(&GameEvent)> EventSink for FnSink<F> {
    fn notify(&mut self, event: &GameEvent) {
        (self.0)(event);
    }
}

/// Forward a batch of events to a sink, preserving order.
pub fn dispatch<S: EventSink + ?Sized>(sink: &mut S, events: impl IntoIterator<Item = GameEvent>) {
    for event in events {
        sink.notify(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_records_in_order() {
        let mut sink: Vec<GameEvent> = Vec::new();
        dispatch(&mut sink, [GameEvent::Started, GameEvent::Rotated]);
        assert_eq!(sink, vec![GameEvent::Started, GameEvent::Rotated]);
    }

    #[test]
    fn fn_sink_counts() {
        let mut count = 0;
        {
            let mut sink = FnSink(|_: &GameEvent| count += 1);
            dispatch(&mut sink, [GameEvent::HardDropped, GameEvent::Moved { dx: 1 }]);
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn boxed_sink_delegates() {
        let mut sink: Box<dyn EventSink> = Box::new(NullSink);
        sink.notify(&GameEvent::Started);
    }
}
