use crate::frame::Frame;

/// The two traced lifecycle categories: dataset load transitions and
/// draw cycles.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventKind {
    Load,
    Draw,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Load => write!(f, "load"),
            EventKind::Draw => write!(f, "draw"),
        }
    }
}

/// Minimal event type for traceability.
///
/// The viewer has no external logging framework in its core crates; load
/// transitions and draw cycles are recorded here and surfaced by the app
/// shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub kind: EventKind,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, frame: Frame, kind: EventKind, message: impl Into<String>) {
        self.events.push(Event {
            frame_index: frame.index,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::{EventBus, EventKind};
    use crate::frame::Frame;

    #[test]
    fn records_events_with_frame_index() {
        let mut bus = EventBus::new();
        bus.emit(Frame::new(2), EventKind::Load, "success: 2 collections");
        assert_eq!(bus.events().len(), 1);
        assert_eq!(bus.events()[0].frame_index, 2);
        assert_eq!(bus.events()[0].kind, EventKind::Load);
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(Frame::new(0), EventKind::Draw, "42 commands");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.events().is_empty());
    }

    #[test]
    fn kinds_render_as_lowercase_labels() {
        assert_eq!(EventKind::Load.to_string(), "load");
        assert_eq!(EventKind::Draw.to_string(), "draw");
    }
}
