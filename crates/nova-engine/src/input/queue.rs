/// Input event types the engine understands.
/// Pointer coordinates are CSS pixels relative to the canvas, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A click/touch began.
    PointerDown { x: f32, y: f32 },
    /// A click/touch ended.
    PointerUp { x: f32, y: f32 },
    /// The pointer moved.
    PointerMove { x: f32, y: f32 },
    /// The canvas changed size.
    Resize { width: f32, height: f32 },
    /// A custom event from the HTML overlay (buttons, close icons).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// The host pushes events as they arrive; the game drains them on the next fixed step.
#[derive(Debug)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_arrival_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::Resize { width: 800.0, height: 600.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events[0], InputEvent::PointerDown { x: 10.0, y: 20.0 });
        assert_eq!(events[1], InputEvent::Resize { width: 800.0, height: 600.0 });
        assert!(q.is_empty());
    }

    #[test]
    fn custom_event() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 2, a: 1.5, b: 0.0, c: 0.0 });
        match q.drain()[0] {
            InputEvent::Custom { kind, a, .. } => {
                assert_eq!(kind, 2);
                assert_eq!(a, 1.5);
            }
            _ => panic!("Expected Custom event"),
        }
    }
}
