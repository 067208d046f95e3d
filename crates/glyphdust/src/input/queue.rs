/// Input events the engine understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer or touch moved to canvas coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// Pointer left the canvas or the touch ended.
    PointerLeave,
    /// The start control was activated.
    Start,
    /// The canvas was resized.
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// Host callbacks push events between frames; the scheduler drains them in order
/// at the top of the next frame callback.
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

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
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
