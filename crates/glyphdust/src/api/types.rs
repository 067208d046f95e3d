use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Animation phase of the whole swarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationState {
    /// Drifting cloud, waiting for the start trigger.
    #[default]
    Random,
    /// Timed transition from the cloud into the glyph.
    Forming,
    /// Spring physics around the glyph, reacting to the pointer.
    Formed,
}

impl AnimationState {
    /// Numeric code written into the shared header (0, 1, 2).
    pub fn code(self) -> u32 {
        match self {
            AnimationState::Random => 0,
            AnimationState::Forming => 1,
            AnimationState::Formed => 2,
        }
    }
}

/// Pointer as seen by the formed-state physics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    /// `None` when the pointer left the canvas or the touch ended.
    pub position: Option<Vec2>,
    /// Repulsion radius in pixels.
    pub radius: f32,
}

impl PointerState {
    pub fn absent(radius: f32) -> Self {
        Self { position: None, radius }
    }

    pub fn at(position: Vec2, radius: f32) -> Self {
        Self { position: Some(position), radius }
    }
}

/// Notifications for the UI layer around the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiSignal {
    /// Formation began; hide the start control.
    HideStart,
    /// The swarm was reset to `Random`; show the start control again.
    ShowStart,
}

impl UiSignal {
    /// Numeric code handed to the host (1, 2).
    pub fn code(self) -> u8 {
        match self {
            UiSignal::HideStart => 1,
            UiSignal::ShowStart => 2,
        }
    }
}
