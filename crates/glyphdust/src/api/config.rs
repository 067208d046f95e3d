use serde::{Deserialize, Serialize};

use crate::core::store::ParticleLook;
use crate::extensions::easing::Easing;
use crate::glyph::FitStrategy;
use crate::systems::motion::Dynamics;
use crate::systems::sampler::SamplingMode;

/// What happens to a formation in progress when the canvas is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResizePolicy {
    /// Rebuild and return to the drifting cloud. The start control reappears.
    #[default]
    ResetToRandom,
    /// Rebuild but stay in the current state: a forming swarm restarts its
    /// clock from the new cloud, a formed swarm springs in from it.
    KeepState,
}

/// Optional caption faded in over the formation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionConfig {
    pub text: String,
    /// Shadow blur radius in pixels.
    #[serde(default)]
    pub glow: f32,
}

/// Engine configuration. Every field has a default, so partial JSON works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// String rasterized into particle homes.
    pub text: String,
    /// Upper bound on the particle count.
    pub target_particles: usize,
    /// Length of the formation transition in milliseconds.
    pub formation_duration_ms: f64,
    pub formation_easing: Easing,
    /// Frame cap for the render loop.
    pub target_fps: f64,
    /// Pointer repulsion radius in pixels.
    pub pointer_radius: f32,
    pub spring: f32,
    pub repulsion: f32,
    pub friction: f32,
    /// Largest per-axis drift step in the random state.
    pub drift: f32,
    /// Base disc radius in pixels.
    pub particle_size: f32,
    /// Darkest gray a particle can get (0–255).
    pub shade_base: u8,
    /// Alpha above which a rasterized pixel counts as ink.
    pub alpha_threshold: u8,
    pub sampling: SamplingMode,
    pub fit: FitStrategy,
    pub resize_policy: ResizePolicy,
    pub caption: Option<CaptionConfig>,
    /// Seed for placement, jitter and drift.
    pub seed: u64,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            text: "Benson".to_string(),
            target_particles: 2500,
            formation_duration_ms: 1500.0,
            formation_easing: Easing::CubicOut,
            target_fps: 60.0,
            pointer_radius: 100.0,
            spring: 0.01,
            repulsion: 0.8,
            friction: 0.92,
            drift: 0.15,
            particle_size: 1.0,
            shade_base: 220,
            alpha_threshold: 128,
            sampling: SamplingMode::default(),
            fit: FitStrategy::default(),
            resize_policy: ResizePolicy::default(),
            caption: None,
            seed: 42,
        }
    }
}

impl SwarmConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn dynamics(&self) -> Dynamics {
        Dynamics {
            spring: self.spring,
            repulsion: self.repulsion,
            friction: self.friction,
        }
    }

    pub fn look(&self) -> ParticleLook {
        ParticleLook {
            base_size: self.particle_size,
            base_shade: self.shade_base,
        }
    }
}
