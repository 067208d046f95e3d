pub mod api;
pub mod core;
pub mod glyph;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{CaptionConfig, ResizePolicy, SwarmConfig};
pub use api::error::SwarmError;
pub use api::swarm::Swarm;
pub use api::types::{AnimationState, PointerState, UiSignal};
pub use crate::core::choreography::Choreography;
pub use crate::core::rng::Rng;
pub use crate::core::scheduler::FrameScheduler;
pub use crate::core::store::{ParticleLook, ParticleStore, ParticleView};
pub use crate::core::time::FrameGate;
pub use glyph::{AlphaMask, BitmapFontRasterizer, FitStrategy, GlyphRasterizer, TextPlacement};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::instance::{DotBuffer, DotInstance};
pub use renderer::traits::{CaptionDraw, DrawCommand, DrawList, NoopPainter, Painter};
pub use bridge::protocol::{FrameHeader, ProtocolLayout, HEADER_FLOATS, PROTOCOL_VERSION};
pub use systems::motion::Dynamics;
pub use systems::sampler::SamplingMode;
pub use extensions::{Easing, lerp_vec2};
