use glam::Vec2;

use crate::api::config::{ResizePolicy, SwarmConfig};
use crate::api::error::SwarmError;
use crate::api::types::{AnimationState, PointerState, UiSignal};
use crate::core::choreography::Choreography;
use crate::core::rng::Rng;
use crate::core::store::{ParticleLook, ParticleStore};
use crate::glyph::{rasterize_text, GlyphRasterizer};
use crate::renderer::traits::{CaptionDraw, Painter};
use crate::systems::motion::{self, Dynamics};
use crate::systems::render::paint_particles;
use crate::systems::sampler::sample_points;

/// Background color behind the swarm.
pub const BACKGROUND: [u8; 3] = [0, 0, 0];

/// The whole simulation: particles, formation clock, pointer and UI state.
///
/// Owned by the frame scheduler and driven through explicit calls;
/// nothing here is shared or global.
pub struct Swarm<R: GlyphRasterizer> {
    config: SwarmConfig,
    rasterizer: R,
    store: ParticleStore,
    choreography: Choreography,
    pointer: PointerState,
    rng: Rng,
    canvas: Vec2,
    ready: bool,
    start_visible: bool,
    signals: Vec<UiSignal>,
    dynamics: Dynamics,
    look: ParticleLook,
}

impl<R: GlyphRasterizer> Swarm<R> {
    pub fn new(config: SwarmConfig, rasterizer: R) -> Self {
        let choreography = Choreography::new(config.formation_duration_ms, config.formation_easing);
        Self {
            pointer: PointerState::absent(config.pointer_radius),
            rng: Rng::new(config.seed),
            dynamics: config.dynamics(),
            look: config.look(),
            store: ParticleStore::new(),
            choreography,
            rasterizer,
            config,
            canvas: Vec2::ZERO,
            ready: false,
            start_visible: true,
            signals: Vec::new(),
        }
    }

    /// Build the first particle set for a `width` x `height` canvas.
    ///
    /// On failure the swarm stays not ready: frames only clear the
    /// background until a later [`resize`](Self::resize) succeeds.
    pub fn init(&mut self, width: f32, height: f32) -> Result<usize, SwarmError> {
        self.ready = false;
        self.choreography.reset();
        self.start_visible = true;
        let count = self.rebuild(width, height)?;
        self.ready = true;
        log::info!("swarm ready: {} particles on {}x{}", count, width, height);
        Ok(count)
    }

    /// Rebuild for a new canvas size, then apply the configured resize policy.
    ///
    /// A failed rebuild changes nothing: the previous particles, state
    /// and canvas size are kept.
    pub fn resize(&mut self, width: f32, height: f32, now: f64) -> Result<usize, SwarmError> {
        let count = self.rebuild(width, height)?;
        let was_ready = self.ready;
        self.ready = true;

        match self.config.resize_policy {
            ResizePolicy::ResetToRandom => self.reset_to_random(),
            ResizePolicy::KeepState if !was_ready => self.reset_to_random(),
            ResizePolicy::KeepState => {
                // Rebuilt particles start at rest in a new cloud.
                self.choreography.restart_formation(now);
            }
        }
        log::info!(
            "resized to {}x{}: {} particles, {:?}",
            width,
            height,
            count,
            self.choreography.state()
        );
        Ok(count)
    }

    fn rebuild(&mut self, width: f32, height: f32) -> Result<usize, SwarmError> {
        let threshold = self.config.alpha_threshold;
        let mask = rasterize_text(
            &mut self.rasterizer,
            &self.config.text,
            &self.config.fit,
            threshold,
            width,
            height,
        )?;
        let homes = sample_points(&mask, threshold, self.config.target_particles, self.config.sampling);
        self.canvas = Vec2::new(width, height);
        self.store.rebuild(&homes, self.canvas, &mut self.rng, &self.look);
        log::debug!("built {} particles from {} ink pixels", homes.len(), mask.ink_count(threshold));
        Ok(homes.len())
    }

    fn reset_to_random(&mut self) {
        self.choreography.reset();
        if !self.start_visible {
            self.start_visible = true;
            self.signals.push(UiSignal::ShowStart);
        }
    }

    /// Begin the formation at `now`. Returns false (and does nothing) when
    /// the swarm is not ready or has already left `Random`.
    pub fn start(&mut self, now: f64) -> bool {
        if !self.ready {
            log::debug!("start ignored: swarm not ready");
            return false;
        }
        if !self.choreography.start(now) {
            log::debug!("start ignored in {:?}", self.choreography.state());
            return false;
        }
        self.store.snapshot_formation_start();
        self.start_visible = false;
        self.signals.push(UiSignal::HideStart);
        log::info!("formation started at {:.1}ms", now);
        true
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = PointerState::at(Vec2::new(x, y), self.config.pointer_radius);
    }

    pub fn pointer_leave(&mut self) {
        self.pointer = PointerState::absent(self.config.pointer_radius);
    }

    /// Advance every particle by one frame.
    pub fn tick(&mut self, now: f64) {
        if !self.ready {
            return;
        }
        match self.choreography.state() {
            AnimationState::Random => {
                motion::drift(&mut self.store, &mut self.rng, self.canvas, self.config.drift);
            }
            AnimationState::Forming => {
                motion::form(&mut self.store, self.choreography.eased(now));
                if self.choreography.complete_if_elapsed(now) {
                    log::info!("formation complete");
                }
            }
            AnimationState::Formed => {
                motion::settle(&mut self.store, &self.pointer, &self.dynamics);
            }
        }
    }

    /// Draw the current frame: background, one disc per particle, then the
    /// caption if one is configured and visible.
    pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P, now: f64) {
        painter.clear(BACKGROUND, self.canvas.x, self.canvas.y);
        if !self.ready {
            return;
        }
        paint_particles(&self.store, painter);

        if let Some(caption) = &self.config.caption {
            let opacity = self.caption_opacity(now);
            if opacity > 0.0 {
                let draw = CaptionDraw {
                    text: caption.text.clone(),
                    opacity,
                    glow: caption.glow,
                };
                painter.caption(&draw, self.canvas.x, self.canvas.y);
            }
        }
    }

    pub fn caption_opacity(&self, now: f64) -> f32 {
        self.choreography.caption_opacity(now)
    }

    pub fn state(&self) -> AnimationState {
        self.choreography.state()
    }

    pub fn choreography(&self) -> &Choreography {
        &self.choreography
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether the start control should be shown.
    pub fn start_visible(&self) -> bool {
        self.start_visible
    }

    /// UI notifications raised since the last call, oldest first.
    pub fn take_signals(&mut self) -> Vec<UiSignal> {
        std::mem::take(&mut self.signals)
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }
}
