use crate::api::error::SwarmError;
use crate::api::swarm::Swarm;
use crate::api::types::UiSignal;
use crate::api::config::SwarmConfig;
use crate::bridge::protocol::{self, FrameHeader, ProtocolLayout, HEADER_CAPTION_OPACITY};
use crate::core::time::FrameGate;
use crate::glyph::GlyphRasterizer;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::instance::DotBuffer;
use crate::renderer::traits::Painter;
use crate::systems::render::build_dot_buffer;

/// Drives a [`Swarm`] from a host frame callback.
///
/// Owns the swarm, the frame gate, pending input and the per-frame
/// output buffers. Hosts push input at any time; it is applied in order
/// at the top of the next [`frame`](Self::frame) call, using that call's
/// timestamp.
pub struct FrameScheduler<R: GlyphRasterizer> {
    swarm: Swarm<R>,
    gate: FrameGate,
    input: InputQueue,
    dots: DotBuffer,
    layout: ProtocolLayout,
    /// Header plus dots, rewritten after every accepted frame.
    frame_buf: Vec<f32>,
    frame_counter: u32,
    last_now: f64,
    /// UI signals raised since the previous publish.
    signals: Vec<UiSignal>,
}

impl<R: GlyphRasterizer> FrameScheduler<R> {
    pub fn new(config: SwarmConfig, rasterizer: R) -> Self {
        let gate = FrameGate::new(config.target_fps);
        let layout = ProtocolLayout::from_config(&config);
        let dots = DotBuffer::with_capacity(config.target_particles);
        let frame_buf = vec![0.0; layout.buffer_total_floats];
        Self {
            swarm: Swarm::new(config, rasterizer),
            gate,
            input: InputQueue::new(),
            dots,
            layout,
            frame_buf,
            frame_counter: 0,
            last_now: 0.0,
            signals: Vec::new(),
        }
    }

    /// Build the first particle set. The header is written either way so
    /// hosts can read readiness before the first frame.
    pub fn init(&mut self, width: f32, height: f32) -> Result<usize, SwarmError> {
        self.gate.reset();
        let result = self.swarm.init(width, height);
        if let Err(err) = &result {
            log::warn!("init deferred until a valid resize: {}", err);
        }
        self.publish();
        result
    }

    /// Queue an input event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// One host frame callback at `now` (ms).
    ///
    /// Pending input is always applied. The swarm is only advanced and
    /// drawn when the frame gate accepts; returns whether it did.
    pub fn frame<P: Painter + ?Sized>(&mut self, now: f64, painter: &mut P) -> bool {
        for event in self.input.drain() {
            self.apply(event, now);
        }

        if !self.gate.accept(now) {
            return false;
        }
        self.last_now = now;

        self.swarm.tick(now);
        self.swarm.draw(painter, now);
        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.publish();
        true
    }

    fn apply(&mut self, event: InputEvent, now: f64) {
        match event {
            InputEvent::PointerMove { x, y } => self.swarm.pointer_move(x, y),
            InputEvent::PointerLeave => self.swarm.pointer_leave(),
            InputEvent::Start => {
                self.swarm.start(now);
            }
            InputEvent::Resize { width, height } => {
                if let Err(err) = self.swarm.resize(width, height, now) {
                    log::warn!("resize to {}x{} ignored: {}", width, height, err);
                }
            }
        }
    }

    /// Rebuild the dot buffer and rewrite the shared frame buffer.
    fn publish(&mut self) {
        self.signals = self.swarm.take_signals();
        if self.swarm.is_ready() {
            build_dot_buffer(self.swarm.store(), &mut self.dots);
        } else {
            self.dots.clear();
        }
        let canvas = self.swarm.canvas_size();
        let header = FrameHeader {
            frame_counter: self.frame_counter,
            state: self.swarm.state(),
            dot_count: self.dots.instance_count(),
            caption_opacity: self.swarm.caption_opacity(self.last_now),
            start_visible: self.swarm.start_visible(),
            canvas_width: canvas.x,
            canvas_height: canvas.y,
            ready: self.swarm.is_ready(),
        };
        protocol::write_frame(&self.layout, &header, self.dots.instances(), &mut self.frame_buf);
    }

    pub fn swarm(&self) -> &Swarm<R> {
        &self.swarm
    }

    pub fn swarm_mut(&mut self) -> &mut Swarm<R> {
        &mut self.swarm
    }

    /// UI signals published with the last accepted frame (or init), oldest first.
    pub fn signals(&self) -> &[UiSignal] {
        &self.signals
    }

    pub fn dots(&self) -> &DotBuffer {
        &self.dots
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    /// Caption opacity as of the last accepted frame.
    pub fn caption_opacity(&self) -> f32 {
        self.frame_buf[HEADER_CAPTION_OPACITY]
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn dots_ptr(&self) -> *const f32 {
        self.dots.instances_ptr()
    }

    pub fn dot_count(&self) -> u32 {
        self.dots.instance_count()
    }

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame_buf.as_ptr()
    }

    pub fn frame_floats(&self) -> u32 {
        self.frame_buf.len() as u32
    }

    pub fn frame_buffer(&self) -> &[f32] {
        &self.frame_buf
    }
}
