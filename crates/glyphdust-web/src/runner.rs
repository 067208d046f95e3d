use glyphdust::{FrameScheduler, InputEvent, NoopPainter, SwarmConfig};
use wasm_bindgen::JsValue;

use crate::canvas::{find_canvas, CanvasPainter, CanvasRasterizer};

/// Wires the frame scheduler to the browser.
///
/// Rasterizes through an offscreen canvas and, once a visible canvas is
/// attached, paints every accepted frame onto it. Without one the frame
/// data is only published to the shared buffer.
pub struct WebRunner {
    scheduler: FrameScheduler<CanvasRasterizer>,
    painter: Option<CanvasPainter>,
    /// Signal codes of the last accepted frame for shared-memory reads.
    signal_buffer: Vec<u8>,
}

impl WebRunner {
    pub fn new(config: SwarmConfig) -> Result<Self, JsValue> {
        let rasterizer = CanvasRasterizer::new()?;
        Ok(Self {
            scheduler: FrameScheduler::new(config, rasterizer),
            painter: None,
            signal_buffer: Vec::with_capacity(4),
        })
    }

    /// Paint onto the canvas element with the given id from now on.
    pub fn attach_canvas(&mut self, id: &str) -> Result<(), JsValue> {
        let canvas = find_canvas(id)?;
        self.painter = Some(CanvasPainter::new(&canvas)?);
        log::info!("painting to #{}", id);
        Ok(())
    }

    /// Build the particle set. An unusable size is logged, not raised:
    /// the swarm waits for the next resize.
    pub fn init(&mut self, width: f32, height: f32) {
        if let Err(err) = self.scheduler.init(width, height) {
            log::debug!("waiting for a usable canvas size: {}", err);
        }
        self.pack_signals();
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.scheduler.push_input(event);
    }

    pub fn frame(&mut self, now: f64) -> bool {
        let accepted = match self.painter.as_mut() {
            Some(painter) => self.scheduler.frame(now, painter),
            None => self.scheduler.frame(now, &mut NoopPainter),
        };
        if accepted {
            self.pack_signals();
        }
        accepted
    }

    fn pack_signals(&mut self) {
        self.signal_buffer.clear();
        for signal in self.scheduler.signals() {
            self.signal_buffer.push(signal.code());
        }
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn dots_ptr(&self) -> *const f32 {
        self.scheduler.dots_ptr()
    }

    pub fn dot_count(&self) -> u32 {
        self.scheduler.dot_count()
    }

    pub fn signals_ptr(&self) -> *const u8 {
        self.signal_buffer.as_ptr()
    }

    pub fn signals_len(&self) -> u32 {
        self.signal_buffer.len() as u32
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.scheduler.frame_ptr()
    }

    pub fn header_floats(&self) -> u32 {
        self.scheduler.frame_floats()
    }

    pub fn caption_opacity(&self) -> f32 {
        self.scheduler.caption_opacity()
    }

    pub fn state(&self) -> u32 {
        self.scheduler.swarm().state().code()
    }

    pub fn start_visible(&self) -> bool {
        self.scheduler.swarm().start_visible()
    }
}
