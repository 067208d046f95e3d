use std::f64::consts::TAU;

use glyphdust::glyph::{AlphaMask, GlyphRasterizer, TextPlacement};
use glyphdust::renderer::traits::{CaptionDraw, Painter};
use glyphdust::SwarmError;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Font used for the particle text.
fn glyph_font(font_px: f32) -> String {
    format!("bold {}px \"Times New Roman\", serif", font_px)
}

const CAPTION_FONT: &str = "italic 28px Georgia, serif";

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

fn backend(err: JsValue) -> SwarmError {
    SwarmError::RasterBackend(format!("{:?}", err))
}

/// Look up a canvas element by id.
pub fn find_canvas(id: &str) -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id {:?}", id)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(JsValue::from)
}

/// Rasterizes text on a detached offscreen canvas and reads back its alpha.
pub struct CanvasRasterizer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRasterizer {
    pub fn new() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(JsValue::from)?;
        let ctx = context_2d(&canvas)?;
        Ok(Self { canvas, ctx })
    }
}

impl GlyphRasterizer for CanvasRasterizer {
    fn measure(&mut self, text: &str, font_px: f32) -> Result<f32, SwarmError> {
        self.ctx.set_font(&glyph_font(font_px));
        let metrics = self.ctx.measure_text(text).map_err(backend)?;
        Ok(metrics.width() as f32)
    }

    fn rasterize(
        &mut self,
        text: &str,
        placement: &TextPlacement,
        width: u32,
        height: u32,
    ) -> Result<AlphaMask, SwarmError> {
        // Resizing the canvas also resets the context state.
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        ctx.set_font(&glyph_font(placement.font_px));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_fill_style_str("white");
        ctx.fill_text(text, placement.center.x as f64, placement.center.y as f64)
            .map_err(backend)?;

        let image = ctx
            .get_image_data(0.0, 0.0, width as f64, height as f64)
            .map_err(backend)?;
        let rgba = image.data();
        AlphaMask::from_rgba(width, height, &rgba.0)
            .ok_or_else(|| SwarmError::RasterBackend("image data size mismatch".to_string()))
    }
}

/// Draws frames onto a visible canvas.
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    /// CSS color for every gray level.
    shades: Vec<String>,
}

impl CanvasPainter {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = context_2d(canvas)?;
        let shades = (0..=255u32).map(|s| format!("rgb({s},{s},{s})")).collect();
        Ok(Self { ctx, shades })
    }
}

impl Painter for CanvasPainter {
    fn clear(&mut self, rgb: [u8; 3], width: f32, height: f32) {
        let [r, g, b] = rgb;
        self.ctx.set_fill_style_str(&format!("rgb({r},{g},{b})"));
        self.ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_disc(&mut self, x: f32, y: f32, radius: f32, shade: u8) {
        self.ctx.set_fill_style_str(&self.shades[shade as usize]);
        self.ctx.begin_path();
        if self.ctx.arc(x as f64, y as f64, radius.max(0.0) as f64, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }

    fn caption(&mut self, caption: &CaptionDraw, width: f32, height: f32) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(caption.opacity.clamp(0.0, 1.0) as f64);
        ctx.set_font(CAPTION_FONT);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_fill_style_str("white");
        if caption.glow > 0.0 {
            ctx.set_shadow_color("white");
            ctx.set_shadow_blur(caption.glow as f64);
        }
        let x = width as f64 / 2.0;
        let y = height as f64 * 0.8;
        if let Err(err) = ctx.fill_text(&caption.text, x, y) {
            log::debug!("caption draw failed: {:?}", err);
        }
        ctx.restore();
    }
}
