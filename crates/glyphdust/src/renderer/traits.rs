//! Drawing contract between the engine and a host surface.
//!
//! The engine never touches a canvas; it issues these calls once per
//! accepted frame. The web bridge implements [`Painter`] over a 2D canvas
//! context, tests use [`DrawList`].

/// Caption drawn over the swarm, fading in with the formation.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionDraw {
    pub text: String,
    /// 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f32,
    /// Glow (shadow blur) radius in pixels, 0 for none.
    pub glow: f32,
}

/// A surface that can show one frame of the effect.
pub trait Painter {
    /// Fill the whole surface with an opaque RGB color.
    fn clear(&mut self, rgb: [u8; 3], width: f32, height: f32);

    /// Draw a filled gray disc.
    fn fill_disc(&mut self, x: f32, y: f32, radius: f32, shade: u8);

    /// Draw the caption. Only called when a caption is configured.
    fn caption(&mut self, caption: &CaptionDraw, width: f32, height: f32);
}

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { rgb: [u8; 3], width: f32, height: f32 },
    Disc { x: f32, y: f32, radius: f32, shade: u8 },
    Caption(CaptionDraw),
}

/// Painter that records commands instead of drawing them.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn disc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Disc { .. }))
            .count()
    }

    pub fn caption(&self) -> Option<&CaptionDraw> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Caption(caption) => Some(caption),
            _ => None,
        })
    }
}

impl Painter for DrawList {
    fn clear(&mut self, rgb: [u8; 3], width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { rgb, width, height });
    }

    fn fill_disc(&mut self, x: f32, y: f32, radius: f32, shade: u8) {
        self.commands.push(DrawCommand::Disc { x, y, radius, shade });
    }

    fn caption(&mut self, caption: &CaptionDraw, _width: f32, _height: f32) {
        self.commands.push(DrawCommand::Caption(caption.clone()));
    }
}

/// Painter that discards everything. For hosts that only read the shared buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPainter;

impl Painter for NoopPainter {
    fn clear(&mut self, _rgb: [u8; 3], _width: f32, _height: f32) {}

    fn fill_disc(&mut self, _x: f32, _y: f32, _radius: f32, _shade: u8) {}

    fn caption(&mut self, _caption: &CaptionDraw, _width: f32, _height: f32) {}
}
