pub mod instance;
pub mod traits;

pub use instance::{DotBuffer, DotInstance};
pub use traits::{CaptionDraw, DrawCommand, DrawList, NoopPainter, Painter};
