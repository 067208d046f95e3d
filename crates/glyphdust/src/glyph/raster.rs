use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mask::AlphaMask;
use crate::api::error::SwarmError;

/// Where and how large to draw the text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPlacement {
    /// Font size in pixels.
    pub font_px: f32,
    /// Horizontal center and vertical middle of the text, in canvas pixels.
    pub center: Vec2,
}

/// Backend that turns a string into ink.
///
/// The engine ships [`BitmapFontRasterizer`](super::BitmapFontRasterizer);
/// the web bridge provides one backed by an offscreen 2D canvas.
pub trait GlyphRasterizer {
    /// Rendered width of `text` at `font_px`, in pixels.
    fn measure(&mut self, text: &str, font_px: f32) -> Result<f32, SwarmError>;

    /// Draw `text` into a fresh `width` x `height` mask, centered on `placement.center`.
    fn rasterize(
        &mut self,
        text: &str,
        placement: &TextPlacement,
        width: u32,
        height: u32,
    ) -> Result<AlphaMask, SwarmError>;
}

/// How the font size is chosen for a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FitStrategy {
    /// Shrink from `start_px` in `step_px` decrements until the text is
    /// `margin_px` narrower than the canvas and the font size is `margin_px`
    /// shorter than it. Never goes below `min_px`.
    ShrinkToFit {
        start_px: f32,
        step_px: f32,
        margin_px: f32,
        min_px: f32,
    },
    /// Fixed size; the text sits `y_offset` pixels below the canvas middle.
    Fixed { font_px: f32, y_offset: f32 },
}

impl Default for FitStrategy {
    fn default() -> Self {
        FitStrategy::ShrinkToFit {
            start_px: 200.0,
            step_px: 5.0,
            margin_px: 100.0,
            min_px: 5.0,
        }
    }
}

/// Convert a host canvas size into whole pixels, rejecting empty or bogus sizes.
pub fn canvas_pixels(width: f32, height: f32) -> Result<(u32, u32), SwarmError> {
    if !width.is_finite() || !height.is_finite() || width < 1.0 || height < 1.0 {
        return Err(SwarmError::InvalidDimensions { width, height });
    }
    Ok((width as u32, height as u32))
}

/// Pick font size and position for `text` on a `width` x `height` canvas.
pub fn fit_text<R: GlyphRasterizer + ?Sized>(
    rasterizer: &mut R,
    text: &str,
    fit: &FitStrategy,
    width: u32,
    height: u32,
) -> Result<TextPlacement, SwarmError> {
    let center = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
    match *fit {
        FitStrategy::ShrinkToFit { start_px, step_px, margin_px, min_px } => {
            let step = step_px.max(1.0);
            let floor = min_px.max(1.0);
            let max_width = width as f32 - margin_px;
            let max_height = height as f32 - margin_px;

            // Anything taller than the canvas fails the height test anyway.
            let start = start_px.min(height as f32 + step).max(floor + step);
            let steps = ((start - floor) / step).ceil() as u32;

            let mut font_px = floor;
            for k in 1..=steps {
                let candidate = start - k as f32 * step;
                if candidate <= floor {
                    break;
                }
                let text_width = rasterizer.measure(text, candidate)?;
                if text_width <= max_width && candidate <= max_height {
                    font_px = candidate;
                    break;
                }
            }
            Ok(TextPlacement { font_px, center })
        }
        FitStrategy::Fixed { font_px, y_offset } => Ok(TextPlacement {
            font_px: font_px.max(1.0),
            center: center + Vec2::new(0.0, y_offset),
        }),
    }
}

/// Fit, draw and validate: the full rasterizer contract.
///
/// Returns [`SwarmError::RasterizationEmpty`] when nothing crosses `threshold`.
pub fn rasterize_text<R: GlyphRasterizer + ?Sized>(
    rasterizer: &mut R,
    text: &str,
    fit: &FitStrategy,
    threshold: u8,
    width: f32,
    height: f32,
) -> Result<AlphaMask, SwarmError> {
    let (w, h) = canvas_pixels(width, height)?;
    let placement = fit_text(rasterizer, text, fit, w, h)?;
    log::debug!(
        "rasterizing {:?} at {}px on {}x{}",
        text,
        placement.font_px,
        w,
        h
    );
    let mask = rasterizer.rasterize(text, &placement, w, h)?;
    if mask.ink_count(threshold) == 0 {
        return Err(SwarmError::RasterizationEmpty {
            text: text.to_string(),
            width: w,
            height: h,
        });
    }
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Measures every character as `font_px * 0.5` wide and draws nothing.
    struct HalfEm {
        measured: Vec<f32>,
    }

    impl GlyphRasterizer for HalfEm {
        fn measure(&mut self, text: &str, font_px: f32) -> Result<f32, SwarmError> {
            self.measured.push(font_px);
            Ok(text.chars().count() as f32 * font_px * 0.5)
        }

        fn rasterize(
            &mut self,
            _text: &str,
            _placement: &TextPlacement,
            width: u32,
            height: u32,
        ) -> Result<AlphaMask, SwarmError> {
            Ok(AlphaMask::new(width, height))
        }
    }

    #[test]
    fn invalid_dimensions_rejected() {
        assert!(matches!(
            canvas_pixels(0.0, 100.0),
            Err(SwarmError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            canvas_pixels(100.0, -4.0),
            Err(SwarmError::InvalidDimensions { .. })
        ));
        assert!(canvas_pixels(f32::NAN, 10.0).is_err());
        assert_eq!(canvas_pixels(640.7, 480.2).unwrap(), (640, 480));
    }

    #[test]
    fn shrink_to_fit_respects_width_margin() {
        let mut r = HalfEm { measured: Vec::new() };
        // 6 chars * 0.5 = 3 px of width per font px; 400 - 100 = 300 -> 100px
        let placement = fit_text(&mut r, "Benson", &FitStrategy::default(), 400, 1000).unwrap();
        assert_eq!(placement.font_px, 100.0);
        assert_eq!(placement.center, Vec2::new(200.0, 500.0));
        assert_eq!(r.measured.first(), Some(&195.0));
    }

    #[test]
    fn shrink_to_fit_respects_height_margin() {
        let mut r = HalfEm { measured: Vec::new() };
        let placement = fit_text(&mut r, "Hi", &FitStrategy::default(), 4000, 250).unwrap();
        assert_eq!(placement.font_px, 150.0);
    }

    #[test]
    fn shrink_to_fit_stops_at_minimum() {
        let mut r = HalfEm { measured: Vec::new() };
        let placement = fit_text(&mut r, "Benson", &FitStrategy::default(), 50, 50).unwrap();
        assert_eq!(placement.font_px, 5.0);
    }

    #[test]
    fn huge_start_size_still_terminates() {
        let mut r = HalfEm { measured: Vec::new() };
        let fit = FitStrategy::ShrinkToFit {
            start_px: 1e30,
            step_px: 5.0,
            margin_px: 100.0,
            min_px: 5.0,
        };
        // 3 px of width per font px; 800 - 100 = 700 -> 230 on the 605 - 5k grid
        let placement = fit_text(&mut r, "Benson", &fit, 800, 600).unwrap();
        assert_eq!(placement.font_px, 230.0);
        assert_eq!(r.measured.first(), Some(&600.0));
        assert!(r.measured.len() <= 121, "measured {} sizes", r.measured.len());
    }

    #[test]
    fn non_finite_fit_values_fall_back_to_minimum() {
        let mut r = HalfEm { measured: Vec::new() };
        let fit = FitStrategy::ShrinkToFit {
            start_px: f32::INFINITY,
            step_px: f32::NAN,
            margin_px: 100.0,
            min_px: 5.0,
        };
        let placement = fit_text(&mut r, "Benson", &fit, 50, 50).unwrap();
        assert_eq!(placement.font_px, 5.0);
    }

    #[test]
    fn fixed_strategy_skips_measurement() {
        let mut r = HalfEm { measured: Vec::new() };
        let fit = FitStrategy::Fixed { font_px: 120.0, y_offset: -20.0 };
        let placement = fit_text(&mut r, "Benson", &fit, 800, 600).unwrap();
        assert!(r.measured.is_empty());
        assert_eq!(placement.font_px, 120.0);
        assert_eq!(placement.center, Vec2::new(400.0, 280.0));
    }

    #[test]
    fn empty_raster_is_reported() {
        let mut r = HalfEm { measured: Vec::new() };
        let err = rasterize_text(&mut r, "Benson", &FitStrategy::default(), 128, 800.0, 600.0)
            .unwrap_err();
        assert_eq!(
            err,
            SwarmError::RasterizationEmpty { text: "Benson".into(), width: 800, height: 600 }
        );
    }
}
