use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::glyph::AlphaMask;

/// How ink pixels are reduced to particle homes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SamplingMode {
    /// Every n-th ink pixel in raster order.
    Stride,
    /// One point per inked `cell` x `cell` block, then strided.
    /// Spreads homes evenly instead of favouring dense strokes.
    GridBucket { cell: u32 },
}

impl Default for SamplingMode {
    fn default() -> Self {
        SamplingMode::GridBucket { cell: 5 }
    }
}

/// Reduce a mask to at most `target` home points. Deterministic.
pub fn sample_points(mask: &AlphaMask, threshold: u8, target: usize, mode: SamplingMode) -> Vec<Vec2> {
    if target == 0 {
        return Vec::new();
    }
    let candidates: Vec<Vec2> = match mode {
        SamplingMode::Stride => mask
            .ink_pixels(threshold)
            .map(|(x, y)| Vec2::new(x as f32, y as f32))
            .collect(),
        SamplingMode::GridBucket { cell } => cell_centers(mask, threshold, cell.max(1)),
    };
    stride_sample(&candidates, target)
}

/// `stride = max(1, len / target)`, take every stride-th point, stop at `target`.
pub fn stride_sample(points: &[Vec2], target: usize) -> Vec<Vec2> {
    if target == 0 {
        return Vec::new();
    }
    let stride = (points.len() / target).max(1);
    points.iter().step_by(stride).take(target).copied().collect()
}

/// Center of every cell holding at least one ink pixel, cells in row-major order.
/// Cells on the right and bottom edges are clipped to the mask before centering.
fn cell_centers(mask: &AlphaMask, threshold: u8, cell: u32) -> Vec<Vec2> {
    let (width, height) = (mask.width(), mask.height());
    let mut centers = Vec::new();

    for y0 in (0..height).step_by(cell as usize) {
        let y1 = (y0 + cell).min(height);
        for x0 in (0..width).step_by(cell as usize) {
            let x1 = (x0 + cell).min(width);
            let inked = (y0..y1).any(|y| (x0..x1).any(|x| mask.is_ink(x, y, threshold)));
            if inked {
                centers.push(Vec2::new(
                    (x0 + x1) as f32 / 2.0,
                    (y0 + y1) as f32 / 2.0,
                ));
            }
        }
    }
    centers
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn square_mask(size: u32, x0: u32, y0: u32, side: u32) -> AlphaMask {
        let mut mask = AlphaMask::new(size, size);
        mask.fill_rect(x0, y0, x0 + side, y0 + side, 255);
        mask
    }

    #[test]
    fn single_cell_square_yields_its_center() {
        let mask = square_mask(10, 0, 0, 10);
        let points = sample_points(&mask, 128, 4, SamplingMode::GridBucket { cell: 10 });
        assert_eq!(points, vec![Vec2::new(5.0, 5.0)]);
    }

    #[test]
    fn fewer_cells_than_target_returns_every_cell_once() {
        // 20x20 square on a 5px grid -> 16 cells
        let mask = square_mask(40, 10, 10, 20);
        let points = sample_points(&mask, 128, 100, SamplingMode::GridBucket { cell: 5 });
        assert_eq!(points.len(), 16);
        let distinct: HashSet<(u32, u32)> =
            points.iter().map(|p| (p.x.to_bits(), p.y.to_bits())).collect();
        assert_eq!(distinct.len(), 16, "every cell center appears once");
        assert_eq!(points[0], Vec2::new(12.5, 12.5));
    }

    #[test]
    fn never_exceeds_target() {
        let mask = square_mask(200, 0, 0, 200);
        for target in [1usize, 7, 100, 1199, 2500] {
            for mode in [SamplingMode::Stride, SamplingMode::GridBucket { cell: 5 }] {
                let points = sample_points(&mask, 128, target, mode);
                assert!(points.len() <= target, "{:?} returned {} > {}", mode, points.len(), target);
            }
        }
    }

    #[test]
    fn stride_follows_raster_order() {
        let mask = square_mask(4, 0, 0, 4);
        // 16 ink pixels, target 4 -> stride 4 -> every 4th pixel, i.e. first of each row
        let points = sample_points(&mask, 128, 4, SamplingMode::Stride);
        assert_eq!(
            points,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(0.0, 2.0),
                Vec2::new(0.0, 3.0),
            ]
        );
    }

    #[test]
    fn stride_caps_when_division_rounds_down() {
        let points: Vec<Vec2> = (0..10).map(|i| Vec2::new(i as f32, 0.0)).collect();
        // 10 / 3 = 3 -> indices 0, 3, 6, (9 dropped by cap)
        let sampled = stride_sample(&points, 3);
        assert_eq!(sampled, vec![Vec2::new(0.0, 0.0), Vec2::new(3.0, 0.0), Vec2::new(6.0, 0.0)]);
    }

    #[test]
    fn deterministic_for_same_mask() {
        let mask = square_mask(64, 3, 7, 40);
        let a = sample_points(&mask, 128, 50, SamplingMode::default());
        let b = sample_points(&mask, 128, 50, SamplingMode::default());
        assert_eq!(a, b);
    }

    #[test]
    fn empty_mask_and_zero_target() {
        let mask = AlphaMask::new(32, 32);
        assert!(sample_points(&mask, 128, 10, SamplingMode::default()).is_empty());
        let full = square_mask(8, 0, 0, 8);
        assert!(sample_points(&full, 128, 0, SamplingMode::Stride).is_empty());
    }

    #[test]
    fn edge_cells_are_clipped() {
        // 7x7 mask, ink only in the bottom-right pixel; 5px cells -> edge cell [5,7)
        let mut mask = AlphaMask::new(7, 7);
        mask.set(6, 6, 255);
        let points = sample_points(&mask, 128, 10, SamplingMode::GridBucket { cell: 5 });
        assert_eq!(points, vec![Vec2::new(6.0, 6.0)]);
    }

    #[test]
    fn zero_cell_size_behaves_like_one() {
        let mask = square_mask(3, 0, 0, 2);
        let points = sample_points(&mask, 128, 10, SamplingMode::GridBucket { cell: 0 });
        assert_eq!(points.len(), 4);
    }
}
