/// Single-channel coverage bitmap, row-major, one byte per pixel.
///
/// Produced by a [`GlyphRasterizer`](super::GlyphRasterizer) and consumed by
/// the sampler. Only the alpha channel of the host's RGBA output is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl AlphaMask {
    /// A fully transparent mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; width as usize * height as usize],
        }
    }

    /// Extract the alpha channel from tightly packed RGBA8 pixels.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Option<Self> {
        if rgba.len() != width as usize * height as usize * 4 {
            return None;
        }
        let alpha = rgba.chunks_exact(4).map(|px| px[3]).collect();
        Some(Self { width, height, alpha })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw alpha value, or 0 outside the mask.
    #[inline]
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[y as usize * self.width as usize + x as usize]
    }

    /// Set a pixel's alpha. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        if x < self.width && y < self.height {
            self.alpha[y as usize * self.width as usize + x as usize] = value;
        }
    }

    /// Fill an axis-aligned rectangle, clipped to the mask.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, value: u8) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        for y in y0..y1 {
            let row = y as usize * self.width as usize;
            for x in x0..x1 {
                self.alpha[row + x as usize] = value;
            }
        }
    }

    /// Ink test: alpha strictly above the threshold.
    #[inline]
    pub fn is_ink(&self, x: u32, y: u32, threshold: u8) -> bool {
        self.alpha(x, y) > threshold
    }

    /// All ink pixel coordinates in raster order.
    pub fn ink_pixels(&self, threshold: u8) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width.max(1);
        self.alpha
            .iter()
            .enumerate()
            .filter(move |&(_, &a)| a > threshold)
            .map(move |(i, _)| (i as u32 % width, i as u32 / width))
    }

    pub fn ink_count(&self, threshold: u8) -> usize {
        self.alpha.iter().filter(|&&a| a > threshold).count()
    }
}
