/// Frame-rate gate for a callback-driven loop (e.g. `requestAnimationFrame`).
/// Early callbacks are skipped outright; there is no sleep and no catch-up.
#[derive(Debug, Clone)]
pub struct FrameGate {
    /// Minimum time between accepted frames, in ms. Zero accepts everything.
    interval_ms: f64,
    /// Phase-corrected timestamp of the last accepted frame.
    last: Option<f64>,
}

impl FrameGate {
    pub fn new(target_fps: f64) -> Self {
        let interval_ms = if target_fps.is_finite() && target_fps > 0.0 {
            1000.0 / target_fps
        } else {
            0.0
        };
        Self { interval_ms, last: None }
    }

    /// Decide whether the callback at `now` (ms) renders a frame.
    ///
    /// The first call always renders. Later calls render once more than one
    /// interval has passed; the remainder is carried over so the cadence
    /// stays locked to the target rate.
    pub fn accept(&mut self, now: f64) -> bool {
        let Some(last) = self.last else {
            self.last = Some(now);
            return true;
        };
        let elapsed = now - last;
        if elapsed < 0.0 {
            // Clock went backwards (tab restore, host reset): re-anchor, skip.
            self.last = Some(now);
            return false;
        }
        if self.interval_ms <= 0.0 {
            self.last = Some(now);
            return true;
        }
        if elapsed > self.interval_ms {
            self.last = Some(now - elapsed % self.interval_ms);
            return true;
        }
        false
    }

    /// Forget the last frame; the next callback renders immediately.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
