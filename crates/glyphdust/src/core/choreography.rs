use crate::api::types::AnimationState;
use crate::extensions::easing::Easing;

/// The Random → Forming → Formed state machine and its formation clock.
///
/// Progress is recomputed from the stored start timestamp on every query,
/// so dropped frames never stretch the formation.
#[derive(Debug, Clone)]
pub struct Choreography {
    state: AnimationState,
    /// Timestamp (ms) at which formation began.
    started_at: Option<f64>,
    duration_ms: f64,
    easing: Easing,
}

impl Choreography {
    pub fn new(duration_ms: f64, easing: Easing) -> Self {
        Self {
            state: AnimationState::Random,
            started_at: None,
            duration_ms: if duration_ms.is_finite() { duration_ms.max(0.0) } else { 0.0 },
            easing,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }

    /// Begin formation at `now`. Only valid from `Random`; returns whether it started.
    pub fn start(&mut self, now: f64) -> bool {
        if self.state != AnimationState::Random {
            return false;
        }
        self.state = AnimationState::Forming;
        self.started_at = Some(now);
        true
    }

    /// Restart the formation clock without leaving `Forming`.
    pub fn restart_formation(&mut self, now: f64) {
        if self.state == AnimationState::Forming {
            self.started_at = Some(now);
        }
    }

    /// Linear progress in [0, 1]: 0 before formation, 1 once formed.
    pub fn progress(&self, now: f64) -> f32 {
        match self.state {
            AnimationState::Random => 0.0,
            AnimationState::Formed => 1.0,
            AnimationState::Forming => {
                let Some(started) = self.started_at else { return 0.0 };
                if self.duration_ms <= 0.0 {
                    return 1.0;
                }
                ((now - started) / self.duration_ms).clamp(0.0, 1.0) as f32
            }
        }
    }

    /// Eased progress, the interpolation weight of the formation.
    pub fn eased(&self, now: f64) -> f32 {
        self.easing.apply(self.progress(now))
    }

    /// Caption opacity: tracks eased progress and stays opaque once formed.
    pub fn caption_opacity(&self, now: f64) -> f32 {
        self.eased(now)
    }

    /// Move to `Formed` once the formation time has fully elapsed.
    /// Returns true on the tick the transition happens.
    pub fn complete_if_elapsed(&mut self, now: f64) -> bool {
        if self.state == AnimationState::Forming && self.progress(now) >= 1.0 {
            self.state = AnimationState::Formed;
            return true;
        }
        false
    }

    /// Back to the drifting cloud.
    pub fn reset(&mut self) {
        self.state = AnimationState::Random;
        self.started_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_idempotent() {
        let mut c = Choreography::new(1500.0, Easing::CubicOut);
        assert!(c.start(100.0));
        assert!(!c.start(900.0));
        assert_eq!(c.state(), AnimationState::Forming);
        assert_eq!(c.started_at(), Some(100.0));
    }

    #[test]
    fn progress_is_clamped() {
        let mut c = Choreography::new(1000.0, Easing::Linear);
        assert_eq!(c.progress(0.0), 0.0);
        c.start(1000.0);
        assert_eq!(c.progress(500.0), 0.0);
        assert_eq!(c.progress(1500.0), 0.5);
        assert_eq!(c.progress(9000.0), 1.0);
    }

    #[test]
    fn completes_exactly_at_duration() {
        let mut c = Choreography::new(1500.0, Easing::CubicOut);
        c.start(0.0);
        assert!(!c.complete_if_elapsed(1499.0));
        assert_eq!(c.state(), AnimationState::Forming);
        assert!(c.complete_if_elapsed(1500.0));
        assert_eq!(c.state(), AnimationState::Formed);
        assert!(!c.complete_if_elapsed(1600.0));
        // Formed never goes back to Forming through start()
        assert!(!c.start(2000.0));
    }

    #[test]
    fn zero_duration_forms_immediately() {
        let mut c = Choreography::new(0.0, Easing::CubicOut);
        c.start(10.0);
        assert_eq!(c.progress(10.0), 1.0);
        assert!(c.complete_if_elapsed(10.0));
        let bogus = Choreography::new(f64::NAN, Easing::CubicOut);
        assert_eq!(bogus.progress(0.0), 0.0);
    }

    #[test]
    fn caption_opacity_tracks_eased_progress() {
        let mut c = Choreography::new(1000.0, Easing::CubicOut);
        assert_eq!(c.caption_opacity(0.0), 0.0);
        c.start(0.0);
        assert!((c.caption_opacity(500.0) - 0.875).abs() < 1e-6);
        assert_eq!(c.caption_opacity(1000.0), 1.0);
        c.complete_if_elapsed(1000.0);
        assert_eq!(c.caption_opacity(5000.0), 1.0);
    }

    #[test]
    fn reset_returns_to_random() {
        let mut c = Choreography::new(1000.0, Easing::CubicOut);
        c.start(0.0);
        c.complete_if_elapsed(2000.0);
        c.reset();
        assert_eq!(c.state(), AnimationState::Random);
        assert_eq!(c.started_at(), None);
        assert!(c.start(3000.0));
    }
}
