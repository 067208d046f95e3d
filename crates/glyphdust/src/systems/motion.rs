//! Per-particle update rules, one per animation state.
//!
//! - [`drift`] (`Random`): jitter plus toroidal wrap.
//! - [`form`] (`Forming`): eased lerp from the formation snapshot to home.
//! - [`settle`] (`Formed`): spring to home, pointer repulsion, friction.

use glam::Vec2;

use crate::api::types::PointerState;
use crate::core::rng::Rng;
use crate::core::store::ParticleStore;
use crate::extensions::easing::lerp_vec2;

/// Constants of the formed-state simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dynamics {
    /// Fraction of the displacement from home added to velocity each tick.
    pub spring: f32,
    /// Peak repulsion impulse, reached with the pointer on top of a particle.
    pub repulsion: f32,
    /// Velocity multiplier applied every tick after the forces.
    pub friction: f32,
}

impl Default for Dynamics {
    fn default() -> Self {
        Self {
            spring: 0.01,
            repulsion: 0.8,
            friction: 0.92,
        }
    }
}

/// Wrap one coordinate onto [0, max]: below zero jumps to `max`, past `max` to zero.
#[inline]
pub fn wrap_coordinate(v: f32, max: f32) -> f32 {
    if v < 0.0 {
        max
    } else if v > max {
        0.0
    } else {
        v
    }
}

/// Random state: move every particle by up to `amplitude` per axis, wrapping at the edges.
pub fn drift(store: &mut ParticleStore, rng: &mut Rng, bounds: Vec2, amplitude: f32) {
    let (_, _, positions, _) = store.motion_lanes();
    for p in positions.iter_mut() {
        let x = p.x + rng.range(-amplitude, amplitude);
        let y = p.y + rng.range(-amplitude, amplitude);
        *p = Vec2::new(wrap_coordinate(x, bounds.x), wrap_coordinate(y, bounds.y));
    }
}

/// Forming state: place every particle at `eased` of the way from its snapshot to home.
/// `eased >= 1` lands exactly on home.
pub fn form(store: &mut ParticleStore, eased: f32) {
    let (homes, starts, positions, _) = store.motion_lanes();
    if eased >= 1.0 {
        positions.copy_from_slice(homes);
        return;
    }
    for ((p, &home), &start) in positions.iter_mut().zip(homes).zip(starts) {
        *p = lerp_vec2(start, home, eased);
    }
}

/// Repulsion impulse on a particle at `position` from a pointer at `pointer`.
///
/// Linear falloff from `strength` at distance 0 to nothing at `radius`.
/// Zero for a non-positive radius, outside the radius, and when the
/// pointer sits exactly on the particle (no direction to push in).
#[inline]
pub fn repulsion_impulse(position: Vec2, pointer: Vec2, radius: f32, strength: f32) -> Vec2 {
    if radius <= 0.0 {
        return Vec2::ZERO;
    }
    let away = position - pointer;
    let dist_sq = away.length_squared();
    if dist_sq >= radius * radius || dist_sq == 0.0 {
        return Vec2::ZERO;
    }
    let dist = dist_sq.sqrt();
    let falloff = (radius - dist) / radius;
    away / dist * (strength * falloff)
}

/// Formed state: one step of spring-damped, pointer-reactive physics.
pub fn settle(store: &mut ParticleStore, pointer: &PointerState, dynamics: &Dynamics) {
    let (homes, _, positions, velocities) = store.motion_lanes();
    for ((p, v), &home) in positions.iter_mut().zip(velocities.iter_mut()).zip(homes) {
        // Spring: |d| * k along d is just d * k.
        *v += (home - *p) * dynamics.spring;

        if let Some(target) = pointer.position {
            *v += repulsion_impulse(*p, target, pointer.radius, dynamics.repulsion);
        }

        *v *= dynamics.friction;
        *p += *v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::ParticleLook;

    fn store_with(homes: &[Vec2], seed: u64) -> ParticleStore {
        let mut store = ParticleStore::new();
        let mut rng = Rng::new(seed);
        store.rebuild(homes, Vec2::new(200.0, 100.0), &mut rng, &ParticleLook::default());
        store
    }

    #[test]
    fn wrap_maps_to_opposite_edge() {
        assert_eq!(wrap_coordinate(-0.01, 800.0), 800.0);
        assert_eq!(wrap_coordinate(800.5, 800.0), 0.0);
        assert_eq!(wrap_coordinate(0.0, 800.0), 0.0);
        assert_eq!(wrap_coordinate(800.0, 800.0), 800.0);
        assert_eq!(wrap_coordinate(12.5, 800.0), 12.5);
    }

    #[test]
    fn drift_never_touches_homes() {
        let homes: Vec<Vec2> = (0..50).map(|i| Vec2::new(i as f32 * 3.0, 40.0)).collect();
        let mut store = store_with(&homes, 9);
        let mut rng = Rng::new(10);
        for _ in 0..500 {
            drift(&mut store, &mut rng, Vec2::new(200.0, 100.0), 0.15);
        }
        assert_eq!(store.homes(), &homes[..]);
    }

    #[test]
    fn drift_stays_within_bounds_and_steps_are_small() {
        let homes = vec![Vec2::ZERO; 100];
        let mut store = store_with(&homes, 2);
        let mut rng = Rng::new(4);
        let bounds = Vec2::new(200.0, 100.0);
        for _ in 0..200 {
            let before: Vec<Vec2> = store.positions().to_vec();
            drift(&mut store, &mut rng, bounds, 0.15);
            for (a, b) in before.iter().zip(store.positions()) {
                assert!(b.x >= 0.0 && b.x <= bounds.x && b.y >= 0.0 && b.y <= bounds.y);
                let dx = (a.x - b.x).abs();
                // Either a small step or a wrap across the whole canvas
                assert!(dx <= 0.15 + 1e-4 || dx >= bounds.x - 0.15 - 1e-3, "dx {}", dx);
            }
        }
    }

    #[test]
    fn drift_wraps_instead_of_clamping() {
        let mut store = store_with(&[Vec2::ZERO], 1);
        if let Some(p) = store.particle_mut(0) {
            *p.position = Vec2::new(-0.05, 50.0);
        }
        let mut rng = Rng::new(3);
        // zero amplitude: only the wrap applies
        drift(&mut store, &mut rng, Vec2::new(200.0, 100.0), 0.0);
        assert_eq!(store.positions()[0], Vec2::new(200.0, 50.0));
    }

    #[test]
    fn form_endpoints_are_exact() {
        let homes = vec![Vec2::new(13.3, 71.9), Vec2::new(0.1, 0.7)];
        let mut store = store_with(&homes, 8);
        store.snapshot_formation_start();
        let starts: Vec<Vec2> = store.iter().map(|p| p.formation_start).collect();

        form(&mut store, 0.0);
        assert_eq!(store.positions(), &starts[..]);

        form(&mut store, 1.0);
        assert_eq!(store.positions(), &homes[..]);
    }

    #[test]
    fn form_interpolates_from_snapshot() {
        let mut store = store_with(&[Vec2::new(100.0, 100.0)], 1);
        if let Some(p) = store.particle_mut(0) {
            *p.position = Vec2::new(0.0, 0.0);
        }
        store.snapshot_formation_start();
        form(&mut store, 0.25);
        assert_eq!(store.positions()[0], Vec2::new(25.0, 25.0));
        // Repeated calls depend only on `eased`, not on the current position
        form(&mut store, 0.25);
        assert_eq!(store.positions()[0], Vec2::new(25.0, 25.0));
    }

    #[test]
    fn settle_converges_without_pointer() {
        let home = Vec2::new(50.0, 50.0);
        let mut store = store_with(&[home], 6);
        if let Some(p) = store.particle_mut(0) {
            *p.position = Vec2::new(180.0, 2.0);
        }
        let pointer = PointerState::absent(100.0);
        let dynamics = Dynamics::default();
        let initial = store.positions()[0].distance(home);
        for _ in 0..2000 {
            settle(&mut store, &pointer, &dynamics);
        }
        let final_dist = store.positions()[0].distance(home);
        assert!(final_dist < initial * 0.001, "did not converge: {} -> {}", initial, final_dist);
    }

    #[test]
    fn settle_at_home_and_at_rest_is_stationary() {
        let home = Vec2::new(10.0, 20.0);
        let mut store = store_with(&[home], 6);
        form(&mut store, 1.0);
        settle(&mut store, &PointerState::absent(100.0), &Dynamics::default());
        assert_eq!(store.positions()[0], home);
    }

    #[test]
    fn pointer_pushes_particle_away() {
        let home = Vec2::new(50.0, 50.0);
        let mut store = store_with(&[home], 6);
        form(&mut store, 1.0);
        let pointer = PointerState::at(Vec2::new(40.0, 50.0), 100.0);
        settle(&mut store, &pointer, &Dynamics::default());
        assert!(store.positions()[0].x > 50.0);
        assert_eq!(store.positions()[0].y, 50.0);
    }

    #[test]
    fn repulsion_falls_off_linearly() {
        let at_half = repulsion_impulse(Vec2::new(50.0, 0.0), Vec2::ZERO, 100.0, 0.8);
        assert!((at_half.x - 0.4).abs() < 1e-6);
        let outside = repulsion_impulse(Vec2::new(100.0, 0.0), Vec2::ZERO, 100.0, 0.8);
        assert_eq!(outside, Vec2::ZERO);
    }

    #[test]
    fn repulsion_guards_degenerate_cases() {
        let p = Vec2::new(5.0, 5.0);
        let on_top = repulsion_impulse(p, p, 100.0, 0.8);
        assert_eq!(on_top, Vec2::ZERO);
        assert!(on_top.is_finite());
        assert_eq!(repulsion_impulse(p, Vec2::ZERO, 0.0, 0.8), Vec2::ZERO);
        assert_eq!(repulsion_impulse(p, Vec2::ZERO, -5.0, 0.8), Vec2::ZERO);
    }

    #[test]
    fn pointer_on_particle_in_formed_state_stays_finite() {
        let home = Vec2::new(30.0, 30.0);
        let mut store = store_with(&[home], 6);
        form(&mut store, 1.0);
        settle(&mut store, &PointerState::at(home, 100.0), &Dynamics::default());
        assert!(store.positions()[0].is_finite());
        assert!(store.get(0).unwrap().velocity.is_finite());
    }
}
