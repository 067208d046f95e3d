use glam::Vec2;

use super::rng::Rng;

/// Visual ranges for newly built particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleLook {
    /// Base disc radius; each particle gets 0.7–1.3× this.
    pub base_size: f32,
    /// Lowest gray level; shades are drawn from [base_shade, 255].
    pub base_shade: u8,
}

impl Default for ParticleLook {
    fn default() -> Self {
        Self {
            base_size: 1.0,
            base_shade: 220,
        }
    }
}

/// Read-only copy of one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub home: Vec2,
    pub position: Vec2,
    pub velocity: Vec2,
    pub formation_start: Vec2,
    pub size: f32,
    pub shade: u8,
}

/// Mutable handle to one particle. `home` stays read-only.
pub struct ParticleMut<'a> {
    pub home: Vec2,
    pub position: &'a mut Vec2,
    pub velocity: &'a mut Vec2,
    pub formation_start: Vec2,
}

/// Structure-of-arrays particle storage.
/// All vectors always have the same length; the set only changes through [`rebuild`](Self::rebuild).
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    home: Vec<Vec2>,
    position: Vec<Vec2>,
    velocity: Vec<Vec2>,
    formation_start: Vec<Vec2>,
    size: Vec<f32>,
    shade: Vec<u8>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard every particle and create one per home point.
    ///
    /// Particles start at a uniformly random spot inside `canvas`,
    /// at rest, with their size and shade rolled once.
    pub fn rebuild(&mut self, homes: &[Vec2], canvas: Vec2, rng: &mut Rng, look: &ParticleLook) {
        self.clear();
        self.reserve(homes.len());

        let shade_span = 255.0 - look.base_shade as f32;
        for &home in homes {
            let position = Vec2::new(rng.next_f32() * canvas.x, rng.next_f32() * canvas.y);
            self.home.push(home);
            self.position.push(position);
            self.velocity.push(Vec2::ZERO);
            self.formation_start.push(position);
            self.size.push(look.base_size * (0.7 + rng.next_f32() * 0.6));
            self.shade.push((look.base_shade as f32 + rng.next_f32() * shade_span) as u8);
        }
    }

    fn reserve(&mut self, n: usize) {
        self.home.reserve(n);
        self.position.reserve(n);
        self.velocity.reserve(n);
        self.formation_start.reserve(n);
        self.size.reserve(n);
        self.shade.reserve(n);
    }

    pub fn clear(&mut self) {
        self.home.clear();
        self.position.clear();
        self.velocity.clear();
        self.formation_start.clear();
        self.size.clear();
        self.shade.clear();
    }

    pub fn len(&self) -> usize {
        self.home.len()
    }

    pub fn is_empty(&self) -> bool {
        self.home.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<ParticleView> {
        if i >= self.len() {
            return None;
        }
        Some(ParticleView {
            home: self.home[i],
            position: self.position[i],
            velocity: self.velocity[i],
            formation_start: self.formation_start[i],
            size: self.size[i],
            shade: self.shade[i],
        })
    }

    pub fn particle_mut(&mut self, i: usize) -> Option<ParticleMut<'_>> {
        if i >= self.len() {
            return None;
        }
        Some(ParticleMut {
            home: self.home[i],
            position: &mut self.position[i],
            velocity: &mut self.velocity[i],
            formation_start: self.formation_start[i],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = ParticleView> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Record every current position as the origin of the formation lerp.
    pub fn snapshot_formation_start(&mut self) {
        self.formation_start.copy_from_slice(&self.position);
    }

    pub fn homes(&self) -> &[Vec2] {
        &self.home
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.position
    }

    pub fn sizes(&self) -> &[f32] {
        &self.size
    }

    pub fn shades(&self) -> &[u8] {
        &self.shade
    }

    /// Split borrows for the motion rules: (home, formation_start, position, velocity).
    pub(crate) fn motion_lanes(&mut self) -> (&[Vec2], &[Vec2], &mut [Vec2], &mut [Vec2]) {
        (&self.home, &self.formation_start, &mut self.position, &mut self.velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn homes(n: usize) -> Vec<Vec2> {
        (0..n).map(|i| Vec2::new(i as f32, 2.0 * i as f32)).collect()
    }

    #[test]
    fn rebuild_creates_one_particle_per_home() {
        let mut store = ParticleStore::new();
        let mut rng = Rng::new(1);
        store.rebuild(&homes(10), Vec2::new(800.0, 600.0), &mut rng, &ParticleLook::default());
        assert_eq!(store.len(), 10);
        assert_eq!(store.homes(), &homes(10)[..]);
    }

    #[test]
    fn rebuild_discards_previous_set() {
        let mut store = ParticleStore::new();
        let mut rng = Rng::new(1);
        let look = ParticleLook::default();
        store.rebuild(&homes(10), Vec2::new(800.0, 600.0), &mut rng, &look);
        store.rebuild(&homes(3), Vec2::new(80.0, 60.0), &mut rng, &look);
        assert_eq!(store.len(), 3);
        assert_eq!(store.positions().len(), 3);
        assert_eq!(store.sizes().len(), 3);
    }

    #[test]
    fn initial_state_is_random_cloud_at_rest() {
        let mut store = ParticleStore::new();
        let mut rng = Rng::new(5);
        let canvas = Vec2::new(320.0, 240.0);
        store.rebuild(&homes(500), canvas, &mut rng, &ParticleLook::default());
        for p in store.iter() {
            assert!(p.position.x >= 0.0 && p.position.x < canvas.x);
            assert!(p.position.y >= 0.0 && p.position.y < canvas.y);
            assert_eq!(p.velocity, Vec2::ZERO);
            assert_eq!(p.formation_start, p.position);
        }
    }

    #[test]
    fn visual_attributes_within_ranges() {
        let mut store = ParticleStore::new();
        let mut rng = Rng::new(11);
        let look = ParticleLook { base_size: 2.0, base_shade: 220 };
        store.rebuild(&homes(1000), Vec2::new(100.0, 100.0), &mut rng, &look);
        for p in store.iter() {
            assert!(p.size >= 1.4 && p.size <= 2.6, "size {}", p.size);
            assert!(p.shade >= 220, "shade {}", p.shade);
        }
    }

    #[test]
    fn snapshot_copies_positions() {
        let mut store = ParticleStore::new();
        let mut rng = Rng::new(3);
        store.rebuild(&homes(4), Vec2::new(50.0, 50.0), &mut rng, &ParticleLook::default());
        if let Some(p) = store.particle_mut(2) {
            *p.position = Vec2::new(-7.0, 9.0);
        }
        store.snapshot_formation_start();
        assert_eq!(store.get(2).unwrap().formation_start, Vec2::new(-7.0, 9.0));
        assert!(store.get(4).is_none());
        assert!(store.particle_mut(4).is_none());
    }
}
