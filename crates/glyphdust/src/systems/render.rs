use crate::core::store::ParticleStore;
use crate::renderer::instance::{DotBuffer, DotInstance};
use crate::renderer::traits::Painter;

/// Build the dot buffer from the particle store.
pub fn build_dot_buffer(store: &ParticleStore, buffer: &mut DotBuffer) {
    buffer.clear();
    let lanes = store.positions().iter().zip(store.sizes()).zip(store.shades());
    for ((pos, &radius), &shade) in lanes {
        buffer.push(DotInstance {
            x: pos.x,
            y: pos.y,
            radius,
            shade: shade as f32,
        });
    }
}

/// Issue one filled disc per particle.
pub fn paint_particles<P: Painter + ?Sized>(store: &ParticleStore, painter: &mut P) {
    let lanes = store.positions().iter().zip(store.sizes()).zip(store.shades());
    for ((pos, &radius), &shade) in lanes {
        painter.fill_disc(pos.x, pos.y, radius, shade);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::Rng;
    use crate::core::store::ParticleLook;
    use crate::renderer::traits::{DrawCommand, DrawList};
    use glam::Vec2;

    fn store(n: usize) -> ParticleStore {
        let homes: Vec<Vec2> = (0..n).map(|i| Vec2::new(i as f32, 0.0)).collect();
        let mut store = ParticleStore::new();
        store.rebuild(&homes, Vec2::new(64.0, 64.0), &mut Rng::new(12), &ParticleLook::default());
        store
    }

    #[test]
    fn dot_buffer_mirrors_store() {
        let store = store(5);
        let mut buffer = DotBuffer::new();
        build_dot_buffer(&store, &mut buffer);
        assert_eq!(buffer.instance_count(), 5);
        for (dot, p) in buffer.instances().iter().zip(store.iter()) {
            assert_eq!(dot.x, p.position.x);
            assert_eq!(dot.y, p.position.y);
            assert_eq!(dot.radius, p.size);
            assert_eq!(dot.shade, p.shade as f32);
        }
    }

    #[test]
    fn rebuilding_buffer_replaces_contents() {
        let mut buffer = DotBuffer::new();
        build_dot_buffer(&store(5), &mut buffer);
        build_dot_buffer(&store(2), &mut buffer);
        assert_eq!(buffer.instance_count(), 2);
    }

    #[test]
    fn paints_one_disc_per_particle() {
        let store = store(3);
        let mut list = DrawList::new();
        paint_particles(&store, &mut list);
        assert_eq!(list.disc_count(), 3);
        let first = store.get(0).unwrap();
        assert_eq!(
            list.commands[0],
            DrawCommand::Disc {
                x: first.position.x,
                y: first.position.y,
                radius: first.size,
                shade: first.shade,
            }
        );
    }
}
