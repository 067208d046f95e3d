use bytemuck::{Pod, Zeroable};

/// Per-particle render data for hosts that draw from shared memory.
/// 4 floats = 16 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DotInstance {
    /// X position in canvas pixels.
    pub x: f32,
    /// Y position in canvas pixels.
    pub y: f32,
    /// Disc radius in pixels.
    pub radius: f32,
    /// Gray level, 0.0–255.0.
    pub shade: f32,
}

impl DotInstance {
    pub const FLOATS: usize = 4;
}

/// All dots of the current frame, in particle order.
pub struct DotBuffer {
    instances: Vec<DotInstance>,
}

impl DotBuffer {
    pub fn new() -> Self {
        Self::with_capacity(2500)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: DotInstance) {
        self.instances.push(instance);
    }

    pub fn instances(&self) -> &[DotInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for shared-memory reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for DotBuffer {
    fn default() -> Self {
        Self::new()
    }
}
