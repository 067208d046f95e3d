pub mod motion;
pub mod render;
pub mod sampler;
