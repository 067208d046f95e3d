// extensions/mod.rs
//
// Pure math helpers with no dependency on the particle store.

pub mod easing;

pub use easing::{Easing, lerp_vec2};
