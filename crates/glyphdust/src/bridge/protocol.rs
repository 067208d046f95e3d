/// Shared frame buffer layout.
/// Must stay in sync with the host-side reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 12 floats]
/// [Dots: max_dots × 4 floats]
/// ```
///
/// The header is rewritten after every accepted frame. Only the first
/// `dot_count` dot slots hold live data.

use crate::api::config::SwarmConfig;
use crate::api::types::AnimationState;
use crate::renderer::instance::DotInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_STATE: usize = 2;
pub const HEADER_DOT_COUNT: usize = 3;
pub const HEADER_MAX_DOTS: usize = 4;
pub const HEADER_CAPTION_OPACITY: usize = 5;
pub const HEADER_START_VISIBLE: usize = 6;
pub const HEADER_CANVAS_WIDTH: usize = 7;
pub const HEADER_CANVAS_HEIGHT: usize = 8;
pub const HEADER_READY: usize = 9;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per dot: x, y, radius, shade (wire format, fixed).
pub const DOT_FLOATS: usize = DotInstance::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum dots per frame.
    pub max_dots: usize,
    /// Size of the dot section in floats.
    pub dot_data_floats: usize,
    /// Offset (in floats) where dot data begins.
    pub dot_data_offset: usize,
    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_dots: usize) -> Self {
        let dot_data_floats = max_dots * DOT_FLOATS;
        let dot_data_offset = HEADER_FLOATS;
        let buffer_total_floats = dot_data_offset + dot_data_floats;
        Self {
            max_dots,
            dot_data_floats,
            dot_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Capacity follows the particle target.
    pub fn from_config(config: &SwarmConfig) -> Self {
        Self::new(config.target_particles)
    }
}

/// Per-frame values carried in the header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameHeader {
    pub frame_counter: u32,
    pub state: AnimationState,
    pub dot_count: u32,
    pub caption_opacity: f32,
    pub start_visible: bool,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub ready: bool,
}

fn flag(b: bool) -> f32 {
    if b { 1.0 } else { 0.0 }
}

/// Write header and dots into `out`, resizing it to the layout's total size.
/// Dots beyond `max_dots` are dropped; the header records what was written.
pub fn write_frame(layout: &ProtocolLayout, header: &FrameHeader, dots: &[DotInstance], out: &mut Vec<f32>) {
    out.resize(layout.buffer_total_floats, 0.0);

    let written = dots.len().min(layout.max_dots);
    out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    out[HEADER_FRAME_COUNTER] = header.frame_counter as f32;
    out[HEADER_STATE] = header.state.code() as f32;
    out[HEADER_DOT_COUNT] = written as f32;
    out[HEADER_MAX_DOTS] = layout.max_dots as f32;
    out[HEADER_CAPTION_OPACITY] = header.caption_opacity;
    out[HEADER_START_VISIBLE] = flag(header.start_visible);
    out[HEADER_CANVAS_WIDTH] = header.canvas_width;
    out[HEADER_CANVAS_HEIGHT] = header.canvas_height;
    out[HEADER_READY] = flag(header.ready);

    let floats: &[f32] = bytemuck::cast_slice(&dots[..written]);
    let start = layout.dot_data_offset;
    out[start..start + floats.len()].copy_from_slice(floats);
}

/// Decode a header written by [`write_frame`]. `None` on a short buffer or unknown state.
pub fn read_header(buf: &[f32]) -> Option<FrameHeader> {
    if buf.len() < HEADER_FLOATS {
        return None;
    }
    let state = match buf[HEADER_STATE] as u32 {
        0 => AnimationState::Random,
        1 => AnimationState::Forming,
        2 => AnimationState::Formed,
        _ => return None,
    };
    Some(FrameHeader {
        frame_counter: buf[HEADER_FRAME_COUNTER] as u32,
        state,
        dot_count: buf[HEADER_DOT_COUNT] as u32,
        caption_opacity: buf[HEADER_CAPTION_OPACITY],
        start_visible: buf[HEADER_START_VISIBLE] != 0.0,
        canvas_width: buf[HEADER_CANVAS_WIDTH],
        canvas_height: buf[HEADER_CANVAS_HEIGHT],
        ready: buf[HEADER_READY] != 0.0,
    })
}
