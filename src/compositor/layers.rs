//! # Free Multi-Layer Placement
//!
//! Composites independently timed sequences at arbitrary canvas positions.
//! This is the synchronization-critical path: the canvas bounding box is
//! computed once over every frame of every layer, the logical frame count is
//! the maximum across layers, and each output frame paints every layer's
//! cycled frame in layer order with straight alpha-over.

use rayon::prelude::*;
use tracing::debug;

use crate::compositor::blend::blit_over;
use crate::error::{CompositeError, Result};
use crate::sequence::frame::Frame;
use crate::sequence::types::FrameSequence;

/// A sequence pinned to a fixed position on the shared output canvas
///
/// Layer order is paint order: later layers paint over earlier ones.
#[derive(Clone, Debug)]
pub struct Layer {
    pub sequence: FrameSequence,
    /// Top-left offset on the output canvas; may be negative, in which case
    /// the off-canvas part is clipped
    pub position: (i64, i64),
}

impl Layer {
    pub fn new(sequence: FrameSequence, position: (i64, i64)) -> Self {
        Self { sequence, position }
    }

    /// Place a layer by resolving a click point against an anchor mode
    pub fn anchored(sequence: FrameSequence, anchor: Anchor, click: (i64, i64)) -> Self {
        let dims = (sequence.width(), sequence.height());
        let position = anchor.resolve(click, dims);
        Self { sequence, position }
    }
}

/// How a click point maps to a layer's stored top-left position
///
/// The nine directional modes treat the click as the corresponding point of
/// the layer's current frame; `Custom` passes the coordinates through
/// unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    Custom,
}

impl Anchor {
    /// Resolve a click point into a top-left position for a frame of the
    /// given dimensions
    pub fn resolve(self, click: (i64, i64), dims: (u32, u32)) -> (i64, i64) {
        let (cx, cy) = click;
        let (w, h) = (i64::from(dims.0), i64::from(dims.1));

        let x = match self {
            Anchor::TopLeft | Anchor::CenterLeft | Anchor::BottomLeft | Anchor::Custom => cx,
            Anchor::TopCenter | Anchor::Center | Anchor::BottomCenter => cx - w / 2,
            Anchor::TopRight | Anchor::CenterRight | Anchor::BottomRight => cx - w,
        };
        let y = match self {
            Anchor::TopLeft | Anchor::TopCenter | Anchor::TopRight | Anchor::Custom => cy,
            Anchor::CenterLeft | Anchor::Center | Anchor::CenterRight => cy - h / 2,
            Anchor::BottomLeft | Anchor::BottomCenter | Anchor::BottomRight => cy - h,
        };

        (x, y)
    }
}

/// Composite the layers into a single sequence
///
/// The output has `max(frame_count)` logical frames; each layer contributes
/// its frame `i % frame_count` to output frame `i`, painted in layer order
/// onto a transparent canvas sized up front to hold every frame of every
/// layer at its position.
///
/// Each output frame's duration is the maximum of the contributing layers'
/// current-frame durations: the frame stays up until the slowest layer is due
/// to advance. This is independent of layer order, unlike keying the timing
/// off whichever layer happens to paint last.
pub fn compose_layers(layers: &[Layer]) -> Result<FrameSequence> {
    if layers.is_empty() {
        return Err(CompositeError::EmptyInput.into());
    }

    let (canvas_width, canvas_height) = canvas_bounds(layers);
    let output_count = layers
        .iter()
        .map(|l| l.sequence.frame_count())
        .max()
        .unwrap_or(0);

    debug!(
        layers = layers.len(),
        canvas_width, canvas_height, output_count, "compositing layers"
    );

    // Output frames are independent of each other; render in parallel and
    // join by index.
    let rendered: Vec<(Frame, u32)> = (0..output_count)
        .into_par_iter()
        .map(|index| render_output_frame(layers, index, canvas_width, canvas_height))
        .collect();

    let (frames, durations): (Vec<Frame>, Vec<u32>) = rendered.into_iter().unzip();
    FrameSequence::new(frames, durations, 0)
}

/// Bounding box over every frame of every layer at its fixed position
///
/// Frame dimensions are not guaranteed uniform within a layer, so every frame
/// is considered. Extent left of or above the origin is clipped and does not
/// grow the canvas; the result is floored at 1×1.
pub fn canvas_bounds(layers: &[Layer]) -> (u32, u32) {
    let mut right: i64 = 1;
    let mut bottom: i64 = 1;

    for layer in layers {
        let (x, y) = layer.position;
        for frame in layer.sequence.frames() {
            right = right.max(x + i64::from(frame.width()));
            bottom = bottom.max(y + i64::from(frame.height()));
        }
    }

    (right as u32, bottom as u32)
}

fn render_output_frame(
    layers: &[Layer],
    index: usize,
    canvas_width: u32,
    canvas_height: u32,
) -> (Frame, u32) {
    let mut canvas = Frame::new_transparent(canvas_width, canvas_height).into_image();
    let mut duration_ms = 0u32;

    for layer in layers {
        let cycle = index % layer.sequence.frame_count();
        let frame = &layer.sequence.frames()[cycle];
        blit_over(&mut canvas, frame.as_image(), layer.position.0, layer.position.1);
        duration_ms = duration_ms.max(layer.sequence.durations_ms()[cycle]);
    }

    (Frame::new(canvas), duration_ms)
}
