//! # Sequential & Spatial Composition
//!
//! Combines several sequences into one either by playing them back to back
//! ([`concatenate`]) or by placing them side by side on a shared canvas
//! ([`stack`]). Stacking synchronizes sources of unequal length by cycling:
//! each source contributes frame `i % frame_count` to output frame `i`, so a
//! shorter animation simply repeats until the longest one finishes.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compositor::blend::blit_over;
use crate::error::{CompositeError, Result, TimelineError};
use crate::sequence::frame::{Color, Frame, TRANSPARENT};
use crate::sequence::types::FrameSequence;

/// Stacking direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Alignment along the axis perpendicular to the stacking direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Start,
    Center,
    End,
}

/// Options for [`stack`]
#[derive(Clone, Debug)]
pub struct StackOptions {
    /// Gap in pixels between adjacent sources
    pub spacing: u32,
    /// Perpendicular alignment of each source within the canvas
    pub align: Align,
    /// Fill for canvas area not covered by any source
    pub background: Color,
    /// Fixed duration applied to every output frame
    ///
    /// Source timings are deliberately not reconciled across sequences;
    /// flattening to one duration avoids undefined cross-source timing
    /// arithmetic.
    pub frame_duration_ms: u32,
}

impl Default for StackOptions {
    fn default() -> Self {
        Self {
            spacing: 0,
            align: Align::Center,
            background: TRANSPARENT,
            frame_duration_ms: 100,
        }
    }
}

/// Play the given sequences one after another
///
/// Frames and their original durations are concatenated in argument order.
/// The output loop count is the caller-supplied override (containers treat
/// `0` as infinite).
pub fn concatenate(sequences: &[FrameSequence], loop_count: u16) -> Result<FrameSequence> {
    if sequences.is_empty() {
        return Err(CompositeError::EmptyInput.into());
    }

    let total: usize = sequences.iter().map(FrameSequence::frame_count).sum();
    let mut frames = Vec::with_capacity(total);
    let mut durations = Vec::with_capacity(total);

    for sequence in sequences {
        frames.extend_from_slice(sequence.frames());
        durations.extend_from_slice(sequence.durations_ms());
    }

    debug!(
        inputs = sequences.len(),
        frames = frames.len(),
        "concatenated sequences"
    );

    FrameSequence::new(frames, durations, loop_count)
}

/// Stack sequences side by side along `axis` on a shared canvas
///
/// The output has `max(frame_count)` frames; shorter sources cycle so every
/// output frame is fully populated. Canvas extent along `axis` is the sum of
/// each source's extent plus `spacing` between neighbours; the perpendicular
/// extent is the maximum across sources.
pub fn stack(
    sequences: &[FrameSequence],
    axis: Axis,
    options: &StackOptions,
) -> Result<FrameSequence> {
    if sequences.is_empty() {
        return Err(CompositeError::EmptyInput.into());
    }

    if options.frame_duration_ms == 0 {
        return Err(TimelineError::InvalidParameters {
            details: "stack frame duration must be positive".to_string(),
        }
        .into());
    }

    let extents: Vec<(u32, u32)> = sequences
        .iter()
        .map(|s| (s.width(), s.height()))
        .collect();

    let total_spacing = options.spacing * (sequences.len() as u32 - 1);
    let (canvas_width, canvas_height) = match axis {
        Axis::Horizontal => (
            extents.iter().map(|e| e.0).sum::<u32>() + total_spacing,
            extents.iter().map(|e| e.1).max().unwrap_or(0),
        ),
        Axis::Vertical => (
            extents.iter().map(|e| e.0).max().unwrap_or(0),
            extents.iter().map(|e| e.1).sum::<u32>() + total_spacing,
        ),
    };

    let output_count = sequences
        .iter()
        .map(FrameSequence::frame_count)
        .max()
        .unwrap_or(0);

    debug!(
        canvas_width,
        canvas_height, output_count, "stacking sequences"
    );

    let mut frames = Vec::with_capacity(output_count);
    for index in 0..output_count {
        let mut canvas =
            RgbaImage::from_pixel(canvas_width, canvas_height, Rgba(options.background));

        let mut offset: u32 = 0;
        for (sequence, &(slot_w, slot_h)) in sequences.iter().zip(&extents) {
            let frame = &sequence.frames()[index % sequence.frame_count()];

            let (x, y) = match axis {
                Axis::Horizontal => (
                    offset,
                    aligned_offset(frame.height(), canvas_height, options.align),
                ),
                Axis::Vertical => (
                    aligned_offset(frame.width(), canvas_width, options.align),
                    offset,
                ),
            };
            blit_over(&mut canvas, frame.as_image(), i64::from(x), i64::from(y));

            offset += match axis {
                Axis::Horizontal => slot_w + options.spacing,
                Axis::Vertical => slot_h + options.spacing,
            };
        }

        frames.push(Frame::new(canvas));
    }

    FrameSequence::with_uniform_duration(frames, options.frame_duration_ms, 0)
}

fn aligned_offset(extent: u32, available: u32, align: Align) -> u32 {
    let slack = available.saturating_sub(extent);
    match align {
        Align::Start => 0,
        Align::Center => slack / 2,
        Align::End => slack,
    }
}
