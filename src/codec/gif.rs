//! GIF container boundary
//!
//! Decoding composites every container frame onto the logical screen via the
//! `image` animation decoder, so disposal methods and partial frames are
//! already resolved by the time a [`FrameSequence`] exists. Encoding goes
//! through the `gif` crate directly because it exposes the repeat metadata
//! the animation model needs.

use std::io::Cursor;

use gif::{DisposalMethod, Repeat};
use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;
use tracing::{debug, warn};

use crate::error::{CodecError, Result};
use crate::sequence::frame::Frame;
use crate::sequence::types::FrameSequence;

/// Delay reported as zero (or missing) in the container maps to this, the
/// de-facto viewer default.
pub const DEFAULT_FRAME_DURATION_MS: u32 = 100;

/// Floor applied to durations before encoding. Most viewers silently coerce
/// anything shorter upward; applying the same floor here keeps round-trips
/// predictable instead of leaving the rewrite to the container.
pub const MIN_ENCODE_DURATION_MS: u32 = 20;

/// Knobs for [`encode`]
///
/// None of these affect the correctness contract — frame count, order and
/// (floored) durations are always preserved.
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    /// Quantization speed/quality trade-off, 1 (best) to 30 (fastest)
    pub speed: i32,
    /// Duration floor in milliseconds, see [`MIN_ENCODE_DURATION_MS`]
    pub min_duration_ms: u32,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            speed: 10,
            min_duration_ms: MIN_ENCODE_DURATION_MS,
        }
    }
}

/// Decode a GIF container into a frame sequence
pub fn decode(bytes: &[u8]) -> Result<FrameSequence> {
    let decoder = GifDecoder::new(Cursor::new(bytes)).map_err(|e| CodecError::Decode {
        reason: e.to_string(),
    })?;

    let mut frames = Vec::new();
    let mut durations = Vec::new();

    for frame_result in decoder.into_frames() {
        let frame = frame_result.map_err(|e| CodecError::Decode {
            reason: e.to_string(),
        })?;

        let (numer, denom) = frame.delay().numer_denom_ms();
        let duration_ms = if denom > 0 { numer / denom } else { 0 };
        // A zero delay means "use the viewer default".
        let duration_ms = if duration_ms == 0 {
            DEFAULT_FRAME_DURATION_MS
        } else {
            duration_ms
        };

        frames.push(Frame::new(frame.into_buffer()));
        durations.push(duration_ms);
    }

    if frames.is_empty() {
        return Err(CodecError::Decode {
            reason: "container holds no frames".to_string(),
        }
        .into());
    }

    let loop_count = read_loop_count(bytes);

    debug!(
        frames = frames.len(),
        loop_count, "decoded animation"
    );

    FrameSequence::new(frames, durations, loop_count)
}

/// Encode a frame sequence into GIF container bytes
///
/// Frames smaller than the sequence canvas are padded onto a transparent
/// canvas so every container frame shares one screen size. Durations below
/// the configured floor are raised to it before the 10 ms container
/// granularity is applied.
pub fn encode(sequence: &FrameSequence, options: &EncodeOptions) -> Result<Vec<u8>> {
    let width = sequence.width();
    let height = sequence.height();

    if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
        return Err(CodecError::Encode {
            reason: format!("canvas {width}x{height} exceeds the container's 16-bit dimensions"),
        }
        .into());
    }

    let speed = options.speed.clamp(1, 30);
    let mut bytes = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut bytes, width as u16, height as u16, &[])
            .map_err(|e| CodecError::Encode {
                reason: e.to_string(),
            })?;

        let repeat = match sequence.loop_count() {
            0 => Repeat::Infinite,
            n => Repeat::Finite(n),
        };
        encoder.set_repeat(repeat).map_err(|e| CodecError::Encode {
            reason: e.to_string(),
        })?;

        for (frame, &duration_ms) in sequence.frames().iter().zip(sequence.durations_ms()) {
            let mut rgba = pad_to_canvas(frame, width, height);

            let mut out_frame = gif::Frame::from_rgba_speed(width as u16, height as u16, &mut rgba, speed);
            let floored = duration_ms.max(options.min_duration_ms);
            if floored != duration_ms {
                warn!(duration_ms, floored, "frame duration raised to encode floor");
            }
            // Container delay granularity is 10 ms.
            out_frame.delay = ((floored + 5) / 10).min(u32::from(u16::MAX)) as u16;
            out_frame.dispose = DisposalMethod::Background;

            encoder.write_frame(&out_frame).map_err(|e| CodecError::Encode {
                reason: e.to_string(),
            })?;
        }
    }

    debug!(
        frames = sequence.frame_count(),
        bytes = bytes.len(),
        "encoded animation"
    );

    Ok(bytes)
}

/// Read the NETSCAPE repeat field via the low-level decoder
///
/// The animation decoder used by [`decode`] does not surface loop metadata,
/// so a second lightweight pass fetches it. Absent or unreadable metadata
/// falls back to 0 (loop forever), the container default.
fn read_loop_count(bytes: &[u8]) -> u16 {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);

    match options.read_info(Cursor::new(bytes)) {
        Ok(decoder) => match decoder.repeat() {
            Repeat::Infinite => 0,
            Repeat::Finite(n) => n,
        },
        Err(e) => {
            warn!(error = %e, "could not read loop metadata, assuming infinite");
            0
        }
    }
}

fn pad_to_canvas(frame: &Frame, width: u32, height: u32) -> Vec<u8> {
    if frame.width() == width && frame.height() == height {
        return frame.to_rgba_bytes();
    }

    let mut canvas = Frame::new_transparent(width, height).into_image();
    crate::compositor::blend::blit_over(&mut canvas, frame.as_image(), 0, 0);
    canvas.into_raw()
}
