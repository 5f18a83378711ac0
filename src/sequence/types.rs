use crate::error::{Result, SequenceError};
use crate::sequence::frame::Frame;

/// The canonical representation of one animated source
///
/// An ordered sequence of `(frame, duration)` pairs plus a loop count. This
/// is the primary value type of the library: every editing and compositing
/// operation consumes sequences by reference and returns a freshly built one,
/// so multi-step pipelines stay composable and no caller ever observes a
/// sequence changing underneath it.
///
/// Invariants (enforced by [`FrameSequence::new`]):
/// - at least one frame
/// - exactly one duration per frame
/// - every duration is positive
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSequence {
    frames: Vec<Frame>,
    durations_ms: Vec<u32>,
    loop_count: u16,
}

impl FrameSequence {
    /// Create a new sequence, validating the invariants
    ///
    /// `loop_count` follows the container convention: `0` means loop forever,
    /// `n > 0` means play `n` times.
    pub fn new(frames: Vec<Frame>, durations_ms: Vec<u32>, loop_count: u16) -> Result<Self> {
        if frames.is_empty() {
            return Err(SequenceError::Empty.into());
        }

        if frames.len() != durations_ms.len() {
            return Err(SequenceError::Inconsistent {
                frame_count: frames.len(),
                duration_count: durations_ms.len(),
            }
            .into());
        }

        if let Some(index) = durations_ms.iter().position(|&d| d == 0) {
            return Err(SequenceError::NonPositiveDuration { index }.into());
        }

        Ok(Self {
            frames,
            durations_ms,
            loop_count,
        })
    }

    /// Create a sequence where every frame shares one duration
    pub fn with_uniform_duration(
        frames: Vec<Frame>,
        duration_ms: u32,
        loop_count: u16,
    ) -> Result<Self> {
        let durations = vec![duration_ms; frames.len()];
        Self::new(frames, durations, loop_count)
    }

    /// Number of frames in the sequence
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// All frames in playback order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Per-frame durations in milliseconds, aligned with [`frames`](Self::frames)
    pub fn durations_ms(&self) -> &[u32] {
        &self.durations_ms
    }

    /// The frame at `index`, if in range
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Loop count metadata (0 = infinite)
    pub fn loop_count(&self) -> u16 {
        self.loop_count
    }

    /// Canvas width: the maximum frame width
    ///
    /// Computed over all frames rather than taken from the first one, since a
    /// malformed source may carry frames of drifting sizes.
    pub fn width(&self) -> u32 {
        self.frames.iter().map(Frame::width).max().unwrap_or(0)
    }

    /// Canvas height: the maximum frame height
    pub fn height(&self) -> u32 {
        self.frames.iter().map(Frame::height).max().unwrap_or(0)
    }

    /// Total playback time of one loop in milliseconds
    pub fn total_duration_ms(&self) -> u64 {
        self.durations_ms.iter().map(|&d| u64::from(d)).sum()
    }

    /// Average frame duration in milliseconds
    pub fn average_duration_ms(&self) -> f64 {
        self.total_duration_ms() as f64 / self.frame_count() as f64
    }

    /// Whether the sequence animates (more than one frame)
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    /// Decompose into frames, durations and loop count
    pub fn into_parts(self) -> (Vec<Frame>, Vec<u32>, u16) {
        (self.frames, self.durations_ms, self.loop_count)
    }
}
