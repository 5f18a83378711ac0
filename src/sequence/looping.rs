//! # Loop Settings
//!
//! Reads and rewrites the loop-count metadata of a [`FrameSequence`]. The
//! count follows the container convention: `0` loops forever, `n > 0` plays
//! the animation `n` times.

use crate::error::Result;
use crate::sequence::types::FrameSequence;

/// Playback behavior implied by a loop count
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopBehavior {
    /// Loop forever (count 0)
    Infinite,
    /// Play exactly once (count 1)
    PlayOnce,
    /// Play the given number of times (count > 1)
    PlayTimes(u16),
}

/// Return a copy of the sequence with the given loop count
pub fn set_loop_count(sequence: &FrameSequence, loop_count: u16) -> Result<FrameSequence> {
    FrameSequence::new(
        sequence.frames().to_vec(),
        sequence.durations_ms().to_vec(),
        loop_count,
    )
}

/// Return a copy of the sequence that loops forever
pub fn set_infinite(sequence: &FrameSequence) -> Result<FrameSequence> {
    set_loop_count(sequence, 0)
}

/// Return a copy of the sequence that plays exactly once
pub fn set_play_once(sequence: &FrameSequence) -> Result<FrameSequence> {
    set_loop_count(sequence, 1)
}

/// Map the sequence's loop count to its playback behavior
pub fn classify(sequence: &FrameSequence) -> LoopBehavior {
    match sequence.loop_count() {
        0 => LoopBehavior::Infinite,
        1 => LoopBehavior::PlayOnce,
        n => LoopBehavior::PlayTimes(n),
    }
}
