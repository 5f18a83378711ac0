//! # Timeline Editing
//!
//! Pure transformations of a single [`FrameSequence`]: reordering,
//! duplication, removal, range extraction, splitting and retiming. Every
//! operation validates all of its inputs up front, then builds and returns a
//! new sequence — the input is never touched, and no partially edited result
//! can escape on error.

use tracing::debug;

use crate::error::{Result, TimelineError};
use crate::sequence::types::FrameSequence;

/// Reorder frames according to `permutation`
///
/// `permutation` must be a true bijection over `0..frame_count`: output frame
/// `i` becomes input frame `permutation[i]`, and durations follow the same
/// mapping. Length mismatches, out-of-range indices and duplicates are all
/// rejected before anything is copied.
pub fn reorder(sequence: &FrameSequence, permutation: &[usize]) -> Result<FrameSequence> {
    let frame_count = sequence.frame_count();

    if permutation.len() != frame_count {
        return Err(TimelineError::InvalidPermutation {
            reason: format!(
                "permutation length {} does not match frame count {}",
                permutation.len(),
                frame_count
            ),
        }
        .into());
    }

    let mut seen = vec![false; frame_count];
    for &index in permutation {
        if index >= frame_count {
            return Err(TimelineError::InvalidPermutation {
                reason: format!("index {} out of range for {} frames", index, frame_count),
            }
            .into());
        }
        if seen[index] {
            return Err(TimelineError::InvalidPermutation {
                reason: format!("index {} appears more than once", index),
            }
            .into());
        }
        seen[index] = true;
    }

    debug!(frame_count, "reordering frames");

    let frames = permutation
        .iter()
        .map(|&i| sequence.frames()[i].clone())
        .collect();
    let durations = permutation
        .iter()
        .map(|&i| sequence.durations_ms()[i])
        .collect();

    FrameSequence::new(frames, durations, sequence.loop_count())
}

/// Move the frame at `from_index` to `to_index`
///
/// The frame is removed first, so positions to its right shift left before
/// reinsertion. Delegates to [`reorder`] with the equivalent permutation.
pub fn move_frame(
    sequence: &FrameSequence,
    from_index: usize,
    to_index: usize,
) -> Result<FrameSequence> {
    let frame_count = sequence.frame_count();
    check_index(from_index, frame_count)?;
    check_index(to_index, frame_count)?;

    let mut permutation: Vec<usize> = (0..frame_count).collect();
    let moved = permutation.remove(from_index);
    permutation.insert(to_index, moved);

    reorder(sequence, &permutation)
}

/// Insert `count` copies of the frame at `index` immediately after it
pub fn duplicate(sequence: &FrameSequence, index: usize, count: usize) -> Result<FrameSequence> {
    check_index(index, sequence.frame_count())?;

    if count == 0 {
        return Err(TimelineError::InvalidParameters {
            details: "duplicate count must be at least 1".to_string(),
        }
        .into());
    }

    let mut frames = Vec::with_capacity(sequence.frame_count() + count);
    let mut durations = Vec::with_capacity(sequence.frame_count() + count);

    for (i, (frame, &duration)) in sequence
        .frames()
        .iter()
        .zip(sequence.durations_ms())
        .enumerate()
    {
        frames.push(frame.clone());
        durations.push(duration);
        if i == index {
            for _ in 0..count {
                frames.push(frame.clone());
                durations.push(duration);
            }
        }
    }

    FrameSequence::new(frames, durations, sequence.loop_count())
}

/// Remove the frames at the given indices
///
/// Indices are treated as a set: order does not matter and duplicates are
/// harmless. Removing every frame is rejected.
pub fn remove(sequence: &FrameSequence, indices: &[usize]) -> Result<FrameSequence> {
    let frame_count = sequence.frame_count();

    if indices.is_empty() {
        return Err(TimelineError::InvalidParameters {
            details: "no frame indices provided for removal".to_string(),
        }
        .into());
    }

    let mut removed = vec![false; frame_count];
    for &index in indices {
        check_index(index, frame_count)?;
        removed[index] = true;
    }

    if removed.iter().all(|&r| r) {
        return Err(TimelineError::CannotRemoveAllFrames.into());
    }

    let mut frames = Vec::new();
    let mut durations = Vec::new();
    for (i, (frame, &duration)) in sequence
        .frames()
        .iter()
        .zip(sequence.durations_ms())
        .enumerate()
    {
        if !removed[i] {
            frames.push(frame.clone());
            durations.push(duration);
        }
    }

    debug!(
        removed = frame_count - frames.len(),
        remaining = frames.len(),
        "removed frames"
    );

    FrameSequence::new(frames, durations, sequence.loop_count())
}

/// Extract the inclusive frame range `[start, end]` as a new sequence
///
/// Durations and the source loop count are preserved.
pub fn extract_range(sequence: &FrameSequence, start: usize, end: usize) -> Result<FrameSequence> {
    check_range(start, end, sequence.frame_count())?;

    let frames = sequence.frames()[start..=end].to_vec();
    let durations = sequence.durations_ms()[start..=end].to_vec();

    FrameSequence::new(frames, durations, sequence.loop_count())
}

/// Remove the inclusive frame range `[start, end]`, keeping the complement
pub fn remove_range(sequence: &FrameSequence, start: usize, end: usize) -> Result<FrameSequence> {
    let frame_count = sequence.frame_count();
    check_range(start, end, frame_count)?;

    if start == 0 && end == frame_count - 1 {
        return Err(TimelineError::CannotRemoveAllFrames.into());
    }

    let mut frames = sequence.frames()[..start].to_vec();
    frames.extend_from_slice(&sequence.frames()[end + 1..]);
    let mut durations = sequence.durations_ms()[..start].to_vec();
    durations.extend_from_slice(&sequence.durations_ms()[end + 1..]);

    FrameSequence::new(frames, durations, sequence.loop_count())
}

/// Split the sequence into `[0, index)` and `[index, frame_count)`
///
/// Both halves must be non-empty, so `index` must lie strictly inside the
/// sequence.
pub fn split_at(sequence: &FrameSequence, index: usize) -> Result<(FrameSequence, FrameSequence)> {
    let frame_count = sequence.frame_count();

    if index == 0 || index >= frame_count {
        return Err(TimelineError::InvalidSplitPoint { index, frame_count }.into());
    }

    let head = FrameSequence::new(
        sequence.frames()[..index].to_vec(),
        sequence.durations_ms()[..index].to_vec(),
        sequence.loop_count(),
    )?;
    let tail = FrameSequence::new(
        sequence.frames()[index..].to_vec(),
        sequence.durations_ms()[index..].to_vec(),
        sequence.loop_count(),
    )?;

    Ok((head, tail))
}

/// Scale playback speed by `multiplier`, clamping each new duration
///
/// A multiplier above 1 speeds playback up (durations shrink); below 1 slows
/// it down. Each scaled duration is clamped into
/// `[min_duration_ms, max_duration_ms]`. Frame content and order are
/// untouched.
pub fn retime(
    sequence: &FrameSequence,
    multiplier: f64,
    min_duration_ms: u32,
    max_duration_ms: u32,
) -> Result<FrameSequence> {
    if !(multiplier > 0.0) || !multiplier.is_finite() {
        return Err(TimelineError::InvalidParameters {
            details: format!("speed multiplier must be positive and finite, got {multiplier}"),
        }
        .into());
    }

    if min_duration_ms == 0 || min_duration_ms > max_duration_ms {
        return Err(TimelineError::InvalidParameters {
            details: format!(
                "invalid duration clamp range {min_duration_ms}..={max_duration_ms}"
            ),
        }
        .into());
    }

    let durations = sequence
        .durations_ms()
        .iter()
        .map(|&d| {
            let scaled = (f64::from(d) / multiplier).round() as u32;
            scaled.clamp(min_duration_ms, max_duration_ms)
        })
        .collect();

    debug!(multiplier, "retimed sequence");

    FrameSequence::new(sequence.frames().to_vec(), durations, sequence.loop_count())
}

/// Replace the duration list wholesale
pub fn set_durations(sequence: &FrameSequence, durations_ms: &[u32]) -> Result<FrameSequence> {
    if durations_ms.len() != sequence.frame_count() {
        return Err(TimelineError::InvalidParameters {
            details: format!(
                "duration count {} does not match frame count {}",
                durations_ms.len(),
                sequence.frame_count()
            ),
        }
        .into());
    }

    if let Some(index) = durations_ms.iter().position(|&d| d == 0) {
        return Err(TimelineError::InvalidParameters {
            details: format!("duration at index {index} must be positive"),
        }
        .into());
    }

    FrameSequence::new(
        sequence.frames().to_vec(),
        durations_ms.to_vec(),
        sequence.loop_count(),
    )
}

/// Reverse playback order, keeping each frame paired with its duration
pub fn reverse(sequence: &FrameSequence) -> Result<FrameSequence> {
    let frames = sequence.frames().iter().rev().cloned().collect();
    let durations = sequence.durations_ms().iter().rev().copied().collect();

    FrameSequence::new(frames, durations, sequence.loop_count())
}

/// Keep every `n`-th frame, starting from frame 0
///
/// Useful for thinning a long capture; `n = 1` is the identity.
pub fn keep_every_nth(sequence: &FrameSequence, n: usize) -> Result<FrameSequence> {
    if n == 0 {
        return Err(TimelineError::InvalidParameters {
            details: "step must be at least 1".to_string(),
        }
        .into());
    }

    let frames = sequence.frames().iter().step_by(n).cloned().collect();
    let durations = sequence.durations_ms().iter().step_by(n).copied().collect();

    FrameSequence::new(frames, durations, sequence.loop_count())
}

fn check_index(index: usize, frame_count: usize) -> Result<()> {
    if index >= frame_count {
        return Err(TimelineError::InvalidIndex { index, frame_count }.into());
    }
    Ok(())
}

fn check_range(start: usize, end: usize, frame_count: usize) -> Result<()> {
    if start > end {
        return Err(TimelineError::InvalidParameters {
            details: format!("range start {start} is after end {end}"),
        }
        .into());
    }
    check_index(start, frame_count)?;
    check_index(end, frame_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GifweaveError;
    use crate::sequence::frame::Frame;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    fn rgb_sequence() -> FrameSequence {
        let frames = vec![
            Frame::new_filled(4, 4, RED),
            Frame::new_filled(4, 4, GREEN),
            Frame::new_filled(4, 4, BLUE),
        ];
        FrameSequence::new(frames, vec![100, 100, 100], 0).unwrap()
    }

    fn color_at(seq: &FrameSequence, index: usize) -> [u8; 4] {
        seq.frames()[index].get_pixel(0, 0)
    }

    #[test]
    fn reorder_identity_is_noop() {
        let seq = rgb_sequence();
        let out = reorder(&seq, &[0, 1, 2]).unwrap();
        assert_eq!(out, seq);
    }

    #[test]
    fn reorder_reverses_colors() {
        let seq = rgb_sequence();
        let out = reorder(&seq, &[2, 1, 0]).unwrap();
        assert_eq!(color_at(&out, 0), BLUE);
        assert_eq!(color_at(&out, 1), GREEN);
        assert_eq!(color_at(&out, 2), RED);
        assert_eq!(out.durations_ms(), &[100, 100, 100]);
    }

    #[test]
    fn reorder_rejects_wrong_length() {
        let seq = rgb_sequence();
        assert!(matches!(
            reorder(&seq, &[0, 1]),
            Err(GifweaveError::Timeline(
                TimelineError::InvalidPermutation { .. }
            ))
        ));
    }

    #[test]
    fn reorder_rejects_out_of_range_index() {
        let seq = rgb_sequence();
        assert!(reorder(&seq, &[0, 1, 3]).is_err());
    }

    #[test]
    fn reorder_rejects_duplicate_index() {
        let seq = rgb_sequence();
        assert!(reorder(&seq, &[0, 1, 1]).is_err());
    }

    #[test]
    fn move_frame_shifts_positions() {
        let seq = rgb_sequence();
        let out = move_frame(&seq, 0, 2).unwrap();
        assert_eq!(color_at(&out, 0), GREEN);
        assert_eq!(color_at(&out, 1), BLUE);
        assert_eq!(color_at(&out, 2), RED);
    }

    #[test]
    fn duplicate_inserts_copies_after_original() {
        let seq = rgb_sequence();
        let out = duplicate(&seq, 1, 2).unwrap();
        assert_eq!(out.frame_count(), 5);
        assert_eq!(color_at(&out, 0), RED);
        assert_eq!(color_at(&out, 1), GREEN);
        assert_eq!(color_at(&out, 2), GREEN);
        assert_eq!(color_at(&out, 3), GREEN);
        assert_eq!(color_at(&out, 4), BLUE);
    }

    #[test]
    fn duplicate_rejects_out_of_range_index() {
        let seq = rgb_sequence();
        assert!(matches!(
            duplicate(&seq, 3, 1),
            Err(GifweaveError::Timeline(TimelineError::InvalidIndex { .. }))
        ));
    }

    #[test]
    fn duplicate_rejects_zero_count() {
        let seq = rgb_sequence();
        assert!(duplicate(&seq, 0, 0).is_err());
    }

    #[test]
    fn remove_drops_requested_frames() {
        let seq = rgb_sequence();
        let out = remove(&seq, &[1]).unwrap();
        assert_eq!(out.frame_count(), 2);
        assert_eq!(color_at(&out, 0), RED);
        assert_eq!(color_at(&out, 1), BLUE);
    }

    #[test]
    fn remove_is_order_independent() {
        let seq = rgb_sequence();
        let a = remove(&seq, &[2, 0]).unwrap();
        let b = remove(&seq, &[0, 2]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.frame_count(), 1);
    }

    #[test]
    fn remove_all_frames_is_rejected() {
        let seq = rgb_sequence();
        assert!(matches!(
            remove(&seq, &[0, 1, 2]),
            Err(GifweaveError::Timeline(
                TimelineError::CannotRemoveAllFrames
            ))
        ));
    }

    #[test]
    fn extract_whole_range_is_identity() {
        let seq = rgb_sequence();
        let out = extract_range(&seq, 0, 2).unwrap();
        assert_eq!(out, seq);
    }

    #[test]
    fn extract_range_keeps_durations_and_loop() {
        let frames = vec![
            Frame::new_filled(4, 4, RED),
            Frame::new_filled(4, 4, GREEN),
            Frame::new_filled(4, 4, BLUE),
        ];
        let seq = FrameSequence::new(frames, vec![50, 75, 100], 3).unwrap();
        let out = extract_range(&seq, 1, 2).unwrap();
        assert_eq!(out.durations_ms(), &[75, 100]);
        assert_eq!(out.loop_count(), 3);
    }

    #[test]
    fn remove_range_keeps_complement() {
        let seq = rgb_sequence();
        let out = remove_range(&seq, 1, 1).unwrap();
        assert_eq!(out.frame_count(), 2);
        assert_eq!(color_at(&out, 0), RED);
        assert_eq!(color_at(&out, 1), BLUE);
    }

    #[test]
    fn remove_range_covering_everything_is_rejected() {
        let seq = rgb_sequence();
        assert!(matches!(
            remove_range(&seq, 0, 2),
            Err(GifweaveError::Timeline(
                TimelineError::CannotRemoveAllFrames
            ))
        ));
    }

    #[test]
    fn split_produces_two_nonempty_halves() {
        let seq = rgb_sequence();
        let (head, tail) = split_at(&seq, 1).unwrap();
        assert_eq!(head.frame_count(), 1);
        assert_eq!(tail.frame_count(), 2);
        assert_eq!(color_at(&head, 0), RED);
        assert_eq!(color_at(&tail, 0), GREEN);
    }

    #[test]
    fn split_rejects_boundary_points() {
        let seq = rgb_sequence();
        assert!(split_at(&seq, 0).is_err());
        assert!(split_at(&seq, 3).is_err());
    }

    #[test]
    fn retime_scales_and_clamps_durations() {
        let frames = vec![Frame::new_filled(2, 2, RED), Frame::new_filled(2, 2, GREEN)];
        let seq = FrameSequence::new(frames, vec![100, 400], 0).unwrap();

        // Double speed halves durations; 50 is then clamped up to 60.
        let out = retime(&seq, 2.0, 60, 500).unwrap();
        assert_eq!(out.durations_ms(), &[60, 200]);
        assert_eq!(out.frames(), seq.frames());
    }

    #[test]
    fn retime_rejects_nonpositive_multiplier() {
        let seq = rgb_sequence();
        assert!(retime(&seq, 0.0, 10, 1000).is_err());
        assert!(retime(&seq, -1.0, 10, 1000).is_err());
    }

    #[test]
    fn set_durations_replaces_wholesale() {
        let seq = rgb_sequence();
        let out = set_durations(&seq, &[10, 20, 30]).unwrap();
        assert_eq!(out.durations_ms(), &[10, 20, 30]);
    }

    #[test]
    fn set_durations_rejects_length_mismatch_and_zero() {
        let seq = rgb_sequence();
        assert!(set_durations(&seq, &[10, 20]).is_err());
        assert!(set_durations(&seq, &[10, 0, 30]).is_err());
    }

    #[test]
    fn reverse_twice_is_identity() {
        let frames = vec![
            Frame::new_filled(4, 4, RED),
            Frame::new_filled(4, 4, GREEN),
            Frame::new_filled(4, 4, BLUE),
        ];
        let seq = FrameSequence::new(frames, vec![10, 20, 30], 0).unwrap();
        let reversed = reverse(&seq).unwrap();
        assert_eq!(reversed.durations_ms(), &[30, 20, 10]);
        assert_eq!(color_at(&reversed, 0), BLUE);
        assert_eq!(reverse(&reversed).unwrap(), seq);
    }

    #[test]
    fn keep_every_nth_thins_frames() {
        let seq = rgb_sequence();
        assert_eq!(keep_every_nth(&seq, 1).unwrap(), seq);

        let out = keep_every_nth(&seq, 2).unwrap();
        assert_eq!(out.frame_count(), 2);
        assert_eq!(color_at(&out, 0), RED);
        assert_eq!(color_at(&out, 1), BLUE);

        assert!(keep_every_nth(&seq, 0).is_err());
    }
}
