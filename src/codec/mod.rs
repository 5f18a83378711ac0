//! # Codec Boundary
//!
//! Decode/encode between container bytes and [`FrameSequence`] values. The
//! rest of the library is container-agnostic; only this module knows about
//! the on-disk format.

pub mod gif;

use std::path::Path;

use crate::error::Result;
use crate::sequence::types::FrameSequence;

pub use self::gif::{decode, encode, EncodeOptions, DEFAULT_FRAME_DURATION_MS, MIN_ENCODE_DURATION_MS};

/// Decode an animation from a file on disk
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<FrameSequence> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

/// Encode a sequence and write it to a file on disk
pub fn encode_file<P: AsRef<Path>>(
    sequence: &FrameSequence,
    options: &EncodeOptions,
    path: P,
) -> Result<()> {
    let bytes = encode(sequence, options)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::frame::Frame;
    use tempfile::tempdir;

    #[test]
    fn file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.gif");

        let frames = vec![
            Frame::new_filled(4, 4, [255, 0, 0, 255]),
            Frame::new_filled(4, 4, [0, 0, 255, 255]),
        ];
        let seq = FrameSequence::with_uniform_duration(frames, 100, 0).unwrap();

        encode_file(&seq, &EncodeOptions::default(), &path).unwrap();
        let decoded = decode_file(&path).unwrap();
        assert_eq!(decoded.frame_count(), 2);
        assert_eq!(decoded.durations_ms(), &[100, 100]);
    }
}
