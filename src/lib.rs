//! # Gifweave
//!
//! Edit and recombine short animated frame sequences: reorder frames, retime
//! playback, extract or remove sub-ranges, and composite multiple
//! independently timed animations into one output.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gifweave::{codec, timeline};
//!
//! # fn main() -> gifweave::Result<()> {
//! let sequence = codec::decode_file("bounce.gif")?;
//!
//! // Double playback speed, keeping durations within viewer-safe bounds.
//! let faster = timeline::retime(&sequence, 2.0, 20, 10_000)?;
//!
//! codec::encode_file(&faster, &codec::EncodeOptions::default(), "bounce_fast.gif")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`sequence`] - the [`FrameSequence`] value type and pure timeline edits
//! - [`compositor`] - concatenation, spatial stacking and free layer placement
//! - [`codec`] - the container boundary (decode/encode)
//! - [`config`] - configuration management
//!
//! Every operation takes its inputs by reference and returns a freshly built
//! [`FrameSequence`]; nothing is ever edited in place, so results can be
//! chained, compared and discarded freely.

pub mod codec;
pub mod compositor;
pub mod config;
pub mod error;
pub mod sequence;

pub use sequence::{looping, timeline};

// Re-export commonly used types for convenience
pub use crate::{
    compositor::{Anchor, Layer, StackOptions},
    config::Config,
    error::{GifweaveError, Result},
    sequence::{Frame, FrameSequence, LoopBehavior},
};
