//! # Frame Sequence Model
//!
//! The in-memory model for an animated raster sequence and the pure
//! timeline-editing operations over it.

pub mod frame;
pub mod looping;
pub mod timeline;
pub mod types;

pub use frame::{Color, Frame, TRANSPARENT};
pub use looping::LoopBehavior;
pub use types::FrameSequence;
