//! # Compositor
//!
//! Combines two or more frame sequences into one output sequence via three
//! strategies: sequential concatenation, spatial stacking, and free
//! multi-layer placement with independent per-layer cycling.

pub mod blend;
pub mod layers;
pub mod stack;

pub use layers::{compose_layers, Anchor, Layer};
pub use stack::{concatenate, stack, Align, Axis, StackOptions};
