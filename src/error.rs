use thiserror::Error;

/// Main error type for the gifweave library
#[derive(Error, Debug)]
pub enum GifweaveError {
    #[error("Sequence error: {0}")]
    Sequence(#[from] SequenceError),

    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),

    #[error("Composite error: {0}")]
    Composite(#[from] CompositeError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised when a `FrameSequence` would violate its own invariants
#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("Sequence must contain at least one frame")]
    Empty,

    #[error("Inconsistent sequence: {frame_count} frames but {duration_count} durations")]
    Inconsistent {
        frame_count: usize,
        duration_count: usize,
    },

    #[error("Frame duration at index {index} must be positive")]
    NonPositiveDuration { index: usize },
}

/// Timeline editing errors
#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("Invalid permutation: {reason}")]
    InvalidPermutation { reason: String },

    #[error("Frame index {index} out of range (frame count {frame_count})")]
    InvalidIndex { index: usize, frame_count: usize },

    #[error("Invalid split point {index} for {frame_count} frames")]
    InvalidSplitPoint { index: usize, frame_count: usize },

    #[error("Operation would remove all frames")]
    CannotRemoveAllFrames,

    #[error("Invalid parameters: {details}")]
    InvalidParameters { details: String },
}

/// Compositor errors
#[derive(Error, Debug)]
pub enum CompositeError {
    #[error("No input sequences or layers provided")]
    EmptyInput,
}

/// Codec boundary errors
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to decode animation: {reason}")]
    Decode { reason: String },

    #[error("Failed to encode animation: {reason}")]
    Encode { reason: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using GifweaveError
pub type Result<T> = std::result::Result<T, GifweaveError>;
