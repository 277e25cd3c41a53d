//! Error taxonomy for configuration and per-frame failures.
//!
//! Configuration errors are fatal when a pipeline is built. Frame errors are
//! scoped to one frame: the loop driver logs them and moves on. Empty or
//! noise-only masks are not errors at all (see [`crate::blob`]).

use thiserror::Error;

/// Problems detected while validating scene parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Frame dimensions must both be positive.
    #[error("frame dimensions must be positive, got {width}x{height}")]
    ZeroDimensions { width: usize, height: usize },

    /// A class or composite was declared with an empty name.
    #[error("class names must not be empty")]
    EmptyClassName,

    /// Two classes or composites share a name.
    #[error("class `{0}` is declared more than once")]
    DuplicateClass(String),

    /// A color class needs at least one range.
    #[error("class `{0}` has no threshold ranges")]
    NoRanges(String),

    /// A range has `lower > upper` on some channel.
    #[error("class `{class}`: {channel} lower bound {lower} exceeds upper bound {upper}")]
    InvertedRange {
        class: String,
        channel: &'static str,
        lower: u8,
        upper: u8,
    },

    /// Hue bounds live in `[0, 180]`.
    #[error("class `{class}`: hue bound {value} is outside 0..=180")]
    HueOutOfRange { class: String, value: u8 },

    /// A composite, landmark role or grid setting refers to a missing class.
    #[error("{context} refers to unknown class `{name}`")]
    UnknownClass { context: String, name: String },

    /// A numeric knob is outside its valid domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ConfigError {
    pub fn unknown_class(context: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownClass {
            context: context.into(),
            name: name.into(),
        }
    }

    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Problems with a single frame or mask.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The frame does not have the configured size.
    #[error("frame is {}x{}, expected {}x{}", actual.0, actual.1, expected.0, expected.1)]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A raw buffer is too short or too long for the declared size.
    #[error("buffer size mismatch: expected {expected}, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// No masks were supplied where at least one is needed.
    #[error("no masks supplied to {0}")]
    NoMasks(&'static str),

    /// A configured class produced no mask for this frame.
    #[error("mask `{0}` is missing from the segmentation")]
    MissingMask(String),
}
