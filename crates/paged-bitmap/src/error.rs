//! # Error types
use std::{fmt, path::PathBuf};

use thiserror::Error;

/// The image handed to the packer is malformed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidImageError {
    /// The sample buffer does not match the dimensions
    #[error("Image is {width}x{height} but has {len} samples")]
    SizeMismatch {
        /// Claimed width
        width: u32,
        /// Claimed height
        height: u32,
        /// Actual number of samples
        len: usize,
    },
    /// A row is longer or shorter than the first one
    #[error("Row {row} has {actual} samples, expected {expected}")]
    RaggedRows {
        /// Index of the offending row
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of the offending row
        actual: usize,
    },
    /// A sample does not fit into 8 bits
    #[error("Sample at ({x}, {y}) is {value}, which is not an 8-bit value")]
    SampleOutOfRange {
        /// Column
        x: usize,
        /// Row
        y: usize,
        /// The offending value
        value: i64,
    },
    /// The image is too large to be addressed
    #[error("Image dimensions {width}x{height} are too large")]
    TooLarge {
        /// Number of columns
        width: usize,
        /// Number of rows
        height: usize,
    },
}

/// One of the two image dimensions
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal
    Width,
    /// Vertical
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => f.write_str("width"),
            Self::Height => f.write_str("height"),
        }
    }
}

/// A dimension does not fit into the 16-bit header field
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
#[error("Image {axis} {value} is outside of 0..=65535")]
pub struct RangeError {
    /// The dimension that is out of range
    pub axis: Axis,
    /// The value that was requested
    pub value: i64,
}

/// A setting could not be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The threshold is not a number in 0..=255
    #[error("Invalid threshold `{0}`, expected a number in 0..=255")]
    InvalidThreshold(String),
    /// The line width is not a positive number
    #[error("Invalid number of values per line `{0}`, expected a positive number")]
    InvalidValuesPerLine(String),
    /// Multiple outputs were requested, but the output is not a directory
    #[error("Output `{}` must be a directory when converting a directory", .0.display())]
    OutputNotADirectory(PathBuf),
    /// Two inputs of a batch would be written to the same file
    #[error(
        "`{}` and `{}` would both be written to `{}`",
        .first.display(),
        .second.display(),
        .output.display()
    )]
    DuplicateOutput {
        /// The shared output path
        output: PathBuf,
        /// The input that claimed the output first
        first: PathBuf,
        /// The conflicting input
        second: PathBuf,
    },
}

/// Any error from this crate
#[derive(Debug, Error)]
pub enum Error {
    /// See [`InvalidImageError`]
    #[error(transparent)]
    InvalidImage(#[from] InvalidImageError),
    /// See [`RangeError`]
    #[error(transparent)]
    Range(#[from] RangeError),
    /// See [`ConfigurationError`]
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// Writing the text output failed
    #[error("Failed to format output")]
    Format(#[from] fmt::Error),
}
