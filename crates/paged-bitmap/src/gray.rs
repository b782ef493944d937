//! # Greyscale input grid
//!
//! The packer only ever sees a [`GrayGrid`], which is validated when it is
//! created. Decoding image files is left to the caller (or to the `image`
//! feature of this crate).

use std::convert::TryFrom;

#[cfg(feature = "image")]
use image::{DynamicImage, GrayImage};

use crate::error::InvalidImageError;

/// An immutable, row-major grid of 8-bit brightness samples
///
/// The origin is the top-left corner. A grid with a width or height of zero
/// is valid and contains no samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayGrid {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

fn dims(width: usize, height: usize) -> Result<(u32, u32), InvalidImageError> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(InvalidImageError::TooLarge { width, height }),
    }
}

impl GrayGrid {
    /// Create a grid from a flat, row-major sample buffer
    pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, InvalidImageError> {
        let expected = (width as usize).checked_mul(height as usize);
        if expected != Some(samples.len()) {
            return Err(InvalidImageError::SizeMismatch {
                width,
                height,
                len: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Create a grid from a list of rows
    ///
    /// All rows need to have the same length as the first one.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, InvalidImageError> {
        let expected = rows.first().map_or(0, |r| r.as_ref().len());
        let mut samples = Vec::with_capacity(expected * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            if line.len() != expected {
                return Err(InvalidImageError::RaggedRows {
                    row,
                    expected,
                    actual: line.len(),
                });
            }
            samples.extend_from_slice(line);
        }
        let (width, height) = dims(expected, rows.len())?;
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Create a grid from rows of wider integers, checking that every
    /// sample is in `0..=255`
    pub fn from_wide_rows<T, R>(rows: &[R]) -> Result<Self, InvalidImageError>
    where
        T: Copy + Into<i64>,
        R: AsRef<[T]>,
    {
        let expected = rows.first().map_or(0, |r| r.as_ref().len());
        let mut samples = Vec::with_capacity(expected * rows.len());
        for (y, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            if line.len() != expected {
                return Err(InvalidImageError::RaggedRows {
                    row: y,
                    expected,
                    actual: line.len(),
                });
            }
            for (x, value) in line.iter().map(|&v| v.into()).enumerate() {
                let sample = u8::try_from(value)
                    .map_err(|_| InvalidImageError::SampleOutOfRange { x, y, value })?;
                samples.push(sample);
            }
        }
        let (width, height) = dims(expected, rows.len())?;
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Number of columns
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the grid contains no samples at all
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get the sample at column `x` in row `y`
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.samples.get(index).copied()
    }

    /// Get a single row of samples
    ///
    /// # Panics
    ///
    /// Panics if `y` is not less than the height
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row {} out of bounds", y);
        let w = self.width as usize;
        let start = y as usize * w;
        &self.samples[start..start + w]
    }

    /// The flat, row-major sample buffer
    pub fn as_raw(&self) -> &[u8] {
        &self.samples
    }
}

#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
impl From<GrayImage> for GrayGrid {
    fn from(image: GrayImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            samples: image.into_raw(),
        }
    }
}

#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
impl From<&DynamicImage> for GrayGrid {
    /// Convert any decoded image to its luma channel
    fn from(image: &DynamicImage) -> Self {
        Self::from(image.to_luma8())
    }
}
