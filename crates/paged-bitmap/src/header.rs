//! # The record header
//!
//! Every record starts with the image width and height, each as a
//! little-endian `u16`.

use std::convert::TryFrom;

use nom::{number::complete::le_u16, IResult};

use crate::{
    error::{Axis, RangeError},
    page::page_count,
};

/// Size of the encoded header in bytes
pub const HEADER_LEN: usize = 4;

/// Height of a page in pixels
pub const PAGE_HEIGHT: u32 = 8;

/// The dimensions of a packed bitmap
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Header {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

fn field(axis: Axis, value: i64) -> Result<u16, RangeError> {
    u16::try_from(value).map_err(|_| RangeError { axis, value })
}

impl Header {
    /// Check that both dimensions fit into the header
    pub fn new(width: i64, height: i64) -> Result<Self, RangeError> {
        Ok(Self {
            width: field(Axis::Width, width)?,
            height: field(Axis::Height, height)?,
        })
    }

    /// Encode the header
    pub fn to_bytes(self) -> [u8; HEADER_LEN] {
        let [w0, w1] = self.width.to_le_bytes();
        let [h0, h1] = self.height.to_le_bytes();
        [w0, w1, h0, h1]
    }

    /// Number of pages, i.e. `ceil(height / 8)`
    pub fn page_count(self) -> usize {
        page_count(u32::from(self.height))
    }

    /// Number of packed bytes that follow this header
    pub fn packed_len(self) -> usize {
        self.page_count() * usize::from(self.width)
    }

    /// Parse a header from the start of a record
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, width) = le_u16(input)?;
        let (input, height) = le_u16(input)?;
        Ok((input, Self { width, height }))
    }
}

/// Encode width and height as a 4-byte little-endian record header
pub fn encode_header(width: i64, height: i64) -> Result<[u8; HEADER_LEN], RangeError> {
    Header::new(width, height).map(Header::to_bytes)
}
