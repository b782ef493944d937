//! # Page packing
//!
//! A page is a band of 8 rows. Each column of a page is packed into a single
//! byte where bit 0 (LSB) is the topmost row of the page and bit 7 is the
//! bottom row. This is the memory layout of SSD1306-style display RAM, so
//! the order of the bytes and bits here must not change.

use std::{fmt, str::FromStr};

#[cfg(feature = "image")]
use image::{GrayImage, Luma};
use log::debug;
use nom::{bytes::complete::take, IResult};

use crate::{
    error::{ConfigurationError, RangeError},
    gray::GrayGrid,
    header::{Header, HEADER_LEN, PAGE_HEIGHT},
    util::drawing::BoxDrawing,
};

/// Brightness cutoff, a pixel is on iff `sample >= threshold`
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Threshold(pub u8);

impl Threshold {
    /// Check whether a sample counts as ink
    pub fn is_on(self, sample: u8) -> bool {
        sample >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold(128)
    }
}

impl FromStr for Threshold {
    type Err = ConfigurationError;

    fn from_str(val: &str) -> Result<Self, Self::Err> {
        val.trim()
            .parse::<u8>()
            .map(Threshold)
            .map_err(|_| ConfigurationError::InvalidThreshold(val.to_owned()))
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of pages needed for `height` rows
pub fn page_count(height: u32) -> usize {
    let page_height = PAGE_HEIGHT as usize;
    (height as usize + page_height - 1) / page_height
}

/// Threshold and pack a grid, page by page and column by column
///
/// The result has `ceil(height / 8) * width` bytes. Rows of the last page
/// that are below the image are always off.
pub fn pack_pages(grid: &GrayGrid, threshold: Threshold) -> Vec<u8> {
    let width = grid.width() as usize;
    let height = grid.height() as usize;
    let samples = grid.as_raw();
    let pages = page_count(grid.height());

    let mut out = Vec::with_capacity(pages * width);
    for page in 0..pages {
        let top = page * PAGE_HEIGHT as usize;
        let rows = (height - top).min(PAGE_HEIGHT as usize);
        for col in 0..width {
            let mut byte = 0u8;
            for bit in 0..rows {
                if threshold.is_on(samples[(top + bit) * width + col]) {
                    byte |= 1 << bit;
                }
            }
            out.push(byte);
        }
    }
    out
}

/// A packed bitmap together with its dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedBitmap {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl PagedBitmap {
    /// Pack a greyscale grid
    pub fn pack(grid: &GrayGrid, threshold: Threshold) -> Self {
        debug!(
            "Packing {}x{} image into {} page(s) at threshold {}",
            grid.width(),
            grid.height(),
            page_count(grid.height()),
            threshold
        );
        Self {
            width: grid.width(),
            height: grid.height(),
            buffer: pack_pages(grid, threshold),
        }
    }

    /// The width in pixels (and bytes per page)
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The number of pages
    pub fn page_count(&self) -> usize {
        page_count(self.height)
    }

    /// The bytes of page `index`, one per column
    pub fn page(&self, index: usize) -> Option<&[u8]> {
        if index >= self.page_count() {
            return None;
        }
        let w = self.width as usize;
        self.buffer.get(index * w..(index + 1) * w)
    }

    /// Iterate over all pages from top to bottom
    pub fn pages(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.page_count()).filter_map(move |index| self.page(index))
    }

    /// Check whether the pixel at `(x, y)` is on
    pub fn ink_at(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let page = (y / PAGE_HEIGHT) as usize;
        let bit = y % PAGE_HEIGHT;
        let index = page * self.width as usize + x as usize;
        (self.buffer[index] >> bit) & 1 > 0
    }

    /// The packed bytes, without header
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Return the packed bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    /// The header for this bitmap
    pub fn header(&self) -> Result<Header, RangeError> {
        Header::new(self.width.into(), self.height.into())
    }

    /// Serialize the header followed by all packed bytes
    pub fn to_record(&self) -> Result<Vec<u8>, RangeError> {
        let header = self.header()?;
        let mut out = Vec::with_capacity(HEADER_LEN + self.buffer.len());
        out.extend_from_slice(&header.to_bytes());
        out.extend_from_slice(&self.buffer);
        Ok(out)
    }

    /// Parse a record produced by [`PagedBitmap::to_record`]
    pub fn parse_record(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, header) = Header::parse(input)?;
        let (input, bytes) = take(header.packed_len())(input)?;
        Ok((
            input,
            Self {
                width: header.width.into(),
                height: header.height.into(),
                buffer: bytes.to_vec(),
            },
        ))
    }

    /// Draw the bitmap with characters, one per pixel
    ///
    /// Use this for small images only
    pub fn write_ascii<W: fmt::Write>(&self, w: &mut W, b: &BoxDrawing) -> fmt::Result {
        w.write_char(b.top.left)?;
        for _ in 0..self.width {
            w.write_char(b.top.middle)?;
        }
        w.write_char(b.top.right)?;
        w.write_char('\n')?;
        for y in 0..self.height {
            w.write_char(b.left)?;
            for x in 0..self.width {
                w.write_char(if self.ink_at(x, y) { b.ink } else { b.no_ink })?;
            }
            w.write_char(b.right)?;
            w.write_char('\n')?;
        }
        w.write_char(b.bottom.left)?;
        for _ in 0..self.width {
            w.write_char(b.bottom.middle)?;
        }
        w.write_char(b.bottom.right)?;
        w.write_char('\n')?;
        Ok(())
    }

    #[cfg(feature = "image")]
    #[cfg_attr(docsrs, doc(cfg(feature = "image")))]
    /// Turn the bitmap into a `GrayImage` where ink is black
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([if self.ink_at(x, y) { 0x00 } else { 0xFF }])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{pack_pages, PagedBitmap, Threshold};
    use crate::{error::ConfigurationError, gray::GrayGrid, util::drawing::ASCII};

    fn column(samples: &[u8]) -> GrayGrid {
        GrayGrid::new(1, samples.len() as u32, samples.to_vec()).unwrap()
    }

    #[test]
    fn test_bit_order() {
        let grid = column(&[0, 255, 0, 255, 0, 255, 0, 255]);
        assert_eq!(pack_pages(&grid, Threshold(128)), vec![0xAA]);

        let grid = column(&[255, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(pack_pages(&grid, Threshold(128)), vec![0x01]);

        let grid = column(&[0, 0, 0, 0, 0, 0, 0, 255]);
        assert_eq!(pack_pages(&grid, Threshold(128)), vec![0x80]);
    }

    #[test]
    fn test_partial_page() {
        let grid = column(&[0; 5]);
        assert_eq!(pack_pages(&grid, Threshold(128)), vec![0x00]);
        // rows 5..8 do not exist, so they stay off even if everything is on
        assert_eq!(pack_pages(&grid, Threshold(0)), vec![0x1F]);

        let grid = column(&[255; 13]);
        assert_eq!(pack_pages(&grid, Threshold(128)), vec![0xFF, 0x1F]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let grid = column(&[127, 128, 129]);
        assert_eq!(pack_pages(&grid, Threshold(128)), vec![0b110]);
        assert!(Threshold(128).is_on(128));
        assert!(!Threshold(128).is_on(127));
        assert!(Threshold(0).is_on(0));
        assert!(!Threshold(255).is_on(254));
    }

    #[test]
    fn test_page_major_order() {
        // 3 columns, 16 rows: column x has its pixel set in row 8 + x
        let mut samples = vec![0u8; 3 * 16];
        for x in 0..3 {
            samples[(8 + x) * 3 + x] = 255;
        }
        samples[0] = 255; // (0, 0)
        let grid = GrayGrid::new(3, 16, samples).unwrap();
        assert_eq!(
            pack_pages(&grid, Threshold::default()),
            vec![0x01, 0x00, 0x00, 0x01, 0x02, 0x04]
        );
    }

    #[test]
    fn test_length() {
        for &(w, h) in &[(128u32, 64u32), (5, 8), (17, 24), (1, 40)] {
            let grid = GrayGrid::new(w, h, vec![200; (w * h) as usize]).unwrap();
            let bytes = pack_pages(&grid, Threshold::default());
            assert_eq!(bytes.len(), (h / 8 * w) as usize);
            assert!(bytes.iter().all(|&b| b == 0xFF));
        }
    }

    #[test]
    fn test_empty() {
        for &(w, h) in &[(0u32, 0u32), (0, 16), (16, 0)] {
            let grid = GrayGrid::new(w, h, vec![]).unwrap();
            let bitmap = PagedBitmap::pack(&grid, Threshold::default());
            assert!(bitmap.bytes().is_empty());
            let record = bitmap.to_record().unwrap();
            assert_eq!(record.len(), 4);
        }
    }

    #[test]
    fn test_idempotent() {
        let samples: Vec<u8> = (0..=255).cycle().take(37 * 21).collect();
        let grid = GrayGrid::new(37, 21, samples).unwrap();
        let a = PagedBitmap::pack(&grid, Threshold(100));
        let b = PagedBitmap::pack(&grid, Threshold(100));
        assert_eq!(a, b);
    }

    #[test]
    fn test_ink_at() {
        let samples: Vec<u8> = (0..10 * 11).map(|i| if i % 3 == 0 { 255 } else { 0 }).collect();
        let grid = GrayGrid::new(10, 11, samples).unwrap();
        let bitmap = PagedBitmap::pack(&grid, Threshold::default());
        for y in 0..11 {
            for x in 0..10 {
                let expected = grid.get(x, y).unwrap() >= 128;
                assert_eq!(bitmap.ink_at(x, y), expected, "({}, {})", x, y);
            }
        }
        assert!(!bitmap.ink_at(10, 0));
        assert!(!bitmap.ink_at(0, 11));
    }

    #[test]
    fn test_pages() {
        let grid = GrayGrid::new(2, 9, vec![255; 18]).unwrap();
        let bitmap = PagedBitmap::pack(&grid, Threshold::default());
        assert_eq!(bitmap.page_count(), 2);
        let pages: Vec<&[u8]> = bitmap.pages().collect();
        assert_eq!(pages, vec![&[0xFFu8, 0xFF][..], &[0x01u8, 0x01][..]]);
        assert_eq!(bitmap.page(2), None);
    }

    #[test]
    fn test_record() {
        let grid = GrayGrid::new(2, 9, vec![255; 18]).unwrap();
        let bitmap = PagedBitmap::pack(&grid, Threshold::default());
        let record = bitmap.to_record().unwrap();
        assert_eq!(record, vec![2, 0, 9, 0, 0xFF, 0xFF, 0x01, 0x01]);

        let (rest, parsed) = PagedBitmap::parse_record(&record).unwrap();
        assert!(rest.is_empty());
        assert_eq!(parsed, bitmap);
        assert!(PagedBitmap::parse_record(&record[..7]).is_err());
    }

    #[test]
    fn test_record_too_wide() {
        let grid = GrayGrid::new(70000, 1, vec![0; 70000]).unwrap();
        let bitmap = PagedBitmap::pack(&grid, Threshold::default());
        assert!(bitmap.to_record().is_err());
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!("128".parse::<Threshold>(), Ok(Threshold(128)));
        assert_eq!(" 0 ".parse::<Threshold>(), Ok(Threshold(0)));
        assert_eq!(
            "256".parse::<Threshold>(),
            Err(ConfigurationError::InvalidThreshold("256".to_owned()))
        );
        assert!("-1".parse::<Threshold>().is_err());
        assert!("abc".parse::<Threshold>().is_err());
    }

    #[test]
    fn test_ascii() {
        let grid = GrayGrid::from_rows(&[[255u8, 0], [0, 255]]).unwrap();
        let bitmap = PagedBitmap::pack(&grid, Threshold::default());
        let mut out = String::new();
        bitmap.write_ascii(&mut out, ASCII).unwrap();
        assert_eq!(out, "+--+\n|# |\n| #|\n+--+\n");
    }
}
