#![warn(missing_docs)]
//! # Page-addressed monochrome bitmaps
//!
//! This crate turns a greyscale image into the packed 1-bit layout that
//! page-addressed display controllers (SSD1306, KS0108 and friends) expect.
//!
//! The image is cut into horizontal *pages* of 8 rows. Every column of a page
//! becomes one byte, where bit 0 is the topmost row of that page. Bytes are
//! emitted page by page (top to bottom) and within a page column by column
//! (left to right). A 4-byte header with the width and height as
//! little-endian `u16` values precedes the bytes in the output record.
//!
//! ```
//! use paged_bitmap::{gray::GrayGrid, page::{PagedBitmap, Threshold}};
//!
//! let grid = GrayGrid::from_rows(&[[0u8], [255], [0], [255], [0], [255], [0], [255]]).unwrap();
//! let bitmap = PagedBitmap::pack(&grid, Threshold::default());
//! assert_eq!(bitmap.bytes(), &[0xAA]);
//! assert_eq!(bitmap.to_record().unwrap(), vec![1, 0, 8, 0, 0xAA]);
//! ```

pub mod array;
pub mod error;
pub mod gray;
pub mod header;
pub mod page;
pub mod util;

pub use error::{ConfigurationError, Error, InvalidImageError, RangeError};
