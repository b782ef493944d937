//! # Array literals
//!
//! Renders a packed bitmap as a C++ `uint8_t` array that can be pasted into
//! firmware sources:
//!
//! ```text
//! inline constexpr uint8_t BMP_LOGO[] =
//! {
//! 	128, 0, 64, 0,
//! 	0x00, 0xFF, 0x81, ...
//! };
//! ```
//!
//! The header bytes are decimal, the packed bytes are uppercase hex. Every
//! page starts on a new line, and long pages are wrapped after a fixed number
//! of values.

use std::{convert::TryFrom, fmt, num::NonZeroUsize, str::FromStr};

use crate::{
    error::{ConfigurationError, Error},
    header::Header,
    page::PagedBitmap,
};

/// Maximum number of packed values on one line of output
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ValuesPerLine(usize);

impl ValuesPerLine {
    /// Get the value, which is never zero
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ValuesPerLine {
    fn default() -> Self {
        Self(16)
    }
}

impl TryFrom<usize> for ValuesPerLine {
    type Error = ConfigurationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(|n| Self(n.get()))
            .ok_or_else(|| ConfigurationError::InvalidValuesPerLine(value.to_string()))
    }
}

impl FromStr for ValuesPerLine {
    type Err = ConfigurationError;

    fn from_str(val: &str) -> Result<Self, Self::Err> {
        val.trim()
            .parse::<NonZeroUsize>()
            .map(|n| Self(n.get()))
            .map_err(|_| ConfigurationError::InvalidValuesPerLine(val.to_owned()))
    }
}

impl fmt::Display for ValuesPerLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Turn a file name (without extension) into the name of the array
pub fn identifier(stem: &str) -> String {
    format!("BMP_{}", stem.replace(' ', "_").to_uppercase())
}

/// Write the array literal for the given header and pages
pub fn write_array<'a, W, I>(
    w: &mut W,
    name: &str,
    header: Header,
    pages: I,
    per_line: ValuesPerLine,
) -> fmt::Result
where
    W: fmt::Write,
    I: IntoIterator<Item = &'a [u8]>,
{
    write!(w, "inline constexpr uint8_t {}[] =\n{{", name)?;
    w.write_str("\n\t")?;
    for byte in header.to_bytes().iter() {
        write!(w, "{}, ", byte)?;
    }
    for page in pages {
        for line in page.chunks(per_line.get()) {
            w.write_str("\n\t")?;
            for byte in line {
                write!(w, "0x{:02X}, ", byte)?;
            }
        }
    }
    w.write_str("\n};")
}

/// Render a bitmap as an array literal called `name`
pub fn render_array(
    name: &str,
    bitmap: &PagedBitmap,
    per_line: ValuesPerLine,
) -> Result<String, Error> {
    let header = bitmap.header()?;
    let mut out = String::with_capacity(64 + bitmap.bytes().len() * 6);
    write_array(&mut out, name, header, bitmap.pages(), per_line)?;
    Ok(out)
}
