//! # Command line options and settings files
use std::{convert::TryFrom, fmt, io, path::PathBuf, str::FromStr};

use clap::Parser;
use paged_bitmap::{array::ValuesPerLine, page::Threshold, ConfigurationError};
use serde::Deserialize;
use thiserror::*;

mod de;
use de::{deserialize_opt_u8, deserialize_opt_usize};

/// The format to write the packed bitmap in
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    /// C++ array literal with header and packed bytes
    Array,
    /// Raw record: header followed by the packed bytes
    Bin,
    /// Portable Network Graphic of the thresholded image
    Png,
}

#[derive(Debug)]
/// Failed to parse a format name
pub struct FormatError {}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Use one of `array`, `bin` or `png`")?;
        Ok(())
    }
}

impl std::error::Error for FormatError {}

impl Default for Format {
    fn default() -> Self {
        Format::Array
    }
}

impl FromStr for Format {
    type Err = FormatError;
    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val {
            "array" | "txt" => Ok(Self::Array),
            "bin" | "binary" => Ok(Self::Bin),
            "png" => Ok(Self::Png),
            _ => Err(FormatError {}),
        }
    }
}

impl Format {
    fn to_static_str(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Bin => "bin",
            Self::Png => "png",
        }
    }

    /// The file extension of outputs in this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Array => "txt",
            Self::Bin => "bin",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_static_str())
    }
}

#[derive(Parser)]
/// Convert greyscale images into page-packed bitmaps for monochrome displays
pub struct Options {
    /// Input image, or a folder of images
    #[clap(long, short = 'i')]
    pub input: PathBuf,
    /// Output file, or a folder if it has no extension
    ///
    /// Defaults to `<input>-array.txt` next to the input.
    #[clap(long, short = 'o')]
    pub out: Option<PathBuf>,
    /// Threshold for pixel brightness [default: 128]
    #[clap(long, short = 't', alias = "th")]
    pub threshold: Option<Threshold>,
    /// Maximum number of hex values in each line in the output file [default: 16]
    #[clap(long = "max-vals-per-line")]
    pub max_vals_per_line: Option<ValuesPerLine>,
    /// Format of the output. Valid choices are:
    ///
    /// "array", "bin" and "png"
    #[clap(default_value_t, long, short = 'F')]
    pub format: Format,
    /// Print the thresholded image to the console
    #[clap(long)]
    pub preview: bool,
    /// Settings file (RON), overridden by the arguments above
    #[clap(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Error)]
/// Failed to load the settings file
pub enum SettingsError {
    /// Reading the file failed
    #[error("IO Error")]
    Io(#[from] io::Error),
    /// The file is not valid RON
    #[error("Deserialize Error")]
    Ron(#[from] ron::error::Error),
}

impl Options {
    /// Load the settings file (if any) and apply the command line on top
    pub fn settings(&self) -> Result<Settings, SettingsError> {
        let mut settings = if let Some(path) = &self.config {
            let text = std::fs::read_to_string(path)?;
            ron::from_str(&text)?
        } else {
            Settings::default()
        };
        if let Some(threshold) = self.threshold {
            settings.threshold = Some(threshold.0);
        }
        if let Some(per_line) = self.max_vals_per_line {
            settings.max_values_per_line = Some(per_line.get());
        }
        Ok(settings)
    }
}

/// Conversion settings, as found in a settings file
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Threshold for pixel brightness
    #[serde(default, deserialize_with = "deserialize_opt_u8")]
    pub threshold: Option<u8>,
    /// Maximum number of hex values per line
    #[serde(default, deserialize_with = "deserialize_opt_usize")]
    pub max_values_per_line: Option<usize>,
}

impl Settings {
    /// The effective threshold
    pub fn threshold(&self) -> Threshold {
        self.threshold.map(Threshold).unwrap_or_default()
    }

    /// The effective line width
    pub fn values_per_line(&self) -> Result<ValuesPerLine, ConfigurationError> {
        match self.max_values_per_line {
            Some(n) => ValuesPerLine::try_from(n),
            None => Ok(ValuesPerLine::default()),
        }
    }
}
