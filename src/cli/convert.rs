//! # Converting images
use std::{fs, io::Cursor, path::Path};

use color_eyre::eyre::{self, eyre, WrapErr};
use image::ImageFormat;
use log::{info, warn};
use paged_bitmap::{
    array::{identifier, render_array, ValuesPerLine},
    gray::GrayGrid,
    header::Header,
    page::{PagedBitmap, Threshold},
    util::drawing::UNICODE,
    ConfigurationError, RangeError,
};

use super::{
    opt::{Format, Options},
    paths,
};

/// Everything needed to convert a single image
#[derive(Debug, Copy, Clone)]
pub struct Job {
    /// Brightness cutoff
    pub threshold: Threshold,
    /// Line width of the array output
    pub per_line: ValuesPerLine,
    /// Output format
    pub format: Format,
    /// Print the result to the console
    pub preview: bool,
}

impl Job {
    /// Resolve the settings of a command line
    pub fn new(opt: &Options) -> eyre::Result<Self> {
        let settings = opt.settings().wrap_err("Failed to load settings")?;
        Ok(Self {
            threshold: settings.threshold(),
            per_line: settings.values_per_line()?,
            format: opt.format,
            preview: opt.preview,
        })
    }
}

/// Run the conversion for a file or folder
pub fn run(opt: &Options) -> eyre::Result<()> {
    let job = Job::new(opt)?;
    let out = opt.out.as_deref();

    if opt.input.is_dir() {
        if let Some(out) = out {
            if !paths::is_folder(out) {
                return Err(ConfigurationError::OutputNotADirectory(out.to_path_buf()).into());
            }
        }
        let files = paths::list_images(&opt.input).wrap_err_with(|| {
            format!("Failed to list images in '{}'", opt.input.display())
        })?;
        if files.is_empty() {
            warn!("No images found in '{}'", opt.input.display());
        }
        let plan = paths::plan_outputs(&files, out, job.format)?;
        for (input, out_path) in &plan {
            convert_file(input, out_path, &job)?;
        }
        info!("Converted {} image(s)", plan.len());
        Ok(())
    } else if opt.input.is_file() {
        let out_path = paths::output_for(&opt.input, out, job.format);
        convert_file(&opt.input, &out_path, &job)?;
        Ok(())
    } else {
        Err(eyre!("Input '{}' does not exist", opt.input.display()))
    }
}

/// Check that the dimensions of `grid` fit into the header of `format`
///
/// Only `array` and `bin` outputs carry a header.
pub fn check_header(grid: &GrayGrid, format: Format) -> Result<(), RangeError> {
    match format {
        Format::Array | Format::Bin => {
            Header::new(grid.width().into(), grid.height().into())?;
            Ok(())
        }
        Format::Png => Ok(()),
    }
}

/// Convert a single image file into `out_path`
pub fn convert_file(input: &Path, out_path: &Path, job: &Job) -> eyre::Result<()> {
    info!("Input: '{}'", input.display());
    info!("Output: '{}'", out_path.display());

    let image = image::open(input)
        .wrap_err_with(|| format!("Failed to decode image '{}'", input.display()))?;
    let grid = GrayGrid::from(&image);
    info!("x: {}, y: {}", grid.width(), grid.height());
    check_header(&grid, job.format)
        .wrap_err_with(|| format!("Cannot convert '{}'", input.display()))?;

    let bitmap = PagedBitmap::pack(&grid, job.threshold);
    if job.preview {
        let mut text = String::new();
        bitmap.write_ascii(&mut text, UNICODE)?;
        print!("{}", text);
    }

    let bytes = render(&bitmap, out_path, job)?;
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(out_path, bytes)
        .wrap_err_with(|| format!("Failed to write '{}'", out_path.display()))?;
    info!("Saved {} as '{}'", job.format, out_path.display());
    Ok(())
}

/// Produce the complete output for a bitmap
///
/// The array name is derived from the file name of `out_path`.
pub fn render(bitmap: &PagedBitmap, out_path: &Path, job: &Job) -> eyre::Result<Vec<u8>> {
    match job.format {
        Format::Array => {
            let stem = out_path.file_stem().unwrap_or_default().to_string_lossy();
            let text = render_array(&identifier(&stem), bitmap, job.per_line)?;
            Ok(text.into_bytes())
        }
        Format::Bin => Ok(bitmap.to_record()?),
        Format::Png => {
            let mut buffer = Cursor::new(Vec::new());
            bitmap.to_image().write_to(&mut buffer, ImageFormat::Png)?;
            Ok(buffer.into_inner())
        }
    }
}
