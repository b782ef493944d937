//! # Input and output paths
use std::{
    collections::HashMap,
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use image::ImageFormat;
use log::debug;
use paged_bitmap::ConfigurationError;

use super::opt::Format;

/// Suffix appended to the input name when no output was given
const DEFAULT_SUFFIX: &str = "-array";

/// Whether an output path names a folder rather than a file
///
/// A path without an extension is always treated as a folder.
pub fn is_folder(out: &Path) -> bool {
    out.extension().is_none()
}

fn file_name(input: &Path, suffix: &str, format: Format) -> OsString {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(suffix);
    name.push(".");
    name.push(format.extension());
    name
}

/// Where to store the result of converting `input`
///
/// - no output: `<input without extension>-array.<ext>`
/// - output without extension: `<output>/<input stem>.<ext>`
/// - otherwise, the output itself
pub fn output_for(input: &Path, out: Option<&Path>, format: Format) -> PathBuf {
    match out {
        None => input.with_file_name(file_name(input, DEFAULT_SUFFIX, format)),
        Some(dir) if is_folder(dir) => dir.join(file_name(input, "", format)),
        Some(file) => file.to_path_buf(),
    }
}

/// Pair every input with its output path
///
/// Fails if two inputs (e.g. `logo.png` and `logo.bmp`) would end up in the
/// same file.
pub fn plan_outputs(
    inputs: &[PathBuf],
    out: Option<&Path>,
    format: Format,
) -> Result<Vec<(PathBuf, PathBuf)>, ConfigurationError> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::with_capacity(inputs.len());
    let mut plan = Vec::with_capacity(inputs.len());
    for input in inputs {
        let output = output_for(input, out, format);
        if let Some(first) = seen.insert(output.clone(), input) {
            return Err(ConfigurationError::DuplicateOutput {
                output,
                first: first.to_path_buf(),
                second: input.clone(),
            });
        }
        plan.push((input.clone(), output));
    }
    Ok(plan)
}

/// Whether `path` looks like an output of this tool
fn is_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map_or(false, |stem| stem.ends_with(DEFAULT_SUFFIX))
}

/// List all decodable images in a folder, sorted by name
pub fn list_images(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match ImageFormat::from_path(&path) {
            Ok(format) if format.reading_enabled() && !is_output(&path) => files.push(path),
            _ => debug!("Skipping '{}'", path.display()),
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::{Path, PathBuf},
    };

    use paged_bitmap::ConfigurationError;

    use super::{is_folder, is_output, list_images, output_for, plan_outputs};
    use crate::cli::opt::Format;

    #[test]
    fn test_default_output() {
        assert_eq!(
            output_for(Path::new("img/logo.png"), None, Format::Array),
            PathBuf::from("img/logo-array.txt")
        );
        assert_eq!(
            output_for(Path::new("boot screen.v2.bmp"), None, Format::Bin),
            PathBuf::from("boot screen.v2-array.bin")
        );
    }

    #[test]
    fn test_output_folder() {
        assert!(is_folder(Path::new("out/arrays")));
        assert!(!is_folder(Path::new("out/logo.h")));
        assert_eq!(
            output_for(Path::new("img/logo.png"), Some(Path::new("out")), Format::Array),
            PathBuf::from("out/logo.txt")
        );
        assert_eq!(
            output_for(Path::new("logo.png"), Some(Path::new("out")), Format::Png),
            PathBuf::from("out/logo.png")
        );
    }

    #[test]
    fn test_output_file() {
        assert_eq!(
            output_for(
                Path::new("img/logo.png"),
                Some(Path::new("src/logo.h")),
                Format::Array
            ),
            PathBuf::from("src/logo.h")
        );
    }

    #[test]
    fn test_is_output() {
        assert!(is_output(Path::new("img/logo-array.png")));
        assert!(!is_output(Path::new("img/logo.png")));
    }

    #[test]
    fn test_plan_outputs() {
        let inputs = vec![PathBuf::from("img/a.png"), PathBuf::from("img/b.bmp")];
        let plan = plan_outputs(&inputs, Some(Path::new("out")), Format::Bin).unwrap();
        assert_eq!(
            plan,
            vec![
                (PathBuf::from("img/a.png"), PathBuf::from("out/a.bin")),
                (PathBuf::from("img/b.bmp"), PathBuf::from("out/b.bin")),
            ]
        );
    }

    #[test]
    fn test_plan_same_stem() {
        let inputs = vec![PathBuf::from("img/logo.bmp"), PathBuf::from("img/logo.png")];
        assert_eq!(
            plan_outputs(&inputs, None, Format::Array),
            Err(ConfigurationError::DuplicateOutput {
                output: PathBuf::from("img/logo-array.txt"),
                first: PathBuf::from("img/logo.bmp"),
                second: PathBuf::from("img/logo.png"),
            })
        );
        assert!(plan_outputs(&inputs, Some(Path::new("out")), Format::Png).is_err());
    }

    #[test]
    fn test_list_images() {
        let dir = tempfile::tempdir().unwrap();
        for name in &["b.png", "a.bmp", "a-array.png", "notes.txt", "photo.jpg"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let files = list_images(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.bmp"), dir.path().join("b.png")]
        );
        assert!(list_images(&dir.path().join("missing")).is_err());
    }
}
