//! # Image to page-packed bitmap converter
use bmp_array::cli::{self, convert, opt::Options};
use color_eyre::eyre;

fn main() -> eyre::Result<()> {
    let opt: Options = cli::init()?;
    convert::run(&opt)
}
