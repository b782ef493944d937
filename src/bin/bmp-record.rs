use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{self, eyre};
use paged_bitmap::{
    page::PagedBitmap,
    util::{drawing::UNICODE, Buf},
};

#[derive(Debug, Parser)]
/// Describe a packed bitmap record written with `--format bin`
struct Options {
    /// A record file
    file: PathBuf,
    /// Print the image to the console
    #[clap(long)]
    preview: bool,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let opt: Options = Options::parse();

    let buffer = std::fs::read(&opt.file)?;
    let (rest, bitmap) = PagedBitmap::parse_record(&buffer)
        .map_err(|e| eyre!("Failed to parse '{}': {:?}", opt.file.display(), e))?;

    println!("Width: {}", bitmap.width());
    println!("Height: {}", bitmap.height());
    println!("Pages: {}", bitmap.page_count());
    for (index, page) in bitmap.pages().enumerate() {
        println!("Page {}: {:?}", index, Buf(page));
    }
    if !rest.is_empty() {
        println!("Trailing bytes: {:#?}", Buf(rest));
    }
    if opt.preview {
        let mut text = String::new();
        bitmap.write_ascii(&mut text, UNICODE)?;
        print!("{}", text);
    }
    Ok(())
}
