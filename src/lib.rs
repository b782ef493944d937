//! # bmp-array
//!
//! Command line front-end for the `paged-bitmap` crate.
#![warn(missing_docs)]

pub mod cli;
