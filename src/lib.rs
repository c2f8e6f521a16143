//! A library and command-line tool for bundling one or more PNG images into
//! a single Windows ICO file.
//!
//! The ICO files produced by this crate hold PNG-compressed images only (the
//! form Windows Vista and later read natively); the legacy uncompressed
//! BMP-in-ICO layout is never emitted.  Each input PNG is embedded
//! byte-for-byte, without decoding or re-encoding its pixel data; the
//! library only ever inspects the fixed-layout header of each file to learn
//! its geometry.
//!
//! # Example
//!
//! ```no_run
//! let image = png2ico::PngImage::read_file("app-256.png").unwrap();
//! let mut icon = png2ico::IconDir::new();
//! icon.add_image(image);
//! let file = std::fs::File::create("app.ico").unwrap();
//! icon.write(std::io::BufWriter::new(file)).unwrap();
//! ```

#![warn(missing_docs)]

//===========================================================================//

macro_rules! invalid_data {
    ($e:expr) => {
        return Err(::std::io::Error::new(::std::io::ErrorKind::InvalidData,
                                         $e))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err(::std::io::Error::new(::std::io::ErrorKind::InvalidData,
                                         format!($fmt, $($arg)+)))
    };
}

macro_rules! invalid_input {
    ($e:expr) => {
        return Err(::std::io::Error::new(::std::io::ErrorKind::InvalidInput,
                                         $e))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err(::std::io::Error::new(::std::io::ErrorKind::InvalidInput,
                                         format!($fmt, $($arg)+)))
    };
}

//===========================================================================//

mod icondir;
mod png;

pub use crate::icondir::IconDir;
pub use crate::png::{is_png_file, PngImage, ProbeResult, RejectReason};

//===========================================================================//
