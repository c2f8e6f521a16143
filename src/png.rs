use byteorder::{BigEndian, ByteOrder};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

//===========================================================================//

// The signature that all PNG files start with.
const PNG_SIGNATURE: &[u8] =
    &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

// The chunk type of the IHDR chunk, which the PNG spec requires to come
// first, directly after the signature and its own 4-byte length field.
const IHDR_CHUNK_TYPE: &[u8] = b"IHDR";

// The number of bytes the probe looks at: the signature (8), the IHDR chunk
// length (4), the IHDR chunk type (4), width (4), height (4), and bit
// depth (1).
const PROBE_LEN: usize = 25;

// An ICONDIRENTRY stores one byte per axis, with 0 standing for 256, so
// only dimensions in this range can be represented faithfully.
const MIN_DIMENSION: u32 = 1;
const MAX_DIMENSION: u32 = 256;

//===========================================================================//

/// The result of probing a byte buffer that may or may not be a PNG file.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum ProbeResult {
    /// The buffer is a structurally valid PNG file; its geometry and raw
    /// bytes are captured in the descriptor.
    Png(PngImage),
    /// The buffer was readable but is not a PNG file.  This is a
    /// classification, not a fault; the caller decides whether it matters.
    NotPng(RejectReason),
}

//===========================================================================//

/// Why a probed buffer was not recognized as a PNG file.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum RejectReason {
    /// The buffer is shorter than the 25 bytes needed to hold the PNG
    /// signature and the IHDR geometry fields.
    TooShort,
    /// The first 8 bytes are not the PNG signature.
    BadSignature,
    /// The chunk following the signature is not an IHDR chunk.
    NoIhdr,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RejectReason::TooShort => write!(f, "shorter than a PNG header"),
            RejectReason::BadSignature => write!(f, "no PNG signature"),
            RejectReason::NoIhdr => write!(f, "no IHDR chunk"),
        }
    }
}

//===========================================================================//

/// One PNG image, as captured by [`PngImage::probe`]: the geometry fields
/// from its IHDR chunk, together with the raw bytes of the whole file.
///
/// A `PngImage` can only be obtained from a buffer that passed the
/// structural checks, so the geometry is always consistent with the payload
/// and always representable in an ICO directory entry.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct PngImage {
    width: u32,
    height: u32,
    bit_depth: u8,
    data: Vec<u8>,
}

impl PngImage {
    /// Inspects a byte buffer and decides whether it is a PNG file.
    ///
    /// The probe checks the fixed 8-byte signature and the IHDR chunk type,
    /// then reads the width, height, and bit depth from the documented
    /// offsets within the IHDR chunk.  Nothing else is validated (chunk
    /// CRCs and pixel data are never examined), and the buffer is taken
    /// over verbatim as the payload.
    ///
    /// A buffer that fails the structural checks yields
    /// [`ProbeResult::NotPng`] rather than an error.  The `Err` side is
    /// reserved for buffers that *are* PNGs but cannot be stored in an
    /// icon: a width or height outside `1..=256`, or a payload too large
    /// for the 32-bit ICO size fields.
    pub fn probe(data: Vec<u8>) -> io::Result<ProbeResult> {
        if let Some(reason) = classify(&data) {
            log::debug!("rejected {}-byte buffer: {}", data.len(), reason);
            return Ok(ProbeResult::NotPng(reason));
        }
        let width = BigEndian::read_u32(&data[16..20]);
        let height = BigEndian::read_u32(&data[20..24]);
        let bit_depth = data[24];
        if width < MIN_DIMENSION || width > MAX_DIMENSION {
            invalid_data!(
                "Invalid PNG width for an ICO entry \
                 (was {}, but must be between {} and {})",
                width,
                MIN_DIMENSION,
                MAX_DIMENSION
            );
        }
        if height < MIN_DIMENSION || height > MAX_DIMENSION {
            invalid_data!(
                "Invalid PNG height for an ICO entry \
                 (was {}, but must be between {} and {})",
                height,
                MIN_DIMENSION,
                MAX_DIMENSION
            );
        }
        if data.len() > (u32::MAX as usize) {
            invalid_data!(
                "PNG file is too large for an ICO entry ({} bytes)",
                data.len()
            );
        }
        log::debug!(
            "probed PNG: {}x{} px, bit depth {}, {} bytes",
            width,
            height,
            bit_depth,
            data.len()
        );
        Ok(ProbeResult::Png(PngImage { width, height, bit_depth, data }))
    }

    /// Reads a PNG file into memory.
    ///
    /// This is [`probe`](PngImage::probe) applied to the contents of a
    /// file.  A file that is readable but not a PNG is reported as an
    /// [`InvalidData`](io::ErrorKind::InvalidData) error naming the reason,
    /// while a failure to read the file at all keeps its original
    /// [`io::ErrorKind`], so the two cases stay distinguishable.
    pub fn read_file<P: AsRef<Path>>(path: P) -> io::Result<PngImage> {
        match PngImage::probe(fs::read(path)?)? {
            ProbeResult::Png(image) => Ok(image),
            ProbeResult::NotPng(reason) => {
                invalid_data!("Not a PNG file ({})", reason)
            }
        }
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the bit depth declared in the image's IHDR chunk, verbatim.
    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    /// Returns the exact byte length of the PNG payload.
    pub fn size(&self) -> u32 {
        self.data.len() as u32
    }

    /// Returns the width byte for an ICONDIRENTRY, where 0 stands for 256.
    pub fn icon_width(&self) -> u8 {
        if self.width > 255 {
            0
        } else {
            self.width as u8
        }
    }

    /// Returns the height byte for an ICONDIRENTRY, where 0 stands for 256.
    pub fn icon_height(&self) -> u8 {
        if self.height > 255 {
            0
        } else {
            self.height as u8
        }
    }

    /// Returns the raw, encoded PNG data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

//===========================================================================//

/// Returns true if the file at `path` exists, can be read, and probes as a
/// PNG file.
///
/// Only the 25-byte probe window is read, and any read failure counts as
/// "not a PNG".  That makes this the right shape for pre-checking that a
/// destination about to be created is not itself a PNG image: a
/// destination that does not exist yet is simply not a PNG.
pub fn is_png_file<P: AsRef<Path>>(path: P) -> bool {
    let mut header = [0u8; PROBE_LEN];
    match fs::File::open(path)
        .and_then(|mut file| file.read_exact(&mut header))
    {
        Ok(()) => classify(&header).is_none(),
        Err(_) => false,
    }
}

// The two structural checks, shared by `probe` and `is_png_file`.  Bytes
// 8-11 hold the IHDR chunk length, which the PNG spec fixes at 13; the
// probe deliberately ignores it.
fn classify(data: &[u8]) -> Option<RejectReason> {
    if data.len() < PROBE_LEN {
        Some(RejectReason::TooShort)
    } else if !data.starts_with(PNG_SIGNATURE) {
        Some(RejectReason::BadSignature)
    } else if &data[12..16] != IHDR_CHUNK_TYPE {
        Some(RejectReason::NoIhdr)
    } else {
        None
    }
}

//===========================================================================//


//===========================================================================//
