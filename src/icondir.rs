use crate::png::PngImage;
use byteorder::{LittleEndian, WriteBytesExt};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

//===========================================================================//

// The resource type number for icons.  (CUR files use 2 here, but this
// library only produces ICO files.)
const RESOURCE_TYPE_ICON: u16 = 1;

// Sizes of the fixed ICONDIR header and of one ICONDIRENTRY.
const ICONDIR_SIZE: u32 = 6;
const ICONDIRENTRY_SIZE: u32 = 16;

//===========================================================================//

/// A collection of PNG images; the contents of a single ICO file.
///
/// Images are written out in the order they were added, and that order is
/// never changed; callers who care about largest-first conventions should
/// add images in the order they want.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconDir {
    images: Vec<PngImage>,
}

impl IconDir {
    /// Creates a new, empty collection of icons.
    pub fn new() -> IconDir {
        IconDir { images: Vec::new() }
    }

    /// Returns the images in this collection, in the order they were added.
    pub fn images(&self) -> &[PngImage] {
        &self.images
    }

    /// Appends an image to the collection.
    pub fn add_image(&mut self, image: PngImage) {
        self.images.push(image);
    }

    /// Writes the collection out as an ICO file.
    ///
    /// The file starts with a 6-byte ICONDIR header and one 16-byte
    /// ICONDIRENTRY per image, so every entry's data offset is known before
    /// any payload is written; the PNG payloads then follow back-to-back,
    /// byte-for-byte as they were read.  Returns an error without writing
    /// anything if the directory cannot represent the collection: more than
    /// 65535 images, or a total file size over 4 GiB.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        if self.images.len() > (u16::MAX as usize) {
            invalid_input!(
                "Too many images in IconDir (was {}, but max is {})",
                self.images.len(),
                u16::MAX
            );
        }
        let mut total_size = (ICONDIR_SIZE as u64)
            + (ICONDIRENTRY_SIZE as u64) * (self.images.len() as u64);
        for image in self.images.iter() {
            total_size += image.size() as u64;
        }
        if total_size > (u32::MAX as u64) {
            invalid_input!(
                "Total ICO file size is too large \
                 (was {} bytes, but max is {})",
                total_size,
                u32::MAX
            );
        }
        log::debug!(
            "writing ICO with {} image(s), {} bytes total",
            self.images.len(),
            total_size
        );
        writer.write_u16::<LittleEndian>(0)?; // reserved
        writer.write_u16::<LittleEndian>(RESOURCE_TYPE_ICON)?;
        writer.write_u16::<LittleEndian>(self.images.len() as u16)?;
        let mut data_offset = ICONDIR_SIZE
            + ICONDIRENTRY_SIZE * (self.images.len() as u32);
        for image in self.images.iter() {
            writer.write_u8(image.icon_width())?;
            writer.write_u8(image.icon_height())?;
            writer.write_u8(0)?; // no color palette
            writer.write_u8(0)?; // reserved
            writer.write_u16::<LittleEndian>(0)?; // color planes
            writer.write_u16::<LittleEndian>(image.bit_depth() as u16)?;
            writer.write_u32::<LittleEndian>(image.size())?;
            writer.write_u32::<LittleEndian>(data_offset)?;
            data_offset += image.size();
        }
        for image in self.images.iter() {
            writer.write_all(image.data())?;
        }
        Ok(())
    }
}

impl Default for IconDir {
    fn default() -> IconDir {
        IconDir::new()
    }
}

//===========================================================================//


//===========================================================================//
