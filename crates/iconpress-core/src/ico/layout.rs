//! Byte-exact ICO header and directory entry records.
//!
//! A single-frame icon starts with a 6-byte [`IconDirHeader`] followed by one
//! 16-byte [`IconDirEntry`]; the embedded PNG begins right after, at byte
//! [`PAYLOAD_OFFSET`]. All multi-byte fields are little-endian and are written
//! one at a time in file order, never by reinterpreting struct memory.
//!
//! ```text
//! offset  width  field
//!      0      2  reserved (0)
//!      2      2  image type (1 = icon)
//!      4      2  image count (1)
//!      6      1  width  (256 -> 0)
//!      7      1  height (256 -> 0)
//!      8      1  color count (0)
//!      9      1  reserved (0)
//!     10      2  color planes (1)
//!     12      2  bits per pixel (32)
//!     14      4  payload size
//!     18      4  payload offset (22)
//! ```

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read, Write};
use thiserror::Error;

/// Size of the icon directory header in bytes.
pub const HEADER_LEN: usize = 6;

/// Size of one directory entry in bytes.
pub const ENTRY_LEN: usize = 16;

/// Size of the header plus the single directory entry.
pub const LAYOUT_LEN: usize = HEADER_LEN + ENTRY_LEN;

/// Byte position of the embedded image in a single-entry icon.
pub const PAYLOAD_OFFSET: u32 = LAYOUT_LEN as u32;

/// Image type discriminator for icons (cursors use 2).
pub const ICON_TYPE: u16 = 1;

const COLOR_PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 32;

/// Largest side length an entry can describe.
const MAX_DIMENSION: u32 = 256;

/// Errors raised while serializing or parsing the icon layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Width or height cannot be stored in a one-byte entry field.
    #[error("Dimension {0} is outside the 1-256 range an icon entry can store")]
    DimensionOutOfRange(u32),

    /// The payload length does not fit the 32-bit size field.
    #[error("Payload of {0} bytes does not fit in a 32-bit size field")]
    PayloadTooLarge(usize),

    /// The serialized records have an unexpected length.
    #[error("Serialized layout is {actual} bytes, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Fewer bytes than a header and entry were supplied.
    #[error("Icon data is truncated: need {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// A fixed field holds a value this encoder never produces.
    #[error("Invalid {field}: expected {expected}, found {found}")]
    InvalidField {
        field: &'static str,
        expected: u32,
        found: u32,
    },

    /// Writing or reading a field failed.
    #[error("Layout I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The 6-byte record at the start of every icon file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconDirHeader {
    pub reserved: u16,
    pub image_type: u16,
    pub image_count: u16,
}

impl IconDirHeader {
    /// Header for an icon holding exactly one image.
    pub fn single_icon() -> Self {
        Self {
            reserved: 0,
            image_type: ICON_TYPE,
            image_count: 1,
        }
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_u16::<LittleEndian>(self.reserved)?;
        writer.write_u16::<LittleEndian>(self.image_type)?;
        writer.write_u16::<LittleEndian>(self.image_count)?;
        Ok(())
    }

    fn read_from<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        Ok(Self {
            reserved: reader.read_u16::<LittleEndian>()?,
            image_type: reader.read_u16::<LittleEndian>()?,
            image_count: reader.read_u16::<LittleEndian>()?,
        })
    }
}

/// The 16-byte record describing one embedded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconDirEntry {
    /// Width in pixels; 0 means 256.
    pub width: u8,
    /// Height in pixels; 0 means 256.
    pub height: u8,
    pub color_count: u8,
    pub reserved: u8,
    pub color_planes: u16,
    pub bits_per_pixel: u16,
    /// Length of the embedded image in bytes.
    pub data_size: u32,
    /// Byte position of the embedded image from the start of the file.
    pub data_offset: u32,
}

impl IconDirEntry {
    /// Entry for a 32-bit PNG frame placed directly after the single entry.
    ///
    /// # Errors
    ///
    /// * [`LayoutError::DimensionOutOfRange`] if a side is 0 or above 256
    /// * [`LayoutError::PayloadTooLarge`] if `data_size` exceeds `u32::MAX`
    pub fn png(width: u32, height: u32, data_size: usize) -> Result<Self, LayoutError> {
        Ok(Self {
            width: dimension_byte(width)?,
            height: dimension_byte(height)?,
            color_count: 0,
            reserved: 0,
            color_planes: COLOR_PLANES,
            bits_per_pixel: BITS_PER_PIXEL,
            data_size: u32::try_from(data_size)
                .map_err(|_| LayoutError::PayloadTooLarge(data_size))?,
            data_offset: PAYLOAD_OFFSET,
        })
    }

    /// Width in pixels, mapping the stored 0 back to 256.
    pub fn width_pixels(&self) -> u32 {
        dimension_pixels(self.width)
    }

    /// Height in pixels, mapping the stored 0 back to 256.
    pub fn height_pixels(&self) -> u32 {
        dimension_pixels(self.height)
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_u8(self.width)?;
        writer.write_u8(self.height)?;
        writer.write_u8(self.color_count)?;
        writer.write_u8(self.reserved)?;
        writer.write_u16::<LittleEndian>(self.color_planes)?;
        writer.write_u16::<LittleEndian>(self.bits_per_pixel)?;
        writer.write_u32::<LittleEndian>(self.data_size)?;
        writer.write_u32::<LittleEndian>(self.data_offset)?;
        Ok(())
    }

    fn read_from<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        Ok(Self {
            width: reader.read_u8()?,
            height: reader.read_u8()?,
            color_count: reader.read_u8()?,
            reserved: reader.read_u8()?,
            color_planes: reader.read_u16::<LittleEndian>()?,
            bits_per_pixel: reader.read_u16::<LittleEndian>()?,
            data_size: reader.read_u32::<LittleEndian>()?,
            data_offset: reader.read_u32::<LittleEndian>()?,
        })
    }
}

/// Store a side length in an entry byte. 256 wraps to 0 by format convention.
fn dimension_byte(pixels: u32) -> Result<u8, LayoutError> {
    match pixels {
        MAX_DIMENSION => Ok(0),
        1..=255 => Ok(pixels as u8),
        other => Err(LayoutError::DimensionOutOfRange(other)),
    }
}

fn dimension_pixels(byte: u8) -> u32 {
    if byte == 0 {
        MAX_DIMENSION
    } else {
        u32::from(byte)
    }
}

/// Serialize a header followed by one entry.
///
/// The result is always exactly [`LAYOUT_LEN`] bytes.
///
/// # Errors
///
/// Returns [`LayoutError::LengthMismatch`] if the written records do not add
/// up to [`LAYOUT_LEN`], or [`LayoutError::Io`] if a field write fails.
pub fn encode_layout(
    header: &IconDirHeader,
    entry: &IconDirEntry,
) -> Result<Vec<u8>, LayoutError> {
    let mut buffer = Vec::with_capacity(LAYOUT_LEN);
    header.write_to(&mut buffer)?;
    entry.write_to(&mut buffer)?;

    if buffer.len() != LAYOUT_LEN {
        return Err(LayoutError::LengthMismatch {
            expected: LAYOUT_LEN,
            actual: buffer.len(),
        });
    }

    Ok(buffer)
}

/// Parse and validate the header and entry at the start of a single-frame icon.
///
/// Only layouts this crate produces are accepted: one icon image, one color
/// plane, 32 bits per pixel, payload at [`PAYLOAD_OFFSET`].
pub fn read_layout(bytes: &[u8]) -> Result<(IconDirHeader, IconDirEntry), LayoutError> {
    if bytes.len() < LAYOUT_LEN {
        return Err(LayoutError::Truncated {
            expected: LAYOUT_LEN,
            actual: bytes.len(),
        });
    }

    let mut cursor = Cursor::new(bytes);
    let header = IconDirHeader::read_from(&mut cursor)?;
    let entry = IconDirEntry::read_from(&mut cursor)?;

    expect_field("header reserved field", 0, header.reserved.into())?;
    expect_field("image type", ICON_TYPE.into(), header.image_type.into())?;
    expect_field("image count", 1, header.image_count.into())?;
    expect_field("entry reserved field", 0, entry.reserved.into())?;
    expect_field("color planes", COLOR_PLANES.into(), entry.color_planes.into())?;
    expect_field("bits per pixel", BITS_PER_PIXEL.into(), entry.bits_per_pixel.into())?;
    expect_field("data offset", PAYLOAD_OFFSET, entry.data_offset)?;

    Ok((header, entry))
}

fn expect_field(field: &'static str, expected: u32, found: u32) -> Result<(), LayoutError> {
    if expected == found {
        Ok(())
    } else {
        Err(LayoutError::InvalidField {
            field,
            expected,
            found,
        })
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
