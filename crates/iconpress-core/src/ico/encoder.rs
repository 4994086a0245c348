//! Single-frame PNG icon encoding.
//!
//! Both in-memory buffers (the 22-byte layout and the PNG payload) are fully
//! prepared before anything is written, so every failure except a sink error
//! leaves the sink untouched.

use super::layout::{encode_layout, IconDirEntry, IconDirHeader};
use super::{IcoError, IconSize};
use crate::resample::scale_to_square;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use log::debug;
use std::borrow::Cow;
use std::io::{Cursor, Write};

/// Encode `source` as a single-frame icon of `size x size` pixels into `sink`.
///
/// Non-RGBA8 sources are converted first. See [`encode_rgba`] for the steps
/// and failure modes.
pub fn encode<W: Write>(sink: W, source: &DynamicImage, size: u32) -> Result<(), IcoError> {
    // Reject before converting the source
    let size = IconSize::try_from(size)?;

    let rgba = match source {
        DynamicImage::ImageRgba8(buffer) => Cow::Borrowed(buffer),
        other => Cow::Owned(other.to_rgba8()),
    };

    encode_rgba(sink, &rgba, size.pixels())
}

/// Encode an RGBA8 image as a single-frame icon of `size x size` pixels.
///
/// # Steps
///
/// 1. Validate `size` against [`IconSize`]
/// 2. Resample the source to a square with [`scale_to_square`]
/// 3. Compress the square with the PNG codec
/// 4. Serialize the header and directory entry
/// 5. Write the layout, then the payload, each with one `write_all`
///
/// # Errors
///
/// * [`IcoError::UnsupportedSize`] if `size` is not 16, 32, 48, 64 or 256;
///   nothing is written
/// * [`IcoError::ResamplingFailed`] if the source is empty
/// * [`IcoError::CompressionFailed`] if the PNG codec fails
/// * [`IcoError::LayoutEncodingFailed`] if the records cannot be serialized
/// * [`IcoError::Io`] with the sink's own error if either write fails; the
///   sink may then hold a partial icon
pub fn encode_rgba<W: Write>(mut sink: W, source: &RgbaImage, size: u32) -> Result<(), IcoError> {
    let size = IconSize::try_from(size)?;
    debug!(
        "Encoding {}x{} source as {}px icon",
        source.width(),
        source.height(),
        size.pixels()
    );

    let square = scale_to_square(source, size.pixels())?;
    let payload = compress_png(&square)?;

    let header = IconDirHeader::single_icon();
    let entry = IconDirEntry::png(square.width(), square.height(), payload.len())?;
    let layout = encode_layout(&header, &entry)?;

    debug!(
        "Writing {}-byte layout and {}-byte PNG payload",
        layout.len(),
        payload.len()
    );

    sink.write_all(&layout).map_err(IcoError::Io)?;
    sink.write_all(&payload).map_err(IcoError::Io)?;

    Ok(())
}

/// Encode `source` as an icon and return the complete file bytes.
pub fn encode_to_vec(source: &DynamicImage, size: u32) -> Result<Vec<u8>, IcoError> {
    let mut buffer = Vec::new();
    encode(&mut buffer, source, size)?;
    Ok(buffer)
}

/// Compress an RGBA8 image to an in-memory PNG stream.
pub fn compress_png(image: &RgbaImage) -> Result<Vec<u8>, IcoError> {
    let mut buffer = Cursor::new(Vec::new());

    PngEncoder::new(&mut buffer)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(IcoError::CompressionFailed)?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ico::layout::{read_layout, PAYLOAD_OFFSET};
    use crate::resample::ResampleError;
    use image::{GenericImageView, ImageFormat, Rgba};
    use std::io;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn create_test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([
                ((x * 255) / width.max(1)) as u8,
                ((y * 255) / height.max(1)) as u8,
                128,
                255,
            ])
        }))
    }

    /// Sink that records each write call and fails on a chosen call.
    struct RecordingSink {
        writes: Vec<Vec<u8>>,
        fail_on: Option<usize>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                writes: Vec::new(),
                fail_on: None,
            }
        }

        fn failing_on(call: usize) -> Self {
            Self {
                writes: Vec::new(),
                fail_on: Some(call),
            }
        }

        fn bytes(&self) -> Vec<u8> {
            self.writes.concat()
        }
    }

    impl Write for RecordingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.fail_on == Some(self.writes.len()) {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
            self.writes.push(buf.to_vec());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_encode_all_supported_sizes() {
        let img = create_test_image(100, 60);

        for size in IconSize::ALL {
            let bytes = encode_to_vec(&img, size.pixels()).unwrap();
            let (header, entry) = read_layout(&bytes).unwrap();

            assert_eq!(header, IconDirHeader::single_icon());
            assert_eq!(entry.width_pixels(), size.pixels());
            assert_eq!(entry.height_pixels(), size.pixels());
            assert_eq!(entry.data_size as usize, bytes.len() - 22);
            assert_eq!(entry.data_offset, PAYLOAD_OFFSET);
        }
    }

    #[test]
    fn test_encode_header_bytes() {
        let bytes = encode_to_vec(&create_test_image(40, 40), 32).unwrap();

        assert_eq!(&bytes[0..6], &[0, 0, 1, 0, 1, 0]);
        assert_eq!(bytes[6], 32);
        assert_eq!(bytes[7], 32);
        assert_eq!(&bytes[8..14], &[0, 0, 1, 0, 32, 0]);
        assert_eq!(&bytes[18..22], &[22, 0, 0, 0]);

        let data_size = u32::from_le_bytes([bytes[14], bytes[15], bytes[16], bytes[17]]);
        assert_eq!(data_size as usize, bytes.len() - 22);
    }

    #[test]
    fn test_encode_size_256_wraps_to_zero() {
        let bytes = encode_to_vec(&create_test_image(50, 50), 256).unwrap();
        assert_eq!(bytes[6], 0x00);
        assert_eq!(bytes[7], 0x00);
    }

    #[test]
    fn test_encode_size_64_bytes() {
        let bytes = encode_to_vec(&create_test_image(50, 50), 64).unwrap();
        assert_eq!(bytes[6], 0x40);
        assert_eq!(bytes[7], 0x40);
    }

    #[test]
    fn test_encode_payload_is_png_at_offset() {
        let bytes = encode_to_vec(&create_test_image(30, 90), 48).unwrap();
        assert_eq!(&bytes[22..30], &PNG_SIGNATURE);

        let decoded =
            image::load_from_memory_with_format(&bytes[22..], ImageFormat::Png).unwrap();
        assert_eq!(decoded.dimensions(), (48, 48));
    }

    #[test]
    fn test_encode_unsupported_size_writes_nothing() {
        let img = create_test_image(20, 20);

        for size in [0, 8, 24, 100, 128, 255, 257, 512] {
            let mut sink = RecordingSink::new();
            let result = encode(&mut sink, &img, size);

            assert!(
                matches!(result, Err(IcoError::UnsupportedSize(s)) if s == size),
                "size {} should be rejected",
                size
            );
            assert!(sink.writes.is_empty());
        }
    }

    #[test]
    fn test_encode_writes_two_chunks() {
        let mut sink = RecordingSink::new();
        encode(&mut sink, &create_test_image(20, 20), 16).unwrap();

        assert_eq!(sink.writes.len(), 2);
        assert_eq!(sink.writes[0].len(), 22);
        assert_eq!(&sink.writes[1][0..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_empty_source() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(0, 0));
        let mut sink = RecordingSink::new();

        let result = encode(&mut sink, &img, 32);
        assert!(matches!(
            result,
            Err(IcoError::ResamplingFailed(ResampleError::EmptySource { .. }))
        ));
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn test_encode_first_write_failure() {
        let mut sink = RecordingSink::failing_on(0);
        let result = encode(&mut sink, &create_test_image(20, 20), 16);

        match result {
            Err(IcoError::Io(e)) => {
                assert_eq!(e.kind(), io::ErrorKind::BrokenPipe);
                assert_eq!(e.to_string(), "sink closed");
            }
            other => panic!("expected Io error, got {:?}", other),
        }
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn test_encode_second_write_failure_leaves_layout() {
        let mut sink = RecordingSink::failing_on(1);
        let result = encode(&mut sink, &create_test_image(20, 20), 16);

        assert!(matches!(result, Err(IcoError::Io(_))));
        assert_eq!(sink.writes.len(), 1);
        assert_eq!(sink.writes[0].len(), 22);
    }

    #[test]
    fn test_encode_layout_is_deterministic() {
        let img = create_test_image(77, 33);
        let first = encode_to_vec(&img, 64).unwrap();
        let second = encode_to_vec(&img, 64).unwrap();
        assert_eq!(&first[0..22], &second[0..22]);
    }

    #[test]
    fn test_encode_converts_non_rgba_source() {
        let rgb = image::RgbImage::from_pixel(10, 10, image::Rgb([1, 2, 3]));
        let rgb = DynamicImage::ImageRgb8(rgb);
        let bytes = encode_to_vec(&rgb, 16).unwrap();
        assert_eq!(bytes[6], 16);

        let decoded = image::load_from_memory_with_format(&bytes[22..], ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert!(decoded.pixels().all(|p| *p == Rgba([1, 2, 3, 255])));
    }

    #[test]
    fn test_encode_rgba_matches_encode() {
        let img = create_test_image(40, 20);
        let mut direct = RecordingSink::new();
        encode_rgba(&mut direct, img.as_rgba8().unwrap(), 32).unwrap();

        assert_eq!(direct.bytes(), encode_to_vec(&img, 32).unwrap());
    }

    #[test]
    fn test_compress_png_signature() {
        let square = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 0]));
        let png = compress_png(&square).unwrap();
        assert_eq!(&png[0..8], &PNG_SIGNATURE);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
