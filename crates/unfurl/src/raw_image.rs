// ABOUTME: Raw-image support: reads pixel dimensions from bytes served as image/*.
// ABOUTME: Decoding failures are non-fatal and yield (0, 0).

use std::io::Cursor;

use image::ImageReader;

/// Returns `(width, height)` of the encoded image, or `(0, 0)` if the bytes
/// cannot be decoded.
///
/// Only the header is read; the pixel data is never decompressed.
pub fn dimensions(bytes: &[u8]) -> (i32, i32) {
    let reader = match ImageReader::new(Cursor::new(bytes)).with_guessed_format() {
        Ok(r) => r,
        Err(e) => {
            tracing::info!(error = %e, "unable to sniff image format");
            return (0, 0);
        }
    };

    match reader.into_dimensions() {
        Ok((width, height)) => (clamp(width), clamp(height)),
        Err(e) => {
            tracing::info!(error = %e, "unable to decode image dimensions");
            (0, 0)
        }
    }
}

fn clamp(n: u32) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        RgbImage::new(width, height)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn reads_png_dimensions() {
        assert_eq!(dimensions(&png_bytes(1, 1)), (1, 1));
        assert_eq!(dimensions(&png_bytes(40, 12)), (40, 12));
    }

    #[test]
    fn garbage_yields_zero() {
        assert_eq!(dimensions(b"<html>not an image</html>"), (0, 0));
        assert_eq!(dimensions(&[]), (0, 0));
    }

    #[test]
    fn oversized_dimension_saturates() {
        assert_eq!(clamp(u32::MAX), i32::MAX);
        assert_eq!(clamp(640), 640);
    }

    #[test]
    fn truncated_png_yields_zero() {
        let bytes = png_bytes(4, 4);
        assert_eq!(dimensions(&bytes[..10]), (0, 0));
    }
}
