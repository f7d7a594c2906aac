use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader, RgbImage};
use std::io::Cursor;

/// Encodings accepted from a capture device or an uploaded file.
pub const SUPPORTED_FORMATS: [ImageFormat; 4] = [
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::WebP,
    ImageFormat::Tiff,
];

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("no image data was submitted")]
    Empty,
    #[error("the submitted data is not a recognizable image")]
    UnknownFormat,
    #[error("{0:?} images are not supported, submit a JPEG, PNG, WEBP or TIFF image")]
    Unsupported(ImageFormat),
    #[error("the image could not be decoded: {0}")]
    Image(#[from] image::ImageError),
    #[error("the image could not be read: {0}")]
    Io(#[from] std::io::Error),
}

/// Decodes encoded image bytes into an upright, three channel RGB image.
///
/// The EXIF orientation embedded by cameras is applied, so a photo tagged
/// "rotate 90°" comes back with width and height swapped. Grayscale, palette
/// and alpha images are converted to plain RGB.
pub fn decode(bytes: &[u8]) -> Result<RgbImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;

    let format = reader.format().ok_or(DecodeError::UnknownFormat)?;
    if !SUPPORTED_FORMATS.contains(&format) {
        return Err(DecodeError::Unsupported(format));
    }

    let mut decoder = reader.into_decoder()?;
    let orientation = decoder.orientation()?;

    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);

    Ok(image.to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use image::{GrayImage, ImageBuffer, Luma, Rgb, Rgba, RgbaImage};

    fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), format)
            .unwrap();
        bytes
    }

    /// APP1 segment holding a little endian TIFF block with a single
    /// Orientation (0x0112) entry.
    fn exif_app1_segment(orientation: u16) -> Vec<u8> {
        let mut payload = Vec::new();
        payload.extend_from_slice(b"Exif\0\0");
        payload.extend_from_slice(&[0x49, 0x49, 0x2A, 0x00]);
        payload.extend_from_slice(&8u32.to_le_bytes());
        payload.extend_from_slice(&1u16.to_le_bytes());
        payload.extend_from_slice(&0x0112u16.to_le_bytes());
        payload.extend_from_slice(&3u16.to_le_bytes());
        payload.extend_from_slice(&1u32.to_le_bytes());
        payload.extend_from_slice(&orientation.to_le_bytes());
        payload.extend_from_slice(&[0, 0]);
        payload.extend_from_slice(&0u32.to_le_bytes());

        let mut segment = vec![0xFF, 0xE1];
        segment.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
        segment.extend_from_slice(&payload);
        segment
    }

    fn jpeg_with_orientation(image: &DynamicImage, orientation: u16) -> Vec<u8> {
        let mut jpeg = Vec::new();
        image
            .write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, 95))
            .unwrap();

        // SOI stays first, the EXIF segment goes right behind it.
        let mut tagged = jpeg[..2].to_vec();
        tagged.extend_from_slice(&exif_app1_segment(orientation));
        tagged.extend_from_slice(&jpeg[2..]);
        tagged
    }

    #[test]
    fn test_decode_png_keeps_dimensions() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(12, 7, Rgb([10, 200, 30])));

        let decoded = decode(&encode(&image, ImageFormat::Png)).unwrap();

        assert_eq!(decoded.dimensions(), (12, 7));
        assert_eq!(decoded.get_pixel(3, 3), &Rgb([10, 200, 30]));
    }

    #[test]
    fn test_decode_applies_exif_rotate_90() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(40, 16, Rgb([120, 60, 200])));

        let decoded = decode(&jpeg_with_orientation(&image, 6)).unwrap();

        assert_eq!(decoded.dimensions(), (16, 40));
        assert_eq!(decoded.as_raw().len(), 16 * 40 * 3);
    }

    #[test]
    fn test_decode_ignores_upright_exif_orientation() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(40, 16, Rgb([0, 0, 0])));

        let decoded = decode(&jpeg_with_orientation(&image, 1)).unwrap();

        assert_eq!(decoded.dimensions(), (40, 16));
    }

    #[test]
    fn test_decode_rotated_grayscale_jpeg_has_three_channels() {
        let gray: GrayImage = ImageBuffer::from_pixel(20, 10, Luma([128]));
        let image = DynamicImage::ImageLuma8(gray);

        let decoded = decode(&jpeg_with_orientation(&image, 6)).unwrap();

        assert_eq!(decoded.dimensions(), (10, 20));
        assert_eq!(decoded.as_raw().len(), 10 * 20 * 3);
        let pixel = decoded.get_pixel(5, 5);
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
    }

    #[test]
    fn test_decode_drops_alpha_channel() {
        let rgba: RgbaImage = ImageBuffer::from_pixel(5, 5, Rgba([1, 2, 3, 4]));

        let decoded = decode(&encode(&DynamicImage::ImageRgba8(rgba), ImageFormat::Png)).unwrap();

        assert_eq!(decoded.get_pixel(0, 0), &Rgb([1, 2, 3]));
        assert_eq!(decoded.as_raw().len(), 5 * 5 * 3);
    }

    #[test]
    fn test_decode_accepts_tiff() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(6, 4, Rgb([9, 9, 9])));

        let decoded = decode(&encode(&image, ImageFormat::Tiff)).unwrap();

        assert_eq!(decoded.dimensions(), (6, 4));
    }

    #[test]
    fn test_decode_rejects_empty_and_garbage() {
        assert!(matches!(decode(&[]), Err(DecodeError::Empty)));
        assert!(matches!(
            decode(b"definitely not an image"),
            Err(DecodeError::UnknownFormat)
        ));
    }

    #[test]
    fn test_decode_rejects_unsupported_format() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(2, 2, Rgb([0, 0, 0])));

        let result = decode(&encode(&image, ImageFormat::Bmp));

        assert!(matches!(result, Err(DecodeError::Unsupported(ImageFormat::Bmp))));
    }

    #[test]
    fn test_decode_reports_truncated_image() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(32, 32, Rgb([5, 6, 7])));
        let png = encode(&image, ImageFormat::Png);

        let result = decode(&png[..png.len() / 2]);

        assert!(matches!(result, Err(DecodeError::Image(_))));
    }
}
