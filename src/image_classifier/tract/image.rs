use image::{imageops, Rgb, RgbImage};
use tract_onnx::prelude::*;

/// Scales `image` to fit inside `width x height` keeping its aspect ratio and
/// centers it on a black canvas.
pub fn letterbox(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }

    let (w, h) = (image.width() as f32, image.height() as f32);
    let scale = (width as f32 / w).min(height as f32 / h);
    let new_w = ((w * scale).round() as u32).clamp(1, width);
    let new_h = ((h * scale).round() as u32).clamp(1, height);

    let scaled = imageops::resize(image, new_w, new_h, imageops::FilterType::Triangle);

    if (new_w, new_h) == (width, height) {
        return scaled;
    }

    let mut padded = RgbImage::from_pixel(width, height, Rgb([0, 0, 0]));
    let x_offset = (width - new_w) / 2;
    let y_offset = (height - new_h) / 2;
    imageops::replace(&mut padded, &scaled, x_offset as i64, y_offset as i64);

    padded
}

/// NCHW float tensor with pixel values scaled to [0, 1].
pub fn image_to_tensor(image: &RgbImage) -> Tensor {
    let (width, height) = image.dimensions();

    tract_ndarray::Array4::from_shape_fn(
        (1, 3, height as usize, width as usize),
        |(_, c, y, x)| image.get_pixel(x as u32, y as u32)[c] as f32 / 255.0,
    )
    .into_tensor()
}

pub fn resize_image_to_tensor(image: &RgbImage, width: u32, height: u32) -> Tensor {
    image_to_tensor(&letterbox(image, width, height))
}
