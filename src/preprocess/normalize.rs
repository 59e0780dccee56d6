use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use ndarray::Array4;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Classifier input: `(batch = 1, height, width, channels = 3)`, values in [0, 1].
pub type Tensor = Array4<f32>;

/// Padding fill. The classifier was trained on white-padded samples, so this
/// is part of the input contract.
pub const PAD_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Fixed input size of the classifier, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub const fn new(width: u32, height: u32) -> Self {
        TargetSize { width, height }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidTargetSize { width: self.width, height: self.height });
        }
        Ok(())
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        TargetSize::new(256, 256)
    }
}

/// Size of `(width, height)` after uniform scaling into `target`.
///
/// `ratio = min(Tw/W, Th/H)`, each side floored. A side that would floor to
/// zero (extremely thin sources) keeps one pixel.
pub fn fit_within(width: u32, height: u32, target: TargetSize) -> (u32, u32) {
    let ratio = f64::min(
        target.width as f64 / width as f64,
        target.height as f64 / height as f64,
    );
    let new_w = ((width as f64 * ratio).floor() as u32).clamp(1, target.width);
    let new_h = ((height as f64 * ratio).floor() as u32).clamp(1, target.height);
    (new_w, new_h)
}

/// Scales `image` into `target` with Lanczos3, preserving aspect ratio, and
/// centers it on a white canvas. Leftover odd pixels go right/bottom.
pub fn resize_and_pad(image: &DynamicImage, target: TargetSize) -> Result<RgbImage> {
    target.validate()?;
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }

    let rgb = image.to_rgb8();
    let (new_w, new_h) = fit_within(width, height, target);
    let scaled = if (new_w, new_h) == (width, height) {
        rgb
    } else {
        imageops::resize(&rgb, new_w, new_h, FilterType::Lanczos3)
    };

    let mut canvas = RgbImage::from_pixel(target.width, target.height, PAD_COLOR);
    let x = (target.width - new_w) / 2;
    let y = (target.height - new_h) / 2;
    imageops::replace(&mut canvas, &scaled, x as i64, y as i64);
    Ok(canvas)
}

/// Converts a canvas to an NHWC tensor scaled to [0, 1].
pub fn to_tensor(canvas: &RgbImage) -> Tensor {
    let (w, h) = canvas.dimensions();
    Array4::from_shape_fn((1, h as usize, w as usize, 3), |(_, y, x, c)| {
        canvas.get_pixel(x as u32, y as u32)[c] as f32 / 255.0
    })
}

/// Maps any decoded image to the classifier's input tensor,
/// shape `(1, target.height, target.width, 3)`.
pub fn normalize(image: &DynamicImage, target: TargetSize) -> Result<Tensor> {
    let canvas = resize_and_pad(image, target)?;
    Ok(to_tensor(&canvas))
}
