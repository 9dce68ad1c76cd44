//! Writing rendered images to disk.

use crate::ImageBuffer;
use image::{ImageFormat, Rgb32FImage, RgbaImage};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while saving an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0} (expected .png or .exr)")]
    UnsupportedFormat(String),

    #[error("Pixel buffer does not match a {width}x{height} image")]
    BufferSize { width: u32, height: u32 },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Save as 8-bit PNG with gamma 2.0.
pub fn save_png(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    let buffer = RgbaImage::from_raw(image.width, image.height, image.to_rgba()).ok_or(
        OutputError::BufferSize {
            width: image.width,
            height: image.height,
        },
    )?;

    buffer.save_with_format(path, ImageFormat::Png)?;
    log::info!("Image saved as PNG: {}", path.display());
    Ok(())
}

/// Save linear radiance as 32-bit float OpenEXR.
pub fn save_exr(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    let buffer = Rgb32FImage::from_raw(image.width, image.height, image.to_rgb_f32()).ok_or(
        OutputError::BufferSize {
            width: image.width,
            height: image.height,
        },
    )?;

    buffer.save_with_format(path, ImageFormat::OpenExr)?;
    log::info!("HDR image saved as EXR: {}", path.display());
    Ok(())
}

/// Save in the format named by the file extension.
pub fn save_image(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "png" => save_png(image, path),
        "exr" => save_exr(image, path),
        _ => Err(OutputError::UnsupportedFormat(path.display().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::Color;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lumen_output_{}_{}", std::process::id(), name))
    }

    fn gradient() -> ImageBuffer {
        let mut image = ImageBuffer::new(4, 2);
        image.set(0, 0, Color::ONE);
        image.set(3, 1, Color::new(0.25, 0.0, 2.0));
        image
    }

    #[test]
    fn test_png_round_trip() {
        let path = scratch("image.png");
        save_image(&gradient(), &path).expect("png save");

        let loaded = image::open(&path).expect("png load").to_rgba8();
        assert_eq!(loaded.dimensions(), (4, 2));
        assert_eq!(loaded.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(loaded.get_pixel(3, 1).0, [127, 0, 255, 255]);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_exr_keeps_linear_values() {
        let path = scratch("image.exr");
        save_image(&gradient(), &path).expect("exr save");

        let loaded = image::open(&path).expect("exr load").to_rgb32f();
        assert_eq!(loaded.get_pixel(3, 1).0, [0.25, 0.0, 2.0]);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let result = save_image(&gradient(), scratch("image.bmp"));
        assert!(matches!(result, Err(OutputError::UnsupportedFormat(_))));

        let result = save_image(&gradient(), scratch("no_extension"));
        assert!(matches!(result, Err(OutputError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_mismatched_buffer_is_rejected() {
        let mut image = gradient();
        image.pixels.pop();

        let result = save_png(&image, scratch("short.png"));
        assert!(matches!(result, Err(OutputError::BufferSize { width: 4, height: 2 })));
    }
}
