//! Saving rendered frames to image files.

use image::{ImageBuffer, Rgba};
use std::path::Path;

use crate::error::{RenderError, RenderResult};

/// Saves tightly packed RGBA8 pixels to an image file.
///
/// The format follows the extension: `.png`, `.jpg` or `.jpeg`.
pub fn save_image(path: impl AsRef<Path>, data: &[u8], width: u32, height: u32) -> RenderResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    // wgpu uses a top-left origin, so no vertical flip
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_raw(width, height, data.to_vec())
        .ok_or(RenderError::InvalidImageData)?;

    match extension.as_str() {
        "png" => {
            img.save_with_format(path, image::ImageFormat::Png)?;
        }
        "jpg" | "jpeg" => {
            // JPEG has no alpha
            let rgb_img = image::DynamicImage::ImageRgba8(img).to_rgb8();
            rgb_img.save_with_format(path, image::ImageFormat::Jpeg)?;
        }
        _ => {
            return Err(RenderError::UnsupportedImageFormat(extension));
        }
    }

    log::info!("saved {}x{} image to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_image_rejects_unknown_extension() {
        let err = save_image("frame.bmpx", &[0; 16], 2, 2).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedImageFormat(ext) if ext == "bmpx"));
    }

    #[test]
    fn test_save_image_rejects_short_data() {
        let err = save_image("frame.png", &[0; 3], 2, 2).unwrap_err();
        assert!(matches!(err, RenderError::InvalidImageData));
    }

    #[test]
    fn test_save_png() {
        let path = std::env::temp_dir().join(format!("infigrid-shot-{}.png", std::process::id()));
        let pixels: Vec<u8> = (0..16u8).collect();
        save_image(&path, &pixels, 2, 2).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (2, 2));
        assert_eq!(loaded.into_raw(), pixels);
        let _ = std::fs::remove_file(&path);
    }
}
