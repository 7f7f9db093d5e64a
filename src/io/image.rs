use image::RgbImage;
use log::info;
use std::path::Path;

/// Saves a tightly packed RGB8 buffer (`width * height * 3` bytes) as an image.
///
/// The format follows the file extension.
pub fn save_rgb_to_image<P: AsRef<Path>>(
    rgb: Vec<u8>,
    width: usize,
    height: usize,
    path: P,
) -> Result<(), String> {
    let path = path.as_ref();
    let img = RgbImage::from_raw(width as u32, height as u32, rgb).ok_or_else(|| {
        format!(
            "Pixel buffer does not match a {}x{} RGB image",
            width, height
        )
    })?;

    img.save(path)
        .map_err(|e| format!("Failed to save image to '{}': {}", path.display(), e))?;

    info!("Saved {}x{} image to {:?}", width, height, path);
    Ok(())
}
