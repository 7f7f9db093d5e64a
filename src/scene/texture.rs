use image::RgbImage;
use log::{info, trace, warn};
use nalgebra::{Vector2, Vector3};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// Represents a 2D texture map sampled with nearest-texel lookup.
#[derive(Debug)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pixels: RgbImage,
    name: String,
    warned_out_of_range: AtomicBool,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref).map_err(|e| format!("Failed to load texture: {}", e))?;
        let rgb = img.to_rgb8();

        info!("Loaded texture: {:?} ({}x{})", path_ref, rgb.width(), rgb.height());

        Self::from_image(rgb, path_ref.display().to_string())
    }

    /// Wraps an in-memory RGB image. Empty images are rejected.
    pub fn from_image(pixels: RgbImage, name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(format!("Texture '{}' has no pixels", name));
        }
        Ok(Self {
            width: pixels.width(),
            height: pixels.height(),
            pixels,
            name,
            warned_out_of_range: AtomicBool::new(false),
        })
    }

    /// A 1x1 texture of a single color (channels in [0, 1]).
    pub fn solid(color: Vector3<f32>) -> Self {
        let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let pixels = RgbImage::from_pixel(
            1,
            1,
            image::Rgb([to_byte(color.x), to_byte(color.y), to_byte(color.z)]),
        );
        Self {
            width: 1,
            height: 1,
            pixels,
            name: "solid".to_string(),
            warned_out_of_range: AtomicBool::new(false),
        }
    }

    /// A `size` x `size` checkerboard with `cells` squares per side.
    pub fn checkerboard(size: u32, cells: u32, a: [u8; 3], b: [u8; 3]) -> Self {
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let pixels = RgbImage::from_fn(size, size, |x, y| {
            if ((x / cell) + (y / cell)) % 2 == 0 {
                image::Rgb(a)
            } else {
                image::Rgb(b)
            }
        });
        Self {
            width: size,
            height: size,
            pixels,
            name: "checkerboard".to_string(),
            warned_out_of_range: AtomicBool::new(false),
        }
    }

    /// Nearest lookup: `texel[floor(u * width), floor(v * height)]`, channels / 255.
    ///
    /// UV outside [0, 1] is clamped into the texture and reported once per texture.
    pub fn sample(&self, uv: &Vector2<f32>) -> Vector3<f32> {
        if !(0.0..=1.0).contains(&uv.x) || !(0.0..=1.0).contains(&uv.y) {
            if !self.warned_out_of_range.swap(true, Ordering::Relaxed) {
                warn!(
                    "Texture '{}' sampled outside [0, 1] at ({}, {}); clamping",
                    self.name, uv.x, uv.y
                );
            } else {
                trace!("Texture '{}' sampled at ({}, {})", self.name, uv.x, uv.y);
            }
        }

        let x = Self::texel_index(uv.x, self.width);
        let y = Self::texel_index(uv.y, self.height);
        let pixel = self.pixels.get_pixel(x, y);

        Vector3::new(
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
        )
    }

    /// `floor(coord * size)` clamped to a valid texel. NaN maps to texel 0.
    #[inline]
    fn texel_index(coord: f32, size: u32) -> u32 {
        let scaled = (coord * size as f32).floor();
        if scaled.is_nan() {
            return 0;
        }
        (scaled.max(0.0) as u32).min(size - 1)
    }
}
