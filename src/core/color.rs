use nalgebra::Vector3;

/// Scales the color down so its largest channel is at most 1.0.
/// Colors already inside [0, 1] are returned unchanged.
pub fn max_to_one(color: Vector3<f32>) -> Vector3<f32> {
    let max = color.x.max(color.y).max(color.z);
    if max > 1.0 { color / max } else { color }
}

/// Linearly remaps `value` from [min, max] to [0, 1] without clamping.
#[inline]
pub fn remap(value: f32, min: f32, max: f32) -> f32 {
    (value - min) / (max - min)
}

/// Quantizes a color to 8 bits per channel and packs it as 0xAARRGGBB.
///
/// Float to int casts saturate, so negative channels become 0.
pub fn pack_rgb(color: Vector3<f32>) -> u32 {
    let r = (color.x * 255.0) as u8 as u32;
    let g = (color.y * 255.0) as u8 as u32;
    let b = (color.z * 255.0) as u8 as u32;
    (255 << 24) | (r << 16) | (g << 8) | b
}

/// Splits a packed 0xAARRGGBB value into its RGB bytes.
#[inline]
pub fn unpack_rgb(packed: u32) -> [u8; 3] {
    [
        ((packed >> 16) & 0xFF) as u8,
        ((packed >> 8) & 0xFF) as u8,
        (packed & 0xFF) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn max_to_one_scales_by_largest_channel() {
        let c = max_to_one(Vector3::new(2.0, 0.5, 0.1));
        assert_relative_eq!(c, Vector3::new(1.0, 0.25, 0.05), epsilon = 1e-6);
    }

    #[test]
    fn max_to_one_keeps_colors_in_range() {
        let c = Vector3::new(0.5, 0.3, 0.2);
        assert_eq!(max_to_one(c), c);
    }

    #[test]
    fn remap_does_not_clamp() {
        assert_relative_eq!(remap(0.997, 0.997, 1.0), 0.0);
        assert_relative_eq!(remap(1.0, 0.997, 1.0), 1.0, epsilon = 1e-4);
        assert!(remap(0.5, 0.997, 1.0) < 0.0);
    }

    #[test]
    fn pack_saturates_negative_channels() {
        let packed = pack_rgb(Vector3::new(1.0, -0.5, 0.5));
        assert_eq!(unpack_rgb(packed), [255, 0, 127]);
        assert_eq!(packed >> 24, 255);
    }
}
