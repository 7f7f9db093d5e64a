use crate::core::geometry::{PixelOut, normalize_or_zero};
use crate::core::pipeline::PixelShader;
use crate::pipeline::settings::ShadingMode;
use crate::scene::light::DirectionalLight;
use crate::scene::material::Material;
use nalgebra::{Matrix3, Vector3};
use std::f32::consts::PI;

/// Diffuse reflectance used by the Lambert term.
pub const DIFFUSE_REFLECTANCE: f32 = 0.5;

/// Lambert cosine for a light travelling along `light_direction`, clamped at zero.
#[inline]
pub fn observed_area(normal: &Vector3<f32>, light_direction: &Vector3<f32>) -> f32 {
    normal.dot(&-light_direction).max(0.0)
}

/// Mirrors `incident` about `normal`: `i - 2 (i . n) n`.
#[inline]
pub fn reflect(incident: &Vector3<f32>, normal: &Vector3<f32>) -> Vector3<f32> {
    incident - normal * (2.0 * incident.dot(normal))
}

/// Phong lobe `cos^exponent`, with the cosine measured against the reversed view direction.
#[inline]
pub fn phong_lobe(
    light_direction: &Vector3<f32>,
    normal: &Vector3<f32>,
    view_direction: &Vector3<f32>,
    exponent: f32,
) -> f32 {
    let reflected = reflect(light_direction, normal);
    let cos_angle = reflected.dot(&-view_direction).max(0.0);
    cos_angle.powf(exponent)
}

/// Per-object pixel shader driven by a material's bound channels.
///
/// Unbound channels fall back to neutral values: white diffuse, full gloss,
/// black specular and the geometric normal.
pub struct ShadedShader<'a> {
    pub material: &'a Material,
    pub light: &'a DirectionalLight,
    pub shininess: f32,
    pub kd: f32,
    pub mode: ShadingMode,
    pub use_normal_map: bool,
}

impl<'a> ShadedShader<'a> {
    pub fn new(
        material: &'a Material,
        light: &'a DirectionalLight,
        shininess: f32,
        mode: ShadingMode,
        use_normal_map: bool,
    ) -> Self {
        Self {
            material,
            light,
            shininess,
            kd: DIFFUSE_REFLECTANCE,
            mode,
            use_normal_map,
        }
    }

    /// The normal used for lighting, always unit length (or zero).
    pub fn sampled_normal(&self, pixel: &PixelOut) -> Vector3<f32> {
        let normal = match (&self.material.normal_map, self.use_normal_map) {
            (Some(normal_map), true) => {
                let binormal = normalize_or_zero(pixel.normal.cross(&pixel.tangent));
                let tangent_space = Matrix3::from_columns(&[pixel.tangent, binormal, pixel.normal]);

                let encoded = normal_map.sample(&pixel.uv);
                let tangent_normal = encoded * 2.0 - Vector3::new(1.0, 1.0, 1.0);
                tangent_space * tangent_normal
            }
            _ => pixel.normal,
        };
        normalize_or_zero(normal)
    }

    fn diffuse(&self, pixel: &PixelOut) -> Vector3<f32> {
        let albedo = self
            .material
            .diffuse_map
            .as_ref()
            .map_or_else(|| Vector3::new(1.0, 1.0, 1.0), |t| t.sample(&pixel.uv));
        albedo * self.kd / PI * self.light.intensity
    }

    fn specular(&self, pixel: &PixelOut, normal: &Vector3<f32>) -> Vector3<f32> {
        let Some(specular_map) = &self.material.specular_map else {
            return Vector3::zeros();
        };

        let gloss = self
            .material
            .gloss_map
            .as_ref()
            .map_or(1.0, |t| t.sample(&pixel.uv).x);
        let exponent = gloss * self.shininess;

        let lobe = phong_lobe(&self.light.direction, normal, &pixel.view_direction, exponent);
        specular_map.sample(&pixel.uv) * lobe
    }
}

impl PixelShader for ShadedShader<'_> {
    fn shade(&self, pixel: &PixelOut) -> Vector3<f32> {
        let normal = self.sampled_normal(pixel);
        let area = observed_area(&normal, &self.light.direction);

        match self.mode {
            ShadingMode::ObservedArea => Vector3::new(1.0, 1.0, 1.0) * area,
            ShadingMode::Diffuse => self.diffuse(pixel) * area,
            ShadingMode::Specular => self.specular(pixel, &normal) * area,
            // Specular is added without the cosine factor here.
            ShadingMode::Combined => self.diffuse(pixel) * area + self.specular(pixel, &normal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::texture::Texture;
    use approx::assert_relative_eq;
    use nalgebra::{Vector2, Vector4};
    use std::sync::Arc;

    fn pixel(normal: Vector3<f32>) -> PixelOut {
        PixelOut {
            position: Vector4::new(0.0, 0.0, 0.5, 1.0),
            uv: Vector2::new(0.5, 0.5),
            normal,
            tangent: Vector3::new(1.0, 0.0, 0.0),
            view_direction: Vector3::new(0.0, 0.0, 1.0),
        }
    }

    fn head_on_light() -> DirectionalLight {
        DirectionalLight::new(Vector3::new(0.0, 0.0, -1.0), 7.0)
    }

    #[test]
    fn observed_area_is_white_facing_and_black_facing_away() {
        let material = Material::default();
        let light = head_on_light();
        let shader = ShadedShader::new(&material, &light, 25.0, ShadingMode::ObservedArea, true);

        let lit = shader.shade(&pixel(Vector3::new(0.0, 0.0, 1.0)));
        assert_relative_eq!(lit, Vector3::new(1.0, 1.0, 1.0), epsilon = 1e-6);

        let unlit = shader.shade(&pixel(Vector3::new(0.0, 0.0, -1.0)));
        assert_relative_eq!(unlit, Vector3::zeros(), epsilon = 1e-6);
    }

    #[test]
    fn diffuse_uses_lambert_constant() {
        let material = Material::with_diffuse(Arc::new(Texture::solid(Vector3::new(1.0, 0.0, 0.0))));
        let light = head_on_light();
        let shader = ShadedShader::new(&material, &light, 25.0, ShadingMode::Diffuse, true);

        let c = shader.shade(&pixel(Vector3::new(0.0, 0.0, 1.0)));
        assert_relative_eq!(c.x, 0.5 / PI * 7.0, epsilon = 1e-5);
        assert_relative_eq!(c.y, 0.0);
    }

    #[test]
    fn reflect_mirrors_about_normal() {
        let r = reflect(&Vector3::new(1.0, -1.0, 0.0), &Vector3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(r, Vector3::new(1.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn combined_adds_unscaled_specular() {
        let material = Material {
            specular_map: Some(Arc::new(Texture::solid(Vector3::new(1.0, 1.0, 1.0)))),
            ..Default::default()
        };
        // Light at 60 degrees from the normal, mirror direction aimed straight at the eye.
        let direction = Vector3::new(0.0, -(3.0_f32).sqrt() / 2.0, -0.5);
        let light = DirectionalLight::new(direction, 7.0);
        let mut px = pixel(Vector3::new(0.0, 0.0, 1.0));
        px.view_direction = -reflect(&light.direction, &px.normal);

        let specular_only = ShadedShader::new(&material, &light, 25.0, ShadingMode::Specular, true)
            .shade(&px);
        let combined = ShadedShader::new(&material, &light, 25.0, ShadingMode::Combined, true)
            .shade(&px);
        let diffuse_only = ShadedShader::new(&material, &light, 25.0, ShadingMode::Diffuse, true)
            .shade(&px);

        // Specular mode scales the lobe by the cosine (0.5); combined does not.
        assert_relative_eq!(specular_only, Vector3::new(0.5, 0.5, 0.5), epsilon = 1e-4);
        assert_relative_eq!(combined - diffuse_only, Vector3::new(1.0, 1.0, 1.0), epsilon = 1e-4);
    }

    #[test]
    fn gloss_scales_the_phong_exponent() {
        let material = Material {
            specular_map: Some(Arc::new(Texture::solid(Vector3::new(1.0, 1.0, 1.0)))),
            gloss_map: Some(Arc::new(Texture::solid(Vector3::new(0.5, 0.0, 0.0)))),
            ..Default::default()
        };
        let light = head_on_light();
        let mut px = pixel(Vector3::new(0.0, 0.0, 1.0));
        // Reflection is +Z; a view direction 0.9 off it gives cos = 0.9.
        px.view_direction = -Vector3::new(0.0, (1.0_f32 - 0.81).sqrt(), 0.9);

        let c = ShadedShader::new(&material, &light, 25.0, ShadingMode::Specular, true).shade(&px);

        // Solid 0.5 is stored as 128 / 255.
        let exponent = 128.0 / 255.0 * 25.0;
        let expected = 0.9_f32.powf(exponent);
        assert_relative_eq!(c, Vector3::new(expected, expected, expected), epsilon = 1e-4);
        assert!((c.x - 0.9_f32.powf(25.0)).abs() > 0.1);
    }

    #[test]
    fn unbound_specular_contributes_nothing() {
        let material = Material::default();
        let light = head_on_light();
        let mut px = pixel(Vector3::new(0.0, 0.0, 1.0));
        px.view_direction = Vector3::new(0.0, 0.0, -1.0);

        let c = ShadedShader::new(&material, &light, 25.0, ShadingMode::Specular, true).shade(&px);
        assert_relative_eq!(c, Vector3::zeros());
    }

    #[test]
    fn flat_normal_map_keeps_geometric_normal() {
        // (128, 128, 255) encodes roughly (0, 0, 1) in tangent space.
        let flat = Texture::solid(Vector3::new(128.0, 128.0, 255.0) / 255.0);
        let material = Material {
            normal_map: Some(Arc::new(flat)),
            ..Default::default()
        };
        let light = head_on_light();
        let shader = ShadedShader::new(&material, &light, 25.0, ShadingMode::ObservedArea, true);

        let n = shader.sampled_normal(&pixel(Vector3::new(0.0, 0.0, 1.0)));
        assert_relative_eq!(n, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-2);
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn normal_map_remaps_into_tangent_basis() {
        // Pure +X in tangent space follows the tangent.
        let tilted = Texture::solid(Vector3::new(1.0, 0.5, 0.5));
        let material = Material {
            normal_map: Some(Arc::new(tilted)),
            ..Default::default()
        };
        let light = head_on_light();

        let enabled = ShadedShader::new(&material, &light, 25.0, ShadingMode::ObservedArea, true);
        let n = enabled.sampled_normal(&pixel(Vector3::new(0.0, 0.0, 1.0)));
        assert!(n.x > 0.99);

        let disabled = ShadedShader::new(&material, &light, 25.0, ShadingMode::ObservedArea, false);
        let n = disabled.sampled_normal(&pixel(Vector3::new(0.0, 0.0, 2.0)));
        assert_relative_eq!(n, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }
}
