use log::{info, warn};
use nalgebra::Vector3;
use std::fmt;
use std::str::FromStr;

/// Lighting term written to the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    ObservedArea,
    Diffuse,
    Specular,
    #[default]
    Combined,
}

impl ShadingMode {
    /// ObservedArea -> Diffuse -> Specular -> Combined -> ObservedArea.
    pub fn next(self) -> Self {
        match self {
            ShadingMode::ObservedArea => ShadingMode::Diffuse,
            ShadingMode::Diffuse => ShadingMode::Specular,
            ShadingMode::Specular => ShadingMode::Combined,
            ShadingMode::Combined => ShadingMode::ObservedArea,
        }
    }

    /// Parses a config/CLI string, falling back to `Combined` with a warning.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|e| {
            warn!("{}, using {}", e, ShadingMode::default());
            ShadingMode::default()
        })
    }
}

impl FromStr for ShadingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "observedarea" | "area" => Ok(ShadingMode::ObservedArea),
            "diffuse" => Ok(ShadingMode::Diffuse),
            "specular" => Ok(ShadingMode::Specular),
            "combined" | "full" => Ok(ShadingMode::Combined),
            _ => Err(format!("Unknown shading mode '{}'", s)),
        }
    }
}

impl fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShadingMode::ObservedArea => "observed-area",
            ShadingMode::Diffuse => "diffuse",
            ShadingMode::Specular => "specular",
            ShadingMode::Combined => "combined",
        };
        f.write_str(name)
    }
}

pub const DEFAULT_CLEAR_COLOR: [u8; 3] = [100, 100, 100];
pub const UNIFORM_CLEAR_COLOR: [u8; 3] = [36, 36, 36];

/// Render toggles, passed explicitly into every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub shading_mode: ShadingMode,
    pub use_normal_map: bool,
    pub show_depth: bool,
    pub show_bounding_box: bool,
    pub uniform_clear_color: bool,
    pub rotation_enabled: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shading_mode: ShadingMode::default(),
            use_normal_map: true,
            show_depth: false,
            show_bounding_box: false,
            uniform_clear_color: false,
            rotation_enabled: true,
        }
    }
}

impl RenderSettings {
    pub fn cycle_shading_mode(&mut self) {
        self.shading_mode = self.shading_mode.next();
        info!("Shading mode: {}", self.shading_mode);
    }

    pub fn toggle_normal_map(&mut self) {
        self.use_normal_map = !self.use_normal_map;
        info!("Normal mapping: {}", on_off(self.use_normal_map));
    }

    pub fn toggle_depth_view(&mut self) {
        self.show_depth = !self.show_depth;
        info!("Depth visualization: {}", on_off(self.show_depth));
    }

    pub fn toggle_bounding_box_view(&mut self) {
        self.show_bounding_box = !self.show_bounding_box;
        info!("Bounding box visualization: {}", on_off(self.show_bounding_box));
    }

    pub fn toggle_uniform_clear_color(&mut self) {
        self.uniform_clear_color = !self.uniform_clear_color;
        info!("Uniform clear color: {}", on_off(self.uniform_clear_color));
    }

    pub fn toggle_rotation(&mut self) {
        self.rotation_enabled = !self.rotation_enabled;
        info!("Rotation: {}", on_off(self.rotation_enabled));
    }

    /// Background color for the current frame, in [0, 1].
    pub fn clear_color(&self) -> Vector3<f32> {
        let [r, g, b] = if self.uniform_clear_color {
            UNIFORM_CLEAR_COLOR
        } else {
            DEFAULT_CLEAR_COLOR
        };
        Vector3::new(r as f32, g as f32, b as f32) / 255.0
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn shading_mode_cycles_through_all_four() {
        let mut mode = ShadingMode::ObservedArea;
        let mut seen = vec![mode];
        for _ in 0..4 {
            mode = mode.next();
            seen.push(mode);
        }
        assert_eq!(
            seen,
            vec![
                ShadingMode::ObservedArea,
                ShadingMode::Diffuse,
                ShadingMode::Specular,
                ShadingMode::Combined,
                ShadingMode::ObservedArea,
            ]
        );
    }

    #[test]
    fn shading_mode_parses_display_names() {
        for mode in [
            ShadingMode::ObservedArea,
            ShadingMode::Diffuse,
            ShadingMode::Specular,
            ShadingMode::Combined,
        ] {
            assert_eq!(mode.to_string().parse::<ShadingMode>(), Ok(mode));
        }
        assert_eq!("Observed_Area".parse::<ShadingMode>(), Ok(ShadingMode::ObservedArea));
        assert_eq!(ShadingMode::parse_or_default("phong"), ShadingMode::Combined);
    }

    #[test]
    fn toggles_flip_state() {
        let mut settings = RenderSettings::default();
        settings.toggle_depth_view();
        settings.toggle_normal_map();
        settings.cycle_shading_mode();
        assert!(settings.show_depth);
        assert!(!settings.use_normal_map);
        assert_eq!(settings.shading_mode, ShadingMode::ObservedArea);
    }

    #[test]
    fn clear_color_follows_uniform_toggle() {
        let mut settings = RenderSettings::default();
        assert_relative_eq!(settings.clear_color() * 255.0, Vector3::new(100.0, 100.0, 100.0), epsilon = 1e-4);
        settings.toggle_uniform_clear_color();
        assert!(settings.uniform_clear_color);
        assert!(settings.clear_color().x < 0.15);
    }
}
