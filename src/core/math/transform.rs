use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for creating various transformation matrices.
///
/// Left-handed: the camera looks down +Z and projections map depth to [0, 1].
/// Matrices act on column vectors, so a row-vector chain `world * view * proj`
/// is written `proj * view * world` here.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Z-axis.
    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,  -s,   0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a non-uniform scaling matrix.
    pub fn scaling_nonuniform(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Translation, then XYZ Euler rotation (degrees), then scale, applied to model space.
    pub fn world(position: &Vector3<f32>, rotation_deg: &Vector3<f32>, scale: &Vector3<f32>) -> Matrix4<f32> {
        let rotation = Self::rotation_x(rotation_deg.x.to_radians())
            * Self::rotation_y(rotation_deg.y.to_radians())
            * Self::rotation_z(rotation_deg.z.to_radians());
        Self::translation(position) * rotation * Self::scaling_nonuniform(scale)
    }

    /// Creates a View matrix (Look-At, Left-Handed).
    /// Transforms world space coordinates to camera space, camera looking down +Z.
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let z_axis = (target - eye).normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        let rotation = Matrix4::new(
            x_axis.x, x_axis.y, x_axis.z, 0.0,
            y_axis.x, y_axis.y, y_axis.z, 0.0,
            z_axis.x, z_axis.y, z_axis.z, 0.0,
            0.0,      0.0,      0.0,      1.0,
        );

        let translation = Self::translation(&-eye.coords);

        rotation * translation
    }

    /// Creates a Perspective Projection matrix (Left-Handed, depth in [0, 1]).
    /// Clip w equals the view-space depth.
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let y_scale = 1.0 / (fov_y_rad / 2.0).tan();
        let x_scale = y_scale / aspect_ratio;
        let range = far / (far - near);

        Matrix4::new(
            x_scale, 0.0,     0.0,   0.0,
            0.0,     y_scale, 0.0,   0.0,
            0.0,     0.0,     range, -near * range,
            0.0,     0.0,     1.0,   0.0,
        )
    }

    /// Creates an Orthographic Projection matrix (Left-Handed, depth in [0, 1]).
    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Matrix4<f32> {
        let rl = 1.0 / (right - left);
        let tb = 1.0 / (top - bottom);
        let fnr = 1.0 / (far - near);

        Matrix4::new(
            2.0 * rl, 0.0,      0.0, -(right + left) * rl,
            0.0,      2.0 * tb, 0.0, -(top + bottom) * tb,
            0.0,      0.0,      fnr, -near * fnr,
            0.0,      0.0,      0.0, 1.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Performs perspective division on x, y and z, leaving w untouched.
///
/// A zero w yields non-finite coordinates, which the frustum test rejects.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Vector4<f32> {
    let w = clip.w;
    Vector4::new(clip.x / w, clip.y / w, clip.z / w, w)
}

/// Converts NDC coordinates to Screen coordinates (Viewport Transform).
/// Note: Y-axis is flipped (NDC +Y is up, Screen +Y is down).
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new((ndc_x + 1.0) / 2.0 * width, (1.0 - ndc_y) / 2.0 * height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn view_at_origin_looking_forward_is_identity() {
        let view = TransformFactory::view(
            &Point3::origin(),
            &Point3::new(0.0, 0.0, 1.0),
            &Vector3::y(),
        );
        assert_relative_eq!(view, Matrix4::identity(), epsilon = 1e-6);
    }

    #[test]
    fn perspective_maps_near_and_far_to_unit_depth() {
        let proj = TransformFactory::perspective(1.0, 90.0_f32.to_radians(), 0.1, 100.0);

        let near = apply_perspective_division(&(proj * Vector4::new(0.0, 0.0, 0.1, 1.0)));
        let far = apply_perspective_division(&(proj * Vector4::new(0.0, 0.0, 100.0, 1.0)));

        assert_relative_eq!(near.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
        assert_relative_eq!(far.w, 100.0, epsilon = 1e-4);
    }

    #[test]
    fn orthographic_maps_depth_range() {
        let proj = TransformFactory::orthographic(-1.0, 1.0, -1.0, 1.0, 1.0, 3.0);
        let mid = proj * Vector4::new(1.0, -1.0, 2.0, 1.0);
        assert_relative_eq!(mid, Vector4::new(1.0, -1.0, 0.5, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn perspective_division_keeps_w() {
        let ndc = apply_perspective_division(&Vector4::new(2.0, 4.0, 1.0, 2.0));
        assert_relative_eq!(ndc, Vector4::new(1.0, 2.0, 0.5, 2.0));
    }

    #[test]
    fn ndc_corners_map_to_screen_corners() {
        assert_relative_eq!(ndc_to_screen(-1.0, 1.0, 640.0, 480.0), Point2::new(0.0, 0.0));
        assert_relative_eq!(ndc_to_screen(1.0, -1.0, 640.0, 480.0), Point2::new(640.0, 480.0));
        assert_relative_eq!(ndc_to_screen(0.0, 0.0, 640.0, 480.0), Point2::new(320.0, 240.0));
    }
}
