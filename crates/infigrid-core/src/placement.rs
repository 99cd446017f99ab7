//! Camera-following placement of the backing quad.
//!
//! The grid is drawn on a finite square quad that is moved under the camera
//! every frame. Its center is snapped to a multiple of the line spacing, so
//! moving the quad never moves a line: lines are evaluated from world
//! coordinates and the snap keeps the quad's local lattice aligned with them.

use glam::{Mat4, Vec2, Vec3};

use crate::coverage::CoverageParams;
use crate::plane::GridPlane;

/// Where the backing quad sits for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadPlacement {
    pub plane: GridPlane,
    /// Quad center in plane coordinates.
    pub center_uv: Vec2,
    /// Quad center in world space (on the plane).
    pub center: Vec3,
    /// Granularity of recentring.
    pub snap_step: f32,
    pub half_extent: f32,
}

/// Recentring granularity: the major spacing when it is small next to the
/// quad, the cell size otherwise.
#[must_use]
pub fn snap_step(params: &CoverageParams) -> f32 {
    let major = params.major_spacing();
    if major <= params.quad_half_extent * 0.25 {
        major
    } else {
        params.cell_size
    }
}

impl QuadPlacement {
    /// Places the quad under `camera_position`.
    ///
    /// Only the in-plane component of the camera position matters; a camera
    /// far above the plane gets the same quad as one just above it.
    #[must_use]
    pub fn compute(params: &CoverageParams, camera_position: Vec3) -> Self {
        let plane = params.plane;
        let step = snap_step(params);
        let camera_uv = plane.project(camera_position);
        let center_uv = if camera_uv.is_finite() {
            (camera_uv / step).round() * step
        } else {
            Vec2::ZERO
        };

        Self {
            plane,
            center_uv,
            center: plane.unproject(center_uv),
            snap_step: step,
            half_extent: params.quad_half_extent,
        }
    }

    /// Model matrix taking the unit quad `[-1, 1]²` (local x = u, local y = v)
    /// to world space.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        let u = self.plane.u_axis().unit();
        let v = self.plane.v_axis().unit();
        let n = u.cross(v);
        Mat4::from_cols(
            (u * self.half_extent).extend(0.0),
            (v * self.half_extent).extend(0.0),
            n.extend(0.0),
            self.center.extend(1.0),
        )
    }

    /// Returns whether a plane coordinate lies on the quad.
    #[must_use]
    pub fn contains(&self, uv: Vec2) -> bool {
        let d = (uv - self.center_uv).abs();
        d.x <= self.half_extent && d.y <= self.half_extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::coverage::{distance_to_nearest_line, line_coverage};
    use proptest::prelude::*;

    fn params_for(config: &GridConfig) -> CoverageParams {
        CoverageParams::from(config)
    }

    #[test]
    fn test_snap_step_prefers_major_spacing() {
        let p = params_for(&GridConfig::default());
        assert_eq!(snap_step(&p), 10.0);

        let mut config = GridConfig::default();
        config.set_quad_half_extent(20.0);
        assert_eq!(snap_step(&params_for(&config)), 1.0);
    }

    #[test]
    fn test_quad_follows_camera_in_plane() {
        let p = params_for(&GridConfig::default());
        let placement = QuadPlacement::compute(&p, Vec3::new(123.0, -47.0, 500.0));
        assert_eq!(placement.center_uv, Vec2::new(120.0, -50.0));
        assert_eq!(placement.center, Vec3::new(120.0, -50.0, 0.0));
        assert!(placement.contains(Vec2::new(123.0, -47.0)));
    }

    #[test]
    fn test_quad_ignores_camera_height() {
        let p = params_for(&GridConfig::default());
        let low = QuadPlacement::compute(&p, Vec3::new(5.0, 5.0, 1.0));
        let high = QuadPlacement::compute(&p, Vec3::new(5.0, 5.0, 1.0e6));
        assert_eq!(low, high);
    }

    #[test]
    fn test_non_finite_camera_centers_at_origin() {
        let p = params_for(&GridConfig::default());
        let placement = QuadPlacement::compute(&p, Vec3::new(f32::NAN, 0.0, 0.0));
        assert_eq!(placement.center, Vec3::ZERO);
    }

    #[test]
    fn test_model_matrix_maps_corners() {
        let config = GridConfig::new(GridPlane::Xz);
        let p = params_for(&config);
        let placement = QuadPlacement::compute(&p, Vec3::new(31.0, 8.0, -12.0));
        let m = placement.model_matrix();
        let corner = m.transform_point3(Vec3::new(1.0, 1.0, 0.0));
        let expected = placement.center + Vec3::new(1.0, 0.0, 1.0) * placement.half_extent;
        assert!((corner - expected).length() < 1e-3);
        assert_eq!(corner.y, 0.0);
    }

    proptest! {
        #[test]
        fn prop_recentring_never_moves_lines(
            cx in -5000.0f32..5000.0,
            cy in -5000.0f32..5000.0,
            cell in 0.1f32..48.0,
            factor in 2u32..10,
        ) {
            let mut config = GridConfig::default();
            config.set_cell_size(cell);
            config.set_major_grid_factor(factor);
            let p = params_for(&config);
            let placement = QuadPlacement::compute(&p, Vec3::new(cx, cy, 3.0));

            // The snapped center sits on a minor line (and on a major line when
            // snapping by the major spacing), so the quad-local lattice is the
            // world lattice.
            let tol = placement.snap_step * 1e-3 + 1e-2;
            for c in [placement.center_uv.x, placement.center_uv.y] {
                prop_assert!(distance_to_nearest_line(c, cell) < tol);
                if placement.snap_step > cell {
                    prop_assert!(distance_to_nearest_line(c, p.major_spacing()) < tol);
                }
            }
        }

        #[test]
        fn prop_line_pattern_is_translation_invariant(
            local in -100.0f32..100.0,
            steps in -50i32..50,
        ) {
            // Translating the camera moves the quad by whole snap steps, so the
            // pattern seen at a fixed quad-local offset does not change.
            let p = params_for(&GridConfig::default());
            let a = QuadPlacement::compute(&p, Vec3::ZERO);
            let b = QuadPlacement::compute(&p, Vec3::new(steps as f32 * a.snap_step + 0.3, 0.0, 0.0));
            let before = line_coverage(a.center_uv.x + local, p.cell_size, p.minor_half_width, 0.05);
            let after = line_coverage(b.center_uv.x + local, p.cell_size, p.minor_half_width, 0.05);
            prop_assert!((before - after).abs() < 1e-3);
        }
    }
}
