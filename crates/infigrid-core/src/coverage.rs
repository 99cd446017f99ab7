//! Per-fragment line coverage.
//!
//! This is the reference implementation of the grid fragment shader
//! (`shaders/grid.wgsl` in `infigrid-render`). Both must stay in lockstep:
//! every constant and formula here has a twin on the GPU side.
//!
//! A fragment is described by its plane coordinates `(u, v)` and the
//! screen-space footprint of those coordinates (what `fwidth` returns in the
//! shader). Lines are anti-aliased over one footprint so their edges stay
//! smooth at grazing angles and long distances.

use glam::{Vec2, Vec3};

use crate::blend::sanitize_opacity;
use crate::config::{GridConfig, DEFAULT_QUAD_HALF_EXTENT};
use crate::plane::{GridPlane, WorldAxis};

/// Smallest cell size used for drawing.
pub const MIN_CELL_SIZE: f32 = 1e-4;
/// Smallest anti-aliasing footprint.
pub const MIN_FOOTPRINT: f32 = 1e-6;
/// Center marker half width relative to the axis line half width.
pub const CENTER_MARKER_SCALE: f32 = 1.5;
/// Distance, as a fraction of the quad half extent, where fading begins.
pub const FADE_START_RATIO: f32 = 0.4;
/// Distance, as a fraction of the quad half extent, where the grid is gone.
pub const FADE_END_RATIO: f32 = 0.8;
/// The backing quad is never smaller than this many cells across (half extent).
pub const MIN_QUAD_CELLS: f32 = 4.0;

/// Hermite smoothstep, matching WGSL `smoothstep` for `edge0 < edge1`.
///
/// Degenerate edges collapse to a hard step instead of dividing by zero.
#[must_use]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Distance from `coord` to the nearest multiple of `spacing`.
#[must_use]
pub fn distance_to_nearest_line(coord: f32, spacing: f32) -> f32 {
    let t = coord / spacing;
    let f = t - t.floor();
    f.min(1.0 - f) * spacing
}

/// Coverage of a band of half width `half_width` centered at distance zero.
///
/// Lines thinner than a footprint are drawn one footprint wide and dimmed in
/// proportion, so they thin out instead of shimmering. A non-positive width
/// is invisible.
#[must_use]
pub fn band_coverage(distance: f32, half_width: f32, footprint: f32) -> f32 {
    if !(half_width > 0.0) {
        return 0.0;
    }
    let aa = footprint.abs().max(MIN_FOOTPRINT);
    let drawn = half_width.max(aa * 0.5);
    let coverage = 1.0 - smoothstep(drawn - aa, drawn + aa, distance);
    coverage * (half_width / drawn)
}

/// Coverage of a periodic family of lines spaced `spacing` apart.
#[must_use]
pub fn line_coverage(coord: f32, spacing: f32, half_width: f32, footprint: f32) -> f32 {
    band_coverage(
        distance_to_nearest_line(coord, spacing),
        half_width,
        footprint,
    )
}

/// Attenuation by distance from the camera: 1 up to `fade_start`, 0 past `fade_end`.
#[must_use]
pub fn distance_fade(distance: f32, fade_start: f32, fade_end: f32) -> f32 {
    1.0 - smoothstep(fade_start, fade_end, distance)
}

/// Which line family a fragment was resolved to, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCategory {
    /// The origin marker.
    Center,
    /// A world axis line.
    Axis(WorldAxis),
    /// A major grid line.
    Major,
    /// A minor grid line.
    Minor,
    /// No line; the plane is not drawn here.
    Transparent,
}

/// An axis line as seen from the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLine {
    pub axis: WorldAxis,
    pub color: Vec3,
    pub visible: bool,
}

/// Raw coverage of every line family at one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coverage {
    pub minor: f32,
    pub major: f32,
    /// The line `v = 0`, running along the `u` axis.
    pub u_axis: f32,
    /// The line `u = 0`, running along the `v` axis.
    pub v_axis: f32,
    pub center: f32,
}

/// Final color of one fragment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentShade {
    /// Topmost line family with non-zero coverage. Independent of fade and opacity.
    pub category: LineCategory,
    /// Composited straight (non-premultiplied) color.
    pub color: Vec3,
    /// Line alpha × distance fade × opacity.
    pub alpha: f32,
}

/// Draw-time parameters with every field clamped to a safe range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageParams {
    pub plane: GridPlane,
    pub cell_size: f32,
    pub major_factor: u32,
    pub minor_half_width: f32,
    pub major_half_width: f32,
    pub axis_half_width: f32,
    pub center_half_width: f32,
    pub minor_color: Vec3,
    pub major_color: Vec3,
    pub center_color: Vec3,
    pub u_axis: AxisLine,
    pub v_axis: AxisLine,
    pub opacity: f32,
    pub quad_half_extent: f32,
    pub fade_start: f32,
    pub fade_end: f32,
}

fn sanitize_cell_size(cell_size: f32) -> f32 {
    if cell_size.is_finite() {
        cell_size.max(MIN_CELL_SIZE)
    } else {
        MIN_CELL_SIZE
    }
}

fn sanitize_width(fraction: f32) -> f32 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

impl From<&GridConfig> for CoverageParams {
    fn from(config: &GridConfig) -> Self {
        let plane = config.plane();
        let cell_size = sanitize_cell_size(config.cell_size());
        let axis_half_width = sanitize_width(config.axis_line_width()) * cell_size * 0.5;

        let min_extent = cell_size * MIN_QUAD_CELLS;
        let quad_half_extent = if config.quad_half_extent().is_finite() {
            config.quad_half_extent().max(min_extent)
        } else {
            DEFAULT_QUAD_HALF_EXTENT.max(min_extent)
        };

        let axis_line = |axis: WorldAxis| AxisLine {
            axis,
            color: config.axis_color(axis),
            visible: config.show_axis(axis),
        };

        Self {
            plane,
            cell_size,
            major_factor: config.major_grid_factor().max(1),
            minor_half_width: sanitize_width(config.minor_line_width()) * cell_size * 0.5,
            major_half_width: sanitize_width(config.major_line_width()) * cell_size * 0.5,
            axis_half_width,
            center_half_width: axis_half_width * CENTER_MARKER_SCALE,
            minor_color: config.minor_line_color(),
            major_color: config.major_line_color(),
            center_color: config.center_color(),
            u_axis: axis_line(plane.u_axis()),
            v_axis: axis_line(plane.v_axis()),
            opacity: sanitize_opacity(config.opacity()),
            quad_half_extent,
            fade_start: quad_half_extent * FADE_START_RATIO,
            fade_end: quad_half_extent * FADE_END_RATIO,
        }
    }
}

/// "Over" compositing of a straight-alpha layer onto a straight-alpha destination.
fn layer(dst_color: Vec3, dst_alpha: f32, color: Vec3, coverage: f32) -> (Vec3, f32) {
    let alpha = coverage + dst_alpha * (1.0 - coverage);
    if alpha <= 0.0 {
        return (Vec3::ZERO, 0.0);
    }
    let rgb = (color * coverage + dst_color * dst_alpha * (1.0 - coverage)) / alpha;
    (rgb, alpha)
}

impl CoverageParams {
    /// World spacing of major lines.
    #[must_use]
    pub fn major_spacing(&self) -> f32 {
        self.cell_size * self.major_factor as f32
    }

    /// Evaluates every line family at plane coordinates `uv`.
    #[must_use]
    pub fn coverage(&self, uv: Vec2, footprint: Vec2) -> Coverage {
        let major_spacing = self.major_spacing();

        let minor = line_coverage(uv.x, self.cell_size, self.minor_half_width, footprint.x).max(
            line_coverage(uv.y, self.cell_size, self.minor_half_width, footprint.y),
        );
        let major = line_coverage(uv.x, major_spacing, self.major_half_width, footprint.x).max(
            line_coverage(uv.y, major_spacing, self.major_half_width, footprint.y),
        );

        let gate = |line: &AxisLine| if line.visible { 1.0 } else { 0.0 };
        let u_axis = band_coverage(uv.y.abs(), self.axis_half_width, footprint.y) * gate(&self.u_axis);
        let v_axis = band_coverage(uv.x.abs(), self.axis_half_width, footprint.x) * gate(&self.v_axis);

        let center = band_coverage(uv.x.abs(), self.center_half_width, footprint.x)
            * band_coverage(uv.y.abs(), self.center_half_width, footprint.y);

        Coverage {
            minor,
            major,
            u_axis,
            v_axis,
            center,
        }
    }

    /// Resolves the final color of a fragment.
    ///
    /// `camera_distance` is the world distance from the camera to the fragment.
    #[must_use]
    pub fn shade(&self, uv: Vec2, footprint: Vec2, camera_distance: f32) -> FragmentShade {
        let cov = self.coverage(uv, footprint);

        let category = if cov.center > 0.0 {
            LineCategory::Center
        } else if cov.u_axis > 0.0 {
            LineCategory::Axis(self.u_axis.axis)
        } else if cov.v_axis > 0.0 {
            LineCategory::Axis(self.v_axis.axis)
        } else if cov.major > 0.0 {
            LineCategory::Major
        } else if cov.minor > 0.0 {
            LineCategory::Minor
        } else {
            LineCategory::Transparent
        };

        let (mut color, mut alpha) = (Vec3::ZERO, 0.0);
        for (layer_color, coverage) in [
            (self.minor_color, cov.minor),
            (self.major_color, cov.major),
            (self.v_axis.color, cov.v_axis),
            (self.u_axis.color, cov.u_axis),
            (self.center_color, cov.center),
        ] {
            (color, alpha) = layer(color, alpha, layer_color, coverage);
        }

        let fade = distance_fade(camera_distance, self.fade_start, self.fade_end);

        FragmentShade {
            category,
            color,
            alpha: (alpha * fade * self.opacity).clamp(0.0, 1.0),
        }
    }
}
