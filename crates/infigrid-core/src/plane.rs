//! Grid plane orientation and world axes.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// One of the three world coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorldAxis {
    X,
    Y,
    Z,
}

impl WorldAxis {
    /// All axes in X, Y, Z order.
    pub const ALL: [WorldAxis; 3] = [WorldAxis::X, WorldAxis::Y, WorldAxis::Z];

    /// Returns the unit vector for this axis.
    #[must_use]
    pub fn unit(self) -> Vec3 {
        match self {
            WorldAxis::X => Vec3::X,
            WorldAxis::Y => Vec3::Y,
            WorldAxis::Z => Vec3::Z,
        }
    }

    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            WorldAxis::X => "X",
            WorldAxis::Y => "Y",
            WorldAxis::Z => "Z",
        }
    }
}

/// Which two world axes span the grid plane.
///
/// The plane always passes through the world origin. Plane coordinates are
/// called `u` and `v`; the line `v = 0` is the world axis along `u` and the
/// line `u = 0` is the world axis along `v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridPlane {
    /// Ground plane of a Y-up world.
    #[serde(rename = "XZ")]
    Xz,
    /// Ground plane of a Z-up world.
    #[default]
    #[serde(rename = "XY")]
    Xy,
    /// Side plane facing the X axis.
    #[serde(rename = "ZY")]
    Zy,
}

impl GridPlane {
    /// All planes in selector order.
    pub const ALL: [GridPlane; 3] = [GridPlane::Xz, GridPlane::Xy, GridPlane::Zy];

    /// Converts a selector index into a plane.
    ///
    /// Order: 0 = XZ, 1 = XY, 2 = ZY. Any other value is rejected rather than
    /// mapped to a default, since a silently swapped plane is hard to spot.
    pub fn from_index(index: u32) -> Result<Self> {
        match index {
            0 => Ok(GridPlane::Xz),
            1 => Ok(GridPlane::Xy),
            2 => Ok(GridPlane::Zy),
            other => Err(GridError::UnsupportedPlane(other)),
        }
    }

    /// Converts to a selector index.
    #[must_use]
    pub fn to_index(self) -> u32 {
        match self {
            GridPlane::Xz => 0,
            GridPlane::Xy => 1,
            GridPlane::Zy => 2,
        }
    }

    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GridPlane::Xz => "XZ",
            GridPlane::Xy => "XY",
            GridPlane::Zy => "ZY",
        }
    }

    /// World axis measured by the `u` plane coordinate.
    #[must_use]
    pub fn u_axis(self) -> WorldAxis {
        match self {
            GridPlane::Xz | GridPlane::Xy => WorldAxis::X,
            GridPlane::Zy => WorldAxis::Z,
        }
    }

    /// World axis measured by the `v` plane coordinate.
    #[must_use]
    pub fn v_axis(self) -> WorldAxis {
        match self {
            GridPlane::Xz => WorldAxis::Z,
            GridPlane::Xy | GridPlane::Zy => WorldAxis::Y,
        }
    }

    /// World axis perpendicular to the plane.
    #[must_use]
    pub fn normal_axis(self) -> WorldAxis {
        match self {
            GridPlane::Xz => WorldAxis::Y,
            GridPlane::Xy => WorldAxis::Z,
            GridPlane::Zy => WorldAxis::X,
        }
    }

    /// Returns whether the given world axis lies in this plane.
    #[must_use]
    pub fn contains_axis(self, axis: WorldAxis) -> bool {
        axis != self.normal_axis()
    }

    /// Projects a world position onto plane coordinates `(u, v)`.
    #[must_use]
    pub fn project(self, position: Vec3) -> Vec2 {
        Vec2::new(
            position.dot(self.u_axis().unit()),
            position.dot(self.v_axis().unit()),
        )
    }

    /// Lifts plane coordinates back to a world position on the plane.
    #[must_use]
    pub fn unproject(self, uv: Vec2) -> Vec3 {
        self.u_axis().unit() * uv.x + self.v_axis().unit() * uv.y
    }

    /// Signed distance of a world position from the plane.
    #[must_use]
    pub fn height_of(self, position: Vec3) -> f32 {
        position.dot(self.normal_axis().unit())
    }
}
