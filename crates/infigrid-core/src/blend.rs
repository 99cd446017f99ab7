//! Blending and depth policy derived from opacity.

/// Clamps opacity into [0, 1]. NaN is treated as fully opaque.
#[must_use]
pub fn sanitize_opacity(opacity: f32) -> f32 {
    if opacity.is_nan() {
        1.0
    } else {
        opacity.clamp(0.0, 1.0)
    }
}

/// Whether a drawable renders as opaque or alpha-blended geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Depth-written, depth-tested.
    #[default]
    Opaque,
    /// Alpha-blended with depth writes off.
    Transparent,
}

/// Depth buffer usage for a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthPolicy {
    /// Whether fragments write depth.
    pub write: bool,
    /// Whether fragments are tested against existing depth.
    pub test: bool,
}

impl BlendMode {
    /// Selects the mode for an opacity value.
    ///
    /// The switch is a hard step: exactly 1 is opaque, anything below is
    /// transparent. Values above 1 clamp to opaque.
    #[must_use]
    pub fn from_opacity(opacity: f32) -> Self {
        if sanitize_opacity(opacity) >= 1.0 {
            BlendMode::Opaque
        } else {
            BlendMode::Transparent
        }
    }

    #[must_use]
    pub fn is_transparent(self) -> bool {
        self == BlendMode::Transparent
    }

    /// Depth policy for the grid plane.
    ///
    /// A transparent grid still tests against scene depth but stops writing
    /// it, so geometry drawn after it beneath the plane is not culled.
    #[must_use]
    pub fn grid_depth_policy(self) -> DepthPolicy {
        match self {
            BlendMode::Opaque => DepthPolicy {
                write: true,
                test: true,
            },
            BlendMode::Transparent => DepthPolicy {
                write: false,
                test: true,
            },
        }
    }

    /// Depth policy for axis indicator meshes.
    ///
    /// A transparent indicator ignores depth entirely so it stays visible
    /// through the plane it pierces.
    #[must_use]
    pub fn indicator_depth_policy(self) -> DepthPolicy {
        match self {
            BlendMode::Opaque => DepthPolicy {
                write: true,
                test: true,
            },
            BlendMode::Transparent => DepthPolicy {
                write: false,
                test: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_opacity() {
        assert_eq!(sanitize_opacity(0.5), 0.5);
        assert_eq!(sanitize_opacity(-1.0), 0.0);
        assert_eq!(sanitize_opacity(2.0), 1.0);
        assert_eq!(sanitize_opacity(f32::NAN), 1.0);
    }

    #[test]
    fn test_blend_mode_step_at_one() {
        assert_eq!(BlendMode::from_opacity(1.0), BlendMode::Opaque);
        assert_eq!(BlendMode::from_opacity(1.5), BlendMode::Opaque);
        assert_eq!(
            BlendMode::from_opacity(1.0 - f32::EPSILON),
            BlendMode::Transparent
        );
        assert_eq!(BlendMode::from_opacity(0.5), BlendMode::Transparent);
        assert_eq!(BlendMode::from_opacity(0.0), BlendMode::Transparent);
    }

    #[test]
    fn test_depth_policies() {
        let opaque = BlendMode::Opaque;
        let transparent = BlendMode::Transparent;
        assert!(opaque.grid_depth_policy().write);
        assert!(opaque.grid_depth_policy().test);
        assert!(!transparent.grid_depth_policy().write);
        assert!(transparent.grid_depth_policy().test);
        assert!(!transparent.indicator_depth_policy().test);
        assert!(transparent.is_transparent());
    }

    #[test]
    fn test_depth_policy_is_constant_on_each_side() {
        let below: Vec<_> = [0.0, 0.25, 0.5, 0.99, 0.999_99]
            .iter()
            .map(|&o| BlendMode::from_opacity(o).grid_depth_policy())
            .collect();
        assert!(below.windows(2).all(|w| w[0] == w[1]));
        assert_ne!(
            below[0],
            BlendMode::from_opacity(1.0).grid_depth_policy()
        );
    }
}
