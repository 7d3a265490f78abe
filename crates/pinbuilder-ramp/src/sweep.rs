//! Sweep calls in the kernel's script syntax.

use std::fmt;

use pinbuilder_math::Path;

/// One `path_sweep` invocation: a profile swept along a 3D path with a
/// per-station `[x_scale, 1]` scale.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepCall {
    /// Profile polygon in the sweep plane.
    pub cross_section: Path<2>,
    /// Lifted centerline.
    pub path: Path<3>,
    /// One scale pair per path point.
    pub scales: Path<2>,
}

impl fmt::Display for SweepCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "path_sweep({}, path3d(path_merge_collinear({})), method = \"manual\", normal = UP, scale = {}, relaxed = true);",
            self.cross_section, self.path, self.scales
        )
    }
}
