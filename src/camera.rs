use crate::config::EditorConfig;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    #[default]
    Perspective,
    Orthographic,
}

/// The part of the camera the tools read. Owned by the camera layer and
/// updated before it fires `camera.resize` / `camera.ortho`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub projection: Projection,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

pub type CameraHandle = Rc<RefCell<CameraState>>;

impl Default for CameraState {
    fn default() -> Self {
        Self {
            projection: Projection::Perspective,
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }
}

impl CameraState {
    pub fn is_ortho(&self) -> bool {
        self.projection == Projection::Orthographic
    }

    /// On-screen size for gizmos so they keep a constant apparent size.
    ///
    /// Viewport sides are taken as at least one pixel.
    pub fn gizmo_size(&self, config: &EditorConfig) -> f32 {
        if self.is_ortho() {
            config.gizmo_ortho_scale / self.viewport_height.max(1.0)
        } else {
            config.gizmo_perspective_scale / self.viewport_width.max(self.viewport_height).max(1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ortho_size_uses_height_only() {
        let camera = CameraState {
            projection: Projection::Orthographic,
            viewport_width: 4000.0,
            viewport_height: 900.0,
        };
        assert_relative_eq!(camera.gizmo_size(&EditorConfig::default()), 1.25);
    }

    #[test]
    fn perspective_size_uses_larger_side() {
        let camera = CameraState {
            projection: Projection::Perspective,
            viewport_width: 600.0,
            viewport_height: 800.0,
        };
        assert_relative_eq!(camera.gizmo_size(&EditorConfig::default()), 1.5);
    }

    #[test]
    fn empty_viewport_gives_finite_size() {
        let camera = CameraState {
            projection: Projection::Orthographic,
            viewport_width: 0.0,
            viewport_height: 0.0,
        };
        assert_relative_eq!(camera.gizmo_size(&EditorConfig::default()), 1125.0);
    }
}
