use super::{AttributePanel, FieldSpec, PanelAttribute};
use crate::config::EditorConfig;
use crate::splat::Transform;
use glam::{EulerRot, Quat, Vec3};

pub type TransformPanel = AttributePanel<Transform>;

impl TransformPanel {
    pub const POSITION_X: usize = 0;
    pub const ROTATION_X: usize = 3;
    pub const SCALE_X: usize = 6;
}

impl PanelAttribute for Transform {
    const TITLE: &'static str = "Transform";

    fn fields(config: &EditorConfig) -> Vec<FieldSpec> {
        let unbounded = f32::MIN..=f32::MAX;
        let min_scale = config.min_scale;
        vec![
            FieldSpec::new("Position X", unbounded.clone(), 0.01),
            FieldSpec::new("Position Y", unbounded.clone(), 0.01),
            FieldSpec::new("Position Z", unbounded, 0.01),
            FieldSpec::new("Rotation X", -180.0..=180.0, 0.5),
            FieldSpec::new("Rotation Y", -180.0..=180.0, 0.5),
            FieldSpec::new("Rotation Z", -180.0..=180.0, 0.5),
            FieldSpec::new("Scale X", min_scale..=f32::MAX, 0.01),
            FieldSpec::new("Scale Y", min_scale..=f32::MAX, 0.01),
            FieldSpec::new("Scale Z", min_scale..=f32::MAX, 0.01),
        ]
    }

    // Rotation is shown as XYZ euler angles in degrees.
    fn to_fields(self) -> Vec<f32> {
        let (rx, ry, rz) = self.rotation.to_euler(EulerRot::XYZ);
        vec![
            self.position.x,
            self.position.y,
            self.position.z,
            rx.to_degrees(),
            ry.to_degrees(),
            rz.to_degrees(),
            self.scale.x,
            self.scale.y,
            self.scale.z,
        ]
    }

    fn from_fields(values: &[f32]) -> Self {
        let get = |i: usize| values.get(i).copied().unwrap_or_default();
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            get(3).to_radians(),
            get(4).to_radians(),
            get(5).to_radians(),
        );
        Self {
            position: Vec3::new(get(0), get(1), get(2)),
            rotation,
            scale: Vec3::new(get(6), get(7), get(8)),
        }
    }
}
