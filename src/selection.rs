use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// How a computed region combines with the existing selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionMode {
    Set,
    Add,
    Remove,
}

impl SelectionMode {
    pub fn name(self) -> &'static str {
        match self {
            SelectionMode::Set => "set",
            SelectionMode::Add => "add",
            SelectionMode::Remove => "remove",
        }
    }

    fn combine(self, current: bool, inside: bool) -> bool {
        match self {
            SelectionMode::Set => inside,
            SelectionMode::Add => current || inside,
            SelectionMode::Remove => current && !inside,
        }
    }
}

/// An oriented box: center, half-extents along each local axis, and orientation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxRegion {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub rotation: Quat,
}

impl BoxRegion {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Inclusive on the boundary.
    pub fn contains(&self, point: Vec3) -> bool {
        let local = self.rotation.inverse() * (point - self.center);
        let d = local.abs();
        d.x <= self.half_extents.x && d.y <= self.half_extents.y && d.z <= self.half_extents.z
    }

    /// `[centerX, centerY, centerZ, lenX, lenY, lenZ]`, the `select.byBox` payload
    pub fn to_params(&self) -> [f32; 6] {
        [
            self.center.x,
            self.center.y,
            self.center.z,
            self.half_extents.x,
            self.half_extents.y,
            self.half_extents.z,
        ]
    }

    /// Builds an axis-aligned region from a `select.byBox` payload.
    pub fn from_params(params: [f32; 6]) -> Self {
        Self::new(
            Vec3::new(params[0], params[1], params[2]),
            Vec3::new(params[3], params[4], params[5]),
        )
    }
}

/// Indices of the positions that fall inside `region`.
pub fn points_in_box(positions: &[Vec3], region: &BoxRegion) -> Vec<usize> {
    positions
        .iter()
        .enumerate()
        .filter(|(_, p)| region.contains(**p))
        .map(|(i, _)| i)
        .collect()
}

/// Combines the box membership of every position with the `current` selection.
///
/// `current` and the result are parallel to `positions`; a missing entry in
/// `current` counts as unselected.
pub fn select_by_box(
    positions: &[Vec3],
    current: &[bool],
    region: &BoxRegion,
    mode: SelectionMode,
) -> Vec<bool> {
    positions
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let was_selected = current.get(i).copied().unwrap_or(false);
            mode.combine(was_selected, region.contains(*p))
        })
        .collect()
}
