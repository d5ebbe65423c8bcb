use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

/// Shared, mutable reference to a splat. Tools and operations hold these;
/// the session owns the list they point into.
pub type SplatHandle = Rc<RefCell<Splat>>;

/// A unique identifier for a splat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SplatId(pub Uuid);

impl SplatId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SplatId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SplatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A color channel addressed by the color edit tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorBand {
    Red,
    Green,
    Blue,
}

impl ColorBand {
    pub const ALL: [ColorBand; 3] = [ColorBand::Red, ColorBand::Green, ColorBand::Blue];

    pub fn index(self) -> usize {
        match self {
            ColorBand::Red => 0,
            ColorBand::Green => 1,
            ColorBand::Blue => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorBand::Red => "red",
            ColorBand::Green => "green",
            ColorBand::Blue => "blue",
        }
    }
}

/// White balance adjustments applied to the whole splat
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorAdjustments {
    pub temperature: f32,
    pub tint: f32,
}

/// Placement of a splat in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// A single point record of the splat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplatPoint {
    /// Position in splat-local space
    pub position: Vec3,
    /// Linear RGB color
    pub color: [f32; 3],
}

impl SplatPoint {
    pub fn new(position: Vec3, color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointState {
    pub selected: bool,
    pub deleted: bool,
}

/// A point cloud asset and its editable attributes
#[derive(Debug, Clone)]
pub struct Splat {
    id: SplatId,
    pub name: String,
    points: Vec<SplatPoint>,
    state: Vec<PointState>,
    pub color_adjustments: ColorAdjustments,
    pub transform: Transform,
}

impl Splat {
    pub fn new(name: &str, points: Vec<SplatPoint>) -> Self {
        let state = vec![PointState::default(); points.len()];
        Self {
            id: SplatId::new(),
            name: name.to_string(),
            points,
            state,
            color_adjustments: ColorAdjustments::default(),
            transform: Transform::default(),
        }
    }

    pub fn into_handle(self) -> SplatHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> SplatId {
        self.id
    }

    pub fn points(&self) -> &[SplatPoint] {
        &self.points
    }

    pub fn state(&self) -> &[PointState] {
        &self.state
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point positions with the splat transform applied
    pub fn world_positions(&self) -> Vec<Vec3> {
        let matrix = self.transform.to_matrix();
        self.points
            .iter()
            .map(|p| matrix.transform_point3(p.position))
            .collect()
    }

    pub fn selection(&self) -> Vec<bool> {
        self.state.iter().map(|s| s.selected).collect()
    }

    pub fn deleted(&self) -> Vec<bool> {
        self.state.iter().map(|s| s.deleted).collect()
    }

    /// Overwrites the selection flags. Deleted points stay unselected.
    pub fn set_selection(&mut self, selection: &[bool]) {
        for (state, &selected) in self.state.iter_mut().zip(selection) {
            state.selected = selected && !state.deleted;
        }
    }

    pub fn set_deleted(&mut self, deleted: &[bool]) {
        for (state, &deleted) in self.state.iter_mut().zip(deleted) {
            state.deleted = deleted;
        }
    }

    pub fn selected_count(&self) -> usize {
        self.state.iter().filter(|s| s.selected && !s.deleted).count()
    }

    pub fn deleted_count(&self) -> usize {
        self.state.iter().filter(|s| s.deleted).count()
    }

    /// Multiplies one color channel of every selected, non-deleted point.
    pub fn scale_band(&mut self, band: ColorBand, multiplier: f32) {
        let channel = band.index();
        for (point, state) in self.points.iter_mut().zip(&self.state) {
            if state.selected && !state.deleted {
                point.color[channel] *= multiplier;
            }
        }
    }
}

/// Generates a regular grid of grey points, used for the demo scene.
pub fn grid_points(count_per_axis: usize, spacing: f32) -> Vec<SplatPoint> {
    let half = (count_per_axis as f32 - 1.0) * spacing * 0.5;
    let mut points = Vec::with_capacity(count_per_axis.pow(3));
    for x in 0..count_per_axis {
        for y in 0..count_per_axis {
            for z in 0..count_per_axis {
                let position = Vec3::new(
                    x as f32 * spacing - half,
                    y as f32 * spacing - half,
                    z as f32 * spacing - half,
                );
                points.push(SplatPoint::new(position, [0.5, 0.5, 0.5]));
            }
        }
    }
    points
}
