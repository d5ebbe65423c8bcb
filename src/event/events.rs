use crate::command::Command;
use crate::selection::SelectionMode;
use crate::splat::{ColorBand, SplatHandle, SplatId};
use glam::Vec3;

/// Every event carried by the bus, each with a fixed payload shape.
#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// The camera layer picked a world position under the cursor
    FocalPointPicked {
        splat: Option<SplatId>,
        position: Vec3,
    },
    CameraResize {
        width: f32,
        height: f32,
    },
    CameraOrtho(bool),
    /// Request to change the point selection of the selected splat
    SelectByBox {
        mode: SelectionMode,
        params: [f32; 6],
    },
    /// Relative multiplier for one color channel
    ColorUpdate {
        band: ColorBand,
        multiplier: f32,
    },
    /// A committed operation, already applied to its target
    EditAdd(Command),
    EditUndo,
    EditRedo,
    SelectionChanged(Option<SplatHandle>),
    ToolActivated {
        name: String,
    },
    ToolDeactivated {
        name: String,
    },
}

/// The payload-free discriminant of [`EditorEvent`], used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    FocalPointPicked,
    CameraResize,
    CameraOrtho,
    SelectByBox,
    ColorUpdate,
    EditAdd,
    EditUndo,
    EditRedo,
    SelectionChanged,
    ToolActivated,
    ToolDeactivated,
}

impl EventKind {
    /// The dotted event name
    pub fn name(self) -> &'static str {
        match self {
            EventKind::FocalPointPicked => "camera.focalPointPicked",
            EventKind::CameraResize => "camera.resize",
            EventKind::CameraOrtho => "camera.ortho",
            EventKind::SelectByBox => "select.byBox",
            EventKind::ColorUpdate => "color.update",
            EventKind::EditAdd => "edit.add",
            EventKind::EditUndo => "edit.undo",
            EventKind::EditRedo => "edit.redo",
            EventKind::SelectionChanged => "selection.changed",
            EventKind::ToolActivated => "tool.activated",
            EventKind::ToolDeactivated => "tool.deactivated",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl EditorEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            EditorEvent::FocalPointPicked { .. } => EventKind::FocalPointPicked,
            EditorEvent::CameraResize { .. } => EventKind::CameraResize,
            EditorEvent::CameraOrtho(_) => EventKind::CameraOrtho,
            EditorEvent::SelectByBox { .. } => EventKind::SelectByBox,
            EditorEvent::ColorUpdate { .. } => EventKind::ColorUpdate,
            EditorEvent::EditAdd(_) => EventKind::EditAdd,
            EditorEvent::EditUndo => EventKind::EditUndo,
            EditorEvent::EditRedo => EventKind::EditRedo,
            EditorEvent::SelectionChanged(_) => EventKind::SelectionChanged,
            EditorEvent::ToolActivated { .. } => EventKind::ToolActivated,
            EditorEvent::ToolDeactivated { .. } => EventKind::ToolDeactivated,
        }
    }
}
