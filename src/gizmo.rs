use glam::{Quat, Vec3};
use std::cell::RefCell;
use std::rc::Rc;

/// A position/orientation that a gizmo can be attached to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pivot {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pivot {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

pub type PivotHandle = Rc<RefCell<Pivot>>;

/// Translation handle state. Drawing is left to the renderer; this keeps the
/// attachment, the visual size, and the drag bookkeeping.
#[derive(Debug, Default)]
pub struct TranslateGizmo {
    attached: Option<PivotHandle>,
    size: f32,
    drag_origin: Option<Vec3>,
    /// Start and end position of the last finished drag
    completed_drag: Option<(Vec3, Vec3)>,
}

impl TranslateGizmo {
    pub fn new() -> Self {
        Self {
            size: 1.0,
            ..Default::default()
        }
    }

    /// Attaches to `pivot`, replacing any previous attachment.
    pub fn attach(&mut self, pivot: &PivotHandle) {
        self.drag_origin = None;
        self.attached = Some(Rc::clone(pivot));
    }

    pub fn detach(&mut self) {
        self.drag_origin = None;
        self.attached = None;
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    pub fn is_attached_to(&self, pivot: &PivotHandle) -> bool {
        self.attached.as_ref().is_some_and(|p| Rc::ptr_eq(p, pivot))
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = size;
    }

    pub fn last_drag(&self) -> Option<(Vec3, Vec3)> {
        self.completed_drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    pub fn begin_drag(&mut self) {
        if let Some(pivot) = &self.attached {
            self.drag_origin = Some(pivot.borrow().position);
        }
    }

    /// Moves the attached pivot by `delta`. Returns false when nothing is attached.
    pub fn translate(&mut self, delta: Vec3) -> bool {
        match &self.attached {
            Some(pivot) => {
                pivot.borrow_mut().position += delta;
                true
            }
            None => false,
        }
    }

    pub fn end_drag(&mut self) -> Option<(Vec3, Vec3)> {
        let origin = self.drag_origin.take()?;
        let end = self.attached.as_ref()?.borrow().position;
        self.completed_drag = Some((origin, end));
        self.completed_drag
    }
}
