use super::Tool;
use crate::camera::CameraHandle;
use crate::config::EditorConfig;
use crate::error::Result;
use crate::event::{EditorEvent, EventKind, Events};
use crate::gizmo::{Pivot, PivotHandle, TranslateGizmo};
use crate::selection::{BoxRegion, SelectionMode};
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

pub const EVENT_GROUP: &str = "BoxSelection";

// World units per screen point of gizmo drag, at gizmo size 1
const GIZMO_DRAG_SPEED: f32 = 0.01;

/// The selection volume: a pivot plus half-extents along its axes
#[derive(Debug)]
pub struct BoxShape {
    pub pivot: PivotHandle,
    len: Vec3,
    min_extent: f32,
}

impl BoxShape {
    pub fn new(extent: f32, min_extent: f32) -> Self {
        Self {
            pivot: Rc::new(RefCell::new(Pivot::default())),
            len: Vec3::splat(extent.max(min_extent)),
            min_extent,
        }
    }

    pub fn len_x(&self) -> f32 {
        self.len.x
    }

    pub fn len_y(&self) -> f32 {
        self.len.y
    }

    pub fn len_z(&self) -> f32 {
        self.len.z
    }

    // Extents below the minimum are clamped the same way the numeric inputs do.
    pub fn set_len_x(&mut self, value: f32) {
        self.len.x = value.max(self.min_extent);
    }

    pub fn set_len_y(&mut self, value: f32) {
        self.len.y = value.max(self.min_extent);
    }

    pub fn set_len_z(&mut self, value: f32) {
        self.len.z = value.max(self.min_extent);
    }

    pub fn region(&self) -> BoxRegion {
        let pivot = self.pivot.borrow();
        BoxRegion::new(pivot.position, self.len).with_rotation(pivot.rotation)
    }
}

/// Selects points inside a box placed with a translate gizmo.
pub struct BoxSelectionTool {
    events: Rc<Events>,
    camera: CameraHandle,
    config: EditorConfig,
    shape: Rc<RefCell<BoxShape>>,
    gizmo: Rc<RefCell<TranslateGizmo>>,
    toolbar_visible: bool,
    in_scene: bool,
    active: bool,
}

impl std::fmt::Debug for BoxSelectionTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxSelectionTool")
            .field("shape", &self.shape.borrow())
            .field("gizmo", &self.gizmo.borrow())
            .field("toolbar_visible", &self.toolbar_visible)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl BoxSelectionTool {
    pub fn new(events: Rc<Events>, camera: CameraHandle, config: &EditorConfig) -> Self {
        let shape = Rc::new(RefCell::new(BoxShape::new(
            config.default_box_extent,
            config.min_box_extent,
        )));
        let gizmo = Rc::new(RefCell::new(TranslateGizmo::new()));

        {
            let shape = Rc::clone(&shape);
            let gizmo = Rc::clone(&gizmo);
            events.on_group(EVENT_GROUP, &[EventKind::FocalPointPicked], move |event| {
                if let EditorEvent::FocalPointPicked { position, .. } = event {
                    let shape = shape.borrow();
                    shape.pivot.borrow_mut().position = *position;
                    gizmo.borrow_mut().attach(&shape.pivot);
                }
                Ok(())
            });
        }

        {
            let camera = Rc::clone(&camera);
            let gizmo = Rc::clone(&gizmo);
            let config = config.clone();
            events.on_group(
                EVENT_GROUP,
                &[EventKind::CameraResize, EventKind::CameraOrtho],
                move |_| {
                    let size = camera.borrow().gizmo_size(&config);
                    gizmo.borrow_mut().set_size(size);
                    Ok(())
                },
            );
        }

        Self {
            events,
            camera,
            config: config.clone(),
            shape,
            gizmo,
            toolbar_visible: false,
            in_scene: false,
            active: false,
        }
    }

    pub fn shape(&self) -> &Rc<RefCell<BoxShape>> {
        &self.shape
    }

    pub fn gizmo(&self) -> &Rc<RefCell<TranslateGizmo>> {
        &self.gizmo
    }

    pub fn toolbar_visible(&self) -> bool {
        self.toolbar_visible
    }

    /// Whether the box is currently shown in the scene
    pub fn in_scene(&self) -> bool {
        self.in_scene
    }

    pub fn update_gizmo_size(&self) {
        let size = self.camera.borrow().gizmo_size(&self.config);
        self.gizmo.borrow_mut().set_size(size);
    }

    /// Screen-space drag applied to the gizmo: x maps to world x, y (down) to world -y.
    pub fn drag_gizmo(&self, delta: egui::Vec2) -> bool {
        let scale = GIZMO_DRAG_SPEED * self.gizmo.borrow().size();
        let world = Vec3::new(delta.x, -delta.y, 0.0) * scale;
        self.gizmo.borrow_mut().translate(world)
    }

    fn gizmo_handle_ui(&self, ui: &mut egui::Ui) {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(ui.available_width(), 48.0), egui::Sense::drag());
        ui.painter()
            .rect_stroke(rect, 4.0, ui.visuals().widgets.inactive.fg_stroke);
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "Drag to move box",
            egui::FontId::default(),
            ui.visuals().text_color(),
        );

        if response.drag_started() {
            self.gizmo.borrow_mut().begin_drag();
        }
        if response.dragged() {
            self.drag_gizmo(response.drag_delta());
        }
        if response.drag_stopped() {
            if let Some((from, to)) = self.gizmo.borrow_mut().end_drag() {
                log::debug!("box moved from {} to {}", from, to);
            }
        }
    }

    /// Publishes the current box as a `select.byBox` request.
    pub fn apply(&self, mode: SelectionMode) -> Result<()> {
        let params = self.shape.borrow().region().to_params();
        log::debug!("select.byBox {} {:?}", mode.name(), params);
        self.events.fire(&EditorEvent::SelectByBox { mode, params })
    }
}

impl Tool for BoxSelectionTool {
    fn name(&self) -> &'static str {
        "BoxSelection"
    }

    fn activate(&mut self) -> Result<()> {
        self.in_scene = true;
        self.gizmo.borrow_mut().attach(&self.shape.borrow().pivot);
        self.toolbar_visible = true;
        self.events.activate_group(EVENT_GROUP)?;
        self.update_gizmo_size();
        self.active = true;
        Ok(())
    }

    fn deactivate(&mut self) -> Result<()> {
        self.events.deactivate_group(EVENT_GROUP)?;
        self.toolbar_visible = false;
        self.gizmo.borrow_mut().detach();
        self.in_scene = false;
        self.active = false;
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn ui(&mut self, ui: &mut egui::Ui) -> Result<()> {
        if !self.toolbar_visible {
            return Ok(());
        }

        let mut requested = None;
        ui.horizontal(|ui| {
            if ui.button("Set").clicked() {
                requested = Some(SelectionMode::Set);
            }
            if ui.button("Add").clicked() {
                requested = Some(SelectionMode::Add);
            }
            if ui.button("Remove").clicked() {
                requested = Some(SelectionMode::Remove);
            }
        });

        let min = self.config.min_box_extent;
        let precision = self.config.input_precision;
        let mut shape = self.shape.borrow_mut();
        let (mut x, mut y, mut z) = (shape.len_x(), shape.len_y(), shape.len_z());
        ui.horizontal(|ui| {
            for (label, value) in [("LenX", &mut x), ("LenY", &mut y), ("LenZ", &mut z)] {
                ui.label(label);
                ui.add(
                    egui::DragValue::new(value)
                        .range(min..=f32::MAX)
                        .speed(0.01)
                        .fixed_decimals(precision),
                );
            }
        });
        shape.set_len_x(x);
        shape.set_len_y(y);
        shape.set_len_z(z);
        drop(shape);

        self.gizmo_handle_ui(ui);

        match requested {
            Some(mode) => self.apply(mode),
            None => Ok(()),
        }
    }
}
