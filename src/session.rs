use crate::camera::{CameraHandle, CameraState, Projection};
use crate::command::{Command, CommandHistory, DeleteSelectionOp, SelectionOp};
use crate::config::EditorConfig;
use crate::error::{EditorError, Result};
use crate::event::{connect_history, EditorEvent, EventKind, Events};
use crate::panels::{ColorPanel, TransformPanel};
use crate::selection::{select_by_box, BoxRegion};
use crate::splat::{Splat, SplatHandle};
use crate::tools::{BoxSelectionTool, ColorEditTool, ToolManager, ToolType};
use glam::Vec3;
use serde_json::Value;
use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

type SharedSelection = Rc<RefCell<Option<SplatHandle>>>;

/// Everything one editing session needs, wired together over a single bus.
pub struct EditorSession {
    events: Rc<Events>,
    config: EditorConfig,
    camera: CameraHandle,
    history: Rc<RefCell<CommandHistory>>,
    splats: Vec<SplatHandle>,
    selected: SharedSelection,
    tools: ToolManager,
    color_panel: Rc<RefCell<ColorPanel>>,
    transform_panel: Rc<RefCell<TransformPanel>>,
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("events", &self.events)
            .field("splats", &self.splats.len())
            .field("tools", &self.tools)
            .finish_non_exhaustive()
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Result<Self> {
        let events = Rc::new(Events::new());
        let camera: CameraHandle = Rc::new(RefCell::new(CameraState::default()));
        let history = Rc::new(RefCell::new(CommandHistory::new()));
        let selected: SharedSelection = Rc::new(RefCell::new(None));

        connect_history(&events, &history);
        connect_select_by_box(&events, &selected);
        connect_color_update(&events, &selected);
        register_functions(&events, &selected, &history)?;

        let mut tools = ToolManager::new(Rc::clone(&events));
        tools.register(ToolType::BoxSelection(BoxSelectionTool::new(
            Rc::clone(&events),
            Rc::clone(&camera),
            &config,
        )));
        tools.register(ToolType::ColorEdit(ColorEditTool::new(
            Rc::clone(&events),
            &config,
        )));

        let color_panel = Rc::new(RefCell::new(ColorPanel::new(Rc::clone(&events), &config)));
        ColorPanel::connect(&color_panel);
        let transform_panel = Rc::new(RefCell::new(TransformPanel::new(
            Rc::clone(&events),
            &config,
        )));
        TransformPanel::connect(&transform_panel);

        Ok(Self {
            events,
            config,
            camera,
            history,
            splats: Vec::new(),
            selected,
            tools,
            color_panel,
            transform_panel,
        })
    }

    pub fn events(&self) -> &Rc<Events> {
        &self.events
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn camera(&self) -> &CameraHandle {
        &self.camera
    }

    pub fn history(&self) -> Ref<'_, CommandHistory> {
        self.history.borrow()
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolManager {
        &mut self.tools
    }

    pub fn color_panel(&self) -> &Rc<RefCell<ColorPanel>> {
        &self.color_panel
    }

    pub fn transform_panel(&self) -> &Rc<RefCell<TransformPanel>> {
        &self.transform_panel
    }

    pub fn splats(&self) -> &[SplatHandle] {
        &self.splats
    }

    pub fn add_splat(&mut self, splat: Splat) -> SplatHandle {
        log::info!("added splat '{}' ({} points)", splat.name, splat.len());
        let handle = splat.into_handle();
        self.splats.push(Rc::clone(&handle));
        handle
    }

    pub fn selected(&self) -> Option<SplatHandle> {
        self.selected.borrow().clone()
    }

    /// Changes the selected splat and announces it with `selection.changed`.
    pub fn select_splat(&mut self, splat: Option<&SplatHandle>) -> Result<()> {
        let splat = splat.cloned();
        *self.selected.borrow_mut() = splat.clone();
        self.events.fire(&EditorEvent::SelectionChanged(splat))
    }

    pub fn activate_tool(&mut self, name: &str) -> Result<()> {
        self.tools.activate(name)
    }

    pub fn toggle_tool(&mut self, name: &str) -> Result<()> {
        self.tools.toggle(name)
    }

    /// Deletes the selected points of the selected splat as one operation.
    /// Returns the number of points deleted.
    pub fn delete_selection(&mut self) -> Result<usize> {
        let splat = self.selected().ok_or(EditorError::NoSelection)?;
        let op = DeleteSelectionOp::new(&splat);
        let count = op.count();
        if count == 0 {
            return Ok(0);
        }
        op.apply();
        self.events.fire(&EditorEvent::EditAdd(Command::DeleteSelection(op)))?;
        Ok(count)
    }

    pub fn undo(&self) -> Result<()> {
        self.events.fire(&EditorEvent::EditUndo)
    }

    pub fn redo(&self) -> Result<()> {
        self.events.fire(&EditorEvent::EditRedo)
    }

    /// What the camera layer reports after a click picked a point in the scene.
    pub fn pick_focal_point(&self, position: Vec3) -> Result<()> {
        let splat = self.selected().map(|splat| splat.borrow().id());
        self.events
            .fire(&EditorEvent::FocalPointPicked { splat, position })
    }

    /// Ignores empty viewports (a minimized window reports a zero height).
    pub fn resize_viewport(&self, width: f32, height: f32) -> Result<()> {
        if width <= 0.0 || height <= 0.0 {
            log::debug!("ignoring empty viewport {}x{}", width, height);
            return Ok(());
        }
        {
            let mut camera = self.camera.borrow_mut();
            camera.viewport_width = width;
            camera.viewport_height = height;
        }
        self.events.fire(&EditorEvent::CameraResize { width, height })
    }

    pub fn set_ortho(&self, ortho: bool) -> Result<()> {
        self.camera.borrow_mut().projection = if ortho {
            Projection::Orthographic
        } else {
            Projection::Perspective
        };
        self.events.fire(&EditorEvent::CameraOrtho(ortho))
    }
}

/// Turns `select.byBox` requests into selection operations on the selected splat.
fn connect_select_by_box(events: &Rc<Events>, selected: &SharedSelection) {
    let bus: Weak<Events> = Rc::downgrade(events);
    let selected = Rc::clone(selected);
    events.on(EventKind::SelectByBox, move |event| {
        let EditorEvent::SelectByBox { mode, params } = event else {
            return Ok(());
        };
        let Some(splat) = selected.borrow().clone() else {
            log::warn!("select.byBox with no splat selected");
            return Ok(());
        };
        let Some(bus) = bus.upgrade() else {
            return Ok(());
        };

        let region = BoxRegion::from_params(*params);
        let new_selection = {
            let splat = splat.borrow();
            select_by_box(&splat.world_positions(), &splat.selection(), &region, *mode)
        };
        let op = SelectionOp::new(&splat, new_selection);
        op.apply();
        bus.fire(&EditorEvent::EditAdd(Command::Select(op)))
    });
}

fn connect_color_update(events: &Events, selected: &SharedSelection) {
    let selected = Rc::clone(selected);
    events.on(EventKind::ColorUpdate, move |event| {
        if let EditorEvent::ColorUpdate { band, multiplier } = event {
            if let Some(splat) = selected.borrow().as_ref() {
                splat.borrow_mut().scale_band(*band, *multiplier);
            }
        }
        Ok(())
    });
}

fn register_functions(
    events: &Events,
    selected: &SharedSelection,
    history: &Rc<RefCell<CommandHistory>>,
) -> Result<()> {
    {
        let selected = Rc::clone(selected);
        events.function("selection", move |_| {
            Ok(match selected.borrow().as_ref() {
                Some(splat) => Value::String(splat.borrow().id().to_string()),
                None => Value::Null,
            })
        })?;
    }
    {
        let selected = Rc::clone(selected);
        events.function("selection.count", move |_| {
            let count = selected
                .borrow()
                .as_ref()
                .map_or(0, |splat| splat.borrow().selected_count());
            Ok(Value::from(count))
        })?;
    }
    {
        let history = Rc::clone(history);
        events.function("edit.canUndo", move |_| Ok(Value::Bool(history.borrow().can_undo())))?;
    }
    {
        let history = Rc::clone(history);
        events.function("edit.canRedo", move |_| Ok(Value::Bool(history.borrow().can_redo())))?;
    }
    Ok(())
}
