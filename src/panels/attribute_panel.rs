use super::{FieldSpec, PanelAttribute};
use crate::command::GestureTracker;
use crate::config::EditorConfig;
use crate::error::Result;
use crate::event::{EditorEvent, EventKind, Events, ListenerId};
use crate::splat::SplatHandle;
use std::cell::RefCell;
use std::rc::Rc;

/// Programmatic write access to a panel's displayed values.
///
/// It borrows the panel mutably, so user change handling cannot run (or
/// start another refresh) while it is alive.
pub struct UiRefresh<'a> {
    values: &'a mut Vec<f32>,
}

impl UiRefresh<'_> {
    pub fn set(&mut self, field: usize, value: f32) {
        if let Some(slot) = self.values.get_mut(field) {
            *slot = value;
        }
    }

    pub fn set_all(&mut self, values: Vec<f32>) {
        *self.values = values;
    }
}

enum InputAction {
    MouseDown,
    Change(usize, f32),
    MouseUp,
}

/// Numeric inputs bound to one attribute of the selected splat.
///
/// Slider drags and single edits each produce exactly one operation on the
/// bus through a [`GestureTracker`].
pub struct AttributePanel<A: PanelAttribute> {
    events: Rc<Events>,
    specs: Vec<FieldSpec>,
    values: Vec<f32>,
    selection: Option<SplatHandle>,
    enabled: bool,
    precision: usize,
    tracker: GestureTracker<A>,
    /// Set when a selection switch committed the drag that is still held
    interrupted: bool,
}

impl<A: PanelAttribute> std::fmt::Debug for AttributePanel<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributePanel")
            .field("title", &A::TITLE)
            .field("values", &self.values)
            .field("enabled", &self.enabled)
            .field("pending", &self.tracker.is_pending())
            .finish_non_exhaustive()
    }
}

impl<A: PanelAttribute> AttributePanel<A> {
    pub fn new(events: Rc<Events>, config: &EditorConfig) -> Self {
        let specs = A::fields(config);
        let values = specs.iter().map(|spec| spec.clamp(0.0)).collect();
        Self {
            events,
            specs,
            values,
            selection: None,
            enabled: false,
            precision: config.input_precision,
            tracker: GestureTracker::new(),
            interrupted: false,
        }
    }

    /// Subscribes the panel to `selection.changed`.
    pub fn connect(panel: &Rc<RefCell<Self>>) -> ListenerId {
        let events = Rc::clone(&panel.borrow().events);
        // the bus owns the listener, so it must not keep the panel alive
        let panel = Rc::downgrade(panel);
        events.on(EventKind::SelectionChanged, move |event| {
            if let (EditorEvent::SelectionChanged(splat), Some(panel)) = (event, panel.upgrade()) {
                panel.borrow_mut().selection_changed(splat.clone())?;
            }
            Ok(())
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_pending(&self) -> bool {
        self.tracker.is_pending()
    }

    pub fn value(&self, field: usize) -> Option<f32> {
        self.values.get(field).copied()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.specs
    }

    pub fn selection(&self) -> Option<&SplatHandle> {
        self.selection.as_ref()
    }

    fn current(&self) -> A {
        A::from_fields(&self.values)
    }

    pub fn begin_refresh(&mut self) -> UiRefresh<'_> {
        UiRefresh {
            values: &mut self.values,
        }
    }

    /// Shows the selected splat's current value in the inputs.
    pub fn refresh(&mut self) {
        let Some(splat) = self.selection.clone() else {
            return;
        };
        let current = A::read(&splat.borrow());
        self.begin_refresh().set_all(current.to_fields());
    }

    /// A different splat (or none) was selected.
    ///
    /// A gesture still in progress on the previous splat is committed first;
    /// the rest of that drag is ignored until its mouseup.
    pub fn selection_changed(&mut self, splat: Option<SplatHandle>) -> Result<()> {
        if self.tracker.is_pending() {
            log::warn!("{}: selection changed mid-gesture, committing the pending edit", A::TITLE);
            self.tracker.commit_pending(&self.events)?;
            self.interrupted = true;
        }

        self.selection = splat;
        if self.selection.is_some() {
            self.refresh();
            self.enabled = true;
        } else {
            self.enabled = false;
        }
        Ok(())
    }

    /// Slider drag started.
    pub fn slider_mousedown(&mut self) {
        self.interrupted = false;
        if !self.enabled {
            return;
        }
        if let Some(splat) = &self.selection {
            self.tracker.begin(splat);
        }
    }

    /// The user changed one input.
    pub fn input_changed(&mut self, field: usize, value: f32) -> Result<()> {
        if !self.enabled || self.interrupted {
            return Ok(());
        }
        let Some(splat) = self.selection.clone() else {
            return Ok(());
        };
        let Some(spec) = self.specs.get(field) else {
            return Ok(());
        };
        self.values[field] = spec.clamp(value);
        let current = self.current();
        self.tracker.change(&splat, current, &self.events)
    }

    /// Slider drag ended.
    pub fn slider_mouseup(&mut self) -> Result<()> {
        if std::mem::take(&mut self.interrupted) {
            log::debug!("{}: interrupted drag released", A::TITLE);
            return Ok(());
        }
        if !self.enabled {
            return Ok(());
        }
        let current = self.current();
        self.tracker.end(current, &self.events).map(|_| ())
    }

    /// Abandons a gesture in progress, restoring the value it started from.
    /// The rest of the drag is ignored until its mouseup.
    pub fn cancel(&mut self) {
        if self.tracker.cancel() {
            self.interrupted = true;
            self.refresh();
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> Result<()> {
        if self.tracker.is_pending() && ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            log::info!("{}: edit cancelled", A::TITLE);
            self.cancel();
        }
        if !self.tracker.is_pending() {
            // picks up undo/redo and edits made elsewhere
            self.refresh();
        }

        ui.heading(A::TITLE);
        let mut actions = Vec::new();
        for (field, spec) in self.specs.iter().enumerate() {
            let mut value = self.values[field];
            ui.horizontal(|ui| {
                ui.label(spec.label);
                let response = ui.add_enabled(
                    self.enabled,
                    egui::DragValue::new(&mut value)
                        .range(spec.range.clone())
                        .speed(spec.speed)
                        .fixed_decimals(self.precision),
                );
                if response.drag_started() {
                    actions.push(InputAction::MouseDown);
                }
                if response.changed() {
                    actions.push(InputAction::Change(field, value));
                }
                if response.drag_stopped() {
                    actions.push(InputAction::MouseUp);
                }
            });
        }

        for action in actions {
            match action {
                InputAction::MouseDown => self.slider_mousedown(),
                InputAction::Change(field, value) => self.input_changed(field, value)?,
                InputAction::MouseUp => self.slider_mouseup()?,
            }
        }
        Ok(())
    }
}
