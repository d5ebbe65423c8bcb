use crate::splat::{ColorAdjustments, Splat, SplatHandle, Transform};
use std::rc::Rc;

/// A slice of splat state that an operation captures and restores as a value.
pub trait Attribute: Copy + PartialEq + std::fmt::Debug + 'static {
    /// Read the current value from the splat
    fn read(splat: &Splat) -> Self;

    /// Write this value into the splat
    fn write(self, splat: &mut Splat);

    /// Wrap a finished operation into the history-facing [`Command`]
    fn into_command(op: AttributeOp<Self>) -> Command;
}

impl Attribute for ColorAdjustments {
    fn read(splat: &Splat) -> Self {
        splat.color_adjustments
    }

    fn write(self, splat: &mut Splat) {
        splat.color_adjustments = self;
    }

    fn into_command(op: AttributeOp<Self>) -> Command {
        Command::ColorAdjust(op)
    }
}

impl Attribute for Transform {
    fn read(splat: &Splat) -> Self {
        splat.transform
    }

    fn write(self, splat: &mut Splat) {
        splat.transform = self;
    }

    fn into_command(op: AttributeOp<Self>) -> Command {
        Command::Transform(op)
    }
}

/// Before/after values of one attribute of one splat.
///
/// `old` is captured on creation and never changes; only `new` moves.
#[derive(Debug, Clone)]
pub struct AttributeOp<A: Attribute> {
    target: SplatHandle,
    old: A,
    new: A,
}

impl<A: Attribute> AttributeOp<A> {
    /// Snapshot the target's current value as both old and new state.
    pub fn capture(target: &SplatHandle) -> Self {
        let old = A::read(&target.borrow());
        Self {
            target: Rc::clone(target),
            old,
            new: old,
        }
    }

    pub fn target(&self) -> &SplatHandle {
        &self.target
    }

    pub fn old_state(&self) -> A {
        self.old
    }

    pub fn new_state(&self) -> A {
        self.new
    }

    pub(crate) fn set_new_state(&mut self, value: A) {
        self.new = value;
    }

    pub fn apply(&self) {
        self.new.write(&mut self.target.borrow_mut());
    }

    pub fn undo(&self) {
        self.old.write(&mut self.target.borrow_mut());
    }
}

/// Replaces the point selection of a splat.
#[derive(Debug, Clone)]
pub struct SelectionOp {
    target: SplatHandle,
    old: Vec<bool>,
    new: Vec<bool>,
}

impl SelectionOp {
    /// Captures the current selection of `target` as the old state.
    pub fn new(target: &SplatHandle, new: Vec<bool>) -> Self {
        let old = target.borrow().selection();
        Self {
            target: Rc::clone(target),
            old,
            new,
        }
    }

    pub fn target(&self) -> &SplatHandle {
        &self.target
    }

    pub fn old_state(&self) -> &[bool] {
        &self.old
    }

    pub fn new_state(&self) -> &[bool] {
        &self.new
    }

    pub fn apply(&self) {
        self.target.borrow_mut().set_selection(&self.new);
    }

    pub fn undo(&self) {
        self.target.borrow_mut().set_selection(&self.old);
    }
}

/// Marks the selected points as deleted.
#[derive(Debug, Clone)]
pub struct DeleteSelectionOp {
    target: SplatHandle,
    old_selection: Vec<bool>,
    old_deleted: Vec<bool>,
    new_deleted: Vec<bool>,
}

impl DeleteSelectionOp {
    pub fn new(target: &SplatHandle) -> Self {
        let splat = target.borrow();
        let old_selection = splat.selection();
        let old_deleted = splat.deleted();
        let new_deleted = old_deleted
            .iter()
            .zip(&old_selection)
            .map(|(&deleted, &selected)| deleted || selected)
            .collect();
        Self {
            target: Rc::clone(target),
            old_selection,
            old_deleted,
            new_deleted,
        }
    }

    pub fn target(&self) -> &SplatHandle {
        &self.target
    }

    /// Number of points this operation deletes
    pub fn count(&self) -> usize {
        self.new_deleted
            .iter()
            .zip(&self.old_deleted)
            .filter(|(new, old)| **new && !**old)
            .count()
    }

    pub fn apply(&self) {
        let mut splat = self.target.borrow_mut();
        splat.set_deleted(&self.new_deleted);
        // deleted points drop out of the selection
        splat.set_selection(&self.old_selection);
    }

    pub fn undo(&self) {
        let mut splat = self.target.borrow_mut();
        splat.set_deleted(&self.old_deleted);
        splat.set_selection(&self.old_selection);
    }
}

/// Reversible edits recorded by the history
#[derive(Debug, Clone)]
pub enum Command {
    ColorAdjust(AttributeOp<ColorAdjustments>),
    Transform(AttributeOp<Transform>),
    Select(SelectionOp),
    DeleteSelection(DeleteSelectionOp),
}

impl Command {
    /// Re-applies the new state. Calling it repeatedly has the same effect as once.
    pub fn apply(&self) {
        match self {
            Command::ColorAdjust(op) => op.apply(),
            Command::Transform(op) => op.apply(),
            Command::Select(op) => op.apply(),
            Command::DeleteSelection(op) => op.apply(),
        }
    }

    pub fn undo(&self) {
        match self {
            Command::ColorAdjust(op) => op.undo(),
            Command::Transform(op) => op.undo(),
            Command::Select(op) => op.undo(),
            Command::DeleteSelection(op) => op.undo(),
        }
    }

    pub fn target(&self) -> &SplatHandle {
        match self {
            Command::ColorAdjust(op) => op.target(),
            Command::Transform(op) => op.target(),
            Command::Select(op) => op.target(),
            Command::DeleteSelection(op) => op.target(),
        }
    }

    /// Short human-readable name for history listings
    pub fn label(&self) -> &'static str {
        match self {
            Command::ColorAdjust(_) => "Color Adjustment",
            Command::Transform(_) => "Transform",
            Command::Select(_) => "Selection",
            Command::DeleteSelection(_) => "Delete Selection",
        }
    }
}
