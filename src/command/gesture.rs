use super::commands::{Attribute, AttributeOp};
use crate::error::Result;
use crate::event::{EditorEvent, Events};
use crate::splat::SplatHandle;

/// An operation being edited by an in-flight gesture.
///
/// A draft ends exactly once: [`PendingOp::commit`] and [`PendingOp::discard`]
/// both consume it.
#[derive(Debug)]
pub struct PendingOp<A: Attribute> {
    op: AttributeOp<A>,
}

impl<A: Attribute> PendingOp<A> {
    pub fn begin(target: &SplatHandle) -> Self {
        Self {
            op: AttributeOp::capture(target),
        }
    }

    pub fn op(&self) -> &AttributeOp<A> {
        &self.op
    }

    /// Sets the new state and shows it on the live splat.
    pub fn update(&mut self, value: A) {
        self.op.set_new_state(value);
        self.op.apply();
    }

    /// Applies the final state and freezes the operation.
    pub fn commit(self) -> AttributeOp<A> {
        self.op.apply();
        self.op
    }

    /// Restores the old state and drops the draft.
    pub fn discard(self) {
        self.op.undo();
    }
}

/// Turns slider input into exactly one committed operation per gesture.
///
/// A drag is `begin`, any number of `change`, then `end`. A `change` with no
/// gesture in progress is a click or typed edit and commits immediately.
#[derive(Debug)]
pub struct GestureTracker<A: Attribute> {
    pending: Option<PendingOp<A>>,
}

impl<A: Attribute> Default for GestureTracker<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Attribute> GestureTracker<A> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingOp<A>> {
        self.pending.as_ref()
    }

    /// Slider mousedown.
    pub fn begin(&mut self, target: &SplatHandle) {
        if self.pending.is_some() {
            log::warn!("gesture already in progress, keeping the existing draft");
            return;
        }
        self.pending = Some(PendingOp::begin(target));
    }

    /// Value changed.
    pub fn change(&mut self, target: &SplatHandle, value: A, events: &Events) -> Result<()> {
        match self.pending.as_mut() {
            Some(pending) => {
                pending.update(value);
                Ok(())
            }
            None => {
                let mut pending = PendingOp::begin(target);
                pending.update(value);
                submit(pending, events)
            }
        }
    }

    /// Slider mouseup. Returns whether an operation was published.
    pub fn end(&mut self, value: A, events: &Events) -> Result<bool> {
        match self.pending.take() {
            Some(mut pending) => {
                pending.update(value);
                submit(pending, events)?;
                Ok(true)
            }
            None => {
                log::debug!("mouseup without a gesture in progress");
                Ok(false)
            }
        }
    }

    /// Publishes the draft as it stands. Returns whether there was one.
    pub fn commit_pending(&mut self, events: &Events) -> Result<bool> {
        match self.pending.take() {
            Some(pending) => {
                submit(pending, events)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drops the draft and restores its old state. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.discard();
                true
            }
            None => false,
        }
    }
}

fn submit<A: Attribute>(pending: PendingOp<A>, events: &Events) -> Result<()> {
    let command = A::into_command(pending.commit());
    log::debug!("committing {}", command.label());
    events.fire(&EditorEvent::EditAdd(command))
}
