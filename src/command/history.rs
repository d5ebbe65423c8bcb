use super::Command;
use crate::error::{EditorError, Result};

/// Undo/redo stacks of committed operations
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// Stack of commands that can be undone
    undo_stack: Vec<Command>,
    /// Stack of commands that can be redone
    redo_stack: Vec<Command>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command that has already been applied
    pub fn add(&mut self, command: Command) {
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Undo the last recorded command
    pub fn undo(&mut self) -> Result<()> {
        let command = self.undo_stack.pop().ok_or(EditorError::HistoryEmpty("undo"))?;
        log::info!("undo {}", command.label());
        command.undo();
        self.redo_stack.push(command);
        Ok(())
    }

    /// Redo the last undone command
    pub fn redo(&mut self) -> Result<()> {
        let command = self.redo_stack.pop().ok_or(EditorError::HistoryEmpty("redo"))?;
        log::info!("redo {}", command.label());
        command.apply();
        self.undo_stack.push(command);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_stack(&self) -> &[Command] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Command] {
        &self.redo_stack
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
