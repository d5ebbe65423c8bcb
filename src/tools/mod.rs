use crate::error::Result;

/// Tool trait defines the interface for all editing tools
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Called when the tool becomes the live tool.
    /// Attaches its listeners and shows its controls.
    fn activate(&mut self) -> Result<()>;

    /// Called when another tool takes over or the tool is switched off.
    /// Detaches its listeners and releases anything it held exclusively.
    fn deactivate(&mut self) -> Result<()>;

    fn is_active(&self) -> bool;

    /// Show any tool-specific controls (buttons, numeric inputs)
    fn ui(&mut self, _ui: &mut egui::Ui) -> Result<()> {
        Ok(())
    }
}

// Tool implementations
pub mod box_selection;
pub use box_selection::{BoxSelectionTool, BoxShape};

pub mod color_edit;
pub use color_edit::ColorEditTool;

mod manager;
pub use manager::ToolManager;

/// Enum representing all available tool types
/// This allows us to avoid using Box<dyn Tool> and simplifies memory management
#[derive(Debug)]
pub enum ToolType {
    BoxSelection(BoxSelectionTool),
    ColorEdit(ColorEditTool),
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::BoxSelection(tool) => tool.name(),
            Self::ColorEdit(tool) => tool.name(),
        }
    }

    fn activate(&mut self) -> Result<()> {
        match self {
            Self::BoxSelection(tool) => tool.activate(),
            Self::ColorEdit(tool) => tool.activate(),
        }
    }

    fn deactivate(&mut self) -> Result<()> {
        match self {
            Self::BoxSelection(tool) => tool.deactivate(),
            Self::ColorEdit(tool) => tool.deactivate(),
        }
    }

    fn is_active(&self) -> bool {
        match self {
            Self::BoxSelection(tool) => tool.is_active(),
            Self::ColorEdit(tool) => tool.is_active(),
        }
    }

    fn ui(&mut self, ui: &mut egui::Ui) -> Result<()> {
        match self {
            Self::BoxSelection(tool) => tool.ui(ui),
            Self::ColorEdit(tool) => tool.ui(ui),
        }
    }
}

// Helper methods for ToolType
impl ToolType {
    pub fn as_box_selection(&self) -> Option<&BoxSelectionTool> {
        match self {
            Self::BoxSelection(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_color_edit_mut(&mut self) -> Option<&mut ColorEditTool> {
        match self {
            Self::ColorEdit(tool) => Some(tool),
            _ => None,
        }
    }
}
