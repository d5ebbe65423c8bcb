use super::{Tool, ToolType};
use crate::error::{EditorError, Result};
use crate::event::{EditorEvent, Events};
use std::rc::Rc;

/// Owns the tools and keeps at most one of them active.
#[derive(Debug)]
pub struct ToolManager {
    events: Rc<Events>,
    tools: Vec<ToolType>,
    active: Option<usize>,
}

impl ToolManager {
    pub fn new(events: Rc<Events>) -> Self {
        Self {
            events,
            tools: Vec::new(),
            active: None,
        }
    }

    pub fn register(&mut self, tool: ToolType) {
        self.tools.push(tool);
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ToolType> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ToolType> {
        self.tools.iter_mut().find(|tool| tool.name() == name)
    }

    pub fn active_tool(&self) -> Option<&ToolType> {
        self.active.map(|index| &self.tools[index])
    }

    pub fn active_tool_mut(&mut self) -> Option<&mut ToolType> {
        match self.active {
            Some(index) => Some(&mut self.tools[index]),
            None => None,
        }
    }

    /// Makes `name` the active tool, deactivating the current one first.
    /// Activating the tool that is already active does nothing.
    pub fn activate(&mut self, name: &str) -> Result<()> {
        let index = self
            .tools
            .iter()
            .position(|tool| tool.name() == name)
            .ok_or_else(|| EditorError::ToolNotFound(name.to_string()))?;

        if self.active == Some(index) {
            return Ok(());
        }

        self.deactivate_all()?;

        log::info!("activating tool {}", name);
        self.tools[index].activate()?;
        self.active = Some(index);
        self.events.fire(&EditorEvent::ToolActivated {
            name: name.to_string(),
        })
    }

    /// Activates `name`, or switches it off when it is already active.
    pub fn toggle(&mut self, name: &str) -> Result<()> {
        let is_active = self.active_tool().is_some_and(|tool| tool.name() == name);
        if is_active {
            self.deactivate_all()
        } else {
            self.activate(name)
        }
    }

    pub fn deactivate_all(&mut self) -> Result<()> {
        if let Some(index) = self.active.take() {
            let tool = &mut self.tools[index];
            let name = tool.name();
            log::info!("deactivating tool {}", name);
            tool.deactivate()?;
            self.events.fire(&EditorEvent::ToolDeactivated {
                name: name.to_string(),
            })?;
        }
        Ok(())
    }
}
