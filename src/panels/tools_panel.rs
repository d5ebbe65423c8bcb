use crate::error::Result;
use crate::session::EditorSession;
use crate::tools::Tool;

pub fn tools_panel(session: &mut EditorSession, ctx: &egui::Context) -> Result<()> {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| -> Result<()> {
            ui.heading("Tools");

            let active_tool_name = session.tools().active_tool().map(|tool| tool.name());
            let tool_names = session.tools().tool_names();
            for tool_name in tool_names {
                let is_selected = active_tool_name == Some(tool_name);
                if ui.selectable_label(is_selected, tool_name).clicked() {
                    log::info!("Tool selected from UI: {}", tool_name);
                    session.toggle_tool(tool_name)?;
                }
            }
            ui.separator();

            // Undo/Redo section
            let (can_undo, can_redo) = {
                let history = session.history();
                (history.can_undo(), history.can_redo())
            };
            ui.horizontal(|ui| -> Result<()> {
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    session.undo()?;
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    session.redo()?;
                }
                Ok(())
            })
            .inner?;

            let has_selection = session.selected().is_some();
            if ui
                .add_enabled(has_selection, egui::Button::new("Delete Selected Points"))
                .clicked()
            {
                let count = session.delete_selection()?;
                log::info!("deleted {} points", count);
            }

            ui.separator();
            {
                let history = session.history();
                ui.label(format!("Undo stack size: {}", history.undo_stack().len()));
                ui.label(format!("Redo stack size: {}", history.redo_stack().len()));
                for command in history.undo_stack().iter().rev() {
                    ui.label(command.label());
                }
            }

            if let Some(active_tool) = session.tools_mut().active_tool_mut() {
                ui.separator();
                ui.heading("Tool Options");
                active_tool.ui(ui)?;
            }

            ui.separator();
            session.color_panel().borrow_mut().ui(ui)?;
            ui.separator();
            session.transform_panel().borrow_mut().ui(ui)?;
            Ok(())
        })
        .inner
}
