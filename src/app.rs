use crate::config::EditorConfig;
use crate::panels::tools_panel;
use crate::session::EditorSession;
use crate::splat::{grid_points, Splat};

/// The eframe shell around an [`EditorSession`].
pub struct SplatEditorApp {
    session: EditorSession,
    last_error: Option<String>,
}

impl SplatEditorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> crate::Result<Self> {
        let config: EditorConfig = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::with_config(config)
    }

    pub fn with_config(config: EditorConfig) -> crate::Result<Self> {
        let mut session = EditorSession::new(config)?;
        let demo = session.add_splat(Splat::new("Demo Grid", grid_points(8, 0.25)));
        session.select_splat(Some(&demo))?;
        Ok(Self {
            session,
            last_error: None,
        })
    }

    fn report(&mut self, f: impl FnOnce(&mut EditorSession) -> crate::Result<()>) {
        if let Err(err) = f(&mut self.session) {
            log::error!("{}", err);
            self.last_error = Some(err.to_string());
        }
    }
}

impl eframe::App for SplatEditorApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.session.config());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.report(|session| tools_panel(session, ctx));

        let screen = ctx.screen_rect();
        let (width, height) = {
            let camera = self.session.camera().borrow();
            (camera.viewport_width, camera.viewport_height)
        };
        let has_area = screen.width() > 0.0 && screen.height() > 0.0;
        if has_area && (width, height) != (screen.width(), screen.height()) {
            self.report(|session| session.resize_viewport(screen.width(), screen.height()));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Splat Editor");

            let mut ortho = self.session.camera().borrow().is_ortho();
            if ui.checkbox(&mut ortho, "Orthographic").changed() {
                self.report(|session| session.set_ortho(ortho));
            }

            if let Some(splat) = self.session.selected() {
                let splat = splat.borrow();
                ui.label(format!(
                    "{}: {} points, {} selected, {} deleted",
                    splat.name,
                    splat.len(),
                    splat.selected_count(),
                    splat.deleted_count()
                ));
            }

            if ui.button("Focus box on origin").clicked() {
                self.report(|session| session.pick_focal_point(glam::Vec3::ZERO));
            }

            if let Some(err) = &self.last_error {
                ui.colored_label(egui::Color32::RED, err);
            }
        });
    }
}
