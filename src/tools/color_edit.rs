use super::Tool;
use crate::config::EditorConfig;
use crate::error::Result;
use crate::event::{EditorEvent, Events};
use crate::splat::ColorBand;
use std::rc::Rc;

/// Scales color channels of the selected points.
///
/// Each change publishes a multiplier relative to the value applied last for
/// that channel, so consecutive edits compose.
#[derive(Debug)]
pub struct ColorEditTool {
    events: Rc<Events>,
    /// Last applied value per channel
    adjustments: [f32; 3],
    min_value: f32,
    precision: usize,
    toolbar_visible: bool,
    active: bool,
}

impl ColorEditTool {
    pub fn new(events: Rc<Events>, config: &EditorConfig) -> Self {
        Self {
            events,
            adjustments: [1.0; 3],
            min_value: config.min_color_value,
            precision: config.input_precision,
            toolbar_visible: false,
            active: false,
        }
    }

    pub fn adjustment(&self, band: ColorBand) -> f32 {
        self.adjustments[band.index()]
    }

    pub fn toolbar_visible(&self) -> bool {
        self.toolbar_visible
    }

    /// Publishes `value / last value` for `band` and remembers `value`.
    pub fn adjust_colors(&mut self, band: ColorBand, value: f32) -> Result<()> {
        let value = value.max(self.min_value);
        let previous = self.adjustments[band.index()];
        let multiplier = value / previous;
        self.adjustments[band.index()] = value;
        self.events.fire(&EditorEvent::ColorUpdate { band, multiplier })
    }
}

impl Tool for ColorEditTool {
    fn name(&self) -> &'static str {
        "ColorEdit"
    }

    fn activate(&mut self) -> Result<()> {
        self.active = true;
        self.toolbar_visible = true;
        Ok(())
    }

    fn deactivate(&mut self) -> Result<()> {
        self.toolbar_visible = false;
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

        let mut changed = Vec::new();
        ui.horizontal(|ui| {
            for band in ColorBand::ALL {
                let mut value = self.adjustments[band.index()];
                ui.label(band.name());
                let response = ui.add(
                    egui::DragValue::new(&mut value)
                        .range(self.min_value..=f32::MAX)
                        .speed(0.01)
                        .fixed_decimals(self.precision),
                );
                if response.changed() {
                    changed.push((band, value));
                }
            }
        });

        for (band, value) in changed {
            self.adjust_colors(band, value)?;
        }
        Ok(())
    }
}
