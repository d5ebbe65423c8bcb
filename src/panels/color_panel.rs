use super::{AttributePanel, FieldSpec, PanelAttribute};
use crate::config::EditorConfig;
use crate::splat::ColorAdjustments;

pub type ColorPanel = AttributePanel<ColorAdjustments>;

impl ColorPanel {
    pub const TEMPERATURE: usize = 0;
    pub const TINT: usize = 1;
}

impl PanelAttribute for ColorAdjustments {
    const TITLE: &'static str = "Color";

    fn fields(config: &EditorConfig) -> Vec<FieldSpec> {
        let (temp_min, temp_max) = config.color_temperature_range;
        let (tint_min, tint_max) = config.color_tint_range;
        vec![
            FieldSpec::new("Temperature", temp_min..=temp_max, 0.01),
            FieldSpec::new("Tint", tint_min..=tint_max, 0.01),
        ]
    }

    fn to_fields(self) -> Vec<f32> {
        vec![self.temperature, self.tint]
    }

    fn from_fields(values: &[f32]) -> Self {
        Self {
            temperature: values.first().copied().unwrap_or_default(),
            tint: values.get(1).copied().unwrap_or_default(),
        }
    }
}
