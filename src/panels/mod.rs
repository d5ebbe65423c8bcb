use crate::command::Attribute;
use crate::config::EditorConfig;
use std::ops::RangeInclusive;

mod attribute_panel;
mod color_panel;
mod tools_panel;
mod transform_panel;

pub use attribute_panel::{AttributePanel, UiRefresh};
pub use color_panel::ColorPanel;
pub use tools_panel::tools_panel;
pub use transform_panel::TransformPanel;

/// One numeric input of a panel
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub range: RangeInclusive<f32>,
    pub speed: f64,
}

impl FieldSpec {
    pub fn new(label: &'static str, range: RangeInclusive<f32>, speed: f64) -> Self {
        Self { label, range, speed }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(*self.range.start(), *self.range.end())
    }
}

/// An attribute edited through a row of numeric inputs.
///
/// `to_fields` and `from_fields` map between the attribute and the displayed
/// values, in the order given by `fields`.
pub trait PanelAttribute: Attribute {
    const TITLE: &'static str;

    fn fields(config: &EditorConfig) -> Vec<FieldSpec>;

    fn to_fields(self) -> Vec<f32>;

    fn from_fields(values: &[f32]) -> Self;
}
