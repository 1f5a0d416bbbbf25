use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Colours and helpers shown in the scene.
pub struct DisplayOptions {
    /// Tint reported for the selected entity.
    #[schemars(skip)]
    pub selected_color: [f32; 3],
    /// Add the red/green/blue axes helper at startup.
    #[schemars(title = "Show Axes")]
    pub show_axes: bool,
    /// Length of each axes helper bar.
    #[schemars(title = "Axis Length", range(min = 0.5, max = 10.0), extend("step" = 0.5))]
    pub axis_length: f32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            selected_color: [1.0, 0.85, 0.2],
            show_axes: true,
            axis_length: 2.0,
        }
    }
}
