use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Interaction", inline)]
#[serde(default)]
/// Pointer gesture tuning.
pub struct InteractionOptions {
    /// Pixels the pointer may travel while pressed and still count as a
    /// click.
    #[schemars(title = "Drag Threshold", range(min = 0.0, max = 20.0), extend("step" = 1.0))]
    pub drag_threshold: f32,
    /// Scale change per pixel of vertical drag in scale mode.
    #[schemars(title = "Scale Sensitivity", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub scale_sensitivity: f32,
    /// Smallest factor a single scale step may apply.
    #[schemars(skip)]
    pub min_scale_step: f32,
    /// Largest factor a single scale step may apply.
    #[schemars(skip)]
    pub max_scale_step: f32,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            drag_threshold: 3.0,
            scale_sensitivity: 0.01,
            min_scale_step: 0.5,
            max_scale_step: 2.0,
        }
    }
}
