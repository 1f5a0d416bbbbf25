use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Motion", inline)]
#[serde(default)]
/// Path motion parameters.
pub struct MotionOptions {
    /// Curve parameter advanced per frame.
    #[schemars(title = "Speed", range(min = 0.001, max = 0.2), extend("step" = 0.001))]
    pub speed: f32,
    /// Multiplier applied by the speed up/down keys.
    #[schemars(title = "Speed Step", range(min = 1.05, max = 4.0), extend("step" = 0.05))]
    pub speed_step_factor: f32,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            speed: 0.01,
            speed_step_factor: 1.25,
        }
    }
}
