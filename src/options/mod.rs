//! Centralized interaction options with TOML preset support.
//!
//! Camera, gesture, motion, display and key-binding settings live here.
//! Options serialize to/from TOML so a preset directory can hold named
//! configurations.

mod camera;
mod display;
mod interaction;
mod keybindings;
mod motion;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use interaction::InteractionOptions;
pub use keybindings::KeybindingOptions;
pub use motion::MotionOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::OrreryError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[motion]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Pointer gesture tuning.
    pub interaction: InteractionOptions,
    /// Path motion parameters.
    pub motion: MotionOptions,
    /// Colours and scene helpers.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, OrreryError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| OrreryError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, OrreryError> {
        let content = std::fs::read_to_string(path)?;
        let options = Self::from_toml_str(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), OrreryError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrreryError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[motion]
speed = 0.05
";
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.motion.speed, 0.05);
        // Everything else should be default
        assert_eq!(opts.motion.speed_step_factor, 1.25);
        assert_eq!(opts.camera.eye, [4.0, 5.0, 8.0]);
        assert_eq!(opts.interaction.drag_threshold, 3.0);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Options::from_toml_str("[camera\nfovy = ").unwrap_err();
        assert!(matches!(err, OrreryError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("v"),
            Some(KeyAction::ToggleViewMode)
        );
        assert_eq!(opts.keybindings.lookup("Escape"), Some(KeyAction::Cancel));
        assert_eq!(opts.keybindings.lookup("q"), None);
    }

    #[test]
    fn custom_bindings_survive_load() {
        let toml_str = r#"
[keybindings.bindings]
toggle_view_mode = "t"
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(
            opts.keybindings.lookup("t"),
            Some(KeyAction::ToggleViewMode)
        );
        assert_eq!(opts.keybindings.lookup("v"), None);
    }

    #[test]
    fn save_then_load_and_list_presets() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = Options::default();
        opts.camera.fovy = 60.0;
        opts.keybindings.bind(KeyAction::EditPath, "g");

        opts.save(&dir.path().join("presets/wide.toml")).unwrap();
        Options::default()
            .save(&dir.path().join("presets/default.toml"))
            .unwrap();
        std::fs::write(dir.path().join("presets/notes.txt"), "x").unwrap();

        let loaded = Options::load(&dir.path().join("presets/wide.toml")).unwrap();
        assert_eq!(loaded.camera.fovy, 60.0);
        assert_eq!(loaded.keybindings.lookup("g"), Some(KeyAction::EditPath));

        assert_eq!(
            Options::list_presets(&dir.path().join("presets")),
            vec!["default".to_owned(), "wide".to_owned()]
        );
    }

    #[test]
    fn missing_preset_dir_lists_nothing() {
        assert!(Options::list_presets(Path::new("/no/such/dir")).is_empty());
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("interaction"));
        assert!(props.contains_key("motion"));
        assert!(props.contains_key("display"));
        assert!(!props.contains_key("keybindings"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("rotation_speed").is_some());
        assert!(camera.get("eye").is_none());
    }
}
