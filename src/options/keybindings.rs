use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping actions to key names.
pub struct KeybindingOptions {
    /// Maps action → lowercase logical key name (e.g. `ToggleViewMode` →
    /// `"v"`).
    pub bindings: HashMap<KeyAction, String>,
    /// Reverse lookup cache (key name → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::ToggleViewMode, "v".into()),
            (KeyAction::RotateFree, "f".into()),
            (KeyAction::RotateX, "x".into()),
            (KeyAction::RotateY, "y".into()),
            (KeyAction::RotateZ, "z".into()),
            (KeyAction::EditRotate, "r".into()),
            (KeyAction::EditScale, "s".into()),
            (KeyAction::EditPath, "p".into()),
            (KeyAction::Cancel, "escape".into()),
            (KeyAction::SpeedUp, "+".into()),
            (KeyAction::SlowDown, "-".into()),
            (KeyAction::CancelMotion, "c".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key name → action). Key names are
    /// stored lowercased.
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, key) in &self.bindings {
            let _ = self.key_to_action.insert(key.to_lowercase(), *action);
        }
    }

    /// Look up the action for a key name, ignoring case.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(&key.to_lowercase()).copied()
    }

    /// Rebind `action` to `key`, replacing any previous key for it.
    pub fn bind(&mut self, action: KeyAction, key: impl Into<String>) {
        let _ = self.bindings.insert(action, key.into());
        self.rebuild_reverse_map();
    }
}
