use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options whose change notifications the gesture engine listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsOption {
    EnableMouseGestures,
    MouseProfilesOrder,
    DragThreshold,
    DataDir,
    DebugLogging,
    LogFile,
}

impl SettingsOption {
    /// Whether a change of this option requires rebuilding the gesture table.
    pub fn affects_profiles(self) -> bool {
        matches!(
            self,
            SettingsOption::EnableMouseGestures | SettingsOption::MouseProfilesOrder
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// When disabled, profile rules containing a move step are dropped.
    #[serde(default = "default_enable_mouse_gestures")]
    pub enable_mouse_gestures: bool,
    /// Profile names, loaded in this order from `<data_dir>/mouse/<name>.ini`.
    #[serde(default = "default_profiles_order")]
    pub mouse_profiles_order: Vec<String>,
    /// Root directory for profile files. Falls back to the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Minimum pointer travel (manhattan, px) before movement counts as a step.
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: i32,
    #[serde(default = "default_reload_debounce_ms")]
    pub reload_debounce_ms: u64,
    #[serde(default)]
    pub debug_logging: bool,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_enable_mouse_gestures() -> bool {
    true
}

fn default_profiles_order() -> Vec<String> {
    vec!["default".to_string()]
}

fn default_drag_threshold() -> i32 {
    10
}

fn default_reload_debounce_ms() -> u64 {
    250
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_mouse_gestures: default_enable_mouse_gestures(),
            mouse_profiles_order: default_profiles_order(),
            data_dir: None,
            drag_threshold: default_drag_threshold(),
            reload_debounce_ms: default_reload_debounce_ms(),
            debug_logging: false,
            log_file: None,
        }
    }
}

const APP_DIR: &str = "gesture_engine";
pub const PROFILES_SUBDIR: &str = "mouse";

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        dirs_next::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.data_dir().join(PROFILES_SUBDIR)
    }

    /// Options that differ between `self` and `other`.
    pub fn changed_options(&self, other: &Settings) -> Vec<SettingsOption> {
        let mut changed = Vec::new();
        if self.enable_mouse_gestures != other.enable_mouse_gestures {
            changed.push(SettingsOption::EnableMouseGestures);
        }
        if self.mouse_profiles_order != other.mouse_profiles_order {
            changed.push(SettingsOption::MouseProfilesOrder);
        }
        if self.drag_threshold != other.drag_threshold {
            changed.push(SettingsOption::DragThreshold);
        }
        if self.data_dir != other.data_dir {
            changed.push(SettingsOption::DataDir);
        }
        if self.debug_logging != other.debug_logging {
            changed.push(SettingsOption::DebugLogging);
        }
        if self.log_file != other.log_file {
            changed.push(SettingsOption::LogFile);
        }
        changed
    }
}
