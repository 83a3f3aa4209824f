//! Profile files: `<data_dir>/mouse/<profile>.ini`.
//!
//! ```ini
//! [Generic]
//! pressRight,moveLeft,releaseRight=GoBack
//! doubleClickLeft+ctrl=NoAction
//!
//! [Link]
//! pressMiddle=OpenLinkInNewTab
//! ```
//!
//! Groups name a context (an optional `Context` suffix is accepted), keys are
//! comma-joined steps and values are action names or `NoAction`. Bad entries
//! are logged and skipped; they never fail the whole profile.

use crate::actions::ActionCatalog;
use crate::mouse_gestures::context::GestureContext;
use crate::mouse_gestures::db::{GestureAction, GestureDefinition, GestureTable};
use crate::mouse_gestures::step::parse_steps;
use crate::settings::Settings;
use std::path::{Path, PathBuf};

pub const NO_ACTION: &str = "NoAction";
const PROFILE_EXTENSION: &str = "ini";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IniGroup {
    pub name: String,
    pub entries: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IniDocument {
    pub groups: Vec<IniGroup>,
}

/// Lines before the first `[group]` header are ignored, as are blank lines
/// and `;`/`#` comments.
pub fn parse_ini(text: &str) -> IniDocument {
    let mut document = IniDocument::default();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            document.groups.push(IniGroup {
                name: name.trim().to_string(),
                entries: Vec::new(),
            });
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            tracing::warn!(line = number + 1, "profile line without '=' ignored");
            continue;
        };
        let Some(group) = document.groups.last_mut() else {
            tracing::warn!(line = number + 1, "profile entry outside of a group ignored");
            continue;
        };
        group
            .entries
            .push((key.trim().to_string(), unquote(value.trim()).to_string()));
    }
    document
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value)
}

pub fn profile_path(profiles_dir: &Path, name: &str) -> PathBuf {
    profiles_dir.join(format!("{name}.{PROFILE_EXTENSION}"))
}

pub fn read_profile(path: &Path) -> anyhow::Result<IniDocument> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_ini(&content))
}

/// Parse one `key = value` entry. `None` means the entry is skipped.
pub fn parse_binding(
    key: &str,
    value: &str,
    actions: &ActionCatalog,
    gestures_enabled: bool,
) -> Option<GestureDefinition> {
    let action = match actions.resolve(value) {
        Some(id) => Some(GestureAction::Trigger(id)),
        None if value == NO_ACTION => None,
        None => {
            tracing::warn!(key, action = value, "unknown action, binding skipped");
            return None;
        }
    };

    let steps = match parse_steps(key) {
        Ok(steps) => steps,
        Err(err) => {
            tracing::warn!(key, %err, "malformed gesture, binding skipped");
            return None;
        }
    };

    let definition = GestureDefinition::new(steps, action);
    if definition.steps.is_empty() {
        return None;
    }
    if definition.has_move() && !gestures_enabled {
        tracing::debug!(key, "mouse gestures disabled, move binding skipped");
        return None;
    }
    Some(definition)
}

/// Build a table from already-read profiles, in order.
pub fn build_table<'a, I>(profiles: I, actions: &ActionCatalog, gestures_enabled: bool) -> GestureTable
where
    I: IntoIterator<Item = &'a IniDocument>,
{
    let mut table = GestureTable::new();
    for profile in profiles {
        for group in &profile.groups {
            let context = GestureContext::from_name(&group.name);
            if context == GestureContext::Unknown {
                tracing::warn!(group = %group.name, "unknown gesture context, group skipped");
                continue;
            }
            for (key, value) in &group.entries {
                if let Some(definition) = parse_binding(key, value, actions, gestures_enabled) {
                    table.insert(context, definition);
                }
            }
        }
    }
    table
}

/// Read every profile listed in `settings` and build a fresh table.
pub fn load_table(settings: &Settings, actions: &ActionCatalog) -> GestureTable {
    let profiles_dir = settings.profiles_dir();
    let profiles: Vec<IniDocument> = settings
        .mouse_profiles_order
        .iter()
        .filter_map(|name| {
            let path = profile_path(&profiles_dir, name);
            match read_profile(&path) {
                Ok(profile) => Some(profile),
                Err(err) => {
                    tracing::error!(?err, path = %path.display(), "failed to read mouse profile");
                    None
                }
            }
        })
        .collect();

    let table = build_table(&profiles, actions, settings.enable_mouse_gestures);
    tracing::info!(
        profiles = profiles.len(),
        definitions = table.len(),
        "mouse gesture profiles loaded"
    );
    table
}
