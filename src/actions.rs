use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId(pub u32);

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ActionEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub desc: String,
}

/// Known action names. Ids follow declaration order.
#[derive(Debug, Clone, Default)]
pub struct ActionCatalog {
    entries: Vec<ActionEntry>,
    index: HashMap<String, ActionId>,
}

const ACTION_SUFFIX: &str = "Action";

impl ActionCatalog {
    pub fn new(entries: Vec<ActionEntry>) -> Self {
        let mut catalog = Self::default();
        for entry in entries {
            catalog.push(entry);
        }
        catalog
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            names
                .into_iter()
                .map(|name| ActionEntry {
                    name: name.into(),
                    desc: String::new(),
                })
                .collect(),
        )
    }

    fn push(&mut self, entry: ActionEntry) {
        let key = normalize(&entry.name).to_string();
        if self.index.contains_key(&key) {
            tracing::warn!(name = %entry.name, "duplicate action name ignored");
            return;
        }
        let id = ActionId(self.entries.len() as u32);
        self.index.insert(key, id);
        self.entries.push(entry);
    }

    /// Resolve an action name. A trailing `Action` suffix is optional.
    pub fn resolve(&self, name: &str) -> Option<ActionId> {
        self.index.get(normalize(name)).copied()
    }

    pub fn name(&self, id: ActionId) -> Option<&str> {
        self.entries
            .get(id.0 as usize)
            .map(|entry| entry.name.as_str())
    }

    pub fn entries(&self) -> &[ActionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(name: &str) -> &str {
    let name = name.trim();
    match name.strip_suffix(ACTION_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => name,
    }
}

pub fn load_actions(path: &str) -> anyhow::Result<ActionCatalog> {
    let content = std::fs::read_to_string(path)?;
    let entries: Vec<ActionEntry> = serde_json::from_str(&content)?;
    Ok(ActionCatalog::new(entries))
}

pub fn save_actions(path: &str, catalog: &ActionCatalog) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(catalog.entries())?;
    std::fs::write(path, json)?;
    Ok(())
}
