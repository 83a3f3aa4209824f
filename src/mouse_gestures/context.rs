use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Kind of UI region under the pointer.
///
/// `Unknown` never matches anything and `Other` only bounds iteration over
/// the real contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GestureContext {
    Unknown,
    Generic,
    Link,
    ContentEditable,
    TabHandle,
    ActiveTabHandle,
    NoTabHandle,
    ToolBar,
    Other,
}

const REAL_CONTEXTS: [GestureContext; 7] = [
    GestureContext::Generic,
    GestureContext::Link,
    GestureContext::ContentEditable,
    GestureContext::TabHandle,
    GestureContext::ActiveTabHandle,
    GestureContext::NoTabHandle,
    GestureContext::ToolBar,
];

const CONTEXT_SUFFIX: &str = "Context";

static CONTEXTS_BY_NAME: Lazy<HashMap<&'static str, GestureContext>> = Lazy::new(|| {
    REAL_CONTEXTS
        .iter()
        .map(|context| (context.name(), *context))
        .collect()
});

impl GestureContext {
    pub fn real() -> impl Iterator<Item = GestureContext> {
        REAL_CONTEXTS.into_iter()
    }

    pub fn is_real(self) -> bool {
        !matches!(self, GestureContext::Unknown | GestureContext::Other)
    }

    pub fn name(self) -> &'static str {
        match self {
            GestureContext::Unknown => "Unknown",
            GestureContext::Generic => "Generic",
            GestureContext::Link => "Link",
            GestureContext::ContentEditable => "ContentEditable",
            GestureContext::TabHandle => "TabHandle",
            GestureContext::ActiveTabHandle => "ActiveTabHandle",
            GestureContext::NoTabHandle => "NoTabHandle",
            GestureContext::ToolBar => "ToolBar",
            GestureContext::Other => "Other",
        }
    }

    /// Look up a profile group name. Both `Link` and `LinkContext` resolve;
    /// anything else is `Unknown`.
    pub fn from_name(name: &str) -> GestureContext {
        let name = name.trim();
        let name = name.strip_suffix(CONTEXT_SUFFIX).unwrap_or(name);
        CONTEXTS_BY_NAME
            .get(name)
            .copied()
            .unwrap_or(GestureContext::Unknown)
    }
}

impl std::fmt::Display for GestureContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_for_real_contexts() {
        for context in GestureContext::real() {
            assert_eq!(GestureContext::from_name(context.name()), context);
            let suffixed = format!("{}Context", context.name());
            assert_eq!(GestureContext::from_name(&suffixed), context);
        }
    }

    #[test]
    fn sentinels_are_not_resolvable() {
        assert_eq!(GestureContext::from_name("Other"), GestureContext::Unknown);
        assert_eq!(GestureContext::from_name("Unknown"), GestureContext::Unknown);
        assert_eq!(GestureContext::from_name("Bogus"), GestureContext::Unknown);
        assert!(!GestureContext::Other.is_real());
    }
}
