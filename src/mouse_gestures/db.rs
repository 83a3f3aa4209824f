use crate::actions::ActionId;
use crate::mouse_gestures::context::GestureContext;
use crate::mouse_gestures::step::{Direction, MouseButton, Step, StepKind};
use std::collections::HashMap;

/// What a matched definition does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureAction {
    Trigger(ActionId),
    /// Synthesized context-menu request; never configurable.
    ContextMenu,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureDefinition {
    pub steps: Vec<Step>,
    /// `None` is a reserved "NoAction" sequence: it resolves like a native
    /// sequence and replays the buffered events.
    pub action: Option<GestureAction>,
}

impl GestureDefinition {
    pub fn new(steps: Vec<Step>, action: Option<GestureAction>) -> Self {
        Self { steps, action }
    }

    pub fn has_move(&self) -> bool {
        self.steps.iter().any(|step| step.kind() == StepKind::Move)
    }
}

pub type NativeSequence = &'static [Step];

const GENERIC_NATIVE: &[NativeSequence] = &[
    &[Step::double_click(MouseButton::Left)],
    &[
        Step::press(MouseButton::Left),
        Step::release(MouseButton::Left),
    ],
    &[
        Step::press(MouseButton::Left),
        Step::movement(Direction::Unknown),
    ],
];

const LINK_NATIVE: &[NativeSequence] = &[
    &[
        Step::press(MouseButton::Left),
        Step::release(MouseButton::Left),
    ],
    &[
        Step::press(MouseButton::Left),
        Step::movement(Direction::Unknown),
    ],
];

const CONTENT_EDITABLE_NATIVE: &[NativeSequence] = &[&[Step::press(MouseButton::Middle)]];

const TAB_HANDLE_NATIVE: &[NativeSequence] = &[&[
    Step::press(MouseButton::Left),
    Step::movement(Direction::Unknown),
]];

/// Sequences the toolkit handles itself in `context`.
pub fn native_sequences(context: GestureContext) -> &'static [NativeSequence] {
    match context {
        GestureContext::Generic => GENERIC_NATIVE,
        GestureContext::Link => LINK_NATIVE,
        GestureContext::ContentEditable => CONTENT_EDITABLE_NATIVE,
        GestureContext::TabHandle => TAB_HANDLE_NATIVE,
        _ => &[],
    }
}

pub fn context_menu_definition() -> GestureDefinition {
    GestureDefinition::new(
        vec![
            Step::press(MouseButton::Right),
            Step::release(MouseButton::Right),
        ],
        Some(GestureAction::ContextMenu),
    )
}

/// Per-context gesture definitions in lookup order.
///
/// Tables are built once and swapped wholesale on reload; every real context
/// starts with the context-menu binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureTable {
    definitions: HashMap<GestureContext, Vec<GestureDefinition>>,
}

impl Default for GestureTable {
    fn default() -> Self {
        let context_menu = context_menu_definition();
        let definitions = GestureContext::real()
            .map(|context| (context, vec![context_menu.clone()]))
            .collect();
        Self { definitions }
    }
}

impl GestureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition after the existing ones. Non-real contexts are
    /// ignored.
    pub fn insert(&mut self, context: GestureContext, definition: GestureDefinition) {
        if !context.is_real() || definition.steps.is_empty() {
            return;
        }
        self.definitions
            .entry(context)
            .or_default()
            .push(definition);
    }

    pub fn definitions(&self, context: GestureContext) -> &[GestureDefinition] {
        self.definitions
            .get(&context)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_configured(&self, context: GestureContext) -> bool {
        context.is_real() && self.definitions.contains_key(&context)
    }

    /// Whether any of `contexts` has a definition table.
    pub fn intersects(&self, contexts: &[GestureContext]) -> bool {
        contexts.iter().any(|context| self.is_configured(*context))
    }

    pub fn len(&self) -> usize {
        self.definitions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
