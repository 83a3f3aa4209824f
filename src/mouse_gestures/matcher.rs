//! Tolerance-scored best match between the step buffer and the gesture table.
//!
//! A candidate either matches position by position or is rejected. Two
//! tolerances are scored instead of rejected:
//!
//! * extra modifiers on a button step cost `ctrl = 8, shift = 4, alt = 2,
//!   meta = 1` each (disjoint bits, so sums never tie across different sets);
//! * a trailing double-click standing in for a press costs
//!   [`DOUBLE_CLICK_COLLAPSE_PENALTY`], which outweighs every modifier sum.

use crate::mouse_gestures::context::GestureContext;
use crate::mouse_gestures::db::{native_sequences, GestureAction, GestureTable};
use crate::mouse_gestures::step::{Modifiers, Step, StepKind};

pub const DOUBLE_CLICK_COLLAPSE_PENALTY: u32 = 100;

const MODIFIER_PENALTIES: [(Modifiers, u32); 4] = [
    (Modifiers::CTRL, 8),
    (Modifiers::SHIFT, 4),
    (Modifiers::ALT, 2),
    (Modifiers::META, 1),
];

/// Variant order gives `Finite(_) < Infinite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cost {
    Finite(u32),
    Infinite,
}

impl Cost {
    pub const EXACT: Cost = Cost::Finite(0);

    pub fn is_exact(self) -> bool {
        self == Self::EXACT
    }

    pub fn is_finite(self) -> bool {
        matches!(self, Cost::Finite(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    ExactNative,
    ExactAction(GestureAction),
    BestNative,
    BestAction(GestureAction),
    Unresolved,
}

impl Resolution {
    pub fn is_resolved(self) -> bool {
        self != Resolution::Unresolved
    }

    pub fn is_native(self) -> bool {
        matches!(self, Resolution::ExactNative | Resolution::BestNative)
    }

    pub fn action(self) -> Option<GestureAction> {
        match self {
            Resolution::ExactAction(action) | Resolution::BestAction(action) => Some(action),
            _ => None,
        }
    }

    fn exact(action: Option<GestureAction>) -> Self {
        action.map_or(Resolution::ExactNative, Resolution::ExactAction)
    }

    fn best(action: Option<GestureAction>) -> Self {
        action.map_or(Resolution::BestNative, Resolution::BestAction)
    }
}

pub fn score(buffer: &[Step], candidate: &[Step]) -> Cost {
    if buffer.len() != candidate.len() {
        return Cost::Infinite;
    }

    let last = candidate.len().saturating_sub(1);
    let mut total = 0u32;
    for (index, (actual, expected)) in buffer.iter().zip(candidate).enumerate() {
        let mut penalty = 0;

        if index == last
            && expected.kind() == StepKind::Press
            && actual.kind() == StepKind::DoubleClick
            && expected.button() == actual.button()
            && expected.modifiers() == actual.modifiers()
        {
            penalty += DOUBLE_CLICK_COLLAPSE_PENALTY;
        }

        if actual.kind() == expected.kind()
            && expected.kind().is_button()
            && actual.button() == expected.button()
            && actual.modifiers().contains(expected.modifiers())
        {
            let extra = actual.modifiers().difference(expected.modifiers());
            penalty += MODIFIER_PENALTIES
                .iter()
                .filter(|(flag, _)| extra.contains(*flag))
                .map(|(_, weight)| weight)
                .sum::<u32>();
        }

        if penalty == 0 && actual != expected {
            return Cost::Infinite;
        }

        total += penalty;
    }

    Cost::Finite(total)
}

/// Find the lowest-cost native sequence or definition across `contexts`.
///
/// Contexts are scanned in the given order, native sequences before
/// definitions. An exact match returns immediately; otherwise the first
/// candidate with the lowest cost wins.
pub fn match_best(table: &GestureTable, buffer: &[Step], contexts: &[GestureContext]) -> Resolution {
    let mut best = Resolution::Unresolved;
    let mut lowest = Cost::Infinite;

    for context in contexts.iter().copied().filter(|context| context.is_real()) {
        for native in native_sequences(context) {
            let cost = score(buffer, native);
            if cost.is_exact() {
                return Resolution::ExactNative;
            }
            if cost < lowest {
                lowest = cost;
                best = Resolution::BestNative;
            }
        }

        for definition in table.definitions(context) {
            let cost = score(buffer, &definition.steps);
            if cost.is_exact() {
                return Resolution::exact(definition.action);
            }
            if cost < lowest {
                lowest = cost;
                best = Resolution::best(definition.action);
            }
        }
    }

    best
}
