//! Discrete gesture steps and their compact textual form.
//!
//! A step is written as `<kind><Suffix>(+modifier)*`, e.g. `pressRight`,
//! `moveLeft`, `scrollUp+ctrl` or `releaseExtra12+shift+alt`. Step lists
//! (profile keys) join steps with commas.

use crate::mouse_gestures::event::{RawEvent, RawEventKind};
use bitflags::bitflags;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const MAX_EXTRA_BUTTON: u8 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Press,
    Release,
    DoubleClick,
    Scroll,
    Move,
}

const KIND_TOKENS: [(&str, StepKind); 5] = [
    ("press", StepKind::Press),
    ("release", StepKind::Release),
    ("doubleClick", StepKind::DoubleClick),
    ("scroll", StepKind::Scroll),
    ("move", StepKind::Move),
];

impl StepKind {
    /// Press, release and double-click carry a button; scroll and move carry
    /// a direction.
    pub fn is_button(self) -> bool {
        matches!(
            self,
            StepKind::Press | StepKind::Release | StepKind::DoubleClick
        )
    }

    fn token(self) -> &'static str {
        match self {
            StepKind::Press => "press",
            StepKind::Release => "release",
            StepKind::DoubleClick => "doubleClick",
            StepKind::Scroll => "scroll",
            StepKind::Move => "move",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Task,
    /// Extra buttons are numbered `1..=MAX_EXTRA_BUTTON`.
    Extra(u8),
}

impl MouseButton {
    pub fn name(self) -> String {
        match self {
            MouseButton::Left => "Left".to_string(),
            MouseButton::Right => "Right".to_string(),
            MouseButton::Middle => "Middle".to_string(),
            MouseButton::Back => "Back".to_string(),
            MouseButton::Forward => "Forward".to_string(),
            MouseButton::Task => "Task".to_string(),
            MouseButton::Extra(index) => format!("Extra{index}"),
        }
    }

    /// Bit used by [`ButtonSet`](crate::mouse_gestures::event::ButtonSet).
    pub fn bit(self) -> u32 {
        match self {
            MouseButton::Left => 1 << 0,
            MouseButton::Right => 1 << 1,
            MouseButton::Middle => 1 << 2,
            MouseButton::Back => 1 << 3,
            MouseButton::Forward => 1 << 4,
            MouseButton::Task => 1 << 5,
            MouseButton::Extra(index) => {
                let index = u32::from(index.clamp(1, MAX_EXTRA_BUTTON));
                1 << (5 + index)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Unknown,
    Up,
    Down,
    Left,
    Right,
    Horizontal,
    Vertical,
}

impl Direction {
    /// Empty for `Unknown`.
    pub fn name(self) -> &'static str {
        match self {
            Direction::Unknown => "",
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::Horizontal => "Horizontal",
            Direction::Vertical => "Vertical",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "" => Some(Direction::Unknown),
            "Up" => Some(Direction::Up),
            "Down" => Some(Direction::Down),
            "Left" => Some(Direction::Left),
            "Right" => Some(Direction::Right),
            "Horizontal" => Some(Direction::Horizontal),
            "Vertical" => Some(Direction::Vertical),
            _ => None,
        }
    }
}

bitflags! {
    /// Keyboard modifiers held while a step happened.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::empty()
    }
}

// Serialization order.
const MODIFIER_TOKENS: [(&str, Modifiers); 4] = [
    ("shift", Modifiers::SHIFT),
    ("ctrl", Modifiers::CTRL),
    ("alt", Modifiers::ALT),
    ("meta", Modifiers::META),
];

static EXTRA_BUTTON_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Extra(\d{1,2})$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepParseError {
    #[error("empty step")]
    Empty,
    #[error("unknown step kind in '{0}'")]
    UnknownKind(String),
    #[error("unknown button '{0}'")]
    UnknownButton(String),
    #[error("extra button {0} is outside 1..={MAX_EXTRA_BUTTON}")]
    ExtraButtonOutOfRange(u32),
    #[error("unknown direction '{0}'")]
    UnknownDirection(String),
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
}

/// One discrete unit of a gesture.
///
/// `button` is only set for press/release/double-click steps and `direction`
/// only for scroll/move steps; the constructors keep that invariant.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    kind: StepKind,
    button: Option<MouseButton>,
    direction: Option<Direction>,
    modifiers: Modifiers,
}

impl Step {
    const fn with_button(kind: StepKind, button: Option<MouseButton>) -> Self {
        Self {
            kind,
            button,
            direction: None,
            modifiers: Modifiers::empty(),
        }
    }

    const fn with_direction(kind: StepKind, direction: Direction) -> Self {
        Self {
            kind,
            button: None,
            direction: Some(direction),
            modifiers: Modifiers::empty(),
        }
    }

    pub const fn press(button: MouseButton) -> Self {
        Self::with_button(StepKind::Press, Some(button))
    }

    pub const fn release(button: MouseButton) -> Self {
        Self::with_button(StepKind::Release, Some(button))
    }

    pub const fn double_click(button: MouseButton) -> Self {
        Self::with_button(StepKind::DoubleClick, Some(button))
    }

    pub const fn scroll(direction: Direction) -> Self {
        Self::with_direction(StepKind::Scroll, direction)
    }

    pub const fn movement(direction: Direction) -> Self {
        Self::with_direction(StepKind::Move, direction)
    }

    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn from_raw_event(event: &RawEvent) -> Self {
        let step = match event.kind {
            RawEventKind::Press => Self::with_button(StepKind::Press, event.button),
            RawEventKind::Release => Self::with_button(StepKind::Release, event.button),
            RawEventKind::DoubleClick => Self::with_button(StepKind::DoubleClick, event.button),
            RawEventKind::Wheel => Self::scroll(wheel_direction(event.delta.x, event.delta.y)),
            RawEventKind::Move => Self::movement(Direction::Unknown),
        };
        step.with_modifiers(event.modifiers)
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn button(&self) -> Option<MouseButton> {
        self.button
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

/// The axis with the larger magnitude wins; ties go to the vertical axis.
pub fn wheel_direction(dx: i32, dy: i32) -> Direction {
    if dx.unsigned_abs() > dy.unsigned_abs() {
        if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy != 0 {
        if dy > 0 {
            Direction::Up
        } else {
            Direction::Down
        }
    } else {
        Direction::Unknown
    }
}

impl PartialEq for Step {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.button == other.button
            && self.direction == other.direction
            && (self.kind == StepKind::Move || self.modifiers == other.modifiers)
    }
}

impl Eq for Step {}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.token())?;
        if self.kind.is_button() {
            if let Some(button) = self.button {
                f.write_str(&button.name())?;
            }
        } else if let Some(direction) = self.direction {
            f.write_str(direction.name())?;
        }
        for (token, flag) in MODIFIER_TOKENS {
            if self.modifiers.contains(flag) {
                write!(f, "+{token}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Step {
    type Err = StepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('+');
        let head = parts.next().unwrap_or_default().trim();
        if head.is_empty() {
            return Err(StepParseError::Empty);
        }

        let (kind, suffix) = KIND_TOKENS
            .iter()
            .find_map(|(token, kind)| head.strip_prefix(token).map(|rest| (*kind, rest)))
            .ok_or_else(|| StepParseError::UnknownKind(head.to_string()))?;

        let mut step = if kind.is_button() {
            Self::with_button(kind, parse_button(suffix)?)
        } else {
            let direction = Direction::from_name(suffix)
                .ok_or_else(|| StepParseError::UnknownDirection(suffix.to_string()))?;
            Self::with_direction(kind, direction)
        };

        for part in parts {
            let token = part.trim().to_ascii_lowercase();
            let flag = MODIFIER_TOKENS
                .iter()
                .find(|(name, _)| *name == token)
                .map(|(_, flag)| *flag)
                .ok_or_else(|| StepParseError::UnknownModifier(part.trim().to_string()))?;
            step.modifiers |= flag;
        }

        Ok(step)
    }
}

fn parse_button(suffix: &str) -> Result<Option<MouseButton>, StepParseError> {
    let button = match suffix {
        "" => return Ok(None),
        "Left" => MouseButton::Left,
        "Right" => MouseButton::Right,
        "Middle" => MouseButton::Middle,
        "Back" => MouseButton::Back,
        "Forward" => MouseButton::Forward,
        "Task" => MouseButton::Task,
        _ => {
            let index = EXTRA_BUTTON_RE
                .captures(suffix)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .ok_or_else(|| StepParseError::UnknownButton(suffix.to_string()))?;
            match u8::try_from(index) {
                Ok(index) if (1..=MAX_EXTRA_BUTTON).contains(&index) => {
                    MouseButton::Extra(index)
                }
                _ => return Err(StepParseError::ExtraButtonOutOfRange(index)),
            }
        }
    };
    Ok(Some(button))
}

/// Parse a comma-separated step list such as `pressRight,moveLeft,releaseRight`.
pub fn parse_steps(key: &str) -> Result<Vec<Step>, StepParseError> {
    key.split(',').map(str::parse).collect()
}

pub fn format_steps(steps: &[Step]) -> String {
    steps
        .iter()
        .map(Step::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl Serialize for Step {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Step {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
