use crate::mouse_gestures::step::{Modifiers, MouseButton};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan_distance(self, other: Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl From<(i32, i32)> for Point {
    fn from(value: (i32, i32)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}

/// Buttons held at the time of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonSet(u32);

impl ButtonSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn with(mut self, button: MouseButton) -> Self {
        self.insert(button);
        self
    }

    pub fn insert(&mut self, button: MouseButton) {
        self.0 |= button.bit();
    }

    pub fn remove(&mut self, button: MouseButton) {
        self.0 &= !button.bit();
    }

    pub fn contains(&self, button: MouseButton) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<MouseButton> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = MouseButton>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEventKind {
    Press,
    Release,
    DoubleClick,
    Move,
    Wheel,
}

impl RawEventKind {
    pub fn is_button(self) -> bool {
        matches!(
            self,
            RawEventKind::Press | RawEventKind::Release | RawEventKind::DoubleClick
        )
    }
}

/// Input event as delivered by the windowing layer.
///
/// Kept by value in the session buffer so it can be replayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub kind: RawEventKind,
    /// Button that changed state; `None` for moves and wheel ticks.
    pub button: Option<MouseButton>,
    /// Buttons held after the event.
    pub buttons: ButtonSet,
    pub modifiers: Modifiers,
    pub position: Point,
    /// Per-axis wheel delta, positive is right/up.
    pub delta: Point,
    pub timestamp_ms: u64,
}

impl RawEvent {
    fn new(kind: RawEventKind, button: Option<MouseButton>, position: Point) -> Self {
        Self {
            kind,
            button,
            buttons: ButtonSet::empty(),
            modifiers: Modifiers::empty(),
            position,
            delta: Point::default(),
            timestamp_ms: 0,
        }
    }

    /// Press with only `button` held.
    pub fn press(button: MouseButton, position: impl Into<Point>) -> Self {
        Self::new(RawEventKind::Press, Some(button), position.into())
            .with_buttons(ButtonSet::empty().with(button))
    }

    /// Release with nothing held afterwards.
    pub fn release(button: MouseButton, position: impl Into<Point>) -> Self {
        Self::new(RawEventKind::Release, Some(button), position.into())
    }

    pub fn double_click(button: MouseButton, position: impl Into<Point>) -> Self {
        Self::new(RawEventKind::DoubleClick, Some(button), position.into())
            .with_buttons(ButtonSet::empty().with(button))
    }

    pub fn movement(position: impl Into<Point>, buttons: ButtonSet) -> Self {
        Self::new(RawEventKind::Move, None, position.into()).with_buttons(buttons)
    }

    pub fn wheel(delta: impl Into<Point>, position: impl Into<Point>, buttons: ButtonSet) -> Self {
        let mut event = Self::new(RawEventKind::Wheel, None, position.into()).with_buttons(buttons);
        event.delta = delta.into();
        event
    }

    pub fn with_buttons(mut self, buttons: ButtonSet) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn at(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }
}
