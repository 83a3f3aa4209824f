use crate::mouse_gestures::context::GestureContext;
use crate::mouse_gestures::engine::TrajectoryClassifier;
use crate::mouse_gestures::event::{Point, RawEvent, RawEventKind};
use crate::mouse_gestures::service::{EventTarget, Parameters, TargetId};
use crate::mouse_gestures::step::{MouseButton, Step, StepKind};
use std::rc::{Rc, Weak};

/// Live state of the gesture being recognized.
#[derive(Default)]
pub(crate) struct Session {
    pub(crate) steps: Vec<Step>,
    pub(crate) events: Vec<RawEvent>,
    pub(crate) contexts: Vec<GestureContext>,
    pub(crate) parameters: Parameters,
    pub(crate) last_click: Point,
    pub(crate) last_position: Point,
    pub(crate) is_releasing: bool,
    pub(crate) after_scroll: bool,
    pub(crate) classifier: Option<Box<dyn TrajectoryClassifier>>,
    target: Option<(TargetId, Weak<dyn EventTarget>)>,
}

impl Session {
    pub(crate) fn target(&self) -> Option<Rc<dyn EventTarget>> {
        self.target.as_ref().and_then(|(_, weak)| weak.upgrade())
    }

    pub(crate) fn target_id(&self) -> Option<TargetId> {
        self.target.as_ref().map(|(id, _)| *id)
    }

    /// A target was set but has since been dropped.
    pub(crate) fn target_lost(&self) -> bool {
        self.target.is_some() && self.target().is_none()
    }

    pub(crate) fn attach(&mut self, target: &Rc<dyn EventTarget>) {
        self.release_target();
        target.set_intercepted(true);
        self.target = Some((target.id(), Rc::downgrade(target)));
    }

    pub(crate) fn release_target(&mut self) {
        if let Some(target) = self.target() {
            target.set_intercepted(false);
        }
        self.target = None;
    }

    /// Drop everything in flight and go idle.
    pub(crate) fn reset(&mut self) {
        self.release_target();
        self.steps.clear();
        self.events.clear();
        self.classifier = None;
    }

    /// Same kind, button and modifiers as the last buffered event.
    pub(crate) fn is_repeat(&self, event: &RawEvent) -> bool {
        self.events.last().is_some_and(|last| {
            last.kind == event.kind
                && last.button == event.button
                && last.modifiers == event.modifiers
        })
    }

    pub(crate) fn remove_button_steps(&mut self, button: MouseButton) {
        self.steps.retain(|step| step.button() != Some(button));
    }

    pub(crate) fn purge_trailing_scrolls(&mut self) {
        while self
            .steps
            .last()
            .is_some_and(|step| step.kind() == StepKind::Scroll)
        {
            self.steps.pop();
        }
        while self
            .events
            .last()
            .is_some_and(|event| event.kind == RawEventKind::Wheel)
        {
            self.events.pop();
        }
    }

    /// Manhattan length of the most recent run of buffered move events.
    ///
    /// While the run is still open (`measure_finished == false`) the last
    /// buffered event must be a move, otherwise the distance is zero. A
    /// finished run may be followed by other events.
    pub(crate) fn last_move_distance(&self, measure_finished: bool) -> i32 {
        let is_move = |event: &&RawEvent| event.kind == RawEventKind::Move;
        if !measure_finished && !self.events.last().is_some_and(|event| is_move(&event)) {
            return 0;
        }

        let run: Vec<Point> = self
            .events
            .iter()
            .rev()
            .skip_while(|event| !is_move(event))
            .take_while(is_move)
            .map(|event| event.position)
            .collect();

        run.windows(2)
            .map(|pair| pair[0].manhattan_distance(pair[1]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mouse_gestures::event::ButtonSet;

    fn held() -> ButtonSet {
        ButtonSet::empty().with(MouseButton::Right)
    }

    #[test]
    fn open_run_distance_requires_trailing_move() {
        let mut session = Session::default();
        session.events.push(RawEvent::press(MouseButton::Right, (0, 0)));
        session.events.push(RawEvent::movement((3, 0), held()));
        session.events.push(RawEvent::movement((3, 4), held()));
        assert_eq!(session.last_move_distance(false), 4);

        session.events.push(RawEvent::release(MouseButton::Right, (3, 4)));
        assert_eq!(session.last_move_distance(false), 0);
        assert_eq!(session.last_move_distance(true), 4);
    }

    #[test]
    fn only_the_latest_run_counts() {
        let mut session = Session::default();
        session.events.push(RawEvent::movement((0, 0), held()));
        session.events.push(RawEvent::movement((50, 0), held()));
        session.events.push(RawEvent::press(MouseButton::Left, (50, 0)));
        session.events.push(RawEvent::movement((50, 0), held()));
        session.events.push(RawEvent::movement((52, 1), held()));
        assert_eq!(session.last_move_distance(false), 3);
    }

    #[test]
    fn purge_only_touches_trailing_scrolls() {
        let mut session = Session::default();
        session.steps.push(Step::press(MouseButton::Right));
        session
            .steps
            .push(Step::scroll(crate::mouse_gestures::step::Direction::Up));
        session.events.push(RawEvent::press(MouseButton::Right, (0, 0)));
        session
            .events
            .push(RawEvent::wheel((0, 120), (0, 0), held()));
        session.purge_trailing_scrolls();
        assert_eq!(session.steps, vec![Step::press(MouseButton::Right)]);
        assert_eq!(session.events.len(), 1);
    }
}
