use crate::actions::{ActionCatalog, ActionId};
use crate::mouse_gestures::context::GestureContext;
use crate::mouse_gestures::db::{GestureAction, GestureTable};
use crate::mouse_gestures::engine::{ClassifierFactory, DirectionalClassifierFactory};
use crate::mouse_gestures::event::{Point, RawEvent, RawEventKind};
use crate::mouse_gestures::matcher::{match_best, Resolution};
use crate::mouse_gestures::profiles::load_table;
use crate::mouse_gestures::reload::ReloadDebouncer;
use crate::mouse_gestures::session::Session;
use crate::mouse_gestures::step::{format_steps, Direction, Step, StepKind};
use crate::settings::{Settings, SettingsOption};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Ambient values handed to the action executor along with the action id.
pub type Parameters = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u64);

/// An event source owned by the windowing layer.
///
/// The manager only keeps a weak handle. The windowing layer reports
/// destruction through [`GestureManager::notify_target_destroyed`]; a handle
/// that no longer upgrades is treated the same way.
pub trait EventTarget {
    fn id(&self) -> TargetId;
    /// Route this target's input through the manager (`true`) or not.
    fn set_intercepted(&self, intercepted: bool);
    /// Deliver an event straight to the target, bypassing interception.
    fn deliver(&self, event: &RawEvent);
    fn open_context_menu(&self, position: Point);
}

pub trait ActionExecutor {
    fn trigger(
        &mut self,
        action: ActionId,
        target: &Rc<dyn EventTarget>,
        parameters: &Parameters,
    ) -> bool;
}

/// Mouse gesture recognizer bound to one gesture table.
///
/// Driven from a single thread: the windowing layer calls
/// [`start_tracking`](Self::start_tracking) for the first event of a
/// potential gesture and [`handle_event`](Self::handle_event) for every
/// further event of the intercepted target.
pub struct GestureManager {
    settings: Settings,
    actions: ActionCatalog,
    table: GestureTable,
    session: Session,
    executor: Box<dyn ActionExecutor>,
    classifiers: Box<dyn ClassifierFactory>,
    reload: ReloadDebouncer,
}

impl GestureManager {
    pub fn new(
        settings: Settings,
        actions: ActionCatalog,
        executor: Box<dyn ActionExecutor>,
    ) -> Self {
        Self::new_with_classifier(
            settings,
            actions,
            executor,
            Box::new(DirectionalClassifierFactory::default()),
        )
    }

    pub fn new_with_classifier(
        settings: Settings,
        actions: ActionCatalog,
        executor: Box<dyn ActionExecutor>,
        classifiers: Box<dyn ClassifierFactory>,
    ) -> Self {
        let table = load_table(&settings, &actions);
        let reload = ReloadDebouncer::new(Duration::from_millis(settings.reload_debounce_ms));
        Self {
            settings,
            actions,
            table,
            session: Session::default(),
            executor,
            classifiers,
            reload,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn actions(&self) -> &ActionCatalog {
        &self.actions
    }

    pub fn table(&self) -> &GestureTable {
        &self.table
    }

    /// Swap in a table built elsewhere.
    pub fn replace_table(&mut self, table: GestureTable) {
        self.table = table;
    }

    pub fn steps(&self) -> &[Step] {
        &self.session.steps
    }

    pub fn buffered_events(&self) -> &[RawEvent] {
        &self.session.events
    }

    pub fn is_tracking(&self) -> bool {
        self.session.target().is_some()
    }

    pub fn current_tracked_target(&self) -> Option<Rc<dyn EventTarget>> {
        self.session.target()
    }

    /// Begin (or re-target) a gesture with `event` as its first event.
    ///
    /// Returns whether the event was consumed. Fails without side effects
    /// when none of `contexts` is configured or the event is already
    /// buffered.
    pub fn start_tracking(
        &mut self,
        target: &Rc<dyn EventTarget>,
        event: &RawEvent,
        contexts: &[GestureContext],
        parameters: Parameters,
    ) -> bool {
        if !self.table.intersects(contexts) || self.session.events.contains(event) {
            return false;
        }

        if self.session.target_lost() {
            self.cancel();
        }

        self.session.parameters = parameters;

        if !self.is_tracking() {
            self.session.contexts = contexts.to_vec();
            self.session.is_releasing = false;
            self.session.after_scroll = false;
        }

        self.session.attach(target);
        tracing::debug!(target_id = target.id().0, ?contexts, "mouse gesture tracking started");

        self.handle_event(event)
    }

    /// Move interception to `target` without touching the buffers. `None`
    /// cancels an open gesture.
    pub fn continue_tracking(&mut self, target: Option<&Rc<dyn EventTarget>>) -> bool {
        if !self.is_tracking() {
            return false;
        }

        match target {
            Some(target) => {
                self.session.attach(target);
                true
            }
            None => {
                self.cancel();
                false
            }
        }
    }

    pub fn notify_target_destroyed(&mut self, id: TargetId) {
        if self.session.target_id() == Some(id) {
            tracing::debug!(target_id = id.0, "tracked target destroyed, gesture canceled");
            self.cancel();
        }
    }

    pub fn cancel(&mut self) {
        self.session.reset();
    }

    /// Process one event of the intercepted target. Returns whether the
    /// event was consumed.
    pub fn handle_event(&mut self, event: &RawEvent) -> bool {
        if self.session.target_lost() {
            self.cancel();
            return false;
        }
        if !self.is_tracking() {
            return false;
        }

        let mut resolution = Resolution::Unresolved;

        match event.kind {
            RawEventKind::Press | RawEventKind::Release | RawEventKind::DoubleClick => {
                if !self.session.is_repeat(event) {
                    resolution = self.handle_button(event);
                }
            }
            RawEventKind::Move => {
                resolution = self.handle_move(event);
            }
            RawEventKind::Wheel => {
                resolution = self.handle_wheel(event);
            }
        }

        if self.is_tracking() && event.buttons.is_empty() {
            self.cancel();
        }

        !self.session.steps.is_empty() || resolution.is_resolved()
    }

    fn handle_button(&mut self, event: &RawEvent) -> Resolution {
        self.session.events.push(event.clone());

        if self.session.after_scroll && event.kind == RawEventKind::Release {
            return Resolution::Unresolved;
        }

        self.session.last_position = event.position;
        self.session.last_click = event.position;

        self.finish_move_run(event);

        self.session.steps.push(Step::from_raw_event(event));

        if self.session.is_releasing && event.kind == RawEventKind::Release {
            if let Some(button) = event.button {
                self.session.remove_button_steps(button);
            }
        } else {
            self.session.is_releasing = false;
        }

        self.session.classifier = None;

        let resolution = self.match_steps();
        if self.trigger(resolution) {
            self.session.is_releasing = true;
        }

        self.session.after_scroll = false;

        resolution
    }

    fn handle_move(&mut self, event: &RawEvent) -> Resolution {
        self.session.events.push(event.clone());
        self.session.after_scroll = false;
        self.session.last_position = event.position;

        let classifier = self.session.classifier.get_or_insert_with(|| {
            let mut classifier = self.classifiers.create();
            classifier.start_run(self.session.last_click);
            classifier
        });
        classifier.feed_position(event.position);

        if self.session.last_move_distance(false) < self.settings.drag_threshold {
            return Resolution::Unresolved;
        }

        self.session
            .steps
            .push(Step::movement(Direction::Unknown).with_modifiers(event.modifiers));

        let resolution = self.match_steps();
        if resolution.is_resolved() {
            self.session.classifier = None;
            self.trigger(resolution);
        } else {
            self.session.steps.pop();
        }

        resolution
    }

    fn handle_wheel(&mut self, event: &RawEvent) -> Resolution {
        self.session.events.push(event.clone());

        self.finish_move_run(event);

        self.session.steps.push(Step::from_raw_event(event));
        self.session.last_click = event.position;
        self.session.classifier = None;

        let resolution = self.match_steps();
        self.trigger(resolution);

        self.session.purge_trailing_scrolls();
        self.session.after_scroll = true;

        resolution
    }

    /// Close the open move run, if any, and commit the directions it
    /// produced as move steps.
    fn finish_move_run(&mut self, event: &RawEvent) {
        let Some(mut classifier) = self.session.classifier.take() else {
            return;
        };

        let committed = self.session.steps.len();
        let mut candidates: HashMap<usize, Vec<Direction>> = HashMap::new();
        for context in &self.session.contexts {
            for definition in self.table.definitions(*context) {
                let steps = &definition.steps;
                if steps.len() <= committed
                    || steps[committed].kind() != StepKind::Move
                    || steps[..committed] != self.session.steps[..]
                {
                    continue;
                }

                let moves: Vec<Direction> = steps[committed..]
                    .iter()
                    .take_while(|step| step.kind() == StepKind::Move)
                    .filter_map(Step::direction)
                    .collect();
                if !moves.is_empty() {
                    let id = classifier.register_candidate(&moves);
                    candidates.insert(id, moves);
                }
            }
        }

        if event.kind != RawEventKind::Wheel {
            classifier.feed_position(event.position);
        }

        let recognized = classifier
            .finish_run()
            .and_then(|id| candidates.remove(&id))
            .unwrap_or_default();
        for direction in &recognized {
            self.session
                .steps
                .push(Step::movement(*direction).with_modifiers(event.modifiers));
        }

        if recognized.is_empty()
            && self.session.last_move_distance(true) >= self.settings.drag_threshold
        {
            self.session
                .steps
                .push(Step::movement(Direction::Unknown).with_modifiers(event.modifiers));
        }
    }

    fn match_steps(&self) -> Resolution {
        let resolution = match_best(&self.table, &self.session.steps, &self.session.contexts);
        tracing::debug!(
            steps = %format_steps(&self.session.steps),
            ?resolution,
            "mouse gesture matched"
        );
        resolution
    }

    /// Carry out `resolution`. Returns `false` only when there was nothing
    /// to do.
    fn trigger(&mut self, resolution: Resolution) -> bool {
        if !resolution.is_resolved() {
            return false;
        }

        let Some(target) = self.session.target() else {
            self.cancel();
            return false;
        };

        target.set_intercepted(false);

        match resolution.action() {
            None => {
                // State is cleared before the target sees the replay.
                let events = std::mem::take(&mut self.session.events);
                self.cancel();
                tracing::debug!(events = events.len(), "native gesture, replaying events");
                for event in &events {
                    target.deliver(event);
                }
            }
            Some(GestureAction::ContextMenu) => {
                tracing::debug!("mouse gesture opens context menu");
                target.open_context_menu(self.session.last_position);
            }
            Some(GestureAction::Trigger(action)) => {
                let parameters = self.session.parameters.clone();
                let handled = self.executor.trigger(action, &target, &parameters);
                tracing::debug!(
                    action = self.actions.name(action).unwrap_or("?"),
                    handled,
                    "mouse gesture action triggered"
                );
            }
        }

        if let Some(tracked) = self.session.target() {
            tracked.set_intercepted(true);
        }

        true
    }

    /// Option change notification. Profile-related options schedule a
    /// debounced reload.
    pub fn handle_option_changed(&mut self, option: SettingsOption, now: Instant) {
        if option.affects_profiles() && self.reload.schedule(now) {
            tracing::debug!(?option, "mouse gesture reload scheduled");
        }
    }

    pub fn apply_settings(&mut self, settings: Settings, now: Instant) {
        let changed = self.settings.changed_options(&settings);
        self.reload
            .set_delay(Duration::from_millis(settings.reload_debounce_ms));
        self.settings = settings;
        for option in changed {
            self.handle_option_changed(option, now);
        }
    }

    pub fn is_reload_pending(&self) -> bool {
        self.reload.is_pending()
    }

    /// Run a pending reload whose deadline has passed.
    pub fn poll_reload(&mut self, now: Instant) -> bool {
        if !self.reload.take_due(now) {
            return false;
        }
        self.reload_now();
        true
    }

    pub fn reload_now(&mut self) {
        self.reload.cancel();
        self.table = load_table(&self.settings, &self.actions);
    }
}

/// Event target that records what the manager did to it.
#[derive(Debug)]
pub struct MockEventTarget {
    id: TargetId,
    intercepted: Cell<bool>,
    intercept_changes: Cell<usize>,
    delivered: RefCell<Vec<RawEvent>>,
    context_menus: RefCell<Vec<Point>>,
}

impl MockEventTarget {
    pub fn new(id: u64) -> Rc<Self> {
        Rc::new(Self {
            id: TargetId(id),
            intercepted: Cell::new(false),
            intercept_changes: Cell::new(0),
            delivered: RefCell::new(Vec::new()),
            context_menus: RefCell::new(Vec::new()),
        })
    }

    pub fn is_intercepted(&self) -> bool {
        self.intercepted.get()
    }

    pub fn intercept_changes(&self) -> usize {
        self.intercept_changes.get()
    }

    pub fn delivered(&self) -> Vec<RawEvent> {
        self.delivered.borrow().clone()
    }

    pub fn context_menus(&self) -> Vec<Point> {
        self.context_menus.borrow().clone()
    }
}

impl EventTarget for MockEventTarget {
    fn id(&self) -> TargetId {
        self.id
    }

    fn set_intercepted(&self, intercepted: bool) {
        if self.intercepted.replace(intercepted) != intercepted {
            self.intercept_changes.set(self.intercept_changes.get() + 1);
        }
    }

    fn deliver(&self, event: &RawEvent) {
        self.delivered.borrow_mut().push(event.clone());
    }

    fn open_context_menu(&self, position: Point) {
        self.context_menus.borrow_mut().push(position);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriggeredAction {
    pub action: ActionId,
    pub target: TargetId,
    pub parameters: Parameters,
}

/// Executor that records every trigger; inspect it through the
/// [`MockActionHandle`] returned by [`MockActionExecutor::new`].
#[derive(Debug)]
pub struct MockActionExecutor {
    state: Rc<MockActionState>,
}

#[derive(Debug, Default)]
struct MockActionState {
    handled: Cell<bool>,
    triggered: RefCell<Vec<TriggeredAction>>,
}

impl MockActionExecutor {
    pub fn new() -> (Self, MockActionHandle) {
        let state = Rc::new(MockActionState {
            handled: Cell::new(true),
            triggered: RefCell::new(Vec::new()),
        });
        (
            Self {
                state: Rc::clone(&state),
            },
            MockActionHandle { state },
        )
    }
}

impl ActionExecutor for MockActionExecutor {
    fn trigger(
        &mut self,
        action: ActionId,
        target: &Rc<dyn EventTarget>,
        parameters: &Parameters,
    ) -> bool {
        self.state.triggered.borrow_mut().push(TriggeredAction {
            action,
            target: target.id(),
            parameters: parameters.clone(),
        });
        self.state.handled.get()
    }
}

#[derive(Debug, Clone)]
pub struct MockActionHandle {
    state: Rc<MockActionState>,
}

impl MockActionHandle {
    pub fn triggered(&self) -> Vec<TriggeredAction> {
        self.state.triggered.borrow().clone()
    }

    pub fn triggered_actions(&self) -> Vec<ActionId> {
        self.triggered().iter().map(|entry| entry.action).collect()
    }

    pub fn set_handled(&self, handled: bool) {
        self.state.handled.set(handled);
    }
}
