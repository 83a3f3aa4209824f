pub mod context;
pub mod db;
pub mod engine;
pub mod event;
pub mod matcher;
pub mod profiles;
pub mod reload;
mod service;
mod session;
pub mod step;

pub use context::GestureContext;
pub use db::{GestureAction, GestureDefinition, GestureTable};
pub use engine::{ClassifierFactory, DirectionalClassifierFactory, TrajectoryClassifier};
pub use event::{ButtonSet, Point, RawEvent, RawEventKind};
pub use matcher::{match_best, score, Cost, Resolution};
pub use service::{
    ActionExecutor, EventTarget, GestureManager, MockActionExecutor, MockActionHandle,
    MockEventTarget, Parameters, TargetId, TriggeredAction,
};
pub use step::{Direction, Modifiers, MouseButton, Step, StepKind};
