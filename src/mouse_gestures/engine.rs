use crate::mouse_gestures::event::Point;
use crate::mouse_gestures::step::Direction;

pub type CandidateId = usize;

/// Turns a pointer path into one of a set of registered direction sequences.
///
/// A classifier instance lives for a single move run: the session starts it
/// at the last click position, feeds positions, registers the direction runs
/// the gesture table could accept next and finally asks for the best one.
pub trait TrajectoryClassifier {
    fn start_run(&mut self, origin: Point);
    fn register_candidate(&mut self, directions: &[Direction]) -> CandidateId;
    fn feed_position(&mut self, position: Point);
    fn finish_run(&mut self) -> Option<CandidateId>;
}

pub trait ClassifierFactory {
    fn create(&self) -> Box<dyn TrajectoryClassifier>;
}

#[derive(Debug, Clone, Copy)]
pub struct DirectionalClassifierFactory {
    pub threshold_px: f32,
}

impl Default for DirectionalClassifierFactory {
    fn default() -> Self {
        Self { threshold_px: 8.0 }
    }
}

impl ClassifierFactory for DirectionalClassifierFactory {
    fn create(&self) -> Box<dyn TrajectoryClassifier> {
        Box::new(DirectionalClassifier::new(self.threshold_px))
    }
}

/// Four-way stroke tokenizer.
///
/// Every time the pointer travels `threshold_px` away from the anchor, the
/// dominant axis yields a stroke and the anchor moves to the current point.
/// Consecutive identical strokes collapse into one.
#[derive(Debug)]
pub struct DirectionalClassifier {
    threshold_px: f32,
    anchor: Option<Point>,
    strokes: Vec<Direction>,
    candidates: Vec<Vec<Direction>>,
}

impl DirectionalClassifier {
    pub fn new(threshold_px: f32) -> Self {
        Self {
            threshold_px,
            anchor: None,
            strokes: Vec::new(),
            candidates: Vec::new(),
        }
    }

    pub fn strokes(&self) -> &[Direction] {
        &self.strokes
    }

    fn emit(&mut self, direction: Direction, point: Point) {
        self.anchor = Some(point);
        if self.strokes.last().copied() != Some(direction) {
            self.strokes.push(direction);
        }
    }
}

impl TrajectoryClassifier for DirectionalClassifier {
    fn start_run(&mut self, origin: Point) {
        self.anchor = Some(origin);
        self.strokes.clear();
    }

    fn register_candidate(&mut self, directions: &[Direction]) -> CandidateId {
        self.candidates.push(directions.to_vec());
        self.candidates.len() - 1
    }

    fn feed_position(&mut self, position: Point) {
        let anchor = match self.anchor {
            Some(anchor) => anchor,
            None => {
                self.anchor = Some(position);
                return;
            }
        };

        let dx = (position.x - anchor.x) as f32;
        let dy = (position.y - anchor.y) as f32;
        if dx * dx + dy * dy < self.threshold_px * self.threshold_px {
            return;
        }

        if let Some(direction) = direction_from_delta(dx, dy) {
            self.emit(direction, position);
        }
    }

    fn finish_run(&mut self) -> Option<CandidateId> {
        let strokes = std::mem::take(&mut self.strokes);
        self.anchor = None;
        if strokes.is_empty() {
            return None;
        }
        self.candidates.iter().position(|candidate| {
            candidate.len() == strokes.len()
                && candidate
                    .iter()
                    .zip(&strokes)
                    .all(|(expected, actual)| direction_accepts(*expected, *actual))
        })
    }
}

/// Screen coordinates: positive `dy` points down.
pub fn direction_from_delta(dx: f32, dy: f32) -> Option<Direction> {
    let abs_x = dx.abs();
    let abs_y = dy.abs();
    if abs_x == 0.0 && abs_y == 0.0 {
        return None;
    }

    if abs_x >= abs_y {
        Some(if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        Some(if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

fn direction_accepts(expected: Direction, actual: Direction) -> bool {
    match expected {
        Direction::Unknown => true,
        Direction::Horizontal => matches!(actual, Direction::Left | Direction::Right),
        Direction::Vertical => matches!(actual, Direction::Up | Direction::Down),
        _ => expected == actual,
    }
}
