use gesture_engine::mouse_gestures::engine::{
    direction_from_delta, DirectionalClassifier, DirectionalClassifierFactory,
};
use gesture_engine::mouse_gestures::{ClassifierFactory, Direction, Point, TrajectoryClassifier};

fn feed(classifier: &mut DirectionalClassifier, points: &[(i32, i32)]) {
    for point in points {
        classifier.feed_position(Point::from(*point));
    }
}

#[test]
fn jitter_under_threshold_yields_no_stroke() {
    let mut classifier = DirectionalClassifier::new(10.0);
    classifier.start_run(Point::new(0, 0));
    feed(&mut classifier, &[(3, 4), (5, 1), (-2, 3)]);

    assert!(classifier.strokes().is_empty());
    classifier.register_candidate(&[Direction::Left]);
    assert_eq!(classifier.finish_run(), None);
}

#[test]
fn four_way_strokes() {
    let mut classifier = DirectionalClassifier::new(5.0);
    classifier.start_run(Point::new(0, 0));
    feed(&mut classifier, &[(12, 0), (12, 12), (0, 24), (0, 12)]);

    assert_eq!(
        classifier.strokes(),
        &[Direction::Right, Direction::Down, Direction::Left, Direction::Up]
    );
}

#[test]
fn long_move_collapses_repeats() {
    let mut classifier = DirectionalClassifier::new(3.0);
    classifier.start_run(Point::new(0, 0));
    feed(&mut classifier, &[(4, 0), (15, 0), (27, 0)]);

    assert_eq!(classifier.strokes(), &[Direction::Right]);
}

#[test]
fn finish_run_picks_first_matching_candidate() {
    let mut classifier = DirectionalClassifier::new(8.0);
    let left = classifier.register_candidate(&[Direction::Left]);
    let up_down = classifier.register_candidate(&[Direction::Up, Direction::Down]);
    let vertical = classifier.register_candidate(&[Direction::Vertical, Direction::Vertical]);
    assert_ne!(left, up_down);
    assert_ne!(up_down, vertical);

    classifier.start_run(Point::new(50, 50));
    feed(&mut classifier, &[(50, 30), (50, 60)]);

    assert_eq!(classifier.finish_run(), Some(up_down));
    assert!(classifier.strokes().is_empty());
}

#[test]
fn wildcard_directions_accept_their_axis() {
    let mut classifier = DirectionalClassifier::new(8.0);
    let horizontal = classifier.register_candidate(&[Direction::Horizontal]);
    classifier.register_candidate(&[Direction::Unknown]);

    classifier.start_run(Point::new(0, 0));
    feed(&mut classifier, &[(-20, 2)]);
    assert_eq!(classifier.finish_run(), Some(horizontal));

    classifier.start_run(Point::new(0, 0));
    feed(&mut classifier, &[(0, 20)]);
    assert_eq!(classifier.finish_run(), Some(1));
}

#[test]
fn delta_uses_screen_coordinates() {
    assert_eq!(direction_from_delta(0.0, 5.0), Some(Direction::Down));
    assert_eq!(direction_from_delta(0.0, -5.0), Some(Direction::Up));
    assert_eq!(direction_from_delta(-5.0, 4.0), Some(Direction::Left));
    assert_eq!(direction_from_delta(5.0, 5.0), Some(Direction::Right));
    assert_eq!(direction_from_delta(0.0, 0.0), None);
}

#[test]
fn factory_creates_fresh_classifiers() {
    let factory = DirectionalClassifierFactory { threshold_px: 4.0 };
    let mut first = factory.create();
    first.register_candidate(&[Direction::Right]);
    first.start_run(Point::new(0, 0));
    first.feed_position(Point::new(10, 0));
    assert_eq!(first.finish_run(), Some(0));

    let mut second = factory.create();
    second.start_run(Point::new(0, 0));
    second.feed_position(Point::new(10, 0));
    assert_eq!(second.finish_run(), None);
}
