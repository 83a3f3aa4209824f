use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gesture_engine::actions::ActionCatalog;
use gesture_engine::mouse_gestures::profiles::{build_table, parse_ini};
use gesture_engine::mouse_gestures::step::parse_steps;
use gesture_engine::mouse_gestures::{match_best, GestureContext};

const DIRECTIONS: [&str; 4] = ["Up", "Down", "Left", "Right"];

fn bench_match(c: &mut Criterion) {
    let names: Vec<String> = (0..256).map(|i| format!("Action{i}")).collect();
    let actions = ActionCatalog::from_names(names.iter().cloned());

    let mut ini = String::from("[Generic]\n");
    let mut index = 0;
    for first in DIRECTIONS {
        for second in DIRECTIONS {
            for third in DIRECTIONS {
                ini.push_str(&format!(
                    "pressRight,move{first},move{second},move{third},releaseRight={}\n",
                    names[index]
                ));
                index += 1;
            }
        }
    }
    let profile = parse_ini(&ini);
    let table = build_table([&profile], &actions, true);

    let contexts = [GestureContext::Generic, GestureContext::Link];
    let miss = parse_steps("pressRight,moveUp,moveUp,moveUp,moveUp,releaseRight").unwrap();
    let hit = parse_steps("pressRight,moveRight,moveRight,moveRight,releaseRight+ctrl").unwrap();

    c.bench_function("match_best_64_definitions_miss", |b| {
        b.iter(|| match_best(black_box(&table), black_box(&miss), &contexts))
    });
    c.bench_function("match_best_64_definitions_tolerant", |b| {
        b.iter(|| match_best(black_box(&table), black_box(&hit), &contexts))
    });
}

criterion_group!(benches, bench_match);
criterion_main!(benches);
