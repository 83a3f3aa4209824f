use gesture_engine::actions::ActionCatalog;
use gesture_engine::mouse_gestures::db::context_menu_definition;
use gesture_engine::mouse_gestures::profiles::{
    build_table, load_table, parse_binding, parse_ini, profile_path, NO_ACTION,
};
use gesture_engine::mouse_gestures::{
    Direction, GestureAction, GestureContext, Modifiers, MouseButton, Step,
};
use gesture_engine::settings::Settings;
use tempfile::tempdir;

fn catalog() -> ActionCatalog {
    ActionCatalog::from_names(["GoBack", "GoForward", "ReloadAction", "CloseTab"])
}

#[test]
fn known_action_binds() {
    let actions = catalog();
    let definition = parse_binding("pressRight,moveLeft,releaseRight", "GoBack", &actions, true)
        .expect("binding");
    assert_eq!(
        definition.steps,
        vec![
            Step::press(MouseButton::Right),
            Step::movement(Direction::Left),
            Step::release(MouseButton::Right),
        ]
    );
    assert_eq!(
        definition.action,
        Some(GestureAction::Trigger(actions.resolve("GoBack").unwrap()))
    );
}

#[test]
fn action_suffix_is_optional() {
    let actions = catalog();
    assert_eq!(actions.resolve("Reload"), actions.resolve("ReloadAction"));
    assert_eq!(actions.resolve("GoBackAction"), actions.resolve("GoBack"));
    assert!(parse_binding("pressMiddle", "Reload", &actions, true).is_some());
}

#[test]
fn no_action_binds_without_action() {
    let definition = parse_binding("doubleClickLeft+ctrl", NO_ACTION, &catalog(), true)
        .expect("binding");
    assert_eq!(definition.action, None);
    assert_eq!(
        definition.steps,
        vec![Step::double_click(MouseButton::Left).with_modifiers(Modifiers::CTRL)]
    );
}

#[test]
fn bad_entries_are_skipped() {
    let actions = catalog();
    assert!(parse_binding("pressLeft", "OpenSesame", &actions, true).is_none());
    assert!(parse_binding("pressThumb", "GoBack", &actions, true).is_none());
    assert!(parse_binding("", "GoBack", &actions, true).is_none());
}

#[test]
fn move_bindings_are_dropped_when_gestures_are_disabled() {
    let actions = catalog();
    assert!(parse_binding("pressRight,moveUp,releaseRight", "GoBack", &actions, false).is_none());
    assert!(parse_binding("pressBack", "GoBack", &actions, false).is_some());
}

#[test]
fn table_keeps_profile_order_after_context_menu() {
    let actions = catalog();
    let first = parse_ini(
        "[Generic]\npressBack=GoBack\n[LinkContext]\npressMiddle=CloseTab\n[Sidebar]\npressLeft=GoBack\n",
    );
    let second = parse_ini("[Generic]\npressForward=GoForward\npressTask=Unknown\n");

    let table = build_table([&first, &second], &actions, true);

    let generic = table.definitions(GestureContext::Generic);
    assert_eq!(generic.len(), 3);
    assert_eq!(generic[0], context_menu_definition());
    assert_eq!(generic[1].steps, vec![Step::press(MouseButton::Back)]);
    assert_eq!(generic[2].steps, vec![Step::press(MouseButton::Forward)]);

    let link = table.definitions(GestureContext::Link);
    assert_eq!(link.len(), 2);
    assert_eq!(link[1].steps, vec![Step::press(MouseButton::Middle)]);

    for context in GestureContext::real() {
        assert_eq!(table.definitions(context)[0], context_menu_definition());
    }
}

#[test]
fn load_table_reads_profiles_in_configured_order() {
    let dir = tempdir().unwrap();
    let settings = Settings {
        data_dir: Some(dir.path().to_path_buf()),
        mouse_profiles_order: vec!["custom".into(), "missing".into(), "default".into()],
        ..Settings::default()
    };
    std::fs::create_dir_all(settings.profiles_dir()).unwrap();
    std::fs::write(
        profile_path(&settings.profiles_dir(), "custom"),
        "[ToolBar]\npressMiddle=CloseTab\n",
    )
    .unwrap();
    std::fs::write(
        profile_path(&settings.profiles_dir(), "default"),
        "; defaults\n[ToolBar]\npressMiddle+shift=\"GoBack\"\n",
    )
    .unwrap();

    let actions = catalog();
    let table = load_table(&settings, &actions);
    let toolbar = table.definitions(GestureContext::ToolBar);
    assert_eq!(toolbar.len(), 3);
    assert_eq!(
        toolbar[1].action,
        Some(GestureAction::Trigger(actions.resolve("CloseTab").unwrap()))
    );
    assert_eq!(
        toolbar[2].action,
        Some(GestureAction::Trigger(actions.resolve("GoBack").unwrap()))
    );
}

#[test]
fn missing_profiles_leave_only_the_context_menu() {
    let dir = tempdir().unwrap();
    let settings = Settings {
        data_dir: Some(dir.path().to_path_buf()),
        ..Settings::default()
    };
    let table = load_table(&settings, &catalog());
    assert_eq!(table.len(), GestureContext::real().count());
    assert!(table.intersects(&[GestureContext::NoTabHandle]));
}
