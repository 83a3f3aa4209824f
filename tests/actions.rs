use gesture_engine::actions::{load_actions, save_actions, ActionCatalog, ActionId};
use tempfile::tempdir;

#[test]
fn ids_follow_declaration_order() {
    let catalog = ActionCatalog::from_names(["GoBack", "GoForward", "GoBack"]);
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.resolve("GoBack"), Some(ActionId(0)));
    assert_eq!(catalog.resolve("GoForward"), Some(ActionId(1)));
    assert_eq!(catalog.name(ActionId(1)), Some("GoForward"));
    assert_eq!(catalog.name(ActionId(5)), None);
}

#[test]
fn unknown_names_do_not_resolve() {
    let catalog = ActionCatalog::from_names(["Reload"]);
    assert_eq!(catalog.resolve("NoAction"), None);
    assert_eq!(catalog.resolve("Action"), None);
    assert_eq!(catalog.resolve("ReloadAction"), Some(ActionId(0)));
}

#[test]
fn catalog_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("actions.json");
    std::fs::write(
        &path,
        r#"[{ "name": "GoBack", "desc": "History back" }, { "name": "CloseTab" }]"#,
    )
    .unwrap();

    let catalog = load_actions(path.to_str().unwrap()).unwrap();
    assert_eq!(catalog.entries()[0].desc, "History back");
    assert_eq!(catalog.resolve("CloseTab"), Some(ActionId(1)));

    let copy = dir.path().join("copy.json");
    save_actions(copy.to_str().unwrap(), &catalog).unwrap();
    let reloaded = load_actions(copy.to_str().unwrap()).unwrap();
    assert_eq!(reloaded.entries(), catalog.entries());
}
