use gesture_engine::actions::{load_actions, ActionCatalog};
use gesture_engine::logging;
use gesture_engine::mouse_gestures::db::native_sequences;
use gesture_engine::mouse_gestures::profiles::load_table;
use gesture_engine::mouse_gestures::step::format_steps;
use gesture_engine::mouse_gestures::{GestureAction, GestureContext};
use gesture_engine::settings::Settings;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| "settings.json".to_string());
    let actions_path = args.next().unwrap_or_else(|| "actions.json".to_string());

    let settings = Settings::load(&settings_path)?;
    logging::init(settings.debug_logging, settings.log_file.clone());

    let actions = if std::path::Path::new(&actions_path).exists() {
        load_actions(&actions_path)?
    } else {
        tracing::warn!(path = %actions_path, "action list not found, only NoAction bindings will load");
        ActionCatalog::default()
    };

    tracing::info!(
        profiles_dir = %settings.profiles_dir().display(),
        profiles = ?settings.mouse_profiles_order,
        "checking mouse gesture profiles"
    );

    let table = load_table(&settings, &actions);
    for context in GestureContext::real() {
        let definitions = table.definitions(context);
        tracing::info!(
            context = context.name(),
            bindings = definitions.len(),
            native = native_sequences(context).len(),
            "context summary"
        );
        for definition in definitions {
            let action = match definition.action {
                Some(GestureAction::Trigger(id)) => actions.name(id).unwrap_or("?").to_string(),
                Some(GestureAction::ContextMenu) => "ContextMenu".to_string(),
                None => "NoAction".to_string(),
            };
            tracing::debug!(
                context = context.name(),
                steps = %format_steps(&definition.steps),
                %action,
                "binding"
            );
        }
    }

    Ok(())
}
