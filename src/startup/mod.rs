//! Demo scene: a camera and the dropdowns described in
//! `content/demo_dropdowns.json`.
use bevy::prelude::*;
use once_cell::sync::Lazy;

use crate::systems::ui::dropdown::{
    config::DropdownConfig, menu::OptionCommand, spawn_dropdown, DropdownError, DropdownPlugin,
    DropdownSelected,
};

pub mod render;
pub mod shortcuts;

const DEMO_DROPDOWNS_JSON: &str = include_str!("./content/demo_dropdowns.json");

static DEMO_DROPDOWNS: Lazy<Result<Vec<DropdownConfig>, DropdownError>> =
    Lazy::new(|| DropdownConfig::list_from_json(DEMO_DROPDOWNS_JSON));

pub struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<DropdownPlugin>() {
            app.add_plugins(DropdownPlugin);
        }
        app.add_systems(Startup, (render::setup_camera, spawn_demo_dropdowns))
            .add_systems(Update, (shortcuts::close_on_esc, log_selections));
    }
}

pub fn demo_configs() -> Vec<DropdownConfig> {
    match &*DEMO_DROPDOWNS {
        Ok(configs) => configs.clone(),
        Err(error) => {
            warn!("failed to load demo dropdowns: {error}; using defaults");
            vec![DropdownConfig::default()]
        }
    }
}

fn announce(option: &str) -> OptionCommand {
    let message = format!("{option} selected");
    OptionCommand::new(move || info!("{message}"))
}

fn spawn_demo_dropdowns(mut commands: Commands) {
    for (index, config) in demo_configs().into_iter().enumerate() {
        // Only the first dropdown gets explicit commands; the others fall back
        // to the logging commands.
        let option_commands = if index == 0 {
            config.options.iter().map(|option| announce(option)).collect()
        } else {
            vec![]
        };

        if let Err(error) = spawn_dropdown(&mut commands, None, config, option_commands) {
            error!("failed to spawn demo dropdown {index}: {error}");
        }
    }
}

fn log_selections(mut selected: MessageReader<DropdownSelected>) {
    for selection in selected.read() {
        info!(
            "dropdown {:?} now shows {:?}",
            selection.dropdown, selection.label
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::ui::dropdown::{
        layout::{BorderStyle, DropdownLayout},
        DropdownWidget,
    };

    #[test]
    fn embedded_demo_config_parses() {
        let configs = DropdownConfig::list_from_json(DEMO_DROPDOWNS_JSON).expect("demo config");
        assert_eq!(configs.len(), 2);
        assert!(configs.iter().all(|config| config.options.len() == 4));

        let first = DropdownLayout::from_config(&configs[0]);
        let second = DropdownLayout::from_config(&configs[1]);
        assert_eq!(first.borders, BorderStyle::Full);
        assert_eq!(second.borders, BorderStyle::Sides);
        assert_eq!(second.position, Vec2::ZERO);
        assert!(!second.alternate_colors);
    }

    #[test]
    fn startup_spawns_every_demo_dropdown() {
        let mut app = App::new();
        app.add_systems(Startup, spawn_demo_dropdowns);
        app.update();

        let mut query = app.world_mut().query::<&DropdownWidget>();
        let widgets: Vec<&DropdownWidget> = query.iter(app.world()).collect();
        assert_eq!(widgets.len(), 2);
        assert!(widgets.iter().all(|widget| widget.menu.commands().len() == 4));
    }
}
