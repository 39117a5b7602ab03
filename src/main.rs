use bevy::prelude::*;

use dropdown_menu::startup::DemoPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: String::from("Dropdown Menu Example"),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(DemoPlugin)
        .run();
}
