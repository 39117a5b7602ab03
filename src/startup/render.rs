use bevy::{color::palettes::css::BLACK, prelude::*};

#[derive(Component)]
pub struct MainCamera;

pub fn setup_camera(mut commands: Commands, mut clear_color: ResMut<ClearColor>) {
    clear_color.0 = BLACK.into();
    commands.spawn((Camera2d, MainCamera));
}
