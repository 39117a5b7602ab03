//! A dropdown/select widget for Bevy 2D scenes.
//!
//! Spawn one with [`systems::ui::dropdown::spawn_dropdown`] after adding
//! [`systems::ui::dropdown::DropdownPlugin`].
pub mod startup;
pub mod systems;
