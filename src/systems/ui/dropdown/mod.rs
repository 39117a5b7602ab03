//! Dropdown/select widget.
//!
//! A dropdown is a header (frame, face, label and a caret toggle) plus an
//! option list that starts hidden. Clicking the toggle flips the list;
//! clicking an option runs its command, shows the option in the header and
//! hides the list again.
//!
//! State lives in `DropdownWidget` on the root entity. Systems run in
//! `DropdownSystem` order after the shared click latch:
//! - `Dispatch` turns triggered clicks into menu transitions
//! - `Sync` pushes label/visibility changes back onto the node tree
use std::fmt;

use bevy::prelude::*;

pub mod config;
pub mod layout;
pub mod menu;
pub mod scene;

use crate::systems::interaction::{
    register_clickable, Clickable, InteractionPlugin, InteractionSystem,
};
use config::DropdownConfig;
use menu::{DropdownMenu, OptionCommand};
use scene::{build_dropdown, sync_scene, CommandsScene, DropdownNodes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownError {
    MoreCommandsThanOptions { commands: usize, options: usize },
    ConfigParse(String),
}

impl fmt::Display for DropdownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoreCommandsThanOptions { commands, options } => write!(
                f,
                "more commands than options ({commands} commands for {options} options)"
            ),
            Self::ConfigParse(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for DropdownError {}

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum DropdownSystem {
    Dispatch,
    Sync,
}

pub struct DropdownPlugin;

impl Plugin for DropdownPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<InteractionPlugin>() {
            app.add_plugins(InteractionPlugin);
        }
        register_clickable::<DropdownAction>(app);

        app.add_message::<DropdownSelected>()
            .configure_sets(
                Update,
                (DropdownSystem::Dispatch, DropdownSystem::Sync)
                    .chain()
                    .after(InteractionSystem::Clickable),
            )
            .add_systems(
                Update,
                dispatch_dropdown_actions.in_set(DropdownSystem::Dispatch),
            )
            .add_systems(Update, sync_dropdown_visuals.in_set(DropdownSystem::Sync));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropdownAction {
    Toggle,
    Select,
}

#[derive(Component, Debug)]
#[require(Transform, Visibility)]
pub struct DropdownWidget {
    pub menu: DropdownMenu,
    pub nodes: DropdownNodes<Entity>,
}

/// Links every node of a dropdown back to its root.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropdownPart {
    pub root: Entity,
}

/// The `(label, command)` pair an option row was created with.
#[derive(Component, Clone, Debug)]
pub struct OptionBinding {
    pub label: String,
    pub command: OptionCommand,
}

#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct DropdownSelected {
    pub dropdown: Entity,
    /// First option index carrying `label`, if any.
    pub index: Option<usize>,
    pub label: String,
}

/// Builds a dropdown and returns its root entity.
///
/// Fails without spawning anything when more commands than options are given.
pub fn spawn_dropdown(
    commands: &mut Commands,
    parent: Option<Entity>,
    config: DropdownConfig,
    option_commands: Vec<OptionCommand>,
) -> Result<Entity, DropdownError> {
    let menu = DropdownMenu::new(config, option_commands)?;

    let nodes = {
        let mut scene = CommandsScene::new(commands).with_parent(parent);
        build_dropdown(&mut scene, &menu)
    };

    info!(
        "spawned dropdown {:?} with {} options",
        menu.header_text(),
        menu.options().len()
    );
    commands
        .entity(nodes.root)
        .insert(DropdownWidget { menu, nodes });

    Ok(nodes.root)
}

pub fn dispatch_dropdown_actions(
    clickable_query: Query<(
        &Clickable<DropdownAction>,
        &DropdownPart,
        Option<&OptionBinding>,
    )>,
    mut dropdown_query: Query<&mut DropdownWidget>,
    mut selected: MessageWriter<DropdownSelected>,
) {
    for (clickable, part, binding) in clickable_query.iter() {
        if !clickable.triggered {
            continue;
        }

        let Ok(mut widget) = dropdown_query.get_mut(part.root) else {
            warn!("dropdown part points at missing root {:?}", part.root);
            continue;
        };

        for action in &clickable.actions {
            match action {
                DropdownAction::Toggle => {
                    let expanded = widget.menu.toggle();
                    debug!("dropdown {:?} expanded: {expanded}", part.root);
                }
                DropdownAction::Select => {
                    let Some(binding) = binding else {
                        warn!("dropdown option without binding under {:?}", part.root);
                        continue;
                    };
                    let selection = widget.menu.select(&binding.label, &binding.command);
                    selected.write(DropdownSelected {
                        dropdown: part.root,
                        index: selection.index,
                        label: selection.label,
                    });
                }
            }
        }
    }
}

pub fn sync_dropdown_visuals(
    mut commands: Commands,
    dropdown_query: Query<&DropdownWidget, Changed<DropdownWidget>>,
) {
    for widget in dropdown_query.iter() {
        let mut scene = CommandsScene::new(&mut commands);
        sync_scene(&mut scene, &widget.menu, &widget.nodes);
    }
}
