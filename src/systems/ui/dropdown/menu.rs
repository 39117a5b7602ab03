//! Engine-independent dropdown state.
//!
//! `DropdownMenu` owns the option labels, the command paired with each
//! option, the header label and the expanded flag. Nothing here touches the
//! scene graph; `scene` turns a menu into nodes and keeps them in sync.
use std::{fmt, sync::Arc};

use bevy::prelude::*;

use super::{config::DropdownConfig, layout::DropdownLayout, DropdownError};
use crate::systems::colors;

/// Callback run when an option is chosen.
#[derive(Clone)]
pub struct OptionCommand(Arc<dyn Fn() + Send + Sync>);

impl OptionCommand {
    pub fn new(command: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(command))
    }

    /// Command that only logs the selected option name.
    pub fn log_selection(option: impl Into<String>) -> Self {
        let option = option.into();
        Self::new(move || info!("selected option {option}"))
    }

    pub fn run(&self) {
        (self.0)()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for OptionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OptionCommand(..)")
    }
}

#[derive(Clone, Debug)]
pub struct OptionEntry {
    pub label: String,
    pub command: OptionCommand,
    pub index: usize,
    pub color: Color,
}

/// Outcome of a selection, used to report the choice to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// First index whose label matches the selected label.
    pub index: Option<usize>,
    pub label: String,
}

#[derive(Debug)]
pub struct DropdownMenu {
    header_text: String,
    label: String,
    options: Vec<String>,
    commands: Vec<OptionCommand>,
    layout: DropdownLayout,
    expanded: bool,
}

impl DropdownMenu {
    /// Builds a collapsed menu, padding `commands` with logging commands
    /// until every option has one.
    pub fn new(config: DropdownConfig, commands: Vec<OptionCommand>) -> Result<Self, DropdownError> {
        if commands.len() > config.options.len() {
            return Err(DropdownError::MoreCommandsThanOptions {
                commands: commands.len(),
                options: config.options.len(),
            });
        }

        if let Some(hex) = config.color.as_deref() {
            match colors::parse_hex(hex) {
                Some(color) => debug!("dropdown color {color:?} ignored; dropdown colors are fixed"),
                None => warn!("dropdown color {hex:?} is not a hex colour; ignored"),
            }
        }

        let layout = DropdownLayout::from_config(&config);
        let DropdownConfig { text, options, .. } = config;

        let mut commands = commands;
        while commands.len() < options.len() {
            let option = &options[commands.len()];
            commands.push(OptionCommand::log_selection(option.clone()));
        }

        Ok(Self {
            label: text.clone(),
            header_text: text,
            options,
            commands,
            layout,
            expanded: false,
        })
    }

    pub fn header_text(&self) -> &str {
        &self.header_text
    }

    /// Text currently shown in the header.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn commands(&self) -> &[OptionCommand] {
        &self.commands
    }

    pub fn layout(&self) -> &DropdownLayout {
        &self.layout
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Rows to build, one per option, paired with their command and colour.
    pub fn entries(&self) -> Vec<OptionEntry> {
        let shades = colors::option_shades(self.options.len(), self.layout.alternate_colors);
        self.options
            .iter()
            .zip(&self.commands)
            .zip(shades)
            .enumerate()
            .map(|(index, ((label, command), shade))| OptionEntry {
                label: label.clone(),
                command: command.clone(),
                index,
                color: colors::swatch(shade),
            })
            .collect()
    }

    /// Flips the option list between collapsed and expanded.
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    pub fn collapse(&mut self) {
        self.expanded = false;
    }

    /// Handles a click on the row bound to `(label, command)`.
    ///
    /// Runs the command registered for the first option named `label`, shows
    /// `label` in the header, collapses the list and then runs the bound
    /// `command` as well. For an unambiguous row both calls hit the same
    /// command, so it runs twice.
    pub fn select(&mut self, label: &str, command: &OptionCommand) -> Selection {
        let index = self.options.iter().position(|option| option == label);
        if let Some(registered) = index.and_then(|index| self.commands.get(index)) {
            registered.run();
        }

        self.label = label.to_string();
        self.expanded = false;

        command.run();

        Selection {
            index,
            label: self.label.clone(),
        }
    }
}
