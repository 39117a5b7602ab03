//! Scene-graph capability and the dropdown node tree built on top of it.
//!
//! `build_dropdown` only talks to `SceneGraph`, so the same tree can be
//! produced against Bevy `Commands` (`CommandsScene`) or a recording double.
use bevy::{prelude::*, sprite::Anchor};

use super::{
    layout::{
        option_quad, option_text, BorderSide, LabelLayout, QuadLayout, TextAnchor, CARET_GLYPH,
        TEXT_RESOLUTION,
    },
    menu::{DropdownMenu, OptionCommand, OptionEntry},
    DropdownAction, DropdownPart, OptionBinding,
};
use crate::systems::{
    colors::{self, Swatch},
    interaction::{Clickable, HighlightColor, Hoverable},
};

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
    Background,
    Face,
    Label,
    Toggle,
    Caret,
    OptionList,
    OptionRow,
    OptionText,
    Border(BorderSide),
}

impl NodeRole {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Background => "dropdown_background",
            Self::Face => "dropdown_face",
            Self::Label => "dropdown_label",
            Self::Toggle => "dropdown_toggle",
            Self::Caret => "dropdown_caret",
            Self::OptionList => "dropdown_options",
            Self::OptionRow => "dropdown_option",
            Self::OptionText => "dropdown_option_text",
            Self::Border(_) => "dropdown_border",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Visual {
    Group,
    Quad { size: Vec2, color: Color },
    Text {
        text: String,
        layout: LabelLayout,
        color: Color,
    },
}

#[derive(Clone, Debug)]
pub enum NodeInteraction {
    Toggle { highlight: Color },
    Select {
        label: String,
        command: OptionCommand,
        highlight: Color,
    },
}

#[derive(Clone, Debug)]
pub struct NodeSpec {
    pub role: NodeRole,
    pub translation: Vec3,
    pub visual: Visual,
    pub interaction: Option<NodeInteraction>,
    pub visible: bool,
}

impl NodeSpec {
    pub fn group(role: NodeRole) -> Self {
        Self {
            role,
            translation: Vec3::ZERO,
            visual: Visual::Group,
            interaction: None,
            visible: true,
        }
    }

    pub fn quad(role: NodeRole, quad: QuadLayout, color: Color) -> Self {
        Self {
            role,
            translation: quad.translation,
            visual: Visual::Quad {
                size: quad.size,
                color,
            },
            interaction: None,
            visible: true,
        }
    }

    pub fn text(role: NodeRole, text: impl Into<String>, layout: LabelLayout, color: Color) -> Self {
        Self {
            role,
            translation: layout.translation,
            visual: Visual::Text {
                text: text.into(),
                layout,
                color,
            },
            interaction: None,
            visible: true,
        }
    }

    pub fn with_interaction(mut self, interaction: NodeInteraction) -> Self {
        self.interaction = Some(interaction);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// Minimal scene-graph surface a dropdown needs from its host.
pub trait SceneGraph {
    type Node: Copy;

    fn create_root(&mut self, transform: Transform) -> Self::Node;

    fn create_node(&mut self, parent: Self::Node, spec: NodeSpec) -> Self::Node;

    fn set_visible(&mut self, node: Self::Node, visible: bool);

    fn set_text(&mut self, node: Self::Node, text: &str);
}

/// Nodes a dropdown mutates after construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropdownNodes<N> {
    pub root: N,
    pub label: N,
    pub toggle: N,
    pub list: N,
}

/// Creates the header, the option list and its borders for `menu`.
pub fn build_dropdown<S: SceneGraph>(scene: &mut S, menu: &DropdownMenu) -> DropdownNodes<S::Node> {
    let layout = menu.layout();
    let header = layout.header();
    let root = scene.create_root(layout.root_transform());

    scene.create_node(
        root,
        NodeSpec::quad(NodeRole::Background, header.background, colors::swatch(Swatch::HeaderFrame)),
    );
    scene.create_node(
        root,
        NodeSpec::quad(NodeRole::Face, header.face, colors::swatch(Swatch::HeaderFace)),
    );
    let label = scene.create_node(
        root,
        NodeSpec::text(NodeRole::Label, menu.label(), header.label, colors::swatch(Swatch::Text)),
    );

    let toggle_color = colors::swatch(Swatch::Toggle);
    let toggle = scene.create_node(
        root,
        NodeSpec::quad(NodeRole::Toggle, header.toggle, toggle_color).with_interaction(
            NodeInteraction::Toggle {
                highlight: toggle_color,
            },
        ),
    );
    scene.create_node(
        toggle,
        NodeSpec::text(NodeRole::Caret, CARET_GLYPH, header.caret, colors::swatch(Swatch::Text)),
    );

    let list = scene.create_node(
        root,
        NodeSpec::group(NodeRole::OptionList).with_visible(menu.is_expanded()),
    );

    let entries = menu.entries();
    for entry in &entries {
        add_option(scene, list, entry, layout.x_scale());
    }

    for segment in layout.borders(entries.len()) {
        scene.create_node(
            list,
            NodeSpec::quad(
                NodeRole::Border(segment.side),
                segment.quad,
                colors::swatch(Swatch::Border),
            ),
        );
    }

    DropdownNodes {
        root,
        label,
        toggle,
        list,
    }
}

/// Creates one clickable option row bound to `(entry.label, entry.command)`.
pub fn add_option<S: SceneGraph>(
    scene: &mut S,
    list: S::Node,
    entry: &OptionEntry,
    x_scale: f32,
) -> S::Node {
    let row = scene.create_node(
        list,
        NodeSpec::quad(NodeRole::OptionRow, option_quad(entry.index), entry.color).with_interaction(
            NodeInteraction::Select {
                label: entry.label.clone(),
                command: entry.command.clone(),
                highlight: colors::highlight(entry.color),
            },
        ),
    );
    scene.create_node(
        row,
        NodeSpec::text(
            NodeRole::OptionText,
            entry.label.clone(),
            option_text(x_scale),
            colors::swatch(Swatch::Text),
        ),
    );
    row
}

/// Pushes the menu's label and expanded flag onto its nodes.
pub fn sync_scene<S: SceneGraph>(scene: &mut S, menu: &DropdownMenu, nodes: &DropdownNodes<S::Node>) {
    scene.set_visible(nodes.list, menu.is_expanded());
    scene.set_text(nodes.label, menu.label());
}

const fn anchor(anchor: TextAnchor) -> Anchor {
    match anchor {
        TextAnchor::Center => Anchor::CENTER,
        TextAnchor::CenterLeft => Anchor::CENTER_LEFT,
    }
}

const fn visibility(visible: bool) -> Visibility {
    if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

/// `SceneGraph` over Bevy `Commands`. Nodes are entities.
pub struct CommandsScene<'c, 'w, 's> {
    commands: &'c mut Commands<'w, 's>,
    parent: Option<Entity>,
    root: Option<Entity>,
}

impl<'c, 'w, 's> CommandsScene<'c, 'w, 's> {
    pub fn new(commands: &'c mut Commands<'w, 's>) -> Self {
        Self {
            commands,
            parent: None,
            root: None,
        }
    }

    /// Attaches the dropdown root to `parent` when given.
    pub fn with_parent(mut self, parent: Option<Entity>) -> Self {
        self.parent = parent;
        self
    }
}

impl SceneGraph for CommandsScene<'_, '_, '_> {
    type Node = Entity;

    fn create_root(&mut self, transform: Transform) -> Entity {
        let mut root = self
            .commands
            .spawn((Name::new("dropdown"), transform, Visibility::Inherited));
        if let Some(parent) = self.parent {
            root.insert(ChildOf(parent));
        }
        let root = root.id();
        self.root = Some(root);
        root
    }

    fn create_node(&mut self, parent: Entity, spec: NodeSpec) -> Entity {
        let root = self.root.unwrap_or(parent);
        let NodeSpec {
            role,
            translation,
            visual,
            interaction,
            visible,
        } = spec;

        let mut node = self.commands.spawn((
            Name::new(role.name()),
            role,
            DropdownPart { root },
            Transform::from_translation(translation),
            visibility(visible),
            ChildOf(parent),
        ));

        let mut idle_color = Color::NONE;
        match visual {
            Visual::Group => {}
            Visual::Quad { size, color } => {
                idle_color = color;
                node.insert(Sprite::from_color(color, size));
            }
            Visual::Text {
                text,
                layout,
                color,
            } => {
                node.insert((
                    Text2d::new(text),
                    TextFont {
                        font_size: TEXT_RESOLUTION,
                        ..default()
                    },
                    TextColor(color),
                    anchor(layout.anchor),
                    Transform::from_translation(translation)
                        .with_scale(Vec3::splat(layout.text_scale())),
                ));
            }
        }

        match interaction {
            None => {}
            Some(NodeInteraction::Toggle { highlight }) => {
                node.insert((
                    Clickable::new(vec![DropdownAction::Toggle]),
                    Hoverable::default(),
                    HighlightColor::new(idle_color, highlight),
                ));
            }
            Some(NodeInteraction::Select {
                label,
                command,
                highlight,
            }) => {
                node.insert((
                    Clickable::new(vec![DropdownAction::Select]),
                    Hoverable::default(),
                    HighlightColor::new(idle_color, highlight),
                    OptionBinding { label, command },
                ));
            }
        }

        node.id()
    }

    fn set_visible(&mut self, node: Entity, visible: bool) {
        self.commands.entity(node).insert(visibility(visible));
    }

    fn set_text(&mut self, node: Entity, text: &str) {
        self.commands.entity(node).insert(Text2d::new(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::ui::dropdown::config::DropdownConfig;
    use std::collections::HashMap;

    /// In-memory scene recording every node it is asked to create.
    #[derive(Default)]
    struct RecordingScene {
        roots: Vec<Transform>,
        nodes: Vec<(usize, NodeSpec)>,
        visible: HashMap<usize, bool>,
        text: HashMap<usize, String>,
    }

    impl RecordingScene {
        fn count(&self, role: NodeRole) -> usize {
            self.nodes.iter().filter(|(_, spec)| spec.role == role).count()
        }

        fn borders(&self) -> usize {
            self.nodes
                .iter()
                .filter(|(_, spec)| matches!(spec.role, NodeRole::Border(_)))
                .count()
        }

        fn spec(&self, node: usize) -> &NodeSpec {
            &self.nodes[node - 1].1
        }
    }

    impl SceneGraph for RecordingScene {
        // Node 0 is the root, node n is `nodes[n - 1]`.
        type Node = usize;

        fn create_root(&mut self, transform: Transform) -> usize {
            self.roots.push(transform);
            0
        }

        fn create_node(&mut self, parent: usize, spec: NodeSpec) -> usize {
            self.visible.insert(self.nodes.len() + 1, spec.visible);
            self.nodes.push((parent, spec));
            self.nodes.len()
        }

        fn set_visible(&mut self, node: usize, visible: bool) {
            self.visible.insert(node, visible);
        }

        fn set_text(&mut self, node: usize, text: &str) {
            self.text.insert(node, text.to_string());
        }
    }

    fn menu(config: DropdownConfig) -> DropdownMenu {
        DropdownMenu::new(config, vec![]).expect("menu")
    }

    #[test]
    fn builds_one_row_per_option_under_the_hidden_list() {
        let mut scene = RecordingScene::default();
        let menu = menu(DropdownConfig::new("Pick", ["A", "B", "C"]));
        let nodes = build_dropdown(&mut scene, &menu);

        assert_eq!(scene.roots.len(), 1);
        assert_eq!(scene.count(NodeRole::OptionRow), 3);
        assert_eq!(scene.count(NodeRole::OptionText), 3);
        assert_eq!(scene.count(NodeRole::Toggle), 1);
        assert_eq!(scene.visible.get(&nodes.list), Some(&false));
        assert!(scene
            .nodes
            .iter()
            .filter(|(_, spec)| spec.role == NodeRole::OptionRow)
            .all(|(parent, _)| *parent == nodes.list));
    }

    #[test]
    fn rows_carry_their_bound_label_and_position() {
        let mut scene = RecordingScene::default();
        let menu = menu(DropdownConfig::new("Pick", ["A", "B"]));
        build_dropdown(&mut scene, &menu);

        let rows: Vec<&NodeSpec> = scene
            .nodes
            .iter()
            .map(|(_, spec)| spec)
            .filter(|spec| spec.role == NodeRole::OptionRow)
            .collect();
        assert!(rows[1].translation.abs_diff_eq(Vec3::new(0.0, -2.6, 0.0), 1e-5));
        match &rows[1].interaction {
            Some(NodeInteraction::Select { label, command, .. }) => {
                assert_eq!(label, "B");
                assert!(command.ptr_eq(&menu.commands()[1]));
            }
            other => panic!("unexpected interaction {other:?}"),
        }
    }

    #[test]
    fn border_count_follows_flags() {
        for (border, lr_border, expected) in [(true, true, 4), (true, false, 4), (false, true, 2), (false, false, 0)] {
            let mut scene = RecordingScene::default();
            let config = DropdownConfig::new("Pick", ["A", "B"]).with_borders(border, lr_border);
            let nodes = build_dropdown(&mut scene, &menu(config));

            assert_eq!(scene.borders(), expected, "border={border} lr_border={lr_border}");
            assert!(scene
                .nodes
                .iter()
                .filter(|(_, spec)| matches!(spec.role, NodeRole::Border(_)))
                .all(|(parent, spec)| *parent == nodes.list
                    && spec.translation.z > option_quad(0).translation.z));
        }
    }

    #[test]
    fn toggle_is_clickable_with_caret_child() {
        let mut scene = RecordingScene::default();
        let nodes = build_dropdown(&mut scene, &menu(DropdownConfig::default()));

        assert!(matches!(
            scene.spec(nodes.toggle).interaction,
            Some(NodeInteraction::Toggle { .. })
        ));
        let caret = scene
            .nodes
            .iter()
            .find(|(_, spec)| spec.role == NodeRole::Caret)
            .expect("caret");
        assert_eq!(caret.0, nodes.toggle);
        assert!(matches!(&caret.1.visual, Visual::Text { text, .. } if text == CARET_GLYPH));
    }

    #[test]
    fn sync_pushes_label_and_visibility() {
        let mut scene = RecordingScene::default();
        let mut menu = menu(DropdownConfig::new("Pick", ["A", "B"]));
        let nodes = build_dropdown(&mut scene, &menu);

        menu.toggle();
        sync_scene(&mut scene, &menu, &nodes);
        assert_eq!(scene.visible.get(&nodes.list), Some(&true));

        let command = menu.commands()[1].clone();
        menu.select("B", &command);
        sync_scene(&mut scene, &menu, &nodes);
        assert_eq!(scene.visible.get(&nodes.list), Some(&false));
        assert_eq!(scene.text.get(&nodes.label).map(String::as_str), Some("B"));
    }

    #[test]
    fn empty_option_list_builds_header_only() {
        let mut scene = RecordingScene::default();
        let config = DropdownConfig::new("Pick", Vec::<String>::new()).with_borders(false, false);
        build_dropdown(&mut scene, &menu(config));

        assert_eq!(scene.count(NodeRole::OptionRow), 0);
        assert_eq!(scene.count(NodeRole::Background), 1);
        assert_eq!(scene.count(NodeRole::Label), 1);
    }
}
