//! Pointer interaction primitives for world-space sprites.
//!
//! `CursorPosition` mirrors the primary window cursor in world space.
//! `Hoverable` is the hover truth for an entity, `Clickable<T>` latches a
//! one-frame `triggered` flag on the top-most hovered entity when the left
//! mouse button is pressed, and `HighlightColor` is the visual response.
use bevy::{prelude::*, window::PrimaryWindow};

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum InteractionSystem {
    Cursor,
    Hoverable,
    Clickable,
    Highlight,
}

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorPosition>()
            .configure_sets(
                Update,
                (
                    InteractionSystem::Cursor,
                    InteractionSystem::Hoverable,
                    InteractionSystem::Clickable,
                    InteractionSystem::Highlight,
                )
                    .chain(),
            )
            .add_systems(Update, track_cursor.in_set(InteractionSystem::Cursor))
            .add_systems(Update, hoverable_system.in_set(InteractionSystem::Hoverable))
            .add_systems(Update, apply_highlight.in_set(InteractionSystem::Highlight));
    }
}

/// Registers the click latch for one action type.
pub fn register_clickable<T: Copy + Send + Sync + 'static>(app: &mut App) {
    app.add_systems(
        Update,
        clickable_system::<T>.in_set(InteractionSystem::Clickable),
    );
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct CursorPosition {
    /// Cursor in world coordinates, `None` when off-window.
    pub position: Option<Vec2>,
}

#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct Hoverable {
    /// Hit region in local units. Falls back to the sprite's custom size.
    pub region: Option<Vec2>,
    pub hovered: bool,
}

#[derive(Component)]
#[require(Hoverable)]
pub struct Clickable<T>
where
    T: Copy + Send + Sync,
{
    /// Typed actions emitted when this element is activated.
    pub actions: Vec<T>,
    /// One-frame activation flag written by `clickable_system`.
    pub triggered: bool,
}

impl<T> Clickable<T>
where
    T: Copy + Send + Sync,
{
    pub fn new(actions: Vec<T>) -> Self {
        Self {
            actions,
            triggered: false,
        }
    }
}

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct HighlightColor {
    pub idle: Color,
    pub hovered: Color,
}

impl HighlightColor {
    pub const fn new(idle: Color, hovered: Color) -> Self {
        Self { idle, hovered }
    }
}

fn track_cursor(
    mut cursor: ResMut<CursorPosition>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
) {
    let Ok(window) = window_query.single() else {
        cursor.position = None;
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        cursor.position = None;
        return;
    };

    cursor.position = window.cursor_position().and_then(|screen_position| {
        camera
            .viewport_to_world_2d(camera_transform, screen_position)
            .ok()
    });
}

fn is_visible(visibility: Option<&InheritedVisibility>) -> bool {
    visibility.is_none_or(|visibility| visibility.get())
}

pub fn hoverable_system(
    cursor: Res<CursorPosition>,
    mut hoverable_query: Query<(
        &mut Hoverable,
        &GlobalTransform,
        Option<&Sprite>,
        Option<&InheritedVisibility>,
    )>,
) {
    for (mut hoverable, transform, sprite, visibility) in hoverable_query.iter_mut() {
        let region = hoverable
            .region
            .or_else(|| sprite.and_then(|sprite| sprite.custom_size));

        let hovered = match (cursor.position, region) {
            (Some(cursor), Some(region)) if is_visible(visibility) => {
                is_cursor_within_region(cursor, transform, region)
            }
            _ => false,
        };

        if hoverable.hovered != hovered {
            hoverable.hovered = hovered;
        }
    }
}

/// Latches `triggered` on the top-most hovered clickable for a left click.
pub fn clickable_system<T: Copy + Send + Sync + 'static>(
    mouse_input: Res<ButtonInput<MouseButton>>,
    mut clickable_query: Query<(Entity, &Hoverable, &GlobalTransform, &mut Clickable<T>)>,
) {
    // Reset click latches every frame so stale clicks cannot retrigger actions.
    for (_, _, _, mut clickable) in clickable_query.iter_mut() {
        clickable.triggered = false;
    }

    if !mouse_input.just_pressed(MouseButton::Left) {
        return;
    }

    let top = clickable_query
        .iter()
        .filter(|(_, hoverable, _, _)| hoverable.hovered)
        .max_by(|(a, _, a_transform, _), (b, _, b_transform, _)| {
            a_transform
                .translation()
                .z
                .total_cmp(&b_transform.translation().z)
                .then_with(|| a.index().cmp(&b.index()))
        })
        .map(|(entity, _, _, _)| entity);

    if let Some(entity) = top {
        if let Ok((_, _, _, mut clickable)) = clickable_query.get_mut(entity) {
            clickable.triggered = true;
        }
    }
}

fn apply_highlight(
    mut query: Query<(&Hoverable, &HighlightColor, &mut Sprite), Changed<Hoverable>>,
) {
    for (hoverable, highlight, mut sprite) in query.iter_mut() {
        sprite.color = if hoverable.hovered {
            highlight.hovered
        } else {
            highlight.idle
        };
    }
}

pub fn is_cursor_within_region(cursor: Vec2, transform: &GlobalTransform, region: Vec2) -> bool {
    let matrix = transform.to_matrix();
    let half = region / 2.0;
    let corners = [
        Vec3::new(-half.x, -half.y, 0.0),
        Vec3::new(half.x, -half.y, 0.0),
        Vec3::new(half.x, half.y, 0.0),
        Vec3::new(-half.x, half.y, 0.0),
    ];

    let world_corners: Vec<Vec2> = corners
        .iter()
        .map(|corner| matrix.transform_point3(*corner).truncate())
        .collect();

    is_point_in_polygon(cursor, &world_corners)
}

// Ray casting: count edge crossings to the right of the point.
fn is_point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;

    for i in 0..polygon.len() {
        let vi = polygon[i];
        let vj = polygon[j];

        if ((vi.y > point.y) != (vj.y > point.y))
            && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }

        j = i;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(x: f32, y: f32, z: f32, scale: f32) -> GlobalTransform {
        GlobalTransform::from(Transform::from_xyz(x, y, z).with_scale(Vec3::splat(scale)))
    }

    #[test]
    fn region_hit_test_respects_translation_and_scale() {
        let transform = placed(100.0, 50.0, 0.0, 10.0);
        let region = Vec2::new(4.0, 1.0);

        assert!(is_cursor_within_region(Vec2::new(100.0, 50.0), &transform, region));
        assert!(is_cursor_within_region(Vec2::new(119.0, 54.0), &transform, region));
        assert!(!is_cursor_within_region(Vec2::new(121.0, 50.0), &transform, region));
        assert!(!is_cursor_within_region(Vec2::new(100.0, 56.0), &transform, region));
    }

    #[test]
    fn hover_uses_sprite_size_and_skips_hidden_entities() {
        let mut app = App::new();
        app.insert_resource(CursorPosition {
            position: Some(Vec2::new(1.0, 0.0)),
        });
        app.add_systems(Update, hoverable_system);

        let visible = app
            .world_mut()
            .spawn((
                Hoverable::default(),
                Sprite::from_color(Color::WHITE, Vec2::new(4.0, 1.0)),
                placed(0.0, 0.0, 0.0, 1.0),
                InheritedVisibility::VISIBLE,
            ))
            .id();
        let hidden = app
            .world_mut()
            .spawn((
                Hoverable::default(),
                Sprite::from_color(Color::WHITE, Vec2::new(4.0, 1.0)),
                placed(0.0, 0.0, 0.0, 1.0),
                InheritedVisibility::HIDDEN,
            ))
            .id();

        app.update();

        assert!(app.world().get::<Hoverable>(visible).expect("hoverable").hovered);
        assert!(!app.world().get::<Hoverable>(hidden).expect("hoverable").hovered);
    }

    #[test]
    fn click_latches_only_the_top_most_hovered_entity() {
        let mut app = App::new();
        let mut mouse = ButtonInput::<MouseButton>::default();
        mouse.press(MouseButton::Left);
        app.insert_resource(mouse);
        app.add_systems(Update, clickable_system::<u8>);

        let hovered = Hoverable {
            region: None,
            hovered: true,
        };
        let below = app
            .world_mut()
            .spawn((Clickable::new(vec![0u8]), hovered, placed(0.0, 0.0, 0.0, 1.0)))
            .id();
        let above = app
            .world_mut()
            .spawn((Clickable::new(vec![1u8]), hovered, placed(0.0, 0.0, 0.5, 1.0)))
            .id();
        let idle = app
            .world_mut()
            .spawn((Clickable::new(vec![2u8]), placed(0.0, 0.0, 1.0, 1.0)))
            .id();

        app.update();

        let triggered = |entity: Entity| {
            app.world()
                .get::<Clickable<u8>>(entity)
                .map(|clickable| clickable.triggered)
        };
        assert_eq!(triggered(above), Some(true));
        assert_eq!(triggered(below), Some(false));
        assert_eq!(triggered(idle), Some(false));
    }

    #[test]
    fn highlight_follows_hover_state() {
        let mut app = App::new();
        app.add_systems(Update, apply_highlight);
        let idle = Color::BLACK;
        let hovered = Color::WHITE;
        let entity = app
            .world_mut()
            .spawn((
                Hoverable {
                    region: None,
                    hovered: true,
                },
                HighlightColor::new(idle, hovered),
                Sprite::from_color(idle, Vec2::ONE),
            ))
            .id();

        app.update();
        assert_eq!(app.world().get::<Sprite>(entity).map(|sprite| sprite.color), Some(hovered));

        if let Some(mut hoverable) = app.world_mut().get_mut::<Hoverable>(entity) {
            hoverable.hovered = false;
        }
        app.update();
        assert_eq!(app.world().get::<Sprite>(entity).map(|sprite| sprite.color), Some(idle));
    }
}
