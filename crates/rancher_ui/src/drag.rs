use std::sync::Arc;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rancher_core::prelude::*;
use rancher_core::projection::Projection as _;

use crate::icon::{placeholder_color, IconImages};
use crate::map::marker::{pick_marker, MarkerSprite, MARKER_SIZE};
use crate::sidebar::CatalogTile;
use crate::welcome::welcome_closed;
use crate::window_to_world;

/// What the left mouse button is currently carrying.
#[derive(Resource, Clone, Debug, Default)]
pub enum DragGesture {
    #[default]
    Idle,
    Catalog(Arc<CatalogItem>),
    Marker(MarkerId),
}

impl DragGesture {
    fn is_idle(&self) -> bool {
        matches!(self, DragGesture::Idle)
    }
}

/// Follows the cursor while a sidebar item is dragged.
#[derive(Component)]
struct DragGhost;

fn spawn_ghost(mut commands: Commands) {
    commands.spawn((
        Name::new("Drag ghost"),
        ImageBundle {
            style: Style {
                display: Display::None,
                position_type: PositionType::Absolute,
                width: Val::Px(MARKER_SIZE),
                height: Val::Px(MARKER_SIZE),
                ..default()
            },
            z_index: ZIndex::Global(10),
            ..default()
        },
        DragGhost,
    ));
}

fn cursor(windows: &Query<&Window, With<PrimaryWindow>>) -> Option<Vec2> {
    windows.get_single().ok().and_then(Window::cursor_position)
}

fn start_catalog_drag(
    tiles: Query<(&Interaction, &CatalogTile), Changed<Interaction>>,
    mut gesture: ResMut<DragGesture>,
    icons: Res<IconImages>,
    mut ghosts: Query<(&mut Style, &mut UiImage), With<DragGhost>>,
) {
    if !gesture.is_idle() {
        return;
    }
    let Some((_, tile)) = tiles
        .iter()
        .find(|(interaction, _)| **interaction == Interaction::Pressed)
    else {
        return;
    };

    debug!("Dragging {}", tile.0.name);
    for (mut style, mut image) in &mut ghosts {
        match icons.for_item(&tile.0) {
            Some(icon) => {
                image.texture = icon;
                image.color = Color::WHITE;
            }
            None => {
                image.texture = Handle::default();
                image.color = placeholder_color(tile.0.category);
            }
        }
        style.display = Display::Flex;
    }
    *gesture = DragGesture::Catalog(tile.0.clone());
}

fn start_marker_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    markers: Res<Markers>,
    viewport: Res<MapViewport>,
    mut gesture: ResMut<DragGesture>,
) {
    if !buttons.just_pressed(MouseButton::Left) || !gesture.is_idle() {
        return;
    }
    let Some(cursor) = cursor(&windows).filter(|cursor| viewport.contains(*cursor)) else {
        return;
    };
    if let Some(id) = pick_marker(&markers, viewport.as_ref(), cursor) {
        debug!("Dragging marker {}", id.0);
        *gesture = DragGesture::Marker(id);
    }
}

fn follow_cursor(
    gesture: Res<DragGesture>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut ghosts: Query<&mut Style, With<DragGhost>>,
    mut sprites: Query<(&MarkerSprite, &mut Transform)>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    match gesture.as_ref() {
        DragGesture::Idle => {}
        DragGesture::Catalog(_) => {
            for mut style in &mut ghosts {
                style.left = Val::Px(cursor.x - MARKER_SIZE * 0.5);
                style.top = Val::Px(cursor.y - MARKER_SIZE * 0.5);
            }
        }
        DragGesture::Marker(id) => {
            let position = window_to_world(window.size(), cursor);
            for (sprite, mut transform) in &mut sprites {
                if sprite.0 == *id {
                    transform.translation.x = position.x;
                    transform.translation.y = position.y;
                }
            }
        }
    }
}

/// Finishes the gesture on release. The drop position always comes from the
/// release itself.
fn end_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    viewport: Option<Res<MapViewport>>,
    mut gesture: ResMut<DragGesture>,
    mut markers: ResMut<Markers>,
    mut ghosts: Query<&mut Style, With<DragGhost>>,
    mut catalog_drops: EventWriter<CatalogDragEnded>,
    mut marker_drops: EventWriter<MarkerDragEnded>,
) {
    if !buttons.just_released(MouseButton::Left) || gesture.is_idle() {
        return;
    }
    let finished = std::mem::take(gesture.as_mut());
    for mut style in &mut ghosts {
        style.display = Display::None;
    }

    let Some(cursor) = cursor(&windows) else {
        debug!("Drag left the window, cancelled");
        markers.set_changed();
        return;
    };

    match finished {
        DragGesture::Idle => {}
        DragGesture::Catalog(item) => {
            catalog_drops.send(CatalogDragEnded { item, cursor });
        }
        DragGesture::Marker(id) => match viewport.as_deref() {
            Some(viewport) if viewport.contains(cursor) => {
                marker_drops.send(MarkerDragEnded {
                    id,
                    coord: viewport.unproject(cursor),
                });
            }
            Some(_) => {
                debug!("Marker {} released outside the map", id.0);
                // Snap the sprite back to where the marker still is.
                markers.set_changed();
            }
            None => {
                warn!("Map not ready, dropping marker drag");
                markers.set_changed();
            }
        },
    }
}

pub(crate) struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragGesture>();
        app.add_systems(Startup, spawn_ghost);
        app.add_systems(
            Update,
            (
                start_catalog_drag.run_if(resource_exists::<IconImages>),
                start_marker_drag
                    .run_if(resource_exists::<MapViewport>)
                    .run_if(welcome_closed),
                follow_cursor,
                end_drag,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        );
    }
}
