use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rancher_core::prelude::*;
use rancher_core::projection::Projection;

use crate::icon::{placeholder_color, IconImages};
use crate::window_to_world;

/// On-screen size of a marker in pixels, independent of zoom.
pub const MARKER_SIZE: f32 = 32.;

#[derive(Component, Debug)]
pub struct MarkerSprite(pub MarkerId);

/// Topmost marker under `cursor`, if any.
pub fn pick_marker(markers: &Markers, projection: &impl Projection, cursor: Vec2) -> Option<MarkerId> {
    markers
        .iter()
        .rev()
        .find(|marker| {
            let offset = projection.project(marker.coord) - cursor;
            offset.abs().max_element() <= MARKER_SIZE * 0.5
        })
        .map(|marker| marker.id)
}

/// Rebuilds every marker sprite from the current snapshot.
fn sync_markers(
    mut commands: Commands,
    markers: Res<Markers>,
    viewport: Res<MapViewport>,
    icons: Res<IconImages>,
    windows: Query<&Window, With<PrimaryWindow>>,
    sprites: Query<Entity, With<MarkerSprite>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    for entity in &sprites {
        commands.entity(entity).despawn_recursive();
    }

    for (index, marker) in markers.iter().enumerate() {
        let position = window_to_world(window.size(), viewport.project(marker.coord));
        let transform = Transform::from_translation(position.extend(1. + index as f32 * 1e-3));
        let sprite = SpriteBundle {
            sprite: Sprite {
                custom_size: Some(Vec2::splat(MARKER_SIZE)),
                ..default()
            },
            transform,
            ..default()
        };

        let sprite = match icons.for_item(&marker.item) {
            Some(texture) => SpriteBundle { texture, ..sprite },
            None => SpriteBundle {
                sprite: Sprite {
                    color: placeholder_color(marker.item.category),
                    ..sprite.sprite
                },
                ..sprite
            },
        };

        commands.spawn((sprite, MarkerSprite(marker.id)));
    }
}

pub(crate) struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            sync_markers.run_if(
                resource_exists::<MapViewport>
                    .and_then(resource_exists::<IconImages>)
                    .and_then(resource_changed::<Markers>.or_else(resource_changed::<MapViewport>)),
            ),
        );
    }
}
