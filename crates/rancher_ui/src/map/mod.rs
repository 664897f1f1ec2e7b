pub mod marker;

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::sprite::Anchor;
use bevy::window::PrimaryWindow;
use rancher_core::prelude::*;

use crate::sidebar::SIDEBAR_WIDTH;
use crate::welcome::welcome_closed;
use crate::window_to_world;

const ZOOM_PER_LINE: f64 = 0.25;
const ZOOM_PER_PIXEL: f64 = 0.005;

#[derive(Component)]
struct MapBackground;

fn spawn_background(
    mut commands: Commands,
    settings: Res<Settings>,
    asset_server: Res<AssetServer>,
) {
    commands.spawn((
        Name::new("Map"),
        SpriteBundle {
            texture: asset_server.load(settings.map_image.clone()),
            sprite: Sprite {
                anchor: Anchor::TopLeft,
                ..default()
            },
            ..default()
        },
        MapBackground,
    ));
}

fn surface_size(window: &Window) -> Option<Vec2> {
    let size = Vec2::new(window.width() - SIDEBAR_WIDTH, window.height());
    (size.x > 0. && size.y > 0.).then_some(size)
}

/// Creates the viewport as soon as the window has a usable size and keeps
/// it in sync with resizes. Until then the map counts as not ready.
fn track_viewport(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    viewport: Option<ResMut<MapViewport>>,
    settings: Res<Settings>,
) {
    let Some(size) = windows.get_single().ok().and_then(surface_size) else {
        return;
    };

    match viewport {
        Some(mut viewport) => {
            if viewport.size != size {
                viewport.size = size;
            }
        }
        None => {
            info!("Map ready");
            commands.insert_resource(MapViewport {
                origin: Vec2::new(SIDEBAR_WIDTH, 0.),
                size,
                center: settings.center,
                zoom: settings.clamp_zoom(settings.zoom),
            });
        }
    }
}

fn scroll_delta(events: impl Iterator<Item = MouseWheel>) -> f64 {
    events
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y as f64 * ZOOM_PER_LINE,
            MouseScrollUnit::Pixel => event.y as f64 * ZOOM_PER_PIXEL,
        })
        .sum()
}

fn zoom_system(
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<MapViewport>,
    settings: Res<Settings>,
) {
    let delta = scroll_delta(wheel.read().cloned());
    if delta == 0. {
        return;
    }
    let Some(cursor) = windows.get_single().ok().and_then(Window::cursor_position) else {
        return;
    };
    if !viewport.contains(cursor) {
        return;
    }

    let zoom = settings.clamp_zoom(viewport.zoom + delta);
    if zoom != viewport.zoom {
        viewport.zoom_at(cursor, zoom);
    }
}

/// Right button drag. Remembers the last cursor position between frames.
fn pan_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<MapViewport>,
    mut last: Local<Option<Vec2>>,
) {
    let cursor = windows.get_single().ok().and_then(Window::cursor_position);

    if buttons.just_pressed(MouseButton::Right) {
        *last = cursor.filter(|cursor| viewport.contains(*cursor));
        return;
    }
    if !buttons.pressed(MouseButton::Right) {
        *last = None;
        return;
    }

    let (Some(previous), Some(cursor)) = (*last, cursor) else {
        return;
    };
    if previous != cursor {
        viewport.pan(cursor - previous);
        *last = Some(cursor);
    }
}

fn layout_background(
    viewport: Res<MapViewport>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut backgrounds: Query<(&mut Transform, &mut Sprite), With<MapBackground>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let rect = viewport.world_rect();
    for (mut transform, mut sprite) in &mut backgrounds {
        transform.translation = window_to_world(window.size(), rect.min).extend(0.);
        sprite.custom_size = Some(rect.size());
    }
}

pub(crate) struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(marker::Plugin);

        app.add_systems(Startup, spawn_background);
        app.add_systems(PreUpdate, track_viewport);
        app.add_systems(
            Update,
            (zoom_system, pan_system)
                .run_if(resource_exists::<MapViewport>)
                .run_if(welcome_closed),
        );
        app.add_systems(
            PostUpdate,
            layout_background.run_if(resource_exists_and_changed::<MapViewport>),
        );
    }
}
