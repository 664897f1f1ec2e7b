mod drag;
mod icon;
mod map;
mod sidebar;
mod welcome;

pub use icon::IconImages;
pub use sidebar::SIDEBAR_WIDTH;

use bevy::prelude::*;

use rancher_core::prelude::*;
use sickle_ui::SickleUiPlugin;

/// Setup that happens once the catalog is available.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
enum UiSetup {
    Icons,
    Spawn,
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

/// Window coordinates (origin top left, y down) to 2d world coordinates seen
/// by the default camera.
pub(crate) fn window_to_world(window_size: Vec2, pixel: Vec2) -> Vec2 {
    Vec2::new(pixel.x - window_size.x * 0.5, window_size.y * 0.5 - pixel.y)
}

pub struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(SickleUiPlugin);

        app.configure_sets(
            OnEnter(AppState::Running),
            (UiSetup::Icons, UiSetup::Spawn).chain(),
        );
        app.add_systems(PreStartup, setup_camera);
        app.add_systems(
            OnEnter(AppState::Running),
            icon::load_icons.in_set(UiSetup::Icons),
        );

        app.add_plugins(sidebar::Plugin);
        app.add_plugins(welcome::Plugin);
        app.add_plugins(map::Plugin);
        app.add_plugins(drag::Plugin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_corners_to_world() {
        let size = Vec2::new(1600.0, 900.0);
        assert_eq!(window_to_world(size, Vec2::ZERO), Vec2::new(-800.0, 450.0));
        assert_eq!(window_to_world(size, size), Vec2::new(800.0, -450.0));
        assert_eq!(window_to_world(size, size * 0.5), Vec2::ZERO);
    }
}
