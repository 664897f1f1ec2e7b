use bevy::prelude::*;
use bevy::window::WindowResolution;

fn main() -> AppExit {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Slime Rancher Assistant".to_string(),
            resolution: WindowResolution::new(1600., 900.),
            ..default()
        }),
        ..default()
    }));

    app.insert_resource(ClearColor(Color::srgb(0.06, 0.09, 0.12)));

    app.add_plugins(rancher_core::Plugin);
    app.add_plugins(rancher_api::Plugin);
    app.add_plugins(rancher_ui::Plugin);

    app.run()
}
