use bevy::color::palettes;
use bevy::prelude::*;
use bevy::ui::FocusPolicy;
use rancher_core::prelude::*;
use sickle_ui::prelude::*;
use sickle_ui::ui_builder::UiBuilder;

use crate::UiSetup;

/// Introductory dialog shown over everything on start.
#[derive(Component, Debug)]
pub struct WelcomeDialog {
    pub open: bool,
}

impl WelcomeDialog {
    fn frame() -> impl Bundle {
        (
            Name::new("Welcome"),
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    width: Val::Percent(100.),
                    height: Val::Percent(100.),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                background_color: Color::srgba(0.0, 0.0, 0.0, 0.5).into(),
                focus_policy: FocusPolicy::Block,
                z_index: ZIndex::Global(20),
                ..default()
            },
        )
    }

    fn panel() -> impl Bundle {
        NodeBundle {
            style: Style {
                width: Val::Px(480.),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(24.)),
                row_gap: Val::Px(16.),
                ..default()
            },
            background_color: Color::WHITE.into(),
            border_radius: BorderRadius::all(Val::Px(8.)),
            ..default()
        }
    }
}

#[derive(Component)]
struct GetStarted;

fn paragraph(value: &str) -> TextBundle {
    TextBundle::from_section(
        value,
        TextStyle {
            font_size: 15.,
            color: palettes::tailwind::GRAY_500.into(),
            ..default()
        },
    )
}

trait UiWelcomeExt {
    fn welcome(&mut self);
}

impl UiWelcomeExt for UiBuilder<'_, UiRoot> {
    fn welcome(&mut self) {
        self.container(
            (WelcomeDialog::frame(), WelcomeDialog { open: true }),
            |parent| {
                parent.container(WelcomeDialog::panel(), |parent| {
                    parent.spawn(TextBundle::from_section(
                        "Slime Rancher Assistant",
                        TextStyle {
                            font_size: 22.,
                            color: palettes::tailwind::GRAY_900.into(),
                            ..default()
                        },
                    ));
                    parent.spawn(paragraph(
                        "A visual assistant for planning your ranch. \
                         All game assets belong to Monomi Park.",
                    ));
                    parent.spawn(paragraph(
                        "To get started, drag the icons from the sidebar onto the map.",
                    ));
                    parent.container(
                        (
                            ButtonBundle {
                                style: Style {
                                    align_self: AlignSelf::FlexEnd,
                                    padding: UiRect::axes(Val::Px(16.), Val::Px(8.)),
                                    ..default()
                                },
                                background_color: palettes::tailwind::CYAN_700.into(),
                                border_radius: BorderRadius::all(Val::Px(6.)),
                                ..default()
                            },
                            GetStarted,
                        ),
                        |parent| {
                            parent.spawn(TextBundle::from_section(
                                "Let's get started!",
                                TextStyle {
                                    font_size: 15.,
                                    color: Color::WHITE,
                                    ..default()
                                },
                            ));
                        },
                    );
                });
            },
        );
    }
}

fn spawn_welcome(mut commands: Commands) {
    commands.ui_builder(UiRoot).welcome();
}

fn dismiss_system(
    buttons: Query<&Interaction, (Changed<Interaction>, With<GetStarted>)>,
    keys: Res<ButtonInput<KeyCode>>,
    mut dialogs: Query<(&mut WelcomeDialog, &mut Style)>,
) {
    let clicked = buttons.iter().any(|interaction| *interaction == Interaction::Pressed);
    if !clicked && !keys.just_pressed(KeyCode::Escape) {
        return;
    }
    for (mut dialog, mut style) in &mut dialogs {
        if dialog.open {
            dialog.open = false;
            style.display = Display::None;
            info!("Welcome dialog dismissed");
        }
    }
}

/// Run condition for map gestures, which must not fire through the dialog.
pub(crate) fn welcome_closed(dialogs: Query<&WelcomeDialog>) -> bool {
    dialogs.iter().all(|dialog| !dialog.open)
}

pub(crate) struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(AppState::Running),
            spawn_welcome.in_set(UiSetup::Spawn),
        );
        app.add_systems(
            Update,
            dismiss_system.run_if(in_state(AppState::Running)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce as _;

    fn app() -> App {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_systems(Update, dismiss_system);
        app.world_mut().run_system_once(spawn_welcome);
        app
    }

    fn is_closed(app: &mut App) -> bool {
        app.world_mut().run_system_once(welcome_closed)
    }

    #[test]
    fn starts_open() {
        let mut app = app();
        app.update();
        assert!(!is_closed(&mut app));
    }

    #[test]
    fn button_closes() {
        let mut app = app();
        let world = app.world_mut();
        let button = world
            .query_filtered::<Entity, With<GetStarted>>()
            .single(world);
        world.entity_mut(button).insert(Interaction::Pressed);
        app.update();
        assert!(is_closed(&mut app));
    }

    #[test]
    fn escape_closes() {
        let mut app = app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();
        assert!(is_closed(&mut app));
    }
}
