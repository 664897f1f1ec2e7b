use bevy::color::palettes;
use bevy::prelude::*;
use sickle_ui::prelude::*;
use sickle_ui::ui_builder::UiBuilder;

/// The greeting card at the bottom of the sidebar. Purely cosmetic.
#[derive(Component, Debug)]
pub struct Banner {
    pub visible: bool,
}

impl Banner {
    fn frame() -> impl Bundle {
        NodeBundle {
            style: Style {
                flex_direction: FlexDirection::Column,
                margin: UiRect::top(Val::Auto),
                padding: UiRect::all(Val::Px(12.)),
                row_gap: Val::Px(8.),
                ..default()
            },
            background_color: palettes::tailwind::CYAN_50.into(),
            border_radius: BorderRadius::all(Val::Px(8.)),
            ..default()
        }
    }
}

#[derive(Component)]
pub(super) struct BannerClose;

fn text(value: &str, size: f32) -> TextBundle {
    TextBundle::from_section(
        value,
        TextStyle {
            font_size: size,
            color: palettes::tailwind::CYAN_900.into(),
            ..default()
        },
    )
}

pub trait UiBannerExt {
    fn banner(&mut self);
}

impl UiBannerExt for UiBuilder<'_, Entity> {
    fn banner(&mut self) {
        self.container((Banner::frame(), Banner { visible: true }), |parent| {
            parent.row(|parent| {
                parent.spawn(text("Hi there!", 14.).with_style(Style {
                    flex_grow: 1.,
                    ..default()
                }));
                parent.container(
                    (
                        ButtonBundle {
                            style: Style {
                                width: Val::Px(20.),
                                height: Val::Px(20.),
                                justify_content: JustifyContent::Center,
                                align_items: AlignItems::Center,
                                ..default()
                            },
                            background_color: palettes::tailwind::GRAY_200.into(),
                            border_radius: BorderRadius::all(Val::Px(4.)),
                            ..default()
                        },
                        BannerClose,
                    ),
                    |parent| {
                        parent.spawn(text("x", 12.));
                    },
                );
            });
            parent.spawn(text(
                "Drag an icon onto the map to place it. Placed markers can be dragged around.",
                12.,
            ));
            parent.spawn(text(
                "Scroll to zoom, hold the right mouse button to pan.",
                12.,
            ));
        });
    }
}

pub(super) fn close_system(
    buttons: Query<&Interaction, (Changed<Interaction>, With<BannerClose>)>,
    mut banners: Query<(&mut Banner, &mut Style)>,
) {
    if !buttons.iter().any(|interaction| *interaction == Interaction::Pressed) {
        return;
    }
    for (mut banner, mut style) in &mut banners {
        if banner.visible {
            banner.visible = false;
            style.display = Display::None;
            debug!("Banner dismissed");
        }
    }
}
