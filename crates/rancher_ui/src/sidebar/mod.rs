mod banner;
mod section;
mod tile;

pub use tile::CatalogTile;

use bevy::color::palettes;
use bevy::prelude::*;
use rancher_core::prelude::*;
use sickle_ui::prelude::*;

use banner::UiBannerExt as _;
use section::UiCategorySectionExt as _;

use crate::icon::IconImages;
use crate::UiSetup;

pub const SIDEBAR_WIDTH: f32 = 256.;

#[derive(Component)]
pub struct Sidebar;

impl Sidebar {
    fn frame() -> impl Bundle {
        (
            Name::new("Sidebar"),
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    left: Val::Px(0.),
                    top: Val::Px(0.),
                    width: Val::Px(SIDEBAR_WIDTH),
                    height: Val::Percent(100.),
                    flex_direction: FlexDirection::Column,
                    padding: UiRect::all(Val::Px(12.)),
                    row_gap: Val::Px(8.),
                    ..default()
                },
                background_color: palettes::tailwind::GRAY_50.into(),
                ..default()
            },
        )
    }
}

/// Takes the height left over by the title, hover label and banner.
#[derive(Component)]
struct SectionList;

impl SectionList {
    fn frame() -> impl Bundle {
        (
            Name::new("Sections"),
            NodeBundle {
                style: Style {
                    width: Val::Percent(100.),
                    flex_grow: 1.,
                    min_height: Val::Px(0.),
                    overflow: Overflow::clip_y(),
                    ..default()
                },
                ..default()
            },
            SectionList,
        )
    }
}

/// Shows the name of the tile under the cursor.
#[derive(Component)]
struct HoverLabel;

fn spawn_sidebar(mut commands: Commands, bundle: Res<CatalogBundle>, icons: Res<IconImages>) {
    commands
        .ui_builder(UiRoot)
        .container(Sidebar::frame(), |parent| {
            parent.spawn(TextBundle::from_section(
                "Slime Rancher Assistant",
                TextStyle {
                    font_size: 18.,
                    color: palettes::tailwind::GRAY_900.into(),
                    ..default()
                },
            ));
            parent.container(SectionList::frame(), |parent| {
                parent.scroll_view(Some(ScrollAxis::Vertical), |scroll_view| {
                    scroll_view
                        .column(|parent| {
                            for (category, items) in bundle.sections() {
                                parent.category_section(category, items, &icons);
                            }
                        })
                        .style()
                        .width(Val::Percent(100.))
                        .row_gap(Val::Px(8.));
                });
            });
            parent.spawn((
                TextBundle::from_section(
                    "",
                    TextStyle {
                        font_size: 14.,
                        color: palettes::tailwind::GRAY_500.into(),
                        ..default()
                    },
                ),
                HoverLabel,
            ));
            parent.banner();
        })
        .insert(Sidebar);
}

fn hover_label_system(
    tiles: Query<(&Interaction, &CatalogTile), Changed<Interaction>>,
    mut labels: Query<&mut Text, With<HoverLabel>>,
) {
    for (interaction, tile) in &tiles {
        let value = match interaction {
            Interaction::Hovered | Interaction::Pressed => tile.0.name.clone(),
            Interaction::None => String::new(),
        };
        for mut label in &mut labels {
            label.sections[0].value.clone_from(&value);
        }
    }
}

pub(crate) struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(AppState::Running),
            spawn_sidebar.in_set(UiSetup::Spawn),
        );
        app.add_systems(
            Update,
            (
                section::toggle_system,
                banner::close_system,
                hover_label_system,
            )
                .run_if(in_state(AppState::Running)),
        );
    }
}
