use std::sync::Arc;

use bevy::color::palettes;
use bevy::prelude::*;
use rancher_core::prelude::*;
use sickle_ui::prelude::*;
use sickle_ui::ui_builder::UiBuilder;

use super::tile::{UiCatalogTileExt as _, TILE_SIZE};
use crate::icon::IconImages;

const COLUMNS: u16 = 4;

/// One collapsible group of tiles. Starts folded.
#[derive(Component, Debug)]
pub struct CategorySection {
    pub category: Category,
    pub len: usize,
    pub open: bool,
}

impl CategorySection {
    fn frame() -> impl Bundle {
        NodeBundle {
            style: Style {
                width: Val::Percent(100.),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            ..default()
        }
    }

    fn title(&self) -> String {
        let marker = if self.open { "-" } else { "+" };
        format!("{marker} {} ({})", self.category.label(), self.len)
    }
}

#[derive(Component)]
pub(super) struct SectionHeader;

impl SectionHeader {
    fn frame() -> impl Bundle {
        ButtonBundle {
            style: Style {
                width: Val::Percent(100.),
                padding: UiRect::axes(Val::Px(8.), Val::Px(6.)),
                ..default()
            },
            background_color: palettes::tailwind::GRAY_100.into(),
            border_radius: BorderRadius::all(Val::Px(6.)),
            ..default()
        }
    }
}

#[derive(Component)]
pub(super) struct SectionTitle;

#[derive(Component)]
pub(super) struct SectionGrid;

impl SectionGrid {
    fn frame() -> impl Bundle {
        NodeBundle {
            style: Style {
                display: Display::None,
                grid_template_columns: RepeatedGridTrack::px(COLUMNS, TILE_SIZE),
                row_gap: Val::Px(12.),
                column_gap: Val::Px(12.),
                padding: UiRect::all(Val::Px(8.)),
                ..default()
            },
            ..default()
        }
    }
}

pub trait UiCategorySectionExt {
    fn category_section(
        &mut self,
        category: Category,
        items: &[Arc<CatalogItem>],
        icons: &IconImages,
    );
}

impl UiCategorySectionExt for UiBuilder<'_, Entity> {
    fn category_section(
        &mut self,
        category: Category,
        items: &[Arc<CatalogItem>],
        icons: &IconImages,
    ) {
        let section = CategorySection {
            category,
            len: items.len(),
            open: false,
        };
        let title = section.title();

        self.container((CategorySection::frame(), section), |parent| {
            parent.container((SectionHeader::frame(), SectionHeader), |parent| {
                parent.spawn((
                    TextBundle::from_section(
                        title,
                        TextStyle {
                            font_size: 16.,
                            color: palettes::tailwind::GRAY_900.into(),
                            ..default()
                        },
                    ),
                    SectionTitle,
                ));
            });
            parent.container((SectionGrid::frame(), SectionGrid), |parent| {
                for item in items {
                    parent.catalog_tile(item.clone(), icons.for_item(item));
                }
            });
        });
    }
}

pub(super) fn toggle_system(
    headers: Query<(&Interaction, &Parent, &Children), (Changed<Interaction>, With<SectionHeader>)>,
    mut sections: Query<(&mut CategorySection, &Children)>,
    mut grids: Query<&mut Style, With<SectionGrid>>,
    mut titles: Query<&mut Text, With<SectionTitle>>,
) {
    for (interaction, parent, header_children) in &headers {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Ok((mut section, children)) = sections.get_mut(parent.get()) else {
            warn!("Section header without a section.");
            continue;
        };

        section.open = !section.open;
        let display = if section.open {
            Display::Grid
        } else {
            Display::None
        };

        for child in children.iter() {
            if let Ok(mut style) = grids.get_mut(*child) {
                style.display = display;
            }
        }
        for child in header_children.iter() {
            if let Ok(mut text) = titles.get_mut(*child) {
                text.sections[0].value = section.title();
            }
        }
    }
}
