use std::sync::Arc;

use bevy::prelude::*;
use rancher_core::prelude::*;
use sickle_ui::prelude::*;
use sickle_ui::ui_builder::UiBuilder;

use crate::icon::placeholder_color;

pub const TILE_SIZE: f32 = 36.;
const ICON_SIZE: f32 = 32.;

/// A draggable catalog entry in the sidebar.
#[derive(Component, Clone, Debug)]
pub struct CatalogTile(pub Arc<CatalogItem>);

/// Drawn in place of an icon that is missing or failed to load.
#[derive(Component)]
pub(super) struct TilePlaceholder;

impl CatalogTile {
    fn frame() -> impl Bundle {
        ButtonBundle {
            style: Style {
                width: Val::Px(TILE_SIZE),
                height: Val::Px(TILE_SIZE),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            background_color: Color::NONE.into(),
            border_radius: BorderRadius::all(Val::Px(6.)),
            ..default()
        }
    }

    fn icon(icon: Handle<Image>) -> impl Bundle {
        ImageBundle {
            image: icon.into(),
            style: Style {
                width: Val::Px(ICON_SIZE),
                height: Val::Px(ICON_SIZE),
                ..default()
            },
            ..default()
        }
    }

    fn placeholder(category: Category) -> impl Bundle {
        (
            TilePlaceholder,
            NodeBundle {
                style: Style {
                    width: Val::Px(ICON_SIZE),
                    height: Val::Px(ICON_SIZE),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                background_color: placeholder_color(category).into(),
                border_radius: BorderRadius::all(Val::Px(ICON_SIZE * 0.5)),
                ..default()
            },
        )
    }
}

fn initial(name: &str) -> String {
    name.chars()
        .find(|c| c.is_alphanumeric())
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string())
}

pub trait UiCatalogTileExt {
    fn catalog_tile(&mut self, item: Arc<CatalogItem>, icon: Option<Handle<Image>>);
}

impl UiCatalogTileExt for UiBuilder<'_, Entity> {
    fn catalog_tile(&mut self, item: Arc<CatalogItem>, icon: Option<Handle<Image>>) {
        let category = item.category;
        let label = initial(&item.name);
        self.container((CatalogTile::frame(), CatalogTile(item)), |parent| {
            match icon {
                Some(icon) => {
                    parent.spawn(CatalogTile::icon(icon));
                }
                None => {
                    parent.container(CatalogTile::placeholder(category), |parent| {
                        parent.spawn(TextBundle::from_section(
                            label,
                            TextStyle {
                                font_size: 14.,
                                color: Color::WHITE,
                                ..default()
                            },
                        ));
                    });
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_initials() {
        assert_eq!(initial("pink slime"), "P");
        assert_eq!(initial("  (rock) slime"), "R");
        assert_eq!(initial(""), "?");
    }
}
