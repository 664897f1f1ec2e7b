pub mod catalog;
pub mod events;
pub mod marker;
pub mod projection;
pub mod settings;
mod state;

pub mod prelude {
    pub use crate::catalog::{CatalogBundle, CatalogItem, Category, ItemId};
    pub use crate::events::{CatalogDragEnded, MarkerDragEnded};
    pub use crate::marker::{Marker, MarkerId, Markers};
    pub use crate::projection::{GeoCoord, MapViewport, Projection};
    pub use crate::settings::Settings;
    pub use crate::state::AppState;
}

use bevy::prelude::*;

pub struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(settings::Settings::load());
        app.add_plugins(state::Plugin);
        app.add_plugins(events::Plugin);
        app.add_plugins(marker::Plugin);
    }
}
