use std::sync::Arc;

use bevy::prelude::*;

use crate::catalog::CatalogItem;
use crate::marker::MarkerId;
use crate::projection::GeoCoord;

/// A sidebar tile was released. `cursor` is the window position of the
/// release that finished this gesture.
#[derive(Event, Clone, Debug)]
pub struct CatalogDragEnded {
    pub item: Arc<CatalogItem>,
    pub cursor: Vec2,
}

/// A placed marker was released at `coord`.
#[derive(Event, Clone, Debug)]
pub struct MarkerDragEnded {
    pub id: MarkerId,
    pub coord: GeoCoord,
}

pub(crate) struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CatalogDragEnded>();
        app.add_event::<MarkerDragEnded>();
    }
}
